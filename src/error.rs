// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use gtk::glib;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("GStreamer element '{0}' is not available")]
    MissingElement(&'static str),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] glib::BoolError),

    #[error("unable to change pipeline state: {0}")]
    StateChange(#[from] gst::StateChangeError),

    #[error("unable to link pads: {0:?}")]
    PadLink(gst::PadLinkError),

    #[error(transparent)]
    Glib(#[from] glib::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
