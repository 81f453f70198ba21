// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{audio::PlaybackState, error::Result};

/// The pipeline operations a deck needs. Everything else stays inside
/// GStreamer.
pub trait Backend {
    fn set_uri(&self, uri: &str);
    fn set_state(&self, state: PlaybackState) -> Result<()>;
    fn seek(&self, position: gst::ClockTime) -> Result<()>;

    fn query_duration(&self) -> Option<gst::ClockTime>;
    fn query_position(&self) -> Option<gst::ClockTime>;
}
