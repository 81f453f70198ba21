// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod application;
pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod folder_browser;
pub mod i18n;
pub mod input;
pub mod last_folders;
pub mod seek_slider;
pub mod simple_window;
pub mod utils;
pub mod window;

mod deck_view;

use std::env;

use config::{APPLICATION_ID, GETTEXT_PACKAGE, LOCALEDIR};
use gettextrs::{bind_textdomain_codeset, bindtextdomain, setlocale, textdomain, LocaleCategory};
use log::{debug, warn, LevelFilter};

/// Logging, translations and GStreamer, shared by both players.
pub fn init() -> error::Result<()> {
    let level = if utils::is_development_profile() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter(Some("fourdeckradio"), level);
    builder.filter(Some("simpleplayer"), level);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if let Err(err) = builder.try_init() {
        eprintln!("Logger already initialized: {err}");
    }

    debug!("Setting up locale data");
    setlocale(LocaleCategory::LcAll, "");
    if let Err(err) = bindtextdomain(GETTEXT_PACKAGE, LOCALEDIR) {
        warn!("Unable to bind the text domain: {}", err);
    }
    if let Err(err) = bind_textdomain_codeset(GETTEXT_PACKAGE, "UTF-8") {
        warn!("Unable to set the text domain encoding: {}", err);
    }
    if let Err(err) = textdomain(GETTEXT_PACKAGE) {
        warn!("Unable to switch to the text domain: {}", err);
    }

    debug!("Setting up pulseaudio environment");
    let app_id = APPLICATION_ID.trim_end_matches(".Devel");
    env::set_var("PULSE_PROP_application.icon_name", app_id);
    env::set_var("PULSE_PROP_media.role", "music");

    gst::init()?;

    Ok(())
}
