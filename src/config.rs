// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

// Build systems that install translations set these at build time; a plain
// `cargo build` gets the development defaults.

pub const APPLICATION_ID: &str = match option_env!("FOURDECKRADIO_APPLICATION_ID") {
    Some(id) => id,
    None => "org.example.FourDeckRadio.Devel",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const GETTEXT_PACKAGE: &str = match option_env!("FOURDECKRADIO_GETTEXT_PACKAGE") {
    Some(package) => package,
    None => "fourdeckradio",
};

pub const LOCALEDIR: &str = match option_env!("FOURDECKRADIO_LOCALEDIR") {
    Some(dir) => dir,
    None => "/usr/share/locale",
};

pub const PROFILE: &str = match option_env!("FOURDECKRADIO_PROFILE") {
    Some(profile) => profile,
    None => "development",
};

pub const NUM_DECKS: usize = 4;
