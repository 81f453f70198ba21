// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::Parser;

use crate::{
    audio::{AudioSink, JackConnect},
    utils::TimeColors,
};

#[derive(Clone, Debug, Parser)]
#[command(name = "fourdeckradio", version, about = "The player's player")]
pub struct Options {
    /// Fullscreen
    #[arg(short, long)]
    pub fullscreen: bool,

    /// Autoconnect to jackd
    #[arg(short, long)]
    pub autoconnect: bool,

    /// Background colour until 50% elapsed
    #[arg(short, long, value_name = "COLOR", default_value = "green")]
    pub green: String,

    /// Background colour until 75% elapsed
    #[arg(short, long, value_name = "COLOR", default_value = "yellow")]
    pub yellow: String,

    /// Background colour until 100% elapsed
    #[arg(short, long, value_name = "COLOR", default_value = "red")]
    pub red: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fullscreen: false,
            autoconnect: false,
            green: String::from("green"),
            yellow: String::from("yellow"),
            red: String::from("red"),
        }
    }
}

impl Options {
    pub fn time_colors(&self) -> TimeColors {
        TimeColors {
            green: self.green.clone(),
            yellow: self.yellow.clone(),
            red: self.red.clone(),
        }
    }

    pub fn audio_sink(&self) -> AudioSink {
        if self.autoconnect {
            AudioSink::Jack(JackConnect::Auto)
        } else {
            AudioSink::Jack(JackConnect::None)
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(name = "simpleplayer", version, about = "Single deck music player")]
pub struct SimpleOptions {
    /// Folder to browse
    #[arg(value_name = "DIR")]
    pub folder: PathBuf,
}
