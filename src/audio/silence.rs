// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use gtk::glib;
use log::{debug, warn};

use crate::error::Result;

// RIFF header for 48 kHz, stereo, 16 bit PCM with an empty data chunk
pub const SILENT_WAVE: [u8; 44] = [
    0x52, 0x49, 0x46, 0x46, 0x24, 0x00, 0x00, 0x00, 0x57, 0x41, 0x56, 0x45, 0x66, 0x6D, 0x74,
    0x20, 0x10, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, 0x80, 0xBB, 0x00, 0x00, 0x00, 0xEE,
    0x02, 0x00, 0x04, 0x00, 0x10, 0x00, 0x64, 0x61, 0x74, 0x61, 0x00, 0x00, 0x00, 0x00,
];

const FALLBACK_URI: &str = "file:///";

fn silence_path() -> PathBuf {
    glib::tmp_dir().join(format!("fourdeckradio-silence-{}.wav", std::process::id()))
}

fn write_silence(path: PathBuf) -> Result<String> {
    std::fs::write(&path, SILENT_WAVE)?;
    let uri = glib::filename_to_uri(&path, None)?;
    Ok(uri.to_string())
}

/// Loading this file into every deck makes the audio sinks register with
/// the sound server before anything is played.
pub fn silence_uri() -> String {
    match write_silence(silence_path()) {
        Ok(uri) => {
            debug!("Silence written to {}", uri);
            uri
        }
        Err(err) => {
            warn!("Unable to create the silence file: {}", err);
            FALLBACK_URI.to_string()
        }
    }
}
