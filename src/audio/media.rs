// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use gtk::{gio, glib, prelude::*};
use log::{debug, warn};

use crate::error::Result;

/// Anything that is not a `file://` URI is treated as a network stream.
pub fn is_network_uri(uri: &str) -> bool {
    match glib::uri_parse_scheme(uri) {
        Some(scheme) => !scheme.eq_ignore_ascii_case("file"),
        None => false,
    }
}

pub fn display_name(uri: &str) -> String {
    match glib::filename_from_uri(uri) {
        Ok((path, _)) => glib::filename_display_basename(path).to_string(),
        Err(_) => uri.to_string(),
    }
}

pub fn is_playlist(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("m3u") || ext.eq_ignore_ascii_case("m3u8"))
        .unwrap_or(false)
}

/// Returns the URI of the first entry of an M3U playlist. Relative entries
/// are resolved against `base`, the folder holding the playlist.
pub fn playlist_entry(contents: &str, base: Option<&Path>) -> Option<String> {
    let entry = contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))?;

    if glib::uri_parse_scheme(entry).is_some() {
        return Some(entry.to_string());
    }

    let path = Path::new(entry);
    let path = match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    };

    glib::filename_to_uri(&path, None)
        .map(|uri| uri.to_string())
        .ok()
}

/// Turns a selected file into the URI a deck should play. Directories and
/// empty playlists yield `None`.
pub fn resolve_selection(file: &gio::File) -> Result<Option<String>> {
    let file_type = file.query_file_type(gio::FileQueryInfoFlags::NONE, gio::Cancellable::NONE);
    if file_type == gio::FileType::Directory {
        return Ok(None);
    }

    match file.path() {
        Some(path) if is_playlist(&path) => {
            debug!("Playlist selected: {}", path.display());
            let (contents, _) = file.load_contents(gio::Cancellable::NONE)?;
            let contents = String::from_utf8_lossy(&contents);
            let entry = playlist_entry(&contents, path.parent());
            if entry.is_none() {
                warn!("Playlist {} has no entries", path.display());
            }
            Ok(entry)
        }
        _ => Ok(Some(file.uri().to_string())),
    }
}
