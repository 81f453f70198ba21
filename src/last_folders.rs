// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

// The last folder of every deck is kept in a plain text file in the home
// directory, one URI per line, in deck order.

use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use gtk::{gio, glib, prelude::*};
use log::{debug, warn};

use crate::{audio::DeckPlayer, config::NUM_DECKS, error::Result};

const CONFIG_FILE: &str = ".4deckradio";
const NULL_MARKER: &str = "(null)";

pub fn config_path() -> PathBuf {
    glib::home_dir().join(CONFIG_FILE)
}

/// Always returns one entry per deck.
pub fn parse(contents: &str) -> Vec<Option<String>> {
    let mut lines = contents.lines();
    (0..NUM_DECKS)
        .map(|_| {
            lines
                .next()
                .map(str::trim)
                .filter(|line| !line.is_empty() && *line != NULL_MARKER)
                .map(str::to_string)
        })
        .collect()
}

/// The folders to persist, in deck order.
pub fn from_decks(decks: &[Rc<DeckPlayer>]) -> Vec<Option<String>> {
    decks.iter().map(|deck| deck.last_folder()).collect()
}

pub fn serialize(folders: &[Option<String>]) -> String {
    folders
        .iter()
        .take(NUM_DECKS)
        .map(|folder| format!("{}\n", folder.as_deref().unwrap_or_default()))
        .collect()
}

pub fn load_from(path: &Path) -> Vec<Option<String>> {
    let file = gio::File::for_path(path);
    match file.load_contents(gio::Cancellable::NONE) {
        Ok((contents, _)) => {
            let folders = parse(&String::from_utf8_lossy(&contents));
            for (i, folder) in folders.iter().enumerate() {
                debug!("Will use {:?} for deck {}", folder, i + 1);
            }
            folders
        }
        Err(err) => {
            debug!("Unable to read {}: {}", path.display(), err);
            vec![None; NUM_DECKS]
        }
    }
}

pub fn save_to(path: &Path, folders: &[Option<String>]) -> Result<()> {
    let file = gio::File::for_path(path);
    file.replace_contents(
        serialize(folders).as_bytes(),
        None,
        false,
        gio::FileCreateFlags::PRIVATE,
        gio::Cancellable::NONE,
    )?;
    Ok(())
}

pub fn load() -> Vec<Option<String>> {
    load_from(&config_path())
}

pub fn save(folders: &[Option<String>]) {
    let path = config_path();
    debug!("Saving deck folders to {}", path.display());
    if let Err(err) = save_to(&path, folders) {
        warn!("Unable to save {}: {}", path.display(), err);
    }
}
