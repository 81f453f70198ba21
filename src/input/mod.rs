// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

// Hotkeys are plain application actions, see Application::setup_gactions;
// the joystick needs its own file descriptor watch.

mod joystick;

pub use joystick::{deck_action, JsEvent, Joystick};

pub const DECK_HOTKEYS: [&str; crate::config::NUM_DECKS] = ["F9", "F10", "F11", "F12"];
