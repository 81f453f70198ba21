// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

// Every deck owns its own GStreamer pipeline, and the pipeline reports back
// through its bus. The UI must never assume what state a pipeline is in:
// it asks for a state and waits for the bus to confirm it.
//
// To keep all of this on the main context, each deck is driven by message
// passing:
//
// DeckPlayer: the object managing one deck
// ├── DeckState: the state tracker GObject used by the UI
// ├── GstBackend: the pipeline and its bus watch, behind the Backend trait
// ╰── senders: the deck panel, the hotkeys and the joystick
//
// The DeckPlayer owns an async_channel pair. The backend's bus watch and
// the input sources hold clones of the sender and post DeckActions; the
// DeckPlayer drains the receiver on the default main context, calls into
// the backend, and updates the DeckState.
//
// The widgets only read the DeckState and send DeckActions.

mod backend;
pub use backend::Backend;

mod gst_backend;
pub use gst_backend::{AudioSink, GstBackend, JackConnect};

pub mod media;
pub mod silence;

mod player;
mod state;

pub use player::{all_stopped, DeckAction, DeckPlayer, PlaybackState};
pub use state::DeckState;
