// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    cell::RefCell,
    fs::File,
    io::Read,
    os::fd::AsRawFd,
    path::Path,
    rc::Rc,
};

use async_channel::Sender;
use gtk::glib;
use log::{debug, error, warn};

use crate::{audio::DeckAction, config::NUM_DECKS};

pub const DEVICE: &str = "/dev/input/js0";

const JS_EVENT_BUTTON: u8 = 0x01;
const JS_EVENT_INIT: u8 = 0x80;

/// A `struct js_event` as read from the Linux joystick interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JsEvent {
    pub time: u32,
    pub value: i16,
    pub kind: u8,
    pub number: u8,
}

impl JsEvent {
    pub const SIZE: usize = 8;

    pub fn from_bytes(buf: &[u8; Self::SIZE]) -> Self {
        Self {
            time: u32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]),
            value: i16::from_ne_bytes([buf[4], buf[5]]),
            kind: buf[6],
            number: buf[7],
        }
    }

    pub fn is_button(&self) -> bool {
        (self.kind & !JS_EVENT_INIT) == JS_EVENT_BUTTON
    }
}

/// Button N drives deck N: pressing plays, releasing stops.
pub fn deck_action(event: &JsEvent) -> Option<(usize, DeckAction)> {
    if !event.is_button() {
        return None;
    }

    let deck = event.number as usize;
    if deck >= NUM_DECKS {
        return None;
    }

    if event.value != 0 {
        Some((deck, DeckAction::Play))
    } else {
        Some((deck, DeckAction::Stop))
    }
}

#[derive(Debug)]
pub struct Joystick {
    source: Rc<RefCell<Option<glib::SourceId>>>,
}

impl Joystick {
    pub fn open(decks: Vec<Sender<DeckAction>>) -> Option<Self> {
        Self::open_device(Path::new(DEVICE), decks)
    }

    pub fn open_device(device: &Path, decks: Vec<Sender<DeckAction>>) -> Option<Self> {
        let mut file = match File::open(device) {
            Ok(file) => file,
            Err(err) => {
                warn!("Couldn't open {}: {}", device.display(), err);
                return None;
            }
        };

        let source = Rc::new(RefCell::new(None));
        let source_ref = source.clone();
        let id = glib::unix_fd_add_local(
            file.as_raw_fd(),
            glib::IOCondition::IN | glib::IOCondition::PRI,
            move |_, _| {
                let mut buf = [0u8; JsEvent::SIZE];
                if let Err(err) = file.read_exact(&mut buf) {
                    warn!("Joystick read failed, closing: {}", err);
                    // Returning Break removes the source
                    source_ref.borrow_mut().take();
                    return glib::ControlFlow::Break;
                }

                let event = JsEvent::from_bytes(&buf);
                if event.is_button() {
                    debug!("joystick button {} = {}", event.number, event.value);
                }

                if let Some((deck, action)) = deck_action(&event) {
                    if let Err(e) = decks[deck].send_blocking(action) {
                        error!("Unable to send joystick action: {e}");
                    }
                }

                glib::ControlFlow::Continue
            },
        );
        source.replace(Some(id));

        Some(Self { source })
    }

    pub fn close(&self) {
        if let Some(id) = self.source.borrow_mut().take() {
            id.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JS_EVENT_AXIS: u8 = 0x02;

    fn event_bytes(value: i16, kind: u8, number: u8) -> [u8; JsEvent::SIZE] {
        let mut buf = [0u8; JsEvent::SIZE];
        buf[0..4].copy_from_slice(&1234u32.to_ne_bytes());
        buf[4..6].copy_from_slice(&value.to_ne_bytes());
        buf[6] = kind;
        buf[7] = number;
        buf
    }

    #[test]
    fn decodes_events() {
        let event = JsEvent::from_bytes(&event_bytes(-32767, JS_EVENT_AXIS, 1));
        assert_eq!(
            event,
            JsEvent {
                time: 1234,
                value: -32767,
                kind: JS_EVENT_AXIS,
                number: 1
            }
        );
        assert!(!event.is_button());
    }

    #[test]
    fn init_events_count_as_buttons() {
        let event = JsEvent::from_bytes(&event_bytes(0, JS_EVENT_BUTTON | JS_EVENT_INIT, 0));
        assert!(event.is_button());
    }

    #[test]
    fn press_plays_release_stops() {
        let press = JsEvent::from_bytes(&event_bytes(1, JS_EVENT_BUTTON, 2));
        assert!(matches!(deck_action(&press), Some((2, DeckAction::Play))));

        let release = JsEvent::from_bytes(&event_bytes(0, JS_EVENT_BUTTON, 3));
        assert!(matches!(deck_action(&release), Some((3, DeckAction::Stop))));
    }

    #[test]
    fn ignores_axes_and_extra_buttons() {
        let axis = JsEvent::from_bytes(&event_bytes(100, JS_EVENT_AXIS, 0));
        assert!(deck_action(&axis).is_none());

        let button = JsEvent::from_bytes(&event_bytes(1, JS_EVENT_BUTTON, 4));
        assert!(deck_action(&button).is_none());
    }

    #[test]
    fn missing_device() {
        let device = Path::new("/nonexistent/js0");
        assert!(Joystick::open_device(device, Vec::new()).is_none());
    }
}
