// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::{Cell, RefCell};

use gtk::{glib, prelude::*, subclass::prelude::*};

use crate::audio::PlaybackState;

mod imp {
    use std::marker::PhantomData;

    use super::*;

    #[derive(Debug, Default, glib::Properties)]
    #[properties(wrapper_type = super::DeckState)]
    pub struct DeckState {
        #[property(get, builder(PlaybackState::default()))]
        pub state: Cell<PlaybackState>,
        #[property(get = Self::is_playing)]
        pub playing: PhantomData<bool>,
        #[property(get)]
        pub tag_text: RefCell<String>,
        #[property(get)]
        pub time_text: RefCell<String>,
        #[property(get)]
        pub time_color: RefCell<Option<String>>,
        #[property(get, minimum = 0.0)]
        pub duration: Cell<f64>,
        #[property(get, minimum = 0.0)]
        pub position: Cell<f64>,
        #[property(get, minimum = 0.0)]
        pub remaining: Cell<f64>,
        #[property(get)]
        pub network_stream: Cell<bool>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for DeckState {
        const NAME: &'static str = "FourDeckState";
        type Type = super::DeckState;
    }

    impl ObjectImpl for DeckState {
        fn properties() -> &'static [glib::ParamSpec] {
            Self::derived_properties()
        }

        fn property(&self, id: usize, pspec: &glib::ParamSpec) -> glib::Value {
            self.derived_property(id, pspec)
        }
    }

    impl DeckState {
        fn is_playing(&self) -> bool {
            self.state.get() == PlaybackState::Playing
        }
    }
}

// DeckState is the GObject the deck widgets bind to; it mirrors what the
// pipeline last reported, plus the text of the deck labels.
glib::wrapper! {
    pub struct DeckState(ObjectSubclass<imp::DeckState>);
}

impl Default for DeckState {
    fn default() -> Self {
        glib::Object::new()
    }
}

impl DeckState {
    pub fn set_playback_state(&self, state: PlaybackState) -> bool {
        let old_state = self.imp().state.replace(state);
        if old_state != state {
            self.notify_state();
            if old_state == PlaybackState::Playing || state == PlaybackState::Playing {
                self.notify_playing();
            }
            return true;
        }

        false
    }

    pub fn set_tag_text(&self, text: &str) {
        if *self.imp().tag_text.borrow() != text {
            self.imp().tag_text.replace(text.to_string());
            self.notify_tag_text();
        }
    }

    // Text and colour change together, so listeners only have to watch
    // the text to redraw the label.
    pub fn set_time(&self, text: &str, color: Option<&str>) {
        self.imp().time_color.replace(color.map(str::to_string));
        self.imp().time_text.replace(text.to_string());
        self.notify_time_color();
        self.notify_time_text();
    }

    pub fn set_duration(&self, duration: f64) {
        let old = self.imp().duration.replace(duration);
        if old != duration {
            self.notify_duration();
        }
    }

    pub fn set_position(&self, position: f64) {
        self.imp().position.replace(position);
        self.notify_position();
    }

    pub fn set_remaining(&self, remaining: f64) {
        self.imp().remaining.replace(remaining);
        self.notify_remaining();
    }

    pub fn set_network_stream(&self, network_stream: bool) {
        let old = self.imp().network_stream.replace(network_stream);
        if old != network_stream {
            self.notify_network_stream();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn starts_in_null() {
        let state = DeckState::default();
        assert_eq!(state.state(), PlaybackState::Null);
        assert!(!state.playing());
    }

    #[test]
    fn notifies_only_on_changes() {
        let state = DeckState::default();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        state.connect_state_notify(move |_| c.set(c.get() + 1));

        assert!(state.set_playback_state(PlaybackState::Ready));
        assert!(!state.set_playback_state(PlaybackState::Ready));
        assert!(state.set_playback_state(PlaybackState::Playing));
        assert_eq!(count.get(), 2);
        assert!(state.playing());
    }

    #[test]
    fn playing_follows_state() {
        let state = DeckState::default();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        state.connect_playing_notify(move |_| c.set(c.get() + 1));

        state.set_playback_state(PlaybackState::Paused);
        assert_eq!(count.get(), 0);
        state.set_playback_state(PlaybackState::Playing);
        state.set_playback_state(PlaybackState::Ready);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn time_label_text_and_color() {
        let state = DeckState::default();
        state.set_time("0:00:01", Some("red"));
        assert_eq!(state.time_text(), "0:00:01");
        assert_eq!(state.time_color().as_deref(), Some("red"));

        state.set_time("Stopped", None);
        assert_eq!(state.time_color(), None);
    }
}
