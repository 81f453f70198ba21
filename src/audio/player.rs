// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use async_channel::{Receiver, Sender};
use glib::clone;
use gtk::{gio, glib, prelude::*};
use log::{debug, error, warn};

use crate::{
    audio::{media, Backend, AudioSink, DeckState, GstBackend},
    error::Result,
    i18n::{i18n, i18n_k},
    utils::{self, TimeColor, TimeColors},
};

#[derive(Clone, Debug)]
pub enum DeckAction {
    // Requests from the deck panel and the input devices
    TogglePlayPause,
    Play,
    Stop,
    StartStop,
    Select(gio::File),
    PlayFile(gio::File),
    Seek(f64),
    Refresh,

    // Messages posted on the pipeline bus
    StateChanged(PlaybackState, PlaybackState),
    EndOfStream,
    Error(String),
    Tags {
        title: Option<String>,
        artist: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, glib::Enum, PartialEq, Eq, PartialOrd, Ord, Default)]
#[enum_type(name = "FourDeckPlaybackState")]
pub enum PlaybackState {
    #[default]
    Null,
    Ready,
    Paused,
    Playing,
}

impl From<gst::State> for PlaybackState {
    fn from(state: gst::State) -> Self {
        match state {
            gst::State::Ready => Self::Ready,
            gst::State::Paused => Self::Paused,
            gst::State::Playing => Self::Playing,
            _ => Self::Null,
        }
    }
}

impl From<PlaybackState> for gst::State {
    fn from(state: PlaybackState) -> Self {
        match state {
            PlaybackState::Null => gst::State::Null,
            PlaybackState::Ready => gst::State::Ready,
            PlaybackState::Paused => gst::State::Paused,
            PlaybackState::Playing => gst::State::Playing,
        }
    }
}

const UNKNOWN_TAG: &str = "Unknown";

/// Every deck has to be stopped before the application may quit.
pub fn all_stopped<'a>(decks: impl IntoIterator<Item = &'a Rc<DeckPlayer>>) -> bool {
    decks
        .into_iter()
        .all(|deck| deck.state().state() == PlaybackState::Ready)
}

fn clock_seconds(t: gst::ClockTime) -> f64 {
    t.nseconds() as f64 / gst::ClockTime::SECOND.nseconds() as f64
}

pub struct DeckPlayer {
    index: usize,
    sender: Sender<DeckAction>,
    receiver: RefCell<Option<Receiver<DeckAction>>>,
    backend: Box<dyn Backend>,
    state: DeckState,
    colors: TimeColors,
    duration: Cell<Option<gst::ClockTime>>,
    next_uri: RefCell<Option<String>>,
    last_folder: RefCell<Option<String>>,
}

impl fmt::Debug for DeckPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckPlayer")
            .field("index", &self.index)
            .field("state", &self.state.state())
            .finish()
    }
}

impl DeckPlayer {
    pub fn new(
        index: usize,
        backend: Box<dyn Backend>,
        channel: (Sender<DeckAction>, Receiver<DeckAction>),
        colors: TimeColors,
    ) -> Rc<Self> {
        let (sender, receiver) = channel;
        let state = DeckState::default();
        state.set_tag_text(&i18n("Selected filename"));
        state.set_time(&i18n("Time remaining"), None);

        Rc::new(Self {
            index,
            sender,
            receiver: RefCell::new(Some(receiver)),
            backend,
            state,
            colors,
            duration: Cell::new(None),
            next_uri: RefCell::new(None),
            last_folder: RefCell::new(None),
        })
    }

    pub fn with_gst(index: usize, sink: AudioSink, colors: TimeColors) -> Result<Rc<Self>> {
        let (sender, receiver) = async_channel::unbounded();
        let backend = GstBackend::new(index, sink, sender.clone())?;

        Ok(Self::new(index, Box::new(backend), (sender, receiver), colors))
    }

    /// Starts draining the action channel on the default main context and
    /// queues a refresh of the labels once per second.
    pub fn attach(self: Rc<Self>) {
        let receiver = match self.receiver.borrow_mut().take() {
            Some(receiver) => receiver,
            None => {
                warn!("Deck {} is already attached", self.index + 1);
                return;
            }
        };

        let weak = Rc::downgrade(&self);
        glib::timeout_add_seconds_local(1, move || match weak.upgrade() {
            Some(this) => {
                this.send(DeckAction::Refresh);
                glib::ControlFlow::Continue
            }
            None => glib::ControlFlow::Break,
        });

        glib::MainContext::default().spawn_local(clone!(
            #[strong(rename_to = this)]
            self,
            async move {
                use futures::prelude::*;

                let mut receiver = std::pin::pin!(receiver);
                while let Some(action) = receiver.next().await {
                    this.process_action(action);
                }
            }
        ));
    }

    pub(crate) fn process_action(&self, action: DeckAction) -> glib::ControlFlow {
        match action {
            DeckAction::TogglePlayPause => self.toggle_play_pause(),
            DeckAction::Play => self.play(),
            DeckAction::Stop => self.stop(),
            DeckAction::StartStop => self.start_stop(),
            DeckAction::Select(file) => self.select_file(&file),
            DeckAction::PlayFile(file) => self.play_file(&file),
            DeckAction::Seek(position) => self.seek_to(position),
            DeckAction::Refresh => self.refresh(),
            DeckAction::StateChanged(old, new) => self.state_changed(old, new),
            DeckAction::EndOfStream => self.end_of_stream(),
            DeckAction::Error(message) => self.error(&message),
            DeckAction::Tags { title, artist } => self.update_tags(title, artist),
        }

        glib::ControlFlow::Continue
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn sender(&self) -> Sender<DeckAction> {
        self.sender.clone()
    }

    pub fn send(&self, action: DeckAction) {
        if let Err(e) = self.sender.send_blocking(action) {
            error!("Unable to send action to deck {}: {e}", self.index + 1);
        }
    }

    pub fn state(&self) -> &DeckState {
        &self.state
    }

    pub fn duration(&self) -> Option<gst::ClockTime> {
        self.duration.get()
    }

    pub fn next_uri(&self) -> Option<String> {
        self.next_uri.borrow().clone()
    }

    pub fn last_folder(&self) -> Option<String> {
        self.last_folder.borrow().clone()
    }

    pub fn set_last_folder(&self, folder: Option<String>) {
        self.last_folder.replace(folder);
    }

    fn set_playback_state(&self, state: PlaybackState) {
        debug!("Deck {}: requesting {:?}", self.index + 1, state);
        if let Err(err) = self.backend.set_state(state) {
            warn!("Deck {}: {}", self.index + 1, err);
        }
    }

    fn load_uri(&self, uri: &str) {
        debug!("Deck {}: loading {}", self.index + 1, uri);
        self.backend.set_uri(uri);
        self.duration.set(None);
        self.state.set_network_stream(media::is_network_uri(uri));
    }

    pub fn toggle_play_pause(&self) {
        if self.state.playing() {
            self.set_playback_state(PlaybackState::Paused);
        } else {
            self.set_playback_state(PlaybackState::Playing);
        }
    }

    pub fn play(&self) {
        self.set_playback_state(PlaybackState::Playing);
    }

    pub fn stop(&self) {
        if self.state.playing() {
            self.end_of_stream();
        } else {
            self.state.set_time(&i18n("Stopped"), None);
            self.set_playback_state(PlaybackState::Ready);
        }
    }

    pub fn start_stop(&self) {
        if self.state.playing() {
            self.stop();
        } else {
            self.play();
        }
    }

    /// Loads a pipeline without touching the labels; used for the silence
    /// every deck starts with.
    pub fn prime(&self, uri: &str) {
        self.load_uri(uri);
        self.set_playback_state(PlaybackState::Paused);
    }

    pub fn shutdown(&self) {
        self.set_playback_state(PlaybackState::Null);
    }

    fn end_of_stream(&self) {
        debug!("Deck {}: end of stream", self.index + 1);

        if let Some(uri) = self.next_uri.take() {
            self.set_playback_state(PlaybackState::Ready);
            self.state.set_tag_text(&media::display_name(&uri));
            self.load_uri(&uri);
            self.set_playback_state(PlaybackState::Paused);
            return;
        }

        if self.state.network_stream() {
            self.set_playback_state(PlaybackState::Ready);
        } else {
            if let Err(err) = self.backend.seek(gst::ClockTime::ZERO) {
                warn!("Deck {}: unable to rewind: {}", self.index + 1, err);
            }
            self.set_playback_state(PlaybackState::Paused);
        }
    }

    fn resolve(&self, file: &gio::File) -> Option<String> {
        if let Some(parent) = file.parent() {
            self.set_last_folder(Some(parent.uri().to_string()));
        }

        match media::resolve_selection(file) {
            Ok(uri) => uri,
            Err(err) => {
                warn!("Unable to read {}: {}", file.uri(), err);
                None
            }
        }
    }

    pub fn select_file(&self, file: &gio::File) {
        let Some(uri) = self.resolve(file) else {
            return;
        };

        if self.state.playing() {
            // Loaded when the current stream ends or the deck is stopped
            debug!("Deck {}: next file URI: {}", self.index + 1, uri);
            self.next_uri.replace(Some(uri));
            return;
        }

        self.set_playback_state(PlaybackState::Ready);
        self.state.set_tag_text(&media::display_name(&uri));
        self.load_uri(&uri);
        self.set_playback_state(PlaybackState::Paused);
    }

    pub fn play_file(&self, file: &gio::File) {
        let Some(uri) = self.resolve(file) else {
            return;
        };

        self.set_playback_state(PlaybackState::Ready);
        self.state.set_tag_text(&media::display_name(&uri));
        self.load_uri(&uri);
        self.set_playback_state(PlaybackState::Playing);
    }

    pub fn seek_to(&self, seconds: f64) {
        let position = gst::ClockTime::from_nseconds((seconds.max(0.0) * 1_000_000_000.0) as u64);
        self.state.set_time(&utils::format_hms(Some(position)), None);

        if let Err(err) = self.backend.seek(position) {
            warn!("Deck {}: seek failed: {}", self.index + 1, err);
        }
    }

    pub fn refresh(&self) {
        let playback_state = self.state.state();
        if playback_state < PlaybackState::Paused {
            return;
        }

        let network_stream = self.state.network_stream();

        if self.duration.get().is_none() {
            match self.backend.query_duration() {
                Some(duration) => {
                    self.duration.set(Some(duration));
                    if !network_stream {
                        self.state.set_duration(clock_seconds(duration));
                    }
                }
                None => debug!("Deck {}: could not query duration", self.index + 1),
            }
        }

        let Some(position) = self.backend.query_position() else {
            return;
        };

        if !network_stream {
            self.state.set_position(clock_seconds(position));
        }

        let duration = self.duration.get();
        let remaining = duration.map(|d| d.saturating_sub(position));
        if let Some(remaining) = remaining {
            self.state.set_remaining(clock_seconds(remaining));
        }

        let text = utils::format_time_text(position, duration);
        let color = match (playback_state, duration, remaining) {
            (PlaybackState::Playing, Some(duration), Some(remaining)) => {
                Some(self.colors.color(TimeColor::for_remaining(remaining, duration)))
            }
            _ => None,
        };

        self.state.set_time(&text, color);
    }

    fn state_changed(&self, old: PlaybackState, new: PlaybackState) {
        debug!("Deck {}: state set to {:?}", self.index + 1, new);
        self.state.set_playback_state(new);

        if old == PlaybackState::Ready && new == PlaybackState::Paused {
            self.refresh();
        }
    }

    fn error(&self, message: &str) {
        error!("Deck {}: {}", self.index + 1, message);
        self.state.set_time(message, None);
        self.set_playback_state(PlaybackState::Ready);
    }

    fn update_tags(&self, title: Option<String>, artist: Option<String>) {
        let title = title.unwrap_or_else(|| UNKNOWN_TAG.to_string());
        let artist = artist.unwrap_or_else(|| UNKNOWN_TAG.to_string());
        debug!("Deck {}: title: {} artist: {}", self.index + 1, title, artist);

        if title == UNKNOWN_TAG && artist == UNKNOWN_TAG {
            return;
        }

        self.state.set_tag_text(&i18n_k(
            "{title} - {artist}",
            &[("title", &title), ("artist", &artist)],
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::last_folders;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Uri(String),
        State(PlaybackState),
        Seek(gst::ClockTime),
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: RefCell<Vec<Call>>,
        duration: Cell<Option<gst::ClockTime>>,
        position: Cell<Option<gst::ClockTime>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<Call> {
            self.calls.take()
        }
    }

    struct RecordingBackend(Rc<Recorder>);

    impl Backend for RecordingBackend {
        fn set_uri(&self, uri: &str) {
            self.0.calls.borrow_mut().push(Call::Uri(uri.to_string()));
        }

        fn set_state(&self, state: PlaybackState) -> Result<()> {
            self.0.calls.borrow_mut().push(Call::State(state));
            Ok(())
        }

        fn seek(&self, position: gst::ClockTime) -> Result<()> {
            self.0.calls.borrow_mut().push(Call::Seek(position));
            Ok(())
        }

        fn query_duration(&self) -> Option<gst::ClockTime> {
            self.0.duration.get()
        }

        fn query_position(&self) -> Option<gst::ClockTime> {
            self.0.position.get()
        }
    }

    fn deck() -> (Rc<DeckPlayer>, Rc<Recorder>) {
        let recorder = Rc::new(Recorder::default());
        let player = DeckPlayer::new(
            0,
            Box::new(RecordingBackend(recorder.clone())),
            async_channel::unbounded(),
            TimeColors::default(),
        );
        (player, recorder)
    }

    // Plays back what the bus would post after a state request
    fn bus_reports(player: &DeckPlayer, old: PlaybackState, new: PlaybackState) {
        player.process_action(DeckAction::StateChanged(old, new));
    }

    fn playing_deck(uri: &str) -> (Rc<DeckPlayer>, Rc<Recorder>) {
        let (player, recorder) = deck();
        player.load_uri(uri);
        bus_reports(&player, PlaybackState::Null, PlaybackState::Ready);
        bus_reports(&player, PlaybackState::Ready, PlaybackState::Paused);
        bus_reports(&player, PlaybackState::Paused, PlaybackState::Playing);
        recorder.take();
        (player, recorder)
    }

    #[test]
    fn eos_with_next_file_pauses_on_it() {
        let (player, recorder) = playing_deck("file:///music/first.ogg");
        player.next_uri.replace(Some("file:///music/second.ogg".into()));

        player.process_action(DeckAction::EndOfStream);

        assert_eq!(
            recorder.take(),
            vec![
                Call::State(PlaybackState::Ready),
                Call::Uri("file:///music/second.ogg".into()),
                Call::State(PlaybackState::Paused),
            ]
        );
        assert_eq!(player.next_uri(), None);
        assert_eq!(player.state().tag_text(), "second.ogg");

        bus_reports(&player, PlaybackState::Playing, PlaybackState::Ready);
        bus_reports(&player, PlaybackState::Ready, PlaybackState::Paused);
        assert_eq!(player.state().state(), PlaybackState::Paused);
    }

    #[test]
    fn eos_on_local_file_rewinds_and_pauses() {
        let (player, recorder) = playing_deck("file:///music/first.ogg");

        player.process_action(DeckAction::EndOfStream);

        assert_eq!(
            recorder.take(),
            vec![
                Call::Seek(gst::ClockTime::ZERO),
                Call::State(PlaybackState::Paused)
            ]
        );
    }

    #[test]
    fn eos_on_network_stream_stops() {
        let (player, recorder) = playing_deck("http://radio.example.org/live");
        assert!(player.state().network_stream());

        player.process_action(DeckAction::EndOfStream);

        assert_eq!(recorder.take(), vec![Call::State(PlaybackState::Ready)]);
        bus_reports(&player, PlaybackState::Playing, PlaybackState::Ready);
        assert_eq!(player.state().state(), PlaybackState::Ready);
    }

    #[test]
    fn next_file_recomputes_network_flag() {
        let (player, _recorder) = playing_deck("http://radio.example.org/live");
        player.next_uri.replace(Some("file:///music/jingle.ogg".into()));

        player.process_action(DeckAction::EndOfStream);

        assert!(!player.state().network_stream());
        assert_eq!(player.duration(), None);
    }

    #[test]
    fn stop_while_playing_is_a_soft_stop() {
        let (player, recorder) = playing_deck("file:///music/first.ogg");

        player.process_action(DeckAction::Stop);

        assert_eq!(
            recorder.take(),
            vec![
                Call::Seek(gst::ClockTime::ZERO),
                Call::State(PlaybackState::Paused)
            ]
        );
    }

    #[test]
    fn stop_while_paused_is_a_real_stop() {
        let (player, recorder) = deck();
        bus_reports(&player, PlaybackState::Ready, PlaybackState::Paused);
        recorder.take();

        player.process_action(DeckAction::Stop);

        assert_eq!(recorder.take(), vec![Call::State(PlaybackState::Ready)]);
        assert_eq!(player.state().time_text(), "Stopped");
        assert_eq!(player.state().time_color(), None);
    }

    #[test]
    fn toggle_play_pause() {
        let (player, recorder) = deck();
        player.process_action(DeckAction::TogglePlayPause);
        assert_eq!(recorder.take(), vec![Call::State(PlaybackState::Playing)]);

        bus_reports(&player, PlaybackState::Paused, PlaybackState::Playing);
        player.process_action(DeckAction::TogglePlayPause);
        assert_eq!(recorder.take(), vec![Call::State(PlaybackState::Paused)]);
    }

    #[test]
    fn start_stop_plays_or_stops() {
        let (player, recorder) = deck();
        player.process_action(DeckAction::StartStop);
        assert_eq!(recorder.take(), vec![Call::State(PlaybackState::Playing)]);

        let (player, recorder) = playing_deck("file:///music/first.ogg");
        player.process_action(DeckAction::StartStop);
        assert_eq!(
            recorder.take(),
            vec![
                Call::Seek(gst::ClockTime::ZERO),
                Call::State(PlaybackState::Paused)
            ]
        );
    }

    #[test]
    fn selecting_while_playing_queues_the_file() {
        let (player, recorder) = playing_deck("file:///music/first.ogg");
        let file = gio::File::for_uri("file:///music/second.ogg");

        player.process_action(DeckAction::Select(file));

        assert!(recorder.take().is_empty());
        assert_eq!(player.next_uri().as_deref(), Some("file:///music/second.ogg"));
        assert_eq!(player.last_folder().as_deref(), Some("file:///music"));
    }

    #[test]
    fn selecting_while_stopped_loads_and_pauses() {
        let (player, recorder) = deck();
        let file = gio::File::for_uri("file:///music/second.ogg");

        player.process_action(DeckAction::Select(file));

        assert_eq!(
            recorder.take(),
            vec![
                Call::State(PlaybackState::Ready),
                Call::Uri("file:///music/second.ogg".into()),
                Call::State(PlaybackState::Paused),
            ]
        );
        assert_eq!(player.state().tag_text(), "second.ogg");
        assert_eq!(player.next_uri(), None);
    }

    #[test]
    fn selecting_a_playlist_loads_its_first_entry() {
        let dir = gtk::glib::tmp_dir().join(format!("fourdeckradio-m3u-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let playlist = dir.join("set.m3u");
        std::fs::write(&playlist, "#EXTM3U\nhttp://radio.example.org/live\n").unwrap();

        let (player, recorder) = deck();
        player.select_file(&gio::File::for_path(&playlist));

        assert_eq!(
            recorder.take(),
            vec![
                Call::State(PlaybackState::Ready),
                Call::Uri("http://radio.example.org/live".into()),
                Call::State(PlaybackState::Paused),
            ]
        );
        assert!(player.state().network_stream());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn play_file_starts_playback() {
        let (player, recorder) = deck();
        player.process_action(DeckAction::PlayFile(gio::File::for_uri("file:///music/a.ogg")));

        assert_eq!(
            recorder.take(),
            vec![
                Call::State(PlaybackState::Ready),
                Call::Uri("file:///music/a.ogg".into()),
                Call::State(PlaybackState::Playing),
            ]
        );
    }

    #[test]
    fn error_forces_ready_and_shows_the_message() {
        let (player, recorder) = playing_deck("file:///music/first.ogg");

        player.process_action(DeckAction::Error("Resource not found.".into()));

        assert_eq!(recorder.take(), vec![Call::State(PlaybackState::Ready)]);
        assert_eq!(player.state().time_text(), "Resource not found.");
    }

    #[test]
    fn tags_update_the_label() {
        let (player, _recorder) = deck();
        player.process_action(DeckAction::Tags {
            title: Some("Intro".into()),
            artist: None,
        });
        assert_eq!(player.state().tag_text(), "Intro - Unknown");

        player.process_action(DeckAction::Tags {
            title: None,
            artist: None,
        });
        assert_eq!(player.state().tag_text(), "Intro - Unknown");
    }

    #[test]
    fn refresh_is_skipped_below_paused() {
        let (player, recorder) = deck();
        recorder.duration.set(Some(gst::ClockTime::from_seconds(100)));
        recorder.position.set(Some(gst::ClockTime::from_seconds(10)));

        player.refresh();

        assert_eq!(player.duration(), None);
        assert_eq!(player.state().time_text(), "Time remaining");
    }

    #[test]
    fn refresh_while_playing_colors_the_time() {
        let (player, recorder) = playing_deck("file:///music/first.ogg");
        recorder.duration.set(Some(gst::ClockTime::from_seconds(100)));
        recorder.position.set(Some(gst::ClockTime::from_seconds(80)));

        player.process_action(DeckAction::Refresh);

        assert_eq!(player.duration(), Some(gst::ClockTime::from_seconds(100)));
        assert_eq!(player.state().duration(), 100.0);
        assert_eq!(player.state().position(), 80.0);
        assert_eq!(player.state().remaining(), 20.0);
        assert_eq!(player.state().time_text(), "0:01:20 / -0:00:20 / 0:01:40");
        assert_eq!(player.state().time_color().as_deref(), Some("red"));
    }

    #[test]
    fn refresh_while_paused_has_no_color() {
        let (player, recorder) = deck();
        bus_reports(&player, PlaybackState::Null, PlaybackState::Paused);
        recorder.duration.set(Some(gst::ClockTime::from_seconds(100)));
        recorder.position.set(Some(gst::ClockTime::from_seconds(10)));

        player.refresh();

        assert_eq!(player.state().time_color(), None);
        assert_eq!(player.state().time_text(), "0:00:10 / -0:01:30 / 0:01:40");
    }

    #[test]
    fn refresh_past_the_end_agrees_on_zero() {
        let (player, recorder) = playing_deck("file:///music/first.ogg");
        recorder.duration.set(Some(gst::ClockTime::from_seconds(100)));
        recorder.position.set(Some(gst::ClockTime::from_seconds(101)));

        player.refresh();

        assert_eq!(player.state().remaining(), 0.0);
        assert_eq!(player.state().time_text(), "0:01:41 / -0:00:00 / 0:01:40");
        assert_eq!(player.state().time_color().as_deref(), Some("red"));
    }

    #[test]
    fn refresh_leaves_slider_alone_for_streams() {
        let (player, recorder) = playing_deck("http://radio.example.org/live");
        recorder.duration.set(Some(gst::ClockTime::from_seconds(100)));
        recorder.position.set(Some(gst::ClockTime::from_seconds(10)));

        player.refresh();

        assert_eq!(player.state().duration(), 0.0);
        assert_eq!(player.state().position(), 0.0);
        assert_eq!(player.state().time_text(), "0:00:10 / -0:01:30 / 0:01:40");
    }

    #[test]
    fn ready_to_paused_refreshes_immediately() {
        let (player, recorder) = deck();
        recorder.duration.set(Some(gst::ClockTime::from_seconds(60)));
        recorder.position.set(Some(gst::ClockTime::ZERO));

        bus_reports(&player, PlaybackState::Ready, PlaybackState::Paused);

        assert_eq!(player.state().time_text(), "0:00:00 / -0:01:00 / 0:01:00");
    }

    #[test]
    fn seek_shows_the_target_time() {
        let (player, recorder) = deck();
        player.process_action(DeckAction::Seek(61.0));

        assert_eq!(
            recorder.take(),
            vec![Call::Seek(gst::ClockTime::from_seconds(61))]
        );
        assert_eq!(player.state().time_text(), "0:01:01");
    }

    #[test]
    fn quit_guard_requires_every_deck_ready() {
        let decks: Vec<_> = (0..4).map(|_| deck().0).collect();
        for deck in &decks {
            bus_reports(deck, PlaybackState::Null, PlaybackState::Ready);
        }
        assert!(all_stopped(&decks));

        bus_reports(&decks[2], PlaybackState::Ready, PlaybackState::Paused);
        assert!(!all_stopped(&decks));
    }

    #[test]
    fn deck_folders_are_saved_in_deck_order() {
        let decks: Vec<_> = (0..4).map(|_| deck().0).collect();
        decks[0].select_file(&gio::File::for_uri("file:///music/intro/a.ogg"));
        decks[3].set_last_folder(Some("file:///music/ads".into()));

        let folders = last_folders::from_decks(&decks);
        assert_eq!(
            folders,
            vec![
                Some("file:///music/intro".to_string()),
                None,
                None,
                Some("file:///music/ads".to_string()),
            ]
        );

        let path = gtk::glib::tmp_dir().join(format!("fourdeckradio-decks-{}", std::process::id()));
        last_folders::save_to(&path, &folders).unwrap();
        assert_eq!(last_folders::load_from(&path), folders);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn gst_state_conversion() {
        assert_eq!(PlaybackState::from(gst::State::VoidPending), PlaybackState::Null);
        assert_eq!(PlaybackState::from(gst::State::Playing), PlaybackState::Playing);
        assert_eq!(gst::State::from(PlaybackState::Ready), gst::State::Ready);
        assert!(PlaybackState::Ready < PlaybackState::Paused);
    }
}
