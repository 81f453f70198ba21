// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    cell::{Cell, OnceCell, RefCell},
    rc::Rc,
};

use adw::{prelude::*, subclass::prelude::*};
use glib::clone;
use gtk::{gio, glib};
use log::{debug, error, warn};

use crate::{
    audio::{self, silence, DeckAction, DeckPlayer},
    cli::Options,
    config::{APPLICATION_ID, NUM_DECKS},
    i18n::i18n,
    input::{Joystick, DECK_HOTKEYS},
    last_folders,
    window::Window,
};

mod imp {
    use super::*;

    #[derive(Debug, Default)]
    pub struct Application {
        pub options: OnceCell<Options>,
        pub decks: RefCell<Vec<Rc<DeckPlayer>>>,
        pub joystick: RefCell<Option<Joystick>>,
        pub primed: Cell<bool>,
        pub quit_confirmed: Cell<bool>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for Application {
        const NAME: &'static str = "FourDeckApplication";
        type Type = super::Application;
        type ParentType = adw::Application;
    }

    impl ObjectImpl for Application {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.setup_gactions();

            obj.set_accels_for_action("app.quit", &["<primary>q"]);
            for (i, key) in DECK_HOTKEYS.iter().enumerate() {
                obj.set_accels_for_action(&format!("app.toggle-deck({i})"), &[*key]);
            }
        }
    }

    impl ApplicationImpl for Application {
        fn startup(&self) {
            self.parent_startup();

            gtk::Window::set_default_icon_name(APPLICATION_ID);

            let obj = self.obj();
            if let Err(err) = obj.setup_decks() {
                error!("Unable to set up the audio pipelines: {}", err);
                obj.quit();
                return;
            }
            obj.setup_joystick();
        }

        fn activate(&self) {
            debug!("Application::activate");

            if self.decks.borrow().is_empty() {
                return;
            }
            self.obj().present_main_window();
        }

        fn shutdown(&self) {
            debug!("Application::shutdown");

            let obj = self.obj();
            obj.save_folders();

            if let Some(joystick) = self.joystick.take() {
                joystick.close();
            }
            for deck in self.decks.borrow().iter() {
                deck.shutdown();
            }

            self.parent_shutdown();
        }
    }

    impl GtkApplicationImpl for Application {}
    impl AdwApplicationImpl for Application {}
}

glib::wrapper! {
    pub struct Application(ObjectSubclass<imp::Application>)
        @extends gio::Application, gtk::Application, adw::Application,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl Application {
    pub fn new(options: Options) -> Self {
        let app: Self = glib::Object::builder()
            .property("application-id", APPLICATION_ID)
            .build();

        if app.imp().options.set(options).is_err() {
            warn!("Application options were already set");
        }

        app
    }

    pub fn options(&self) -> Options {
        self.imp().options.get().cloned().unwrap_or_default()
    }

    pub fn decks(&self) -> Vec<Rc<DeckPlayer>> {
        self.imp().decks.borrow().clone()
    }

    pub fn quit_confirmed(&self) -> bool {
        self.imp().quit_confirmed.get()
    }

    fn setup_decks(&self) -> crate::error::Result<()> {
        let options = self.options();
        let folders = last_folders::load();

        let mut decks = Vec::with_capacity(NUM_DECKS);
        for (i, folder) in folders.into_iter().enumerate() {
            let deck = DeckPlayer::with_gst(i, options.audio_sink(), options.time_colors())?;
            deck.set_last_folder(folder);
            deck.clone().attach();
            decks.push(deck);
        }

        self.imp().decks.replace(decks);
        Ok(())
    }

    fn setup_joystick(&self) {
        let senders = self.imp().decks.borrow().iter().map(|d| d.sender()).collect();
        self.imp().joystick.replace(Joystick::open(senders));
    }

    fn save_folders(&self) {
        let folders = last_folders::from_decks(&self.imp().decks.borrow());

        if !folders.is_empty() {
            last_folders::save(&folders);
        }
    }

    fn present_main_window(&self) {
        let window = if let Some(window) = self.active_window() {
            window
        } else {
            let window = Window::new(self);
            window.upcast()
        };

        window.present();

        // Sinks only register with the sound server once something is loaded
        if !self.imp().primed.replace(true) {
            let uri = silence::silence_uri();
            for deck in self.imp().decks.borrow().iter() {
                deck.prime(&uri);
            }
        }
    }

    pub fn toggle_deck(&self, index: usize) {
        match self.imp().decks.borrow().get(index) {
            Some(deck) => deck.send(DeckAction::StartStop),
            None => warn!("No deck {}", index + 1),
        }
    }

    pub fn request_quit(&self) {
        let Some(window) = self.active_window() else {
            self.imp().quit_confirmed.set(true);
            self.quit();
            return;
        };

        if audio::all_stopped(self.imp().decks.borrow().iter()) {
            let dialog = adw::AlertDialog::new(Some(&i18n("Really quit?")), None);
            dialog.add_responses(&[("no", i18n("_No").as_str()), ("yes", i18n("_Yes").as_str())]);
            dialog.set_response_appearance("yes", adw::ResponseAppearance::Destructive);
            dialog.set_default_response(Some("no"));
            dialog.set_close_response("no");
            dialog.connect_response(
                None,
                clone!(
                    #[weak(rename_to = app)]
                    self,
                    move |_, response| {
                        if response == "yes" {
                            app.imp().quit_confirmed.set(true);
                            app.quit();
                        }
                    }
                ),
            );
            dialog.present(Some(&window));
        } else {
            let dialog = adw::AlertDialog::new(
                Some(&i18n("Won't quit while playing.")),
                Some(&i18n("Stop all players first.")),
            );
            dialog.add_response("ok", &i18n("_OK"));
            dialog.present(Some(&window));
        }
    }

    fn setup_gactions(&self) {
        self.add_action_entries([
            gio::ActionEntry::builder("quit")
                .activate(|app: &Application, _, _| {
                    app.request_quit();
                })
                .build(),
            gio::ActionEntry::builder("toggle-deck")
                .parameter_type(Some(glib::VariantTy::INT32))
                .activate(|app: &Application, _, param| {
                    match param.and_then(|p| p.get::<i32>()) {
                        Some(index) if index >= 0 => app.toggle_deck(index as usize),
                        _ => warn!("toggle-deck needs a deck index"),
                    }
                })
                .build(),
        ]);
    }
}
