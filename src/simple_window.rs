// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{cell::OnceCell, path::Path, rc::Rc};

use adw::{prelude::*, subclass::prelude::*};
use glib::clone;
use gtk::{gio, glib};

use crate::{
    audio::{DeckAction, DeckPlayer, DeckState},
    folder_browser::FolderBrowser,
    i18n::i18n,
    seek_slider::SeekSlider,
    utils,
};

mod imp {
    use super::*;

    #[derive(Debug)]
    pub struct SimpleWindow {
        pub browser: FolderBrowser,
        pub seek_slider: SeekSlider,
        pub time_label: gtk::Label,
        pub player: OnceCell<Rc<DeckPlayer>>,
    }

    impl Default for SimpleWindow {
        fn default() -> Self {
            Self {
                browser: FolderBrowser::default(),
                seek_slider: SeekSlider::new(),
                time_label: gtk::Label::new(Some("00:00")),
                player: OnceCell::new(),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SimpleWindow {
        const NAME: &'static str = "FourDeckSimpleWindow";
        type Type = super::SimpleWindow;
        type ParentType = adw::ApplicationWindow;
    }

    impl ObjectImpl for SimpleWindow {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.set_title(Some(&i18n("Simple Player")));
            obj.set_default_size(480, 640);

            self.browser.set_vexpand(true);
            self.time_label.add_css_class("title-1");
            self.time_label.add_css_class("numeric");

            let content = gtk::Box::builder()
                .orientation(gtk::Orientation::Vertical)
                .spacing(12)
                .margin_top(12)
                .margin_bottom(12)
                .margin_start(12)
                .margin_end(12)
                .build();
            content.append(&self.browser);
            content.append(&self.time_label);
            content.append(&self.seek_slider);

            let toolbar_view = adw::ToolbarView::new();
            toolbar_view.add_top_bar(&adw::HeaderBar::new());
            toolbar_view.set_content(Some(&content));
            obj.set_content(Some(&toolbar_view));
        }
    }

    impl WidgetImpl for SimpleWindow {}

    impl WindowImpl for SimpleWindow {
        fn close_request(&self) -> glib::Propagation {
            if let Some(player) = self.player.get() {
                player.shutdown();
            }
            self.parent_close_request()
        }
    }

    impl ApplicationWindowImpl for SimpleWindow {}
    impl AdwApplicationWindowImpl for SimpleWindow {}
}

glib::wrapper! {
    pub struct SimpleWindow(ObjectSubclass<imp::SimpleWindow>)
        @extends gtk::Widget, gtk::Window, gtk::ApplicationWindow, adw::ApplicationWindow,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl SimpleWindow {
    pub fn new<P: IsA<gtk::Application>>(
        application: &P,
        folder: &Path,
        player: Rc<DeckPlayer>,
    ) -> Self {
        let win: Self = glib::Object::builder()
            .property("application", application)
            .build();

        let imp = win.imp();
        imp.browser.set_folder(&gio::File::for_path(folder));

        // Selecting a file plays it straight away
        let sender = player.sender();
        imp.browser.connect_file_selected(move |_, file| {
            if let Err(e) = sender.send_blocking(DeckAction::PlayFile(file.clone())) {
                log::error!("Unable to send file: {e}");
            }
        });

        imp.seek_slider.bind(&player);

        let state = player.state();
        state.connect_remaining_notify(clone!(
            #[weak]
            win,
            move |state| win.update_time_label(state)
        ));
        win.update_time_label(state);

        if imp.player.set(player).is_err() {
            log::warn!("Simple window already has a player");
        }

        win
    }

    fn update_time_label(&self, state: &DeckState) {
        let remaining = gst::ClockTime::from_mseconds((state.remaining() * 1000.0) as u64);
        self.imp()
            .time_label
            .set_label(&utils::format_remaining_time(remaining));
    }
}
