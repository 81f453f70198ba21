// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use adw::{prelude::*, subclass::prelude::*};
use gtk::{gio, glib};
use log::debug;

use crate::{application::Application, deck_view::DeckView, i18n::i18n};

const GRID_SPACING: i32 = 30;
const COLUMNS: usize = 2;

mod imp {
    use super::*;

    #[derive(Debug)]
    pub struct Window {
        pub toolbar_view: adw::ToolbarView,
        pub grid: gtk::Grid,
    }

    impl Default for Window {
        fn default() -> Self {
            Self {
                toolbar_view: adw::ToolbarView::new(),
                grid: gtk::Grid::builder()
                    .row_spacing(GRID_SPACING)
                    .column_spacing(GRID_SPACING)
                    .row_homogeneous(true)
                    .column_homogeneous(true)
                    .margin_top(12)
                    .margin_bottom(12)
                    .margin_start(12)
                    .margin_end(12)
                    .build(),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for Window {
        const NAME: &'static str = "FourDeckWindow";
        type Type = super::Window;
        type ParentType = adw::ApplicationWindow;
    }

    impl ObjectImpl for Window {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.set_title(Some(&i18n("The player's player")));

            self.toolbar_view.add_top_bar(&adw::HeaderBar::new());
            self.toolbar_view.set_content(Some(&self.grid));
            obj.set_content(Some(&self.toolbar_view));
        }
    }

    impl WidgetImpl for Window {}

    impl WindowImpl for Window {
        // Closing the window goes through the same guard as app.quit
        fn close_request(&self) -> glib::Propagation {
            let app = self.obj().application().and_downcast::<Application>();
            match app {
                Some(app) if !app.quit_confirmed() => {
                    app.request_quit();
                    glib::Propagation::Stop
                }
                _ => self.parent_close_request(),
            }
        }
    }

    impl ApplicationWindowImpl for Window {}
    impl AdwApplicationWindowImpl for Window {}
}

glib::wrapper! {
    pub struct Window(ObjectSubclass<imp::Window>)
        @extends gtk::Widget, gtk::Window, gtk::ApplicationWindow, adw::ApplicationWindow,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl Window {
    pub fn new(application: &Application) -> Self {
        let win: Self = glib::Object::builder()
            .property("application", application)
            .build();

        for (i, deck) in application.decks().iter().enumerate() {
            let view = DeckView::new(deck);
            let (column, row) = (i % COLUMNS, i / COLUMNS);
            win.imp().grid.attach(&view, column as i32, row as i32, 1, 1);
        }

        if application.options().fullscreen {
            debug!("Going fullscreen");
            win.fullscreen();
        } else {
            win.maximize();
        }

        win
    }
}
