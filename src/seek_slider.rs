// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{cell::RefCell, rc::Rc};

use adw::subclass::prelude::*;
use glib::clone;
use gtk::{glib, prelude::*};

use crate::audio::{DeckAction, DeckPlayer};

mod imp {
    use super::*;

    #[derive(Debug)]
    pub struct SeekSlider {
        pub scale: gtk::Scale,
        pub value_changed_id: RefCell<Option<glib::SignalHandlerId>>,
    }

    impl Default for SeekSlider {
        fn default() -> Self {
            Self {
                scale: gtk::Scale::with_range(gtk::Orientation::Horizontal, 0.0, 100.0, 1.0),
                value_changed_id: RefCell::default(),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SeekSlider {
        const NAME: &'static str = "FourDeckSeekSlider";
        type Type = super::SeekSlider;
        type ParentType = gtk::Widget;

        fn class_init(klass: &mut Self::Class) {
            klass.set_layout_manager_type::<gtk::BinLayout>();
            klass.set_css_name("seekslider");
        }
    }

    impl ObjectImpl for SeekSlider {
        fn constructed(&self) {
            self.parent_constructed();

            self.scale.set_draw_value(false);
            self.scale.set_hexpand(true);
            self.scale.set_parent(&*self.obj());
        }

        fn dispose(&self) {
            self.scale.unparent();
        }
    }

    impl WidgetImpl for SeekSlider {}
}

glib::wrapper! {
    pub struct SeekSlider(ObjectSubclass<imp::SeekSlider>)
        @extends gtk::Widget;
}

impl Default for SeekSlider {
    fn default() -> Self {
        glib::Object::new()
    }
}

impl SeekSlider {
    pub fn new() -> Self {
        Self::default()
    }

    // Updates coming from the pipeline must not be turned back into seeks
    fn update_quietly(&self, f: impl FnOnce(&gtk::Scale)) {
        let imp = self.imp();
        let id = imp.value_changed_id.borrow();
        if let Some(id) = id.as_ref() {
            imp.scale.block_signal(id);
        }
        f(&imp.scale);
        if let Some(id) = id.as_ref() {
            imp.scale.unblock_signal(id);
        }
    }

    pub fn bind(&self, player: &Rc<DeckPlayer>) {
        let sender = player.sender();
        let id = self.imp().scale.connect_value_changed(move |scale| {
            if let Err(e) = sender.send_blocking(DeckAction::Seek(scale.value())) {
                log::error!("Unable to send seek: {e}");
            }
        });
        self.imp().value_changed_id.replace(Some(id));

        let state = player.state();
        state.connect_duration_notify(clone!(
            #[weak(rename_to = this)]
            self,
            move |state| {
                let duration = state.duration();
                if duration > 0.0 {
                    this.update_quietly(|scale| scale.set_range(0.0, duration));
                }
            }
        ));
        state.connect_position_notify(clone!(
            #[weak(rename_to = this)]
            self,
            move |state| {
                let position = state.position();
                this.update_quietly(|scale| scale.set_value(position));
            }
        ));
    }
}
