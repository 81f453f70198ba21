// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::rc::Rc;

use adw::subclass::prelude::*;
use glib::clone;
use gtk::{gio, glib, prelude::*, CompositeTemplate};

use crate::{
    audio::{DeckAction, DeckPlayer, DeckState, PlaybackState},
    folder_browser::FolderBrowser,
    i18n::{i18n, i18n_k},
    seek_slider::SeekSlider,
    utils,
};

mod imp {
    use super::*;

    #[derive(Debug, Default, CompositeTemplate)]
    #[template(string = r#"
<interface>
  <template class="FourDeckView" parent="GtkWidget">
    <child>
      <object class="GtkGrid" id="grid">
        <property name="row-spacing">6</property>
        <property name="column-spacing">12</property>
        <child>
          <object class="GtkLabel" id="title_label">
            <property name="xalign">0</property>
            <style>
              <class name="title-3"/>
            </style>
            <layout>
              <property name="column">0</property>
              <property name="row">0</property>
              <property name="column-span">2</property>
            </layout>
          </object>
        </child>
        <child>
          <object class="FourDeckFolderBrowser" id="browser">
            <property name="hexpand">true</property>
            <property name="vexpand">true</property>
            <layout>
              <property name="column">0</property>
              <property name="row">1</property>
              <property name="row-span">3</property>
            </layout>
          </object>
        </child>
        <child>
          <object class="GtkButton" id="play_button">
            <property name="icon-name">media-playback-start-symbolic</property>
            <style>
              <class name="circular"/>
              <class name="suggested-action"/>
            </style>
            <layout>
              <property name="column">1</property>
              <property name="row">1</property>
            </layout>
          </object>
        </child>
        <child>
          <object class="GtkButton" id="stop_button">
            <property name="icon-name">media-playback-stop-symbolic</property>
            <style>
              <class name="circular"/>
            </style>
            <layout>
              <property name="column">1</property>
              <property name="row">2</property>
            </layout>
          </object>
        </child>
        <child>
          <object class="GtkLabel" id="tag_label">
            <property name="xalign">0</property>
            <property name="wrap">true</property>
            <property name="selectable">true</property>
            <layout>
              <property name="column">0</property>
              <property name="row">4</property>
              <property name="column-span">2</property>
            </layout>
          </object>
        </child>
        <child>
          <object class="GtkLabel" id="time_label">
            <property name="xalign">0</property>
            <property name="use-markup">true</property>
            <style>
              <class name="numeric"/>
            </style>
            <layout>
              <property name="column">0</property>
              <property name="row">5</property>
              <property name="column-span">2</property>
            </layout>
          </object>
        </child>
        <child>
          <object class="FourDeckSeekSlider" id="seek_slider">
            <layout>
              <property name="column">0</property>
              <property name="row">6</property>
              <property name="column-span">2</property>
            </layout>
          </object>
        </child>
      </object>
    </child>
  </template>
</interface>
"#)]
    pub struct DeckView {
        // Template widgets
        #[template_child]
        pub title_label: TemplateChild<gtk::Label>,
        #[template_child]
        pub browser: TemplateChild<FolderBrowser>,
        #[template_child]
        pub play_button: TemplateChild<gtk::Button>,
        #[template_child]
        pub stop_button: TemplateChild<gtk::Button>,
        #[template_child]
        pub tag_label: TemplateChild<gtk::Label>,
        #[template_child]
        pub time_label: TemplateChild<gtk::Label>,
        #[template_child]
        pub seek_slider: TemplateChild<SeekSlider>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for DeckView {
        const NAME: &'static str = "FourDeckView";
        type Type = super::DeckView;
        type ParentType = gtk::Widget;

        fn class_init(klass: &mut Self::Class) {
            Self::bind_template(klass);

            klass.set_layout_manager_type::<gtk::BinLayout>();
            klass.set_css_name("deck");
            klass.set_accessible_role(gtk::AccessibleRole::Group);
        }

        fn instance_init(obj: &glib::subclass::InitializingObject<Self>) {
            FolderBrowser::static_type();
            SeekSlider::static_type();
            obj.init_template();
        }
    }

    impl ObjectImpl for DeckView {
        fn dispose(&self) {
            while let Some(child) = self.obj().first_child() {
                child.unparent();
            }
        }
    }

    impl WidgetImpl for DeckView {}
}

/// The button offers "play" only once the pipeline is loaded and idle.
fn shows_play(state: PlaybackState) -> bool {
    matches!(state, PlaybackState::Paused | PlaybackState::Ready)
}

glib::wrapper! {
    pub struct DeckView(ObjectSubclass<imp::DeckView>)
        @extends gtk::Widget,
        @implements gtk::Accessible;
}

impl DeckView {
    pub fn new(player: &Rc<DeckPlayer>) -> Self {
        let view: Self = glib::Object::new();
        view.bind_player(player);
        view
    }

    fn bind_player(&self, player: &Rc<DeckPlayer>) {
        let imp = self.imp();
        let number = (player.index() + 1).to_string();
        imp.title_label
            .set_label(&i18n_k("Deck {number}", &[("number", &number)]));

        let folder = player
            .last_folder()
            .map(|uri| gio::File::for_uri(&uri))
            .unwrap_or_else(|| gio::File::for_path(glib::home_dir()));
        imp.browser.set_folder(&folder);
        imp.browser.connect_folder_notify(clone!(
            #[strong]
            player,
            move |browser| {
                player.set_last_folder(browser.folder().map(|f| f.uri().to_string()));
            }
        ));

        let sender = player.sender();
        imp.browser.connect_file_selected(move |_, file| {
            if let Err(e) = sender.send_blocking(DeckAction::Select(file.clone())) {
                log::error!("Unable to send selection: {e}");
            }
        });

        let sender = player.sender();
        imp.play_button.connect_clicked(move |_| {
            if let Err(e) = sender.send_blocking(DeckAction::TogglePlayPause) {
                log::error!("Unable to send play: {e}");
            }
        });

        let sender = player.sender();
        imp.stop_button.set_tooltip_text(Some(&i18n("Stop")));
        imp.stop_button.connect_clicked(move |_| {
            if let Err(e) = sender.send_blocking(DeckAction::Stop) {
                log::error!("Unable to send stop: {e}");
            }
        });

        imp.seek_slider.bind(player);

        let state = player.state();
        state.connect_state_notify(clone!(
            #[weak(rename_to = this)]
            self,
            move |state| this.update_play_button(state)
        ));
        state.connect_tag_text_notify(clone!(
            #[weak(rename_to = this)]
            self,
            move |state| this.imp().tag_label.set_label(&state.tag_text())
        ));
        state.connect_time_text_notify(clone!(
            #[weak(rename_to = this)]
            self,
            move |state| this.update_time_label(state)
        ));
        state.connect_network_stream_notify(clone!(
            #[weak(rename_to = this)]
            self,
            move |state| this.imp().seek_slider.set_sensitive(!state.network_stream())
        ));

        self.update_play_button(state);
        self.update_time_label(state);
        imp.tag_label.set_label(&state.tag_text());
    }

    fn update_play_button(&self, state: &DeckState) {
        let play_button = self.imp().play_button.get();
        if shows_play(state.state()) {
            play_button.set_icon_name("media-playback-start-symbolic");
            play_button.set_tooltip_text(Some(&i18n("Play")));
        } else {
            play_button.set_icon_name("media-playback-pause-symbolic");
            play_button.set_tooltip_text(Some(&i18n("Pause")));
        }
    }

    fn update_time_label(&self, state: &DeckState) {
        let markup = utils::time_markup(&state.time_text(), state.time_color().as_deref());
        self.imp().time_label.set_markup(&markup);
    }
}
