// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{cell::RefCell, cmp::Ordering, path::Path};

use adw::subclass::prelude::*;
use glib::{clone, closure_local};
use gtk::{gio, glib, pango, prelude::*};
use log::debug;

use crate::{audio::media, i18n::i18n};

const ATTRIBUTES: &str = "standard::name,standard::display-name,standard::type,standard::content-type,standard::is-hidden";

mod imp {
    use glib::subclass::Signal;
    use once_cell::sync::Lazy;

    use super::*;

    #[derive(Debug, glib::Properties)]
    #[properties(wrapper_type = super::FolderBrowser)]
    pub struct FolderBrowser {
        pub root: gtk::Box,
        pub up_button: gtk::Button,
        pub path_label: gtk::Label,
        pub list_view: gtk::ListView,
        pub selection: gtk::SingleSelection,

        #[property(get)]
        pub folder: RefCell<Option<gio::File>>,
    }

    impl Default for FolderBrowser {
        fn default() -> Self {
            let selection = gtk::SingleSelection::new(None::<gio::ListModel>);
            selection.set_autoselect(false);
            selection.set_can_unselect(true);

            Self {
                root: gtk::Box::new(gtk::Orientation::Vertical, 6),
                up_button: gtk::Button::from_icon_name("go-up-symbolic"),
                path_label: gtk::Label::builder()
                    .xalign(0.0)
                    .hexpand(true)
                    .ellipsize(pango::EllipsizeMode::Start)
                    .build(),
                list_view: gtk::ListView::new(Some(selection.clone()), Some(row_factory())),
                selection,
                folder: RefCell::default(),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for FolderBrowser {
        const NAME: &'static str = "FourDeckFolderBrowser";
        type Type = super::FolderBrowser;
        type ParentType = gtk::Widget;

        fn class_init(klass: &mut Self::Class) {
            klass.set_layout_manager_type::<gtk::BinLayout>();
            klass.set_css_name("folderbrowser");
            klass.set_accessible_role(gtk::AccessibleRole::Group);
        }
    }

    impl ObjectImpl for FolderBrowser {
        fn constructed(&self) {
            self.parent_constructed();

            let header = gtk::Box::new(gtk::Orientation::Horizontal, 6);
            self.up_button.set_tooltip_text(Some(&i18n("Parent folder")));
            header.append(&self.up_button);
            header.append(&self.path_label);

            let scrolled = gtk::ScrolledWindow::builder()
                .hscrollbar_policy(gtk::PolicyType::Never)
                .vexpand(true)
                .hexpand(true)
                .child(&self.list_view)
                .build();
            scrolled.add_css_class("card");

            self.root.append(&header);
            self.root.append(&scrolled);
            self.root.set_parent(&*self.obj());

            self.obj().setup_signals();
        }

        fn dispose(&self) {
            self.root.unparent();
        }

        fn properties() -> &'static [glib::ParamSpec] {
            Self::derived_properties()
        }

        fn property(&self, id: usize, pspec: &glib::ParamSpec) -> glib::Value {
            self.derived_property(id, pspec)
        }

        fn signals() -> &'static [Signal] {
            static SIGNALS: Lazy<Vec<Signal>> = Lazy::new(|| {
                vec![Signal::builder("file-selected")
                    .param_types([gio::File::static_type()])
                    .build()]
            });

            SIGNALS.as_ref()
        }
    }

    impl WidgetImpl for FolderBrowser {}
}

glib::wrapper! {
    pub struct FolderBrowser(ObjectSubclass<imp::FolderBrowser>)
        @extends gtk::Widget,
        @implements gtk::Accessible;
}

impl Default for FolderBrowser {
    fn default() -> Self {
        glib::Object::new()
    }
}

fn file_of(info: &gio::FileInfo) -> Option<gio::File> {
    info.attribute_object("standard::file")
        .and_downcast::<gio::File>()
}

fn is_directory(info: &gio::FileInfo) -> bool {
    info.file_type() == gio::FileType::Directory
}

fn is_audio(info: &gio::FileInfo) -> bool {
    let audio_type = info
        .content_type()
        .map(|ct| ct.starts_with("audio/"))
        .unwrap_or(false);

    audio_type || media::is_playlist(Path::new(&info.name()))
}

fn sort_entries(a: &gio::FileInfo, b: &gio::FileInfo) -> Ordering {
    // Folders first, then by name
    is_directory(b).cmp(&is_directory(a)).then_with(|| {
        let a = a.display_name().to_lowercase();
        let b = b.display_name().to_lowercase();
        a.cmp(&b)
    })
}

fn directory_model(folder: &gio::File) -> gio::ListModel {
    let list = gtk::DirectoryList::new(Some(ATTRIBUTES), Some(folder));

    let filter = gtk::CustomFilter::new(|item| {
        let Some(info) = item.downcast_ref::<gio::FileInfo>() else {
            return false;
        };
        !info.is_hidden() && (is_directory(info) || is_audio(info))
    });
    let filtered = gtk::FilterListModel::new(Some(list), Some(filter));

    let sorter = gtk::CustomSorter::new(|a, b| {
        match (
            a.downcast_ref::<gio::FileInfo>(),
            b.downcast_ref::<gio::FileInfo>(),
        ) {
            (Some(a), Some(b)) => sort_entries(a, b).into(),
            _ => gtk::Ordering::Equal,
        }
    });

    gtk::SortListModel::new(Some(filtered), Some(sorter)).upcast()
}

fn child_model(item: &glib::Object) -> Option<gio::ListModel> {
    let info = item.downcast_ref::<gio::FileInfo>()?;
    if !is_directory(info) {
        return None;
    }

    file_of(info).map(|folder| directory_model(&folder))
}

fn row_factory() -> gtk::SignalListItemFactory {
    let factory = gtk::SignalListItemFactory::new();

    factory.connect_setup(|_, item| {
        let Some(item) = item.downcast_ref::<gtk::ListItem>() else {
            return;
        };
        let label = gtk::Label::builder()
            .xalign(0.0)
            .ellipsize(pango::EllipsizeMode::End)
            .build();
        let expander = gtk::TreeExpander::new();
        expander.set_child(Some(&label));
        item.set_child(Some(&expander));
    });

    factory.connect_bind(|_, item| {
        let Some(item) = item.downcast_ref::<gtk::ListItem>() else {
            return;
        };
        let Some(row) = item.item().and_downcast::<gtk::TreeListRow>() else {
            return;
        };
        let Some(expander) = item.child().and_downcast::<gtk::TreeExpander>() else {
            return;
        };

        expander.set_list_row(Some(&row));
        if let Some(label) = expander.child().and_downcast::<gtk::Label>() {
            let name = row
                .item()
                .and_downcast::<gio::FileInfo>()
                .map(|info| info.display_name())
                .unwrap_or_default();
            label.set_label(&name);
        }
    });

    factory.connect_unbind(|_, item| {
        let Some(item) = item.downcast_ref::<gtk::ListItem>() else {
            return;
        };
        if let Some(expander) = item.child().and_downcast::<gtk::TreeExpander>() {
            expander.set_list_row(None);
        }
    });

    factory
}

impl FolderBrowser {
    pub fn set_folder(&self, folder: &gio::File) {
        debug!("Browsing {}", folder.uri());

        let imp = self.imp();
        let tree = gtk::TreeListModel::new(directory_model(folder), false, false, child_model);
        imp.selection.set_model(Some(&tree));
        imp.path_label.set_label(&folder.parse_name());
        imp.up_button.set_sensitive(folder.parent().is_some());

        imp.folder.replace(Some(folder.clone()));
        self.notify_folder();
    }

    pub fn connect_file_selected<F: Fn(&Self, &gio::File) + 'static>(
        &self,
        f: F,
    ) -> glib::SignalHandlerId {
        self.connect_closure(
            "file-selected",
            false,
            closure_local!(move |browser: FolderBrowser, file: gio::File| {
                f(&browser, &file);
            }),
        )
    }

    fn selected_info(row: Option<glib::Object>) -> Option<gio::FileInfo> {
        row.and_downcast::<gtk::TreeListRow>()?
            .item()
            .and_downcast::<gio::FileInfo>()
    }

    fn setup_signals(&self) {
        let imp = self.imp();

        imp.up_button.connect_clicked(clone!(
            #[weak(rename_to = this)]
            self,
            move |_| {
                if let Some(parent) = this.folder().and_then(|folder| folder.parent()) {
                    this.set_folder(&parent);
                }
            }
        ));

        imp.selection.connect_selected_item_notify(clone!(
            #[weak(rename_to = this)]
            self,
            move |selection| {
                let Some(info) = Self::selected_info(selection.selected_item()) else {
                    return;
                };
                if is_directory(&info) {
                    return;
                }
                if let Some(file) = file_of(&info) {
                    this.emit_by_name::<()>("file-selected", &[&file]);
                }
            }
        ));

        // Activating a folder descends into it
        imp.list_view.connect_activate(clone!(
            #[weak(rename_to = this)]
            self,
            move |_, position| {
                let info = Self::selected_info(this.imp().selection.item(position));
                if let Some(folder) = info.filter(is_directory).as_ref().and_then(file_of) {
                    this.set_folder(&folder);
                }
            }
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, file_type: gio::FileType) -> gio::FileInfo {
        let info = gio::FileInfo::new();
        info.set_name(name);
        info.set_display_name(name);
        info.set_file_type(file_type);
        info
    }

    #[test]
    fn folders_sort_first() {
        let song = info("a.ogg", gio::FileType::Regular);
        let folder = info("z", gio::FileType::Directory);

        assert_eq!(sort_entries(&folder, &song), Ordering::Less);
        assert_eq!(sort_entries(&song, &folder), Ordering::Greater);
    }

    #[test]
    fn names_sort_case_insensitively() {
        let a = info("Alpha.ogg", gio::FileType::Regular);
        let b = info("beta.ogg", gio::FileType::Regular);

        assert_eq!(sort_entries(&a, &b), Ordering::Less);
    }

    #[test]
    fn playlists_count_as_audio() {
        let playlist = info("set.m3u", gio::FileType::Regular);
        assert!(is_audio(&playlist));

        let text = info("notes.txt", gio::FileType::Regular);
        text.set_content_type("text/plain");
        assert!(!is_audio(&text));

        let song = info("track", gio::FileType::Regular);
        song.set_content_type("audio/mpeg");
        assert!(is_audio(&song));
    }
}
