// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::env;

use clap::Parser;
use fourdeckradio::{
    audio::{AudioSink, DeckPlayer},
    cli::SimpleOptions,
    config::APPLICATION_ID,
    simple_window::SimpleWindow,
    utils::TimeColors,
};
use gtk::{gio, glib, prelude::*};
use log::error;

fn main() -> glib::ExitCode {
    let options = SimpleOptions::parse();

    if let Err(err) = fourdeckradio::init() {
        eprintln!("Unable to initialize: {err}");
        return glib::ExitCode::FAILURE;
    }

    glib::set_application_name("Simple Player");
    glib::set_program_name(Some("simpleplayer"));

    let app = adw::Application::builder()
        .application_id(format!("{APPLICATION_ID}.Simple"))
        .flags(gio::ApplicationFlags::NON_UNIQUE)
        .build();

    let folder = options.folder;
    app.connect_activate(move |app| {
        let player = match DeckPlayer::with_gst(0, AudioSink::Auto, TimeColors::default()) {
            Ok(player) => player,
            Err(err) => {
                error!("Unable to set up the audio pipeline: {}", err);
                app.quit();
                return;
            }
        };
        player.clone().attach();

        let window = SimpleWindow::new(app, &folder, player);
        window.present();
    });

    let program = env::args().next().unwrap_or_default();
    app.run_with_args(&[program])
}
