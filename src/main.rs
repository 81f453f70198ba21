// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use std::env;

use clap::Parser;
use fourdeckradio::{application::Application, cli::Options, config::{PROFILE, VERSION}};
use gtk::{glib, prelude::*};
use log::{debug, error};

fn main() -> glib::ExitCode {
    // GApplication would reject our flags, so they are parsed first
    let options = Options::parse();

    if let Err(err) = fourdeckradio::init() {
        eprintln!("Unable to initialize: {err}");
        return glib::ExitCode::FAILURE;
    }

    debug!("Four Deck Radio {} (profile: {})", VERSION, PROFILE);
    glib::set_application_name("Four Deck Radio");
    glib::set_program_name(Some("fourdeckradio"));

    let ctx = glib::MainContext::default();
    let _guard = match ctx.acquire() {
        Ok(guard) => guard,
        Err(err) => {
            error!("Unable to acquire the main context: {}", err);
            return glib::ExitCode::FAILURE;
        }
    };

    let program = env::args().next().unwrap_or_default();
    Application::new(options).run_with_args(&[program])
}
