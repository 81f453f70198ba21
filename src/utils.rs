// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use gtk::glib;

use crate::config::APPLICATION_ID;

pub fn is_development_profile() -> bool {
    APPLICATION_ID.ends_with("Devel")
}

/// Formats a clock time as `H:MM:SS`; unknown times read `99:99:99`.
pub fn format_hms(t: Option<gst::ClockTime>) -> String {
    match t {
        Some(t) => {
            let s = t.seconds();
            format!("{}:{:02}:{:02}", s / 3600, (s / 60) % 60, s % 60)
        }
        None => String::from("99:99:99"),
    }
}

pub fn format_time_text(position: gst::ClockTime, duration: Option<gst::ClockTime>) -> String {
    let remaining = duration.map(|d| d.saturating_sub(position));
    format!(
        "{} / -{} / {}",
        format_hms(Some(position)),
        format_hms(remaining),
        format_hms(duration)
    )
}

pub fn format_remaining_time(t: gst::ClockTime) -> String {
    let s = t.seconds();
    format!("{:02}:{:02}", (s / 60) % 60, s % 60)
}

pub fn time_markup(text: &str, background: Option<&str>) -> String {
    let text = glib::markup_escape_text(text);
    match background {
        Some(color) => format!(
            "<span size=\"x-large\" bgcolor=\"{}\">{}</span>",
            glib::markup_escape_text(color),
            text
        ),
        None => format!("<span size=\"x-large\">{}</span>", text),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeColor {
    Green,
    Yellow,
    Red,
}

impl TimeColor {
    /// Red in the last quarter of the stream, yellow in the third, green before.
    pub fn for_remaining(remaining: gst::ClockTime, duration: gst::ClockTime) -> Self {
        let remaining = remaining.nseconds();
        let duration = duration.nseconds();
        if remaining.saturating_mul(2) < duration {
            if remaining.saturating_mul(4) < duration {
                TimeColor::Red
            } else {
                TimeColor::Yellow
            }
        } else {
            TimeColor::Green
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeColors {
    pub green: String,
    pub yellow: String,
    pub red: String,
}

impl Default for TimeColors {
    fn default() -> Self {
        Self {
            green: String::from("green"),
            yellow: String::from("yellow"),
            red: String::from("red"),
        }
    }
}

impl TimeColors {
    pub fn color(&self, time_color: TimeColor) -> &str {
        match time_color {
            TimeColor::Green => &self.green,
            TimeColor::Yellow => &self.yellow,
            TimeColor::Red => &self.red,
        }
    }
}
