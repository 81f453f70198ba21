// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use gettextrs::gettext;

fn kreplace(s: &mut String, kwargs: &[(&str, &str)]) {
    for (k, v) in kwargs {
        *s = s.replace(&format!("{{{}}}", k), v);
    }
}

pub fn i18n(format: &str) -> String {
    gettext(format)
}

pub fn i18n_k(format: &str, kwargs: &[(&str, &str)]) -> String {
    let mut s = gettext(format);
    kreplace(&mut s, kwargs);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_named_arguments() {
        let mut s = String::from("Deck {number}: {name}");
        kreplace(&mut s, &[("number", "2"), ("name", "intro.ogg")]);
        assert_eq!(s, "Deck 2: intro.ogg");
    }

    #[test]
    fn leaves_unknown_placeholders() {
        let mut s = String::from("{missing} stays");
        kreplace(&mut s, &[("other", "x")]);
        assert_eq!(s, "{missing} stays");
    }
}
