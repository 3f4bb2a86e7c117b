//! Validation message catalog.
//!
//! Message templates may contain a `{length}`/`{decimal}` placeholder
//! and a bracketed tri-form word list `[one,few,many]`. After the
//! placeholder is substituted, the inflection pass rewrites each
//! `<number> [..]` occurrence into `"<number> <word>"`, picking the
//! word form by the count's last digits. The three forms cover
//! Slavic-style plural grammar; languages that only distinguish
//! singular/plural simply repeat the plural form.

use regex::Regex;

use crate::error::{FormError, Result};

/// Supported message locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// English (default).
    #[default]
    En,
    /// Polish.
    Pl,
}

impl Locale {
    /// Resolves a locale tag.
    ///
    /// Unknown tags are a configuration error, not a fallback.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag.to_uppercase().as_str() {
            "EN" => Ok(Self::En),
            "PL" => Ok(Self::Pl),
            _ => Err(FormError::UnsupportedLocale(tag.to_string())),
        }
    }
}

/// Keys of the built-in rule messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// Empty required field.
    Required,
    /// Unchecked must-check checkbox.
    Checked,
    /// Value shorter than the minimum length.
    LengthMin,
    /// Value longer than the maximum length.
    LengthMax,
    /// Malformed e-mail address.
    InvalidEmail,
    /// Non-integer value.
    InvalidInteger,
    /// Non-numeric value where a decimal is expected.
    InvalidNumber,
    /// Too many decimal places.
    DecimalMax,
    /// Value outside the allowed choice set.
    InvalidChoice,
}

/// A per-locale catalog of rule messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    /// Creates a catalog for the given locale.
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Returns the catalog's locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the raw template for a message key.
    pub fn template(&self, key: MessageKey) -> &'static str {
        match self.locale {
            Locale::En => match key {
                MessageKey::Required => "This field cannot be empty.",
                MessageKey::Checked => "The checkbox must be checked.",
                MessageKey::LengthMin => {
                    "The field cannot have fewer than {length} [character,characters,characters]."
                }
                MessageKey::LengthMax => {
                    "The field cannot have more than {length} [character,characters,characters]."
                }
                MessageKey::InvalidEmail => "The provided email address is invalid.",
                MessageKey::InvalidInteger => "The provided value must be an integer.",
                MessageKey::InvalidNumber => "Invalid numeric value.",
                MessageKey::DecimalMax => {
                    "The field may not have more than {decimal} [decimal place,decimal places,decimal places]."
                }
                MessageKey::InvalidChoice => "Incorrect value.",
            },
            Locale::Pl => match key {
                MessageKey::Required => "Pole nie może być puste.",
                MessageKey::Checked => "Pole musi zostać zaznaczone.",
                MessageKey::LengthMin => {
                    "Pole nie może mieć mniej niż {length} [znak,znaki,znaków]."
                }
                MessageKey::LengthMax => {
                    "Pole nie może mieć więcej niż {length} [znak,znaki,znaków]."
                }
                MessageKey::InvalidEmail => "Podany adres e-mail jest niepoprawny.",
                MessageKey::InvalidInteger => "Podana wartość musi być liczbą całkowitą.",
                MessageKey::InvalidNumber => "Niepoprawna wartość liczbowa.",
                MessageKey::DecimalMax => {
                    "Pole nie może mieć więcej niż {decimal} [miejsce,miejsca,miejsc] po przecinku."
                }
                MessageKey::InvalidChoice => "Nieprawidłowa wartość pola.",
            },
        }
    }

    /// Renders a message without numeric interpolation.
    pub fn plain(&self, key: MessageKey) -> String {
        self.template(key).to_string()
    }

    /// Renders a message, substituting `count` for the placeholder and
    /// applying the inflection pass.
    pub fn counted(&self, key: MessageKey, count: u64) -> String {
        let text = self
            .template(key)
            .replace("{length}", &count.to_string())
            .replace("{decimal}", &count.to_string());
        apply_inflections(&text)
    }
}

/// Picks the word form for `number` out of a tri-form list.
///
/// Form 0 when the last digit is 1 outside ..11, form 1 when the last
/// digit is 2-4 outside ..12-..14, form 2 otherwise.
pub fn inflect(number: u64, forms: &[&str]) -> String {
    let last_digit = number % 10;
    let last_two = number % 100;

    let index = if last_digit == 1 && last_two != 11 {
        0
    } else if (2..=4).contains(&last_digit) && !(12..=14).contains(&last_two) {
        1
    } else {
        2
    };

    let word = forms.get(index).or_else(|| forms.last()).copied().unwrap_or("");
    format!("{number} {word}")
}

/// Rewrites every `<number> [one,few,many]` occurrence in `text` into
/// the inflected `"<number> <word>"` form.
pub fn apply_inflections(text: &str) -> String {
    let pattern = Regex::new(r"(\d+)\s*\[([^\]]+)\]").expect("valid inflection pattern");

    pattern
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let number: u64 = caps[1].parse().unwrap_or(0);
            let forms: Vec<&str> = caps[2].split(',').map(str::trim).collect();
            inflect(number, &forms)
        })
        .into_owned()
}
