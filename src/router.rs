//! Locale-aware path rewriting.
//!
//! Non-default locales live under `/{code}/...`; the default locale is never
//! prefixed. Query strings and fragments ride along untouched.

use crate::i18n::{Locale, LocaleRegistry};
use regex::Regex;
use std::sync::OnceLock;

static LOCALE_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn locale_prefix_regex() -> &'static Regex {
    LOCALE_PREFIX_REGEX.get_or_init(|| {
        Regex::new(r"^/([a-z]{2})(?:/|$)").expect("locale prefix regex is valid")
    })
}

/// Split a location into its path and its `?query#fragment` suffix.
fn split_suffix(location: &str) -> (&str, &str) {
    match location.find(|c: char| c == '?' || c == '#') {
        Some(index) => location.split_at(index),
        None => (location, ""),
    }
}

/// Remove a leading catalog-locale segment, giving the locale-neutral path.
///
/// Only an exact two-letter catalog code followed by `/` or the end of the path
/// counts as a prefix, so `/español` and `/xx/trips` are left alone.
pub fn strip_locale_prefix(location: &str) -> String {
    let (path, suffix) = split_suffix(location);
    let path = if path.is_empty() { "/" } else { path };

    let neutral = match locale_prefix_regex().captures(path) {
        Some(caps) if LocaleRegistry::get().contains(&caps[1]) => {
            let rest = &path[3..];
            if rest.is_empty() {
                "/"
            } else {
                rest
            }
        }
        _ => path,
    };

    format!("{}{}", neutral, suffix)
}

/// Prefix a locale-neutral location with `locale`'s code.
///
/// The default locale is returned unchanged.
pub fn add_locale_prefix(location: &str, locale: Locale) -> String {
    let (path, suffix) = split_suffix(location);
    let path = if path.is_empty() { "/" } else { path };

    if locale.is_canonical() {
        return format!("{}{}", path, suffix);
    }

    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() {
        format!("/{}{}", locale.code(), suffix)
    } else {
        format!("/{}/{}{}", locale.code(), rest, suffix)
    }
}

/// Rewrite the current location for `locale`, replacing any existing prefix.
pub fn rewrite_path(current: &str, locale: Locale) -> String {
    add_locale_prefix(&strip_locale_prefix(current), locale)
}
