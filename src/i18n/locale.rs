//! Locale type: validated handle into the locale registry.
//!
//! A `Locale` can only be obtained from the registry, so holding one proves the
//! code is in the catalog. Everything else (names, direction) is read from the
//! static catalog entry rather than computed.

use crate::error::LocaleError;
use crate::i18n::{LocaleConfig, LocaleRegistry};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left-to-right
    Ltr,
    /// Right-to-left
    Rtl,
}

impl Direction {
    /// The HTML `dir` attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A locale from the catalog.
#[derive(Clone, Copy)]
pub struct Locale {
    config: &'static LocaleConfig,
}

impl Locale {
    /// Create a Locale from a catalog code.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is in the catalog
    /// * `Err(LocaleError::NotFound)` otherwise
    pub fn from_code(code: &str) -> Result<Locale, LocaleError> {
        Locale::find(code).ok_or_else(|| LocaleError::NotFound(code.to_string()))
    }

    /// Look up a locale by code, `None` if it is not in the catalog.
    pub fn find(code: &str) -> Option<Locale> {
        LocaleRegistry::get()
            .get_by_code(code)
            .map(|config| Locale { config })
    }

    /// The canonical (source) locale. Source text is written in it and never
    /// needs translating.
    pub fn canonical() -> Locale {
        Locale {
            config: LocaleRegistry::get().canonical(),
        }
    }

    /// All catalog locales in their stable display order.
    pub fn list() -> Vec<Locale> {
        LocaleRegistry::get()
            .list_all()
            .iter()
            .map(|config| Locale { config })
            .collect()
    }

    /// Best catalog match for a client language signal.
    ///
    /// Accepts BCP 47 tags (`es-MX`), POSIX locales (`es_MX.UTF-8`) and
    /// preference lists (`fr-CA,fr;q=0.9`). Entries are tried in order and
    /// matched on their primary subtag, case-insensitively.
    pub fn match_client_language(signal: &str) -> Option<Locale> {
        signal
            .split(',')
            .filter_map(|entry| {
                let tag = entry.split(';').next().unwrap_or("").trim();
                let tag = tag.split('.').next().unwrap_or(tag);
                let primary = tag.split(|c: char| c == '-' || c == '_').next().unwrap_or("");
                if primary.is_empty() {
                    None
                } else {
                    Locale::find(&primary.to_ascii_lowercase())
                }
            })
            .next()
    }

    /// The locale code, e.g. "es".
    pub fn code(&self) -> &'static str {
        self.config.code
    }

    /// The full catalog entry.
    pub fn config(&self) -> &'static LocaleConfig {
        self.config
    }

    /// English display name.
    pub fn name(&self) -> &'static str {
        self.config.name
    }

    /// Native display name.
    pub fn native_name(&self) -> &'static str {
        self.config.native_name
    }

    pub fn direction(&self) -> Direction {
        self.config.direction
    }

    pub fn is_rtl(&self) -> bool {
        self.config.direction == Direction::Rtl
    }

    /// Check if this is the canonical locale.
    pub fn is_canonical(&self) -> bool {
        self.config.is_canonical
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.config.code == other.config.code
    }
}

impl Eq for Locale {}

impl Hash for Locale {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.config.code.hash(state);
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Locale").field(&self.config.code).finish()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config.code)
    }
}
