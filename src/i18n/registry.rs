//! Locale registry: Single source of truth for all supported locales.
//!
//! The catalog is fixed at build time. It is exposed through a lazily
//! initialized `OnceLock` singleton so every component sees the same ordered
//! list without passing it around.

use crate::i18n::Direction;
use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Two-letter language code (e.g., "en", "es", "ar"). Doubles as the URL segment.
    pub code: &'static str,

    /// English display name (e.g., "Spanish")
    pub name: &'static str,

    /// Native display name (e.g., "Español"), used by the locale selector
    pub native_name: &'static str,

    /// Text direction of the locale
    pub direction: Direction,

    /// Whether this is the canonical/source locale (exactly one is)
    pub is_canonical: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// Codes are matched exactly; callers normalize case beforehand.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All locales in catalog order.
    ///
    /// The order is stable and the canonical locale always comes first.
    pub fn list_all(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Get the canonical (default) locale configuration.
    pub fn canonical(&self) -> &LocaleConfig {
        self.locales
            .iter()
            .find(|locale| locale.is_canonical)
            .unwrap_or(&self.locales[0])
    }

    /// Check if a locale code is in the catalog.
    pub fn contains(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            direction: Direction::Ltr,
            is_canonical: true,
        },
        LocaleConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            direction: Direction::Ltr,
            is_canonical: false,
        },
        LocaleConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            direction: Direction::Ltr,
            is_canonical: false,
        },
        LocaleConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            direction: Direction::Ltr,
            is_canonical: false,
        },
        LocaleConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            direction: Direction::Ltr,
            is_canonical: false,
        },
        LocaleConfig {
            code: "pt",
            name: "Portuguese",
            native_name: "Português",
            direction: Direction::Ltr,
            is_canonical: false,
        },
        LocaleConfig {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
            direction: Direction::Rtl,
            is_canonical: false,
        },
        LocaleConfig {
            code: "he",
            name: "Hebrew",
            native_name: "עברית",
            direction: Direction::Rtl,
            is_canonical: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LocaleRegistry::get()
            .get_by_code("en")
            .expect("English should be in the catalog");

        assert_eq!(config.name, "English");
        assert_eq!(config.direction, Direction::Ltr);
        assert!(config.is_canonical);
    }

    #[test]
    fn test_get_by_code_arabic_is_rtl() {
        let config = LocaleRegistry::get().get_by_code("ar").unwrap();
        assert_eq!(config.native_name, "العربية");
        assert_eq!(config.direction, Direction::Rtl);
        assert!(!config.is_canonical);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LocaleRegistry::get().get_by_code("xx").is_none());
        assert!(LocaleRegistry::get().get_by_code("").is_none());
        assert!(LocaleRegistry::get().get_by_code("EN").is_none());
    }

    #[test]
    fn test_canonical_is_first_entry() {
        let registry = LocaleRegistry::get();
        assert_eq!(registry.canonical().code, "en");
        assert_eq!(registry.list_all()[0].code, registry.canonical().code);
    }

    #[test]
    fn test_exactly_one_canonical() {
        let count = LocaleRegistry::get()
            .list_all()
            .iter()
            .filter(|locale| locale.is_canonical)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_codes_are_unique_two_letter_lowercase() {
        let all = LocaleRegistry::get().list_all();
        for (i, locale) in all.iter().enumerate() {
            assert_eq!(locale.code.len(), 2, "{} is not two letters", locale.code);
            assert!(locale.code.chars().all(|c| c.is_ascii_lowercase()));
            assert!(
                all[i + 1..].iter().all(|other| other.code != locale.code),
                "duplicate code {}",
                locale.code
            );
        }
    }

    #[test]
    fn test_contains() {
        let registry = LocaleRegistry::get();
        assert!(registry.contains("fr"));
        assert!(!registry.contains("zz"));
    }
}
