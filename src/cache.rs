//! Translation cache: `(source text, locale code) -> translated text`.
//!
//! Entries are never evicted or overwritten. The first value stored for a key
//! is the value for the rest of the session.

use crate::error::CacheConflict;
use crate::i18n::SeedEntry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Result of a successful `store`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The key was new and the value is now cached.
    Inserted,
    /// The identical value was already cached; nothing changed.
    Unchanged,
}

/// Two-level translation cache keyed by source text, then locale code.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl TranslationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache pre-filled with bundled translations.
    pub fn with_seed(seed: &[SeedEntry]) -> Self {
        let mut entries: HashMap<String, HashMap<String, String>> = HashMap::new();
        for (source, translations) in seed {
            let by_locale = entries.entry((*source).to_string()).or_default();
            for (code, text) in translations.iter() {
                by_locale
                    .entry((*code).to_string())
                    .or_insert_with(|| (*text).to_string());
            }
        }
        debug!("Seeded translation cache with {} source strings", entries.len());
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, HashMap<String, String>>> {
        // Every critical section is a single map operation, so a poisoned
        // lock still guards a consistent map.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Look up a cached translation.
    pub fn lookup(&self, source_text: &str, locale_code: &str) -> Option<String> {
        self.entries()
            .get(source_text)
            .and_then(|by_locale| by_locale.get(locale_code))
            .cloned()
    }

    /// Store a translation.
    ///
    /// Storing the value already cached is a no-op. Storing a different value
    /// for an existing key is rejected and the cached value is kept.
    pub fn store(
        &self,
        source_text: &str,
        locale_code: &str,
        translated: &str,
    ) -> Result<StoreOutcome, CacheConflict> {
        let mut entries = self.entries();
        let by_locale = entries.entry(source_text.to_string()).or_default();

        match by_locale.get(locale_code) {
            Some(existing) if existing == translated => Ok(StoreOutcome::Unchanged),
            Some(existing) => Err(CacheConflict {
                source_text: source_text.to_string(),
                locale: locale_code.to_string(),
                existing: existing.clone(),
                rejected: translated.to_string(),
            }),
            None => {
                by_locale.insert(locale_code.to_string(), translated.to_string());
                Ok(StoreOutcome::Inserted)
            }
        }
    }

    /// Number of cached `(text, locale)` pairs.
    pub fn len(&self) -> usize {
        self.entries().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
