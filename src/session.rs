//! Locale session state.
//!
//! Owns the active locale and the in-flight translation counter. Both are
//! published through `tokio::sync::watch` channels: holding a receiver is a
//! subscription, dropping it unsubscribes.

use crate::document::DocumentHost;
use crate::i18n::Locale;
use crate::router;
use crate::storage::{KeyValueStore, LOCALE_PREFERENCE_KEY};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Pick the startup locale.
///
/// Order: stored preference, then the client language signal, then the
/// canonical locale (first catalog entry).
pub fn resolve_initial_locale(store: &dyn KeyValueStore, client_language: Option<&str>) -> Locale {
    if let Some(code) = store.get(LOCALE_PREFERENCE_KEY) {
        match Locale::from_code(code.trim()) {
            Ok(locale) => {
                debug!("Using stored locale preference {}", locale);
                return locale;
            }
            Err(e) => warn!("Ignoring stored locale preference: {}", e),
        }
    }

    if let Some(locale) = client_language.and_then(Locale::match_client_language) {
        debug!("Using client language {}", locale);
        return locale;
    }

    Locale::canonical()
}

/// Session-wide locale state shared by every text instance.
pub struct LocaleSession {
    active: watch::Sender<Locale>,
    pending: watch::Sender<usize>,
    store: Arc<dyn KeyValueStore>,
    document: Arc<dyn DocumentHost>,
    // Serializes switches so locale, preference and document never disagree.
    switch: Mutex<()>,
}

impl LocaleSession {
    /// Resolve the startup locale and apply its direction and language to the
    /// document. No navigation happens at startup.
    pub fn initialize(
        store: Arc<dyn KeyValueStore>,
        document: Arc<dyn DocumentHost>,
        client_language: Option<&str>,
    ) -> Self {
        let locale = resolve_initial_locale(store.as_ref(), client_language);
        document.set_direction(locale.direction());
        document.set_language(locale.code());
        info!("Starting session in {} ({})", locale.name(), locale.direction());

        let (active, _) = watch::channel(locale);
        let (pending, _) = watch::channel(0);
        Self {
            active,
            pending,
            store,
            document,
            switch: Mutex::new(()),
        }
    }

    pub fn active_locale(&self) -> Locale {
        *self.active.borrow()
    }

    /// Subscribe to active locale changes.
    pub fn subscribe(&self) -> watch::Receiver<Locale> {
        self.active.subscribe()
    }

    /// Switch the active locale.
    ///
    /// Persists the choice, updates the document's direction and language and
    /// performs a full navigation to the rewritten location, which is returned.
    /// A failed preference write only costs persistence across reloads.
    ///
    /// Concurrent switches are applied one at a time; the last one to run wins
    /// every piece of state.
    pub fn set_active_locale(&self, locale: Locale) -> String {
        let _switch = self.switch.lock().unwrap_or_else(|e| e.into_inner());

        let changed = self.active.send_if_modified(|current| {
            if *current == locale {
                false
            } else {
                *current = locale;
                true
            }
        });
        if changed {
            info!("Active locale changed to {} ({})", locale.name(), locale.code());
        } else {
            debug!("Locale {} re-selected", locale.code());
        }

        if let Err(e) = self.store.set(LOCALE_PREFERENCE_KEY, locale.code()) {
            warn!("Locale preference not persisted: {}", e);
        }

        self.document.set_direction(locale.direction());
        self.document.set_language(locale.code());

        let target = router::rewrite_path(&self.document.location(), locale);
        self.document.navigate(&target);
        target
    }

    /// Switch locale by code, falling back to the canonical locale for codes
    /// outside the catalog.
    pub fn select_locale(&self, code: &str) -> String {
        let locale = Locale::from_code(code).unwrap_or_else(|e| {
            warn!("{}; falling back to {}", e, Locale::canonical());
            Locale::canonical()
        });
        self.set_active_locale(locale)
    }

    pub fn increment_pending(&self) {
        self.pending.send_modify(|count| *count += 1);
    }

    pub fn decrement_pending(&self) {
        self.pending.send_modify(|count| {
            if *count == 0 {
                warn!("Pending translation counter decremented below zero");
            } else {
                *count -= 1;
            }
        });
    }

    pub fn pending_count(&self) -> usize {
        *self.pending.borrow()
    }

    /// Whether any translation request is in flight.
    pub fn is_translating(&self) -> bool {
        self.pending_count() > 0
    }

    /// Subscribe to the in-flight counter, e.g. for a "translating" indicator.
    pub fn subscribe_pending(&self) -> watch::Receiver<usize> {
        self.pending.subscribe()
    }
}
