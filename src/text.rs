//! Per-instance translated text.
//!
//! Each `TranslatedText` subscribes to the session's active locale when it is
//! created and runs a small driver task:
//!
//! ```text
//!            cache hit / canonical
//!   start ───────────────────────────▶ Resolved(text)
//!     │                                     ▲   │
//!     │ miss                 success/fail   │   │ locale change
//!     ▼                                     │   ▼
//!   Pending ────────────────────────────────┘  start
//!     │
//!     │ locale change while waiting: result discarded
//!     └────────────────────────────────────▶ start
//! ```
//!
//! Dropping the instance aborts the driver and drops the subscription, so a
//! late provider result has nobody to update.

use crate::i18n::Locale;
use crate::resolver::TextResolver;
use crate::session::LocaleSession;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// What a text instance should currently display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextState {
    /// A translation request is outstanding.
    Pending,
    /// Final text for the current locale: a translation or the source as fallback.
    Resolved(String),
}

/// A piece of UI text that follows the active locale.
///
/// Must be created inside a Tokio runtime.
pub struct TranslatedText {
    source: String,
    state: watch::Receiver<TextState>,
    // Locale the current `Resolved` state belongs to, `None` while re-resolving.
    resolved_for: watch::Receiver<Option<Locale>>,
    session: Arc<LocaleSession>,
    driver: JoinHandle<()>,
}

impl TranslatedText {
    pub fn new(resolver: &TextResolver, source: impl Into<String>) -> Self {
        let source = source.into();
        let locale_rx = resolver.session().subscribe();
        let locale = *locale_rx.borrow();
        let resolved = resolver.resolve_cached(&source, locale);

        let initial = match &resolved {
            Some(text) => TextState::Resolved(text.clone()),
            None => TextState::Pending,
        };
        let (state_tx, state) = watch::channel(initial);
        let (resolved_tx, resolved_for) = watch::channel(resolved.as_ref().map(|_| locale));

        let driver = tokio::spawn(drive(
            resolver.clone(),
            source.clone(),
            locale_rx,
            state_tx,
            resolved_tx,
            locale,
            resolved,
        ));

        Self {
            source,
            state,
            resolved_for,
            session: resolver.session().clone(),
            driver,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn state(&self) -> TextState {
        self.state.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        matches!(*self.state.borrow(), TextState::Pending)
    }

    /// Text to render now. While pending this is the source text.
    pub fn display(&self) -> String {
        match &*self.state.borrow() {
            TextState::Resolved(text) => text.clone(),
            TextState::Pending => self.source.clone(),
        }
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<TextState> {
        self.state.clone()
    }

    /// Wait until the text is resolved for the session's active locale.
    ///
    /// A value resolved for a previous locale is never returned, even when the
    /// driver has not yet seen the switch.
    pub async fn settled(&self) -> String {
        let mut resolved_for = self.resolved_for.clone();
        let mut active = self.session.subscribe();

        loop {
            let target = *active.borrow_and_update();
            tokio::select! {
                ready = async { resolved_for.wait_for(|l| *l == Some(target)).await.is_ok() } => {
                    // Closed only if the driver panicked.
                    if !ready {
                        return self.display();
                    }
                    let state = self.state();
                    // `resolved_for` is cleared before the state changes, so
                    // if it still names the target the state read belongs to it.
                    if *resolved_for.borrow() == Some(target) {
                        if let TextState::Resolved(text) = state {
                            return text;
                        }
                    }
                }
                changed = active.changed() => {
                    if changed.is_err() {
                        return self.display();
                    }
                }
            }
        }
    }
}

impl Drop for TranslatedText {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

async fn drive(
    resolver: TextResolver,
    source: String,
    mut locale_rx: watch::Receiver<Locale>,
    state_tx: watch::Sender<TextState>,
    resolved_tx: watch::Sender<Option<Locale>>,
    mut locale: Locale,
    mut resolved: Option<String>,
) {
    loop {
        let settled = match resolved.take() {
            Some(text) => Some(text),
            None => {
                state_tx.send_if_modified(|state| {
                    if *state == TextState::Pending {
                        false
                    } else {
                        *state = TextState::Pending;
                        true
                    }
                });

                if locale_rx.has_changed().unwrap_or(false) {
                    debug!("Locale changed before translating {:?} to {}", source, locale);
                    None
                } else {
                    let flight = resolver.fetch(&source, locale);
                    tokio::select! {
                        result = flight => {
                            if *locale_rx.borrow() == locale {
                                // Failures were logged by the flight; fall back to source.
                                Some(result.unwrap_or_else(|_| source.clone()))
                            } else {
                                resolver.metrics().record_stale_discard();
                                debug!("Discarding {} translation of {:?}", locale, source);
                                None
                            }
                        }
                        changed = locale_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                            resolver.metrics().record_stale_discard();
                            debug!("Locale changed while translating {:?} to {}", source, locale);
                            None
                        }
                    }
                }
            }
        };

        if let Some(text) = settled {
            state_tx.send_replace(TextState::Resolved(text));
            resolved_tx.send_replace(Some(locale));
            if locale_rx.changed().await.is_err() {
                return;
            }
        }

        resolved_tx.send_replace(None);
        locale = *locale_rx.borrow_and_update();
        resolved = resolver.resolve_cached(&source, locale);
    }
}
