//! Text resolution: cache first, provider on a miss, one provider call per
//! `(text, locale)` no matter how many callers ask at once.

use crate::cache::TranslationCache;
use crate::error::ProviderError;
use crate::i18n::{Locale, TranslationMetrics};
use crate::provider::TranslationProvider;
use crate::session::LocaleSession;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// A provider result shared by every caller waiting on the same key.
pub type SharedTranslation = Shared<BoxFuture<'static, Result<String, ProviderError>>>;

type FlightKey = (String, &'static str);
type FlightMap = HashMap<FlightKey, SharedTranslation>;

/// Shared resolution context handed to every text instance.
///
/// Cloning is cheap; all clones share the same cache, session, provider and
/// in-flight table.
#[derive(Clone)]
pub struct TextResolver {
    session: Arc<LocaleSession>,
    cache: Arc<TranslationCache>,
    provider: Arc<dyn TranslationProvider>,
    metrics: Arc<TranslationMetrics>,
    in_flight: Arc<Mutex<FlightMap>>,
}

impl TextResolver {
    pub fn new(
        session: Arc<LocaleSession>,
        cache: Arc<TranslationCache>,
        provider: Arc<dyn TranslationProvider>,
    ) -> Self {
        Self {
            session,
            cache,
            provider,
            metrics: Arc::new(TranslationMetrics::new()),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn session(&self) -> &Arc<LocaleSession> {
        &self.session
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    pub fn metrics(&self) -> &Arc<TranslationMetrics> {
        &self.metrics
    }

    fn flights(&self) -> MutexGuard<'_, FlightMap> {
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Resolve without suspending.
    ///
    /// The canonical locale returns `text` without touching the cache. `None`
    /// means a provider call is needed.
    pub fn resolve_cached(&self, text: &str, locale: Locale) -> Option<String> {
        if locale.is_canonical() {
            return Some(text.to_string());
        }

        match self.cache.lookup(text, locale.code()) {
            Some(translated) => {
                self.metrics.record_cache_hit();
                Some(translated)
            }
            None => {
                self.metrics.record_cache_miss();
                None
            }
        }
    }

    /// Start, or join, the provider call for `(text, locale)`.
    ///
    /// The call runs on its own task, so it settles (cache write, pending
    /// decrement) even when every caller has stopped waiting.
    pub fn fetch(&self, text: &str, locale: Locale) -> SharedTranslation {
        let key: FlightKey = (text.to_string(), locale.code());
        let (sender, receiver) = oneshot::channel();

        let flight = {
            let mut flights = self.flights();

            if let Some(existing) = flights.get(&key) {
                self.metrics.record_deduplicated();
                debug!("Joining in-flight translation of {:?} to {}", text, locale);
                return existing.clone();
            }

            // A flight writes the cache before leaving the table, so a key
            // that is in neither has never succeeded.
            if let Some(translated) = self.cache.lookup(text, locale.code()) {
                return futures::future::ready(Ok(translated)).boxed().shared();
            }

            let flight = receiver
                .map(|result| {
                    result.unwrap_or_else(|_| {
                        Err(ProviderError::Unavailable(
                            "translation task dropped".to_string(),
                        ))
                    })
                })
                .boxed()
                .shared();
            flights.insert(key.clone(), flight.clone());
            flight
        };

        self.session.increment_pending();
        self.metrics.record_provider_call();
        let guard = FlightGuard {
            resolver: self.clone(),
            key,
        };
        tokio::spawn(run_flight(guard, sender));

        flight
    }

    /// Translate `text` into `locale`, never failing.
    ///
    /// Provider errors fall back to the source text.
    pub async fn translate(&self, text: &str, locale: Locale) -> String {
        if let Some(resolved) = self.resolve_cached(text, locale) {
            return resolved;
        }

        match self.fetch(text, locale).await {
            Ok(translated) => translated,
            Err(_) => text.to_string(),
        }
    }
}

/// Leaves the in-flight table and balances the pending counter exactly once,
/// however the flight ends.
struct FlightGuard {
    resolver: TextResolver,
    key: FlightKey,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.resolver.flights().remove(&self.key);
        self.resolver.session.decrement_pending();
    }
}

async fn run_flight(guard: FlightGuard, sender: oneshot::Sender<Result<String, ProviderError>>) {
    let resolver = &guard.resolver;
    let (text, code) = (guard.key.0.as_str(), guard.key.1);

    let result = match resolver.provider.translate(text, code).await {
        Ok(translated) => match resolver.cache.store(text, code, &translated) {
            Ok(_) => Ok(translated),
            Err(conflict) => {
                resolver.metrics.record_cache_conflict();
                warn!("{}", conflict);
                Ok(conflict.existing)
            }
        },
        Err(e) => {
            resolver.metrics.record_provider_failure();
            warn!("Translation of {:?} to {} failed: {}", text, code, e);
            Err(e)
        }
    };

    // Leave the table before answering so a failed key is retried by the
    // next request instead of joining this flight.
    drop(guard);
    let _ = sender.send(result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HeadlessDocument;
    use crate::i18n::SEED_TRANSLATIONS;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Semaphore;

    /// Provider that answers `[code] text` once the gate hands out a permit.
    struct GatedProvider {
        gate: Semaphore,
        calls: AtomicUsize,
        fail: bool,
    }

    impl GatedProvider {
        fn open() -> Arc<Self> {
            Arc::new(Self {
                gate: Semaphore::new(Semaphore::MAX_PERMITS),
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn closed() -> Arc<Self> {
            Arc::new(Self {
                gate: Semaphore::new(0),
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                gate: Semaphore::new(Semaphore::MAX_PERMITS),
                calls: AtomicUsize::new(0),
                fail: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationProvider for GatedProvider {
        async fn translate(&self, text: &str, target_locale: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate
                .acquire()
                .await
                .map_err(|e| ProviderError::Unavailable(e.to_string()))?
                .forget();
            if self.fail {
                Err(ProviderError::RateLimited)
            } else {
                Ok(format!("[{}] {}", target_locale, text))
            }
        }
    }

    fn resolver_with(provider: Arc<dyn TranslationProvider>, client_language: &str) -> TextResolver {
        let session = LocaleSession::initialize(
            Arc::new(MemoryStore::new()),
            Arc::new(HeadlessDocument::new("/")),
            Some(client_language),
        );
        TextResolver::new(
            Arc::new(session),
            Arc::new(TranslationCache::with_seed(SEED_TRANSLATIONS)),
            provider,
        )
    }

    async fn settle(resolver: &TextResolver) {
        for _ in 0..1000 {
            if resolver.session().pending_count() == 0 {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("translations never settled");
    }

    fn locale(code: &str) -> Locale {
        Locale::from_code(code).unwrap()
    }

    // ==================== resolve_cached Tests ====================

    #[test]
    fn test_canonical_bypasses_cache() {
        let provider = GatedProvider::open();
        let resolver = resolver_with(provider.clone(), "en");

        let resolved = resolver.resolve_cached("Anything at all", Locale::canonical());

        assert_eq!(resolved.as_deref(), Some("Anything at all"));
        assert_eq!(resolver.metrics().cache_hits(), 0);
        assert_eq!(resolver.metrics().cache_misses(), 0);
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_seeded_text_hits_cache() {
        let resolver = resolver_with(GatedProvider::open(), "es");
        assert_eq!(
            resolver.resolve_cached("Book Now", locale("es")).as_deref(),
            Some("Reservar ahora")
        );
        assert_eq!(resolver.metrics().cache_hits(), 1);
    }

    #[test]
    fn test_unknown_text_misses() {
        let resolver = resolver_with(GatedProvider::open(), "es");
        assert_eq!(resolver.resolve_cached("Hidden gems", locale("es")), None);
        assert_eq!(resolver.metrics().cache_misses(), 1);
    }

    // ==================== translate Tests ====================

    #[tokio::test]
    async fn test_translate_fetches_and_caches() {
        let provider = GatedProvider::open();
        let resolver = resolver_with(provider.clone(), "fr");

        let first = resolver.translate("Hidden gems", locale("fr")).await;
        let second = resolver.translate("Hidden gems", locale("fr")).await;

        assert_eq!(first, "[fr] Hidden gems");
        assert_eq!(second, first);
        assert_eq!(provider.calls(), 1);
        assert_eq!(
            resolver.cache().lookup("Hidden gems", "fr").as_deref(),
            Some("[fr] Hidden gems")
        );
        settle(&resolver).await;
    }

    #[tokio::test]
    async fn test_translate_failure_falls_back_to_source() {
        let provider = GatedProvider::failing();
        let resolver = resolver_with(provider.clone(), "de");

        let result = resolver.translate("Hidden gems", locale("de")).await;

        assert_eq!(result, "Hidden gems");
        assert_eq!(resolver.cache().lookup("Hidden gems", "de"), None);
        assert_eq!(resolver.metrics().provider_failures(), 1);
        settle(&resolver).await;
    }

    #[tokio::test]
    async fn test_failed_translation_is_retried_on_next_request() {
        let provider = GatedProvider::failing();
        let resolver = resolver_with(provider.clone(), "de");

        resolver.translate("Hidden gems", locale("de")).await;
        settle(&resolver).await;
        resolver.translate("Hidden gems", locale("de")).await;

        assert_eq!(provider.calls(), 2);
    }

    // ==================== Single-flight Tests ====================

    #[tokio::test]
    async fn test_concurrent_requests_share_one_call() {
        let provider = GatedProvider::open();
        let resolver = resolver_with(provider.clone(), "fr");

        let results = futures::future::join_all(
            (0..10).map(|_| resolver.translate("Book Now", locale("fr"))),
        )
        .await;

        assert_eq!(provider.calls(), 1);
        assert!(results.iter().all(|r| r == "[fr] Book Now"));
        assert_eq!(resolver.metrics().deduplicated(), 9);
        settle(&resolver).await;
    }

    #[tokio::test]
    async fn test_same_text_different_locales_are_separate_flights() {
        let provider = GatedProvider::open();
        let resolver = resolver_with(provider.clone(), "fr");

        let (fr, pt) = tokio::join!(
            resolver.translate("Hidden gems", locale("fr")),
            resolver.translate("Hidden gems", locale("pt")),
        );

        assert_eq!(fr, "[fr] Hidden gems");
        assert_eq!(pt, "[pt] Hidden gems");
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_abandoned_flight_still_settles() {
        let provider = GatedProvider::closed();
        let resolver = resolver_with(provider.clone(), "it");

        let flight = resolver.fetch("Hidden gems", locale("it"));
        assert_eq!(resolver.session().pending_count(), 1);
        drop(flight);

        provider.gate.add_permits(1);
        settle(&resolver).await;

        assert_eq!(
            resolver.cache().lookup("Hidden gems", "it").as_deref(),
            Some("[it] Hidden gems")
        );
    }

    // ==================== Conflict Tests ====================

    #[tokio::test]
    async fn test_conflicting_provider_value_keeps_first() {
        let provider = GatedProvider::closed();
        let resolver = resolver_with(provider.clone(), "es");

        let flight = resolver.fetch("Hidden gems", locale("es"));
        // Another writer lands first while the provider call is outstanding
        resolver
            .cache()
            .store("Hidden gems", "es", "Joyas ocultas")
            .unwrap();
        provider.gate.add_permits(1);

        assert_eq!(flight.await, Ok("Joyas ocultas".to_string()));
        assert_eq!(resolver.metrics().cache_conflicts(), 1);
        assert_eq!(
            resolver.cache().lookup("Hidden gems", "es").as_deref(),
            Some("Joyas ocultas")
        );
        settle(&resolver).await;
    }
}
