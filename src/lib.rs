//! Client-side translation and locale resolution runtime.
//!
//! Decides, for every piece of UI text, whether a translation is already known
//! (served from the cache) or must be fetched from a provider (served later,
//! with the source text shown meanwhile), and keeps the active locale, the
//! document direction and the URL consistent with each other.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use locale_runtime::{
//!     HeadlessDocument, LocaleSession, MemoryStore, OfflineProvider, TextResolver,
//!     TranslatedText, TranslationCache, SEED_TRANSLATIONS,
//! };
//!
//! # async fn demo() {
//! let session = Arc::new(LocaleSession::initialize(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(HeadlessDocument::new("/discover-trips")),
//!     Some("es-MX"),
//! ));
//! let resolver = TextResolver::new(
//!     session.clone(),
//!     Arc::new(TranslationCache::with_seed(SEED_TRANSLATIONS)),
//!     Arc::new(OfflineProvider),
//! );
//!
//! let button = TranslatedText::new(&resolver, "Book Now");
//! assert_eq!(button.display(), "Reservar ahora");
//!
//! session.select_locale("ar"); // navigates to /ar/discover-trips
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod i18n;
pub mod provider;
pub mod resolver;
pub mod router;
pub mod session;
pub mod storage;
pub mod text;
pub mod translation;

pub use cache::{StoreOutcome, TranslationCache};
pub use document::{DocumentHost, HeadlessDocument};
pub use error::{CacheConflict, LocaleError, ProviderError, StorageError};
pub use i18n::{Direction, Locale, SEED_TRANSLATIONS};
pub use provider::{OfflineProvider, TranslationProvider};
pub use resolver::TextResolver;
pub use session::LocaleSession;
pub use storage::{FileStore, KeyValueStore, MemoryStore, LOCALE_PREFERENCE_KEY};
pub use text::{TextState, TranslatedText};
pub use translation::HttpTranslationProvider;
