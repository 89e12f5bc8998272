//! Error types for the locale runtime.
//!
//! None of these reach the UI layer. The resolver and session absorb them,
//! log them and fall back (default locale, source text, in-memory only).

use thiserror::Error;

/// Locale lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The code is not in the locale catalog.
    #[error("Unknown locale code: '{0}'")]
    NotFound(String),
}

/// Translation provider failure.
///
/// Cloneable so a single provider result can be handed to every caller that
/// joined the same in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Connectivity loss, backend rejection or an unusable response.
    #[error("Translation provider unavailable: {0}")]
    Unavailable(String),

    /// The backend asked us to slow down (HTTP 429).
    #[error("Translation provider rate limited")]
    RateLimited,
}

/// A store for `(text, locale)` carried a different value than the cached one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cache conflict for {locale:?} translation of {source_text:?}: kept {existing:?}, rejected {rejected:?}")]
pub struct CacheConflict {
    pub source_text: String,
    pub locale: String,
    pub existing: String,
    pub rejected: String,
}

/// Durable key/value store failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store refused the write (quota, permissions, ...).
    #[error("Storage write failed for key '{key}': {reason}")]
    WriteFailure { key: String, reason: String },

    /// The value exceeds the store's per-value size bound.
    #[error("Value for key '{key}' is {size} bytes, limit is {limit}")]
    ValueTooLarge {
        key: String,
        size: usize,
        limit: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
