//! Translation provider abstraction.

use crate::error::ProviderError;
use async_trait::async_trait;

/// Backend that translates source text into a target locale.
///
/// Implementations perform I/O and may be slow or unreliable. Callers never
/// retry; a failed translation is requested again the next time the text is
/// resolved.
#[async_trait]
pub trait TranslationProvider: Send + Sync + 'static {
    async fn translate(&self, text: &str, target_locale: &str) -> Result<String, ProviderError>;
}

/// Provider used when no translation backend is configured.
///
/// Every call fails, so every uncached text falls back to its source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineProvider;

#[async_trait]
impl TranslationProvider for OfflineProvider {
    async fn translate(&self, _text: &str, _target_locale: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable(
            "no translation backend configured".to_string(),
        ))
    }
}
