use crate::config::Config;
use crate::error::ProviderError;
use crate::provider::TranslationProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Translation request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslationRequest<'a> {
    text: &'a str,
    target_locale: &'a str,
}

/// Translation response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationResponse {
    translated_text: String,
}

/// Provider backed by an HTTP translation endpoint.
///
/// Sends `POST { text, targetLocale }` and expects `{ translatedText }`.
#[derive(Debug, Clone)]
pub struct HttpTranslationProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl HttpTranslationProvider {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key,
        }
    }

    /// Build a provider for `api_url` with the configured key and timeout.
    pub fn from_config(config: &Config, api_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.translation_timeout_secs))
            .build()
            .context("Failed to build translation HTTP client")?;

        Ok(Self::new(client, api_url, config.translation_api_key.clone()))
    }
}

#[async_trait]
impl TranslationProvider for HttpTranslationProvider {
    async fn translate(&self, text: &str, target_locale: &str) -> Result<String, ProviderError> {
        let request = TranslationRequest {
            text,
            target_locale,
        };

        let mut builder = self.client.post(&self.api_url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder.send().await.map_err(|e| {
            ProviderError::Unavailable(format!("Failed to send translation request: {}", e))
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ProviderError::Unavailable(format!(
                "Translation API error ({}): {}",
                status, body
            )));
        }

        let parsed: TranslationResponse = response.json().await.map_err(|e| {
            ProviderError::Unavailable(format!("Failed to parse translation response: {}", e))
        })?;

        if parsed.translated_text.trim().is_empty() {
            return Err(ProviderError::Unavailable(
                "Translation response contained no text".to_string(),
            ));
        }

        debug!("Translated {:?} to {}", text, target_locale);
        Ok(parsed.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn provider_for(server: &MockServer, api_key: Option<&str>) -> HttpTranslationProvider {
        HttpTranslationProvider::new(
            reqwest::Client::new(),
            format!("{}/v1/translate", server.uri()),
            api_key.map(str::to_string),
        )
    }

    // ==================== Request Structure Tests ====================

    #[test]
    fn test_translation_request_serialization() {
        let request = TranslationRequest {
            text: "Book Now",
            target_locale: "fr",
        };

        let json = serde_json::to_value(&request).expect("Should serialize");
        assert_eq!(
            json,
            serde_json::json!({ "text": "Book Now", "targetLocale": "fr" })
        );
    }

    #[test]
    fn test_translation_response_deserialization() {
        let json = r#"{"translatedText": "Réserver", "detectedLanguage": "en"}"#;
        let response: TranslationResponse = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(response.translated_text, "Réserver");
    }

    // ==================== Integration Tests with Wiremock ====================

    #[tokio::test]
    async fn test_translate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/translate"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_json(
                serde_json::json!({ "text": "Book Now", "targetLocale": "fr" }),
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "translatedText": "Réserver" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, Some("test-key"));
        let result = provider.translate("Book Now", "fr").await;

        assert_eq!(result, Ok("Réserver".to_string()));
    }

    #[tokio::test]
    async fn test_translate_without_api_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/translate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "translatedText": "Hola" })),
            )
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, None);
        assert_eq!(provider.translate("Hello", "es").await.unwrap(), "Hola");
    }

    #[tokio::test]
    async fn test_translate_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/translate"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, None);
        let result = provider.translate("Hello", "es").await;

        assert_eq!(result, Err(ProviderError::RateLimited));
    }

    #[tokio::test]
    async fn test_translate_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/translate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, None);
        let err = provider.translate("Hello", "es").await.unwrap_err();

        match err {
            ProviderError::Unavailable(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("Internal Server Error"));
            }
            other => panic!("Expected Unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_translate_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, None);
        let result = provider.translate("Hello", "es").await;

        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_translate_empty_text_is_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/translate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "translatedText": "  " })),
            )
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server, None);
        let err = provider.translate("Hello", "es").await.unwrap_err();
        assert!(err.to_string().contains("no text"));
    }

    #[tokio::test]
    async fn test_translate_connection_refused() {
        // Nothing listens on port 9 locally
        let provider = HttpTranslationProvider::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/v1/translate",
            None,
        );
        let result = provider.translate("Hello", "es").await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }
}
