use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Translation provider
    pub translation_api_url: Option<String>,
    pub translation_api_key: Option<String>,
    pub translation_timeout_secs: u64,

    // Durable preference store
    pub locale_store_path: PathBuf,
    pub locale_store_max_bytes: usize,

    // Client environment
    pub client_language: Option<String>,
    pub start_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Translation provider (offline when unset)
            translation_api_url: non_empty_var("TRANSLATION_API_URL"),
            translation_api_key: non_empty_var("TRANSLATION_API_KEY"),
            translation_timeout_secs: parse_var("TRANSLATION_TIMEOUT_SECS")?.unwrap_or(10),

            // Durable preference store
            locale_store_path: non_empty_var("LOCALE_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".locale-runtime/preferences.json")),
            locale_store_max_bytes: parse_var("LOCALE_STORE_MAX_BYTES")?.unwrap_or(4096),

            // Client language signal: explicit override, then POSIX LANG
            client_language: non_empty_var("CLIENT_LANGUAGE").or_else(|| non_empty_var("LANG")),
            start_path: non_empty_var("START_PATH").unwrap_or_else(|| "/".to_string()),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    non_empty_var(name)
        .map(|v| v.trim().parse::<T>())
        .transpose()
        .with_context(|| format!("{} must be a number", name))
}
