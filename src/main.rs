//! Resolve UI strings against the configured locale session.
//!
//! Usage:
//!   cargo run -- "Book Now" "Hidden gems"              # Translate into the startup locale
//!   cargo run -- --locale ar "Book Now"               # Switch locale first, then translate
//!
//! Optional environment variables:
//! - TRANSLATION_API_URL (offline, source text only, when unset)
//! - TRANSLATION_API_KEY
//! - LOCALE_STORE_PATH (defaults to .locale-runtime/preferences.json)
//! - CLIENT_LANGUAGE (defaults to LANG)
//! - START_PATH (defaults to /)

use anyhow::{bail, Result};
use locale_runtime::config::Config;
use locale_runtime::{
    FileStore, HeadlessDocument, HttpTranslationProvider, KeyValueStore, LocaleSession,
    OfflineProvider, TextResolver, TranslationCache, TranslationProvider, SEED_TRANSLATIONS,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Split arguments into an optional `--locale` and the texts to translate.
fn parse_args(args: &[String]) -> Result<(Option<String>, Vec<String>)> {
    let mut locale = None;
    let mut texts = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--locale" {
            match iter.next() {
                Some(code) => locale = Some(code.clone()),
                None => bail!("--locale requires a locale code"),
            }
        } else if let Some(code) = arg.strip_prefix("--locale=") {
            locale = Some(code.to_string());
        } else {
            texts.push(arg.clone());
        }
    }

    Ok((locale, texts))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_runtime=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (requested_locale, texts) = parse_args(&args)?;

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(
        &config.locale_store_path,
        config.locale_store_max_bytes,
    ));
    let document = Arc::new(HeadlessDocument::new(config.start_path.clone()));
    let session = Arc::new(LocaleSession::initialize(
        store,
        document.clone(),
        config.client_language.as_deref(),
    ));

    if let Some(code) = requested_locale {
        let target = session.select_locale(&code);
        println!("navigate: {}", target);
    }

    let provider: Arc<dyn TranslationProvider> = match &config.translation_api_url {
        Some(url) => Arc::new(HttpTranslationProvider::from_config(&config, url)?),
        None => {
            warn!("TRANSLATION_API_URL not set, uncached text stays in the source language");
            Arc::new(OfflineProvider)
        }
    };

    let resolver = TextResolver::new(
        session.clone(),
        Arc::new(TranslationCache::with_seed(SEED_TRANSLATIONS)),
        provider,
    );

    let locale = session.active_locale();
    info!(
        "Resolving {} texts in {} (dir={})",
        texts.len(),
        locale.name(),
        document.direction()
    );

    let translated =
        futures::future::join_all(texts.iter().map(|text| resolver.translate(text, locale))).await;
    for (source, text) in texts.iter().zip(translated) {
        println!("{} => {}", source, text);
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&resolver.metrics().report())?
    );
    Ok(())
}
