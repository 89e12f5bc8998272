//! Locale catalog data.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales and their metadata
//! - `locale`: Validated `Locale` handle and `Direction`
//! - `seed`: Translations bundled with the binary
//! - `metrics`: Translation observability counters
//!
//! # Example
//!
//! ```rust
//! use locale_runtime::i18n::{Direction, Locale};
//!
//! let arabic = Locale::from_code("ar").unwrap();
//! assert_eq!(arabic.direction(), Direction::Rtl);
//!
//! let canonical = Locale::canonical();
//! assert_eq!(canonical.code(), "en");
//! ```

mod locale;
mod metrics;
mod registry;
mod seed;

pub use locale::{Direction, Locale};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use seed::{SeedEntry, SEED_TRANSLATIONS};
