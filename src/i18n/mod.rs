//! Language metadata for the translation resolver.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages, their
//!   plural categories and plural families
//! - `language`: Type-safe Language type validated against the registry
//!
//! # Example
//!
//! ```rust,ignore
//! use hive_translations::i18n::{Language, LanguageRegistry};
//!
//! let polish = Language::from_code("pl")?;
//! assert_eq!(polish.plural_categories(), &["one", "few", "many", "other"]);
//!
//! let targets = LanguageRegistry::get().language_codes();
//! ```

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry, PluralFamily};
