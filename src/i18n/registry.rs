//! Language registry: Single source of truth for all supported languages.
//!
//! This module provides a centralized registry of every language the resolver
//! translates into, together with the CLDR cardinal plural categories each of
//! them needs. It uses a singleton pattern with `OnceLock` to ensure
//! thread-safe initialization and access.

use std::sync::OnceLock;

/// Grammatical family used to phrase plural-category instructions in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralFamily {
    /// one / few / many / other with genitive forms (Russian, Polish)
    Slavic,
    /// zero / one / two / few / many / other (Arabic)
    Arabic,
    /// one / many / other where "many" covers large round numbers
    Romance,
    /// one / other, or no plural distinction at all
    Simple,
}

/// Configuration for a supported language.
///
/// Contains all metadata for a specific language, including its code, name,
/// enabled status, whether it's the canonical language, and its plural rules.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "ru", "pl")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Russian")
    pub name: &'static str,

    /// Whether this is the canonical/source language (only one should be true)
    pub is_canonical: bool,

    /// Whether this language is a generation target
    pub enabled: bool,

    /// Ordered CLDR cardinal plural categories
    pub plural_categories: &'static [&'static str],

    pub plural_family: PluralFamily,
}

/// Global language registry singleton.
///
/// Registry order is significant: it is the order in which the resolver fans
/// out generation for an entry.
#[derive(Debug)]
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

const ONE_OTHER: &[&str] = &["one", "other"];
const SLAVIC: &[&str] = &["one", "few", "many", "other"];
const ROMANCE: &[&str] = &["one", "many", "other"];
const ARABIC: &[&str] = &["zero", "one", "two", "few", "many", "other"];
const OTHER_ONLY: &[&str] = &["other"];

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Codes of every enabled target language, in fan-out order.
    ///
    /// The canonical language is the source of all translations and is never
    /// a target.
    pub fn language_codes(&self) -> Vec<&'static str> {
        self.list_targets().into_iter().map(|lang| lang.code).collect()
    }

    /// Ordered plural categories for a language.
    ///
    /// Unknown codes yield an empty list.
    pub fn plural_categories(&self, code: &str) -> &'static [&'static str] {
        self.get_by_code(code)
            .map(|lang| lang.plural_categories)
            .unwrap_or(&[])
    }

    /// Get all enabled, non-canonical languages.
    pub fn list_targets(&self) -> Vec<&LanguageConfig> {
        self.languages
            .iter()
            .filter(|lang| lang.enabled && !lang.is_canonical)
            .collect()
    }
}

fn language(
    code: &'static str,
    name: &'static str,
    plural_categories: &'static [&'static str],
    plural_family: PluralFamily,
) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        is_canonical: false,
        enabled: true,
        plural_categories,
        plural_family,
    }
}

/// Default language configurations.
///
/// English is canonical; Russian comes first among the targets because its
/// value doubles as the translation aid for the languages after it.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            is_canonical: true,
            enabled: true,
            plural_categories: ONE_OTHER,
            plural_family: PluralFamily::Simple,
        },
        language("ru", "Russian", SLAVIC, PluralFamily::Slavic),
        language("et", "Estonian", ONE_OTHER, PluralFamily::Simple),
        language("tr", "Turkish", ONE_OTHER, PluralFamily::Simple),
        language("pl", "Polish", SLAVIC, PluralFamily::Slavic),
        language("de", "German", ONE_OTHER, PluralFamily::Simple),
        language("fr", "French", ROMANCE, PluralFamily::Romance),
        language("zh", "Chinese", OTHER_ONLY, PluralFamily::Simple),
        language("hi", "Hindi", ONE_OTHER, PluralFamily::Simple),
        language("es", "Spanish", ROMANCE, PluralFamily::Romance),
        language("ar", "Arabic", ARABIC, PluralFamily::Arabic),
        language("bn", "Bengali", ONE_OTHER, PluralFamily::Simple),
        language("pt", "Portuguese", ROMANCE, PluralFamily::Romance),
    ]
}
