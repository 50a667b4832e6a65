//! Language type: Flexible, validated language representation.
//!
//! A `Language` can only be built from a code the registry knows, so code
//! paths holding one never need to handle "unknown language" again.

use crate::i18n::{LanguageConfig, LanguageRegistry, PluralFamily};
use anyhow::{bail, Result};

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "ru")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const RUSSIAN: Language = Language { code: "ru" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    ///
    /// # Example
    /// ```ignore
    /// let polish = Language::from_code("pl")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Every enabled target language, in fan-out order.
    pub fn targets() -> Vec<Language> {
        LanguageRegistry::get()
            .language_codes()
            .into_iter()
            .map(|code| Language { code })
            .collect()
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// Returns `None` only for a `Language` built from a constant that was
    /// later removed from the registry.
    pub fn config(&self) -> Option<&'static LanguageConfig> {
        LanguageRegistry::get().get_by_code(self.code)
    }

    /// Get the English name of the language, falling back to the code.
    pub fn name(&self) -> &'static str {
        self.config().map(|c| c.name).unwrap_or(self.code)
    }

    /// Ordered plural categories this language requires.
    pub fn plural_categories(&self) -> &'static [&'static str] {
        LanguageRegistry::get().plural_categories(self.code)
    }

    pub fn plural_family(&self) -> PluralFamily {
        self.config()
            .map(|c| c.plural_family)
            .unwrap_or(PluralFamily::Simple)
    }

    /// Check if this is the canonical language.
    pub fn is_canonical(&self) -> bool {
        self.config().map(|c| c.is_canonical).unwrap_or(false)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}
