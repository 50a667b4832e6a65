use crate::generation::{OpenAiSettings, DEFAULT_API_URL, DEFAULT_MODEL};
use crate::i18n::Language;
use crate::resolver::prompt::DEFAULT_DOMAIN;
use crate::resolver::ResolverConfig;
use anyhow::{bail, Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Environment
    pub env_id: String,
    pub database_url: String,

    // Generation
    pub generation_enabled: bool,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,
    pub openai_temperature: f32,
    pub generation_timeout: Duration,

    // Resolution
    pub translation_domain: String,
    pub aid_language: Option<Language>,
    pub languages: Vec<Language>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_id = var("ENV_ID").unwrap_or_else(|| "prod".to_string());

        let generation_enabled = match var("GENERATION_ENABLED") {
            Some(raw) => parse_bool(&raw).context("GENERATION_ENABLED must be a boolean")?,
            None => env_id == "dev",
        };

        let openai_api_key = var("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());
        if generation_enabled && openai_api_key.is_none() {
            bail!("OPENAI_API_KEY not set (required when generation is enabled)");
        }

        let config = Self {
            database_url: var("DATABASE_URL").context("DATABASE_URL not set")?,
            env_id,

            generation_enabled,
            openai_api_key,
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_api_url: var("OPENAI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            openai_temperature: match var("OPENAI_TEMPERATURE") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("OPENAI_TEMPERATURE is not a number: {}", raw))?,
                None => 0.2,
            },
            generation_timeout: match var("GENERATION_TIMEOUT_SECS") {
                Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().with_context(|| {
                    format!("GENERATION_TIMEOUT_SECS is not a whole number: {}", raw)
                })?),
                None => Duration::from_secs(30),
            },

            translation_domain: var("TRANSLATION_DOMAIN")
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            aid_language: match var("TRANSLATION_AID_LANGUAGE") {
                Some(code) if code.trim().is_empty() => None,
                Some(code) => Some(
                    parse_target(code.trim()).context("Invalid TRANSLATION_AID_LANGUAGE")?,
                ),
                None => Some(Language::RUSSIAN),
            },
            languages: match var("TRANSLATION_LANGUAGES") {
                Some(list) => parse_languages(&list).context("Invalid TRANSLATION_LANGUAGES")?,
                None => Language::targets(),
            },
        };

        Ok(config)
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            generation_enabled: self.generation_enabled,
            languages: self.languages.clone(),
            domain: self.translation_domain.clone(),
            aid_language: self.aid_language,
        }
    }

    /// Settings for the OpenAI generator. Fails when no API key is configured.
    pub fn openai_settings(&self) -> Result<OpenAiSettings> {
        let api_key = self
            .openai_api_key
            .clone()
            .context("OPENAI_API_KEY not set")?;

        Ok(OpenAiSettings {
            api_key,
            model: self.openai_model.clone(),
            api_url: self.openai_api_url.clone(),
            temperature: self.openai_temperature,
            timeout: self.generation_timeout,
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected true or false, got '{}'", other),
    }
}

fn parse_target(code: &str) -> Result<Language> {
    let language = Language::from_code(code)?;
    if language.is_canonical() {
        bail!("'{}' is the source language, not a translation target", code);
    }
    Ok(language)
}

/// Comma-separated target codes, duplicates removed, order kept.
fn parse_languages(list: &str) -> Result<Vec<Language>> {
    let mut languages = Vec::new();
    for code in list.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let language = parse_target(code)?;
        if !languages.contains(&language) {
            languages.push(language);
        }
    }
    if languages.is_empty() {
        bail!("no target languages given");
    }
    Ok(languages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    const VARS: [&str; 11] = [
        "ENV_ID",
        "DATABASE_URL",
        "GENERATION_ENABLED",
        "OPENAI_API_KEY",
        "OPENAI_MODEL",
        "OPENAI_API_URL",
        "OPENAI_TEMPERATURE",
        "GENERATION_TIMEOUT_SECS",
        "TRANSLATION_DOMAIN",
        "TRANSLATION_AID_LANGUAGE",
        "TRANSLATION_LANGUAGES",
    ];

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    fn clear_env() {
        for name in VARS {
            std::env::remove_var(name);
        }
    }

    // ==================== Defaults ====================

    #[test]
    fn test_defaults_with_only_database_url() {
        let config = from_pairs(&[("DATABASE_URL", "postgres://localhost/hive")])
            .expect("Should load");

        assert_eq!(config.env_id, "prod");
        assert!(!config.generation_enabled);
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.openai_api_url, DEFAULT_API_URL);
        assert!((config.openai_temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
        assert_eq!(config.translation_domain, DEFAULT_DOMAIN);
        assert_eq!(config.aid_language, Some(Language::RUSSIAN));
        assert_eq!(config.languages, Language::targets());
    }

    #[test]
    fn test_missing_database_url_is_error() {
        let err = from_pairs(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    // ==================== Generation Mode ====================

    #[test]
    fn test_dev_env_enables_generation() {
        let config = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/hive"),
            ("ENV_ID", "dev"),
            ("OPENAI_API_KEY", "sk-test"),
        ])
        .expect("Should load");

        assert!(config.generation_enabled);
        assert!(config.resolver_config().generation_enabled);
    }

    #[test]
    fn test_explicit_flag_overrides_env_id() {
        let config = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/hive"),
            ("ENV_ID", "dev"),
            ("GENERATION_ENABLED", "false"),
        ])
        .expect("Should load");

        assert!(!config.generation_enabled);
    }

    #[test]
    fn test_generation_without_api_key_is_error() {
        let err = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/hive"),
            ("GENERATION_ENABLED", "true"),
        ])
        .unwrap_err();

        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_invalid_boolean_is_error() {
        let result = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/hive"),
            ("GENERATION_ENABLED", "sometimes"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_openai_settings() {
        let config = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/hive"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "o3-mini"),
            ("OPENAI_TEMPERATURE", "0.5"),
            ("GENERATION_TIMEOUT_SECS", "5"),
        ])
        .expect("Should load");

        let settings = config.openai_settings().expect("Should have settings");
        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.model, "o3-mini");
        assert!((settings.temperature - 0.5).abs() < f32::EPSILON);
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_malformed_numbers_are_errors() {
        let timeout = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/hive"),
            ("GENERATION_TIMEOUT_SECS", "soon"),
        ])
        .unwrap_err();
        assert!(format!("{:#}", timeout).contains("GENERATION_TIMEOUT_SECS"));

        let temperature = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/hive"),
            ("OPENAI_TEMPERATURE", "warm"),
        ])
        .unwrap_err();
        assert!(format!("{:#}", temperature).contains("OPENAI_TEMPERATURE"));
    }

    #[test]
    fn test_openai_settings_without_key_is_error() {
        let config = from_pairs(&[("DATABASE_URL", "postgres://localhost/hive")])
            .expect("Should load");
        assert!(config.openai_settings().is_err());
    }

    // ==================== Languages ====================

    #[test]
    fn test_language_list_keeps_order_and_drops_duplicates() {
        let config = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/hive"),
            ("TRANSLATION_LANGUAGES", " de, fr ,de,,ru"),
        ])
        .expect("Should load");

        let codes: Vec<&str> = config.languages.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec!["de", "fr", "ru"]);
    }

    #[test]
    fn test_unknown_language_is_error() {
        let result = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/hive"),
            ("TRANSLATION_LANGUAGES", "de,xx"),
        ]);
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("xx"));
    }

    #[test]
    fn test_source_language_is_not_a_target() {
        let result = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/hive"),
            ("TRANSLATION_LANGUAGES", "en,de"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_aid_language_disables_aid() {
        let config = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/hive"),
            ("TRANSLATION_AID_LANGUAGE", ""),
            ("TRANSLATION_DOMAIN", "honey shop"),
        ])
        .expect("Should load");

        let resolver_config = config.resolver_config();
        assert!(resolver_config.aid_language.is_none());
        assert_eq!(resolver_config.domain, "honey shop");
    }

    // ==================== Process Environment ====================

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/hive_test");
        std::env::set_var("TRANSLATION_LANGUAGES", "pl");

        let config = Config::from_env().expect("Should load");
        assert_eq!(config.database_url, "postgres://localhost/hive_test");
        assert_eq!(config.languages, vec![Language::from_code("pl").expect("pl")]);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_database_url() {
        clear_env();
        assert!(Config::from_env().is_err());
    }
}
