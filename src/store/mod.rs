//! Persistence for translation entries, singular values and plural bundles.
//!
//! The resolver talks to the store only through [`TranslationStore`], so the
//! PostgreSQL adapter used in deployments and the in-memory adapter used in
//! tests are interchangeable.

pub mod memory;
pub mod postgres;

use crate::error::StoreError;
use crate::model::{PluralForms, TranslationEntry, TranslationId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use memory::{MemoryStore, StoreCalls};
pub use postgres::PgTranslationStore;

/// Plural categories assumed when a language has no override row.
pub const DEFAULT_PLURAL_RULES: [&str; 2] = ["one", "other"];

/// One singular value row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRow {
    pub translation_id: TranslationId,
    pub lang: String,
    /// `None` until generated
    pub value: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// One plural bundle row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRow {
    pub translation_id: TranslationId,
    pub lang: String,
    pub forms: PluralForms,
}

/// Key-value persistence behind the resolver.
///
/// Every method is a single round trip. Failures propagate; retry policy
/// belongs to the caller.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// Exact key match, then a case-insensitive fallback.
    async fn find_by_key(&self, key: &str) -> Result<Option<TranslationEntry>, StoreError>;

    /// Exact source-text match. Never case-insensitive.
    async fn find_by_source(&self, text: &str) -> Result<Option<TranslationEntry>, StoreError>;

    /// Entries whose key matches any of `keys`, compared case-insensitively.
    async fn find_many_by_keys(&self, keys: &[String])
        -> Result<Vec<TranslationEntry>, StoreError>;

    /// Entries whose source text exactly matches any of `texts`.
    async fn find_many_by_source(
        &self,
        texts: &[String],
    ) -> Result<Vec<TranslationEntry>, StoreError>;

    /// Insert an identifying row. Does not return the id: callers re-read
    /// through the lookup path that missed. A conflicting key is ignored.
    async fn create_entry(
        &self,
        key: Option<&str>,
        context: Option<&str>,
        source_text: &str,
    ) -> Result<(), StoreError>;

    async fn get_value(&self, id: TranslationId, lang: &str)
        -> Result<Option<String>, StoreError>;

    /// Insert, or on conflict update the value and refresh `updated_at`.
    async fn set_value(&self, id: TranslationId, lang: &str, value: &str)
        -> Result<(), StoreError>;

    /// Every value row for the given entries.
    async fn values_for(&self, ids: &[TranslationId]) -> Result<Vec<ValueRow>, StoreError>;

    async fn has_plural_forms(&self, id: TranslationId) -> Result<bool, StoreError>;

    async fn get_plural_forms(
        &self,
        id: TranslationId,
        lang: &str,
    ) -> Result<Option<PluralForms>, StoreError>;

    /// Same upsert discipline as [`TranslationStore::set_value`].
    async fn set_plural_forms(
        &self,
        id: TranslationId,
        lang: &str,
        forms: &PluralForms,
    ) -> Result<(), StoreError>;

    /// Every plural bundle for the given entries.
    async fn plural_forms_for(&self, ids: &[TranslationId])
        -> Result<Vec<PluralRow>, StoreError>;

    /// Override categories for a language, or [`DEFAULT_PLURAL_RULES`].
    async fn plural_rules(&self, lang: &str) -> Result<Vec<String>, StoreError>;
}

pub(crate) fn default_plural_rules() -> Vec<String> {
    DEFAULT_PLURAL_RULES.iter().map(|s| s.to_string()).collect()
}
