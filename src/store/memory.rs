use crate::error::StoreError;
use crate::model::{PluralForms, TranslationEntry, TranslationId};
use crate::store::{default_plural_rules, PluralRow, TranslationStore, ValueRow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Number of calls made to each store operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub find_by_key: usize,
    pub find_by_source: usize,
    pub find_many_by_keys: usize,
    pub find_many_by_source: usize,
    pub create_entry: usize,
    pub get_value: usize,
    pub set_value: usize,
    pub values_for: usize,
    pub has_plural_forms: usize,
    pub get_plural_forms: usize,
    pub set_plural_forms: usize,
    pub plural_forms_for: usize,
    pub plural_rules: usize,
}

impl StoreCalls {
    pub fn total(&self) -> usize {
        self.find_by_key
            + self.find_by_source
            + self.find_many_by_keys
            + self.find_many_by_source
            + self.create_entry
            + self.get_value
            + self.set_value
            + self.values_for
            + self.has_plural_forms
            + self.get_plural_forms
            + self.set_plural_forms
            + self.plural_forms_for
            + self.plural_rules
    }

    /// Calls that only read.
    pub fn reads(&self) -> usize {
        self.total() - self.create_entry - self.set_value - self.set_plural_forms
    }
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    entries: Vec<TranslationEntry>,
    values: HashMap<(TranslationId, String), (Option<String>, DateTime<Utc>)>,
    plurals: HashMap<(TranslationId, String), PluralForms>,
    rules: HashMap<String, Vec<String>>,
    calls: StoreCalls,
}

/// In-process store with the same contract as the PostgreSQL adapter.
///
/// Keys are unique (a conflicting insert is ignored); source texts are not.
/// Every operation yields to the scheduler once, so concurrent resolutions
/// interleave the way they would against a real database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    drop_inserts: AtomicBool,
    fail_creates: AtomicBool,
    fail_queries: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_entry` report success without storing anything.
    pub fn drop_inserts(&self, enabled: bool) {
        self.drop_inserts.store(enabled, Ordering::SeqCst);
    }

    /// Make `create_entry` fail with [`StoreError::Unavailable`] while reads
    /// keep working.
    pub fn fail_creates(&self, enabled: bool) {
        self.fail_creates.store(enabled, Ordering::SeqCst);
    }

    /// Make every operation fail with [`StoreError::Unavailable`].
    pub fn fail_queries(&self, enabled: bool) {
        self.fail_queries.store(enabled, Ordering::SeqCst);
    }

    pub fn calls(&self) -> StoreCalls {
        self.state().calls
    }

    pub fn reset_calls(&self) {
        self.state().calls = StoreCalls::default();
    }

    pub fn entry_count(&self) -> usize {
        self.state().entries.len()
    }

    /// All rows sharing a source text (more than one after a creation race).
    pub fn entries_with_source(&self, text: &str) -> Vec<TranslationEntry> {
        self.state()
            .entries
            .iter()
            .filter(|e| e.source_text == text)
            .cloned()
            .collect()
    }

    /// Insert a row directly, bypassing call accounting. Returns its id.
    pub fn insert_entry(
        &self,
        key: Option<&str>,
        source_text: &str,
        context: Option<&str>,
    ) -> TranslationId {
        let mut state = self.state();
        push_entry(&mut state, key, context, source_text)
    }

    /// Store a value directly, bypassing call accounting.
    pub fn insert_value(&self, id: TranslationId, lang: &str, value: &str) {
        self.state()
            .values
            .insert((id, lang.to_string()), (Some(value.to_string()), Utc::now()));
    }

    /// Store a plural bundle directly, bypassing call accounting.
    pub fn insert_plural_forms(&self, id: TranslationId, lang: &str, forms: PluralForms) {
        self.state().plurals.insert((id, lang.to_string()), forms);
    }

    /// Override the plural categories used for a language.
    pub fn set_plural_rules(&self, lang: &str, forms: &[&str]) {
        self.state().rules.insert(
            lang.to_string(),
            forms.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Current value without call accounting.
    pub fn value(&self, id: TranslationId, lang: &str) -> Option<String> {
        self.state()
            .values
            .get(&(id, lang.to_string()))
            .and_then(|(value, _)| value.clone())
    }

    /// Current plural bundle without call accounting.
    pub fn plural_forms(&self, id: TranslationId, lang: &str) -> Option<PluralForms> {
        self.state().plurals.get(&(id, lang.to_string())).cloned()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulated round trip: yield, check the failure switch, count the call.
    async fn begin(&self, count: fn(&mut StoreCalls)) -> Result<(), StoreError> {
        tokio::task::yield_now().await;
        count(&mut self.state().calls);
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "memory store is failing queries".to_string(),
            ));
        }
        Ok(())
    }
}

fn push_entry(
    state: &mut State,
    key: Option<&str>,
    context: Option<&str>,
    source_text: &str,
) -> TranslationId {
    state.next_id += 1;
    let id = TranslationId(state.next_id);
    state.entries.push(TranslationEntry {
        id,
        key: key.map(str::to_string),
        source_text: source_text.to_string(),
        context: context.map(str::to_string),
    });
    id
}

#[async_trait]
impl TranslationStore for MemoryStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<TranslationEntry>, StoreError> {
        self.begin(|c| c.find_by_key += 1).await?;
        let state = self.state();
        let exact = state.entries.iter().find(|e| e.key.as_deref() == Some(key));
        let folded = || {
            let lowered = key.to_lowercase();
            state
                .entries
                .iter()
                .find(|e| e.key.as_deref().map(str::to_lowercase).as_deref() == Some(lowered.as_str()))
        };
        Ok(exact.or_else(folded).cloned())
    }

    async fn find_by_source(&self, text: &str) -> Result<Option<TranslationEntry>, StoreError> {
        self.begin(|c| c.find_by_source += 1).await?;
        Ok(self
            .state()
            .entries
            .iter()
            .find(|e| e.source_text == text)
            .cloned())
    }

    async fn find_many_by_keys(
        &self,
        keys: &[String],
    ) -> Result<Vec<TranslationEntry>, StoreError> {
        self.begin(|c| c.find_many_by_keys += 1).await?;
        let lowered: Vec<String> = keys.iter().map(|k| k.to_lowercase()).collect();
        Ok(self
            .state()
            .entries
            .iter()
            .filter(|e| {
                e.key
                    .as_deref()
                    .is_some_and(|k| lowered.contains(&k.to_lowercase()))
            })
            .cloned()
            .collect())
    }

    async fn find_many_by_source(
        &self,
        texts: &[String],
    ) -> Result<Vec<TranslationEntry>, StoreError> {
        self.begin(|c| c.find_many_by_source += 1).await?;
        Ok(self
            .state()
            .entries
            .iter()
            .filter(|e| texts.contains(&e.source_text))
            .cloned()
            .collect())
    }

    async fn create_entry(
        &self,
        key: Option<&str>,
        context: Option<&str>,
        source_text: &str,
    ) -> Result<(), StoreError> {
        self.begin(|c| c.create_entry += 1).await?;
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("insert failed".to_string()));
        }
        if self.drop_inserts.load(Ordering::SeqCst) {
            return Ok(());
        }

        let mut state = self.state();
        let conflict = key.is_some() && state.entries.iter().any(|e| e.key.as_deref() == key);
        if !conflict {
            push_entry(&mut state, key, context, source_text);
        }
        Ok(())
    }

    async fn get_value(
        &self,
        id: TranslationId,
        lang: &str,
    ) -> Result<Option<String>, StoreError> {
        self.begin(|c| c.get_value += 1).await?;
        Ok(self.value(id, lang))
    }

    async fn set_value(
        &self,
        id: TranslationId,
        lang: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.begin(|c| c.set_value += 1).await?;
        self.state()
            .values
            .insert((id, lang.to_string()), (Some(value.to_string()), Utc::now()));
        Ok(())
    }

    async fn values_for(&self, ids: &[TranslationId]) -> Result<Vec<ValueRow>, StoreError> {
        self.begin(|c| c.values_for += 1).await?;
        Ok(self
            .state()
            .values
            .iter()
            .filter(|((id, _), _)| ids.contains(id))
            .map(|((id, lang), (value, updated_at))| ValueRow {
                translation_id: *id,
                lang: lang.clone(),
                value: value.clone(),
                updated_at: *updated_at,
            })
            .collect())
    }

    async fn has_plural_forms(&self, id: TranslationId) -> Result<bool, StoreError> {
        self.begin(|c| c.has_plural_forms += 1).await?;
        Ok(self.state().plurals.keys().any(|(owner, _)| *owner == id))
    }

    async fn get_plural_forms(
        &self,
        id: TranslationId,
        lang: &str,
    ) -> Result<Option<PluralForms>, StoreError> {
        self.begin(|c| c.get_plural_forms += 1).await?;
        Ok(self.plural_forms(id, lang))
    }

    async fn set_plural_forms(
        &self,
        id: TranslationId,
        lang: &str,
        forms: &PluralForms,
    ) -> Result<(), StoreError> {
        self.begin(|c| c.set_plural_forms += 1).await?;
        self.state()
            .plurals
            .insert((id, lang.to_string()), forms.clone());
        Ok(())
    }

    async fn plural_forms_for(
        &self,
        ids: &[TranslationId],
    ) -> Result<Vec<PluralRow>, StoreError> {
        self.begin(|c| c.plural_forms_for += 1).await?;
        Ok(self
            .state()
            .plurals
            .iter()
            .filter(|((id, _), _)| ids.contains(id))
            .map(|((id, lang), forms)| PluralRow {
                translation_id: *id,
                lang: lang.clone(),
                forms: forms.clone(),
            })
            .collect())
    }

    async fn plural_rules(&self, lang: &str) -> Result<Vec<String>, StoreError> {
        self.begin(|c| c.plural_rules += 1).await?;
        Ok(self
            .state()
            .rules
            .get(lang)
            .cloned()
            .unwrap_or_else(default_plural_rules))
    }
}
