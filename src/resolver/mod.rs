//! Cache-aside resolution of translation requests.
//!
//! A request is looked up in the store; in generation mode a missing entry is
//! created and every missing language is generated, persisted and returned.
//! Without generation mode the resolver only reads.
//!
//! Per entry, languages are generated one at a time in generation order so
//! that a value in the aid language can be quoted in later prompts.

pub mod prompt;

use crate::error::{ResolveError, StoreError};
use crate::generation::TextGenerator;
use crate::i18n::{Language, LanguageRegistry};
use crate::model::{
    Identity, PluralForms, Resolved, ResolvedEntry, TranslationEntry, TranslationId,
    TranslationRequest,
};
use crate::observer::{ResolverEvent, ResolverObserver, TracingObserver};
use crate::store::TranslationStore;
use prompt::{Prompt, DEFAULT_DOMAIN};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// Fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Create missing entries and generate missing values
    pub generation_enabled: bool,
    /// Target languages, in registry order by default
    pub languages: Vec<Language>,
    /// Application domain named in prompts
    pub domain: String,
    /// Language whose known value is quoted when generating the others
    pub aid_language: Option<Language>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            generation_enabled: false,
            languages: Language::targets(),
            domain: DEFAULT_DOMAIN.to_string(),
            aid_language: Some(Language::RUSSIAN),
        }
    }
}

impl ResolverConfig {
    /// Defaults with generation mode on.
    pub fn generating() -> Self {
        Self {
            generation_enabled: true,
            ..Self::default()
        }
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_aid_language(mut self, aid_language: Option<Language>) -> Self {
        self.aid_language = aid_language;
        self
    }

    /// Configured languages without duplicates, the aid language first.
    pub fn generation_order(&self) -> Vec<Language> {
        let mut order: Vec<Language> = Vec::with_capacity(self.languages.len());
        if let Some(aid) = self.aid_language {
            if self.languages.contains(&aid) {
                order.push(aid);
            }
        }
        for language in &self.languages {
            if !order.contains(language) {
                order.push(*language);
            }
        }
        order
    }
}

/// Values and plural bundles currently known for one entry.
#[derive(Debug, Clone, Default)]
struct Translations {
    values: BTreeMap<String, String>,
    plurals: BTreeMap<String, PluralForms>,
}

pub struct Resolver {
    store: Arc<dyn TranslationStore>,
    generator: Arc<dyn TextGenerator>,
    observer: Arc<dyn ResolverObserver>,
    languages: Vec<Language>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(
        store: Arc<dyn TranslationStore>,
        generator: Arc<dyn TextGenerator>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            store,
            generator,
            observer: Arc::new(TracingObserver),
            languages: config.generation_order(),
            config,
        }
    }

    /// Replace the default [`TracingObserver`].
    pub fn with_observer(mut self, observer: Arc<dyn ResolverObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Target languages in generation order.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Resolve one request.
    ///
    /// # Errors
    /// * [`ResolveError::NotFound`] when nothing is stored and generation is off
    /// * [`ResolveError::InconsistentCreate`] when a created entry cannot be read back
    /// * [`ResolveError::Store`] for any store failure
    ///
    /// Generation failures are not errors: the language is left out.
    pub async fn resolve(&self, request: &TranslationRequest) -> Result<ResolvedEntry, ResolveError> {
        let entry = match self.lookup(&request.identity).await? {
            Some(entry) => {
                self.emit(ResolverEvent::CacheHit {
                    identity: request.identity.clone(),
                    id: entry.id,
                });
                entry
            }
            None => {
                self.emit(ResolverEvent::CacheMiss {
                    identity: request.identity.clone(),
                });
                if !self.config.generation_enabled {
                    return Err(ResolveError::NotFound(request.identity.clone()));
                }
                self.create(request).await?
            }
        };

        let plural = request.is_plural || self.store.has_plural_forms(entry.id).await?;
        let mut current = self.read_one(entry.id).await?;

        if self.config.generation_enabled {
            let context = entry.context.as_deref().or(request.context.as_deref());
            if self.fill(&entry, context, plural, &mut current).await? {
                current = self.read_one(entry.id).await?;
            }
        }

        Ok(self.assemble(entry, plural, current))
    }

    /// Resolve many requests with one lookup per identity kind.
    ///
    /// The response follows request order and multiplicity. Requests that end
    /// up without an entry are left out rather than failing the batch.
    ///
    /// Output shape is decided per entry, as in [`Resolver::resolve`]: an
    /// entry is plural when any request for it asks for plurals or it already
    /// has a bundle. A singular request sharing its identity with a plural one
    /// therefore receives `plurals` too.
    ///
    /// # Errors
    /// * [`ResolveError::Store`] for any store failure, creation included
    ///
    /// An entry that was inserted but cannot be read back only drops its
    /// requests.
    pub async fn resolve_batch(
        &self,
        requests: &[TranslationRequest],
    ) -> Result<Vec<ResolvedEntry>, ResolveError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let unique = dedupe(requests);
        let mut found = self.batch_lookup(&unique).await?;
        for request in &unique {
            let event = match found.get(&request.identity.lookup_token()) {
                Some(entry) => ResolverEvent::CacheHit {
                    identity: request.identity.clone(),
                    id: entry.id,
                },
                None => ResolverEvent::CacheMiss {
                    identity: request.identity.clone(),
                },
            };
            self.emit(event);
        }

        if self.config.generation_enabled {
            for request in &unique {
                let token = request.identity.lookup_token();
                if found.contains_key(&token) {
                    continue;
                }
                match self.create(request).await {
                    Ok(entry) => {
                        found.insert(token, entry);
                    }
                    Err(error @ ResolveError::InconsistentCreate(_)) => {
                        self.emit(ResolverEvent::CreateFailed {
                            identity: request.identity.clone(),
                            reason: error.to_string(),
                        })
                    }
                    Err(error) => return Err(error),
                }
            }
        }

        let mut translations = self.read_translations(&distinct_ids(&found)).await?;

        if self.config.generation_enabled {
            let plural_ids = plural_ids(&unique, &found, &translations);
            let mut filled = HashSet::new();
            for request in &unique {
                let Some(entry) = found.get(&request.identity.lookup_token()) else {
                    continue;
                };
                if !filled.insert(entry.id) {
                    continue;
                }
                let context = entry.context.as_deref().or(request.context.as_deref());
                let current = translations.entry(entry.id).or_default();
                self.fill(entry, context, plural_ids.contains(&entry.id), current)
                    .await?;
            }

            found.extend(self.batch_lookup(&unique).await?);
            translations = self.read_translations(&distinct_ids(&found)).await?;
        }

        let plural_ids = plural_ids(&unique, &found, &translations);
        let mut resolved = Vec::with_capacity(requests.len());
        for request in requests {
            let Some(entry) = found.get(&request.identity.lookup_token()) else {
                self.emit(ResolverEvent::RequestDropped {
                    identity: request.identity.clone(),
                });
                continue;
            };
            let current = translations.get(&entry.id).cloned().unwrap_or_default();
            resolved.push(self.assemble(entry.clone(), plural_ids.contains(&entry.id), current));
        }

        Ok(resolved)
    }

    /// Plural categories to generate for a language.
    ///
    /// Store rules are kept in store order but restricted to categories the
    /// registry knows for the language; if nothing is left, the registry's
    /// categories are used.
    pub async fn plural_rules(&self, lang: &str) -> Result<Vec<String>, ResolveError> {
        Ok(self.rules_for(lang).await?)
    }

    async fn rules_for(&self, lang: &str) -> Result<Vec<String>, StoreError> {
        let known = LanguageRegistry::get().plural_categories(lang);
        let rules: Vec<String> = self
            .store
            .plural_rules(lang)
            .await?
            .into_iter()
            .filter(|category| known.contains(&category.as_str()))
            .collect();

        if rules.is_empty() {
            Ok(known.iter().map(|c| c.to_string()).collect())
        } else {
            Ok(rules)
        }
    }

    async fn lookup(&self, identity: &Identity) -> Result<Option<TranslationEntry>, StoreError> {
        match identity {
            Identity::Keyed(key) => self.store.find_by_key(key).await,
            Identity::BySource(text) => self.store.find_by_source(text).await,
        }
    }

    /// Insert the entry, then read it back through the path that missed.
    async fn create(&self, request: &TranslationRequest) -> Result<TranslationEntry, ResolveError> {
        self.store
            .create_entry(
                request.key(),
                request.context.as_deref(),
                &request.source_text,
            )
            .await?;

        let entry = self
            .lookup(&request.identity)
            .await?
            .ok_or_else(|| ResolveError::InconsistentCreate(request.identity.clone()))?;

        self.emit(ResolverEvent::EntryCreated {
            identity: request.identity.clone(),
            id: entry.id,
        });
        Ok(entry)
    }

    /// One lookup per identity kind, indexed by lookup token.
    async fn batch_lookup(
        &self,
        unique: &[TranslationRequest],
    ) -> Result<HashMap<String, TranslationEntry>, StoreError> {
        let mut keys = Vec::new();
        let mut texts = Vec::new();
        for request in unique {
            match &request.identity {
                Identity::Keyed(key) => keys.push(key.clone()),
                Identity::BySource(text) => texts.push(text.clone()),
            }
        }

        let mut found = HashMap::new();

        if !keys.is_empty() {
            let entries = self.store.find_many_by_keys(&keys).await?;
            for key in keys {
                if let Some(entry) = pick_by_key(&entries, &key) {
                    found.insert(Identity::Keyed(key).lookup_token(), entry.clone());
                }
            }
        }

        if !texts.is_empty() {
            let entries = self.store.find_many_by_source(&texts).await?;
            for text in texts {
                if let Some(entry) = pick_by_source(&entries, &text) {
                    found.insert(Identity::BySource(text).lookup_token(), entry.clone());
                }
            }
        }

        Ok(found)
    }

    async fn read_one(&self, id: TranslationId) -> Result<Translations, StoreError> {
        Ok(self
            .read_translations(&[id])
            .await?
            .remove(&id)
            .unwrap_or_default())
    }

    async fn read_translations(
        &self,
        ids: &[TranslationId],
    ) -> Result<HashMap<TranslationId, Translations>, StoreError> {
        let mut translations: HashMap<TranslationId, Translations> = HashMap::new();
        if ids.is_empty() {
            return Ok(translations);
        }

        for row in self.store.values_for(ids).await? {
            if let Some(value) = row.value {
                translations
                    .entry(row.translation_id)
                    .or_default()
                    .values
                    .insert(row.lang, value);
            }
        }
        for row in self.store.plural_forms_for(ids).await? {
            translations
                .entry(row.translation_id)
                .or_default()
                .plurals
                .insert(row.lang, row.forms);
        }

        Ok(translations)
    }

    /// Generate and persist every language missing from `current`.
    ///
    /// Returns whether any language was missing.
    async fn fill(
        &self,
        entry: &TranslationEntry,
        context: Option<&str>,
        plural: bool,
        current: &mut Translations,
    ) -> Result<bool, StoreError> {
        let mut missing = false;

        for &language in &self.languages {
            let code = language.code();

            if plural {
                if current.plurals.contains_key(code) {
                    continue;
                }
                missing = true;
                let aid = self
                    .config
                    .aid_language
                    .and_then(|aid| current.plurals.get(aid.code()).cloned());
                if let Some(forms) = self
                    .generate_bundle(entry, context, language, aid.as_ref())
                    .await?
                {
                    self.store.set_plural_forms(entry.id, code, &forms).await?;
                    current.plurals.insert(code.to_string(), forms);
                }
            } else {
                if current.values.contains_key(code) {
                    continue;
                }
                missing = true;
                let aid = self.config.aid_language.and_then(|aid| {
                    current
                        .values
                        .get(aid.code())
                        .map(|value| (aid, value.clone()))
                });
                let prompt = Prompt::singular(&self.config.domain, &entry.source_text, language)
                    .with_context(context)
                    .with_aid(aid.as_ref().map(|(aid, value)| (*aid, value.as_str())))
                    .render();
                if let Some(value) = self.generate(entry.id, language, None, &prompt).await {
                    self.store.set_value(entry.id, code, &value).await?;
                    current.values.insert(code.to_string(), value);
                }
            }
        }

        Ok(missing)
    }

    /// Generate every category for one language, or nothing.
    async fn generate_bundle(
        &self,
        entry: &TranslationEntry,
        context: Option<&str>,
        language: Language,
        aid: Option<&PluralForms>,
    ) -> Result<Option<PluralForms>, StoreError> {
        let categories = self.rules_for(language.code()).await?;
        if categories.is_empty() {
            return Ok(None);
        }

        let mut forms = PluralForms::new();
        for category in &categories {
            let aid_form = self
                .config
                .aid_language
                .zip(aid.and_then(|bundle| bundle.get(category)))
                .map(|(aid, value)| (aid, value.as_str()));
            let prompt = Prompt::singular(&self.config.domain, &entry.source_text, language)
                .with_context(context)
                .with_category(category)
                .with_aid(aid_form)
                .render();

            match self
                .generate(entry.id, language, Some(category.as_str()), &prompt)
                .await
            {
                Some(text) => {
                    forms.insert(category.clone(), text);
                }
                None => {
                    self.emit(ResolverEvent::BundleIncomplete {
                        id: entry.id,
                        lang: language.code().to_string(),
                    });
                    return Ok(None);
                }
            }
        }

        Ok(Some(forms))
    }

    async fn generate(
        &self,
        id: TranslationId,
        language: Language,
        category: Option<&str>,
        prompt: &str,
    ) -> Option<String> {
        match self.generator.generate(prompt).await {
            Ok(text) => {
                self.emit(ResolverEvent::Generated {
                    id,
                    lang: language.code().to_string(),
                    category: category.map(str::to_string),
                });
                Some(text)
            }
            Err(error) => {
                self.emit(ResolverEvent::GenerationFailed {
                    id,
                    lang: language.code().to_string(),
                    category: category.map(str::to_string),
                    reason: error.to_string(),
                });
                None
            }
        }
    }

    fn assemble(&self, entry: TranslationEntry, plural: bool, current: Translations) -> ResolvedEntry {
        let wanted = |lang: &String| self.languages.iter().any(|l| l.code() == lang);

        let translations = if plural {
            Resolved::Plural(
                current
                    .plurals
                    .into_iter()
                    .filter(|(lang, _)| wanted(lang))
                    .collect(),
            )
        } else {
            Resolved::Singular(
                current
                    .values
                    .into_iter()
                    .filter(|(lang, _)| wanted(lang))
                    .collect(),
            )
        };

        ResolvedEntry {
            entry,
            translations,
        }
    }

    fn emit(&self, event: ResolverEvent) {
        self.observer.on_event(&event);
    }
}

/// Collapse requests sharing a lookup token, keeping first-occurrence order.
///
/// The first present context wins; the merged request is plural if any
/// duplicate is.
fn dedupe(requests: &[TranslationRequest]) -> Vec<TranslationRequest> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<TranslationRequest> = Vec::new();

    for request in requests {
        let token = request.identity.lookup_token();
        match positions.get(&token) {
            Some(&index) => {
                let merged = &mut unique[index];
                if merged.context.is_none() {
                    merged.context = request.context.clone();
                }
                merged.is_plural |= request.is_plural;
            }
            None => {
                positions.insert(token, unique.len());
                unique.push(request.clone());
            }
        }
    }

    unique
}

/// Exact key match first, then case-insensitive; lowest id wins.
fn pick_by_key<'a>(entries: &'a [TranslationEntry], key: &str) -> Option<&'a TranslationEntry> {
    let exact = entries
        .iter()
        .filter(|e| e.key.as_deref() == Some(key))
        .min_by_key(|e| e.id);

    exact.or_else(|| {
        let lowered = key.to_lowercase();
        entries
            .iter()
            .filter(|e| e.key.as_deref().is_some_and(|k| k.to_lowercase() == lowered))
            .min_by_key(|e| e.id)
    })
}

/// Lowest id among rows sharing the source text.
fn pick_by_source<'a>(entries: &'a [TranslationEntry], text: &str) -> Option<&'a TranslationEntry> {
    entries
        .iter()
        .filter(|e| e.source_text == text)
        .min_by_key(|e| e.id)
}

fn distinct_ids(found: &HashMap<String, TranslationEntry>) -> Vec<TranslationId> {
    let mut ids: Vec<TranslationId> = found.values().map(|e| e.id).collect();
    ids.sort();
    ids.dedup();
    ids
}

/// Entries resolved in plural shape: requested as plural, or already
/// holding a bundle.
fn plural_ids(
    unique: &[TranslationRequest],
    found: &HashMap<String, TranslationEntry>,
    translations: &HashMap<TranslationId, Translations>,
) -> HashSet<TranslationId> {
    let mut ids: HashSet<TranslationId> = translations
        .iter()
        .filter(|(_, t)| !t.plurals.is_empty())
        .map(|(id, _)| *id)
        .collect();

    for request in unique.iter().filter(|r| r.is_plural) {
        if let Some(entry) = found.get(&request.identity.lookup_token()) {
            ids.insert(entry.id);
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use proptest::prelude::*;

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Ok("echo".to_string())
        }
    }

    fn entry(id: i64, key: Option<&str>, source_text: &str) -> TranslationEntry {
        TranslationEntry {
            id: TranslationId(id),
            key: key.map(str::to_string),
            source_text: source_text.to_string(),
            context: None,
        }
    }

    fn resolver(store: Arc<MemoryStore>, config: ResolverConfig) -> Resolver {
        Resolver::new(store, Arc::new(EchoGenerator), config)
    }

    // ==================== Config Tests ====================

    #[test]
    fn test_default_config_is_read_only_over_all_targets() {
        let config = ResolverConfig::default();
        assert!(!config.generation_enabled);
        assert_eq!(config.languages.len(), 12);
        assert_eq!(config.domain, DEFAULT_DOMAIN);
        assert_eq!(config.aid_language, Some(Language::RUSSIAN));
        assert!(ResolverConfig::generating().generation_enabled);
    }

    #[test]
    fn test_generation_order_puts_aid_first() {
        let de = Language::from_code("de").expect("de");
        let fr = Language::from_code("fr").expect("fr");
        let config = ResolverConfig::default().with_languages(vec![de, fr, Language::RUSSIAN, de]);

        assert_eq!(config.generation_order(), vec![Language::RUSSIAN, de, fr]);
    }

    #[test]
    fn test_generation_order_without_aid_in_languages() {
        let de = Language::from_code("de").expect("de");
        let config = ResolverConfig::default().with_languages(vec![de]);

        assert_eq!(config.generation_order(), vec![de]);
    }

    // ==================== Dedupe Tests ====================

    #[test]
    fn test_dedupe_merges_context_and_plural() {
        let requests = vec![
            TranslationRequest::source("hive"),
            TranslationRequest::keyed("hive", "hive"),
            TranslationRequest::source("hive").with_context("noun").plural(),
            TranslationRequest::source("hive").with_context("verb"),
        ];

        let unique = dedupe(&requests);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].identity, Identity::BySource("hive".into()));
        assert_eq!(unique[0].context.as_deref(), Some("noun"));
        assert!(unique[0].is_plural);
        assert!(unique[1].identity.is_keyed());
        assert!(!unique[1].is_plural);
    }

    proptest! {
        #[test]
        fn prop_dedupe_keeps_one_request_per_token_in_first_order(
            texts in proptest::collection::vec("[a-c]{1,2}", 0..20)
        ) {
            let requests: Vec<TranslationRequest> =
                texts.iter().map(|t| TranslationRequest::source(t.as_str())).collect();
            let unique = dedupe(&requests);

            let mut expected: Vec<&String> = Vec::new();
            for text in &texts {
                if !expected.contains(&text) {
                    expected.push(text);
                }
            }
            let actual: Vec<&String> = unique.iter().map(|r| &r.source_text).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    // ==================== Lookup Selection Tests ====================

    #[test]
    fn test_pick_by_key_prefers_exact_match() {
        let entries = vec![entry(1, Some("Save"), "Save"), entry(2, Some("save"), "save")];

        assert_eq!(pick_by_key(&entries, "save").map(|e| e.id), Some(TranslationId(2)));
        assert_eq!(pick_by_key(&entries, "SAVE").map(|e| e.id), Some(TranslationId(1)));
        assert!(pick_by_key(&entries, "cancel").is_none());
    }

    #[test]
    fn test_pick_by_source_prefers_lowest_id() {
        let entries = vec![entry(9, None, "Save"), entry(4, None, "Save"), entry(1, None, "save")];

        assert_eq!(pick_by_source(&entries, "Save").map(|e| e.id), Some(TranslationId(4)));
    }

    // ==================== Plural Rules Tests ====================

    #[tokio::test]
    async fn test_plural_rules_intersect_store_with_registry() {
        let store = Arc::new(MemoryStore::new());
        store.set_plural_rules("ru", &["one", "few", "dual", "many", "other"]);
        let resolver = resolver(store, ResolverConfig::default());

        assert_eq!(
            resolver.plural_rules("ru").await.expect("rules"),
            vec!["one", "few", "many", "other"]
        );
    }

    #[tokio::test]
    async fn test_plural_rules_default_row_is_filtered() {
        let store = Arc::new(MemoryStore::new());
        let resolver = resolver(store, ResolverConfig::default());

        // No override row: ["one", "other"], and Chinese only knows "other"
        assert_eq!(resolver.plural_rules("de").await.expect("rules"), vec!["one", "other"]);
        assert_eq!(resolver.plural_rules("zh").await.expect("rules"), vec!["other"]);
    }

    #[tokio::test]
    async fn test_plural_rules_fall_back_to_registry() {
        let store = Arc::new(MemoryStore::new());
        store.set_plural_rules("ar", &["unknown"]);
        let resolver = resolver(store, ResolverConfig::default());

        assert_eq!(resolver.plural_rules("ar").await.expect("rules").len(), 6);
    }

    #[tokio::test]
    async fn test_plural_rules_unknown_language_is_empty() {
        let store = Arc::new(MemoryStore::new());
        let resolver = resolver(store, ResolverConfig::default());

        assert!(resolver.plural_rules("xx").await.expect("rules").is_empty());
    }

    #[tokio::test]
    async fn test_plural_rules_store_failure_propagates() {
        let store = Arc::new(MemoryStore::new());
        store.fail_queries(true);
        let resolver = resolver(store, ResolverConfig::default());

        let result = resolver.plural_rules("ru").await;
        assert!(matches!(result, Err(ResolveError::Store(_))));
    }

    // ==================== Assembly Tests ====================

    #[tokio::test]
    async fn test_output_is_limited_to_configured_languages() {
        let store = Arc::new(MemoryStore::new());
        let id = store.insert_entry(None, "Save", None);
        store.insert_value(id, "de", "Speichern");
        store.insert_value(id, "fr", "Enregistrer");

        let de = Language::from_code("de").expect("de");
        let resolver = resolver(store, ResolverConfig::default().with_languages(vec![de]));

        let resolved = resolver
            .resolve(&TranslationRequest::source("Save"))
            .await
            .expect("resolve");
        assert_eq!(resolved.translations.language_count(), 1);
        assert_eq!(resolved.translations.value("de"), Some("Speichern"));
    }

    #[test]
    fn test_plural_ids_from_request_or_bundle() {
        let found = HashMap::from([
            ("en:a".to_string(), entry(1, None, "a")),
            ("en:b".to_string(), entry(2, None, "b")),
            ("en:c".to_string(), entry(3, None, "c")),
        ]);
        let mut translations = HashMap::new();
        translations.insert(
            TranslationId(2),
            Translations {
                values: BTreeMap::new(),
                plurals: BTreeMap::from([("ru".to_string(), PluralForms::new())]),
            },
        );
        let unique = vec![
            TranslationRequest::source("a").plural(),
            TranslationRequest::source("b"),
            TranslationRequest::source("c"),
        ];

        let ids = plural_ids(&unique, &found, &translations);
        assert!(ids.contains(&TranslationId(1)));
        assert!(ids.contains(&TranslationId(2)));
        assert!(!ids.contains(&TranslationId(3)));
    }
}
