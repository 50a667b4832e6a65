//! Domain types shared by the store and the resolver.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Category → translated string, e.g. `{"one": "улей", "few": "улья"}`.
pub type PluralForms = BTreeMap<String, String>;

/// Store-assigned identifier of a translation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationId(pub i64);

impl fmt::Display for TranslationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identifying row of a translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationEntry {
    pub id: TranslationId,
    pub key: Option<String>,
    #[serde(rename = "en")]
    pub source_text: String,
    pub context: Option<String>,
}

/// How a request identifies its entry.
///
/// A keyed request is looked up by key only; its English text is used for
/// creation and prompting but never for lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    Keyed(String),
    BySource(String),
}

impl Identity {
    /// Token used to deduplicate requests and index batch lookups.
    pub fn lookup_token(&self) -> String {
        match self {
            Identity::Keyed(key) => format!("key:{}", key),
            Identity::BySource(text) => format!("en:{}", text),
        }
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self, Identity::Keyed(_))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lookup_token())
    }
}

/// A caller's request for one translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RequestPayload")]
pub struct TranslationRequest {
    pub identity: Identity,
    pub source_text: String,
    pub context: Option<String>,
    pub is_plural: bool,
}

impl TranslationRequest {
    /// Request identified by its English source text.
    pub fn source(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            identity: Identity::BySource(text.clone()),
            source_text: text,
            context: None,
            is_plural: false,
        }
    }

    /// Request identified by a canonical key, carrying its English text.
    pub fn keyed(key: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            identity: Identity::Keyed(key.into()),
            source_text: source_text.into(),
            context: None,
            is_plural: false,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = if context.trim().is_empty() {
            None
        } else {
            Some(context)
        };
        self
    }

    pub fn plural(mut self) -> Self {
        self.is_plural = true;
        self
    }

    pub fn key(&self) -> Option<&str> {
        match &self.identity {
            Identity::Keyed(key) => Some(key),
            Identity::BySource(_) => None,
        }
    }
}

/// Wire shape accepted from callers: `{ "key"?, "en", "tc"?, "isPlural"? }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestPayload {
    #[serde(default)]
    key: Option<String>,
    en: String,
    #[serde(default)]
    tc: Option<String>,
    #[serde(default)]
    is_plural: bool,
}

impl From<RequestPayload> for TranslationRequest {
    fn from(payload: RequestPayload) -> Self {
        let mut request = match payload.key.filter(|k| !k.is_empty()) {
            Some(key) => TranslationRequest::keyed(key, payload.en),
            None => TranslationRequest::source(payload.en),
        };
        if let Some(tc) = payload.tc {
            request = request.with_context(tc);
        }
        request.is_plural = payload.is_plural;
        request
    }
}

/// Per-language output of a resolved entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Resolved {
    /// language → value
    #[serde(rename = "values")]
    Singular(BTreeMap<String, String>),
    /// language → category → value
    #[serde(rename = "plurals")]
    Plural(BTreeMap<String, PluralForms>),
}

impl Resolved {
    /// Number of languages with a value or bundle.
    pub fn language_count(&self) -> usize {
        match self {
            Resolved::Singular(values) => values.len(),
            Resolved::Plural(bundles) => bundles.len(),
        }
    }

    pub fn value(&self, lang: &str) -> Option<&str> {
        match self {
            Resolved::Singular(values) => values.get(lang).map(String::as_str),
            Resolved::Plural(_) => None,
        }
    }

    pub fn forms(&self, lang: &str) -> Option<&PluralForms> {
        match self {
            Resolved::Singular(_) => None,
            Resolved::Plural(bundles) => bundles.get(lang),
        }
    }
}

/// An entry together with whatever translations currently exist for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry {
    #[serde(flatten)]
    pub entry: TranslationEntry,
    #[serde(flatten)]
    pub translations: Resolved,
}

impl ResolvedEntry {
    pub fn is_plural(&self) -> bool {
        matches!(self.translations, Resolved::Plural(_))
    }
}
