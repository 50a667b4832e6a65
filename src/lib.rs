//! Translation resolution cache for the beekeeping app.
//!
//! Given a key or an English phrase, [`Resolver`] returns its translations in
//! every target language. In generation mode, missing entries and values are
//! created on demand through a [`TextGenerator`] and persisted in a
//! [`TranslationStore`].

pub mod config;
pub mod error;
pub mod generation;
pub mod i18n;
pub mod model;
pub mod observer;
pub mod resolver;
pub mod retry;
pub mod store;

pub use error::{GenerationError, ResolveError, StoreError};
pub use generation::{DisabledGenerator, OpenAiGenerator, OpenAiSettings, TextGenerator};
pub use model::{
    Identity, PluralForms, Resolved, ResolvedEntry, TranslationEntry, TranslationId,
    TranslationRequest,
};
pub use resolver::{Resolver, ResolverConfig};
pub use store::{MemoryStore, PgTranslationStore, TranslationStore};
