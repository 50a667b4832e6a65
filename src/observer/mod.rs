//! Events reported by the resolver.
//!
//! The resolver never logs directly. It reports a [`ResolverEvent`] to the
//! injected [`ResolverObserver`]; [`TracingObserver`] turns events into
//! `tracing` records and [`TranslationMetrics`] counts them.

mod metrics;

pub use metrics::{MetricsReport, TranslationMetrics};

use crate::model::{Identity, TranslationId};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverEvent {
    /// A lookup found an existing entry
    CacheHit { identity: Identity, id: TranslationId },
    /// A lookup found nothing
    CacheMiss { identity: Identity },
    EntryCreated { identity: Identity, id: TranslationId },
    /// Creating or re-reading an entry failed inside a batch
    CreateFailed { identity: Identity, reason: String },
    Generated {
        id: TranslationId,
        lang: String,
        category: Option<String>,
    },
    GenerationFailed {
        id: TranslationId,
        lang: String,
        category: Option<String>,
        reason: String,
    },
    /// Some plural categories failed, so the bundle was not stored
    BundleIncomplete { id: TranslationId, lang: String },
    /// A batch request had no entry and was left out of the response
    RequestDropped { identity: Identity },
}

pub trait ResolverObserver: Send + Sync {
    fn on_event(&self, event: &ResolverEvent);
}

impl<T: ResolverObserver + ?Sized> ResolverObserver for Arc<T> {
    fn on_event(&self, event: &ResolverEvent) {
        (**self).on_event(event)
    }
}

/// Writes every event as a `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ResolverObserver for TracingObserver {
    fn on_event(&self, event: &ResolverEvent) {
        match event {
            ResolverEvent::CacheHit { identity, id } => {
                debug!(%identity, %id, "Translation found");
            }
            ResolverEvent::CacheMiss { identity } => {
                debug!(%identity, "Translation not found");
            }
            ResolverEvent::EntryCreated { identity, id } => {
                info!(%identity, %id, "Created translation entry");
            }
            ResolverEvent::CreateFailed { identity, reason } => {
                warn!(%identity, "Failed to create translation entry: {}", reason);
            }
            ResolverEvent::Generated { id, lang, category } => {
                debug!(%id, lang = %lang, category = ?category, "Generated translation");
            }
            ResolverEvent::GenerationFailed {
                id,
                lang,
                category,
                reason,
            } => {
                warn!(
                    %id,
                    lang = %lang,
                    category = ?category,
                    "Translation generation failed: {}",
                    reason
                );
            }
            ResolverEvent::BundleIncomplete { id, lang } => {
                warn!(%id, lang = %lang, "Plural forms incomplete, bundle not stored");
            }
            ResolverEvent::RequestDropped { identity } => {
                warn!(%identity, "Dropping unresolved translation request");
            }
        }
    }
}

/// Forwards each event to several observers in order.
#[derive(Clone, Default)]
pub struct Observers(Vec<Arc<dyn ResolverObserver>>);

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: Arc<dyn ResolverObserver>) -> Self {
        self.0.push(observer);
        self
    }
}

impl ResolverObserver for Observers {
    fn on_event(&self, event: &ResolverEvent) {
        for observer in &self.0 {
            observer.on_event(event);
        }
    }
}
