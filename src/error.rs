//! Error types for store, generation, and resolution failures.

use crate::model::Identity;
use thiserror::Error;

/// A query against the backing store failed.
///
/// Always propagated to the caller; the store never retries.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Stored plural data is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Raised by stores that are not backed by sqlx (e.g. the in-memory store)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// The text-generation backend failed for one prompt.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Generation API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Generation response could not be decoded: {0}")]
    Decode(String),

    #[error("Generation response contained no text")]
    EmptyCompletion,

    #[error("Generation is disabled")]
    Disabled,
}

impl GenerationError {
    /// Transport failures, rate limiting (429) and server errors (5xx) are
    /// retryable. Other 4xx client errors and malformed responses are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::Transport(_) => true,
            GenerationError::Status { status, .. } => *status == 429 || *status >= 500,
            GenerationError::Decode(_)
            | GenerationError::EmptyCompletion
            | GenerationError::Disabled => false,
        }
    }
}

/// Failure of a `resolve` or `resolve_batch` call as a whole.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No row exists and generation mode is disabled
    #[error("Translation not found: {0}")]
    NotFound(Identity),

    /// The entry was inserted but reading it back found nothing
    #[error("Translation {0} was created but could not be read back")]
    InconsistentCreate(Identity),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound(_))
    }
}
