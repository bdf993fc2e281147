use std::fmt;

use thiserror::Error;

/// Failures surfaced by row-store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Store error: {0}")]
    Backend(String),
}

/// Phases of one edit's persistence sequence, used to report where a store
/// failure struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Parsing,
    PersistingRaw,
    Resolving,
    Recomputing,
    PersistingDerived,
    UpdatingDisplay,
}

impl fmt::Display for EditPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EditPhase::Parsing => "parsing",
            EditPhase::PersistingRaw => "persisting raw field",
            EditPhase::Resolving => "resolving dependents",
            EditPhase::Recomputing => "recomputing",
            EditPhase::PersistingDerived => "persisting derived field",
            EditPhase::UpdatingDisplay => "updating display",
        };
        f.write_str(label)
    }
}

/// A persistence failure during an edit. The optimistic display edits stay in
/// place; the engine flags itself for a full resync instead of rolling back.
#[derive(Debug, Error)]
#[error("edit failed while {phase}: {source}")]
pub struct EditError {
    pub phase: EditPhase,
    #[source]
    pub source: StoreError,
}

impl EditError {
    pub fn new(phase: EditPhase, source: StoreError) -> Self {
        Self { phase, source }
    }
}
