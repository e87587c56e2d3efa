use crate::models::{EntryId, SenseId};
use std::path::PathBuf;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// The lexical store failed to answer. Callers treat this as fatal for the
/// current query; nothing in this crate retries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sense {0:?} is referenced but not present in the lexicon")]
    DanglingSense(SenseId),

    #[error("entry {0:?} is not present in the lexicon")]
    UnknownEntry(EntryId),

    #[error("{path}:{line}: {message}")]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("relation target '{target}' of '{source_key}' does not name a sense")]
    UnresolvedTarget { source_key: String, target: String },

    #[error("duplicate sense key '{0}'")]
    DuplicateKey(String),

    #[error("sense '{0}' has no words")]
    EmptySense(String),

    #[error("embedded lexicon '{0}' is missing")]
    MissingAsset(String),

    #[error("could not read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The caller passed a blank string. Distinct from "no match".
    #[error("lookup surface must not be empty")]
    EmptySurface,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("checker '{checker}' failed: {message}")]
    Failed { checker: String, message: String },
}
