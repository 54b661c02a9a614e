//! Pipeline-level error type shared by the library and the binary.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The spelling dictionary is a hard dependency; refusing to start without
    /// it beats silently skipping the spell-sensitive rules.
    #[error("spelling dictionary unavailable at {path}: {source}")]
    DictionaryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("morphological lexicon unavailable at {path}: {source}")]
    LexiconUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no transcripts (.txt) found under {path}")]
    EmptyCorpus { path: PathBuf },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("processing {path} exceeded the {limit:?} budget")]
    FileTimeout { path: PathBuf, limit: Duration },
    #[error("worker processing {path} terminated unexpectedly")]
    WorkerLost { path: PathBuf },
}
