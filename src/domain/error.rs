// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Every failure the preprocessing and handoff pipeline can
// report. All of them abort the whole operation; nothing here
// is retried.
//
//   MissingArtifact     — a file the step needs is absent
//   InvalidArtifact     — a file exists but cannot be used
//   UnknownToken        — personality text uses a word the
//                         pretrained vocabulary never saw
//   DataNotPreprocessed — fine-tuning asked for before encoding
//   ConfigNotFound      — pretrained run has no config record
//
// Errors coming out of the external trainer are wrapped
// transparently and never reinterpreted.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuneError {
    #[error("missing artifact: '{}'", .path.display())]
    MissingArtifact { path: PathBuf },

    #[error("invalid artifact '{}': {reason}", .path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("word \"{token}\" (token {position}) is not in the corpus vocabulary")]
    UnknownToken { token: String, position: usize },

    #[error("personality text '{}' contains no tokens", .path.display())]
    EmptyCorpus { path: PathBuf },

    #[error(
        "not enough data in '{}': {tokens} tokens cannot fill one batch of {batch_size}x{seq_length}",
        .dir.display()
    )]
    CorpusTooSmall {
        dir:        PathBuf,
        tokens:     usize,
        batch_size: usize,
        seq_length: usize,
    },

    #[error("batch size and sequence length must be positive (got {batch_size}x{seq_length})")]
    InvalidBatchShape { batch_size: usize, seq_length: usize },

    #[error("personality data in '{}' is not preprocessed", .dir.display())]
    DataNotPreprocessed { dir: PathBuf },

    #[error("no training config found at '{}'", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error(
        "vocabulary in '{}' has {found} tokens but the pretrained model expects {expected}",
        .dir.display()
    )]
    VocabularyMismatch {
        dir:      PathBuf,
        expected: usize,
        found:    usize,
    },

    #[error("I/O error on '{}'", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Trainer(anyhow::Error),
}

impl TuneError {
    /// Attach a path to a raw I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidArtifact { path: path.into(), reason: reason.into() }
    }
}

pub type TuneResult<T> = std::result::Result<T, TuneError>;
