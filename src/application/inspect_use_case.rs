// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Read-only check of a preprocessed personality directory:
// decodes data.npy through the vocab.json copy sitting next to
// it, exactly as the trainer will see them.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::data::TENSOR_FILE;
use crate::infra::{npy, vocab_store::VocabStore};

/// Decoded view of a personality directory.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub tokens:     usize,
    pub vocab_size: usize,
    /// The first words, decoded
    pub preview:    Vec<String>,
}

pub struct InspectUseCase {
    data_dir: PathBuf,
}

impl InspectUseCase {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Decode the first `limit` words of the encoded tensor.
    pub fn run(&self, limit: usize) -> Result<Inspection> {
        let vocab = VocabStore::new(&self.data_dir)
            .load()
            .with_context(|| format!("No usable vocabulary in '{}'", self.data_dir.display()))?;
        let ids = npy::load(&self.data_dir.join(TENSOR_FILE))
            .with_context(|| format!("No usable tensor in '{}'", self.data_dir.display()))?;

        let head = &ids[..ids.len().min(limit)];
        let preview = match vocab.decode(head) {
            Ok(words) => words.into_iter().map(str::to_string).collect(),
            Err(id)   => bail!(
                "Tensor in '{}' holds id {} but the vocabulary has only {} words",
                self.data_dir.display(),
                id,
                vocab.len()
            ),
        };

        Ok(Inspection { tokens: ids.len(), vocab_size: vocab.len(), preview })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vocabulary::Vocabulary;
    use tempfile::TempDir;

    #[test]
    fn test_preview_is_decoded_prefix() {
        let dir = TempDir::new().unwrap();
        VocabStore::new(dir.path())
            .save(&Vocabulary::from_ordered(["the", "cat", "sat"]).unwrap())
            .unwrap();
        npy::save(&dir.path().join(TENSOR_FILE), &[0, 1, 2, 0, 1]).unwrap();

        let out = InspectUseCase::new(dir.path()).run(3).unwrap();
        assert_eq!(out.tokens, 5);
        assert_eq!(out.vocab_size, 3);
        assert_eq!(out.preview, ["the", "cat", "sat"]);
    }

    #[test]
    fn test_stray_id_reported() {
        let dir = TempDir::new().unwrap();
        VocabStore::new(dir.path())
            .save(&Vocabulary::from_ordered(["a"]).unwrap())
            .unwrap();
        npy::save(&dir.path().join(TENSOR_FILE), &[0, 4]).unwrap();

        let err = InspectUseCase::new(dir.path()).run(10).unwrap_err();
        assert!(err.to_string().contains("id 4"));
    }

    #[test]
    fn test_unpreprocessed_dir() {
        let dir = TempDir::new().unwrap();
        assert!(InspectUseCase::new(dir.path()).run(10).is_err());
    }
}
