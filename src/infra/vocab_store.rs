// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Reads, writes and copies `vocab.json`, the word → id map of a
// base corpus.
//
// The file is a flat JSON object in the word-level tokenizer
// vocabulary format. Every value must be a non-negative integer
// that fits a u32 id; strings, floats and oversized numbers are
// rejected rather than skipped or truncated, then the ids are
// checked for density.
//
// Personality directories get a byte-for-byte copy of the base
// file rather than a re-serialised one; the trainer must see the
// exact artifact the base model was trained with.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::domain::{
    error::{TuneError, TuneResult},
    vocabulary::Vocabulary,
};
use crate::infra::npy::write_replacing;

pub const VOCAB_FILE: &str = "vocab.json";

pub struct VocabStore {
    dir: PathBuf,
}

impl VocabStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(VOCAB_FILE)
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Load and validate the vocabulary file.
    pub fn load(&self) -> TuneResult<Vocabulary> {
        let path  = self.path();
        let bytes = self.read_bytes()?;

        let entries: HashMap<String, u32> = serde_json::from_slice(&bytes)
            .map_err(|e| TuneError::invalid(&path, e.to_string()))?;

        let vocab = Vocabulary::from_ids(entries)
            .map_err(|reason| TuneError::invalid(&path, reason))?;

        tracing::debug!("Loaded {} words from '{}'", vocab.len(), path.display());
        Ok(vocab)
    }

    /// Write the vocabulary as pretty JSON in id order.
    pub fn save(&self, vocab: &Vocabulary) -> TuneResult<()> {
        let path = self.path();
        let json = serde_json::to_string_pretty(vocab)
            .map_err(|e| TuneError::invalid(&path, e.to_string()))?;
        write_replacing(&path, json.as_bytes())?;

        tracing::info!("Vocabulary of {} words saved to '{}'", vocab.len(), path.display());
        Ok(())
    }

    /// Raw file contents, for callers that must hold the exact
    /// bytes before writing anything else.
    pub fn read_bytes(&self) -> TuneResult<Vec<u8>> {
        let path = self.path();
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TuneError::MissingArtifact { path: path.clone() },
            _ => TuneError::io(&path, e),
        })
    }

    /// Write bytes previously taken with `read_bytes` into `target_dir`,
    /// replacing any earlier copy there.
    pub fn write_copy(bytes: &[u8], target_dir: &Path) -> TuneResult<PathBuf> {
        let target = target_dir.join(VOCAB_FILE);
        write_replacing(&target, bytes)?;

        tracing::debug!("Copied vocabulary ({} bytes) to '{}'", bytes.len(), target.display());
        Ok(target)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir   = TempDir::new().unwrap();
        let store = VocabStore::new(dir.path());
        let vocab = Vocabulary::from_ordered(["the", "cat", "sat"]).unwrap();

        store.save(&vocab).unwrap();
        assert_eq!(store.load().unwrap(), vocab);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = VocabStore::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, TuneError::MissingArtifact { .. }));
    }

    #[test]
    fn test_sparse_ids_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(VOCAB_FILE), r#"{"the": 0, "cat": 5}"#).unwrap();

        let err = VocabStore::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, TuneError::InvalidArtifact { .. }));
    }

    #[test]
    fn test_non_integer_ids_rejected() {
        let dir = TempDir::new().unwrap();
        let store = VocabStore::new(dir.path());

        for raw in [
            r#"{"the": 0, "cat": "1"}"#,
            r#"{"the": 0, "cat": 1.0}"#,
            r#"{"the": 0, "cat": -1}"#,
            r#"["the", "cat"]"#,
        ] {
            fs::write(store.path(), raw).unwrap();
            assert!(
                matches!(store.load(), Err(TuneError::InvalidArtifact { .. })),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn test_oversized_id_is_not_truncated() {
        let dir = TempDir::new().unwrap();
        let store = VocabStore::new(dir.path());

        // 2^32 + 1 would read back as id 1 if it were cast down
        fs::write(store.path(), r#"{"the": 0, "cat": 4294967297}"#).unwrap();
        assert!(matches!(store.load(), Err(TuneError::InvalidArtifact { .. })));
    }

    #[test]
    fn test_copy_is_byte_identical() {
        let base   = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();

        // Hand-written file with its own spacing; the copy must keep it
        let raw = "{ \"the\":0,\n  \"cat\" : 1 }\n";
        fs::write(base.path().join(VOCAB_FILE), raw).unwrap();
        fs::write(target.path().join(VOCAB_FILE), "stale").unwrap();

        let bytes  = VocabStore::new(base.path()).read_bytes().unwrap();
        let copied = VocabStore::write_copy(&bytes, target.path()).unwrap();
        assert_eq!(fs::read_to_string(copied).unwrap(), raw);
    }
}
