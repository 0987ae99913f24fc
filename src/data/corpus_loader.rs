// ============================================================
// Layer 4 — Base Corpus Loader
// ============================================================
// Recovers the vocabulary the base model was trained with from
// the base corpus directory:
//
//   data/
//     input.txt    ← raw base corpus (optional once cached)
//     vocab.json   ← word → id, most frequent first
//     data.npy     ← the whole corpus encoded with vocab.json
//
// Cache rules:
//   vocab + tensor present  → load both, rebuild nothing
//   vocab missing, text ok  → build vocab from input.txt, encode,
//                             write both (first run on a corpus)
//   vocab ok, tensor missing, text ok
//                           → re-encode with the existing vocab;
//                             an existing vocab is never rebuilt,
//                             ids must stay stable for trained models
//   anything else           → MissingArtifact
//
// The batch shape is checked the same way the trainer will
// slice the corpus: at least one full batch_size × seq_length
// block must fit.

use std::path::{Path, PathBuf};

use crate::data::{encoding, INPUT_FILE, TENSOR_FILE};
use crate::domain::{
    error::{TuneError, TuneResult},
    vocabulary::Vocabulary,
};
use crate::infra::{npy, vocab_store::VocabStore};

/// A loaded base corpus.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub vocabulary:  Vocabulary,
    /// Number of encoded words in the corpus
    pub tensor_len:  usize,
    /// Full batch_size × seq_length blocks the tensor yields
    pub num_batches: usize,
}

pub struct CorpusLoader {
    dir:        PathBuf,
    batch_size: usize,
    seq_length: usize,
}

impl CorpusLoader {
    pub fn new(dir: impl Into<PathBuf>, batch_size: usize, seq_length: usize) -> Self {
        Self { dir: dir.into(), batch_size, seq_length }
    }

    /// Load the corpus, materialising its cache files if needed.
    pub fn load(&self) -> TuneResult<Corpus> {
        if self.batch_size == 0 || self.seq_length == 0 {
            return Err(TuneError::InvalidBatchShape {
                batch_size: self.batch_size,
                seq_length: self.seq_length,
            });
        }

        let vocab_store = VocabStore::new(&self.dir);
        let tensor_path = self.dir.join(TENSOR_FILE);
        let input_path  = self.dir.join(INPUT_FILE);

        let (vocabulary, tensor) = match (vocab_store.exists(), tensor_path.is_file()) {
            (true, true) => {
                tracing::info!("Loading cached corpus from '{}'", self.dir.display());
                (vocab_store.load()?, npy::load(&tensor_path)?)
            }
            (true, false) if input_path.is_file() => {
                tracing::info!("Re-encoding '{}' with existing vocabulary", input_path.display());
                let vocab  = vocab_store.load()?;
                let text   = encoding::read_text(&input_path)?;
                let tensor = encoding::encode(&vocab, &encoding::split_words(&text))?;
                npy::save(&tensor_path, &tensor)?;
                (vocab, tensor)
            }
            (true, false) => return Err(TuneError::MissingArtifact { path: input_path }),
            (false, _) if input_path.is_file() => self.build_from_text(&input_path, &vocab_store)?,
            (false, _) => return Err(TuneError::MissingArtifact { path: vocab_store.path() }),
        };

        if vocabulary.is_empty() {
            return Err(TuneError::invalid(vocab_store.path(), "vocabulary is empty"));
        }
        if let Some(&bad) = tensor.iter().find(|&&id| id as usize >= vocabulary.len()) {
            return Err(TuneError::invalid(
                &tensor_path,
                format!("id {bad} is outside a vocabulary of {} words", vocabulary.len()),
            ));
        }

        let num_batches = tensor.len() / (self.batch_size * self.seq_length);
        if num_batches == 0 {
            return Err(TuneError::CorpusTooSmall {
                dir:        self.dir.clone(),
                tokens:     tensor.len(),
                batch_size: self.batch_size,
                seq_length: self.seq_length,
            });
        }

        Ok(Corpus { vocabulary, tensor_len: tensor.len(), num_batches })
    }

    fn build_from_text(
        &self,
        input_path:  &Path,
        vocab_store: &VocabStore,
    ) -> TuneResult<(Vocabulary, Vec<u32>)> {
        tracing::info!("Building vocabulary from '{}'", input_path.display());

        let text  = encoding::read_text(input_path)?;
        let words = encoding::split_words(&text);
        let vocab = encoding::build_vocabulary(&words)
            .map_err(|w| TuneError::invalid(input_path, format!("word \"{w}\" ranked twice")))?;
        let tensor = encoding::encode(&vocab, &words)?;

        vocab_store.save(&vocab)?;
        npy::save(&self.dir.join(TENSOR_FILE), &tensor)?;
        Ok((vocab, tensor))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn corpus_dir(text: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(INPUT_FILE), text).unwrap();
        dir
    }

    #[test]
    fn test_first_load_builds_cache() {
        let dir    = corpus_dir("the cat sat on the mat the end");
        let corpus = CorpusLoader::new(dir.path(), 2, 2).load().unwrap();

        assert_eq!(corpus.vocabulary.id_of("the"), Some(0));
        assert_eq!(corpus.tensor_len, 8);
        assert_eq!(corpus.num_batches, 2);
        assert!(dir.path().join("vocab.json").is_file());
        assert_eq!(npy::load(&dir.path().join(TENSOR_FILE)).unwrap()[0], 0);
    }

    #[test]
    fn test_cached_vocab_is_not_rebuilt() {
        let dir = corpus_dir("a b b");
        // Hand-made vocab with an order frequency counting would not produce
        let vocab = Vocabulary::from_ordered(["a", "b"]).unwrap();
        VocabStore::new(dir.path()).save(&vocab).unwrap();

        let corpus = CorpusLoader::new(dir.path(), 1, 1).load().unwrap();
        assert_eq!(corpus.vocabulary, vocab);
        assert_eq!(npy::load(&dir.path().join(TENSOR_FILE)).unwrap(), vec![0, 1, 1]);
    }

    #[test]
    fn test_cache_survives_without_text() {
        let dir = corpus_dir("x y x");
        CorpusLoader::new(dir.path(), 1, 1).load().unwrap();
        fs::remove_file(dir.path().join(INPUT_FILE)).unwrap();

        let corpus = CorpusLoader::new(dir.path(), 1, 1).load().unwrap();
        assert_eq!(corpus.vocabulary.len(), 2);
    }

    #[test]
    fn test_empty_directory_is_missing_artifact() {
        let dir = TempDir::new().unwrap();
        match CorpusLoader::new(dir.path(), 1, 1).load() {
            Err(TuneError::MissingArtifact { path }) => assert!(path.ends_with("vocab.json")),
            other => panic!("expected MissingArtifact, got {other:?}"),
        }
    }

    #[test]
    fn test_vocab_without_tensor_or_text() {
        let dir = TempDir::new().unwrap();
        VocabStore::new(dir.path())
            .save(&Vocabulary::from_ordered(["a"]).unwrap())
            .unwrap();

        match CorpusLoader::new(dir.path(), 1, 1).load() {
            Err(TuneError::MissingArtifact { path }) => assert!(path.ends_with(INPUT_FILE)),
            other => panic!("expected MissingArtifact, got {other:?}"),
        }
    }

    #[test]
    fn test_too_small_for_one_batch() {
        let dir = corpus_dir("one two three");
        let err = CorpusLoader::new(dir.path(), 2, 2).load().unwrap_err();
        assert!(matches!(err, TuneError::CorpusTooSmall { tokens: 3, .. }));
    }

    #[test]
    fn test_zero_batch_shape() {
        let dir = corpus_dir("one two three");
        let err = CorpusLoader::new(dir.path(), 0, 25).load().unwrap_err();
        assert!(matches!(err, TuneError::InvalidBatchShape { .. }));
        // Rejected before anything was cached
        assert!(!dir.path().join("vocab.json").exists());
    }

    #[test]
    fn test_out_of_range_cached_id() {
        let dir = TempDir::new().unwrap();
        VocabStore::new(dir.path())
            .save(&Vocabulary::from_ordered(["a", "b"]).unwrap())
            .unwrap();
        npy::save(&dir.path().join(TENSOR_FILE), &[0, 1, 9]).unwrap();

        let err = CorpusLoader::new(dir.path(), 1, 1).load().unwrap_err();
        assert!(matches!(err, TuneError::InvalidArtifact { .. }));
    }
}
