// ============================================================
// Layer 4 — Personality Encoder
// ============================================================
// Turns a personality's raw text into trainer-ready files:
//
//   data/personalities/<name>/
//     input.txt    ← supplied by the operator (read)
//     data.npy     ← encoded words (written)
//     vocab.json   ← verbatim copy of the base vocab (written)
//
// Every word must already exist in the base vocabulary. The
// first unknown word aborts the run with UnknownToken, and at
// that point nothing has been written: both output files are
// only produced after the whole text has validated. A failed
// run therefore leaves the previous data.npy / vocab.json, if
// any, untouched.

use std::path::{Path, PathBuf};

use crate::data::{encoding, INPUT_FILE, TENSOR_FILE};
use crate::domain::{
    error::{TuneError, TuneResult},
    vocabulary::Vocabulary,
};
use crate::infra::{npy, vocab_store::VocabStore};

/// What a successful encoding run produced.
#[derive(Debug, Clone)]
pub struct EncodedPersonality {
    pub tokens:      usize,
    pub vocab_size:  usize,
    pub tensor_path: PathBuf,
    pub vocab_path:  PathBuf,
}

pub struct PersonalityEncoder<'a> {
    vocabulary: &'a Vocabulary,
    /// Base corpus directory whose vocab.json gets copied
    base_dir:   PathBuf,
}

impl<'a> PersonalityEncoder<'a> {
    pub fn new(vocabulary: &'a Vocabulary, base_dir: impl Into<PathBuf>) -> Self {
        Self { vocabulary, base_dir: base_dir.into() }
    }

    /// Encode `<personality_dir>/input.txt` in place.
    pub fn encode_dir(&self, personality_dir: &Path) -> TuneResult<EncodedPersonality> {
        let input_path = personality_dir.join(INPUT_FILE);
        let text       = encoding::read_text(&input_path)?;
        let words      = encoding::split_words(&text);

        if words.is_empty() {
            return Err(TuneError::EmptyCorpus { path: input_path });
        }

        // Validate everything before the first write
        let tensor = encoding::encode(self.vocabulary, &words)?;
        tracing::debug!("All {} words of '{}' are in the vocabulary", words.len(), input_path.display());

        // The base vocab is read before the first write, so the
        // only failures left past this point are the writes themselves
        let vocab_bytes = VocabStore::new(&self.base_dir).read_bytes()?;

        let tensor_path = personality_dir.join(TENSOR_FILE);
        npy::save(&tensor_path, &tensor)?;
        let vocab_path = VocabStore::write_copy(&vocab_bytes, personality_dir)?;

        tracing::info!(
            "Encoded {} words into '{}'",
            tensor.len(),
            tensor_path.display()
        );

        Ok(EncodedPersonality {
            tokens:     tensor.len(),
            vocab_size: self.vocabulary.len(),
            tensor_path,
            vocab_path,
        })
    }
}
