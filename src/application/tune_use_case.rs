// ============================================================
// Layer 2 — TuneUseCase
// ============================================================
// Runs the whole fine-tuning pipeline for one personality:
//
//   Step 1: Load base vocabulary          (Layer 4 - data)
//   Step 2: Validate + encode personality (Layer 4 - data)
//   Step 3: Transplant pretrained config  (Layer 5 - ml)
//   Step 4: Hand off to the trainer       (Layer 3 - Trainer seam)
//
// Steps run strictly in order and each one finishes its disk
// writes before the next starts. A failure in steps 1–2 stops
// the run before any training config is read.
//
// All directories come from a TuneLayout plus the personality
// name; nothing is global, so several layouts can coexist.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::data::{
    corpus_loader::CorpusLoader,
    personality_encoder::{EncodedPersonality, PersonalityEncoder},
};
use crate::domain::{training_config::TrainingConfig, traits::Trainer};
use crate::ml::transplant::ConfigTransplanter;

// ─── Directory Layout ─────────────────────────────────────────────────────────
// Where the base corpus, the pretrained run and the per-personality
// directories live, plus the batch shape the base run used.
#[derive(Debug, Clone, PartialEq)]
pub struct TuneLayout {
    /// Base corpus (input.txt / vocab.json / data.npy)
    pub base_data_dir:          PathBuf,
    /// Pretrained run (config.json + checkpoints)
    pub base_save_dir:          PathBuf,
    /// Parent of every personality's data directory
    pub personalities_data_dir: PathBuf,
    /// Parent of every personality's save directory
    pub personalities_save_dir: PathBuf,
    pub batch_size:             usize,
    pub seq_length:             usize,
}

impl Default for TuneLayout {
    fn default() -> Self {
        Self {
            base_data_dir:          PathBuf::from("data"),
            base_save_dir:          PathBuf::from("/media/data/save"),
            personalities_data_dir: PathBuf::from("data/personalities"),
            personalities_save_dir: PathBuf::from("/media/data/personalities"),
            batch_size:             50,
            seq_length:             25,
        }
    }
}

impl TuneLayout {
    pub fn data_dir(&self, personality: &str) -> PathBuf {
        self.personalities_data_dir.join(personality)
    }

    pub fn save_dir(&self, personality: &str) -> PathBuf {
        self.personalities_save_dir.join(personality)
    }
}

// ─── TuneUseCase ──────────────────────────────────────────────────────────────
pub struct TuneUseCase {
    layout:      TuneLayout,
    personality: String,
}

impl TuneUseCase {
    pub fn new(layout: TuneLayout, personality: impl Into<String>) -> Self {
        Self { layout, personality: personality.into() }
    }

    /// Steps 1–2 only: leave the personality directory trainer-ready.
    pub fn preprocess(&self) -> Result<EncodedPersonality> {
        let data_dir = self.layout.data_dir(&self.personality);

        // ── Step 1: Base vocabulary ───────────────────────────────────────────
        let loader = CorpusLoader::new(
            &self.layout.base_data_dir,
            self.layout.batch_size,
            self.layout.seq_length,
        );
        let corpus = loader.load().with_context(|| {
            format!("Cannot load base corpus '{}'", self.layout.base_data_dir.display())
        })?;
        tracing::info!(
            "Base corpus: {} words, vocabulary {}, {} batches of {}x{}",
            corpus.tensor_len,
            corpus.vocabulary.len(),
            corpus.num_batches,
            self.layout.batch_size,
            self.layout.seq_length,
        );

        // ── Step 2: Encode personality text ───────────────────────────────────
        tracing::info!("Preprocessing personality '{}' in '{}'", self.personality, data_dir.display());
        let encoded = PersonalityEncoder::new(&corpus.vocabulary, &self.layout.base_data_dir)
            .encode_dir(&data_dir)
            .with_context(|| format!("Cannot preprocess personality '{}'", self.personality))?;

        Ok(encoded)
    }

    /// The full pipeline: preprocess, then fine-tune with `trainer`.
    /// Returns the configuration the trainer was given.
    pub fn execute(&self, trainer: &dyn Trainer) -> Result<TrainingConfig> {
        let encoded = self.preprocess()?;
        tracing::info!(
            "Personality '{}' ready: {} words over a {}-word vocabulary",
            self.personality,
            encoded.tokens,
            encoded.vocab_size,
        );

        // ── Steps 3–4: Transplant config and train ────────────────────────────
        let transplanter = ConfigTransplanter::new(
            &self.layout.base_save_dir,
            self.layout.save_dir(&self.personality),
            self.layout.data_dir(&self.personality),
        );
        let config = transplanter
            .run(trainer)
            .with_context(|| format!("Fine-tuning personality '{}' failed", self.personality))?;

        Ok(config)
    }
}
