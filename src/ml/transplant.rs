// ============================================================
// Layer 5 — Config Transplant
// ============================================================
// Prepares a pretrained run's configuration for fine-tuning and
// hands it to the trainer:
//
//   1. personality data dir must hold data.npy  (else DataNotPreprocessed)
//   2. load pretrained/config.json              (else ConfigNotFound)
//   3. data_dir  ← personality data dir
//      save_dir  ← new save dir
//      init_from ← pretrained dir (weights come from here)
//   4. num_epochs += EPOCH_INCREMENT
//   5. trainer.train(&config), blocking
//
// Every other field, architecture included, is passed through
// as the pretrained run recorded it. The checkpoint's weight
// shapes depend on those fields, so a freshly built config
// would not load.
//
// The preprocessing check runs before the config is even read:
// this step never triggers preprocessing itself.

use std::path::PathBuf;

use crate::data::TENSOR_FILE;
use crate::domain::{
    error::{TuneError, TuneResult},
    training_config::TrainingConfig,
    traits::Trainer,
};
use crate::infra::{config_store::RunConfigStore, vocab_store::VocabStore};

/// Extra epochs a fine-tuning run gets on top of the pretrained budget.
pub const EPOCH_INCREMENT: usize = 5;

pub struct ConfigTransplanter {
    pretrained_dir:  PathBuf,
    save_dir:        PathBuf,
    personality_dir: PathBuf,
}

impl ConfigTransplanter {
    pub fn new(
        pretrained_dir:  impl Into<PathBuf>,
        save_dir:        impl Into<PathBuf>,
        personality_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            pretrained_dir:  pretrained_dir.into(),
            save_dir:        save_dir.into(),
            personality_dir: personality_dir.into(),
        }
    }

    /// Steps 1–4: the fine-tuning config, not yet handed off.
    pub fn prepare(&self) -> TuneResult<TrainingConfig> {
        if !self.personality_dir.join(TENSOR_FILE).is_file() {
            return Err(TuneError::DataNotPreprocessed { dir: self.personality_dir.clone() });
        }

        let mut config = RunConfigStore::new(&self.pretrained_dir).load()?;
        self.check_vocab_size(&config)?;

        tracing::info!(
            "Transplanting config from '{}': {} epochs → {}",
            self.pretrained_dir.display(),
            config.num_epochs,
            config.num_epochs + EPOCH_INCREMENT,
        );

        config.data_dir   = self.personality_dir.clone();
        config.save_dir   = self.save_dir.clone();
        config.init_from  = Some(self.pretrained_dir.clone());
        config.num_epochs += EPOCH_INCREMENT;

        Ok(config)
    }

    /// Prepare the config and run the trainer on it.
    /// Trainer failures come back unchanged inside `TuneError::Trainer`.
    pub fn run(&self, trainer: &dyn Trainer) -> TuneResult<TrainingConfig> {
        let config = self.prepare()?;
        trainer.train(&config).map_err(TuneError::Trainer)?;
        tracing::info!("Fine-tuning finished, checkpoints in '{}'", self.save_dir.display());
        Ok(config)
    }

    /// When the pretrained run recorded its vocabulary size, the
    /// personality vocabulary must match it exactly.
    fn check_vocab_size(&self, config: &TrainingConfig) -> TuneResult<()> {
        let Some(expected) = config.vocab_size() else {
            return Ok(());
        };
        let found = VocabStore::new(&self.personality_dir).load()?.len();
        if found != expected {
            return Err(TuneError::VocabularyMismatch {
                dir: self.personality_dir.clone(),
                expected,
                found,
            });
        }
        Ok(())
    }
}
