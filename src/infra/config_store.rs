// ============================================================
// Layer 6 — Run Config Store
// ============================================================
// Reads the `config.json` a training run leaves in its save
// directory next to its checkpoints:
//
//   save/
//     config.json       ← TrainingConfig (architecture + paths)
//     checkpoint        ← trainer's own files, opaque here
//     model.ckpt-*      ←
//
// Only reading is needed. The fine-tuning run's own config is
// written by the trainer as part of its checkpointing.

use std::{fs, io::ErrorKind, path::PathBuf};

use crate::domain::{
    error::{TuneError, TuneResult},
    training_config::TrainingConfig,
};

pub const CONFIG_FILE: &str = "config.json";

pub struct RunConfigStore {
    /// A training run's save directory
    dir: PathBuf,
}

impl RunConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Load and validate the run's configuration record.
    pub fn load(&self) -> TuneResult<TrainingConfig> {
        let path = self.path();

        let json = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TuneError::ConfigNotFound { path: path.clone() },
            _ => TuneError::io(&path, e),
        })?;

        let config: TrainingConfig = serde_json::from_str(&json)
            .map_err(|e| TuneError::invalid(&path, e.to_string()))?;
        config
            .validate()
            .map_err(|reason| TuneError::invalid(&path, reason))?;

        tracing::debug!(
            "Loaded run config from '{}' ({} x {} layers, {} epochs)",
            path.display(),
            config.model,
            config.num_layers,
            config.num_epochs,
        );
        Ok(config)
    }
}
