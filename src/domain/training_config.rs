// ============================================================
// Layer 3 — Training Configuration Record
// ============================================================
// The configuration a training run saved next to its checkpoint.
//
// Fine-tuning must reuse this record rather than build a fresh
// one: the checkpoint's weight shapes were fixed by the pretrained
// run's architecture fields (model, rnn_size, num_layers,
// vocab_size, seq_length). Only four fields are ever rewritten by this
// pipeline — data_dir, save_dir, init_from and num_epochs.
//
// Keys this struct does not name are kept in `extra` and written
// back out unchanged, so the trainer still sees every value the
// pretrained run recorded. `vocab_size` lives there too: some
// trainers omit it, some write null, and either form must survive.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    // ── Paths ────────────────────────────────────────────────
    /// Directory holding data.npy and vocab.json
    pub data_dir:   PathBuf,

    /// Where the trainer writes checkpoints
    pub save_dir:   PathBuf,

    /// Run directory whose checkpoint initialises the weights
    #[serde(default)]
    pub init_from:  Option<PathBuf>,

    // ── Hyperparameters ──────────────────────────────────────
    pub num_epochs: usize,
    pub batch_size: usize,
    pub seq_length: usize,

    // ── Architecture ─────────────────────────────────────────
    /// Cell type, e.g. "lstm", "gru", "rnn"
    pub model:      String,
    pub rnn_size:   usize,
    pub num_layers: usize,

    /// Everything else, passed through untouched
    #[serde(flatten)]
    pub extra:      Map<String, Value>,
}

impl TrainingConfig {
    /// Vocabulary size the pretrained run recorded, if any.
    /// A missing key and an explicit null both read as `None`.
    pub fn vocab_size(&self) -> Option<usize> {
        self.extra
            .get("vocab_size")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Check the fields the trainer cannot work without.
    /// Returns a description of the first bad field.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("num_layers", self.num_layers),
            ("rnn_size",   self.rnn_size),
            ("batch_size", self.batch_size),
            ("seq_length", self.seq_length),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(format!("{name} must be positive"));
            }
        }
        if self.model.trim().is_empty() {
            return Err("model must name a cell type".to_string());
        }
        match self.extra.get("vocab_size") {
            None | Some(Value::Null) => {}
            Some(v) if v.as_u64().is_some() => {}
            Some(v) => return Err(format!("vocab_size must be a non-negative integer, got {v}")),
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const SAVED: &str = r#"{
        "data_dir": "data",
        "save_dir": "save",
        "init_from": null,
        "num_epochs": 20,
        "batch_size": 50,
        "seq_length": 25,
        "model": "lstm",
        "rnn_size": 256,
        "num_layers": 2,
        "grad_clip": 5.0,
        "learning_rate": 0.002,
        "decay_rate": 0.97,
        "save_every": 1000
    }"#;

    #[test]
    fn test_unknown_keys_pass_through() {
        let cfg: TrainingConfig = serde_json::from_str(SAVED).unwrap();
        assert_eq!(cfg.num_epochs, 20);
        assert_eq!(cfg.init_from, None);
        assert_eq!(cfg.vocab_size(), None);
        assert_eq!(cfg.extra["learning_rate"], serde_json::json!(0.002));
        assert_eq!(cfg.extra["save_every"], serde_json::json!(1000));

        let written: Value = serde_json::to_value(&cfg).unwrap();
        let original: Value = serde_json::from_str(SAVED).unwrap();
        assert_eq!(written, original);
    }

    #[test]
    fn test_validate_rejects_zero_fields() {
        let mut cfg: TrainingConfig = serde_json::from_str(SAVED).unwrap();
        assert!(cfg.validate().is_ok());

        cfg.batch_size = 0;
        assert_eq!(cfg.validate().unwrap_err(), "batch_size must be positive");

        cfg.batch_size = 50;
        cfg.model = " ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_null_vocab_size_is_kept() {
        let mut raw: Value = serde_json::from_str(SAVED).unwrap();
        raw["vocab_size"] = Value::Null;

        let cfg: TrainingConfig = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(cfg.vocab_size(), None);
        assert!(cfg.validate().is_ok());
        assert_eq!(serde_json::to_value(&cfg).unwrap(), raw);
    }

    #[test]
    fn test_recorded_vocab_size() {
        let mut raw: Value = serde_json::from_str(SAVED).unwrap();
        raw["vocab_size"] = serde_json::json!(4000);
        let cfg: TrainingConfig = serde_json::from_value(raw).unwrap();
        assert_eq!(cfg.vocab_size(), Some(4000));

        let mut raw: Value = serde_json::from_str(SAVED).unwrap();
        raw["vocab_size"] = serde_json::json!("4000");
        let cfg: TrainingConfig = serde_json::from_value(raw).unwrap();
        assert!(cfg.validate().is_err());
    }
}
