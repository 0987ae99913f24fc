// ============================================================
// Layer 6 — Trainer Handoff
// ============================================================
// Implementations of the `Trainer` seam.
//
// CommandTrainer runs the real trainer as a child process and
// streams the configuration record to it as JSON on stdin. The
// record never touches disk on our side; the trainer persists
// it with its own checkpoints. The call blocks until the child
// exits and a non-zero status comes back as an error.
//
// DryRunTrainer stops at the handoff and only logs what would
// have been sent.

use anyhow::{bail, Context, Result};
use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

use crate::domain::{training_config::TrainingConfig, traits::Trainer};

pub struct CommandTrainer {
    program: PathBuf,
    args:    Vec<String>,
}

impl CommandTrainer {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }
}

impl Trainer for CommandTrainer {
    fn train(&self, config: &TrainingConfig) -> Result<()> {
        let payload = serde_json::to_vec(config)?;

        tracing::info!(
            "Handing off to trainer '{}' (init_from={:?}, {} epochs)",
            self.program.display(),
            config.init_from,
            config.num_epochs,
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("Cannot start trainer '{}'", self.program.display()))?;

        // Dropping stdin after the write closes the pipe so the
        // trainer sees EOF
        let sent = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&payload),
            None => Ok(()),
        };

        // Always reap the child, even when the config never arrived
        let status = child
            .wait()
            .with_context(|| format!("Trainer '{}' did not finish", self.program.display()))?;

        if !status.success() {
            bail!("Trainer '{}' exited with {}", self.program.display(), status);
        }
        sent.context("Cannot send config to trainer")?;
        Ok(())
    }
}

pub struct DryRunTrainer;

impl Trainer for DryRunTrainer {
    fn train(&self, config: &TrainingConfig) -> Result<()> {
        tracing::info!(
            "Dry run: would train on '{}' into '{}' from '{:?}' for {} epochs",
            config.data_dir.display(),
            config.save_dir.display(),
            config.init_from,
            config.num_epochs,
        );
        tracing::debug!("Config: {}", serde_json::to_string(config)?);
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serde_json::Map;
    use tempfile::TempDir;

    fn config() -> TrainingConfig {
        TrainingConfig {
            data_dir:   "data/personalities/bob".into(),
            save_dir:   "save/bob".into(),
            init_from:  Some("save".into()),
            num_epochs: 25,
            batch_size: 50,
            seq_length: 25,
            model:      "lstm".into(),
            rnn_size:   256,
            num_layers: 2,
            extra:      Map::new(),
        }
    }

    #[test]
    fn test_config_arrives_on_stdin() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("received.json");

        let trainer = CommandTrainer::new(
            "sh",
            vec!["-c".into(), format!("cat > '{}'", out.display())],
        );
        trainer.train(&config()).unwrap();

        let received: TrainingConfig =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(received, config());
    }

    #[test]
    fn test_failing_trainer_propagates() {
        let trainer = CommandTrainer::new("sh", vec!["-c".into(), "cat > /dev/null; exit 3".into()]);
        let err = trainer.train(&config()).unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }

    #[test]
    fn test_trainer_ignoring_stdin_reports_its_exit_status() {
        // Exits without reading; the write may hit a closed pipe
        let trainer = CommandTrainer::new("sh", vec!["-c".into(), "exit 4".into()]);
        let err = trainer.train(&config()).unwrap_err();
        assert!(err.to_string().contains("exited with"), "got: {err:#}");
    }

    #[test]
    fn test_missing_program() {
        let trainer = CommandTrainer::new("/nonexistent/trainer", Vec::new());
        assert!(trainer.train(&config()).is_err());
    }
}
