// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seam where the pipeline meets the trainer it does not own.
// The application layer only talks to this trait, so tests can
// swap in fakes and the binary can choose between a real
// trainer process and a dry run.

use crate::domain::training_config::TrainingConfig;

// ─── Trainer ──────────────────────────────────────────────────────────────────
/// The external training entry point.
///
/// Runs to completion or returns whatever went wrong inside it
/// (out of memory, diverging loss, ...). The pipeline does not
/// look inside those errors.
///
/// Implementations:
///   - CommandTrainer → spawns a trainer executable
///   - DryRunTrainer  → logs the handoff and stops
pub trait Trainer {
    fn train(&self, config: &TrainingConfig) -> anyhow::Result<()>;
}
