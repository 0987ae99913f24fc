// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only:
//   - No file formats here (Layer 6)
//   - No printing here (Layer 1)
//   - Errors leave as anyhow::Error with context; the typed
//     TuneError underneath stays reachable via downcast_ref
//
// TuneUseCase is the orchestrator: one personality name in,
// every directory derived from a TuneLayout.

/// Preprocess + fine-tune one personality
pub mod tune_use_case;

/// Decode a preprocessed personality directory
pub mod inspect_use_case;
