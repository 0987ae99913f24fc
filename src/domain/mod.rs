// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types shared by every other layer:
//
//   vocabulary.rs      — the frozen word → id mapping
//   training_config.rs — the record a training run saved
//   error.rs           — every way the pipeline can fail
//   traits.rs          — the seam to the external trainer
//
// No file I/O lives here.

pub mod error;
pub mod training_config;
pub mod traits;
pub mod vocabulary;
