// ============================================================
// Layer 5 — Training Handoff
// ============================================================
// The boundary with the trainer. The model and its training
// step live outside this crate; what lives here is turning a
// pretrained run's saved configuration into the configuration
// of a fine-tuning run and handing it over.
//
//   transplant.rs — rewrites data/save/init paths and the epoch
//                   budget, then calls the Trainer seam

/// Pretrained config → fine-tuning config → trainer
pub mod transplant;
