// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// From raw text to the files the trainer reads:
//
//   base input.txt
//       │
//       ▼
//   CorpusLoader        → vocab.json (+ cached data.npy)
//       │
//       ▼  vocabulary
//   PersonalityEncoder  → personality data.npy + vocab.json copy
//
// encoding.rs holds the word splitting and word → id mapping
// both steps share.

/// Raw text file name, in both base and personality directories
pub const INPUT_FILE: &str = "input.txt";

/// Encoded tensor file name
pub const TENSOR_FILE: &str = "data.npy";

/// Splitting, encoding and frequency-ranked vocab building
pub mod encoding;

/// Loads (or lazily builds) the base corpus vocabulary
pub mod corpus_loader;

/// Validates and encodes one personality's text
pub mod personality_encoder;
