// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the filesystem or other processes:
//
//   npy.rs             — token tensors as NumPy .npy files,
//                        written via a temp file + rename
//
//   vocab_store.rs     — vocab.json load / save / verbatim copy
//
//   config_store.rs    — reads a training run's config.json
//
//   trainer_process.rs — hands the final config to the external
//                        trainer (child process or dry run)
//
// Other layers call into these instead of using std::fs
// directly, so every I/O error comes back tagged with its path.

pub mod config_store;
pub mod npy;
pub mod trainer_process;
pub mod vocab_store;
