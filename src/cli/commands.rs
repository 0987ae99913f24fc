// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   tune        preprocess a personality, then fine-tune it
//   preprocess  only the vocabulary check + encoding
//   inspect     decode an already preprocessed personality
//
// Directory flags default to the standard layout, so the usual
// invocation is just `tune --personality NAME`.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::tune_use_case::TuneLayout;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Preprocess a personality and fine-tune the pretrained model on it
    Tune(TuneArgs),

    /// Validate and encode a personality's input.txt without training
    Preprocess(PreprocessArgs),

    /// Decode the first words of a preprocessed personality
    Inspect(InspectArgs),
}

/// Where everything lives. Shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Personality to work on (names its data and save subdirectories)
    #[arg(long)]
    pub personality: String,

    /// Base corpus directory (input.txt, vocab.json, data.npy)
    #[arg(long, default_value = "data")]
    pub base_data_dir: PathBuf,

    /// Pretrained run directory (config.json and checkpoints)
    #[arg(long, default_value = "/media/data/save")]
    pub base_save_dir: PathBuf,

    /// Parent directory of per-personality data directories
    #[arg(long, default_value = "data/personalities")]
    pub personalities_data_dir: PathBuf,

    /// Parent directory of per-personality save directories
    #[arg(long, default_value = "/media/data/personalities")]
    pub personalities_save_dir: PathBuf,

    /// Batch size the base model was trained with
    #[arg(long, default_value_t = 50)]
    pub batch_size: usize,

    /// Sequence length the base model was trained with
    #[arg(long, default_value_t = 25)]
    pub seq_length: usize,
}

/// Convert CLI LayoutArgs into the application-layer TuneLayout.
impl From<&LayoutArgs> for TuneLayout {
    fn from(a: &LayoutArgs) -> Self {
        TuneLayout {
            base_data_dir:          a.base_data_dir.clone(),
            base_save_dir:          a.base_save_dir.clone(),
            personalities_data_dir: a.personalities_data_dir.clone(),
            personalities_save_dir: a.personalities_save_dir.clone(),
            batch_size:             a.batch_size,
            seq_length:             a.seq_length,
        }
    }
}

#[derive(Args, Debug)]
pub struct TuneArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Trainer executable; receives the config as JSON on stdin
    #[arg(long, default_value = "train-word-rnn")]
    pub trainer: PathBuf,

    /// Extra arguments passed to the trainer executable
    #[arg(long = "trainer-arg", allow_hyphen_values = true)]
    pub trainer_args: Vec<String>,

    /// Stop at the trainer handoff and only log the config
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct PreprocessArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// How many words to decode
    #[arg(long, default_value_t = 50)]
    pub limit: usize,
}
