// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to its
// use case. Printing results to the operator happens here and
// nowhere else.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, PreprocessArgs, TuneArgs};

use crate::application::{inspect_use_case::InspectUseCase, tune_use_case::{TuneLayout, TuneUseCase}};
use crate::domain::traits::Trainer;
use crate::infra::trainer_process::{CommandTrainer, DryRunTrainer};

#[derive(Parser, Debug)]
#[command(
    name = "personality-tune",
    version,
    about = "Fine-tune a pretrained word model on a personality corpus restricted to its vocabulary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Tune(args)       => run_tune(args),
            Commands::Preprocess(args) => run_preprocess(args),
            Commands::Inspect(args)    => run_inspect(args),
        }
    }
}

fn run_tune(args: TuneArgs) -> Result<()> {
    let layout = TuneLayout::from(&args.layout);

    let trainer: Box<dyn Trainer> = if args.dry_run {
        Box::new(DryRunTrainer)
    } else {
        Box::new(CommandTrainer::new(args.trainer, args.trainer_args))
    };

    let config = TuneUseCase::new(layout, &args.layout.personality).execute(trainer.as_ref())?;

    println!(
        "Personality '{}' fine-tuned for {} epochs. Checkpoints in '{}'.",
        args.layout.personality,
        config.num_epochs,
        config.save_dir.display()
    );
    Ok(())
}

fn run_preprocess(args: PreprocessArgs) -> Result<()> {
    let layout  = TuneLayout::from(&args.layout);
    let encoded = TuneUseCase::new(layout, &args.layout.personality).preprocess()?;

    println!(
        "Encoded {} words into '{}' (vocabulary of {} words copied to '{}').",
        encoded.tokens,
        encoded.tensor_path.display(),
        encoded.vocab_size,
        encoded.vocab_path.display()
    );
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let data_dir = TuneLayout::from(&args.layout).data_dir(&args.layout.personality);
    let report   = InspectUseCase::new(&data_dir).run(args.limit)?;

    println!(
        "{}: {} words, vocabulary of {}",
        data_dir.display(),
        report.tokens,
        report.vocab_size
    );
    println!("{}", report.preview.join(" "));
    Ok(())
}
