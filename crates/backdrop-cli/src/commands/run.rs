use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use backdrop_core::pipeline::config::PipelineConfig;
use backdrop_core::pipeline::run_pipeline_reported;

use super::ReconstructionArgs;
use crate::inputs::collect_frames;
use crate::progress::BarProgressReporter;
use crate::summary::{print_run_summary, print_stats};

#[derive(Args)]
pub struct RunArgs {
    /// Frame files or directories of frames, in sequence order
    pub inputs: Vec<PathBuf>,

    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub reconstruction: ReconstructionArgs,

    /// Output file path
    #[arg(short, long, default_value = "background.png")]
    pub output: PathBuf,

    /// Also write the confidence mask to this path
    #[arg(long)]
    pub mask: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        let mut config: PipelineConfig =
            toml::from_str(&contents).context("Invalid pipeline config")?;
        if !args.inputs.is_empty() {
            config.inputs = args.inputs.clone();
        }
        config
    } else {
        build_config_from_args(args)
    };
    config.inputs = collect_frames(&config.inputs)?;

    print_run_summary(&config);

    let reporter = Arc::new(BarProgressReporter::new()?);
    let result = match run_pipeline_reported(&config, reporter.clone()) {
        Ok(result) => result,
        Err(e) => {
            reporter.abandon();
            return Err(e).context("Reconstruction failed");
        }
    };
    reporter.finish();

    print_stats(&result.stats);
    println!("\nBackground saved to {}", config.output.display());
    if let Some(ref mask) = config.confidence_mask {
        println!("Confidence mask saved to {}", mask.display());
    }

    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> PipelineConfig {
    PipelineConfig {
        inputs: args.inputs.clone(),
        output: args.output.clone(),
        confidence_mask: args.mask.clone(),
        bit_depth: args.reconstruction.bit_depth.into(),
        reconstruction: args.reconstruction.reconstruction(),
    }
}
