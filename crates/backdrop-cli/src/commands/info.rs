use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use backdrop_core::io::ImageSequence;
use backdrop_core::pipeline::describe_sequence;

use super::ReconstructionArgs;
use crate::inputs::collect_frames;
use crate::summary::print_sequence_summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Frame files or directories of frames
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub reconstruction: ReconstructionArgs,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let paths = collect_frames(&args.inputs)?;
    let first = paths[0].clone();
    let sequence = ImageSequence::open(paths, args.reconstruction.bit_depth.into())?;
    let summary = describe_sequence(&sequence, &args.reconstruction.reconstruction());

    println!("  First frame:  {}", first.display());
    print_sequence_summary(&summary);

    Ok(())
}
