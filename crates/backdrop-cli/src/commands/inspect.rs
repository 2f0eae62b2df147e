use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use backdrop_core::io::ImageSequence;
use backdrop_core::pipeline::{inspect_pixel, ChannelReport, NoOpReporter};

use super::ReconstructionArgs;
use crate::inputs::collect_frames;

#[derive(Args)]
pub struct InspectArgs {
    /// Frame files or directories of frames
    pub inputs: Vec<PathBuf>,

    /// Pixel column
    #[arg(long)]
    pub x: usize,

    /// Pixel row
    #[arg(long)]
    pub y: usize,

    /// Also list empty buckets
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub reconstruction: ReconstructionArgs,
}

pub fn run(args: &InspectArgs) -> Result<()> {
    let paths = collect_frames(&args.inputs)?;
    let sequence = ImageSequence::open(paths, args.reconstruction.bit_depth.into())?;
    let report = inspect_pixel(
        &sequence,
        &args.reconstruction.reconstruction(),
        args.x,
        args.y,
        &NoOpReporter,
    )?;

    println!(
        "Pixel ({}, {}) over {} frames",
        report.x, report.y, report.frames
    );
    for (ch, channel) in report.channels.iter().enumerate() {
        println!();
        print_channel(ch, channel, args.all);
    }

    Ok(())
}

fn print_channel(ch: usize, channel: &ChannelReport, all: bool) {
    let mode = channel.mode;
    println!(
        "Channel {}: mode bucket {} ({}), {} frames",
        ch,
        mode.bucket_id,
        if mode.is_primary { "primary" } else { "offset" },
        mode.confidence
    );
    println!("  {:>6}  {:>8}  {:>8}", "bucket", "primary", "offset");
    for (bucket, (primary, offset)) in channel.primary.iter().zip(&channel.offset).enumerate() {
        if all || *primary > 0 || *offset > 0 {
            println!("  {:>6}  {:>8}  {:>8}", bucket, primary, offset);
        }
    }
}
