pub mod config;
pub mod info;
pub mod inspect;
pub mod run;

use clap::{Args, ValueEnum};

use backdrop_core::consts::{DEFAULT_BUCKET_SIZE, DEFAULT_CONFIDENCE_LEVEL};
use backdrop_core::frame::BitDepth;
use backdrop_core::pipeline::config::ReconstructionConfig;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BitDepthArg {
    #[value(name = "8")]
    Eight,
    #[value(name = "16")]
    Sixteen,
}

impl From<BitDepthArg> for BitDepth {
    fn from(arg: BitDepthArg) -> Self {
        match arg {
            BitDepthArg::Eight => BitDepth::Eight,
            BitDepthArg::Sixteen => BitDepth::Sixteen,
        }
    }
}

/// Reconstruction flags shared by `run`, `info` and `inspect`.
#[derive(Args, Clone, Debug)]
pub struct ReconstructionArgs {
    /// Bucket width in intensity levels (1-128)
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Fraction of frames a pixel's mode must be seen in (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE_LEVEL)]
    pub confidence: f32,

    /// Sample depth frames are decoded to
    #[arg(long, value_enum, default_value = "8")]
    pub bit_depth: BitDepthArg,
}

impl ReconstructionArgs {
    pub fn reconstruction(&self) -> ReconstructionConfig {
        ReconstructionConfig {
            bucket_size: self.bucket_size,
            confidence_level: self.confidence,
        }
    }
}
