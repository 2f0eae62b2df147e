use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{
    DEFAULT_BUCKET_SIZE, DEFAULT_CONFIDENCE_LEVEL, MAX_BUCKET_SIZE, MIN_BUCKET_SIZE,
};
use crate::frame::BitDepth;

/// Parameters of the histogram reconstruction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionConfig {
    /// Width of a bucket in intensity levels (1..=128).
    #[serde(default = "default_bucket_size")]
    pub bucket_size: u32,
    /// Fraction of frames (0.0..=1.0) a pixel's mode must be matched in.
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f32,
}

fn default_bucket_size() -> u32 {
    DEFAULT_BUCKET_SIZE
}
fn default_confidence_level() -> f32 {
    DEFAULT_CONFIDENCE_LEVEL
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

impl ReconstructionConfig {
    /// Bring out-of-range values back into range.
    ///
    /// A bucket size outside 1..=128 is reset to the default. The confidence
    /// level is clamped into [0, 1], NaN falls back to the default. Both
    /// corrections are logged, never rejected.
    pub fn validated(&self) -> Self {
        let mut config = self.clone();

        if !(MIN_BUCKET_SIZE..=MAX_BUCKET_SIZE).contains(&config.bucket_size) {
            warn!(
                bucket_size = config.bucket_size,
                default = DEFAULT_BUCKET_SIZE,
                "Bucket size out of range, using default"
            );
            config.bucket_size = DEFAULT_BUCKET_SIZE;
        }

        if config.confidence_level.is_nan() {
            warn!("Confidence level is NaN, using default");
            config.confidence_level = DEFAULT_CONFIDENCE_LEVEL;
        } else if !(0.0..=1.0).contains(&config.confidence_level) {
            let clamped = config.confidence_level.clamp(0.0, 1.0);
            warn!(
                confidence_level = config.confidence_level,
                clamped, "Confidence level out of range, clamping"
            );
            config.confidence_level = clamped;
        }

        config
    }

    /// Number of buckets per partition at `bit_depth`.
    pub fn buckets(&self, bit_depth: BitDepth) -> usize {
        ((bit_depth.max_value() + 1) / self.bucket_size.max(1)) as usize
    }
}

/// Everything a file-to-file run needs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Frame files, in sequence order.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    /// Where to write the confidence mask, if anywhere.
    #[serde(default)]
    pub confidence_mask: Option<PathBuf>,
    #[serde(default)]
    pub bit_depth: BitDepth,
    #[serde(default)]
    pub reconstruction: ReconstructionConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: PathBuf::from("background.png"),
            confidence_mask: None,
            bit_depth: BitDepth::default(),
            reconstruction: ReconstructionConfig::default(),
        }
    }
}
