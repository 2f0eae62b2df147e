use std::sync::Arc;

use tracing::info;

use crate::bucket::BucketMapper;
use crate::composite::{composite, Reconstruction, ReconstructionStats};
use crate::consts::MIN_FRAME_COUNT;
use crate::error::{BackdropError, Result};
use crate::histogram::{build_histograms, Histograms};
use crate::io::image_io::save_frame;
use crate::io::source::{FrameSource, ImageSequence};
use crate::mode::{select_mode, select_modes};
use crate::reconstruct::{confidence_frames, reconstruct};

use super::config::{PipelineConfig, ReconstructionConfig};
use super::types::{
    ChannelReport, NoOpReporter, PipelineStage, PixelReport, ProgressReporter, SequenceSummary,
};

fn ensure_enough_frames(source: &dyn FrameSource) -> Result<()> {
    let found = source.len();
    if found < MIN_FRAME_COUNT {
        return Err(BackdropError::InsufficientFrames {
            found,
            required: MIN_FRAME_COUNT,
        });
    }
    Ok(())
}

fn mapper_for(source: &dyn FrameSource, config: &ReconstructionConfig) -> BucketMapper {
    BucketMapper::new(config.bucket_size, source.bit_depth().max_value())
}

/// Reconstruct the static background of `source`.
///
/// Stages run strictly in order: histograms, mode selection, strict pass,
/// gate, rescue pass, compositing. Every stage re-reads the sequence, and any
/// decode failure aborts the run.
pub fn reconstruct_background(
    source: &dyn FrameSource,
    config: &ReconstructionConfig,
    reporter: &dyn ProgressReporter,
) -> Result<Reconstruction> {
    ensure_enough_frames(source)?;
    let config = config.validated();
    let total = source.len();
    let mapper = mapper_for(source, &config);
    let conf_frames = confidence_frames(config.confidence_level, total);
    info!(
        frames = total,
        bucket_size = mapper.bucket_size(),
        buckets = mapper.buckets(),
        confidence_level = config.confidence_level,
        conf_frames,
        "Reconstructing background"
    );

    let histograms = build_histograms(source, &mapper, reporter)?;

    reporter.begin_stage(PipelineStage::ModeSelection, None);
    let modes = select_modes(&histograms);
    drop(histograms);
    reporter.finish_stage();

    let (accumulator, first_pass_unresolved) =
        reconstruct(source, &mapper, &modes, conf_frames, reporter)?;

    reporter.begin_stage(PipelineStage::Compositing, None);
    let (background, mask) = composite(&accumulator, conf_frames, total, source.bit_depth())?;
    reporter.finish_stage();

    let stats = ReconstructionStats {
        total_frames: total,
        conf_frames,
        buckets: mapper.buckets(),
        first_pass_unresolved,
        second_pass_unresolved: mask.low_confidence_count(),
    };
    info!(
        first_pass_unresolved = stats.first_pass_unresolved,
        second_pass_unresolved = stats.second_pass_unresolved,
        "Reconstruction complete"
    );

    Ok(Reconstruction {
        background,
        mask,
        stats,
    })
}

/// Read the configured frames, reconstruct, and write the results.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<Reconstruction> {
    let source = ImageSequence::open(config.inputs.clone(), config.bit_depth)?;
    let result = reconstruct_background(&source, &config.reconstruction, reporter.as_ref())?;

    reporter.begin_stage(PipelineStage::Writing, None);
    save_frame(&result.background, &config.output)?;
    info!(path = %config.output.display(), "Wrote background");
    if let Some(ref mask_path) = config.confidence_mask {
        save_frame(&result.mask.to_frame(), mask_path)?;
        info!(path = %mask_path.display(), "Wrote confidence mask");
    }
    reporter.finish_stage();

    Ok(result)
}

/// Run the pipeline without progress reporting.
pub fn run_pipeline(config: &PipelineConfig) -> Result<Reconstruction> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}

/// Histogram counts and selected mode for every channel of pixel `(x, y)`.
pub fn inspect_pixel(
    source: &dyn FrameSource,
    config: &ReconstructionConfig,
    x: usize,
    y: usize,
    reporter: &dyn ProgressReporter,
) -> Result<PixelReport> {
    let geometry = source.geometry();
    if geometry.pixel_index(x, y).is_none() {
        return Err(BackdropError::PixelOutOfRange {
            x,
            y,
            width: geometry.width,
            height: geometry.height,
        });
    }

    let config = config.validated();
    let mapper = mapper_for(source, &config);
    let histograms = build_histograms(source, &mapper, reporter)?;

    let channels = (0..geometry.channels)
        .filter_map(|ch| histograms.pixel(x, y, ch))
        .map(|(primary, offset)| ChannelReport {
            primary: primary.to_vec(),
            offset: offset.to_vec(),
            mode: select_mode(primary, offset),
        })
        .collect();

    Ok(PixelReport {
        x,
        y,
        frames: histograms.frames(),
        channels,
    })
}

/// Describe `source` and the settings a reconstruction would use.
pub fn describe_sequence(
    source: &dyn FrameSource,
    config: &ReconstructionConfig,
) -> SequenceSummary {
    let config = config.validated();
    let geometry = source.geometry();
    let buckets = config.buckets(source.bit_depth());
    SequenceSummary {
        frames: source.len(),
        geometry,
        bit_depth: source.bit_depth(),
        bucket_size: config.bucket_size,
        buckets,
        confidence_level: config.confidence_level,
        conf_frames: confidence_frames(config.confidence_level, source.len()),
        histogram_bytes: Histograms::memory_bytes(geometry, buckets),
    }
}
