use rayon::prelude::*;
use tracing::{debug, info};

use crate::bucket::BucketMapper;
use crate::consts::PARALLEL_MIN_PIXELS;
use crate::error::Result;
use crate::frame::{Frame, FrameGeometry};
use crate::io::source::{read_frame_checked, FrameSource};
use crate::mode::{strongest_channel, ModeMap};
use crate::pipeline::{PipelineStage, ProgressReporter};

/// Matched frames a pixel needs before its reconstruction is trusted.
///
/// The product is taken in `f32` so that levels such as 0.7 floor to the
/// whole number they denote (0.7 of 10 frames is 7, not 6).
pub fn confidence_frames(confidence_level: f32, total_frames: usize) -> usize {
    ((confidence_level * total_frames as f32).floor() as usize).max(1)
}

/// Running sums of the two reconstruction passes.
///
/// `matched_sum` and `total_sum` hold one value per pixel×channel,
/// `matched_count` and `resolved` one value per pixel. A pixel's channels are
/// always accepted together, so one count serves all of them.
#[derive(Clone, Debug)]
pub struct Accumulator {
    geometry: FrameGeometry,
    matched_sum: Vec<f64>,
    total_sum: Vec<f64>,
    matched_count: Vec<u32>,
    resolved: Vec<bool>,
}

impl Accumulator {
    pub fn new(geometry: FrameGeometry) -> Self {
        Self {
            geometry,
            matched_sum: vec![0.0; geometry.sample_count()],
            total_sum: vec![0.0; geometry.sample_count()],
            matched_count: vec![0; geometry.pixel_count()],
            resolved: vec![false; geometry.pixel_count()],
        }
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    pub fn matched_sums(&self) -> &[f64] {
        &self.matched_sum
    }

    pub fn total_sums(&self) -> &[f64] {
        &self.total_sum
    }

    pub fn matched_counts(&self) -> &[u32] {
        &self.matched_count
    }

    pub fn resolved(&self) -> &[bool] {
        &self.resolved
    }

    /// Matched-frame count of pixel `(x, y)`.
    pub fn matched_count(&self, x: usize, y: usize) -> Option<u32> {
        let idx = self.geometry.pixel_index(x, y)?;
        Some(self.matched_count[idx])
    }

    /// Strict pass over one frame: a pixel is accepted only when every
    /// channel falls into its mode bucket. Every value goes into `total_sum`.
    pub fn add_strict(&mut self, frame: &Frame, mapper: &BucketMapper, modes: &ModeMap) {
        debug_assert_eq!(frame.geometry(), self.geometry);
        let c = self.geometry.channels;
        let samples = frame.samples();

        self.matched_sum
            .par_chunks_mut(c)
            .zip(self.total_sum.par_chunks_mut(c))
            .zip(self.matched_count.par_iter_mut())
            .zip(modes.entries().par_chunks(c))
            .zip(samples.par_chunks(c))
            .with_min_len(PARALLEL_MIN_PIXELS)
            .for_each(|((((matched, total), count), entries), pixel)| {
                for (t, &v) in total.iter_mut().zip(pixel) {
                    *t += v as f64;
                }

                let hit = pixel
                    .iter()
                    .zip(entries)
                    .all(|(&v, entry)| mapper.matches(v as u32, entry));
                if hit {
                    for (m, &v) in matched.iter_mut().zip(pixel) {
                        *m += v as f64;
                    }
                    *count += 1;
                }
            });
    }

    /// Split pixels into resolved and unresolved after the strict pass.
    ///
    /// Unresolved pixels lose their matched sums so the rescue pass starts
    /// from zero. Returns the number of unresolved pixels.
    pub fn apply_gate(&mut self, conf_frames: usize) -> usize {
        let c = self.geometry.channels;

        self.matched_sum
            .par_chunks_mut(c)
            .zip(self.matched_count.par_iter_mut())
            .zip(self.resolved.par_iter_mut())
            .with_min_len(PARALLEL_MIN_PIXELS)
            .map(|((matched, count), resolved)| {
                if (*count as usize) < conf_frames {
                    matched.iter_mut().for_each(|m| *m = 0.0);
                    *count = 0;
                    *resolved = false;
                    1usize
                } else {
                    *resolved = true;
                    0
                }
            })
            .sum()
    }

    /// Rescue pass over one frame for unresolved pixels: only the channel
    /// with the strongest mode is tested, and a match accepts the whole pixel.
    /// Resolved pixels are left untouched.
    pub fn add_rescue(&mut self, frame: &Frame, mapper: &BucketMapper, modes: &ModeMap) {
        debug_assert_eq!(frame.geometry(), self.geometry);
        let c = self.geometry.channels;
        let samples = frame.samples();

        self.matched_sum
            .par_chunks_mut(c)
            .zip(self.matched_count.par_iter_mut())
            .zip(self.resolved.par_iter())
            .zip(modes.entries().par_chunks(c))
            .zip(samples.par_chunks(c))
            .with_min_len(PARALLEL_MIN_PIXELS)
            .for_each(|((((matched, count), &resolved), entries), pixel)| {
                if resolved {
                    return;
                }
                let ch = strongest_channel(entries);
                if !mapper.matches(pixel[ch] as u32, &entries[ch]) {
                    return;
                }
                for (m, &v) in matched.iter_mut().zip(pixel) {
                    *m += v as f64;
                }
                *count += 1;
            });
    }
}

/// Run the strict pass over the whole sequence.
pub fn first_pass(
    source: &dyn FrameSource,
    mapper: &BucketMapper,
    modes: &ModeMap,
    accumulator: &mut Accumulator,
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    let total = source.len();
    reporter.begin_stage(PipelineStage::FirstPass, Some(total));
    for index in 0..total {
        let frame = read_frame_checked(source, index)?;
        accumulator.add_strict(&frame, mapper, modes);
        debug!(frame = index, "First pass");
        reporter.advance(index + 1);
    }
    reporter.finish_stage();
    Ok(())
}

/// Run the rescue pass over the whole sequence.
pub fn second_pass(
    source: &dyn FrameSource,
    mapper: &BucketMapper,
    modes: &ModeMap,
    accumulator: &mut Accumulator,
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    let total = source.len();
    reporter.begin_stage(PipelineStage::SecondPass, Some(total));
    for index in 0..total {
        let frame = read_frame_checked(source, index)?;
        accumulator.add_rescue(&frame, mapper, modes);
        debug!(frame = index, "Second pass");
        reporter.advance(index + 1);
    }
    reporter.finish_stage();
    Ok(())
}

/// Both passes with the gate in between.
///
/// Returns the accumulator and the number of pixels left unresolved by the
/// strict pass.
pub fn reconstruct(
    source: &dyn FrameSource,
    mapper: &BucketMapper,
    modes: &ModeMap,
    conf_frames: usize,
    reporter: &dyn ProgressReporter,
) -> Result<(Accumulator, usize)> {
    let mut accumulator = Accumulator::new(source.geometry());

    first_pass(source, mapper, modes, &mut accumulator, reporter)?;
    let unresolved = accumulator.apply_gate(conf_frames);
    info!(
        unresolved,
        pixels = accumulator.geometry().pixel_count(),
        conf_frames,
        "First pass complete"
    );

    if unresolved > 0 {
        second_pass(source, mapper, modes, &mut accumulator, reporter)?;
    } else {
        info!("Every pixel resolved, skipping second pass");
    }

    Ok((accumulator, unresolved))
}
