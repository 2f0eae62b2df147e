use rayon::prelude::*;
use tracing::{debug, info};

use crate::bucket::BucketMapper;
use crate::consts::PARALLEL_MIN_PIXELS;
use crate::error::Result;
use crate::frame::{Frame, FrameGeometry};
use crate::io::source::{read_frame_checked, FrameSource};
use crate::pipeline::{PipelineStage, ProgressReporter};

/// Primary and offset bucket counts for every pixel×channel.
///
/// Both buffers are laid out `[pixel][channel][bucket]`, so all counters of
/// one pixel form a single contiguous chunk of `channels * buckets` entries.
#[derive(Clone, Debug)]
pub struct Histograms {
    geometry: FrameGeometry,
    buckets: usize,
    frames: usize,
    primary: Vec<u32>,
    offset: Vec<u32>,
}

impl Histograms {
    pub fn new(geometry: FrameGeometry, buckets: usize) -> Self {
        let len = geometry.sample_count() * buckets;
        Self {
            geometry,
            buckets,
            frames: 0,
            primary: vec![0; len],
            offset: vec![0; len],
        }
    }

    /// Bytes needed by both counter buffers.
    pub fn memory_bytes(geometry: FrameGeometry, buckets: usize) -> usize {
        2 * geometry.sample_count() * buckets * std::mem::size_of::<u32>()
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    pub fn buckets(&self) -> usize {
        self.buckets
    }

    /// Number of frames accumulated so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn primary_counts(&self) -> &[u32] {
        &self.primary
    }

    pub fn offset_counts(&self) -> &[u32] {
        &self.offset
    }

    /// `(primary, offset)` counts of one pixel×channel.
    pub fn pixel(&self, x: usize, y: usize, channel: usize) -> Option<(&[u32], &[u32])> {
        if channel >= self.geometry.channels {
            return None;
        }
        let idx = self.geometry.pixel_index(x, y)?;
        let start = (idx * self.geometry.channels + channel) * self.buckets;
        let range = start..start + self.buckets;
        Some((&self.primary[range.clone()], &self.offset[range]))
    }

    /// Count one frame into both partitions.
    ///
    /// The frame must match the histogram geometry.
    pub fn accumulate(&mut self, frame: &Frame, mapper: &BucketMapper) {
        debug_assert_eq!(frame.geometry(), self.geometry);
        let c = self.geometry.channels;
        let buckets = self.buckets;
        let pixel_span = c * buckets;
        let samples = frame.samples();

        self.primary
            .par_chunks_mut(pixel_span)
            .zip(self.offset.par_chunks_mut(pixel_span))
            .zip(samples.par_chunks(c))
            .with_min_len(PARALLEL_MIN_PIXELS)
            .for_each(|((primary, offset), pixel)| {
                for (ch, &value) in pixel.iter().enumerate() {
                    let base = ch * buckets;
                    primary[base + mapper.primary(value as u32) as usize] += 1;
                    offset[base + mapper.offset(value as u32) as usize] += 1;
                }
            });

        self.frames += 1;
    }
}

/// Read every frame of `source` once and build its histograms.
///
/// Any decode failure aborts the whole build.
pub fn build_histograms(
    source: &dyn FrameSource,
    mapper: &BucketMapper,
    reporter: &dyn ProgressReporter,
) -> Result<Histograms> {
    let geometry = source.geometry();
    let total = source.len();
    info!(
        frames = total,
        buckets = mapper.buckets(),
        bytes = Histograms::memory_bytes(geometry, mapper.buckets()),
        "Building histograms"
    );

    reporter.begin_stage(PipelineStage::Histogram, Some(total));
    let mut histograms = Histograms::new(geometry, mapper.buckets());
    for index in 0..total {
        let frame = read_frame_checked(source, index)?;
        histograms.accumulate(&frame, mapper);
        debug!(frame = index, "Counted frame");
        reporter.advance(index + 1);
    }
    reporter.finish_stage();

    Ok(histograms)
}
