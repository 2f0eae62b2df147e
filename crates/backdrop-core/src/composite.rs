use ndarray::{Array2, Array3};

use crate::consts::{CONFIDENCE_SCALE, MAX_CONFIDENCE};
use crate::error::Result;
use crate::frame::{BitDepth, Frame};
use crate::reconstruct::Accumulator;

/// Per-pixel confidence of a reconstruction.
#[derive(Clone, Debug)]
pub struct ConfidenceMask {
    /// `min(255, matched * 256 / total)`, shape = (height, width)
    pub confidence: Array2<u8>,
    /// Pixels that fell back to the temporal mean.
    pub low_confidence: Array2<bool>,
}

impl ConfidenceMask {
    /// Render the mask for inspection.
    ///
    /// Confident pixels are grey at their confidence; low-confidence pixels
    /// are tinted red.
    pub fn to_frame(&self) -> Frame {
        let (h, w) = self.confidence.dim();
        let mut data = Array3::<u16>::zeros((h, w, 3));
        for ((row, col), &conf) in self.confidence.indexed_iter() {
            let conf = conf as u16;
            let rgb = if self.low_confidence[[row, col]] {
                [255, conf / 2, conf / 2]
            } else {
                [conf, conf, conf]
            };
            for (ch, v) in rgb.into_iter().enumerate() {
                data[[row, col, ch]] = v;
            }
        }
        Frame::new(data, BitDepth::Eight)
    }

    pub fn low_confidence_count(&self) -> usize {
        self.low_confidence.iter().filter(|&&low| low).count()
    }
}

/// Counters reported alongside a reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconstructionStats {
    pub total_frames: usize,
    /// Matched frames required to trust a pixel.
    pub conf_frames: usize,
    pub buckets: usize,
    /// Pixels below the threshold after the strict pass.
    pub first_pass_unresolved: usize,
    /// Pixels still below the threshold after the rescue pass.
    pub second_pass_unresolved: usize,
}

/// Reconstructed background and its confidence.
#[derive(Clone, Debug)]
pub struct Reconstruction {
    pub background: Frame,
    pub mask: ConfidenceMask,
    pub stats: ReconstructionStats,
}

/// Turn accumulated sums into final pixel values.
///
/// Pixels with at least `conf_frames` matches take the mean of their matched
/// frames. All others take the mean over the whole sequence and are flagged
/// low confidence; their matched count is never used as a divisor.
pub fn composite(
    accumulator: &Accumulator,
    conf_frames: usize,
    total_frames: usize,
    bit_depth: BitDepth,
) -> Result<(Frame, ConfidenceMask)> {
    let geometry = accumulator.geometry();
    let (w, h, c) = (geometry.width, geometry.height, geometry.channels);
    let max_value = bit_depth.max_value() as f64;

    let mut samples = vec![0u16; geometry.sample_count()];
    let mut confidence = Array2::<u8>::zeros((h, w));
    let mut low_confidence = Array2::from_elem((h, w), false);

    let matched_sums = accumulator.matched_sums().chunks(c);
    let total_sums = accumulator.total_sums().chunks(c);
    let counts = accumulator.matched_counts();

    for (idx, ((out, matched), total)) in samples
        .chunks_mut(c)
        .zip(matched_sums)
        .zip(total_sums)
        .enumerate()
    {
        let count = counts[idx];
        let (row, col) = (idx / w, idx % w);

        let low = count == 0 || (count as usize) < conf_frames;
        let (sums, divisor) = if low {
            (total, total_frames as f64)
        } else {
            (matched, count as f64)
        };
        for (o, &s) in out.iter_mut().zip(sums) {
            *o = (s / divisor).clamp(0.0, max_value) as u16;
        }

        let scaled = count as u64 * CONFIDENCE_SCALE / total_frames.max(1) as u64;
        confidence[[row, col]] = scaled.min(MAX_CONFIDENCE as u64) as u8;
        low_confidence[[row, col]] = low;
    }

    let background = Frame::new(Array3::from_shape_vec((h, w, c), samples)?, bit_depth);
    let mask = ConfidenceMask {
        confidence,
        low_confidence,
    };
    Ok((background, mask))
}
