use rayon::prelude::*;

use crate::consts::PARALLEL_MIN_PIXELS;
use crate::frame::FrameGeometry;
use crate::histogram::Histograms;

/// Dominant bucket of one pixel×channel histogram pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeEntry {
    pub bucket_id: u32,
    /// `true` when the bucket belongs to the primary partition.
    pub is_primary: bool,
    /// Frame count backing the bucket.
    pub confidence: u32,
}

/// Pick the fullest bucket across both partitions.
///
/// Buckets are scanned in ascending order, primary before offset at each
/// index, and only a strictly larger count replaces the current winner.
pub fn select_mode(primary: &[u32], offset: &[u32]) -> ModeEntry {
    let mut best = ModeEntry {
        bucket_id: 0,
        is_primary: true,
        confidence: 0,
    };

    for (i, (&a, &b)) in primary.iter().zip(offset).enumerate() {
        if a > best.confidence {
            best = ModeEntry {
                bucket_id: i as u32,
                is_primary: true,
                confidence: a,
            };
        }
        if b > best.confidence {
            best = ModeEntry {
                bucket_id: i as u32,
                is_primary: false,
                confidence: b,
            };
        }
    }

    best
}

/// Index of the channel whose mode is backed by the most frames.
/// The lowest index wins ties.
pub fn strongest_channel(entries: &[ModeEntry]) -> usize {
    let mut best = 0;
    for (channel, entry) in entries.iter().enumerate().skip(1) {
        if entry.confidence > entries[best].confidence {
            best = channel;
        }
    }
    best
}

/// Mode entries for every pixel×channel, laid out `[pixel][channel]`.
#[derive(Clone, Debug)]
pub struct ModeMap {
    geometry: FrameGeometry,
    entries: Vec<ModeEntry>,
}

impl ModeMap {
    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// All entries, `channels` consecutive entries per pixel.
    pub fn entries(&self) -> &[ModeEntry] {
        &self.entries
    }

    /// Entries of every channel of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[ModeEntry]> {
        let c = self.geometry.channels;
        let idx = self.geometry.pixel_index(x, y)?;
        Some(&self.entries[idx * c..(idx + 1) * c])
    }
}

/// Reduce every histogram pair to its mode.
///
/// Each pixel's counters and entries form one disjoint chunk, so pixels are
/// reduced in parallel without synchronization.
pub fn select_modes(histograms: &Histograms) -> ModeMap {
    let geometry = histograms.geometry();
    let c = geometry.channels;
    let pixel_span = c * histograms.buckets();

    let mut entries = vec![ModeEntry::default(); geometry.sample_count()];
    entries
        .par_chunks_mut(c)
        .zip(histograms.primary_counts().par_chunks(pixel_span))
        .zip(histograms.offset_counts().par_chunks(pixel_span))
        .with_min_len(PARALLEL_MIN_PIXELS)
        .for_each(|((pixel_entries, primary), offset)| {
            let buckets = histograms.buckets();
            for (ch, entry) in pixel_entries.iter_mut().enumerate() {
                let range = ch * buckets..(ch + 1) * buckets;
                *entry = select_mode(&primary[range.clone()], &offset[range]);
            }
        });

    ModeMap { geometry, entries }
}
