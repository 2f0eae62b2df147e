use crate::frame::{BitDepth, FrameGeometry};
use crate::mode::ModeEntry;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Histogram,
    ModeSelection,
    FirstPass,
    SecondPass,
    Compositing,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Histogram => write!(f, "Counting buckets"),
            Self::ModeSelection => write!(f, "Selecting modes"),
            Self::FirstPass => write!(f, "First pass"),
            Self::SecondPass => write!(f, "Second pass"),
            Self::Compositing => write!(f, "Compositing"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars or logging.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// frames the stage reads, if it reads any.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Progress reporter that discards every update.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Histogram counts and selected mode of one channel of one pixel.
#[derive(Clone, Debug)]
pub struct ChannelReport {
    pub primary: Vec<u32>,
    pub offset: Vec<u32>,
    pub mode: ModeEntry,
}

/// Per-channel histogram dump of a single pixel.
#[derive(Clone, Debug)]
pub struct PixelReport {
    pub x: usize,
    pub y: usize,
    pub frames: usize,
    pub channels: Vec<ChannelReport>,
}

/// Shape of a sequence and the settings it would be processed with.
#[derive(Clone, Debug)]
pub struct SequenceSummary {
    pub frames: usize,
    pub geometry: FrameGeometry,
    pub bit_depth: BitDepth,
    pub bucket_size: u32,
    pub buckets: usize,
    pub confidence_level: f32,
    pub conf_frames: usize,
    /// Bytes both histogram buffers will occupy.
    pub histogram_bytes: usize,
}
