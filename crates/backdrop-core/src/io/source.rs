use std::path::{Path, PathBuf};

use tracing::info;

use crate::consts::MIN_FRAME_COUNT;
use crate::error::{BackdropError, Result};
use crate::frame::{BitDepth, Frame, FrameGeometry};
use crate::io::image_io::load_frame;

/// An ordered, fully enumerated sequence of frames.
///
/// Every stage of the reconstruction reads the whole sequence again through
/// `read_frame`; implementations decide whether that means decoding a file
/// or handing out a stored frame.
pub trait FrameSource {
    /// Number of frames in the sequence.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Geometry every frame of the sequence is expected to have.
    fn geometry(&self) -> FrameGeometry;

    fn bit_depth(&self) -> BitDepth;

    fn read_frame(&self, index: usize) -> Result<Frame>;
}

/// Read frame `index` and check it against the sequence geometry.
pub fn read_frame_checked(source: &dyn FrameSource, index: usize) -> Result<Frame> {
    let total = source.len();
    if index >= total {
        return Err(BackdropError::FrameIndexOutOfRange { index, total });
    }
    let frame = source.read_frame(index)?;
    let expected = source.geometry();
    let found = frame.geometry();
    if found != expected {
        return Err(BackdropError::DimensionMismatch {
            index,
            expected,
            found,
        });
    }
    Ok(frame)
}

/// Frames decoded from image files on every read.
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    geometry: FrameGeometry,
    bit_depth: BitDepth,
}

impl ImageSequence {
    /// Open a sequence, inferring its geometry from the first file.
    pub fn open(paths: Vec<PathBuf>, bit_depth: BitDepth) -> Result<Self> {
        let first = paths.first().ok_or(BackdropError::InsufficientFrames {
            found: 0,
            required: MIN_FRAME_COUNT,
        })?;
        let geometry = load_frame(first, bit_depth)?.geometry();
        info!(
            frames = paths.len(),
            width = geometry.width,
            height = geometry.height,
            channels = geometry.channels,
            "Opened image sequence"
        );
        Ok(Self {
            paths,
            geometry,
            bit_depth,
        })
    }

    pub fn path(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }
}

impl FrameSource for ImageSequence {
    fn len(&self) -> usize {
        self.paths.len()
    }

    fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    fn read_frame(&self, index: usize) -> Result<Frame> {
        let path = self.path(index).ok_or(BackdropError::FrameIndexOutOfRange {
            index,
            total: self.paths.len(),
        })?;
        load_frame(path, self.bit_depth)
    }
}

/// Frames held in memory, cloned out on every read.
#[derive(Clone, Debug)]
pub struct MemorySequence {
    frames: Vec<Frame>,
    geometry: FrameGeometry,
    bit_depth: BitDepth,
}

impl MemorySequence {
    /// Geometry and bit depth are taken from the first frame.
    pub fn new(frames: Vec<Frame>) -> Result<Self> {
        let first = frames.first().ok_or(BackdropError::InsufficientFrames {
            found: 0,
            required: MIN_FRAME_COUNT,
        })?;
        let geometry = first.geometry();
        if geometry.channels == 0 {
            return Err(BackdropError::UnsupportedChannels(0));
        }
        let bit_depth = first.bit_depth;
        Ok(Self {
            frames,
            geometry,
            bit_depth,
        })
    }
}

impl FrameSource for MemorySequence {
    fn len(&self) -> usize {
        self.frames.len()
    }

    fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    fn read_frame(&self, index: usize) -> Result<Frame> {
        self.frames
            .get(index)
            .cloned()
            .ok_or(BackdropError::FrameIndexOutOfRange {
                index,
                total: self.frames.len(),
            })
    }
}
