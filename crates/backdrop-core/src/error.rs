use std::path::PathBuf;

use thiserror::Error;

use crate::frame::FrameGeometry;

#[derive(Error, Debug)]
pub enum BackdropError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode frame {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Sample buffer does not match frame shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("At least {required} frames are required, got {found}")]
    InsufficientFrames { found: usize, required: usize },

    #[error("Frame {index} has geometry {found}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: FrameGeometry,
        found: FrameGeometry,
    },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Unsupported channel count: {0}")]
    UnsupportedChannels(usize),

    #[error("Pixel ({x}, {y}) outside {width}x{height} frame")]
    PixelOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

pub type Result<T> = std::result::Result<T, BackdropError>;
