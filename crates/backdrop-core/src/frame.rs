use std::borrow::Cow;

use ndarray::Array3;
use serde::{Deserialize, Serialize};

/// Sample depth frames are decoded at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitDepth {
    #[default]
    Eight,
    Sixteen,
}

impl BitDepth {
    /// Largest representable intensity.
    pub fn max_value(self) -> u32 {
        match self {
            Self::Eight => u8::MAX as u32,
            Self::Sixteen => u16::MAX as u32,
        }
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eight => write!(f, "8-bit"),
            Self::Sixteen => write!(f, "16-bit"),
        }
    }
}

/// Width, height and channel count shared by every frame of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGeometry {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl FrameGeometry {
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of pixel×channel samples.
    pub fn sample_count(&self) -> usize {
        self.pixel_count() * self.channels
    }

    /// Row-major pixel index of `(x, y)`, if inside the frame.
    pub fn pixel_index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

impl std::fmt::Display for FrameGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}

/// A single decoded frame of integer intensities.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Samples, shape = (height, width, channels)
    pub data: Array3<u16>,
    pub bit_depth: BitDepth,
}

impl Frame {
    pub fn new(data: Array3<u16>, bit_depth: BitDepth) -> Self {
        Self { data, bit_depth }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn geometry(&self) -> FrameGeometry {
        let (h, w, c) = self.data.dim();
        FrameGeometry::new(w, h, c)
    }

    /// Samples in `[pixel][channel]` order.
    ///
    /// Borrows when the array is already in standard layout.
    pub fn samples(&self) -> Cow<'_, [u16]> {
        match self.data.as_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.data.iter().copied().collect()),
        }
    }
}

