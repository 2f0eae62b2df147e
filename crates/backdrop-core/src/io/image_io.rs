use std::path::Path;

use image::{DynamicImage, ImageBuffer, Luma, Rgb};
use ndarray::Array3;

use crate::error::{BackdropError, Result};
use crate::frame::{BitDepth, Frame};

/// Decode an image file into a frame at the requested bit depth.
///
/// Grey images (with or without alpha) become single-channel frames,
/// everything else is converted to RGB.
pub fn load_frame(path: &Path, bit_depth: BitDepth) -> Result<Frame> {
    let img = image::open(path).map_err(|source| BackdropError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    frame_from_image(&img, bit_depth)
}

/// Convert a decoded image into a frame.
pub fn frame_from_image(img: &DynamicImage, bit_depth: BitDepth) -> Result<Frame> {
    let grey = !img.color().has_color();
    let (w, h) = (img.width() as usize, img.height() as usize);
    let channels = if grey { 1 } else { 3 };

    let samples: Vec<u16> = match (bit_depth, grey) {
        (BitDepth::Eight, true) => img.to_luma8().into_raw().into_iter().map(u16::from).collect(),
        (BitDepth::Eight, false) => img.to_rgb8().into_raw().into_iter().map(u16::from).collect(),
        (BitDepth::Sixteen, true) => img.to_luma16().into_raw(),
        (BitDepth::Sixteen, false) => img.to_rgb16().into_raw(),
    };

    let data = Array3::from_shape_vec((h, w, channels), samples)?;
    Ok(Frame::new(data, bit_depth))
}

/// Save a frame, choosing the format from the file extension.
///
/// Single-channel frames are written as grey, three-channel frames as RGB,
/// at the frame's own bit depth.
pub fn save_frame(frame: &Frame, path: &Path) -> Result<()> {
    let w = frame.width() as u32;
    let h = frame.height() as u32;
    let samples = frame.samples().into_owned();

    let img = match (frame.bit_depth, frame.channels()) {
        (BitDepth::Eight, 1) => {
            let raw = samples.into_iter().map(|v| v.min(255) as u8).collect();
            ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(w, h, raw).map(DynamicImage::ImageLuma8)
        }
        (BitDepth::Eight, 3) => {
            let raw = samples.into_iter().map(|v| v.min(255) as u8).collect();
            ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(w, h, raw).map(DynamicImage::ImageRgb8)
        }
        (BitDepth::Sixteen, 1) => ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w, h, samples)
            .map(DynamicImage::ImageLuma16),
        (BitDepth::Sixteen, 3) => ImageBuffer::<Rgb<u16>, Vec<u16>>::from_raw(w, h, samples)
            .map(DynamicImage::ImageRgb16),
        (_, c) => return Err(BackdropError::UnsupportedChannels(c)),
    };

    let img = img.ok_or(BackdropError::UnsupportedChannels(frame.channels()))?;
    img.save(path)?;
    Ok(())
}
