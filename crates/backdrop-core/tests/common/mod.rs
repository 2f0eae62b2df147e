use std::path::{Path, PathBuf};

use ndarray::Array3;

use backdrop_core::frame::{BitDepth, Frame};
use backdrop_core::io::image_io::save_frame;
use backdrop_core::io::MemorySequence;

/// Build an 8-bit frame from samples in `[pixel][channel]` order.
pub fn frame_from_samples(
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<u16>,
) -> Frame {
    let data =
        Array3::from_shape_vec((height, width, channels), samples).expect("sample count");
    Frame::new(data, BitDepth::Eight)
}

/// A frame with every sample set to `value`.
pub fn constant_frame(width: usize, height: usize, channels: usize, value: u16) -> Frame {
    Frame::new(Array3::from_elem((height, width, channels), value), BitDepth::Eight)
}

/// A 1x1 single-channel sequence with one frame per value.
pub fn single_pixel_sequence(values: &[u16]) -> MemorySequence {
    let frames = values
        .iter()
        .map(|&v| frame_from_samples(1, 1, 1, vec![v]))
        .collect();
    MemorySequence::new(frames).expect("non-empty sequence")
}

/// A 1x1 RGB sequence with one frame per color.
pub fn single_rgb_pixel_sequence(colors: &[[u16; 3]]) -> MemorySequence {
    let frames = colors
        .iter()
        .map(|rgb| frame_from_samples(1, 1, 3, rgb.to_vec()))
        .collect();
    MemorySequence::new(frames).expect("non-empty sequence")
}

/// A scene of constant `background` with a bright square of `square` moving
/// one square-width right per frame, so no pixel is covered for long.
pub fn moving_square_frames(
    width: usize,
    height: usize,
    num_frames: usize,
    background: u16,
    square: u16,
) -> Vec<Frame> {
    let size = 4;
    (0..num_frames)
        .map(|i| {
            let mut frame = constant_frame(width, height, 1, background);
            let x0 = (i * size) % width;
            for row in 0..size.min(height) {
                for col in x0..(x0 + size).min(width) {
                    frame.data[[row, col, 0]] = square;
                }
            }
            frame
        })
        .collect()
}

/// Write frames as numbered PNG files into `dir`.
pub fn write_png_sequence(dir: &Path, frames: &[Frame]) -> Vec<PathBuf> {
    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let path = dir.join(format!("frame_{i:03}.png"));
            save_frame(frame, &path).expect("write frame");
            path
        })
        .collect()
}
