#[allow(dead_code)]
mod common;

use backdrop_core::bucket::BucketMapper;
use backdrop_core::error::BackdropError;
use backdrop_core::frame::FrameGeometry;
use backdrop_core::histogram::{build_histograms, Histograms};
use backdrop_core::io::MemorySequence;
use backdrop_core::pipeline::NoOpReporter;

#[test]
fn test_counts_sum_to_frame_count() {
    let frames = common::moving_square_frames(16, 8, 7, 40, 220);
    let source = MemorySequence::new(frames).unwrap();
    let mapper = BucketMapper::new(8, 255);

    let histograms = build_histograms(&source, &mapper, &NoOpReporter).unwrap();
    assert_eq!(histograms.frames(), 7);

    for y in 0..8 {
        for x in 0..16 {
            let (primary, offset) = histograms.pixel(x, y, 0).unwrap();
            assert_eq!(primary.iter().sum::<u32>(), 7, "primary at ({x}, {y})");
            assert_eq!(offset.iter().sum::<u32>(), 7, "offset at ({x}, {y})");
        }
    }
}

#[test]
fn test_single_pixel_counts() {
    let source = common::single_pixel_sequence(&[10, 12, 200]);
    let mapper = BucketMapper::new(8, 255);
    let histograms = build_histograms(&source, &mapper, &NoOpReporter).unwrap();

    let (primary, offset) = histograms.pixel(0, 0, 0).unwrap();
    assert_eq!(primary.len(), 32);
    assert_eq!(primary[1], 2);
    assert_eq!(primary[25], 1);
    // 10 + 4 and 12 + 4 land in offset bucket 1 and 2, 200 + 4 in 25.
    assert_eq!(offset[1], 1);
    assert_eq!(offset[2], 1);
    assert_eq!(offset[25], 1);
}

#[test]
fn test_channels_are_counted_independently() {
    let source = common::single_rgb_pixel_sequence(&[[0, 100, 255], [0, 100, 255]]);
    let mapper = BucketMapper::new(8, 255);
    let histograms = build_histograms(&source, &mapper, &NoOpReporter).unwrap();

    assert_eq!(histograms.pixel(0, 0, 0).unwrap().0[0], 2);
    assert_eq!(histograms.pixel(0, 0, 1).unwrap().0[12], 2);
    assert_eq!(histograms.pixel(0, 0, 2).unwrap().0[31], 2);
    assert!(histograms.pixel(0, 0, 3).is_none());
}

#[test]
fn test_pixel_out_of_range() {
    let histograms = Histograms::new(FrameGeometry::new(4, 4, 1), 32);
    assert!(histograms.pixel(4, 0, 0).is_none());
    assert!(histograms.pixel(0, 4, 0).is_none());
}

#[test]
fn test_memory_estimate() {
    let geometry = FrameGeometry::new(640, 480, 3);
    assert_eq!(
        Histograms::memory_bytes(geometry, 32),
        2 * 640 * 480 * 3 * 32 * 4
    );
}

#[test]
fn test_mismatched_frame_aborts() {
    let frames = vec![
        common::constant_frame(4, 4, 1, 10),
        common::constant_frame(4, 4, 1, 10),
        common::constant_frame(5, 4, 1, 10),
    ];
    let source = MemorySequence::new(frames).unwrap();
    let mapper = BucketMapper::new(8, 255);

    let err = build_histograms(&source, &mapper, &NoOpReporter).unwrap_err();
    assert!(matches!(
        err,
        BackdropError::DimensionMismatch { index: 2, .. }
    ));
}

#[test]
fn test_frame_larger_than_one_parallel_task() {
    // 2048 pixels, enough for the per-pixel chunks to be split across tasks.
    let frames = common::moving_square_frames(64, 32, 8, 40, 220);
    let source = MemorySequence::new(frames).unwrap();
    let mapper = BucketMapper::new(8, 255);

    let histograms = build_histograms(&source, &mapper, &NoOpReporter).unwrap();


    // The square sweeps x in 0..32 on rows 0..4 and covers each of those
    // pixels exactly once.
    for (x, y) in [(0, 0), (31, 3), (17, 2)] {
        let (primary, offset) = histograms.pixel(x, y, 0).unwrap();
        assert_eq!((primary[5], primary[27]), (7, 1), "primary at ({x}, {y})");
        assert_eq!((offset[5], offset[28]), (7, 1), "offset at ({x}, {y})");
    }
    for (x, y) in [(32, 0), (63, 31), (0, 4), (40, 20)] {
        let (primary, offset) = histograms.pixel(x, y, 0).unwrap();
        assert_eq!(primary[5], 8, "primary at ({x}, {y})");
        assert_eq!(offset[5], 8, "offset at ({x}, {y})");
    }
}
