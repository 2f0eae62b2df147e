#[allow(dead_code)]
mod common;

use backdrop_core::bucket::BucketMapper;
use backdrop_core::composite::composite;
use backdrop_core::frame::BitDepth;
use backdrop_core::histogram::build_histograms;
use backdrop_core::io::{FrameSource, MemorySequence};
use backdrop_core::mode::{select_modes, ModeMap};
use backdrop_core::pipeline::NoOpReporter;
use backdrop_core::reconstruct::{confidence_frames, first_pass, reconstruct, Accumulator};

fn modes_for(source: &MemorySequence, mapper: &BucketMapper) -> ModeMap {
    let histograms = build_histograms(source, mapper, &NoOpReporter).unwrap();
    select_modes(&histograms)
}

/// Channel 0 is steady, channels 1 and 2 are noisy enough that the strict
/// pass only accepts two of five frames.
fn disagreeing_rgb_sequence() -> MemorySequence {
    common::single_rgb_pixel_sequence(&[
        [50, 100, 200],
        [50, 100, 200],
        [50, 180, 200],
        [50, 20, 90],
        [120, 60, 200],
    ])
}

#[test]
fn test_confidence_frames() {
    assert_eq!(confidence_frames(0.2, 3), 1);
    assert_eq!(confidence_frames(0.0, 100), 1);
    assert_eq!(confidence_frames(0.2, 10), 2);
    assert_eq!(confidence_frames(0.25, 10), 2);
    assert_eq!(confidence_frames(1.0, 3), 3);
    assert_eq!(confidence_frames(0.7, 10), 7);
    assert_eq!(confidence_frames(0.9, 10), 9);
    assert_eq!(confidence_frames(0.7, 100), 70);
}

#[test]
fn test_first_pass_matches_and_totals() {
    let source = common::single_pixel_sequence(&[10, 12, 200]);
    let mapper = BucketMapper::new(8, 255);
    let modes = modes_for(&source, &mapper);

    let mut acc = Accumulator::new(source.geometry());
    first_pass(&source, &mapper, &modes, &mut acc, &NoOpReporter).unwrap();

    assert_eq!(acc.matched_count(0, 0), Some(2));
    assert_eq!(acc.matched_sums(), &[22.0]);
    assert_eq!(acc.total_sums(), &[222.0]);
}

#[test]
fn test_gate_resets_unresolved_pixels() {
    let source = common::single_pixel_sequence(&[10, 12, 200]);
    let mapper = BucketMapper::new(8, 255);
    let modes = modes_for(&source, &mapper);

    let mut acc = Accumulator::new(source.geometry());
    first_pass(&source, &mapper, &modes, &mut acc, &NoOpReporter).unwrap();
    let unresolved = acc.apply_gate(3);

    assert_eq!(unresolved, 1);
    assert_eq!(acc.matched_count(0, 0), Some(0));
    assert_eq!(acc.matched_sums(), &[0.0]);
    assert_eq!(acc.total_sums(), &[222.0]);
    assert_eq!(acc.resolved(), &[false]);
}

#[test]
fn test_gate_freezes_resolved_pixels() {
    let source = common::single_pixel_sequence(&[10, 12, 200]);
    let mapper = BucketMapper::new(8, 255);
    let modes = modes_for(&source, &mapper);

    let mut acc = Accumulator::new(source.geometry());
    first_pass(&source, &mapper, &modes, &mut acc, &NoOpReporter).unwrap();
    assert_eq!(acc.apply_gate(2), 0);
    assert_eq!(acc.resolved(), &[true]);

    // A resolved pixel must not be counted again by the rescue pass.
    for i in 0..source.len() {
        let frame = source.read_frame(i).unwrap();
        acc.add_rescue(&frame, &mapper, &modes);
    }
    assert_eq!(acc.matched_count(0, 0), Some(2));
    assert_eq!(acc.matched_sums(), &[22.0]);
}

#[test]
fn test_strict_pass_requires_every_channel() {
    let source = disagreeing_rgb_sequence();
    let mapper = BucketMapper::new(8, 255);
    let modes = modes_for(&source, &mapper);

    let mut acc = Accumulator::new(source.geometry());
    first_pass(&source, &mapper, &modes, &mut acc, &NoOpReporter).unwrap();

    assert_eq!(acc.matched_count(0, 0), Some(2));
    assert_eq!(acc.matched_sums(), &[100.0, 200.0, 400.0]);
    assert_eq!(acc.total_sums(), &[320.0, 460.0, 890.0]);
}

#[test]
fn test_rescue_pass_uses_strongest_channel() {
    let source = disagreeing_rgb_sequence();
    let mapper = BucketMapper::new(8, 255);
    let modes = modes_for(&source, &mapper);
    let conf_frames = confidence_frames(0.6, source.len());
    assert_eq!(conf_frames, 3);

    let (acc, unresolved) =
        reconstruct(&source, &mapper, &modes, conf_frames, &NoOpReporter).unwrap();
    assert_eq!(unresolved, 1);

    // Channels 0 and 2 tie on confidence 4, so channel 0 gates the rescue
    // and frames 0..=3 are accepted with all their channels.
    assert_eq!(acc.matched_count(0, 0), Some(4));
    assert_eq!(acc.matched_sums(), &[200.0, 400.0, 690.0]);

    let (background, mask) = composite(&acc, conf_frames, source.len(), BitDepth::Eight).unwrap();
    assert_eq!(background.data.as_slice().unwrap(), &[50, 100, 172]);
    assert_eq!(mask.confidence[[0, 0]], 204);
    assert!(!mask.low_confidence[[0, 0]]);
}

#[test]
fn test_rescue_pass_never_removes_hits() {
    let frames = common::moving_square_frames(16, 8, 6, 60, 230);
    let source = MemorySequence::new(frames).unwrap();
    let mapper = BucketMapper::new(8, 255);
    let modes = modes_for(&source, &mapper);

    let mut acc = Accumulator::new(source.geometry());
    first_pass(&source, &mapper, &modes, &mut acc, &NoOpReporter).unwrap();
    let strict_counts = acc.matched_counts().to_vec();

    // Pixels at x < 8 are covered twice in six frames and miss the gate of 5.
    let unresolved = acc.apply_gate(confidence_frames(0.9, source.len()));
    assert_eq!(unresolved, 8 * 4);
    let resolved = acc.resolved().to_vec();

    for i in 0..source.len() {
        let frame = source.read_frame(i).unwrap();
        acc.add_rescue(&frame, &mapper, &modes);
    }

    let counts = strict_counts.iter().zip(acc.matched_counts());
    for ((strict, after), &resolved) in counts.zip(&resolved) {
        if resolved {
            assert_eq!(after, strict);
        } else {
            assert!(after >= strict);
        }
    }
    assert_eq!(acc.matched_count(0, 0), Some(4));
}

#[test]
fn test_skips_rescue_when_everything_resolves() {
    let frames = common::moving_square_frames(16, 8, 8, 60, 230);
    let source = MemorySequence::new(frames).unwrap();
    let mapper = BucketMapper::new(8, 255);
    let modes = modes_for(&source, &mapper);

    let (acc, unresolved) = reconstruct(&source, &mapper, &modes, 2, &NoOpReporter).unwrap();
    assert_eq!(unresolved, 0);
    assert!(acc.resolved().iter().all(|&r| r));
}
