use backdrop_core::bucket::BucketMapper;
use backdrop_core::mode::ModeEntry;

#[test]
fn test_default_mapper_has_32_buckets() {
    let mapper = BucketMapper::new(8, 255);
    assert_eq!(mapper.buckets(), 32);
    assert_eq!(mapper.primary(255), 31);
}

#[test]
fn test_primary_is_monotonic() {
    let mapper = BucketMapper::new(8, 255);
    let mut previous = 0;
    for v in 0..=255 {
        let bucket = mapper.primary(v);
        assert!(bucket >= previous, "primary({v}) = {bucket} < {previous}");
        previous = bucket;
    }
}

#[test]
fn test_primary_clamps_above_max() {
    let mapper = BucketMapper::new(8, 255);
    assert_eq!(mapper.primary(300), 31);
}

#[test]
fn test_primary_values() {
    let mapper = BucketMapper::new(8, 255);
    assert_eq!(mapper.primary(10), 1);
    assert_eq!(mapper.primary(12), 1);
    assert_eq!(mapper.primary(200), 25);
}

#[test]
fn test_offset_boundaries() {
    let mapper = BucketMapper::new(8, 255);
    assert_eq!(mapper.offset(0), 0);
    assert_eq!(mapper.offset(252), 31);
    assert_eq!(mapper.offset(255), 31);
}

#[test]
fn test_offset_is_shifted_primary_below_clamp() {
    let mapper = BucketMapper::new(8, 255);
    for v in 0..=247 {
        assert_eq!(mapper.offset(v), mapper.primary(v + 4), "value {v}");
    }
}

#[test]
fn test_offset_keeps_boundary_cluster_together() {
    // 14..=17 straddles the primary boundary at 16.
    let mapper = BucketMapper::new(8, 255);
    let primaries: Vec<u32> = (14..=17).map(|v| mapper.primary(v)).collect();
    let offsets: Vec<u32> = (14..=17).map(|v| mapper.offset(v)).collect();
    assert_eq!(primaries, vec![1, 1, 2, 2]);
    assert!(offsets.iter().all(|&b| b == offsets[0]));
}

#[test]
fn test_sixteen_bit_range() {
    let mapper = BucketMapper::new(128, 65535);
    assert_eq!(mapper.buckets(), 512);
    assert_eq!(mapper.primary(65535), 511);
    assert_eq!(mapper.offset(65535), 511);
}

#[test]
fn test_matches_uses_selected_partition() {
    let mapper = BucketMapper::new(8, 255);
    let primary = ModeEntry {
        bucket_id: 1,
        is_primary: true,
        confidence: 2,
    };
    let offset = ModeEntry {
        bucket_id: 2,
        is_primary: false,
        confidence: 2,
    };
    assert!(mapper.matches(10, &primary));
    assert!(!mapper.matches(16, &primary));
    assert!(mapper.matches(16, &offset));
    assert!(mapper.matches(12, &offset));
    assert!(!mapper.matches(10, &offset));
}
