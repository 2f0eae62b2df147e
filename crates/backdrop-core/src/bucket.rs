use crate::mode::ModeEntry;

/// Maps intensities onto two bucket partitions of `[min_value, max_value]`.
///
/// The primary partition starts at zero. The offset partition is the same
/// grid shifted by half a bucket, so a cluster of values sitting on a primary
/// boundary still lands in a single offset bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BucketMapper {
    bucket_size: u32,
    min_value: u32,
    max_value: u32,
    buckets: u32,
}

impl BucketMapper {
    /// `bucket_size` is clamped into `1..=max_value + 1`. Callers validate it
    /// first with `ReconstructionConfig::validated`.
    pub fn new(bucket_size: u32, max_value: u32) -> Self {
        let bucket_size = bucket_size.clamp(1, max_value + 1);
        Self {
            bucket_size,
            min_value: 0,
            max_value,
            buckets: (max_value + 1) / bucket_size,
        }
    }

    pub fn bucket_size(&self) -> u32 {
        self.bucket_size
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Number of buckets in each partition.
    pub fn buckets(&self) -> usize {
        self.buckets as usize
    }

    fn last(&self) -> u32 {
        self.buckets - 1
    }

    /// Bucket of `value` in the primary partition.
    pub fn primary(&self, value: u32) -> u32 {
        if value < self.min_value {
            return 0;
        }
        if value > self.max_value {
            return self.last();
        }
        (value / self.bucket_size).min(self.last())
    }

    /// Bucket of `value` in the half-offset partition.
    pub fn offset(&self, value: u32) -> u32 {
        let half = self.bucket_size / 2;
        let shifted = value + half;
        if shifted < self.min_value {
            return 0;
        }
        if shifted > self.max_value - half {
            return self.last();
        }
        (shifted / self.bucket_size).min(self.last())
    }

    /// Whether `value` falls into the bucket selected by `entry`.
    pub fn matches(&self, value: u32, entry: &ModeEntry) -> bool {
        let bucket = if entry.is_primary {
            self.primary(value)
        } else {
            self.offset(value)
        };
        bucket == entry.bucket_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_bucket_size_stays_in_range() {
        let mapper = BucketMapper::new(3, 255);
        assert_eq!(mapper.buckets(), 85);
        assert_eq!(mapper.primary(255), 84);
        assert_eq!(mapper.offset(253), 84);
        for v in 0..=255 {
            assert!((mapper.primary(v) as usize) < mapper.buckets());
            assert!((mapper.offset(v) as usize) < mapper.buckets());
        }
    }

    #[test]
    fn test_size_one_offset_equals_primary() {
        let mapper = BucketMapper::new(1, 255);
        for v in [0, 1, 127, 254, 255] {
            assert_eq!(mapper.offset(v), mapper.primary(v));
        }
    }

    #[test]
    fn test_oversized_bucket_is_clamped() {
        let mapper = BucketMapper::new(1024, 255);
        assert_eq!(mapper.bucket_size(), 256);
        assert_eq!(mapper.buckets(), 1);
    }
}
