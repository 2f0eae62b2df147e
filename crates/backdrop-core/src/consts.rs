/// Default bucket width in intensity levels.
pub const DEFAULT_BUCKET_SIZE: u32 = 8;

/// Smallest accepted bucket width.
pub const MIN_BUCKET_SIZE: u32 = 1;

/// Largest accepted bucket width.
pub const MAX_BUCKET_SIZE: u32 = 128;

/// Default fraction of the sequence a pixel's mode must be matched in
/// before the reconstruction is trusted.
pub const DEFAULT_CONFIDENCE_LEVEL: f32 = 0.2;

/// Minimum number of frames a reconstruction needs.
pub const MIN_FRAME_COUNT: usize = 2;

/// Minimum number of pixels handed to one Rayon task.
pub const PARALLEL_MIN_PIXELS: usize = 1024;

/// Upper bound of the normalized confidence scalar.
pub const MAX_CONFIDENCE: u32 = 255;

/// Scale applied to `matched / total` when normalizing confidence.
pub const CONFIDENCE_SCALE: u64 = 256;

/// Image file extensions picked up when a directory is given as input.
pub const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp"];
