pub mod image_io;
pub mod source;

pub use source::{read_frame_checked, FrameSource, ImageSequence, MemorySequence};
