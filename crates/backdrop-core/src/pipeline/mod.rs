pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{
    describe_sequence, inspect_pixel, reconstruct_background, run_pipeline, run_pipeline_reported,
};
pub use types::{
    ChannelReport, NoOpReporter, PipelineStage, PixelReport, ProgressReporter, SequenceSummary,
};
