pub mod codec;
pub mod pipeline;

pub use pipeline::{PixelArtPipeline, RenderRequest, RenderSummary, StagePlan};
