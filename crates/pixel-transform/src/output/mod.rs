//! Stage results that carry more than the transformed pixels.

mod quantized_image;
mod render_report;

pub use quantized_image::QuantizedImage;
pub use render_report::RenderReport;
