pub mod gpu_context;
pub mod pixel_pipeline;
pub mod vertex;

pub use gpu_context::{GpuContext, RenderError};
pub use pixel_pipeline::PixelPipeline;
pub use vertex::ScreenVertex;
