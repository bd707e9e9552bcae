//! The seam between the engine and whatever owns the real display.
//!
//! A backend owns the window, the rendering context and the streaming surface
//! between `acquire` and `release`, and is the only source of hardware events.

use rpx_core::HardwareEvent;
use rpx_platform::PlatformConfig;
use rpx_render::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("event loop exited with code {0}")]
    Exited(i32),
    #[error("window was never created")]
    NoWindow,
    #[error("display is not open")]
    NotOpen,
    #[error("{0}")]
    Simulated(String),
}

pub trait Backend {
    /// Open a window and a streaming surface of `config`'s raster size.
    /// Any display left open by a previous call is released first.
    fn acquire(&mut self, config: &PlatformConfig) -> Result<(), BackendError>;

    /// Release display resources in reverse acquisition order. No-op when closed.
    fn release(&mut self);

    /// Append every pending hardware event to `events`.
    fn drain_events(&mut self, events: &mut Vec<HardwareEvent>);

    /// Cursor position in window pixels, or `None` when unknown or outside.
    fn cursor_position(&self) -> Option<(f64, f64)>;

    /// Upload a full raster of packed RGBA8888 words and show it.
    fn present(&mut self, pixels: &[u32]) -> Result<(), BackendError>;
}
