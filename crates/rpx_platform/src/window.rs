use std::sync::Arc;
use thiserror::Error;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid pixel_scale: must be non-zero")]
    ZeroPixelScale,
    #[error("invalid window_width: {width} is not a multiple of pixel_scale {pixel_scale}")]
    Width { width: u32, pixel_scale: u32 },
    #[error("invalid window_height: {height} is not a multiple of pixel_scale {pixel_scale}")]
    Height { height: u32, pixel_scale: u32 },
}

/// Window geometry. The raster is `width / pixel_scale` by `height / pixel_scale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub pixel_scale: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Retro Pixel Runtime".to_string(),
            width: 640,
            height: 480,
            pixel_scale: 10,
        }
    }
}

impl PlatformConfig {
    pub fn new(width: u32, height: u32, pixel_scale: u32) -> Self {
        Self {
            width,
            height,
            pixel_scale,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pixel_scale == 0 {
            return Err(ConfigError::ZeroPixelScale);
        }
        if self.width % self.pixel_scale != 0 {
            return Err(ConfigError::Width {
                width: self.width,
                pixel_scale: self.pixel_scale,
            });
        }
        if self.height % self.pixel_scale != 0 {
            return Err(ConfigError::Height {
                height: self.height,
                pixel_scale: self.pixel_scale,
            });
        }
        Ok(())
    }

    /// Raster columns. Only meaningful once `validate` has passed.
    pub fn raster_width(&self) -> u32 {
        self.width.checked_div(self.pixel_scale).unwrap_or(0)
    }

    /// Raster rows. Only meaningful once `validate` has passed.
    pub fn raster_height(&self) -> u32 {
        self.height.checked_div(self.pixel_scale).unwrap_or(0)
    }
}

/// Create the fixed-size, non-resizable window described by `config`.
pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, OsError> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
        .with_resizable(false);

    let window = event_loop.create_window(attrs)?;
    let actual = window.inner_size();
    if (actual.width, actual.height) != (config.width, config.height) {
        log::warn!(
            "Window is {}x{}, requested {}x{}",
            actual.width,
            actual.height,
            config.width,
            config.height
        );
    }
    Ok(Arc::new(window))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = PlatformConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!((config.raster_width(), config.raster_height()), (64, 48));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let config = PlatformConfig::new(100, 100, 0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPixelScale));
        assert_eq!(config.raster_width(), 0);
    }

    #[test]
    fn non_dividing_dimensions_are_rejected() {
        assert_eq!(
            PlatformConfig::new(100, 101, 10).validate(),
            Err(ConfigError::Height {
                height: 101,
                pixel_scale: 10
            })
        );
        assert_eq!(
            PlatformConfig::new(105, 100, 10).validate(),
            Err(ConfigError::Width {
                width: 105,
                pixel_scale: 10
            })
        );
    }

    #[test]
    fn with_title_keeps_geometry() {
        let config = PlatformConfig::new(1000, 1000, 5).with_title("gravity");
        assert_eq!(config.title, "gravity");
        assert_eq!((config.raster_width(), config.raster_height()), (200, 200));
    }
}
