//! Engine lifecycle and the application-facing drawing/input surface.
//!
//! An [`Engine`] is either uninitialized or ready. Ready means the backend holds
//! an open display and a [`Context`] (raster, button table, cursor) exists for
//! it. Every query on an uninitialized engine degrades to a neutral default.

use std::time::Duration;

use rpx_core::{ButtonId, Color, HardwareButton, HardwareEvent, InputState, Position, Raster, RasterError};
use rpx_platform::{ConfigError, PlatformConfig};
use thiserror::Error;

use crate::backend::{Backend, BackendError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Per-instance state visible to applications.
#[derive(Debug)]
pub struct Context {
    config: PlatformConfig,
    raster: Raster,
    input: InputState,
    cursor: Option<(f64, f64)>,
}

impl Context {
    fn new(config: PlatformConfig, raster: Raster) -> Self {
        Self {
            config,
            raster,
            input: InputState::new(),
            cursor: None,
        }
    }

    /// Raster columns.
    pub fn width(&self) -> u32 {
        self.raster.cols()
    }

    /// Raster rows.
    pub fn height(&self) -> u32 {
        self.raster.rows()
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    pub fn get_pixel(&self, pos: Position) -> Result<Color, RasterError> {
        self.raster.color_at(pos)
    }

    pub fn set_pixel(&mut self, pos: Position, color: Color) -> Result<(), RasterError> {
        self.raster.set_color_at(pos, color)
    }

    /// Cursor position in raster pixels as of the current frame, or `None` if it
    /// is outside the window.
    pub fn mouse_position(&self) -> Option<Position> {
        raster_position(&self.config, self.cursor)
    }

    pub fn button(&self, id: ButtonId) -> HardwareButton {
        self.input.button(id)
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn clear(&mut self, color: Color) {
        self.raster.fill(color.to_packed());
    }

    /// Block the calling thread for `ms` milliseconds. Non-positive or
    /// non-finite durations return immediately.
    pub fn wait_ms(&self, ms: f64) {
        wait_ms(ms);
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn raster_mut(&mut self) -> &mut Raster {
        &mut self.raster
    }

    /// Apply one translated event. Returns true for quit.
    pub(crate) fn apply_event(&mut self, event: HardwareEvent) -> bool {
        match event {
            HardwareEvent::Quit => return true,
            HardwareEvent::Down(id) => {
                if !self.input.set_down(id, true) {
                    log::trace!("Ignoring untracked button {id:?}");
                }
            }
            HardwareEvent::Up(id) => {
                if !self.input.set_down(id, false) {
                    log::trace!("Ignoring untracked button {id:?}");
                }
            }
        }
        false
    }

    pub(crate) fn set_cursor(&mut self, cursor: Option<(f64, f64)>) {
        self.cursor = cursor;
    }

    pub(crate) fn advance_input(&mut self) {
        self.input.advance();
    }
}

/// Map a window-pixel cursor onto the raster `config` describes.
fn raster_position(config: &PlatformConfig, cursor: Option<(f64, f64)>) -> Option<Position> {
    let (x, y) = cursor?;
    if x < 0.0 || y < 0.0 || x >= f64::from(config.width) || y >= f64::from(config.height) {
        return None;
    }
    let scale = f64::from(config.pixel_scale);
    Some(Position::new((x / scale) as u32, (y / scale) as u32))
}

fn wait_ms(ms: f64) {
    if ms.is_nan() || ms <= 0.0 {
        return;
    }
    if let Ok(duration) = Duration::try_from_secs_f64(ms / 1000.0) {
        std::thread::sleep(duration);
    }
}

pub struct Engine<B: Backend> {
    pub(crate) backend: B,
    pub(crate) state: Option<Context>,
}

impl<B: Backend> Engine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: None,
        }
    }

    /// Open a `window_width x window_height` window showing a raster of
    /// `window_width / pixel_scale x window_height / pixel_scale` pixels.
    pub fn construct(&mut self, window_width: u32, window_height: u32, pixel_scale: u32) -> Result<(), EngineError> {
        self.construct_with(PlatformConfig::new(window_width, window_height, pixel_scale))
    }

    pub fn construct_with(&mut self, config: PlatformConfig) -> Result<(), EngineError> {
        let result = self.try_construct(config);
        if let Err(err) = &result {
            log::error!("Engine construction failed: {err}");
        }
        result
    }

    fn try_construct(&mut self, config: PlatformConfig) -> Result<(), EngineError> {
        config.validate()?;
        self.destruct();

        self.backend.acquire(&config)?;
        let raster = match Raster::new(config.raster_height(), config.raster_width()) {
            Ok(raster) => raster,
            Err(err) => {
                self.backend.release();
                return Err(err.into());
            }
        };
        log::info!(
            "Engine ready: {}x{} raster at scale {}",
            raster.cols(),
            raster.rows(),
            config.pixel_scale
        );
        self.state = Some(Context::new(config, raster));
        Ok(())
    }

    /// Release the raster, then the backend's display. No-op when uninitialized.
    pub fn destruct(&mut self) {
        if let Some(state) = self.state.take() {
            drop(state);
            self.backend.release();
            log::info!("Engine destructed");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    pub fn context(&self) -> Option<&Context> {
        self.state.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut Context> {
        self.state.as_mut()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn width(&self) -> u32 {
        self.state.as_ref().map_or(0, Context::width)
    }

    pub fn height(&self) -> u32 {
        self.state.as_ref().map_or(0, Context::height)
    }

    pub fn get_pixel(&self, pos: Position) -> Result<Color, RasterError> {
        match &self.state {
            Some(state) => state.get_pixel(pos),
            None => Ok(Color::default()),
        }
    }

    pub fn set_pixel(&mut self, pos: Position, color: Color) -> Result<(), RasterError> {
        match &mut self.state {
            Some(state) => state.set_pixel(pos, color),
            None => Ok(()),
        }
    }

    /// Live cursor position from the backend, in raster pixels.
    pub fn mouse_position(&self) -> Option<Position> {
        let state = self.state.as_ref()?;
        raster_position(&state.config, self.backend.cursor_position())
    }

    pub fn button(&self, id: ButtonId) -> HardwareButton {
        self.state
            .as_ref()
            .map_or_else(HardwareButton::default, |state| state.button(id))
    }

    pub fn clear(&mut self, color: Color) {
        if let Some(state) = &mut self.state {
            state.clear(color);
        }
    }

    pub fn wait_ms(&self, ms: f64) {
        if self.is_ready() {
            wait_ms(ms);
        }
    }
}

impl<B: Backend> Drop for Engine<B> {
    fn drop(&mut self) {
        self.destruct();
    }
}
