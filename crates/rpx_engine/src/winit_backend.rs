//! winit + wgpu backend.
//!
//! winit allows a single event loop per process, so the loop is created once in
//! [`WinitBackend::new`] and outlives every window opened through it. Instead of
//! handing control to `run_app`, the engine pumps the loop once per frame with
//! `pump_app_events`, which lets the frame loop stay an ordinary `while` loop.
//!
//! Windows can only be created from inside an event loop callback, so `acquire`
//! parks the requested config in the pump handler and pumps until the handler
//! has opened it.

use std::sync::Arc;
use std::time::Duration;

use rpx_core::HardwareEvent;
use rpx_platform::{create_window, map_key, map_mouse_button, PlatformConfig};
use rpx_render::{GpuContext, PixelPipeline};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::backend::{Backend, BackendError};

const OPEN_PUMP_ATTEMPTS: usize = 64;

/// Display resources, declared in reverse acquisition order.
struct Display {
    pipeline: PixelPipeline,
    gpu: GpuContext,
    window: Arc<Window>,
}

impl Display {
    fn open(event_loop: &ActiveEventLoop, config: &PlatformConfig) -> Result<Self, BackendError> {
        let window = create_window(event_loop, config)?;
        log::info!(
            "Window created: {}x{} ({}x{} raster)",
            config.width,
            config.height,
            config.raster_width(),
            config.raster_height()
        );
        let gpu = GpuContext::new(window.clone())?;
        let pipeline = PixelPipeline::new(&gpu, config.raster_width(), config.raster_height());
        Ok(Self {
            pipeline,
            gpu,
            window,
        })
    }

    fn close(self) {
        let Display {
            pipeline,
            gpu,
            window,
        } = self;
        drop(pipeline);
        drop(gpu);
        drop(window);
        log::info!("Window destroyed");
    }
}

pub struct WinitBackend {
    display: Option<Display>,
    cursor: Option<(f64, f64)>,
    queued: Vec<HardwareEvent>,
    event_loop: EventLoop<()>,
}

impl WinitBackend {
    pub fn new() -> Result<Self, BackendError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        Ok(Self {
            display: None,
            cursor: None,
            queued: Vec::new(),
            event_loop,
        })
    }

    fn pump(&mut self, open: Option<&PlatformConfig>) -> Result<Option<Result<(), BackendError>>, BackendError> {
        let mut handler = PumpHandler {
            display: &mut self.display,
            cursor: &mut self.cursor,
            events: &mut self.queued,
            open,
            opened: None,
        };
        match self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut handler)
        {
            PumpStatus::Continue => Ok(handler.opened),
            PumpStatus::Exit(code) => Err(BackendError::Exited(code)),
        }
    }
}

impl Backend for WinitBackend {
    fn acquire(&mut self, config: &PlatformConfig) -> Result<(), BackendError> {
        self.release();
        for _ in 0..OPEN_PUMP_ATTEMPTS {
            if let Some(result) = self.pump(Some(config))? {
                return result;
            }
        }
        Err(BackendError::NoWindow)
    }

    fn release(&mut self) {
        if let Some(display) = self.display.take() {
            display.close();
        }
        self.cursor = None;
    }

    fn drain_events(&mut self, events: &mut Vec<HardwareEvent>) {
        if let Err(err) = self.pump(None) {
            log::info!("Event loop stopped: {err}");
            self.queued.push(HardwareEvent::Quit);
        }
        events.append(&mut self.queued);
    }

    fn cursor_position(&self) -> Option<(f64, f64)> {
        self.display.as_ref().and(self.cursor)
    }

    fn present(&mut self, pixels: &[u32]) -> Result<(), BackendError> {
        let display = self.display.as_ref().ok_or(BackendError::NotOpen)?;
        display.pipeline.present(&display.gpu, pixels)?;
        Ok(())
    }
}

impl Drop for WinitBackend {
    fn drop(&mut self) {
        self.release();
    }
}

/// Borrowed view of the backend handed to winit for one pump.
struct PumpHandler<'a> {
    display: &'a mut Option<Display>,
    cursor: &'a mut Option<(f64, f64)>,
    events: &'a mut Vec<HardwareEvent>,
    open: Option<&'a PlatformConfig>,
    opened: Option<Result<(), BackendError>>,
}

impl PumpHandler<'_> {
    fn open_pending(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.open.take() else {
            return;
        };
        self.opened = Some(Display::open(event_loop, config).map(|display| {
            *self.display = Some(display);
        }));
    }

    fn is_current(&self, window_id: WindowId) -> bool {
        self.display
            .as_ref()
            .is_some_and(|d| d.window.id() == window_id)
    }
}

impl ApplicationHandler for PumpHandler<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.open_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.open_pending(event_loop);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        // Late events addressed to a window torn down by re-construction.
        if !self.is_current(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.events.push(HardwareEvent::Quit);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(id) = map_key(event.physical_key) {
                    self.events.push(match event.state {
                        ElementState::Pressed => HardwareEvent::Down(id),
                        ElementState::Released => HardwareEvent::Up(id),
                    });
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(id) = map_mouse_button(button) {
                    self.events.push(match state {
                        ElementState::Pressed => HardwareEvent::Down(id),
                        ElementState::Released => HardwareEvent::Up(id),
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                *self.cursor = Some((position.x, position.y));
            }

            WindowEvent::CursorLeft { .. } => {
                *self.cursor = None;
            }

            _ => {}
        }
    }
}
