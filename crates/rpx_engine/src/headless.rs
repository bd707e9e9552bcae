//! In-memory backend used by tests and scripted runs.

use std::collections::VecDeque;

use rpx_core::HardwareEvent;
use rpx_platform::PlatformConfig;

use crate::backend::{Backend, BackendError};
use crate::script::InputScript;

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    live: Option<PlatformConfig>,
    acquire_count: usize,
    release_count: usize,
    queued: Vec<HardwareEvent>,
    script: VecDeque<Vec<HardwareEvent>>,
    quit_after_script: bool,
    cursor: Option<(f64, f64)>,
    presented: usize,
    last_frame: Vec<u32>,
    fail_acquire: Option<String>,
    fail_present_at: Option<usize>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay `script` one frame per `drain_events` call.
    pub fn with_script(script: &InputScript) -> Self {
        Self {
            script: script.expanded_frames().into(),
            quit_after_script: script.quit_at_end,
            ..Self::default()
        }
    }

    /// Queue an event for the next drain, ahead of any scripted frame.
    pub fn push_event(&mut self, event: HardwareEvent) {
        self.queued.push(event);
    }

    pub fn set_cursor(&mut self, cursor: Option<(f64, f64)>) {
        self.cursor = cursor;
    }

    /// Make the next `acquire` fail with `reason`.
    pub fn fail_next_acquire(&mut self, reason: impl Into<String>) {
        self.fail_acquire = Some(reason.into());
    }

    /// Make the present call with zero-based index `frame` fail.
    pub fn fail_present_at(&mut self, frame: usize) {
        self.fail_present_at = Some(frame);
    }

    pub fn live_config(&self) -> Option<&PlatformConfig> {
        self.live.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.live.is_some()
    }

    pub fn acquire_count(&self) -> usize {
        self.acquire_count
    }

    pub fn release_count(&self) -> usize {
        self.release_count
    }

    pub fn presented_frames(&self) -> usize {
        self.presented
    }

    pub fn last_frame(&self) -> &[u32] {
        &self.last_frame
    }
}

impl Backend for HeadlessBackend {
    fn acquire(&mut self, config: &PlatformConfig) -> Result<(), BackendError> {
        self.release();
        if let Some(reason) = self.fail_acquire.take() {
            return Err(BackendError::Simulated(reason));
        }
        self.acquire_count += 1;
        self.live = Some(config.clone());
        log::debug!(
            "Headless display opened: {}x{} raster",
            config.raster_width(),
            config.raster_height()
        );
        Ok(())
    }

    fn release(&mut self) {
        if self.live.take().is_some() {
            self.release_count += 1;
            log::debug!("Headless display released");
        }
    }

    fn drain_events(&mut self, events: &mut Vec<HardwareEvent>) {
        events.append(&mut self.queued);
        match self.script.pop_front() {
            Some(frame) => events.extend(frame),
            None if self.quit_after_script => events.push(HardwareEvent::Quit),
            None => {}
        }
    }

    fn cursor_position(&self) -> Option<(f64, f64)> {
        self.live.as_ref().and(self.cursor)
    }

    fn present(&mut self, pixels: &[u32]) -> Result<(), BackendError> {
        if self.live.is_none() {
            return Err(BackendError::NotOpen);
        }
        let index = self.presented;
        self.presented += 1;
        if self.fail_present_at == Some(index) {
            return Err(BackendError::Simulated(format!("present {index} failed")));
        }
        self.last_frame.clear();
        self.last_frame.extend_from_slice(pixels);
        Ok(())
    }
}
