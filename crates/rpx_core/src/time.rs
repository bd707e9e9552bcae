use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;
const STALL_WARN_MS: f64 = 1000.0;

/// Wall-clock frame timing for a variable-step loop.
pub struct FrameClock {
    last_instant: Instant,
    pub elapsed_ms: f64,
    pub frame_count: u64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_instant: Instant::now(),
            elapsed_ms: 0.0,
            frame_count: 0,
            fps_samples: [1000.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 1000.0 / 60.0,
        }
    }

    /// Mark the start of a frame; returns milliseconds since the previous mark.
    pub fn begin_frame(&mut self) -> f64 {
        self.begin_frame_at(Instant::now())
    }

    pub fn begin_frame_at(&mut self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.last_instant);
        self.last_instant = now;
        self.record(elapsed);
        self.elapsed_ms
    }

    fn record(&mut self, elapsed: Duration) {
        self.elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        self.frame_count += 1;

        if self.elapsed_ms > STALL_WARN_MS {
            log::warn!("Frame took {:.1}ms", self.elapsed_ms);
        }

        self.fps_samples[self.fps_sample_index] = self.elapsed_ms;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_ms: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_ms;
        self.smoothed_fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
