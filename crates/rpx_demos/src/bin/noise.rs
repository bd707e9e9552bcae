//! Full-screen random noise with a once-per-second FPS log.
//!
//! q = quit

use std::process::ExitCode;

use rpx_core::{ButtonId, Color, Lcg, Position};
use rpx_engine::{Application, Context, Flow, PlatformConfig};

#[derive(Default)]
struct Noise {
    rng: Lcg,
    ms_count: f64,
    frames: u32,
}

impl Noise {
    /// Count one frame and return the frame total once a full second has elapsed.
    fn tally(&mut self, elapsed_ms: f64) -> Option<u32> {
        self.frames += 1;
        self.ms_count += elapsed_ms;
        if self.ms_count < 1000.0 {
            return None;
        }
        let fps = self.frames;
        self.frames = 0;
        self.ms_count -= 1000.0;
        Some(fps)
    }
}

impl Application for Noise {
    fn initialize(&mut self, ctx: &mut Context, _args: &[String]) -> anyhow::Result<bool> {
        ctx.clear(Color::WHITE);
        Ok(true)
    }

    fn advance(&mut self, ctx: &mut Context, elapsed_ms: f64) -> anyhow::Result<Flow> {
        for row in 0..ctx.height() {
            for col in 0..ctx.width() {
                let color = Color::new(self.rng.next_u8(), self.rng.next_u8(), self.rng.next_u8());
                ctx.set_pixel(Position::new(col, row), color)?;
            }
        }
        if let Some(fps) = self.tally(elapsed_ms) {
            log::info!("FPS={fps}");
        }
        if ctx.button(ButtonId::Keyboard('q')).pressed {
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = PlatformConfig::new(640, 480, 10).with_title("noise");
    rpx_engine::run_windowed::<Noise>(config, &args).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpx_engine::{Engine, HeadlessBackend, InputScript, RunStatus};

    #[test]
    fn fps_is_reported_once_per_second() {
        let mut noise = Noise::default();
        let reports: Vec<u32> = (0..60).filter_map(|_| noise.tally(40.0)).collect();
        assert_eq!(reports, vec![25, 25]);
    }

    #[test]
    fn q_stops_the_run() {
        let script = InputScript::from_json(
            r#"{
              "frames": [{ "repeat": 2 }, { "events": [{ "down": { "keyboard": "q" } }] }],
              "quit_at_end": false
            }"#,
        )
        .expect("script");
        let mut engine = Engine::new(HeadlessBackend::with_script(&script));
        engine.construct(40, 30, 10).expect("construct");

        let app = Noise {
            rng: Lcg::with_seed(7),
            ..Noise::default()
        };
        assert_eq!(engine.run_with(app, &[]), RunStatus::Success);
        // The pre-start purge consumes the first scripted frame.
        assert_eq!(engine.backend().presented_frames(), 2);
        assert_eq!(engine.backend().last_frame().len(), 12);
    }
}
