//! Application hooks and the frame loop that drives them.

use std::process::ExitCode;

use rpx_core::{FrameClock, HardwareEvent};

use crate::backend::Backend;
use crate::engine::{Context, Engine};

/// What the application wants after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failure,
}

impl RunStatus {
    pub fn is_success(self) -> bool {
        self == RunStatus::Success
    }
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::Failure => ExitCode::FAILURE,
        }
    }
}

pub trait Application {
    /// Called once before the first frame. `Ok(false)` or an error aborts the run.
    fn initialize(&mut self, ctx: &mut Context, args: &[String]) -> anyhow::Result<bool>;

    /// Called once per frame with the time since the previous frame began.
    fn advance(&mut self, ctx: &mut Context, elapsed_ms: f64) -> anyhow::Result<Flow>;

    /// Called once after the last frame of a successfully initialized run.
    fn finalize(&mut self, _ctx: &mut Context) {}
}

impl<B: Backend> Engine<B> {
    /// Run a default-constructed `A` until it stops, the user quits or a frame fails.
    pub fn run<A: Application + Default>(&mut self, args: &[String]) -> RunStatus {
        self.run_with(A::default(), args)
    }

    pub fn run_with<A: Application>(&mut self, mut app: A, args: &[String]) -> RunStatus {
        let Engine { backend, state } = self;
        let Some(ctx) = state.as_mut() else {
            log::error!("Engine::run called before a successful construct");
            return RunStatus::Failure;
        };

        let mut events = Vec::new();
        backend.drain_events(&mut events);
        if events.contains(&HardwareEvent::Quit) {
            log::info!("Quit requested before start");
            return RunStatus::Success;
        }
        events.clear();

        let mut clock = FrameClock::new();
        match app.initialize(ctx, args) {
            Ok(true) => {}
            Ok(false) => {
                log::error!("Application initialization failed");
                return RunStatus::Failure;
            }
            Err(err) => {
                log::error!("Application initialization failed: {err:#}");
                return RunStatus::Failure;
            }
        }

        let mut status = RunStatus::Success;
        let mut terminate = false;
        while !terminate {
            let elapsed_ms = clock.begin_frame();

            backend.drain_events(&mut events);
            for event in events.drain(..) {
                terminate |= ctx.apply_event(event);
            }
            ctx.set_cursor(backend.cursor_position());
            ctx.advance_input();

            match app.advance(ctx, elapsed_ms) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => terminate = true,
                Err(err) => {
                    log::error!("Application update failed: {err:#}");
                    status = RunStatus::Failure;
                    terminate = true;
                }
            }

            if let Err(err) = backend.present(ctx.raster().pixels()) {
                log::error!("Present failed: {err}");
                status = RunStatus::Failure;
                terminate = true;
            }
            log::trace!("Frame {} took {elapsed_ms:.2} ms", clock.frame_count);
        }

        app.finalize(ctx);
        drop(app);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessBackend;
    use crate::script::InputScript;
    use rpx_core::{ButtonId, Color, HardwareButton, Position};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        frames: Rc<RefCell<Vec<HardwareButton>>>,
        finalized: Rc<RefCell<usize>>,
        stop_after: Option<usize>,
        fail_at: Option<usize>,
        refuse_init: bool,
    }

    impl Application for Recorder {
        fn initialize(&mut self, ctx: &mut Context, _args: &[String]) -> anyhow::Result<bool> {
            ctx.clear(Color::BLUE);
            Ok(!self.refuse_init)
        }

        fn advance(&mut self, ctx: &mut Context, _elapsed_ms: f64) -> anyhow::Result<Flow> {
            let frame = {
                let mut frames = self.frames.borrow_mut();
                frames.push(ctx.button(ButtonId::Keyboard('q')));
                frames.len()
            };
            ctx.set_pixel(Position::new(0, 0), Color::WHITE)?;
            if self.fail_at == Some(frame) {
                anyhow::bail!("frame {frame} failed");
            }
            if self.stop_after == Some(frame) {
                return Ok(Flow::Stop);
            }
            Ok(Flow::Continue)
        }

        fn finalize(&mut self, _ctx: &mut Context) {
            *self.finalized.borrow_mut() += 1;
        }
    }

    fn ready_engine(backend: HeadlessBackend) -> Engine<HeadlessBackend> {
        let mut engine = Engine::new(backend);
        engine.construct(80, 60, 10).expect("construct");
        engine
    }

    #[test]
    fn run_before_construct_fails() {
        let mut engine = Engine::new(HeadlessBackend::new());
        assert_eq!(engine.run::<Recorder>(&[]), RunStatus::Failure);
    }

    #[test]
    fn queued_quit_skips_application() {
        let mut engine = ready_engine(HeadlessBackend::new());
        engine.backend_mut().push_event(HardwareEvent::Quit);
        let app = Recorder::default();
        let finalized = app.finalized.clone();
        assert_eq!(engine.run_with(app, &[]), RunStatus::Success);
        assert_eq!(*finalized.borrow(), 0);
        assert_eq!(engine.backend().presented_frames(), 0);
    }

    #[test]
    fn stale_button_events_are_discarded_before_start() {
        let mut engine = ready_engine(HeadlessBackend::new());
        engine
            .backend_mut()
            .push_event(HardwareEvent::Down(ButtonId::Keyboard('q')));
        let app = Recorder {
            stop_after: Some(1),
            ..Recorder::default()
        };
        let frames = app.frames.clone();
        assert_eq!(engine.run_with(app, &[]), RunStatus::Success);
        assert!(!frames.borrow()[0].down);
    }

    #[test]
    fn refused_initialize_fails_without_finalize() {
        let mut engine = ready_engine(HeadlessBackend::new());
        let app = Recorder {
            refuse_init: true,
            ..Recorder::default()
        };
        let finalized = app.finalized.clone();
        assert_eq!(engine.run_with(app, &[]), RunStatus::Failure);
        assert_eq!(*finalized.borrow(), 0);
    }

    #[test]
    fn key_press_is_seen_once_then_held_then_released() {
        let script = InputScript::from_json(
            r#"{
              "frames": [
                {},
                {},
                { "events": [{ "down": { "keyboard": "q" } }] },
                { "repeat": 3 },
                { "events": [{ "up": { "keyboard": "q" } }] },
                { "repeat": 2 }
              ],
              "quit_at_end": true
            }"#,
        )
        .expect("script");
        let mut engine = ready_engine(HeadlessBackend::with_script(&script));
        let app = Recorder::default();
        let frames = app.frames.clone();
        let finalized = app.finalized.clone();

        assert_eq!(engine.run_with(app, &[]), RunStatus::Success);

        let frames = frames.borrow();
        // The pre-start purge eats the first scripted frame; quit lands on the
        // frame after the script runs out.
        assert_eq!(frames.len(), 9);
        assert_eq!(frames[0], HardwareButton::default());
        assert!(frames[1].down && frames[1].pressed && !frames[1].released);
        for held in &frames[2..5] {
            assert!(held.down && !held.pressed && !held.released);
        }
        assert!(!frames[5].down && frames[5].released && !frames[5].pressed);
        for idle in &frames[6..] {
            assert!(!idle.down && !idle.pressed && !idle.released);
        }
        assert_eq!(*finalized.borrow(), 1);
        assert_eq!(engine.backend().presented_frames(), 9);
    }

    #[test]
    fn stop_ends_run_after_presenting_that_frame() {
        let mut engine = ready_engine(HeadlessBackend::new());
        let app = Recorder {
            stop_after: Some(3),
            ..Recorder::default()
        };
        let finalized = app.finalized.clone();
        assert_eq!(engine.run_with(app, &[]), RunStatus::Success);
        assert_eq!(engine.backend().presented_frames(), 3);
        assert_eq!(*finalized.borrow(), 1);

        let last = engine.backend().last_frame();
        assert_eq!(last.len(), 48);
        assert_eq!(last[0], Color::WHITE.to_packed());
        assert_eq!(last[1], Color::BLUE.to_packed());
    }

    #[test]
    fn update_error_still_presents_then_fails() {
        let mut engine = ready_engine(HeadlessBackend::new());
        let app = Recorder {
            fail_at: Some(2),
            ..Recorder::default()
        };
        let finalized = app.finalized.clone();
        assert_eq!(engine.run_with(app, &[]), RunStatus::Failure);
        assert_eq!(engine.backend().presented_frames(), 2);
        assert_eq!(*finalized.borrow(), 1);
    }

    #[test]
    fn present_error_fails_run() {
        let mut engine = ready_engine(HeadlessBackend::new());
        engine.backend_mut().fail_present_at(0);
        let app = Recorder::default();
        let frames = app.frames.clone();
        assert_eq!(engine.run_with(app, &[]), RunStatus::Failure);
        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn engine_can_run_again_after_reconstruct() {
        let mut engine = ready_engine(HeadlessBackend::new());
        let first = Recorder {
            stop_after: Some(1),
            ..Recorder::default()
        };
        assert!(engine.run_with(first, &[]).is_success());

        engine.construct(40, 40, 4).expect("reconstruct");
        let second = Recorder {
            stop_after: Some(1),
            ..Recorder::default()
        };
        assert!(engine.run_with(second, &[]).is_success());
        assert_eq!(engine.backend().last_frame().len(), 100);
    }
}
