pub mod app;
pub mod backend;
pub mod engine;
pub mod headless;
pub mod script;
pub mod winit_backend;

pub use app::{Application, Flow, RunStatus};
pub use backend::{Backend, BackendError};
pub use engine::{Context, Engine, EngineError};
pub use headless::HeadlessBackend;
pub use rpx_platform::{ConfigError, PlatformConfig};
pub use script::{load_input_script_from_path, InputScript, ScriptError, ScriptFrame};
pub use winit_backend::WinitBackend;

/// Open a window for `config` and run `A` in it with `args`.
pub fn run_windowed<A: Application + Default>(config: PlatformConfig, args: &[String]) -> RunStatus {
    let backend = match WinitBackend::new() {
        Ok(backend) => backend,
        Err(err) => {
            log::error!("Failed to start windowing backend: {err}");
            return RunStatus::Failure;
        }
    };
    let mut engine = Engine::new(backend);
    if engine.construct_with(config).is_err() {
        return RunStatus::Failure;
    }
    engine.run::<A>(args)
}
