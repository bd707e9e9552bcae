pub mod keys;
pub mod window;

pub use keys::{map_key, map_mouse_button};
pub use window::{create_window, ConfigError, PlatformConfig};
