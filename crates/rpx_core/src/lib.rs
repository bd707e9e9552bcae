pub mod color;
pub mod input;
pub mod random;
pub mod raster;
pub mod shapes;
pub mod time;
pub mod vec2;

pub use color::Color;
pub use input::{ButtonId, HardwareButton, HardwareEvent, InputState};
pub use random::{Lcg, RandomError};
pub use raster::{Raster, RasterError};
pub use shapes::{Line, Rectangle, Shape};
pub use time::FrameClock;
pub use vec2::{Position, Vector2D};
