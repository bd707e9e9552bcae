//! Generic 2-component vector used for raster coordinates and 2D quantities.
//!
//! `Position` (`Vector2D<u32>`) addresses the raster: `x` is the column, `y` the row.
//! Signed and floating instantiations are used by applications for offsets and
//! physics. Conversions between element types go through [`Vector2D::cast`], which
//! refuses values that do not fit instead of wrapping.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// A pair of components of the same numeric type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector2D<T> {
    pub x: T,
    pub y: T,
}

/// Raster coordinate (`x` = column, `y` = row).
pub type Position = Vector2D<u32>;

impl<T> Vector2D<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Component> Vector2D<T> {
    /// Convert both components to `U`, or `None` if either does not fit.
    ///
    /// Float to integer conversion truncates toward zero; NaN never converts.
    pub fn cast<U: Component>(self) -> Option<Vector2D<U>> {
        Some(Vector2D {
            x: U::from_f64(self.x.to_f64())?,
            y: U::from_f64(self.y.to_f64())?,
        })
    }
}

/// Numeric element types that [`Vector2D::cast`] can convert between.
pub trait Component: Copy {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Option<Self>;
}

macro_rules! integer_component {
    ($($t:ty),*) => {$(
        impl Component for $t {
            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Option<Self> {
                let truncated = value.trunc();
                if truncated.is_nan() || truncated < <$t>::MIN as f64 || truncated > <$t>::MAX as f64 {
                    return None;
                }
                Some(truncated as $t)
            }
        }
    )*};
}

integer_component!(u8, u16, u32, i8, i16, i32);

impl Component for f32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() && value.abs() > f64::from(f32::MAX) {
            return None;
        }
        Some(value as f32)
    }
}

impl Component for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Option<Self> {
        Some(value)
    }
}

impl<T: AddAssign> AddAssign for Vector2D<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T: SubAssign> SubAssign for Vector2D<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<T: MulAssign + Copy> MulAssign<T> for Vector2D<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl<T: DivAssign + Copy> DivAssign<T> for Vector2D<T> {
    fn div_assign(&mut self, rhs: T) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl<T: Add<Output = T>> Add for Vector2D<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Vector2D<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for Vector2D<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Div<Output = T> + Copy> Div<T> for Vector2D<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

// `scalar * vector` for the primitive element types.
macro_rules! scalar_lhs_mul {
    ($($t:ty),*) => {$(
        impl Mul<Vector2D<$t>> for $t {
            type Output = Vector2D<$t>;

            fn mul(self, rhs: Vector2D<$t>) -> Vector2D<$t> {
                rhs * self
            }
        }
    )*};
}

scalar_lhs_mul!(u32, i32, f32, f64);

impl From<glam::Vec2> for Vector2D<f32> {
    fn from(v: glam::Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D<f32>> for glam::Vec2 {
    fn from(v: Vector2D<f32>) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}

impl From<glam::DVec2> for Vector2D<f64> {
    fn from(v: glam::DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D<f64>> for glam::DVec2 {
    fn from(v: Vector2D<f64>) -> Self {
        glam::DVec2::new(v.x, v.y)
    }
}

impl From<glam::IVec2> for Vector2D<i32> {
    fn from(v: glam::IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D<i32>> for glam::IVec2 {
    fn from(v: Vector2D<i32>) -> Self {
        glam::IVec2::new(v.x, v.y)
    }
}

impl From<glam::UVec2> for Position {
    fn from(v: glam::UVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Position> for glam::UVec2 {
    fn from(v: Position) -> Self {
        glam::UVec2::new(v.x, v.y)
    }
}
