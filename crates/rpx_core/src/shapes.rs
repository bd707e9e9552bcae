//! Outline and fill primitives drawn straight into a [`Raster`].
//!
//! Pixels that land outside the raster are skipped, so shapes may freely cross
//! the edges.

use crate::color::Color;
use crate::raster::Raster;
use crate::vec2::{Position, Vector2D};

pub trait Shape {
    fn draw(&self, raster: &mut Raster);
    fn fill(&self, raster: &mut Raster);
}

/// Linear interpolation from `start` (t = 0) to `stop` (t = 1).
pub fn lerp(start: Vector2D<f64>, stop: Vector2D<f64>, t: f64) -> Vector2D<f64> {
    start + (stop - start) * t
}

fn plot(raster: &mut Raster, pos: Position, color: Color) {
    // Off-raster pixels are expected here.
    let _ = raster.set_color_at(pos, color);
}

/// Straight segment sampled at `max(dx, dy) + 1` evenly spaced points.
///
/// Each sample is rounded to the nearest pixel (halves away from zero) rather
/// than truncated, so the segment stays symmetric about its midpoint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: Position,
    pub stop: Position,
    pub color: Color,
}

impl Line {
    pub fn new(start: Position, stop: Position, color: Color) -> Self {
        Self { start, stop, color }
    }
}

impl Shape for Line {
    fn draw(&self, raster: &mut Raster) {
        let dx = self.start.x.abs_diff(self.stop.x);
        let dy = self.start.y.abs_diff(self.stop.y);
        let steps = dx.max(dy);
        if steps == 0 {
            plot(raster, self.start, self.color);
            return;
        }
        let (Some(from), Some(to)) = (self.start.cast::<f64>(), self.stop.cast::<f64>()) else {
            return;
        };
        for i in 0..=steps {
            let t = f64::from(i) / f64::from(steps);
            let point = lerp(from, to, t);
            if let Some(pos) = Vector2D::new(point.x.round(), point.y.round()).cast::<u32>() {
                plot(raster, pos, self.color);
            }
        }
    }

    fn fill(&self, _raster: &mut Raster) {}
}

/// Axis-aligned rectangle; corners are normalized on construction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub top_left: Position,
    pub bottom_right: Position,
    pub outline: Color,
    pub fill: Color,
}

impl Rectangle {
    pub fn new(corner: Position, opposite: Position, outline: Color, fill: Color) -> Self {
        Self {
            top_left: Position::new(corner.x.min(opposite.x), corner.y.min(opposite.y)),
            bottom_right: Position::new(corner.x.max(opposite.x), corner.y.max(opposite.y)),
            outline,
            fill,
        }
    }
}

impl Shape for Rectangle {
    fn draw(&self, raster: &mut Raster) {
        let Rectangle {
            top_left: tl,
            bottom_right: br,
            ..
        } = *self;
        for x in tl.x..=br.x {
            plot(raster, Position::new(x, tl.y), self.outline);
            plot(raster, Position::new(x, br.y), self.outline);
        }
        for y in tl.y..=br.y {
            plot(raster, Position::new(tl.x, y), self.outline);
            plot(raster, Position::new(br.x, y), self.outline);
        }
    }

    fn fill(&self, raster: &mut Raster) {
        let tl = self.top_left;
        let br = self.bottom_right;
        for y in tl.y.saturating_add(1)..br.y {
            for x in tl.x.saturating_add(1)..br.x {
                plot(raster, Position::new(x, y), self.fill);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(raster: &Raster, color: Color) -> usize {
        raster
            .pixels()
            .iter()
            .filter(|&&p| p == color.to_packed())
            .count()
    }

    #[test]
    fn diagonal_line_covers_every_step() {
        let mut raster = Raster::new(8, 8).expect("raster");
        Line::new(Position::new(0, 0), Position::new(7, 7), Color::RED).draw(&mut raster);
        assert_eq!(lit(&raster, Color::RED), 8);
        for i in 0..8 {
            assert_eq!(raster.color_at(Position::new(i, i)), Ok(Color::RED));
        }
    }

    #[test]
    fn line_samples_round_to_nearest_pixel() {
        let mut raster = Raster::new(4, 4).expect("raster");
        Line::new(Position::new(0, 0), Position::new(2, 1), Color::RED).draw(&mut raster);
        // The midpoint sample (1.0, 0.5) lands on row 1; truncating would give row 0.
        assert_eq!(raster.color_at(Position::new(1, 1)), Ok(Color::RED));
        assert_eq!(raster.get_at(Position::new(1, 0)), Ok(0));
        assert_eq!(lit(&raster, Color::RED), 3);
    }

    #[test]
    fn degenerate_line_plots_one_pixel() {
        let mut raster = Raster::new(4, 4).expect("raster");
        Line::new(Position::new(2, 1), Position::new(2, 1), Color::GREEN).draw(&mut raster);
        assert_eq!(lit(&raster, Color::GREEN), 1);
    }

    #[test]
    fn line_crossing_the_edge_is_clipped() {
        let mut raster = Raster::new(4, 4).expect("raster");
        Line::new(Position::new(0, 1), Position::new(9, 1), Color::BLUE).draw(&mut raster);
        assert_eq!(lit(&raster, Color::BLUE), 4);
    }

    #[test]
    fn rectangle_normalizes_corners() {
        let rect = Rectangle::new(
            Position::new(5, 1),
            Position::new(2, 4),
            Color::WHITE,
            Color::RED,
        );
        assert_eq!(rect.top_left, Position::new(2, 1));
        assert_eq!(rect.bottom_right, Position::new(5, 4));
    }

    #[test]
    fn rectangle_outline_and_fill_do_not_overlap() {
        let mut raster = Raster::new(10, 10).expect("raster");
        let rect = Rectangle::new(
            Position::new(1, 1),
            Position::new(4, 4),
            Color::WHITE,
            Color::RED,
        );
        rect.draw(&mut raster);
        rect.fill(&mut raster);
        // 4x4 box: 12 border pixels and a 2x2 interior.
        assert_eq!(lit(&raster, Color::WHITE), 12);
        assert_eq!(lit(&raster, Color::RED), 4);
        assert_eq!(raster.color_at(Position::new(2, 2)), Ok(Color::RED));
    }

    #[test]
    fn lerp_endpoints() {
        let a = Vector2D::new(0.0, 10.0);
        let b = Vector2D::new(4.0, 2.0);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Vector2D::new(2.0, 6.0));
    }
}
