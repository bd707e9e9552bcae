//! Row-major, bounds-checked pixel buffer.
//!
//! Every access is checked against `rows`/`cols` and reports
//! [`RasterError::OutOfRange`] instead of clamping or wrapping. Callers that draw
//! shapes crossing the edge are expected to discard those errors themselves.

use crate::color::Color;
use crate::vec2::Position;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("pixel ({row}, {col}) is outside the {rows}x{cols} raster")]
    OutOfRange {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },
    #[error("cannot allocate a {rows}x{cols} raster")]
    Allocation { rows: u32, cols: u32 },
}

/// Owned `rows x cols` grid of packed RGBA8888 words.
///
/// `Default` is the empty 0x0 raster with no backing storage. `Clone` is a deep
/// copy; [`Raster::take`] moves the contents out and leaves the empty state behind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Raster {
    rows: u32,
    cols: u32,
    data: Vec<u32>,
}

impl Raster {
    /// Allocate a zero-filled raster.
    pub fn new(rows: u32, cols: u32) -> Result<Self, RasterError> {
        let alloc_err = RasterError::Allocation { rows, cols };
        let len = (rows as usize)
            .checked_mul(cols as usize)
            .ok_or_else(|| alloc_err.clone())?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| alloc_err)?;
        data.resize(len, 0);
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Contiguous row-major pixel words, ready to upload as-is.
    pub fn pixels(&self) -> &[u32] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    pub fn get(&self, row: u32, col: u32) -> Result<u32, RasterError> {
        let index = self.index(row, col)?;
        Ok(self.data[index])
    }

    pub fn set(&mut self, row: u32, col: u32, value: u32) -> Result<(), RasterError> {
        let index = self.index(row, col)?;
        self.data[index] = value;
        Ok(())
    }

    /// Read by coordinate: `pos.x` is the column, `pos.y` the row.
    pub fn get_at(&self, pos: Position) -> Result<u32, RasterError> {
        self.get(pos.y, pos.x)
    }

    pub fn set_at(&mut self, pos: Position, value: u32) -> Result<(), RasterError> {
        self.set(pos.y, pos.x, value)
    }

    pub fn color_at(&self, pos: Position) -> Result<Color, RasterError> {
        self.get_at(pos).map(Color::from_packed)
    }

    pub fn set_color_at(&mut self, pos: Position, color: Color) -> Result<(), RasterError> {
        self.set_at(pos, color.to_packed())
    }

    pub fn fill(&mut self, value: u32) {
        self.data.fill(value);
    }

    /// Move the contents out, leaving `self` empty.
    pub fn take(&mut self) -> Raster {
        std::mem::take(self)
    }

    fn index(&self, row: u32, col: u32) -> Result<usize, RasterError> {
        if row >= self.rows || col >= self.cols {
            return Err(RasterError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row as usize * self.cols as usize + col as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_empty() {
        let raster = Raster::default();
        assert!(raster.is_empty());
        assert_eq!((raster.rows(), raster.cols()), (0, 0));
        assert!(raster.get(0, 0).is_err());
    }

    #[test]
    fn zero_dimension_is_valid_and_empty() {
        let raster = Raster::new(0, 12).expect("empty raster");
        assert!(raster.is_empty());
        assert!(raster.pixels().is_empty());
    }

    #[test]
    fn one_by_one_bounds() {
        let mut raster = Raster::new(1, 1).expect("1x1 raster");
        raster.set(0, 0, 7).expect("in range");
        assert_eq!(raster.get(0, 0), Ok(7));
        assert!(raster.get(1, 0).is_err());
        assert!(raster.get(0, 1).is_err());
        assert!(raster.set(1, 0, 1).is_err());
        assert!(raster.set(0, 1, 1).is_err());
    }

    #[test]
    fn out_of_range_reports_coordinates() {
        let raster = Raster::new(48, 64).expect("raster");
        assert_eq!(
            raster.get(48, 3),
            Err(RasterError::OutOfRange {
                row: 48,
                col: 3,
                rows: 48,
                cols: 64
            })
        );
    }

    #[test]
    fn position_maps_x_to_column() {
        let mut raster = Raster::new(2, 3).expect("raster");
        raster.set_at(Position::new(2, 1), 0xAB).expect("in range");
        assert_eq!(raster.get(1, 2), Ok(0xAB));
        assert_eq!(raster.pixels()[5], 0xAB);
        assert!(raster.get_at(Position::new(1, 2)).is_err());
    }

    #[test]
    fn colors_are_stored_packed() {
        let mut raster = Raster::new(4, 4).expect("raster");
        raster
            .set_color_at(Position::new(1, 1), Color::CYAN)
            .expect("in range");
        assert_eq!(raster.get(1, 1), Ok(Color::CYAN.to_packed()));
        assert_eq!(raster.color_at(Position::new(1, 1)), Ok(Color::CYAN));
    }

    #[test]
    fn clone_is_deep() {
        let mut original = Raster::new(2, 2).expect("raster");
        let copy = original.clone();
        original.fill(9);
        assert_eq!(copy.get(0, 0), Ok(0));
        assert_eq!(original.get(1, 1), Ok(9));
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut source = Raster::new(3, 5).expect("raster");
        source.set(2, 4, 1).expect("in range");
        let moved = source.take();
        assert!(source.is_empty());
        assert_eq!((source.rows(), source.cols()), (0, 0));
        assert_eq!(moved.get(2, 4), Ok(1));
    }

    #[test]
    fn oversized_allocation_fails() {
        assert_eq!(
            Raster::new(u32::MAX, u32::MAX),
            Err(RasterError::Allocation {
                rows: u32::MAX,
                cols: u32::MAX
            })
        );
    }

    proptest! {
        #[test]
        fn access_succeeds_exactly_inside_bounds(rows in 1u32..40, cols in 1u32..40, row in 0u32..45, col in 0u32..45) {
            let mut raster = Raster::new(rows, cols).expect("raster");
            let inside = row < rows && col < cols;
            prop_assert_eq!(raster.set(row, col, 1).is_ok(), inside);
            prop_assert_eq!(raster.get(row, col).is_ok(), inside);
            prop_assert!(raster.get(rows, col.min(cols - 1)).is_err());
            prop_assert!(raster.get(row.min(rows - 1), cols).is_err());
        }
    }
}
