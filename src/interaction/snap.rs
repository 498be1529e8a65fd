//! Grid snapping

use crate::config::ConfigError;
use crate::document::{Point, Size};

/// Maps a proposed position onto an allowed one
pub trait PointSnapper {
    fn snap_point(&self, point: Point) -> Point;
}

/// Maps a proposed size onto an allowed one
pub trait SizeSnapper {
    fn snap_size(&self, size: Size) -> Size;
}

impl<F: Fn(Point) -> Point> PointSnapper for F {
    fn snap_point(&self, point: Point) -> Point {
        self(point)
    }
}

impl<F: Fn(Size) -> Size> SizeSnapper for F {
    fn snap_size(&self, size: Size) -> Size {
        self(size)
    }
}

/// Quantizes coordinates and sizes to multiples of a square cell
///
/// Halfway values round away from zero: with a 40 cell, 20 snaps to 40 and
/// -20 snaps to -40.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSnap {
    cell_size: f64,
}

impl GridSnap {
    /// A grid with the given cell size, which must be finite and positive
    pub fn new(cell_size: f64) -> Result<Self, ConfigError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(ConfigError::invalid(
                "grid.cell_size",
                format!("must be a positive number, got {}", cell_size),
            ));
        }
        Ok(Self { cell_size })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Nearest multiple of the cell size
    pub fn snap(&self, value: f64) -> f64 {
        (value / self.cell_size).round() * self.cell_size
    }

    pub fn snap_xy(&self, x: f64, y: f64) -> Point {
        Point::new(self.snap(x), self.snap(y))
    }

    /// Snapped size, never smaller than one cell in either dimension
    pub fn snap_wh(&self, w: f64, h: f64) -> Size {
        Size::new(
            self.snap(w).max(self.cell_size),
            self.snap(h).max(self.cell_size),
        )
    }
}

impl PointSnapper for GridSnap {
    fn snap_point(&self, point: Point) -> Point {
        self.snap_xy(point.x, point.y)
    }
}

impl SizeSnapper for GridSnap {
    fn snap_size(&self, size: Size) -> Size {
        self.snap_wh(size.w, size.h)
    }
}
