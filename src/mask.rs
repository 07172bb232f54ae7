//! Raster stencils with optional polygon descriptions.
//!
//! A [`Mask`] is a fixed-size grid of weights in `[0, 1]` (0 excluded). Only the
//! code that builds a mask mutates it; once it is wrapped in an `Arc` and
//! handed to buffers or tiles it is read-only.

use std::fmt;

use crate::errors::ConfigError;
use crate::path::Path;
use crate::types::{Rect, try_finite};

#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    width: usize,
    height: usize,
    /// Row-major weights
    weights: Vec<f64>,
    /// Regions recorded by `stamp_rect`, used for polygon containment
    path: Path,
}

impl Mask {
    /// A mask with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroSize { what: "mask width" });
        }
        if height == 0 {
            return Err(ConfigError::ZeroSize { what: "mask height" });
        }
        check_weight(0, 0, value)?;
        Ok(Self {
            width,
            height,
            weights: vec![value; width * height],
            path: Path::new(),
        })
    }

    /// A fully set mask, the footprint of a plain rectangular tile.
    pub fn full(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::filled(width, height, 1.0)
    }

    /// A fully cleared mask, the starting point of a weaving partition.
    pub fn empty(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::filled(width, height, 0.0)
    }

    /// Wrap an externally supplied row-major grid.
    pub fn from_grid(width: usize, height: usize, weights: Vec<f64>) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroSize { what: "mask width" });
        }
        if height == 0 {
            return Err(ConfigError::ZeroSize { what: "mask height" });
        }
        if weights.len() != width * height {
            return Err(ConfigError::GridLength {
                width,
                height,
                expected: width * height,
                got: weights.len(),
            });
        }
        for (i, &w) in weights.iter().enumerate() {
            check_weight(i % width, i / width, w)?;
        }
        Ok(Self {
            width,
            height,
            weights,
            path: Path::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Weight at `(col, row)`, `None` outside the grid
    #[inline]
    pub fn weight(&self, col: usize, row: usize) -> Option<f64> {
        if col < self.width && row < self.height {
            Some(self.weights[row * self.width + col])
        } else {
            None
        }
    }

    /// Whether `(col, row)` is inside the grid and has a non-zero weight
    #[inline]
    pub fn is_set(&self, col: usize, row: usize) -> bool {
        self.weight(col, row).is_some_and(|w| w != 0.0)
    }

    /// Whether `(col, row)` is inside the grid and explicitly excluded.
    ///
    /// Cells beyond the mask's own bounds are never excluded.
    #[inline]
    pub fn excludes(&self, col: usize, row: usize) -> bool {
        self.weight(col, row) == Some(0.0)
    }

    /// Polygons recorded so far
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_polygons(&self) -> bool {
        !self.path.is_empty()
    }

    /// Whether `(x, y)` falls inside any recorded polygon. A mask without a
    /// polygon description contains nothing.
    pub fn point_in_polygons(&self, x: f64, y: f64) -> bool {
        self.path.contains(x, y)
    }

    /// Containment by polygons when they are attached, by raster otherwise.
    pub fn contains(&self, col: usize, row: usize) -> bool {
        if self.has_polygons() {
            self.point_in_polygons(col as f64, row as f64)
        } else {
            self.is_set(col, row)
        }
    }

    /// Mark `rect` as set and record it in the polygon path.
    ///
    /// The raster part is clipped to the grid; the recorded polygon is the
    /// rectangle as given.
    pub fn stamp_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let (rows, cols) = rect.clip_to(self.width, self.height);
        for r in rows {
            let start = r * self.width;
            self.weights[start + cols.start..start + cols.end].fill(1.0);
        }
        self.path.rect(
            rect.min.x as f64,
            rect.min.y as f64,
            rect.width() as f64,
            rect.height() as f64,
        );
    }

    /// Number of cells with a non-zero weight
    pub fn count_set(&self) -> usize {
        self.weights.iter().filter(|&&w| w != 0.0).count()
    }
}

fn check_weight(col: usize, row: usize, weight: f64) -> Result<(), ConfigError> {
    let weight_ok = try_finite(weight).is_ok_and(|w| (0.0..=1.0).contains(&w));
    if weight_ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidWeight { col, row, weight })
    }
}

/// One line per row, `#` for set cells and `.` for excluded ones
impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let ch = if self.is_set(col, row) { '#' } else { '.' };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
