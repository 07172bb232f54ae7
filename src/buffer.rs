//! Per-class scalar fields.
//!
//! A [`DataBuffer`] is a named `width x height` grid of non-negative values plus
//! the styling attached to its class: a display color and an optional mask
//! restricting where the class may render. Buffers are read-only during a
//! render pass; the only computations here are the preparation steps that run
//! before one (binning, normalization, blurring).

use std::sync::Arc;

use glam::DVec2;

use crate::color::Color;
use crate::errors::ConfigError;
use crate::mask::Mask;
use crate::types::try_non_negative;

/// Data-space extent used when binning sample points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Bounds with a strictly positive extent on both axes
    pub fn try_new(min: DVec2, max: DVec2) -> Result<Self, ConfigError> {
        if !(max.x > min.x) {
            return Err(ConfigError::EmptyBounds { axis: 'x' });
        }
        if !(max.y > min.y) {
            return Err(ConfigError::EmptyBounds { axis: 'y' });
        }
        Ok(Self { min, max })
    }

    /// Bin index of `v` along one axis, clamped to `[0, bins)`
    fn bin(v: f64, lo: f64, hi: f64, bins: usize) -> usize {
        let t = (v - lo) / (hi - lo) * bins as f64;
        if t.is_nan() {
            return 0;
        }
        (t.floor().max(0.0) as usize).min(bins - 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataBuffer {
    pub name: String,
    width: usize,
    height: usize,
    /// Row-major values
    values: Vec<f64>,
    pub color: Option<Color>,
    pub mask: Option<Arc<Mask>>,
}

impl DataBuffer {
    /// An all-zero buffer
    pub fn new(name: impl Into<String>, width: usize, height: usize) -> Result<Self, ConfigError> {
        check_dimensions(width, height)?;
        Ok(Self {
            name: name.into(),
            width,
            height,
            values: vec![0.0; width * height],
            color: None,
            mask: None,
        })
    }

    /// Wrap an already binned row-major grid
    pub fn from_values(
        name: impl Into<String>,
        width: usize,
        height: usize,
        values: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        check_dimensions(width, height)?;
        if values.len() != width * height {
            return Err(ConfigError::GridLength {
                width,
                height,
                expected: width * height,
                got: values.len(),
            });
        }
        for (i, &v) in values.iter().enumerate() {
            try_non_negative(v).map_err(|source| ConfigError::InvalidValue {
                col: i % width,
                row: i / width,
                source,
            })?;
        }
        Ok(Self {
            name: name.into(),
            width,
            height,
            values,
            color: None,
            mask: None,
        })
    }

    /// Build a 2D histogram of `points` over `bounds`.
    ///
    /// Points outside the bounds are counted in the nearest edge bin rather
    /// than dropped. The bounds' y axis maps to rows top-down.
    pub fn from_points(
        name: impl Into<String>,
        width: usize,
        height: usize,
        bounds: Bounds,
        points: impl IntoIterator<Item = DVec2>,
    ) -> Result<Self, ConfigError> {
        let mut buffer = Self::new(name, width, height)?;
        for p in points {
            let col = Bounds::bin(p.x, bounds.min.x, bounds.max.x, width);
            let row = Bounds::bin(p.y, bounds.min.y, bounds.max.y, height);
            buffer.values[row * width + col] += 1.0;
        }
        Ok(buffer)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_mask(mut self, mask: Arc<Mask>) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn set_mask(&mut self, mask: Arc<Mask>) {
        self.mask = Some(mask);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at `(col, row)`, `None` outside the grid
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        if col < self.width && row < self.height {
            Some(self.values[row * self.width + col])
        } else {
            None
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Largest value in the grid
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Divide every cell of every buffer by the largest value across all of
    /// them, so intensities are comparable between classes.
    ///
    /// Returns the global maximum. When it is zero nothing is changed.
    pub fn normalize_all(buffers: &mut [DataBuffer]) -> f64 {
        let global_max = buffers.iter().map(DataBuffer::max).fold(0.0, f64::max);
        crate::log::debug!(global_max, buffers = buffers.len(), "normalize_all");
        if global_max > 0.0 {
            for buffer in buffers.iter_mut() {
                for v in &mut buffer.values {
                    *v /= global_max;
                }
            }
        }
        global_max
    }

    /// Separable gaussian blur with `sigma = radius / 3`, edges clamped.
    ///
    /// A radius of zero leaves the buffer unchanged. The kernel is normalized
    /// so the total mass of an interior blob is preserved.
    pub fn gaussian_blur(&mut self, radius: usize) {
        if radius == 0 {
            return;
        }
        let kernel = gaussian_kernel(radius);
        let (w, h) = (self.width, self.height);
        let r = radius as isize;

        let mut tmp = vec![0.0; w * h];
        for row in 0..h {
            for col in 0..w {
                let mut acc = 0.0;
                for (k, weight) in kernel.iter().enumerate() {
                    let c = (col as isize + k as isize - r).clamp(0, w as isize - 1) as usize;
                    acc += weight * self.values[row * w + c];
                }
                tmp[row * w + col] = acc;
            }
        }
        for row in 0..h {
            for col in 0..w {
                let mut acc = 0.0;
                for (k, weight) in kernel.iter().enumerate() {
                    let rr = (row as isize + k as isize - r).clamp(0, h as isize - 1) as usize;
                    acc += weight * tmp[rr * w + col];
                }
                self.values[row * w + col] = acc;
            }
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), ConfigError> {
    if width == 0 {
        return Err(ConfigError::ZeroSize { what: "buffer width" });
    }
    if height == 0 {
        return Err(ConfigError::ZeroSize { what: "buffer height" });
    }
    Ok(())
}

fn gaussian_kernel(radius: usize) -> Vec<f64> {
    let sigma = (radius as f64 / 3.0).max(0.5);
    let r = radius as f64;
    let mut kernel: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let x = i as f64 - r;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}
