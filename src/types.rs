//! Small numeric primitives shared by the engine: points, pixel rectangles
//! and the validation used by fallible constructors.

use std::fmt;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate a finite value (rejects NaN/infinite)
#[inline]
pub fn try_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Validate a finite, non-negative value
#[inline]
pub fn try_non_negative(val: f64) -> Result<f64, NumericError> {
    let val = try_finite(val)?;
    if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Validate a finite, strictly positive value
#[inline]
pub fn try_positive(val: f64) -> Result<f64, NumericError> {
    let val = try_non_negative(val)?;
    if val == 0.0 {
        Err(NumericError::Zero)
    } else {
        Ok(val)
    }
}

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned pixel rectangle, half-open: `min` is inside, `max` is not.
///
/// Coordinates are signed so a rectangle may hang off any edge of an image;
/// fill operations clip it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub min: Point<i64>,
    pub max: Point<i64>,
}

impl Rect {
    pub fn new(min: Point<i64>, max: Point<i64>) -> Self {
        Rect { min, max }
    }

    /// Rectangle from an origin and a size
    pub fn from_origin(x: i64, y: i64, w: i64, h: i64) -> Self {
        Rect {
            min: Point::new(x, y),
            max: Point::new(x + w, y + h),
        }
    }

    pub fn width(&self) -> i64 {
        (self.max.x - self.min.x).max(0)
    }

    pub fn height(&self) -> i64 {
        (self.max.y - self.min.y).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Intersect with `[0, width) x [0, height)`, returning unsigned ranges
    pub fn clip_to(&self, width: usize, height: usize) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        // an inverted axis yields an empty range, never `start > end`
        let span = |lo: i64, hi: i64, limit: usize| {
            let start = lo.clamp(0, limit as i64) as usize;
            let end = hi.clamp(0, limit as i64) as usize;
            start..end.max(start)
        };
        (span(self.min.y, self.max.y, height), span(self.min.x, self.max.x, width))
    }
}
