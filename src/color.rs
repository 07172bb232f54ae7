//! RGBA colors with real-valued channels.
//!
//! Channels are conventionally in `[0, 1]` but may leave that range while
//! colors are being accumulated (additive mixing sums several colors). Only
//! [`Color::clamped`] and the byte/CSS conversions bring them back.

use std::fmt;
use std::ops::{Add, AddAssign};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

impl Color {
    /// The "no contribution" sentinel, also the initial value of every pixel.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// Opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Whether this color contributes nothing (zero or negative alpha)
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Blend toward white by `1 - value`.
    ///
    /// A value of 0 yields white, 1 yields the color itself. The value is
    /// clamped to `[0, 1]`; alpha is kept.
    pub fn whiten(self, value: f64) -> Color {
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        Color {
            r: 1.0 - v + self.r * v,
            g: 1.0 - v + self.g * v,
            b: 1.0 - v + self.b * v,
            a: self.a,
        }
    }

    /// Scale alpha by `factor`
    pub fn dissolve(self, factor: f64) -> Color {
        Color { a: self.a * factor, ..self }
    }

    /// Channel-wise product (multiply blend)
    pub fn multiply(self, other: Color) -> Color {
        Color {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
            a: self.a * other.a,
        }
    }

    /// Linear interpolation, `t = 0` is `self`, `t = 1` is `other`
    pub fn lerp(self, other: Color, t: f64) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// All channels clamped to `[0, 1]`
    pub fn clamped(self) -> Color {
        let c = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Color {
            r: c(self.r),
            g: c(self.g),
            b: c(self.b),
            a: c(self.a),
        }
    }

    /// Clamp and quantize to 8-bit RGBA
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.clamped();
        let q = |v: f64| (v * 255.0).round() as u8;
        [q(c.r), q(c.g), q(c.b), q(c.a)]
    }
}

impl Add for Color {
    type Output = Color;
    fn add(self, rhs: Color) -> Color {
        Color {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
            a: self.a + rhs.a,
        }
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

/// CSS form, e.g. `rgba(255,0,0,0.5)`
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, _] = self.to_rgba8();
        let a = self.clamped().a;
        write!(f, "rgba({},{},{},{})", r, g, b, a)
    }
}
