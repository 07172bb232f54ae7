//! Color scales: opaque `value -> Color` functions supplied by configuration.
//!
//! The engine never builds numeric rescalings (linear, log, equi-depth, ...)
//! itself. It only needs something that maps a scalar to a color and, when it
//! has one, the domain outside of which the mapping is undefined.

use crate::color::Color;

pub trait ColorScale {
    /// Map a value to a color. Only called for values inside [`domain`](Self::domain).
    fn map(&self, value: f64) -> Color;

    /// Inclusive domain, `None` when the scale accepts any finite value
    fn domain(&self) -> Option<(f64, f64)> {
        None
    }
}

impl<F> ColorScale for F
where
    F: Fn(f64) -> Color,
{
    fn map(&self, value: f64) -> Color {
        self(value)
    }
}

/// Position of `value` in `[lo, hi]` as a fraction
fn unit(value: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo { (value - lo) / (hi - lo) } else { 1.0 }
}

/// A class color whitened by the value's position in the domain: the low end
/// renders white, the high end renders the saturated color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitenScale {
    pub color: Color,
    pub domain: (f64, f64),
}

impl WhitenScale {
    /// Scale over the normalized domain `[0, 1]`
    pub fn new(color: Color) -> Self {
        Self {
            color,
            domain: (0.0, 1.0),
        }
    }

    pub fn with_domain(mut self, lo: f64, hi: f64) -> Self {
        self.domain = (lo, hi);
        self
    }
}

impl ColorScale for WhitenScale {
    fn map(&self, value: f64) -> Color {
        self.color.whiten(unit(value, self.domain.0, self.domain.1))
    }

    fn domain(&self) -> Option<(f64, f64)> {
        Some(self.domain)
    }
}

/// A two-color ramp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearColorScale {
    pub from: Color,
    pub to: Color,
    pub domain: (f64, f64),
}

impl LinearColorScale {
    pub fn new(from: Color, to: Color, lo: f64, hi: f64) -> Self {
        Self {
            from,
            to,
            domain: (lo, hi),
        }
    }
}

impl ColorScale for LinearColorScale {
    fn map(&self, value: f64) -> Color {
        self.from.lerp(self.to, unit(value, self.domain.0, self.domain.1))
    }

    fn domain(&self) -> Option<(f64, f64)> {
        Some(self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whiten_scale_over_custom_domain() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let scale = WhitenScale::new(red).with_domain(10.0, 20.0);
        assert_eq!(scale.map(10.0), Color::WHITE);
        assert_eq!(scale.map(20.0), red);
        assert_eq!(scale.map(15.0), Color::rgb(1.0, 0.5, 0.5));
        assert_eq!(scale.domain(), Some((10.0, 20.0)));
    }

    #[test]
    fn linear_scale_interpolates() {
        let scale = LinearColorScale::new(Color::BLACK, Color::WHITE, 0.0, 4.0);
        assert_eq!(scale.map(2.0), Color::rgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn degenerate_domain_maps_to_high_end() {
        let scale = LinearColorScale::new(Color::BLACK, Color::WHITE, 3.0, 3.0);
        assert_eq!(scale.map(3.0), Color::WHITE);
    }

    #[test]
    fn closures_are_scales() {
        let scale = |v: f64| Color::rgb(v, v, v);
        assert_eq!(scale.map(0.25), Color::rgb(0.25, 0.25, 0.25));
        assert_eq!(ColorScale::domain(&scale), None);
    }
}
