//! Legend-facing summaries of a render.
//!
//! Drawing legends happens elsewhere. This module only derives the data a
//! legend needs from the engine's outputs: per-class swatches, per-class
//! totals over the rendered tiles, and gradient stops for color ramps.

use crate::color::Color;
use crate::derived::DerivedBuffer;
use crate::tile::Tile;

/// A category row: class name and swatch color
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub color: Color,
}

pub fn entries(classes: &[DerivedBuffer<'_>]) -> Vec<LegendEntry> {
    classes
        .iter()
        .map(|c| LegendEntry {
            name: c.name().to_owned(),
            color: c.color(),
        })
        .collect()
}

/// Sum of every tile's aggregate, per class.
///
/// Tiles with fewer aggregates than `classes` contribute to the classes they
/// have.
pub fn class_totals(tiles: &[Tile], classes: usize) -> Vec<f64> {
    let mut totals = vec![0.0; classes];
    for tile in tiles {
        for (total, v) in totals.iter_mut().zip(&tile.data_values) {
            *total += v;
        }
    }
    totals
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the ramp in `[0, 1]`
    pub offset: f64,
    pub color: Color,
}

/// Endpoints of a gradient line in the unit square for an angle in radians,
/// as `(x1, y1, x2, y2)`. Angle 0 runs left to right.
pub fn gradient_vector(angle: f64) -> (f64, f64, f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (0.5 - cos / 2.0, 0.5 + sin / 2.0, 0.5 + cos / 2.0, 0.5 - sin / 2.0)
}

/// Two-stop ramp between the class colors at the ends of `domain`
pub fn linear_gradient(class: &DerivedBuffer<'_>, domain: (f64, f64)) -> [GradientStop; 2] {
    [
        GradientStop {
            offset: 0.0,
            color: class.color_for(domain.0),
        },
        GradientStop {
            offset: 1.0,
            color: class.color_for(domain.1),
        },
    ]
}

/// Hard-edged ramp with one flat band per level.
///
/// `levels` are representative values, one per band. Values the class scale
/// cannot map render transparent.
pub fn stepped_gradient(class: &DerivedBuffer<'_>, levels: &[f64]) -> Vec<GradientStop> {
    let n = levels.len() as f64;
    levels
        .iter()
        .enumerate()
        .flat_map(|(i, &value)| {
            let color = class.color_for(value);
            [
                GradientStop {
                    offset: i as f64 / n,
                    color,
                },
                GradientStop {
                    offset: (i + 1) as f64 / n,
                    color,
                },
            ]
        })
        .collect()
}

/// `count` evenly spaced values strictly inside `domain`, for ramp markers
pub fn marker_values(domain: (f64, f64), count: usize) -> Vec<f64> {
    let (lo, hi) = domain;
    (1..=count)
        .map(|i| lo + (hi - lo) * i as f64 / (count + 1) as f64)
        .collect()
}

/// Identifier source for gradient definitions, owned by one legend render.
#[derive(Debug, Clone)]
pub struct GradientIds {
    prefix: String,
    next: usize,
}

impl Default for GradientIds {
    fn default() -> Self {
        Self::new("gradient")
    }
}

impl GradientIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("{}_{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
