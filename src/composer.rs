//! Composition strategies: how per-class tile aggregates become a color.

use crate::color::Color;
use crate::derived::DerivedBuffer;
use crate::errors::ConfigError;
use crate::types::try_positive;

/// Chart template drawn by the glyph legend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphTemplate {
    #[default]
    Bars,
    Punchcard,
}

/// Parameters for glyph composition, consumed by the chart collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSpec {
    pub template: GlyphTemplate,
    pub width: f64,
    pub height: f64,
    /// Fraction of the glyph cell the largest mark may fill
    pub factor: f64,
}

impl Default for GlyphSpec {
    fn default() -> Self {
        Self {
            template: GlyphTemplate::Bars,
            width: 64.0,
            height: 64.0,
            factor: 1.0,
        }
    }
}

impl GlyphSpec {
    /// Sizes and factor must be finite and strictly positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = |what: &'static str, v: f64| {
            try_positive(v).map_err(|source| ConfigError::InvalidParameter { what, source })
        };
        check("glyph width", self.width)?;
        check("glyph height", self.height)?;
        check("glyph factor", self.factor)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Composer {
    /// The class with the largest value wins the tile
    #[default]
    Max,
    /// Additive mix of every class's color
    Mix,
    /// Each class paints only the pixels of its weaving mask
    Weaving,
    /// Channel-wise product of every class's color
    Multiplicative,
    /// No raster color; tile aggregates feed per-tile charts
    Glyph(GlyphSpec),
}

impl Composer {
    pub fn name(&self) -> &'static str {
        match self {
            Composer::Max => "max",
            Composer::Mix => "mix",
            Composer::Weaving => "weaving",
            Composer::Multiplicative => "multiplicative",
            Composer::Glyph(_) => "glyph",
        }
    }

    /// One color for the whole tile, for strategies that produce one.
    ///
    /// `values[i]` is the aggregate of `classes[i]`. Weaving and glyph
    /// composition have no single tile color and return `None`; so does an
    /// empty class list, which callers must not pass.
    pub fn compose(&self, values: &[f64], classes: &[DerivedBuffer<'_>]) -> Option<Color> {
        debug_assert_eq!(values.len(), classes.len());
        match self {
            Composer::Max => max_composite(values, classes),
            Composer::Mix => mix_composite(values, classes),
            Composer::Multiplicative => multiplicative_composite(values, classes),
            Composer::Weaving | Composer::Glyph(_) => None,
        }
    }
}

/// Index of the largest value. Ties keep the lowest index.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, best_value)) if !(v > best_value) => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

fn max_composite(values: &[f64], classes: &[DerivedBuffer<'_>]) -> Option<Color> {
    let i = argmax(values)?;
    Some(classes[i].color_for(values[i]))
}

/// Sum of the class colors, dissolved by `1 / classes` when any value is
/// positive.
// The dissolve factor is provisional: it keeps alpha near 1 when every class
// contributes an opaque color, but it is not a validated normalization.
fn mix_composite(values: &[f64], classes: &[DerivedBuffer<'_>]) -> Option<Color> {
    if classes.is_empty() {
        return None;
    }
    let mut color = Color::TRANSPARENT;
    let mut total = 0.0;
    for (class, &v) in classes.iter().zip(values) {
        color += class.color_for(v);
        total += v;
    }
    if total > 0.0 {
        color = color.dissolve(1.0 / classes.len() as f64);
    }
    Some(color)
}

fn multiplicative_composite(values: &[f64], classes: &[DerivedBuffer<'_>]) -> Option<Color> {
    classes
        .iter()
        .zip(values)
        .map(|(class, &v)| class.color_for(v))
        .filter(|c| !c.is_transparent())
        .reduce(Color::multiply)
}
