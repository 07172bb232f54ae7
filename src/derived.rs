//! A data buffer bound to a color scale.

use std::fmt;
use std::sync::Arc;

use crate::buffer::DataBuffer;
use crate::color::Color;
use crate::mask::Mask;
use crate::scale::{ColorScale, WhitenScale};

/// Read-only view pairing a [`DataBuffer`] with the scale that colors it.
///
/// The mask and display color default to the buffer's own but can be
/// overridden per view, so one buffer can back several legends.
pub struct DerivedBuffer<'a> {
    buffer: &'a DataBuffer,
    scale: Box<dyn ColorScale + 'a>,
    mask: Option<Arc<Mask>>,
    color: Color,
}

impl<'a> DerivedBuffer<'a> {
    pub fn new(buffer: &'a DataBuffer, scale: impl ColorScale + 'a) -> Self {
        Self {
            buffer,
            scale: Box::new(scale),
            mask: buffer.mask.clone(),
            color: buffer.color.unwrap_or(Color::BLUE),
        }
    }

    /// Bind with a [`WhitenScale`] over `[0, 1]` in the buffer's color
    /// (blue when none was assigned).
    pub fn whitened(buffer: &'a DataBuffer) -> Self {
        let color = buffer.color.unwrap_or(Color::BLUE);
        Self::new(buffer, WhitenScale::new(color))
    }

    pub fn with_mask(mut self, mask: Option<Arc<Mask>>) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn buffer(&self) -> &'a DataBuffer {
        self.buffer
    }

    pub fn name(&self) -> &str {
        &self.buffer.name
    }

    pub fn mask(&self) -> Option<&Arc<Mask>> {
        self.mask.as_ref()
    }

    /// Resolved display color, e.g. for legend swatches
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn scale(&self) -> &dyn ColorScale {
        self.scale.as_ref()
    }

    /// Color for `value`, or [`Color::TRANSPARENT`] when the value is not
    /// finite or lies outside the scale's domain.
    pub fn color_for(&self, value: f64) -> Color {
        if !value.is_finite() {
            return Color::TRANSPARENT;
        }
        match self.scale.domain() {
            Some((lo, hi)) if value < lo || value > hi => Color::TRANSPARENT,
            _ => self.scale.map(value),
        }
    }
}

impl fmt::Debug for DerivedBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedBuffer")
            .field("name", &self.buffer.name)
            .field("color", &self.color)
            .field("domain", &self.scale.domain())
            .field("masked", &self.mask.is_some())
            .finish()
    }
}
