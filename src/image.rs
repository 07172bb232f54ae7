//! The output raster and its fill operations.
//!
//! Every fill clips its footprint to the image: rows and columns past the
//! edges are skipped, never indexed.

use crate::color::Color;
use crate::derived::DerivedBuffer;
use crate::mask::Mask;
use crate::tile::Tile;
use crate::types::Rect;

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    /// Row-major, initialized to [`Color::TRANSPARENT`]
    pixels: Vec<Color>,
}

/// Row or column indices covered by `[start, end)` with a real-valued start
/// and end, restricted to `[0, limit)`. The start is rounded up.
fn span(start: f64, end: f64, limit: usize) -> std::ops::Range<usize> {
    let first = (start.ceil().max(0.0) as usize).min(limit);
    let mut last = first;
    while last < limit && (last as f64) < end {
        last += 1;
    }
    first..last
}

impl Image {
    /// A transparent `width x height` image
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<Color> {
        if col < self.width && row < self.height {
            Some(self.pixels[row * self.width + col])
        } else {
            None
        }
    }

    #[inline]
    fn set(&mut self, col: usize, row: usize, color: Color) {
        self.pixels[row * self.width + col] = color;
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Paint `color` over the tile's bounding box.
    ///
    /// Rows span `[ceil(y), y + mask.height)` and columns
    /// `[ceil(x), x + mask.width)`. When `mask` is given, a cell is skipped
    /// only if it lies inside the mask and has weight 0 there (absolute image
    /// coordinates); cells beyond the mask's bounds are painted.
    pub fn fill_by_tile(&mut self, color: Color, tile: &Tile, mask: Option<&Mask>) {
        let rows = span(tile.y, tile.y + tile.height() as f64, self.height);
        let cols = span(tile.x, tile.x + tile.width() as f64, self.width);
        for r in rows {
            for c in cols.clone() {
                if mask.is_some_and(|m| m.excludes(c, r)) {
                    continue;
                }
                self.set(c, r, color);
            }
        }
    }

    /// Paint every tile once per class, restricted to the class mask's
    /// polygons (or raster, for masks without polygons).
    ///
    /// Each class colors the tile with its own aggregate from
    /// `tile.data_values`; a class with no aggregate is skipped. This is
    /// O(tiles x classes x pixels x polygons) and meant for small or offline
    /// renders.
    pub fn fill_by_shaped_tile(&mut self, tiles: &[Tile], classes: &[DerivedBuffer<'_>]) {
        for tile in tiles {
            let rows = span(tile.y, tile.y + tile.height() as f64, self.height);
            let cols = span(tile.x, tile.x + tile.width() as f64, self.width);
            for (i, class) in classes.iter().enumerate() {
                let Some(&value) = tile.data_values.get(i) else {
                    continue;
                };
                let color = class.color_for(value);
                let mask = class.mask();
                for r in rows.clone() {
                    for c in cols.clone() {
                        if mask.is_some_and(|m| !m.contains(c, r)) {
                            continue;
                        }
                        self.set(c, r, color);
                    }
                }
            }
        }
    }

    /// Paint `color` over `rect`, clipped to the image
    pub fn fill_by_rect(&mut self, color: Color, rect: Rect) {
        let (rows, cols) = rect.clip_to(self.width, self.height);
        for r in rows {
            for c in cols.clone() {
                self.set(c, r, color);
            }
        }
    }

    /// Debug view of a mask: opaque white where set, opaque black elsewhere.
    /// Pixels beyond the mask are left alone.
    pub fn fill_mask(&mut self, mask: &Mask) {
        for r in 0..self.height.min(mask.height()) {
            for c in 0..self.width.min(mask.width()) {
                let color = if mask.is_set(c, r) { Color::WHITE } else { Color::BLACK };
                self.set(c, r, color);
            }
        }
    }

    /// Clamped 8-bit RGBA bytes, row-major, ready to blit
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }
}
