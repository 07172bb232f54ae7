//! Tilings: restartable, lazy sequences of tiles covering an image.
//!
//! Every strategy lays tiles out row-major from `(0, 0)` so that each pixel is
//! covered by exactly one tile. Rectangular tiles keep their declared size at
//! the right and bottom edges; fills and aggregation clip them, which keeps
//! partial tiles' `Mean` denominators equal to their in-bounds cell count.

use std::iter::FusedIterator;
use std::sync::Arc;

use crate::errors::ConfigError;
use crate::mask::Mask;
use crate::tile::Tile;

/// Geometry of the tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TilingKind {
    /// One 1x1 tile per pixel
    #[default]
    Pixel,
    /// Fixed-size rectangles
    Rectangular { tile_width: usize, tile_height: usize },
}

impl TilingKind {
    fn tile_size(self) -> (usize, usize) {
        match self {
            TilingKind::Pixel => (1, 1),
            TilingKind::Rectangular {
                tile_width,
                tile_height,
            } => (tile_width, tile_height),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tiling {
    width: usize,
    height: usize,
    kind: TilingKind,
    /// Footprint shared by every tile
    mask: Arc<Mask>,
}

impl Tiling {
    pub fn new(width: usize, height: usize, kind: TilingKind) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroSize { what: "image width" });
        }
        if height == 0 {
            return Err(ConfigError::ZeroSize { what: "image height" });
        }
        let (tw, th) = kind.tile_size();
        if tw == 0 {
            return Err(ConfigError::ZeroSize { what: "tile width" });
        }
        if th == 0 {
            return Err(ConfigError::ZeroSize { what: "tile height" });
        }
        // A tile wider or taller than the image sits alone in its column or
        // row at origin 0, so its footprint past the image edge is never
        // visited. The shared mask stops at the image extent.
        Ok(Self {
            width,
            height,
            kind,
            mask: Arc::new(Mask::full(tw.min(width), th.min(height))?),
        })
    }

    pub fn pixel(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::new(width, height, TilingKind::Pixel)
    }

    pub fn rectangular(
        width: usize,
        height: usize,
        tile_width: usize,
        tile_height: usize,
    ) -> Result<Self, ConfigError> {
        Self::new(
            width,
            height,
            TilingKind::Rectangular {
                tile_width,
                tile_height,
            },
        )
    }

    pub fn kind(&self) -> TilingKind {
        self.kind
    }

    /// Number of tile columns and rows
    pub fn grid(&self) -> (usize, usize) {
        let (tw, th) = self.kind.tile_size();
        (self.width.div_ceil(tw), self.height.div_ceil(th))
    }

    pub fn len(&self) -> usize {
        let (cols, rows) = self.grid();
        cols * rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A fresh pass over the tiles. Every call yields the same sequence.
    pub fn tiles(&self) -> Tiles<'_> {
        Tiles {
            tiling: self,
            next: 0,
        }
    }
}

impl<'a> IntoIterator for &'a Tiling {
    type Item = Tile;
    type IntoIter = Tiles<'a>;

    fn into_iter(self) -> Tiles<'a> {
        self.tiles()
    }
}

/// Iterator over a [`Tiling`]'s tiles in row-major order
#[derive(Debug, Clone)]
pub struct Tiles<'a> {
    tiling: &'a Tiling,
    next: usize,
}

impl Iterator for Tiles<'_> {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.next >= self.tiling.len() {
            return None;
        }
        let (cols, _) = self.tiling.grid();
        let (tw, th) = self.tiling.kind.tile_size();
        let (col, row) = (self.next % cols, self.next / cols);
        self.next += 1;
        Some(Tile::new(
            (col * tw) as f64,
            (row * th) as f64,
            Arc::clone(&self.tiling.mask),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tiling.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Tiles<'_> {}
impl FusedIterator for Tiles<'_> {}
