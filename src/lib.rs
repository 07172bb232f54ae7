//! Tiling, aggregation and compositing engine for multiclass density maps.
//!
//! Several per-class scalar fields over the same 2D domain are rendered into
//! one raster:
//!
//! 1. a [`Tiling`] cuts the image into [`Tile`]s,
//! 2. each tile aggregates every class [`DataBuffer`] over its footprint,
//! 3. a [`Composer`] turns the per-class values into color,
//! 4. the [`Image`] is filled under the tile, optionally through a [`Mask`].
//!
//! ```
//! use tilemix::{Color, DataBuffer, DerivedBuffer, RenderConfig, render};
//!
//! let a = DataBuffer::from_values("a", 2, 1, vec![1.0, 0.0])?.with_color(Color::rgb(1.0, 0.0, 0.0));
//! let b = DataBuffer::from_values("b", 2, 1, vec![0.0, 1.0])?.with_color(Color::rgb(0.0, 0.0, 1.0));
//! let classes = [DerivedBuffer::whitened(&a), DerivedBuffer::whitened(&b)];
//!
//! let out = render(&RenderConfig::new(2, 1), &classes)?;
//! assert_eq!(out.image.get(0, 0), Some(Color::rgb(1.0, 0.0, 0.0)));
//! assert_eq!(out.image.get(1, 0), Some(Color::rgb(0.0, 0.0, 1.0)));
//! # Ok::<(), tilemix::RenderError>(())
//! ```

pub mod buffer;
pub mod color;
pub mod composer;
pub mod config;
pub mod derived;
pub mod errors;
pub mod image;
pub mod legend;
pub mod log;
pub mod mask;
pub mod path;
pub mod render;
pub mod scale;
pub mod tile;
pub mod tiling;
pub mod types;
pub mod weaving;

pub use buffer::{Bounds, DataBuffer};
pub use color::Color;
pub use composer::{Composer, GlyphSpec, GlyphTemplate};
pub use config::RenderConfig;
pub use derived::DerivedBuffer;
pub use errors::{ConfigError, RenderError};
pub use image::Image;
pub use mask::Mask;
pub use path::Path;
pub use render::{RenderOutput, render};
pub use scale::{ColorScale, LinearColorScale, WhitenScale};
pub use tile::{Reduction, Tile};
pub use tiling::{Tiling, TilingKind};
pub use types::{NumericError, Point, Rect};
pub use weaving::{WeavingPattern, WeavingSpec, assign_masks};
