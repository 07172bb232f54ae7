//! The batch render pass: tiles in, one composited image out.
//!
//! For each tile of the configured tiling, every class buffer is aggregated
//! over the tile's footprint, the composer turns the per-class values into
//! color, and the image is filled. The pass is synchronous and touches no
//! state besides the image it returns.

use std::sync::Arc;

use crate::composer::Composer;
use crate::config::RenderConfig;
use crate::derived::DerivedBuffer;
use crate::errors::{ConfigError, RenderError};
use crate::image::Image;
use crate::mask::Mask;
use crate::tile::Tile;

/// Result of a render pass
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub image: Image,
    /// Aggregated tiles in tiling order, empty unless
    /// [`RenderConfig::retain_tiles`] is set
    pub tiles: Vec<Tile>,
    /// Mask each class rendered through, after weaving assignment
    pub masks: Vec<Option<Arc<Mask>>>,
}

/// Render `classes` into a new image.
///
/// Every class buffer must match the configured image dimensions. With a
/// weaving spec in the configuration, a fresh partition replaces the
/// classes' own masks for this pass.
pub fn render(
    config: &RenderConfig,
    classes: &[DerivedBuffer<'_>],
) -> Result<RenderOutput, RenderError> {
    if classes.is_empty() {
        return Err(RenderError::EmptyClasses);
    }
    config.validate()?;
    let tiling = config.tiling()?;

    for class in classes {
        let buffer = class.buffer();
        if buffer.width() != config.width || buffer.height() != config.height {
            return Err(ConfigError::DimensionMismatch {
                name: buffer.name.clone(),
                width: config.width,
                height: config.height,
                got_width: buffer.width(),
                got_height: buffer.height(),
            }
            .into());
        }
    }

    let masks: Vec<Option<Arc<Mask>>> = match &config.weaving {
        Some(spec) => spec
            .partition(config.width, config.height, classes.len())?
            .into_iter()
            .map(Some)
            .collect(),
        None => classes.iter().map(|c| c.mask().cloned()).collect(),
    };

    if config.composer == Composer::Weaving {
        warn_unmasked(classes, &masks);
    }

    crate::log::debug!(
        width = config.width,
        height = config.height,
        tiles = tiling.len(),
        classes = classes.len(),
        composer = config.composer.name(),
        "render start"
    );

    let mut image = Image::new(config.width, config.height);
    let mut retained = Vec::with_capacity(if config.retain_tiles { tiling.len() } else { 0 });

    for mut tile in &tiling {
        tile.aggregate_all(classes.iter().map(|c| c.buffer()), config.reduction);

        match config.composer {
            Composer::Weaving => {
                for ((class, mask), &value) in classes.iter().zip(&masks).zip(&tile.data_values) {
                    image.fill_by_tile(class.color_for(value), &tile, mask.as_deref());
                }
            }
            Composer::Glyph(_) => {}
            composer => {
                if let Some(color) = composer.compose(&tile.data_values, classes) {
                    image.fill_by_tile(color, &tile, None);
                }
            }
        }

        if config.retain_tiles {
            retained.push(tile);
        }
    }

    crate::log::debug!(retained = retained.len(), "render done");

    Ok(RenderOutput {
        image,
        tiles: retained,
        masks,
    })
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn warn_unmasked(classes: &[DerivedBuffer<'_>], masks: &[Option<Arc<Mask>>]) {
    for (class, mask) in classes.iter().zip(masks) {
        if mask.is_none() {
            crate::log::warn!(class = class.name(), "weaving class has no mask, it paints every tile");
        }
    }
}
