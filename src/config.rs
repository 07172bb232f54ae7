//! Render pass configuration.
//!
//! Everything here arrives already parsed; the engine only checks that the
//! numbers describe valid geometry before a pass starts.

use crate::composer::Composer;
use crate::errors::ConfigError;
use crate::tile::Reduction;
use crate::tiling::{Tiling, TilingKind};
use crate::weaving::WeavingSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub tiling: TilingKind,
    pub composer: Composer,
    pub reduction: Reduction,
    /// Partition assigned to the classes before rendering. When unset, the
    /// weaving composer uses whatever masks the buffers already carry.
    pub weaving: Option<WeavingSpec>,
    /// Keep the aggregated tiles in the output for legends
    pub retain_tiles: bool,
}

impl RenderConfig {
    /// Pixel tiling, max composition, mean reduction
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiling: TilingKind::Pixel,
            composer: Composer::Max,
            reduction: Reduction::Mean,
            weaving: None,
            retain_tiles: true,
        }
    }

    pub fn with_tiling(mut self, tiling: TilingKind) -> Self {
        self.tiling = tiling;
        self
    }

    pub fn with_rect_tiles(self, tile_width: usize, tile_height: usize) -> Self {
        self.with_tiling(TilingKind::Rectangular {
            tile_width,
            tile_height,
        })
    }

    pub fn with_composer(mut self, composer: Composer) -> Self {
        self.composer = composer;
        self
    }

    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// Weave the classes with `spec`; also selects the weaving composer.
    pub fn with_weaving(mut self, spec: WeavingSpec) -> Self {
        self.weaving = Some(spec);
        self.composer = Composer::Weaving;
        self
    }

    pub fn with_retain_tiles(mut self, retain: bool) -> Self {
        self.retain_tiles = retain;
        self
    }

    /// Build the tiling, checking image and tile dimensions
    pub fn tiling(&self) -> Result<Tiling, ConfigError> {
        Tiling::new(self.width, self.height, self.tiling)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tiling()?;
        if let Some(spec) = &self.weaving {
            spec.validate()?;
        }
        if let Composer::Glyph(glyph) = &self.composer {
            glyph.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RenderConfig::new(8, 4);
        assert_eq!(config.tiling, TilingKind::Pixel);
        assert_eq!(config.composer, Composer::Max);
        assert_eq!(config.reduction, Reduction::Mean);
        assert!(config.retain_tiles);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn weaving_selects_composer() {
        let config = RenderConfig::new(8, 4).with_weaving(WeavingSpec::square(2));
        assert_eq!(config.composer, Composer::Weaving);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_reports_bad_geometry() {
        assert_eq!(
            RenderConfig::new(0, 4).validate(),
            Err(ConfigError::ZeroSize { what: "image width" })
        );
        assert_eq!(
            RenderConfig::new(4, 4).with_rect_tiles(0, 3).validate(),
            Err(ConfigError::ZeroSize { what: "tile width" })
        );
        assert_eq!(
            RenderConfig::new(4, 4)
                .with_weaving(WeavingSpec::random(0))
                .validate(),
            Err(ConfigError::ZeroSize { what: "weaving block size" })
        );
    }
}
