//! Error types with diagnostic codes using miette
//!
//! Construction of masks, buffers, tilings and render configurations is
//! validated up front. Once a render pass starts, geometry is total: footprints
//! are clipped and empty aggregates are zero, so nothing below `render` fails.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while building the inputs of a render pass
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{what} must be non-zero")]
    #[diagnostic(
        code(tilemix::config::zero_size),
        help("tile sizes, block sizes and image dimensions are at least 1 pixel")
    )]
    ZeroSize { what: &'static str },

    #[error("grid has {got} cells, expected {width}x{height} = {expected}")]
    #[diagnostic(code(tilemix::config::grid_length))]
    GridLength {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    #[error("buffer `{name}` is {got_width}x{got_height}, image is {width}x{height}")]
    #[diagnostic(
        code(tilemix::config::dimension_mismatch),
        help("bin every class over the same grid before compositing")
    )]
    DimensionMismatch {
        name: String,
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },

    #[error("invalid value at cell ({col}, {row}): {source}")]
    #[diagnostic(code(tilemix::config::invalid_value))]
    InvalidValue {
        col: usize,
        row: usize,
        #[source]
        source: NumericError,
    },

    #[error("mask weight {weight} at cell ({col}, {row}) is outside [0, 1]")]
    #[diagnostic(code(tilemix::config::invalid_weight))]
    InvalidWeight { col: usize, row: usize, weight: f64 },

    #[error("invalid {what}: {source}")]
    #[diagnostic(code(tilemix::config::invalid_parameter))]
    InvalidParameter {
        what: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("binning bounds are empty on the {axis} axis")]
    #[diagnostic(
        code(tilemix::config::empty_bounds),
        help("bounds.max must be strictly greater than bounds.min")
    )]
    EmptyBounds { axis: char },

    #[error("weaving needs at least one class")]
    #[diagnostic(code(tilemix::config::no_classes))]
    NoClasses,

    #[error("{masks} masks supplied for {buffers} buffers")]
    #[diagnostic(code(tilemix::config::mask_count))]
    MaskCount { masks: usize, buffers: usize },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur when starting a render pass
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("no classes to composite")]
    #[diagnostic(
        code(tilemix::render::empty_classes),
        help("supply at least one derived buffer")
    )]
    EmptyClasses,
}
