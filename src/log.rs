//! Logging front for the render pass.
//!
//! With the `tracing` feature, `debug!` and `warn!` are the `tracing` macros
//! and events carry structured fields (`width = ..`, `classes = ..`). Without
//! it they swallow their arguments unevaluated. The no-op versions live under
//! hidden crate-prefixed names so that `tilemix::debug!` never shadows a
//! caller's own logging macros.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    #[doc(hidden)]
    #[macro_export]
    macro_rules! __tilemix_log_debug {
        ($($event:tt)*) => {};
    }

    #[doc(hidden)]
    #[macro_export]
    macro_rules! __tilemix_log_warn {
        ($($event:tt)*) => {};
    }
}

#[cfg(not(feature = "tracing"))]
pub use crate::{__tilemix_log_debug as debug, __tilemix_log_warn as warn};
