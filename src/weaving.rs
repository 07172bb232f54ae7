//! Weaving partitions: disjoint per-class masks built from square blocks.
//!
//! The image is cut into `size x size` blocks (partial at the right and bottom
//! edges) and every block is given to exactly one class. The result is one
//! mask per class; the weaving composer then lets each class paint only the
//! pixels it owns.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::buffer::DataBuffer;
use crate::errors::ConfigError;
use crate::mask::Mask;
use crate::types::Rect;

/// How blocks are assigned to classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeavingPattern {
    /// Uniformly random class per block
    #[default]
    Random,
    /// Diagonal stripes: class `(block_row + block_col) % m`
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeavingSpec {
    /// Block side in pixels
    pub size: usize,
    pub pattern: WeavingPattern,
    /// Seed for [`WeavingPattern::Random`]; `None` draws from entropy
    pub seed: Option<u64>,
}

impl WeavingSpec {
    pub fn random(size: usize) -> Self {
        Self {
            size,
            pattern: WeavingPattern::Random,
            seed: None,
        }
    }

    pub fn square(size: usize) -> Self {
        Self {
            size,
            pattern: WeavingPattern::Square,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize { what: "weaving block size" });
        }
        Ok(())
    }

    /// Partition a `width x height` image among `classes` masks, frozen for
    /// sharing. The RNG is seeded from `seed` when one is set.
    pub fn partition(
        &self,
        width: usize,
        height: usize,
        classes: usize,
    ) -> Result<Vec<Arc<Mask>>, ConfigError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let masks = self.partition_with_rng(width, height, classes, &mut rng)?;
        Ok(masks.into_iter().map(Arc::new).collect())
    }

    /// Partition using the caller's random source
    pub fn partition_with_rng<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        classes: usize,
        rng: &mut R,
    ) -> Result<Vec<Mask>, ConfigError> {
        self.validate()?;
        if classes == 0 {
            return Err(ConfigError::NoClasses);
        }
        let mut masks = (0..classes)
            .map(|_| Mask::empty(width, height))
            .collect::<Result<Vec<_>, _>>()?;

        let size = self.size;
        let mut blocks = vec![0usize; classes];
        for block_row in 0..height.div_ceil(size) {
            for block_col in 0..width.div_ceil(size) {
                let class = match self.pattern {
                    WeavingPattern::Random => rng.gen_range(0..classes),
                    WeavingPattern::Square => (block_row + block_col) % classes,
                };
                let rect = Rect::from_origin(
                    (block_col * size) as i64,
                    (block_row * size) as i64,
                    size as i64,
                    size as i64,
                );
                masks[class].stamp_rect(rect);
                blocks[class] += 1;
            }
        }

        crate::log::debug!(?blocks, size, classes, "weaving partition");
        Ok(masks)
    }
}

/// Give buffer `i` mask `i`
pub fn assign_masks(buffers: &mut [DataBuffer], masks: &[Arc<Mask>]) -> Result<(), ConfigError> {
    if masks.len() != buffers.len() {
        return Err(ConfigError::MaskCount {
            masks: masks.len(),
            buffers: buffers.len(),
        });
    }
    for (buffer, mask) in buffers.iter_mut().zip(masks) {
        buffer.set_mask(Arc::clone(mask));
    }
    Ok(())
}
