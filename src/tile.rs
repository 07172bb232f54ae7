//! Tiles: footprints over the pixel grid that aggregate buffer values.

use std::sync::Arc;

use crate::buffer::DataBuffer;
use crate::errors::ConfigError;
use crate::mask::Mask;

/// How the values under a tile's footprint are reduced to one number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    Sum,
    /// Sum over the number of visited cells (not the mask area)
    #[default]
    Mean,
    Max,
    Min,
}

/// A footprint at `(x, y)` whose exact shape is its mask.
///
/// The mask's dimensions are the bounding box. Tiles produced by a tiling
/// share one mask through an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub x: f64,
    pub y: f64,
    pub mask: Arc<Mask>,
    /// One aggregate per class, filled by [`Tile::aggregate_all`]
    pub data_values: Vec<f64>,
}

impl Tile {
    pub fn new(x: f64, y: f64, mask: Arc<Mask>) -> Self {
        Self {
            x,
            y,
            mask,
            data_values: Vec::new(),
        }
    }

    /// A plain `w x h` rectangle at integer coordinates
    pub fn rect(x: usize, y: usize, w: usize, h: usize) -> Result<Self, ConfigError> {
        Ok(Self::new(x as f64, y as f64, Arc::new(Mask::full(w, h)?)))
    }

    pub fn width(&self) -> usize {
        self.mask.width()
    }

    pub fn height(&self) -> usize {
        self.mask.height()
    }

    /// Visit every buffer cell under the footprint.
    ///
    /// Rows span `[floor(y), y + mask.height)` and columns
    /// `[floor(x), x + mask.width)`, clipped to the buffer. A cell is skipped
    /// when the mask excludes it, looked up relative to the tile origin.
    fn for_each_cell(&self, buffer: &DataBuffer, mut f: impl FnMut(f64)) {
        let row0 = self.y.floor() as i64;
        let col0 = self.x.floor() as i64;
        let row_end = self.y + self.mask.height() as f64;
        let col_end = self.x + self.mask.width() as f64;

        let mut r = row0.max(0);
        while (r as f64) < row_end && (r as usize) < buffer.height() {
            let mut c = col0.max(0);
            while (c as f64) < col_end && (c as usize) < buffer.width() {
                let rel_col = (c - col0) as usize;
                let rel_row = (r - row0) as usize;
                if !self.mask.excludes(rel_col, rel_row) {
                    if let Some(v) = buffer.get(c as usize, r as usize) {
                        f(v);
                    }
                }
                c += 1;
            }
            r += 1;
        }
    }

    /// Reduce `buffer`'s values under this tile.
    ///
    /// An empty footprint (zero area or fully clipped) yields 0 for every
    /// reduction. Nothing is cached; each call walks the footprint again.
    pub fn aggregate(&self, buffer: &DataBuffer, reduction: Reduction) -> f64 {
        let mut count = 0usize;
        let mut acc = match reduction {
            Reduction::Sum | Reduction::Mean => 0.0,
            Reduction::Max => f64::NEG_INFINITY,
            Reduction::Min => f64::INFINITY,
        };
        self.for_each_cell(buffer, |v| {
            count += 1;
            acc = match reduction {
                Reduction::Sum | Reduction::Mean => acc + v,
                Reduction::Max => acc.max(v),
                Reduction::Min => acc.min(v),
            };
        });

        if count == 0 {
            return 0.0;
        }
        match reduction {
            Reduction::Mean => acc / count as f64,
            _ => acc,
        }
    }

    /// Aggregate every buffer in order and store the results in
    /// `data_values`, replacing any previous ones.
    pub fn aggregate_all<'b>(
        &mut self,
        buffers: impl IntoIterator<Item = &'b DataBuffer>,
        reduction: Reduction,
    ) -> &[f64] {
        let values = buffers
            .into_iter()
            .map(|buffer| self.aggregate(buffer, reduction))
            .collect();
        self.data_values = values;
        &self.data_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x3 grid with value = row * 10 + col
    fn ramp() -> DataBuffer {
        let values = (0..3)
            .flat_map(|r| (0..4).map(move |c| (r * 10 + c) as f64))
            .collect();
        DataBuffer::from_values("ramp", 4, 3, values).unwrap()
    }

    #[test]
    fn sum_and_mean_over_interior_tile() {
        let buffer = ramp();
        let tile = Tile::rect(1, 1, 2, 2).unwrap();
        // 11 + 12 + 21 + 22
        assert_eq!(tile.aggregate(&buffer, Reduction::Sum), 66.0);
        assert_eq!(tile.aggregate(&buffer, Reduction::Mean), 16.5);
        assert_eq!(tile.aggregate(&buffer, Reduction::Max), 22.0);
        assert_eq!(tile.aggregate(&buffer, Reduction::Min), 11.0);
    }

    #[test]
    fn mean_counts_only_in_bounds_cells() {
        let buffer = ramp();
        // 3x3 tile at (2, 1) keeps columns 2..4 and rows 1..3
        let tile = Tile::rect(2, 1, 3, 3).unwrap();
        let sum = 12.0 + 13.0 + 22.0 + 23.0;
        assert_eq!(tile.aggregate(&buffer, Reduction::Sum), sum);
        assert_eq!(tile.aggregate(&buffer, Reduction::Mean), sum / 4.0);
    }

    #[test]
    fn tile_outside_buffer_is_zero() {
        let buffer = ramp();
        let tile = Tile::rect(10, 10, 2, 2).unwrap();
        for reduction in [Reduction::Sum, Reduction::Mean, Reduction::Max, Reduction::Min] {
            let v = tile.aggregate(&buffer, reduction);
            assert_eq!(v, 0.0);
            assert!(!v.is_nan());
        }
    }

    #[test]
    fn negative_origin_is_clipped() {
        let buffer = ramp();
        let tile = Tile::new(-1.0, -1.0, Arc::new(Mask::full(2, 2).unwrap()));
        assert_eq!(tile.aggregate(&buffer, Reduction::Sum), 0.0 + 0.0);
        assert_eq!(tile.aggregate(&buffer, Reduction::Mean), 0.0);

        let tile = Tile::new(-1.0, 0.0, Arc::new(Mask::full(3, 1).unwrap()));
        assert_eq!(tile.aggregate(&buffer, Reduction::Sum), 1.0);
        assert_eq!(tile.aggregate(&buffer, Reduction::Mean), 0.5);
    }

    #[test]
    fn mask_filters_relative_to_tile_origin() {
        let buffer = ramp();
        // checkerboard: keep (0,0) and (1,1) of the tile
        let mask = Mask::from_grid(2, 2, vec![1.0, 0.0, 0.0, 1.0]).unwrap();
        let tile = Tile::new(2.0, 1.0, Arc::new(mask));
        // (2,1) = 12 and (3,2) = 23
        assert_eq!(tile.aggregate(&buffer, Reduction::Sum), 35.0);
        assert_eq!(tile.aggregate(&buffer, Reduction::Mean), 17.5);
    }

    #[test]
    fn fractional_origin_extends_to_partial_cell() {
        let buffer = ramp();
        // rows [0, 1.5) -> 0 and 1; columns [0, 1) -> 0
        let tile = Tile::new(0.0, 0.5, Arc::new(Mask::full(1, 1).unwrap()));
        assert_eq!(tile.aggregate(&buffer, Reduction::Sum), 10.0);
    }

    #[test]
    fn aggregate_all_populates_data_values() {
        let a = ramp();
        let b = DataBuffer::from_values("b", 4, 3, vec![1.0; 12]).unwrap();
        let mut tile = Tile::rect(0, 0, 2, 1).unwrap();
        assert_eq!(tile.aggregate_all([&a, &b], Reduction::Sum), &[1.0, 2.0]);
        assert_eq!(tile.data_values, vec![1.0, 2.0]);

        tile.aggregate_all([&b], Reduction::Mean);
        assert_eq!(tile.data_values, vec![1.0]);
    }
}
