//! Polygon path accumulator.
//!
//! A [`Path`] collects closed polygons (`move_to`, `line_to`, ..., `close`) and
//! answers point containment. Masks use it to remember the exact regions that
//! were stamped into them, so shaped fills can test "inside any polygon"
//! without consulting the raster.

use glam::{DVec2, dvec2};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    polygons: Vec<Vec<DVec2>>,
    /// Open subpath being built
    current: Vec<DVec2>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new subpath, closing any open one
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.close();
        self.current.push(dvec2(x, y));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.current.push(dvec2(x, y));
        self
    }

    /// Close the open subpath. Fewer than three vertices enclose nothing and
    /// are dropped.
    pub fn close(&mut self) -> &mut Self {
        let points = std::mem::take(&mut self.current);
        if points.len() >= 3 {
            self.polygons.push(points);
        }
        self
    }

    /// Append an axis-aligned rectangle as a closed polygon
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        self.move_to(x, y)
            .line_to(x + w, y)
            .line_to(x + w, y + h)
            .line_to(x, y + h)
            .close()
    }

    pub fn polygons(&self) -> &[Vec<DVec2>] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Whether `(x, y)` lies inside any closed polygon.
    ///
    /// Each polygon uses the even-odd rule with half-open edges, so a point on
    /// a left or top edge is inside and one on a right or bottom edge is not.
    /// Adjacent rectangles therefore never both claim a shared edge.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let p = dvec2(x, y);
        self.polygons.iter().any(|poly| polygon_contains(poly, p))
    }
}

fn polygon_contains(poly: &[DVec2], p: DVec2) -> bool {
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (a, b) = (poly[i], poly[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
