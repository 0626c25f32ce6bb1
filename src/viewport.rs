//! The complex-plane region under view and its pixel mapping.
//!
//! Mapping pixel indices onto plane coordinates is not a pure affine
//! transform here: the mapper carries the previously produced
//! coordinate in the denominator of the next one, so each pixel's
//! point depends on the entire walk before it. The full-image output
//! is defined by that exact walk, column by column and top to bottom,
//! so [`PlaneMapper`] owns the traversal instead of exposing a
//! per-pixel lookup.

/// Rectangular region of the complex plane mapped onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    /// Horizontal extent of the region.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent of the region.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

impl Default for Viewport {
    /// The full-image region: the classic framing with the whole set and
    /// a margin of exterior on every side.
    fn default() -> Self {
        Self {
            x_min: -2.0,
            x_max: 0.75,
            y_min: -1.5,
            y_max: 1.25,
        }
    }
}

/// Stateful pixel-to-plane mapper.
///
/// Each produced coordinate feeds back into the denominator for the
/// next pixel, which skews the grid slightly compared to a uniform
/// spacing. The numerators still anchor the edges: column zero always
/// maps to `x_min` and row zero always maps to `y_max`, because a zero
/// numerator ignores the denominator entirely.
///
/// The table is only meaningful for a complete walk from a fresh
/// mapper, so [`plane_points`](Self::plane_points) consumes `self`.
pub struct PlaneMapper {
    viewport: Viewport,
    width: u32,
    height: u32,
    last_x: f64,
    last_y: f64,
}

impl PlaneMapper {
    pub fn new(viewport: Viewport, width: u32, height: u32) -> Self {
        Self {
            viewport,
            width,
            height,
            last_x: 0.0,
            last_y: 0.0,
        }
    }

    /// Advance the recurrence to pixel `(col, row)` and return its point.
    fn point_at(&mut self, col: u32, row: u32) -> (f64, f64) {
        self.last_x = f64::from(col) * self.viewport.width() / (f64::from(self.width) + self.last_x)
            + self.viewport.x_min;
        self.last_y = f64::from(row) * -self.viewport.height()
            / (f64::from(self.height) + self.last_y)
            + self.viewport.y_max;
        (self.last_x, self.last_y)
    }

    /// Walk the whole canvas column-major and return the plane point for
    /// every pixel, indexed row-major as `row * width + col`.
    pub fn plane_points(mut self) -> Vec<(f64, f64)> {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut points = vec![(0.0, 0.0); width * height];
        for col in 0..self.width {
            for row in 0..self.height {
                points[row as usize * width + col as usize] = self.point_at(col, row);
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_points(width: u32, height: u32) -> Vec<(f64, f64)> {
        PlaneMapper::new(Viewport::default(), width, height).plane_points()
    }

    #[test]
    fn default_viewport_framing() {
        let viewport = Viewport::default();
        assert_eq!(viewport.width(), 2.75);
        assert_eq!(viewport.height(), 2.75);
    }

    #[test]
    fn table_covers_every_pixel() {
        assert_eq!(default_points(64, 48).len(), 64 * 48);
    }

    #[test]
    fn top_left_pixel_is_the_exact_corner() {
        let points = default_points(800, 800);
        assert_eq!(points[0], (-2.0, 1.25));
    }

    #[test]
    fn column_zero_is_pinned_to_x_min() {
        // A zero numerator makes the feedback denominator irrelevant.
        let points = default_points(64, 64);
        for row in 0..64 {
            assert_eq!(points[row * 64].0, -2.0, "row {row}");
        }
    }

    #[test]
    fn row_zero_is_pinned_to_y_max() {
        // The vertical recurrence restarts at the top of every column.
        let points = default_points(64, 64);
        for col in 0..64 {
            assert_eq!(points[col].1, 1.25, "col {col}");
        }
    }

    #[test]
    fn points_stay_near_the_viewport() {
        // The feedback skew perturbs coordinates but cannot push them far
        // outside the region: numerators are bounded by the pixel index
        // and denominators stay close to the canvas dimension.
        let points = default_points(800, 800);
        for &(x, y) in &points {
            assert!((-2.0..=0.76).contains(&x), "x out of range: {x}");
            assert!((-1.51..=1.25).contains(&y), "y out of range: {y}");
        }
    }

    #[test]
    fn fresh_walks_are_identical() {
        assert_eq!(default_points(128, 128), default_points(128, 128));
    }

    #[test]
    fn neighboring_columns_differ() {
        // The skew must not collapse the grid: adjacent columns map to
        // strictly increasing x for any fixed row.
        let points = default_points(64, 64);
        for col in 1..64 {
            let row = 32;
            assert!(points[row * 64 + col].0 > points[row * 64 + col - 1].0);
        }
    }
}
