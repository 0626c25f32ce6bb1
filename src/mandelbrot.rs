//! Escape-time iteration for the Mandelbrot set.
//!
//! A point `c = (cx, cy)` belongs to the set when the recurrence
//! `z(n+1) = z(n)^2 + c`, seeded at the origin, stays bounded forever.
//! We approximate "forever" with a fixed iteration cap and "bounded"
//! with the standard radius-2 escape circle: once `|z|^2` reaches 4 the
//! orbit is guaranteed to diverge.

/// Squared escape radius. Orbits past this magnitude never come back.
const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Number of recurrence steps completed before the orbit of `(cx, cy)`
/// escapes, capped at `max_iterations`.
///
/// Returns `max_iterations` when the orbit never escapes within the
/// cap; the caller cannot distinguish "still bounded" from "escaped on
/// exactly the last step", and treats both as set membership. The seed
/// is inside the escape circle, so every point runs at least one step
/// (for a nonzero cap), and exterior points always report a count of
/// one or more.
pub fn escape_count(max_iterations: u32, cx: f64, cy: f64) -> u32 {
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;

    for step in 0..max_iterations {
        let x_sq = x * x;
        let y_sq = y * y;
        if x_sq + y_sq >= ESCAPE_RADIUS_SQ {
            return step;
        }
        let next_x = x_sq - y_sq + cx;
        y = 2.0 * x * y + cy;
        x = next_x;
    }

    max_iterations
}
