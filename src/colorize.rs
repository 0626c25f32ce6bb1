//! Iteration counts to pixel colors.
//!
//! Exterior points sweep through fully saturated hues: the escape count
//! is scaled into a hue angle and converted to RGB through the six
//! sectors of the HSV cone, at full saturation and value. Two special
//! bands sit on top of the sweep: points that never escape are painted
//! black, and points within ten steps of the cap are painted flat red
//! so the set's boundary reads as a solid outline.

use image::Rgba;

/// Width of the flat red band just below the iteration cap.
const BOUNDARY_BAND: u32 = 10;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Color for a pixel that took `iterations` steps to escape under the
/// given cap. Fully opaque in every case.
pub fn color_for(iterations: u32, max_iterations: u32) -> Rgba<u8> {
    if iterations == max_iterations {
        return BLACK;
    }
    if iterations >= max_iterations.saturating_sub(BOUNDARY_BAND) {
        return RED;
    }

    // The divisor excludes the red band so the sweep spends its full
    // range on the counts that actually reach it.
    let hue = f64::from(iterations) / f64::from(max_iterations - BOUNDARY_BAND);
    let sector = (hue * 6.0) as u32;
    let fraction = hue * 6.0 - f64::from(sector);
    let falling = ((1.0 - fraction) * 255.0) as u8;
    let rising = (fraction * 255.0) as u8;

    let (r, g, b) = match sector {
        0 => (255, rising, 0),
        1 => (falling, 255, 0),
        2 => (0, 255, rising),
        3 => (0, falling, 255),
        4 => (rising, 0, 255),
        _ => (255, 0, falling),
    };
    Rgba([r, g, b, 255])
}
