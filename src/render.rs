//! Frame rendering and PNG encoding.
//!
//! Rendering happens in two passes. The coordinate table is built
//! first, sequentially, because the pixel-to-plane mapping is a
//! recurrence with a defined traversal order. The per-pixel work, the
//! escape iteration and coloring, has no such ordering and runs across
//! the rayon pool, each task writing the four bytes of its own pixel.
//! `render_frame` returns only once every pixel is written, so the
//! encoder always sees a complete canvas.

use std::time::Instant;

use image::RgbaImage;
use image::codecs::png::PngEncoder;
use log::debug;
use rayon::prelude::*;
use thiserror::Error;

use crate::colorize::color_for;
use crate::mandelbrot::escape_count;
use crate::viewport::{PlaneMapper, Viewport};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

const BYTES_PER_PIXEL: usize = 4;

/// Everything that determines a rendered image.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub viewport: Viewport,
}

impl Default for Frame {
    /// The one frame the service serves: 800x800 over the default
    /// viewport at a hundred iterations.
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            max_iterations: 100,
            viewport: Viewport::default(),
        }
    }
}

/// Render the frame into an opaque RGBA canvas.
pub fn render_frame(frame: &Frame) -> RgbaImage {
    let started = Instant::now();
    let points = PlaneMapper::new(frame.viewport, frame.width, frame.height).plane_points();

    let mut canvas = RgbaImage::new(frame.width, frame.height);
    canvas
        .par_chunks_exact_mut(BYTES_PER_PIXEL)
        .enumerate()
        .for_each(|(index, pixel)| {
            let (cx, cy) = points[index];
            let color = color_for(
                escape_count(frame.max_iterations, cx, cy),
                frame.max_iterations,
            );
            pixel.copy_from_slice(&color.0);
        });

    debug!(
        "rendered {}x{} frame in {:?}",
        frame.width,
        frame.height,
        started.elapsed()
    );
    canvas
}

/// Encode a canvas as PNG bytes.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    canvas.write_with_encoder(PngEncoder::new(&mut bytes))?;
    Ok(bytes)
}

/// Render the frame and encode it in one step.
pub fn render_png(frame: &Frame) -> Result<Vec<u8>, RenderError> {
    encode_png(&render_frame(frame))
}
