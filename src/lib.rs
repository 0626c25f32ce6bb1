//! # Mandelserve
//!
//! A small web service that renders the Mandelbrot set. Every request
//! produces a fresh 800x800 PNG of one fixed frame of the set, and an
//! interactive viewer page wraps the image in pan/zoom controls that
//! are tracked server-side (the controls do not move the render yet).
//!
//! # Architecture: One Request, One Render
//!
//! A request travels through three stages, all inside the worker
//! thread that accepted it:
//!
//! ```text
//! 1. Map       pixel grid  ->  plane points   (sequential recurrence)
//! 2. Iterate   points      ->  colors         (parallel across the rayon pool)
//! 3. Encode    canvas      ->  PNG bytes      (after every pixel is written)
//! ```
//!
//! There is no cache and no precomputation: the canvas is rebuilt per
//! request. The coordinate pass must stay sequential because each
//! produced coordinate feeds into the next one; the per-pixel pass has
//! no ordering at all and saturates the pool.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`mandelbrot`] | Escape-time iteration: how many steps until a point's orbit escapes |
//! | [`colorize`] | Iteration counts to RGBA colors: HSV sweep, red boundary band, black interior |
//! | [`viewport`] | The complex-plane region under view and the stateful pixel-to-plane mapper |
//! | [`render`] | Frame rendering: coordinate pass, parallel pixel pass, PNG encoding |
//! | [`pages`] | Maud markup for the interactive viewer page |
//! | [`serve`] | The tiny_http worker pool, routing, and the tracked pan/zoom state |
//! | [`config`] | `mandelserve.toml` loading and validation |
//!
//! # Design Decisions
//!
//! ## Synchronous Workers Over an Async Runtime
//!
//! The server is a fixed pool of threads pulling requests off one
//! shared `tiny_http` listener. A render occupies its worker for the
//! whole request, which is exactly the backpressure we want: the
//! worker count caps concurrent renders, and the PNG encoder never
//! runs before its canvas is complete because both happen in the same
//! thread. An async runtime would add a scheduler between two stages
//! that are both CPU-bound.
//!
//! ## Sequential Coordinates, Parallel Pixels
//!
//! The pixel-to-plane mapping is a recurrence: each coordinate depends
//! on the one produced before it, in a defined traversal order. So the
//! render splits into a sequential pass that materializes the full
//! coordinate table, then a parallel pass where each pixel's escape
//! iteration and color are computed independently. The expensive part
//! (up to a hundred iterations per pixel) is the parallel one.
//!
//! ## Maud Over Template Engines
//!
//! The viewer page is generated with [Maud](https://maud.lambda.xyz/),
//! a compile-time HTML macro system. Malformed markup is a build
//! error, interpolation is auto-escaped, and the stylesheet is
//! embedded at compile time, so the binary ships no template or asset
//! files and the page cannot drift out of sync with the code.

pub mod colorize;
pub mod config;
pub mod mandelbrot;
pub mod pages;
pub mod render;
pub mod serve;
pub mod viewport;
