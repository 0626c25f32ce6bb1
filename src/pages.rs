//! Markup for the interactive viewer page.
//!
//! Templates are maud components: plain functions returning [`Markup`],
//! composed into a single HTML document with the stylesheet embedded
//! inline. The page carries no script; the controls are ordinary links
//! back into `/interactive`, so every pan or zoom is a full request.

use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLESHEET: &str = include_str!("../static/style.css");

/// The interactive viewer: the rendered image plus pan/zoom controls.
///
/// The controls update the tracked view server-side, but the image they
/// surround is still the fixed full-image render. The note under the
/// heading says as much, so nobody files the missing zoom as a bug.
pub fn interactive_page() -> Markup {
    base_document(
        "Mandelbrot explorer",
        html! {
            main.viewer {
                h1 { "Mandelbrot explorer" }
                p.viewer-note {
                    "Pan and zoom are tracked per request but not applied to the render yet."
                }
                img.fractal src="/" alt="The Mandelbrot set" width="800" height="800";
                (controls())
            }
        },
    )
}

/// Link rows for zooming and panning the view.
fn controls() -> Markup {
    html! {
        nav.controls {
            div.control-row {
                a.control href="/interactive?zoom=in" { "Zoom in" }
                a.control href="/interactive?zoom=out" { "Zoom out" }
            }
            div.control-row {
                a.control href="/interactive?move=left" { "Left" }
                a.control href="/interactive?move=right" { "Right" }
                a.control href="/interactive?move=up" { "Up" }
                a.control href="/interactive?move=down" { "Down" }
            }
        }
    }
}

/// Shared document shell: head, inline stylesheet, body.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLESHEET)) }
            }
            body {
                (content)
            }
        }
    }
}
