//! HTTP serving for the renderer.
//!
//! A small synchronous server on `tiny_http`: a fixed pool of worker
//! threads pulls requests off one shared listener, and each worker
//! serves its request to completion before taking the next. Routing is
//! deliberately shallow. The exact path `/interactive` serves the
//! viewer page; every other path, whatever it looks like, serves the
//! full-image PNG. The request method is never inspected.
//!
//! The viewer's pan/zoom state lives here too, behind a mutex shared
//! by the workers. It is updated by `/interactive` requests and logged,
//! but not yet wired into rendering.

use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::thread;

use log::{debug, error, info};
use maud::Markup;
use thiserror::Error;
use tiny_http::{Header, Request, Response, Server};
use url::Url;

use crate::pages;
use crate::render::{Frame, render_png};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },
}

/// Body of the 500 response when PNG encoding fails.
const RENDER_ERROR_BODY: &str = "Error generating Mandelbrot image";

/// Multiplier applied to the zoom level per zoom request. Unity until
/// zoom rendering lands, so requests cycle the state without moving it.
const ZOOM_STEP: f64 = 1.0;

/// Pixels of pan per move request, scaled by the current zoom level.
const PAN_STEP: f64 = 5.0;

/// Pan/zoom state accumulated by the interactive endpoint.
///
/// The zoom level starts at zero and the center at the middle of the
/// canvas. With the current unity zoom step, zoom stays at zero and
/// every pan is scaled by it to nothing, so the state is inert by
/// construction. The arithmetic is still exercised and logged on every
/// request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub zoom: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl ViewState {
    fn for_canvas(width: u32, height: u32) -> Self {
        Self {
            zoom: 0.0,
            center_x: f64::from(width) / 2.0,
            center_y: f64::from(height) / 2.0,
        }
    }

    /// Apply one request's zoom and move parameters, in that order.
    /// Unrecognized values are ignored.
    fn apply(&mut self, zoom: Option<&str>, movement: Option<&str>) {
        match zoom {
            Some("in") => self.zoom *= ZOOM_STEP,
            Some("out") => self.zoom /= ZOOM_STEP,
            _ => {}
        }
        match movement {
            Some("left") => self.center_x -= PAN_STEP * self.zoom,
            Some("right") => self.center_x += PAN_STEP * self.zoom,
            Some("up") => self.center_y -= PAN_STEP * self.zoom,
            Some("down") => self.center_y += PAN_STEP * self.zoom,
            _ => {}
        }
    }
}

/// The bound server, ready to run.
///
/// Binding and running are split so tests can bind port zero, read the
/// assigned address, and run the accept loop on their own thread.
pub struct MandelServer {
    server: Arc<Server>,
    frame: Frame,
    view: Arc<Mutex<ViewState>>,
    request_threads: usize,
}

impl MandelServer {
    /// Bind the listener. No requests are accepted until [`run`](Self::run).
    pub fn bind(addr: &str, request_threads: usize) -> Result<Self, ServeError> {
        let server = Server::http(addr).map_err(|err| ServeError::Bind {
            addr: addr.to_string(),
            reason: err.to_string(),
        })?;
        let frame = Frame::default();
        Ok(Self {
            server: Arc::new(server),
            frame,
            view: Arc::new(Mutex::new(ViewState::for_canvas(frame.width, frame.height))),
            request_threads,
        })
    }

    /// The socket address actually bound. Resolves port zero to the
    /// ephemeral port the kernel assigned.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve requests until the listener is dropped.
    ///
    /// Spawns the worker pool and blocks on it. Workers share the
    /// listener; each pulls one request at a time and renders inline,
    /// so at most `request_threads` renders are in flight.
    pub fn run(&self) {
        let mut workers = Vec::with_capacity(self.request_threads);
        for worker in 0..self.request_threads {
            let server = Arc::clone(&self.server);
            let frame = self.frame;
            let view = Arc::clone(&self.view);
            let spawned = thread::Builder::new()
                .name(format!("request-worker-{worker}"))
                .spawn(move || {
                    for request in server.incoming_requests() {
                        handle(request, &frame, &view);
                    }
                });
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(err) => error!("failed to spawn request worker: {err}"),
            }
        }
        for worker in workers {
            if worker.join().is_err() {
                error!("request worker panicked");
            }
        }
    }
}

/// Bind and run the server on the calling thread.
pub fn serve(bind: &str, request_threads: usize) -> Result<(), ServeError> {
    info!("starting web server");
    let server = MandelServer::bind(bind, request_threads)?;
    match server.local_addr() {
        Some(addr) => info!("serving on http://{addr}/"),
        None => info!("serving on {bind}"),
    }
    server.run();
    Ok(())
}

fn handle(request: Request, frame: &Frame, view: &Mutex<ViewState>) {
    debug!("{} {}", request.method(), request.url());

    if request_path(request.url()) == "/interactive" {
        let (zoom, movement) = view_params(request.url());
        let updated = {
            let mut view = view.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            view.apply(zoom.as_deref(), movement.as_deref());
            *view
        };
        // TODO: derive a Frame from the view state here once zoomed and
        // panned rendering lands, instead of always serving the fixed one.
        debug!("view state now {updated:?}");
        respond(request, html_response(pages::interactive_page()));
        return;
    }

    // Everything that is not the viewer serves the full image.
    match render_png(frame) {
        Ok(png) => respond(request, png_response(png)),
        Err(err) => {
            error!("render failed: {err}");
            respond(
                request,
                Response::from_string(RENDER_ERROR_BODY).with_status_code(500),
            );
        }
    }
}

/// The path component of an origin-form request target.
fn request_path(url: &str) -> &str {
    match url.find('?') {
        Some(query_start) => &url[..query_start],
        None => url,
    }
}

/// Extract the `zoom` and `move` query parameters, if present. Repeated
/// parameters keep their first value.
fn view_params(url: &str) -> (Option<String>, Option<String>) {
    // Request targets are origin-form; parse against a fixed base.
    let Ok(parsed) = Url::parse(&format!("http://localhost{url}")) else {
        return (None, None);
    };
    let mut zoom = None;
    let mut movement = None;
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            "zoom" if zoom.is_none() => zoom = Some(value.into_owned()),
            "move" if movement.is_none() => movement = Some(value.into_owned()),
            _ => {}
        }
    }
    (zoom, movement)
}

fn png_response(png: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    Response::from_data(png).with_header(content_type("image/png"))
}

fn html_response(page: Markup) -> Response<Cursor<Vec<u8>>> {
    Response::from_string(page.into_string()).with_header(content_type("text/html; charset=utf-8"))
}

fn content_type(value: &str) -> Header {
    format!("Content-Type: {value}")
        .parse()
        .expect("static content-type header is well-formed")
}

fn respond(request: Request, response: Response<Cursor<Vec<u8>>>) {
    if let Err(err) = request.respond(response) {
        // The client hung up first; nothing to do about it.
        debug!("response not delivered: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // ViewState tests
    // =========================================================================

    fn fresh_view() -> ViewState {
        ViewState::for_canvas(800, 800)
    }

    #[test]
    fn view_starts_centered_with_zero_zoom() {
        let view = fresh_view();
        assert_eq!(view.zoom, 0.0);
        assert_eq!((view.center_x, view.center_y), (400.0, 400.0));
    }

    #[test]
    fn zoom_and_pan_requests_leave_a_fresh_view_unchanged() {
        // Unity zoom step on a zero zoom level, and pans scaled by that
        // zero level: the state must not drift.
        let mut view = fresh_view();
        view.apply(Some("in"), None);
        view.apply(Some("out"), None);
        view.apply(None, Some("left"));
        view.apply(Some("in"), Some("down"));
        assert_eq!(view, fresh_view());
    }

    #[test]
    fn pan_scales_with_the_zoom_level() {
        let mut view = ViewState {
            zoom: 2.0,
            ..fresh_view()
        };
        view.apply(None, Some("left"));
        assert_eq!(view.center_x, 400.0 - PAN_STEP * 2.0);
        view.apply(None, Some("down"));
        assert_eq!(view.center_y, 400.0 + PAN_STEP * 2.0);
    }

    #[test]
    fn zoom_and_move_apply_in_the_same_request() {
        let mut view = ViewState {
            zoom: 4.0,
            ..fresh_view()
        };
        view.apply(Some("out"), Some("right"));
        assert_eq!(view.zoom, 4.0 / ZOOM_STEP);
        assert_eq!(view.center_x, 400.0 + PAN_STEP * view.zoom);
    }

    #[test]
    fn unrecognized_parameter_values_are_ignored() {
        let mut view = ViewState {
            zoom: 2.0,
            ..fresh_view()
        };
        let before = view;
        view.apply(Some("inward"), Some("sideways"));
        assert_eq!(view, before);
    }

    // =========================================================================
    // Request parsing tests
    // =========================================================================

    #[test]
    fn path_strips_the_query_string() {
        assert_eq!(request_path("/interactive?zoom=in"), "/interactive");
        assert_eq!(request_path("/interactive"), "/interactive");
        assert_eq!(request_path("/"), "/");
        assert_eq!(request_path("/favicon.ico"), "/favicon.ico");
    }

    #[test]
    fn view_params_picks_out_zoom_and_move() {
        assert_eq!(
            view_params("/interactive?zoom=in&move=left"),
            (Some("in".to_string()), Some("left".to_string()))
        );
        assert_eq!(
            view_params("/interactive?move=up"),
            (None, Some("up".to_string()))
        );
        assert_eq!(view_params("/interactive"), (None, None));
    }

    #[test]
    fn view_params_ignores_unrelated_parameters() {
        assert_eq!(view_params("/interactive?speed=fast"), (None, None));
    }

    #[test]
    fn repeated_parameters_keep_the_first_value() {
        assert_eq!(
            view_params("/interactive?zoom=in&zoom=out"),
            (Some("in".to_string()), None)
        );
    }

    // =========================================================================
    // Server construction tests
    // =========================================================================

    #[test]
    fn bind_reports_the_assigned_port() {
        let server = MandelServer::bind("127.0.0.1:0", 1).unwrap();
        let addr = server.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn binding_an_occupied_port_fails() {
        let first = MandelServer::bind("127.0.0.1:0", 1).unwrap();
        let addr = first.local_addr().unwrap();
        let second = MandelServer::bind(&addr.to_string(), 1);
        assert!(matches!(second, Err(ServeError::Bind { .. })));
    }
}
