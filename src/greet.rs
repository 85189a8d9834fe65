use crate::{Request, Response};

/// The payload sent to every client.
pub const GREETING: &str = "Hello, Multistage Docker Build!";

/// The catch-all request handler.
///
/// Ignores the request's method, path, query, headers, and body, and returns
/// `200 OK` with [`GREETING`] as a plaintext body.  Calling it twice with any
/// two requests produces identical responses.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn greet(_req: Request) -> Response {
    Response::text(200, GREETING)
}
