//! hello-server
//! ============
//! An HTTP server that answers every request with a fixed greeting.
//!
//! The server binds `0.0.0.0:8080`, hard-coded.  Every request gets
//! `200 OK` with the body `Hello, Multistage Docker Build!`, regardless of
//! its method, path, headers, or body.
//! If the port cannot be bound, the process logs the error and exits with a
//! non-zero status.
//!
//! # Features
//! - `forbid(unsafe_code)`
//! - Threaded request handlers:<br>
//!   `FnOnce(Request) -> Response + 'static + Clone + Send + Sync`
//! - Uses async code internally for connection I/O
//! - Limits the number of concurrent connections
//! - Structured stdout logging
//!
//! # Limitations
//! - HTTP/1.1 only, no TLS.
//! - Request bodies are never delivered to handlers.  Small bodies with a
//!   known length are discarded so the connection can be kept alive; other
//!   bodies close the connection after the response.
//! - No graceful shutdown of the binary: the process runs until it is
//!   killed.  (The library's accept loop can be stopped by revoking its
//!   [`permit::Permit`]; the test suite relies on this.)
//!
//! # Example
//! ```no_run
//! use hello_server::reexport::safina;
//! use hello_server::{HttpServerBuilder, greet, socket_addr_all_interfaces};
//!
//! safina::timer::start_timer_thread();
//! let executor = std::sync::Arc::new(safina::executor::Executor::default());
//! executor
//!     .block_on(
//!         HttpServerBuilder::new()
//!             .listen_addr(socket_addr_all_interfaces(8080))
//!             .spawn_and_join(greet),
//!     )
//!     .unwrap();
//! ```
#![forbid(unsafe_code)]
mod accept;
mod ascii_string;
mod content_type;
mod greet;
mod headers;
mod http_conn;
mod http_error;
pub mod log;
mod request;
mod response;
mod response_body;
mod time;
mod token_set;
mod util;

pub use crate::accept::{
    socket_addr_127_0_0_1, socket_addr_127_0_0_1_any_port, socket_addr_all_interfaces,
};
pub use crate::ascii_string::AsciiString;
pub use crate::content_type::ContentType;
pub use crate::greet::{GREETING, greet};
pub use crate::headers::{Header, HeaderList};
pub use crate::http_conn::HttpConn;
pub use crate::request::Request;
pub use crate::response::Response;
pub use crate::response_body::ResponseBody;

/// This part of the library is not covered by the semver guarantees.
/// If you use these in your program, a minor version upgrade could break your build.
pub mod internal {
    pub use crate::accept::*;
    pub use crate::http_conn::*;
    pub use crate::http_error::*;
    pub use crate::request::*;
    pub use crate::response::*;
    pub use crate::response_body::*;
    pub use crate::time::*;
    pub use crate::token_set::*;
    pub use crate::util::*;
}

pub mod reexport {
    pub use permit;
    pub use safina;
}

use crate::accept::accept_loop;
use crate::http_conn::handle_http_conn;
use crate::token_set::TokenSet;
use async_net::TcpListener;
use permit::Permit;
use std::net::SocketAddr;

/// Builds an HTTP server.
pub struct HttpServerBuilder {
    listen_addr: SocketAddr,
    max_conns: usize,
    permit: Permit,
}
impl HttpServerBuilder {
    /// Makes a new builder with these default settings:
    /// - Listens on 127.0.0.1
    /// - Picks a random port
    /// - 100 max connections
    #[allow(clippy::new_without_default)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            listen_addr: socket_addr_127_0_0_1_any_port(),
            max_conns: 100,
            permit: Permit::new(),
        }
    }

    #[must_use]
    pub fn listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = addr;
        self
    }

    /// Sets the maximum number of connections to handle at one time.
    ///
    /// When the server is handling the maximum number of connections,
    /// it waits for a connection to drop before accepting new ones.
    ///
    /// Each connection uses a file handle.
    /// Some processes run with a limit on the number of file handles.
    /// The OS kernel also has a limit for all processes combined.
    ///
    /// # Panics
    /// Panics when `n` is zero.
    #[must_use]
    pub fn max_conns(mut self, n: usize) -> Self {
        assert!(n > 0, "refusing to set max_conns to zero");
        self.max_conns = n;
        self
    }

    /// Sets the permit used by the server.
    ///
    /// Revoke the permit to make the server shut down.
    #[must_use]
    pub fn permit(mut self, p: Permit) -> Self {
        self.permit = p;
        self
    }

    /// Spawns the server task.
    ///
    /// Returns `(addr, stopped_receiver)`.
    /// The server is listening on `addr`.
    /// After the server shuts down, it sends a message on `stopped_receiver`.
    ///
    /// # Errors
    /// Returns an error when it fails to bind to the
    /// [`listen_addr`](HttpServerBuilder::listen_addr).
    pub async fn spawn<F>(
        self,
        request_handler: F,
    ) -> Result<(SocketAddr, safina::sync::Receiver<()>), std::io::Error>
    where
        F: FnOnce(Request) -> Response + 'static + Clone + Send + Sync,
    {
        let conn_handler = move |permit, token, stream: async_net::TcpStream, addr| {
            let request_handler = request_handler.clone();
            let async_request_handler = move |req: Request| {
                let request_handler = request_handler.clone();
                async move {
                    safina::executor::schedule_blocking(move || request_handler(req))
                        .await
                        .unwrap_or_else(|_| Response::text(500, "Server error"))
                }
            };
            let http_conn = HttpConn::new(addr, stream);
            safina::executor::spawn(handle_http_conn(
                permit,
                token,
                http_conn,
                async_request_handler,
            ));
        };
        let listener = TcpListener::bind(self.listen_addr).await?;
        let addr = listener.local_addr()?;
        let token_set = TokenSet::new(self.max_conns);
        let (sender, receiver) = safina::sync::oneshot();
        safina::executor::spawn(async move {
            accept_loop(self.permit, listener, token_set, conn_handler).await;
            let _ignored = sender.send(());
        });
        Ok((addr, receiver))
    }

    /// Spawns the server task and waits until it shuts down.
    ///
    /// The server shuts down only when its permit is revoked, so a builder
    /// left with the default permit serves forever.
    ///
    /// # Errors
    /// Returns an error when it fails to bind to the
    /// [`listen_addr`](HttpServerBuilder::listen_addr).
    pub async fn spawn_and_join<F>(self, request_handler: F) -> Result<(), std::io::Error>
    where
        F: FnOnce(Request) -> Response + 'static + Clone + Send + Sync,
    {
        let (_addr, mut stopped_receiver) = self.spawn(request_handler).await?;
        let _ignored = stopped_receiver.async_recv().await;
        Ok(())
    }
}
