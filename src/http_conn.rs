use crate::http_error::HttpError;
use crate::request::read_http_request;
use crate::response::write_http_response;
use crate::token_set::Token;
use crate::{Request, Response};
use fixed_buffer::FixedBuf;
use futures_lite::AsyncReadExt;
use permit::Permit;
use std::future::Future;
use std::net::{Shutdown, SocketAddr};

/// Largest request body the server reads and throws away to keep a
/// connection reusable.  Anything bigger closes the connection instead.
pub const MAX_DISCARD_BODY_LEN: u64 = 64 * 1024;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadState {
    /// The next bytes on the connection are a request head.
    Ready,
    /// The client is sending a request body with a known length.
    Bytes(u64),
    /// The client is sending a request body with no usable framing
    /// (no `content-length`, or a transfer encoding).
    Unknown,
    Shutdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteState {
    None,
    Response,
    Shutdown,
}

pub struct HttpConn {
    pub remote_addr: SocketAddr,
    pub buf: FixedBuf<8192>,
    pub stream: async_net::TcpStream,
    pub read_state: ReadState,
    pub expect_continue: bool,
    pub write_state: WriteState,
}
impl HttpConn {
    #[must_use]
    pub fn new(remote_addr: SocketAddr, stream: async_net::TcpStream) -> Self {
        Self {
            remote_addr,
            buf: FixedBuf::new(),
            stream,
            read_state: ReadState::Ready,
            expect_continue: false,
            write_state: WriteState::None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.read_state == ReadState::Ready
    }

    pub fn shutdown(&mut self) {
        self.shutdown_read();
        self.shutdown_write();
    }

    pub fn shutdown_read(&mut self) {
        let _ignored = self.stream.shutdown(Shutdown::Read);
        self.read_state = ReadState::Shutdown;
    }

    pub fn shutdown_write(&mut self) {
        let _ignored = self.stream.shutdown(Shutdown::Write);
        self.write_state = WriteState::Shutdown;
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn shutdown_read_on_err<T, E>(&mut self, result: Result<T, E>) -> Result<T, E> {
        if result.is_err() {
            self.shutdown_read();
        }
        result
    }

    /// # Errors
    /// Returns an error when:
    /// - we did not send a response to the previous request
    /// - the connection is closed
    /// - we did not dispose of the previous request's body
    /// - we fail to read or parse the request
    pub async fn read_request(&mut self) -> Result<Request, HttpError> {
        match self.write_state {
            WriteState::None => {}
            WriteState::Response => return Err(HttpError::ResponseNotSent),
            WriteState::Shutdown => return Err(HttpError::Disconnected),
        }
        match self.read_state {
            ReadState::Ready => {}
            ReadState::Bytes(..) | ReadState::Unknown => return Err(HttpError::BodyNotRead),
            ReadState::Shutdown => return Err(HttpError::Disconnected),
        }
        self.write_state = WriteState::Response;
        let result = read_http_request(self.remote_addr, &mut self.buf, &mut self.stream).await;
        let req = self.shutdown_read_on_err(result)?;
        self.expect_continue = req.expect_continue;
        // HTTP/1.1 defines several ways to frame a body and rules for
        // deciding which one to expect:
        // https://datatracker.ietf.org/doc/html/rfc7230#section-3.3
        self.read_state = if req.chunked {
            ReadState::Unknown
        } else {
            match (req.content_length, req.method()) {
                (Some(0), _) => ReadState::Ready,
                (Some(len), _) => ReadState::Bytes(len),
                (None, "POST" | "PUT") => ReadState::Unknown,
                (None, _) if req.expect_continue => ReadState::Unknown,
                (None, _) => ReadState::Ready,
            }
        };
        Ok(req)
    }

    /// # Errors
    /// Returns an error when a response was already sent, the connection is
    /// closed, or we fail to send the response bytes over the connection.
    pub async fn write_response(&mut self, response: &Response) -> Result<(), HttpError> {
        match self.write_state {
            WriteState::None => return Err(HttpError::ResponseAlreadySent),
            WriteState::Response => {}
            WriteState::Shutdown => return Err(HttpError::Disconnected),
        }
        match write_http_response(&mut self.stream, response).await {
            Ok(()) => {
                self.write_state = WriteState::None;
                Ok(())
            }
            Err(e) => {
                self.shutdown_write();
                Err(e)
            }
        }
    }

    /// Reads and throws away `len` request body bytes.
    async fn skip_body(&mut self, len: u64) -> Result<(), HttpError> {
        let buffered = (self.buf.readable().len() as u64).min(len);
        if buffered > 0 {
            self.buf.try_read_exact(buffered as usize).unwrap();
        }
        let mut remaining = len - buffered;
        let mut scratch = [0_u8; 8192];
        while remaining > 0 {
            let want = remaining.min(scratch.len() as u64) as usize;
            match self.stream.read(&mut scratch[..want]).await {
                Err(..) | Ok(0) => return Err(HttpError::Truncated),
                Ok(n) => remaining -= n as u64,
            }
        }
        Ok(())
    }

    /// Disposes of the current request's body so the connection can carry
    /// another request.
    ///
    /// Small bodies with a known length are read and discarded.  A body we
    /// cannot safely drain (unknown length, or the client may still be
    /// waiting on `Expect: 100-continue`) closes the connection instead.
    ///
    /// # Errors
    /// Returns [`HttpError::Disconnected`] when the connection cannot be
    /// reused, and other errors when draining the body fails.
    pub async fn finish_request(&mut self) -> Result<(), HttpError> {
        match self.read_state {
            ReadState::Ready => Ok(()),
            ReadState::Bytes(len) if len <= MAX_DISCARD_BODY_LEN && !self.expect_continue => {
                let result = self.skip_body(len).await;
                if result.is_ok() {
                    self.read_state = ReadState::Ready;
                }
                self.shutdown_read_on_err(result)
            }
            ReadState::Bytes(..) | ReadState::Unknown => {
                self.shutdown();
                Err(HttpError::Disconnected)
            }
            ReadState::Shutdown => Err(HttpError::Disconnected),
        }
    }
}

/// # Errors
/// Returns an error when:
/// - we fail to read or parse a request
/// - we fail to send the response
/// - the connection cannot carry another request
pub async fn handle_http_conn_once<F, Fut>(
    http_conn: &mut HttpConn,
    request_handler: F,
) -> Result<(), HttpError>
where
    Fut: Future<Output = Response>,
    F: FnOnce(Request) -> Fut + 'static + Send,
{
    let req = http_conn.read_request().await?;
    let response = request_handler(req).await;
    http_conn.write_response(&response).await?;
    http_conn.finish_request().await
}

#[allow(clippy::module_name_repetitions)]
pub async fn handle_http_conn<F, Fut>(
    permit: Permit,
    _token: Token,
    mut http_conn: HttpConn,
    request_handler: F,
) where
    Fut: Future<Output = Response>,
    F: FnOnce(Request) -> Fut + 'static + Send + Clone,
{
    while !permit.is_revoked() {
        if !http_conn.is_ready() {
            // Previous request left unread bytes on the connection.
            http_conn.shutdown();
            return;
        }
        match handle_http_conn_once(&mut http_conn, request_handler.clone()).await {
            Ok(()) => {}
            Err(HttpError::Disconnected) => return,
            Err(e) => {
                if e.is_server_error() {
                    eprintln!("ERROR {e:?}");
                }
                let _ignored = http_conn.write_response(&e.into()).await;
                http_conn.shutdown();
                return;
            }
        }
    }
}
