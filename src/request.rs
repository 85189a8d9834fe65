use crate::headers::{Header, HeaderList};
use crate::http_error::HttpError;
use fixed_buffer::FixedBuf;
use futures_io::AsyncRead;
use futures_lite::AsyncReadExt;
use safe_regex::{Matcher2, Matcher3, regex};
use std::net::SocketAddr;
use url::Url;

fn trim_trailing_cr(bytes: &[u8]) -> &[u8] {
    if let Some(&b'\r') = bytes.last() {
        bytes.split_last().unwrap().1
    } else {
        bytes
    }
}

fn trim_whitespace(mut bytes: &[u8]) -> &[u8] {
    loop {
        if let Some(&byte) = bytes.first() {
            if byte == b' ' || byte == b'\t' || byte == b'\r' || byte == b'\n' {
                bytes = bytes.split_first().unwrap().1;
                continue;
            }
        }
        if let Some(&byte) = bytes.last() {
            if byte == b' ' || byte == b'\t' || byte == b'\r' || byte == b'\n' {
                bytes = bytes.split_last().unwrap().1;
                continue;
            }
        }
        break;
    }
    bytes
}

fn latin1_bytes_to_utf8(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum HeadError {
    Truncated,
    MissingRequestLine,
    MalformedRequestLine,
    MalformedPath,
    UnsupportedProtocol,
    MalformedHeader,
}
impl From<HeadError> for HttpError {
    fn from(e: HeadError) -> Self {
        match e {
            HeadError::Truncated => HttpError::Truncated,
            HeadError::MissingRequestLine => HttpError::MissingRequestLine,
            HeadError::MalformedRequestLine => HttpError::MalformedRequestLine,
            HeadError::MalformedPath => HttpError::MalformedPath,
            HeadError::UnsupportedProtocol => HttpError::UnsupportedProtocol,
            HeadError::MalformedHeader => HttpError::MalformedHeaderLine,
        }
    }
}

fn read_head_bytes<const BUF_SIZE: usize>(
    buf: &mut FixedBuf<BUF_SIZE>,
) -> Result<&[u8], HeadError> {
    let head_len =
        crate::util::find_slice(b"\r\n\r\n", buf.readable()).ok_or(HeadError::Truncated)?;
    let head_bytes_with_delim = buf.try_read_exact(head_len + 4).unwrap();
    let head_bytes = &head_bytes_with_delim[0..head_len];
    Ok(head_bytes)
}

fn parse_request_line(line: &[u8]) -> Result<(String, Url), HeadError> {
    // https://datatracker.ietf.org/doc/html/rfc7230#section-3.1.1
    // https://datatracker.ietf.org/doc/html/rfc7230#section-5.3
    //     request-line   = method SP request-target SP HTTP-version CRLF
    //     method         = token
    //     request-target = origin-form
    //                    / absolute-form
    //                    / authority-form
    //                    / asterisk-form
    //     origin-form    = absolute-path [ "?" query ]
    //     token          = 1*tchar
    //     tchar          = "!" / "#" / "$" / "%" / "&" / "'" / "*"
    //                      / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
    //                      / DIGIT / ALPHA
    //                      ; any VCHAR, except delimiters
    #[allow(clippy::assign_op_pattern)]
    #[allow(clippy::range_plus_one)]
    let matcher: Matcher3<_> = regex!(br"([-!#$%&'*+.^_`|~0-9A-Za-z]+) ([^ \t\r\n]+) ([^ \t\r\n]+)");
    let (method_bytes, path_bytes, proto_bytes) = matcher
        .match_slices(line)
        .ok_or(HeadError::MalformedRequestLine)?;
    let method = std::str::from_utf8(method_bytes).unwrap().to_string();
    let url_string = std::str::from_utf8(path_bytes).map_err(|_| HeadError::MalformedPath)?;
    if url_string != "*" && !url_string.starts_with('/') {
        return Err(HeadError::MalformedPath);
    }
    let url = Url::options()
        .base_url(Some(&Url::parse("http://unknown/").unwrap()))
        .parse(url_string)
        .map_err(|_| HeadError::MalformedPath)?;
    if proto_bytes != b"HTTP/1.1" {
        return Err(HeadError::UnsupportedProtocol);
    }
    Ok((method, url))
}

fn parse_header_line(line: &[u8]) -> Result<Header, HeadError> {
    // https://datatracker.ietf.org/doc/html/rfc7230#section-3.2
    //     header-field   = field-name ":" OWS field-value OWS
    //     field-name     = token
    //     field-value    = *( field-content )
    //
    // Header values are US-ASCII in practice, but the spec grandfathers in
    // ISO-8859-1, so values are carried as chars and never rejected.
    #[allow(clippy::assign_op_pattern)]
    #[allow(clippy::range_plus_one)]
    let matcher: Matcher2<_> = regex!(br"([-!#$%&'*+.^_`|~0-9A-Za-z]+):[ \t]*(.*)[ \t]*");
    let (name_bytes, value_bytes) = matcher
        .match_slices(line)
        .ok_or(HeadError::MalformedHeader)?;
    let name_string = String::from_utf8(name_bytes.to_vec()).unwrap();
    let value = latin1_bytes_to_utf8(trim_whitespace(value_bytes));
    Ok(Header::new(name_string.try_into().unwrap(), value))
}

fn try_read_head<const BUF_SIZE: usize>(
    buf: &mut FixedBuf<BUF_SIZE>,
) -> Result<(String, Url, HeaderList), HeadError> {
    let head = read_head_bytes(buf)?;
    let mut lines = head.split(|b| *b == b'\n').map(trim_trailing_cr);
    let request_line = lines.next().ok_or(HeadError::MissingRequestLine)?;
    let (method, url) = parse_request_line(request_line)?;
    let mut headers = HeaderList::new();
    for line in lines {
        headers.push(parse_header_line(line)?);
    }
    Ok((method, url, headers))
}

/// An HTTP request.
///
/// The server parses only the fields it needs for framing.  Everything else
/// is carried opaquely so a handler can inspect it, but the built-in greeting
/// handler ignores the entire request.
#[derive(Clone, Eq, PartialEq)]
pub struct Request {
    pub(crate) remote_addr: SocketAddr,
    pub(crate) method: String,
    pub(crate) url: Url,
    pub(crate) headers: HeaderList,
    pub(crate) expect_continue: bool,
    /// True when the client sent any `transfer-encoding`.
    /// The body then has no known length.
    pub(crate) chunked: bool,
    pub(crate) content_length: Option<u64>,
}
impl Request {
    #[must_use]
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderList {
        &self.headers
    }

    /// Looks up a header with a case-insensitive name comparison.
    /// Returns `None` when no header matched or multiple matched.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers.get_only(name)
    }

    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }
}
impl core::fmt::Debug for Request {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "Request{{method={:?}, path={:?}, query={:?}, headers={:?}}}",
            self.method,
            self.url.path(),
            self.url.query().unwrap_or(""),
            self.headers
        )
    }
}

/// Reads one request head from `buf`, filling it from `reader` as needed.
///
/// # Errors
/// Returns an error when:
/// - the connection is closed
/// - we fail to read a request head
/// - the request head does not fit in `buf`
/// - we fail to parse the request head
#[allow(clippy::module_name_repetitions)]
pub async fn read_http_request<const BUF_SIZE: usize>(
    remote_addr: SocketAddr,
    buf: &mut FixedBuf<BUF_SIZE>,
    mut reader: impl AsyncRead + Unpin,
) -> Result<Request, HttpError> {
    buf.shift();
    let (method, url, headers) = loop {
        match try_read_head(buf) {
            Ok(head) => break head,
            Err(HeadError::Truncated) => {}
            Err(e) => return Err(e.into()),
        }
        if buf.writable().is_empty() {
            return Err(HttpError::HeadTooLong);
        }
        match reader.read(buf.writable()).await {
            Err(..) | Ok(0) if buf.is_empty() => return Err(HttpError::Disconnected),
            Err(..) | Ok(0) => return Err(HttpError::Truncated),
            Ok(n) => buf.wrote(n),
        }
    };
    let expect_continue = headers
        .get_only("expect")
        .is_some_and(|value| value.eq_ignore_ascii_case("100-continue"));
    let chunked = headers
        .get_only("transfer-encoding")
        .is_some_and(|value| !value.trim().is_empty());
    let content_length = if let Some(s) = headers.get_only("content-length") {
        Some(s.parse().map_err(|_| HttpError::InvalidContentLength)?)
    } else {
        None
    };
    Ok(Request {
        remote_addr,
        method,
        url,
        headers,
        expect_continue,
        chunked,
        content_length,
    })
}
