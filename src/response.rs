use crate::http_error::HttpError;
use crate::{AsciiString, ContentType, ResponseBody};
use futures_io::AsyncWrite;
use futures_lite::AsyncWriteExt;
use std::io::Write;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub code: u16,
    pub content_type: ContentType,
    pub headers: Vec<(AsciiString, AsciiString)>,
    pub body: ResponseBody,
}
impl Response {
    #[must_use]
    pub fn new(code: u16) -> Self {
        Self {
            code,
            content_type: ContentType::None,
            headers: Vec::new(),
            body: ResponseBody::empty(),
        }
    }

    #[must_use]
    pub fn text(code: u16, body: impl Into<ResponseBody>) -> Self {
        Self {
            code,
            content_type: ContentType::PlainText,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Adds a header.
    ///
    /// You can call this multiple times to add multiple headers with the same name.
    ///
    /// The [HTTP spec](https://datatracker.ietf.org/doc/html/rfc7230#section-3.2.4)
    /// limits header names to US-ASCII and header values to US-ASCII or ISO-8859-1.
    ///
    /// # Panics
    /// Panics when `name` is not US-ASCII.
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: AsciiString) -> Self {
        self.headers
            .push((name.as_ref().try_into().unwrap(), value));
        self
    }

    #[must_use]
    pub fn with_body(mut self, b: impl Into<ResponseBody>) -> Self {
        self.body = b.into();
        self
    }

    #[must_use]
    pub fn with_type(mut self, t: ContentType) -> Self {
        self.content_type = t;
        self
    }
}

#[must_use]
pub fn reason_phrase(code: u16) -> &'static str {
    // https://developer.mozilla.org/en-US/docs/Web/HTTP/Status
    match code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        431 => "Request Header Fields Too Large",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        503 => "Service Unavailable",
        505 => "HTTP Version Not Supported",
        _ => "Response",
    }
}

/// # Errors
/// Returns an error when the connection is closed or we fail to send the
/// response on the connection.
#[allow(clippy::module_name_repetitions)]
pub async fn write_http_response(
    mut writer: impl AsyncWrite + Unpin,
    response: &Response,
) -> Result<(), HttpError> {
    // https://datatracker.ietf.org/doc/html/rfc7230#section-3.1.2
    //     status-line = HTTP-version SP status-code SP reason-phrase CRLF
    //     status-code    = 3DIGIT
    //     reason-phrase  = *( HTAB / SP / VCHAR )
    let mut head_bytes: Vec<u8> = format!(
        "HTTP/1.1 {} {}\r\n",
        response.code,
        reason_phrase(response.code)
    )
    .into_bytes();
    if response.content_type != ContentType::None {
        write!(
            head_bytes,
            "content-type: {}\r\n",
            response.content_type.as_str()
        )
        .unwrap();
    }
    write!(head_bytes, "content-length: {}\r\n", response.body.len()).unwrap();
    for (name, value) in &response.headers {
        write!(head_bytes, "{name}: {value}\r\n").unwrap();
    }
    head_bytes.extend(b"\r\n");
    writer
        .write_all(head_bytes.as_slice())
        .await
        .map_err(|_| HttpError::Disconnected)?;
    drop(head_bytes);
    if !response.body.is_empty() {
        writer
            .write_all(response.body.as_slice())
            .await
            .map_err(|_| HttpError::Disconnected)?;
    }
    writer.flush().await.map_err(|_| HttpError::Disconnected)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::reason_phrase;

    #[test]
    fn test_reason_phrase() {
        assert_eq!("OK", reason_phrase(200));
        assert_eq!("Bad Request", reason_phrase(400));
        assert_eq!("Internal Server Error", reason_phrase(500));
        assert_eq!("Response", reason_phrase(999));
    }
}
