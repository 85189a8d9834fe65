use crate::Response;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum HttpError {
    BodyNotRead,
    Disconnected,
    HeadTooLong,
    InvalidContentLength,
    MalformedHeaderLine,
    MalformedPath,
    MalformedRequestLine,
    MissingRequestLine,
    ResponseAlreadySent,
    ResponseNotSent,
    Truncated,
    UnsupportedProtocol,
}
impl HttpError {
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        match self {
            HttpError::BodyNotRead
            | HttpError::ResponseAlreadySent
            | HttpError::ResponseNotSent => true,
            HttpError::Disconnected
            | HttpError::HeadTooLong
            | HttpError::InvalidContentLength
            | HttpError::MalformedHeaderLine
            | HttpError::MalformedPath
            | HttpError::MalformedRequestLine
            | HttpError::MissingRequestLine
            | HttpError::Truncated
            | HttpError::UnsupportedProtocol => false,
        }
    }

    #[must_use]
    pub fn description(&self) -> String {
        match self {
            HttpError::BodyNotRead => "HttpError::BodyNotRead".to_string(),
            HttpError::Disconnected => "HttpError::Disconnected".to_string(),
            HttpError::HeadTooLong => "HttpError::HeadTooLong".to_string(),
            HttpError::InvalidContentLength => "HttpError::InvalidContentLength".to_string(),
            HttpError::MalformedHeaderLine => "HttpError::MalformedHeaderLine".to_string(),
            HttpError::MalformedPath => "HttpError::MalformedPath".to_string(),
            HttpError::MalformedRequestLine => "HttpError::MalformedRequestLine".to_string(),
            HttpError::MissingRequestLine => "HttpError::MissingRequestLine".to_string(),
            HttpError::ResponseAlreadySent => "HttpError::ResponseAlreadySent".to_string(),
            HttpError::ResponseNotSent => "HttpError::ResponseNotSent".to_string(),
            HttpError::Truncated => "HttpError::Truncated".to_string(),
            HttpError::UnsupportedProtocol => "HttpError::UnsupportedProtocol".to_string(),
        }
    }
}
impl From<HttpError> for Response {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::InvalidContentLength
            | HttpError::MalformedHeaderLine
            | HttpError::MalformedPath
            | HttpError::MalformedRequestLine
            | HttpError::MissingRequestLine
            | HttpError::Truncated => Response::text(400, e.description()),
            HttpError::HeadTooLong => Response::text(431, e.description()),
            HttpError::UnsupportedProtocol => Response::text(505, e.description()),
            HttpError::BodyNotRead
            | HttpError::Disconnected
            | HttpError::ResponseAlreadySent
            | HttpError::ResponseNotSent => Response::text(500, "Internal server error"),
        }
    }
}
