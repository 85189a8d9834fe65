use hello_server::{ContentType, Response, greet};
use test_util::{TestServer, assert_ends_with, assert_starts_with};


const GREETING_RESPONSE: &str = "HTTP/1.1 200 OK\r\ncontent-type: text/plain; charset=UTF-8\r\ncontent-length: 31\r\n\r\nHello, Multistage Docker Build!";

#[test]
fn handler_panic_returns_500() {
    let server = TestServer::start(|_req| panic!("ignore this panic")).unwrap();
    assert_eq!(
        "HTTP/1.1 500 Internal Server Error\r\ncontent-type: text/plain; charset=UTF-8\r\ncontent-length: 12\r\n\r\nServer error",
        server.exchange("M / HTTP/1.1\r\n\r\n").unwrap()
    );
}

#[test]
fn custom_handler_response_is_written_in_full() {
    let server = TestServer::start(|_req| {
        Response::new(200)
            .with_type(ContentType::Html)
            .with_body("<b>hi</b>")
            .with_header("x-frame-options", "DENY".try_into().unwrap())
    })
    .unwrap();
    assert_eq!(
        "HTTP/1.1 200 OK\r\ncontent-type: text/html; charset=UTF-8\r\ncontent-length: 9\r\nx-frame-options: DENY\r\n\r\n<b>hi</b>",
        server.exchange("GET / HTTP/1.1\r\n\r\n").unwrap()
    );
}

#[test]
fn malformed_request_line_returns_400() {
    let server = TestServer::start(greet).unwrap();
    let response = server.exchange("BAD\r\n\r\n").unwrap();
    assert_starts_with(&response, "HTTP/1.1 400 Bad Request\r\n");
    assert_ends_with(&response, "HttpError::MalformedRequestLine");
}

#[test]
fn malformed_header_returns_400() {
    let server = TestServer::start(greet).unwrap();
    let response = server
        .exchange("GET / HTTP/1.1\r\nno colon here\r\n\r\n")
        .unwrap();
    assert_starts_with(&response, "HTTP/1.1 400 Bad Request\r\n");
    assert_ends_with(&response, "HttpError::MalformedHeaderLine");
}

#[test]
fn old_protocol_returns_505() {
    let server = TestServer::start(greet).unwrap();
    let response = server.exchange("GET / HTTP/1.0\r\n\r\n").unwrap();
    assert_starts_with(&response, "HTTP/1.1 505 HTTP Version Not Supported\r\n");
    assert_ends_with(&response, "HttpError::UnsupportedProtocol");
}

#[test]
fn post_without_length_gets_response_then_close() {
    // The body has no usable framing, so the server answers and closes the
    // connection instead of trying to drain it.
    let server = TestServer::start(greet).unwrap();
    assert_eq!(
        GREETING_RESPONSE,
        server.exchange("POST / HTTP/1.1\r\n\r\n").unwrap()
    );
}

#[test]
fn chunked_body_gets_response_then_close() {
    let server = TestServer::start(greet).unwrap();
    assert_eq!(
        GREETING_RESPONSE,
        server
            .exchange("POST / HTTP/1.1\r\ntransfer-encoding: chunked\r\n\r\n")
            .unwrap()
    );
}

#[test]
fn expect_continue_gets_final_response_immediately() {
    // The server never sends an interim `100 Continue`.  The client gets the
    // final response right away, without sending the body.
    let server = TestServer::start(greet).unwrap();
    assert_eq!(
        GREETING_RESPONSE,
        server
            .exchange("POST / HTTP/1.1\r\nexpect: 100-continue\r\ncontent-length: 5\r\n\r\n")
            .unwrap()
    );
}
