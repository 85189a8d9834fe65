use hello_server::{GREETING, greet};
use test_util::TestServer;


const GREETING_RESPONSE: &str = "HTTP/1.1 200 OK\r\ncontent-type: text/plain; charset=UTF-8\r\ncontent-length: 31\r\n\r\nHello, Multistage Docker Build!";

#[test]
fn response_carries_the_greeting() {
    assert!(GREETING_RESPONSE.ends_with(GREETING));
}

#[test]
fn get_root() {
    let server = TestServer::start(greet).unwrap();
    assert_eq!(
        GREETING_RESPONSE,
        server.exchange("GET / HTTP/1.1\r\n\r\n").unwrap()
    );
}

#[test]
fn ignores_method() {
    let server = TestServer::start(greet).unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "FROBNICATE"] {
        assert_eq!(
            GREETING_RESPONSE,
            server
                .exchange(format!("{method} / HTTP/1.1\r\n\r\n"))
                .unwrap(),
            "method {method:?}"
        );
    }
}

#[test]
fn ignores_path() {
    let server = TestServer::start(greet).unwrap();
    for path in ["/", "/index.html", "/anything/nested/path", "/a?q=1&x=%20"] {
        assert_eq!(
            GREETING_RESPONSE,
            server
                .exchange(format!("GET {path} HTTP/1.1\r\n\r\n"))
                .unwrap(),
            "path {path:?}"
        );
    }
}

#[test]
fn ignores_headers() {
    let server = TestServer::start(greet).unwrap();
    assert_eq!(
        GREETING_RESPONSE,
        server
            .exchange(
                "GET / HTTP/1.1\r\nhost: example.com\r\nx-custom: abc\r\naccept: */*\r\n\r\n"
            )
            .unwrap()
    );
}

#[test]
fn ignores_body() {
    let server = TestServer::start(greet).unwrap();
    assert_eq!(
        GREETING_RESPONSE,
        server
            .exchange("POST /anything/nested/path HTTP/1.1\r\ncontent-length: 11\r\n\r\nhello world")
            .unwrap()
    );
    assert_eq!(
        GREETING_RESPONSE,
        server
            .exchange("POST /anything/nested/path HTTP/1.1\r\ncontent-length: 4\r\n\r\nliff")
            .unwrap()
    );
}

#[test]
fn repeated_requests_get_identical_bytes() {
    let server = TestServer::start(greet).unwrap();
    let first = server.exchange("GET / HTTP/1.1\r\n\r\n").unwrap();
    let second = server.exchange("GET / HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(first, second);
    assert_eq!(GREETING_RESPONSE, first);
}

#[test]
fn keep_alive_serves_both_requests() {
    let server = TestServer::start(greet).unwrap();
    let two_requests = "GET / HTTP/1.1\r\n\r\nGET /other HTTP/1.1\r\n\r\n";
    assert_eq!(
        GREETING_RESPONSE.repeat(2),
        server.exchange(two_requests).unwrap()
    );
}

#[test]
fn keep_alive_after_discarded_body() {
    let server = TestServer::start(greet).unwrap();
    let two_requests = "POST / HTTP/1.1\r\ncontent-length: 5\r\n\r\nhelloGET / HTTP/1.1\r\n\r\n";
    assert_eq!(
        GREETING_RESPONSE.repeat(2),
        server.exchange(two_requests).unwrap()
    );
}
