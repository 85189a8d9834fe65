use fixed_buffer::FixedBuf;
use futures_lite::future::block_on;
use hello_server::internal::{HttpError, read_http_request};
use hello_server::socket_addr_127_0_0_1;
use std::net::SocketAddr;

fn filled<const N: usize>(bytes: &[u8]) -> FixedBuf<N> {
    let mut buf: FixedBuf<N> = FixedBuf::new();
    buf.writable()[..bytes.len()].copy_from_slice(bytes);
    buf.wrote(bytes.len());
    buf
}

fn remote_addr() -> SocketAddr {
    socket_addr_127_0_0_1(1)
}

#[test]
fn parses_request_and_leaves_body_bytes() {
    let mut source: FixedBuf<1024> =
        filled(b"POST /a/b?q=1 HTTP/1.1\r\nHost: example.com\r\ncontent-length: 5\r\n\r\nhello");
    let mut buf: FixedBuf<8192> = FixedBuf::new();
    let req = block_on(read_http_request(remote_addr(), &mut buf, &mut source)).unwrap();
    assert_eq!("POST", req.method());
    assert_eq!("/a/b", req.url().path());
    assert_eq!(Some("q=1"), req.url().query());
    assert_eq!(Some("example.com"), req.header("host"));
    assert_eq!(Some(5), req.content_length());
    assert_eq!(b"hello", buf.readable());
}

#[test]
fn empty_input_is_disconnected() {
    let mut source: FixedBuf<16> = FixedBuf::new();
    let mut buf: FixedBuf<8192> = FixedBuf::new();
    let result = block_on(read_http_request(remote_addr(), &mut buf, &mut source));
    assert_eq!(Err(HttpError::Disconnected), result.map(|_| ()));
}

#[test]
fn partial_head_is_truncated() {
    let mut source: FixedBuf<64> = filled(b"GET / HTTP/1.1\r\n");
    let mut buf: FixedBuf<8192> = FixedBuf::new();
    let result = block_on(read_http_request(remote_addr(), &mut buf, &mut source));
    assert_eq!(Err(HttpError::Truncated), result.map(|_| ()));
}

#[test]
fn oversized_head_is_rejected() {
    let head = format!("GET / HTTP/1.1\r\nbig: {}\r\n\r\n", "x".repeat(9000));
    let mut source: FixedBuf<16384> = filled(head.as_bytes());
    let mut buf: FixedBuf<8192> = FixedBuf::new();
    let result = block_on(read_http_request(remote_addr(), &mut buf, &mut source));
    assert_eq!(Err(HttpError::HeadTooLong), result.map(|_| ()));
}

#[test]
fn bad_content_length_is_rejected() {
    let mut source: FixedBuf<64> = filled(b"GET / HTTP/1.1\r\ncontent-length: ten\r\n\r\n");
    let mut buf: FixedBuf<8192> = FixedBuf::new();
    let result = block_on(read_http_request(remote_addr(), &mut buf, &mut source));
    assert_eq!(Err(HttpError::InvalidContentLength), result.map(|_| ()));
}
