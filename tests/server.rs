use hello_server::{HttpServerBuilder, socket_addr_127_0_0_1_any_port};
use permit::Permit;
use safina::executor::Executor;
use safina::sync::Receiver;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use test_util::check_elapsed;


#[test]
fn server_quick_shutdown() {
    safina::timer::start_timer_thread();
    let permit = Permit::new();
    let executor = Executor::new(1, 1).unwrap();
    let (_, stopped_receiver): (SocketAddr, Receiver<()>) = executor
        .block_on(
            HttpServerBuilder::new()
                .listen_addr(socket_addr_127_0_0_1_any_port())
                .permit(permit.new_sub())
                .spawn(|_req| unreachable!()),
        )
        .unwrap();
    std::thread::sleep(Duration::from_millis(100));
    let before = Instant::now();
    drop(permit);
    // The accept loop polls its permit every 500ms.
    stopped_receiver
        .recv_timeout(Duration::from_millis(1000))
        .unwrap();
    check_elapsed(before, 0..700).unwrap();
}

#[test]
fn bind_failure_is_fatal() {
    // Hold the port so the server cannot bind it.
    let blocker = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let taken_addr = blocker.local_addr().unwrap();
    safina::timer::start_timer_thread();
    let executor = Executor::new(1, 1).unwrap();
    let result: Result<(SocketAddr, Receiver<()>), std::io::Error> = executor.block_on(
        HttpServerBuilder::new()
            .listen_addr(taken_addr)
            .spawn(|_req| unreachable!()),
    );
    let e = result.map(|_| ()).unwrap_err();
    assert_eq!(ErrorKind::AddrInUse, e.kind());
}
