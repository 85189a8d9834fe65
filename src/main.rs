//! Binary entry point.
//!
//! Serves the fixed greeting on `0.0.0.0:8080` until the process is killed.
//! Exits non-zero when the port cannot be bound.
#![forbid(unsafe_code)]
use hello_server::log::tag;
use hello_server::{HttpServerBuilder, greet, log, socket_addr_all_interfaces};

const LISTEN_PORT: u16 = 8080;

pub fn main() {
    safina::timer::start_timer_thread();
    let executor = std::sync::Arc::new(safina::executor::Executor::default());
    log::info(
        "server starting",
        tag("addr", format!("0.0.0.0:{LISTEN_PORT}")),
    );
    if let Err(e) = executor.block_on(
        HttpServerBuilder::new()
            .listen_addr(socket_addr_all_interfaces(LISTEN_PORT))
            .spawn_and_join(greet),
    ) {
        log::error("failed to start server", tag("err", e.to_string()));
        std::process::exit(1);
    }
}
