use crate::config::Config;
use crate::error::DispatchError;
use chrono::Local;
use hyper::Method;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("mica server started successfully");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    println!("Template directory: {}", config.resources.template_dir);
    println!("Static directory: {}", config.resources.static_dir);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_request(method: &Method, uri: &str) {
    println!("[Request] {method} {uri}");
}

/// Access log line for a completed request, Common Log Format style timestamp.
pub fn log_access(method: &Method, uri: &str, status: u16) {
    println!(
        "[Access] [{}] \"{method} {uri}\" {status}",
        Local::now().format("%d/%b/%Y:%H:%M:%S %z")
    );
}

/// Log a caught dispatch failure with its full cause chain.
///
/// The dispatcher calls this exactly once per failed request, before the
/// error is converted into a 500 page (or swallowed when the response is
/// already committed).
pub fn log_dispatch_error(err: &DispatchError) {
    let mut message = format!("[ERROR] Dispatch failed: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(&format!("\n        caused by: {cause}"));
        source = cause.source();
    }
    eprintln!("{message}");
}
