//! Transport layer module
//!
//! Hosts the dispatcher behind a hyper HTTP/1.1 server: listener setup,
//! accept loop with connection counting, per-connection tasks, and the
//! fallthrough to static-file serving for requests the dispatcher declines.

pub mod connection;
pub mod listener;
pub mod static_files;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::app::App;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::logger;

pub struct Server {
    config: Arc<Config>,
    dispatcher: Arc<Dispatcher>,
}

impl Server {
    pub fn new(app: App) -> Self {
        let config = Arc::new(app.config().clone());
        let dispatcher = Arc::new(app.build());
        Self { config, dispatcher }
    }

    /// Accept loop. Runs until the surrounding runtime shuts down.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.socket_addr()?;
        let listener = listener::create_reusable_listener(addr)?;
        logger::log_server_start(&addr, &self.config);

        let active_connections = Arc::new(AtomicUsize::new(0));
        loop {
            match listener.accept().await {
                Ok((stream, peer_addr)) => {
                    self.accept_connection(stream, peer_addr, &active_connections);
                }
                Err(e) => {
                    logger::log_error(&format!("Failed to accept connection: {e}"));
                }
            }
        }
    }

    fn accept_connection(
        &self,
        stream: tokio::net::TcpStream,
        peer_addr: std::net::SocketAddr,
        active_connections: &Arc<AtomicUsize>,
    ) {
        // Increment first, then check the limit (avoids a race between
        // concurrent accepts).
        let prev_count = active_connections.fetch_add(1, Ordering::SeqCst);
        if let Some(max_conn) = self.config.performance.max_connections {
            if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
                active_connections.fetch_sub(1, Ordering::SeqCst);
                logger::log_warning(&format!(
                    "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
                ));
                drop(stream);
                return;
            }
        }

        if self.config.logging.access_log {
            logger::log_connection_accepted(&peer_addr);
        }

        connection::handle_connection(
            stream,
            Arc::clone(&self.config),
            Arc::clone(&self.dispatcher),
            Arc::clone(active_connections),
        );
    }
}
