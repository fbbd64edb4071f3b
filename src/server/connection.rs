//! Per-connection serving and the hyper <-> framework bridge.

use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use super::static_files;
use crate::config::Config;
use crate::context::{Request, Response};
use crate::dispatch::Dispatcher;
use crate::logger;

/// Serve one accepted connection in a spawned task; decrements the active
/// connection counter when the connection closes.
pub(crate) fn handle_connection(
    stream: tokio::net::TcpStream,
    config: Arc<Config>,
    dispatcher: Arc<Dispatcher>,
    active_connections: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
            config.performance.read_timeout,
            config.performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        if config.performance.keep_alive_timeout > 0 {
            builder.keep_alive(true);
        }

        let service_config = Arc::clone(&config);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let config = Arc::clone(&service_config);
                let dispatcher = Arc::clone(&dispatcher);
                async move { serve_request(req, &config, &dispatcher).await }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "Connection timeout after {} seconds",
                timeout_duration.as_secs()
            )),
        }

        active_connections.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Bridge one hyper request through the dispatcher.
///
/// A `true` from the dispatcher means the buffered framework response is
/// the complete outcome (normal, 404 or 500 page); `false` defers to the
/// static-file handler, or flushes whatever was committed before a
/// swallowed error.
async fn serve_request(
    req: hyper::Request<Incoming>,
    config: &Config,
    dispatcher: &Dispatcher,
) -> Result<hyper::Response<Full<Bytes>>, Infallible> {
    let mut request = framework_request(&req);
    let mut response = Response::new();

    let handled = dispatcher.handle(&mut request, &mut response);
    let status = response.status_code();

    if handled {
        if config.logging.access_log {
            logger::log_access(request.method(), request.uri(), status);
        }
        response.mark_committed();
        return Ok(response.into_hyper(&config.http.server_name));
    }

    if response.is_committed() {
        // Error swallowed after commit: flush what the client already has.
        return Ok(response.into_hyper(&config.http.server_name));
    }

    serve_static(config, &request).await
}

async fn serve_static(
    config: &Config,
    request: &Request,
) -> Result<hyper::Response<Full<Bytes>>, Infallible> {
    match static_files::load(&config.resources.static_dir, request.path()).await {
        Some((content, content_type)) => {
            if config.logging.access_log {
                logger::log_access(request.method(), request.uri(), 200);
            }
            Ok(static_files::build_response(&content, content_type))
        }
        None => Ok(static_files::build_404_response()),
    }
}

/// Build the framework request context from the raw transport request.
fn framework_request(req: &hyper::Request<Incoming>) -> Request {
    let uri = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string);
    let mut request = Request::new(req.method().clone(), uri);
    for (name, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            request.insert_header(name.as_str(), value);
        }
    }
    request
}
