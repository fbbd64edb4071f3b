//! # mica
//!
//! A lightweight MVC-style web framework. The heart of the crate is the
//! [`Dispatcher`]: for every inbound request it resolves the best-matching
//! route, runs the before/after interceptor chains around the target, and
//! converts any failure into a well-formed 404 or 500 page — exactly one
//! outcome per request, nothing escapes to the transport layer.
//!
//! ```no_run
//! use mica::{App, DispatchError, Request, Response, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = App::new()
//!         .static_prefix("/static")
//!         .before("/admin/*", |req: &mut Request, _resp: &mut Response|
//!             -> Result<(), DispatchError> {
//!             req.set_attribute("audited", "true");
//!             Ok(())
//!         })
//!         .get("/user/:id", |req: &mut Request, resp: &mut Response|
//!             -> Result<(), DispatchError> {
//!             let id = req.path_param("id").unwrap_or("?").to_string();
//!             resp.html(format!("<h1>user {id}</h1>"));
//!             Ok(())
//!         });
//!
//!     Server::new(app).run().await
//! }
//! ```

pub mod app;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod logger;
pub mod render;
pub mod router;
pub mod server;

pub use app::App;
pub use config::Config;
pub use context::{DispatchContext, Request, Response};
pub use dispatch::args::{Arg, ParamKind};
pub use dispatch::Dispatcher;
pub use error::DispatchError;
pub use render::{TemplateRenderer, ViewRenderer};
pub use router::route::{Handler, MethodTarget, Route, RouteKind, Target};
pub use server::Server;

/// Framework version, stamped into the synthesized error pages.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
