//! Routing module
//!
//! Provides route storage and lookup for the dispatcher:
//! - Path patterns with named parameters (`/user/:id`) and trailing wildcards
//! - Best-match route lookup by method and path
//! - Before/after interceptor selection in registration order

pub mod matcher;
pub mod pattern;
pub mod route;

pub use matcher::RouteMatcher;
pub use pattern::PathPattern;
pub use route::{Handler, MethodTarget, Route, RouteKind, Target};
