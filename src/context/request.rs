use crate::router::pattern::PathPattern;
use hyper::Method;
use std::collections::HashMap;

/// Framework-level request context.
///
/// Created once per inbound request from the raw transport request. Path
/// parameters start empty and are (re)populated from the matched route's
/// pattern immediately before each target invocation.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: String,
    path: String,
    query: Option<String>,
    headers: HashMap<String, String>,
    path_params: HashMap<String, String>,
    attributes: HashMap<String, String>,
}

impl Request {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (uri.clone(), None),
        };
        Self {
            method,
            uri,
            path,
            query,
            headers: HashMap::new(),
            path_params: HashMap::new(),
            attributes: HashMap::new(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Full request URI including the query string, as received.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Header lookup by lowercased name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn insert_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_lowercase(), value.into());
    }

    /// Path parameter captured from the matched route pattern, e.g. `id`
    /// for a route `/user/:id` matched against `/user/42`.
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    pub fn path_params(&self) -> &HashMap<String, String> {
        &self.path_params
    }

    /// Replaces the current path parameters with the captures of `pattern`
    /// against this request's path. Called immediately before every target
    /// invocation so the bindings are always those of the target about to
    /// execute.
    pub(crate) fn populate_path_params(&mut self, pattern: &PathPattern) {
        self.path_params = pattern.capture(&self.path).unwrap_or_default();
    }

    /// Request-scoped attribute, visible to later interceptors and the
    /// main handler of the same request only.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }
}
