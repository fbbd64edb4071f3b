use http_body_util::Full;
use hyper::body::Bytes;

use crate::logger;

/// Framework-level response context.
///
/// Body and status are buffered until the transport flushes them; the
/// committed flag records that bytes have reached the wire, after which no
/// further body may be written (the dispatcher's error path checks it before
/// appending an error page).
#[derive(Debug, Default)]
pub struct Response {
    status: Option<u16>,
    content_type: Option<String>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    committed: bool,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&mut self, code: u16) {
        self.status = Some(code);
    }

    /// Effective status code; an unset status means 200.
    pub fn status_code(&self) -> u16 {
        self.status.unwrap_or(200)
    }

    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Write an HTML body, replacing any previous body.
    pub fn html(&mut self, body: impl Into<String>) {
        self.content_type = Some("text/html; charset=utf-8".to_string());
        self.body = body.into().into_bytes();
    }

    /// Write a plain-text body, replacing any previous body.
    pub fn text(&mut self, body: impl Into<String>) {
        self.content_type = Some("text/plain; charset=utf-8".to_string());
        self.body = body.into().into_bytes();
    }

    pub fn redirect(&mut self, target: &str) {
        self.status = Some(302);
        self.header("Location", target);
        self.text("Redirecting...");
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// True once response bytes have begun transmission.
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Marks the response as flushed. The transport calls this right before
    /// writing; a handler that streams early may call it itself.
    pub fn mark_committed(&mut self) {
        self.committed = true;
    }

    /// Convert into the transport-level response.
    pub fn into_hyper(self, server_name: &str) -> hyper::Response<Full<Bytes>> {
        let mut builder = hyper::Response::builder()
            .status(self.status_code())
            .header("Server", server_name)
            .header(
                "Content-Type",
                self.content_type
                    .as_deref()
                    .unwrap_or("text/html; charset=utf-8"),
            );
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
            .body(Full::new(Bytes::from(self.body)))
            .unwrap_or_else(|e| {
                logger::log_error(&format!("Failed to build response: {e}"));
                hyper::Response::new(Full::new(Bytes::new()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_200() {
        let resp = Response::new();
        assert_eq!(resp.status_code(), 200);
    }

    #[test]
    fn test_html_sets_content_type_and_body() {
        let mut resp = Response::new();
        resp.html("<h1>hi</h1>");
        assert_eq!(resp.content_type(), Some("text/html; charset=utf-8"));
        assert_eq!(resp.body(), b"<h1>hi</h1>");
    }

    #[test]
    fn test_body_replaced_not_appended() {
        let mut resp = Response::new();
        resp.text("first");
        resp.text("second");
        assert_eq!(resp.body(), b"second");
    }

    #[test]
    fn test_committed_flag() {
        let mut resp = Response::new();
        assert!(!resp.is_committed());
        resp.mark_committed();
        assert!(resp.is_committed());
    }

    #[test]
    fn test_redirect() {
        let mut resp = Response::new();
        resp.redirect("/login");
        assert_eq!(resp.status_code(), 302);
        let hyper_resp = resp.into_hyper("mica-test");
        assert_eq!(hyper_resp.headers().get("Location").unwrap(), "/login");
    }

    #[test]
    fn test_into_hyper_carries_status_and_server() {
        let mut resp = Response::new();
        resp.status(404);
        resp.html("missing");
        let hyper_resp = resp.into_hyper("mica-test");
        assert_eq!(hyper_resp.status(), 404);
        assert_eq!(hyper_resp.headers().get("Server").unwrap(), "mica-test");
    }
}
