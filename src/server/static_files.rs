//! Static file serving for paths the dispatcher declines.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

use crate::logger;

/// Load a static file from `static_dir`, or `None` when it does not exist
/// or escapes the directory.
pub(crate) async fn load(static_dir: &str, path: &str) -> Option<(Vec<u8>, &'static str)> {
    let relative = clean_path(path);
    let file_path = Path::new(static_dir).join(relative);

    // Containment check against directory traversal.
    let static_dir_canonical = Path::new(static_dir).canonicalize().ok()?;
    let file_path_canonical = file_path.canonicalize().ok()?;
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        return None;
    }

    let content = fs::read(&file_path_canonical).await.ok()?;
    let content_type = content_type_for(file_path_canonical.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Strip the leading slash and any parent-directory components.
fn clean_path(path: &str) -> String {
    path.trim_start_matches('/').replace("..", "")
}

/// Content-Type from the file extension.
fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

pub(crate) fn build_response(data: &[u8], content_type: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(Bytes::copy_from_slice(data)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build static file response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}

pub(crate) fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build 404 response: {e}"));
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path_strips_traversal() {
        assert_eq!(clean_path("/app.css"), "app.css");
        assert_eq!(clean_path("/../etc/passwd"), "/etc/passwd");
        assert_eq!(clean_path("/a/../../b"), "a//b");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Some("html")), "text/html; charset=utf-8");
        assert_eq!(content_type_for(Some("css")), "text/css");
        assert_eq!(content_type_for(Some("bin")), "application/octet-stream");
        assert_eq!(content_type_for(None), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        assert!(load("static-dir-that-does-not-exist", "/x.css").await.is_none());
    }

    #[tokio::test]
    async fn test_load_serves_file_within_dir() {
        let dir = std::env::temp_dir().join(format!("mica-static-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("site.css"), "body{}").unwrap();

        let (content, content_type) = load(dir.to_str().unwrap(), "/site.css").await.unwrap();
        assert_eq!(content, b"body{}");
        assert_eq!(content_type, "text/css");
    }
}
