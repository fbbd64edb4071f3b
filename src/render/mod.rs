//! View rendering collaborator.
//!
//! The dispatch core only needs a renderer for the configurable 404 view;
//! [`TemplateRenderer`] is the default implementation: it loads
//! `<template_dir>/<view>.html` and substitutes `{{name}}` variables.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::context::Response;
use crate::error::DispatchError;

/// Renders a named view with a set of template variables into the response.
pub trait ViewRenderer: Send + Sync + 'static {
    fn render(
        &self,
        view: &str,
        vars: &HashMap<String, String>,
        response: &mut Response,
    ) -> Result<(), DispatchError>;
}

/// File-based renderer with `{{name}}` variable substitution.
pub struct TemplateRenderer {
    template_dir: PathBuf,
}

impl TemplateRenderer {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
        }
    }
}

impl ViewRenderer for TemplateRenderer {
    fn render(
        &self,
        view: &str,
        vars: &HashMap<String, String>,
        response: &mut Response,
    ) -> Result<(), DispatchError> {
        let path = self.template_dir.join(format!("{view}.html"));
        let mut html = fs::read_to_string(&path).map_err(|source| DispatchError::Render {
            view: view.to_string(),
            source,
        })?;
        for (name, value) in vars {
            html = html.replace(&format!("{{{{{name}}}}}"), value);
        }
        response.html(html);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_template_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mica-render-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_render_substitutes_variables() {
        let dir = temp_template_dir("vars");
        fs::write(dir.join("404.html"), "<p>missing: {{viewName}}</p>").unwrap();

        let renderer = TemplateRenderer::new(&dir);
        let mut vars = HashMap::new();
        vars.insert("viewName".to_string(), "/user/1".to_string());
        let mut resp = Response::new();
        renderer.render("404", &vars, &mut resp).unwrap();
        assert_eq!(resp.body(), b"<p>missing: /user/1</p>");
        assert_eq!(resp.content_type(), Some("text/html; charset=utf-8"));
    }

    #[test]
    fn test_render_missing_template_is_error() {
        let dir = temp_template_dir("missing");
        let renderer = TemplateRenderer::new(&dir);
        let err = renderer
            .render("nope", &HashMap::new(), &mut Response::new())
            .unwrap_err();
        assert!(matches!(err, DispatchError::Render { .. }));
    }

    #[test]
    fn test_unknown_variables_left_in_place() {
        let dir = temp_template_dir("unknown");
        fs::write(dir.join("v.html"), "{{known}} {{unknown}}").unwrap();

        let renderer = TemplateRenderer::new(&dir);
        let mut vars = HashMap::new();
        vars.insert("known".to_string(), "yes".to_string());
        let mut resp = Response::new();
        renderer.render("v", &vars, &mut resp).unwrap();
        assert_eq!(resp.body(), b"yes {{unknown}}");
    }
}
