//! Path pattern parsing and matching.
//!
//! A pattern is a `/`-separated sequence of segments, each either a literal,
//! a named parameter (`:name`) or a trailing wildcard (`*`). The wildcard
//! matches zero or more remaining segments and is only meaningful as the
//! last segment; interceptors use it to cover whole subtrees.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Wildcard,
}

#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|seg| {
                if seg == "*" {
                    Segment::Wildcard
                } else if let Some(name) = seg.strip_prefix(':') {
                    Segment::Param(name.to_string())
                } else {
                    Segment::Literal(seg.to_string())
                }
            })
            .collect();
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    /// The pattern as registered.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Number of non-literal segments. Used by the matcher to prefer more
    /// specific routes: an exact pattern scores 0 and beats `/user/:id`.
    pub fn dynamic_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| !matches!(s, Segment::Literal(_)))
            .count()
    }

    pub fn matches(&self, path: &str) -> bool {
        self.walk(path, None)
    }

    /// Named-parameter captures for `path`, or `None` if it does not match.
    pub fn capture(&self, path: &str) -> Option<HashMap<String, String>> {
        let mut params = HashMap::new();
        if self.walk(path, Some(&mut params)) {
            Some(params)
        } else {
            None
        }
    }

    fn walk(&self, path: &str, mut params: Option<&mut HashMap<String, String>>) -> bool {
        let mut path_segs = split(path);
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard if i == self.segments.len() - 1 => return true,
                Segment::Wildcard => {
                    // A non-trailing wildcard consumes exactly one segment.
                    if path_segs.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(lit) => match path_segs.next() {
                    Some(seg) if seg == lit => {}
                    _ => return false,
                },
                Segment::Param(name) => match path_segs.next() {
                    Some(seg) => {
                        if let Some(params) = params.as_deref_mut() {
                            params.insert(name.clone(), seg.to_string());
                        }
                    }
                    None => return false,
                },
            }
        }
        path_segs.next().is_none()
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
