//! Argument resolution for bound-method targets.
//!
//! The injectable types form a closed enumeration: a declared parameter is
//! either the request context, the response context, or unsupported. The
//! spec is fixed at registration time; [`resolve`] runs once per invocation,
//! immediately before the call, and produces the positional argument list.

use crate::context::{Request, Response};

/// Declared parameter kind of a bound method, resolved at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Request,
    Response,
    /// Any other declared type; resolves to an absent argument.
    None,
}

/// A resolved positional argument.
pub enum Arg<'a> {
    Request(&'a mut Request),
    Response(&'a mut Response),
    None,
}

/// Produce the positional argument list for one invocation.
///
/// Each context binds at most once: a duplicate declaration resolves to
/// [`Arg::None`], as does [`ParamKind::None`].
pub fn resolve<'a>(
    params: &[ParamKind],
    request: &'a mut Request,
    response: &'a mut Response,
) -> Vec<Arg<'a>> {
    let mut request = Some(request);
    let mut response = Some(response);
    params
        .iter()
        .map(|kind| match kind {
            ParamKind::Request => request.take().map_or(Arg::None, Arg::Request),
            ParamKind::Response => response.take().map_or(Arg::None, Arg::Response),
            ParamKind::None => Arg::None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Method;

    #[test]
    fn test_binds_by_position() {
        let mut req = Request::new(Method::GET, "/");
        let mut resp = Response::new();
        let args = resolve(
            &[ParamKind::Response, ParamKind::Request],
            &mut req,
            &mut resp,
        );
        assert_eq!(args.len(), 2);
        assert!(matches!(args[0], Arg::Response(_)));
        assert!(matches!(args[1], Arg::Request(_)));
    }

    #[test]
    fn test_unsupported_kind_is_absent() {
        let mut req = Request::new(Method::GET, "/");
        let mut resp = Response::new();
        let args = resolve(
            &[ParamKind::None, ParamKind::Request],
            &mut req,
            &mut resp,
        );
        assert!(matches!(args[0], Arg::None));
        assert!(matches!(args[1], Arg::Request(_)));
    }

    #[test]
    fn test_duplicate_context_binds_once() {
        let mut req = Request::new(Method::GET, "/");
        let mut resp = Response::new();
        let args = resolve(
            &[ParamKind::Request, ParamKind::Request],
            &mut req,
            &mut resp,
        );
        assert!(matches!(args[0], Arg::Request(_)));
        assert!(matches!(args[1], Arg::None));
    }

    #[test]
    fn test_empty_spec() {
        let mut req = Request::new(Method::GET, "/");
        let mut resp = Response::new();
        assert!(resolve(&[], &mut req, &mut resp).is_empty());
    }
}
