//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler. The review route table itself lives in [`crate::routes`].

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are read with `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an earlier route for
    /// the same method. Route tables are static, so this fires at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    fn lookup(&self, method: Method, path: &str) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one fully-read request and produces its response.
    ///
    /// Unknown methods get `405`, unmatched paths `404`, both with no body.
    pub async fn call(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();
        let Ok(method) = Method::try_from(&parts.method) else {
            return Response::status(StatusCode::METHOD_NOT_ALLOWED);
        };
        match self.lookup(method, parts.uri.path()) {
            Some((handler, params)) => handler.call(Request::new(body, params)).await,
            None => Response::status(StatusCode::NOT_FOUND),
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
