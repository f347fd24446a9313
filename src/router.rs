//! Request router.
//!
//! One radix tree per HTTP method for exact method + path routes, plus prefix
//! mounts that hand the remainder of the path to a single handler (used for
//! static content under `/app/`). Lookup order:
//!
//! 1. exact route for this method
//! 2. first mount whose prefix owns the path, with the prefix stripped
//! 3. `405 Method Not Allowed` if another method has the exact route
//! 4. `404 Not Found`

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    mounts: Vec<(String, BoxedHandler)>,
}

pub(crate) enum Lookup {
    Found {
        handler: BoxedHandler,
        stripped: Option<String>,
    },
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), mounts: Vec::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// ```rust
    /// # use chirpy::{Method, Request, Response, Router};
    /// # async fn healthz(_: Request) -> Response { Response::text("OK") }
    /// # async fn validate(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,  "/api/healthz",        healthz)
    ///     .on(Method::Post, "/api/validate_chirp", validate);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with an existing one.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Hand every request under `prefix/` to `handler`, for any method, with
    /// `prefix` removed from the path the handler sees. `/app/index.html`
    /// mounted at `/app` arrives as `/index.html`.
    ///
    /// # Panics
    ///
    /// Panics if `prefix` does not start with `/`.
    pub fn mount(mut self, prefix: &str, handler: impl Handler) -> Self {
        assert!(prefix.starts_with('/'), "mount prefix `{prefix}` must start with `/`");
        let prefix = prefix.trim_end_matches('/').to_owned();
        self.mounts.push((prefix, handler.into_boxed_handler()));
        self
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Lookup {
        if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
            return Lookup::Found { handler: Arc::clone(matched.value), stripped: None };
        }

        for (prefix, handler) in &self.mounts {
            if let Some(rest) = path.strip_prefix(prefix.as_str()).filter(|r| r.starts_with('/')) {
                return Lookup::Found {
                    handler: Arc::clone(handler),
                    stripped: Some(rest.to_owned()),
                };
            }
        }

        let allowed: Vec<Method> = Method::ALL.into_iter()
            .filter(|m| self.routes.get(m).is_some_and(|tree| tree.at(path).is_ok()))
            .collect();
        if allowed.is_empty() { Lookup::NotFound } else { Lookup::MethodNotAllowed(allowed) }
    }

    /// Routes one request and produces one response.
    pub async fn route(&self, mut req: Request) -> Response {
        match self.lookup(req.method, &req.path) {
            Lookup::Found { handler, stripped } => {
                if let Some(path) = stripped {
                    req.path = path;
                }
                handler.call(req).await
            }
            Lookup::MethodNotAllowed(allowed) => {
                let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
                Response::builder()
                    .status(Status::MethodNotAllowed)
                    .header("allow", &allow)
                    .no_body()
            }
            Lookup::NotFound => Response::status(Status::NotFound),
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(method: Method, path: &str) -> Request {
        Request::new(method, path.to_owned(), Vec::new(), Vec::new())
    }

    async fn echo_path(req: Request) -> Response {
        Response::text(req.path().to_owned())
    }

    async fn ok(_req: Request) -> Response {
        Response::text("OK")
    }

    fn router() -> Router {
        Router::new()
            .on(Method::Get, "/api/healthz", ok)
            .on(Method::Post, "/admin/reset", ok)
            .mount("/app", echo_path)
    }

    #[tokio::test]
    async fn exact_route_matches() {
        let res = router().route(req(Method::Get, "/api/healthz")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"OK");
    }

    #[tokio::test]
    async fn mount_strips_prefix() {
        let res = router().route(req(Method::Get, "/app/assets/logo.png")).await;
        assert_eq!(res.body(), b"/assets/logo.png");

        let res = router().route(req(Method::Get, "/app/")).await;
        assert_eq!(res.body(), b"/");
    }

    #[tokio::test]
    async fn exact_routes_see_the_full_path() {
        let app = Router::new().on(Method::Get, "/api/healthz", echo_path);
        let res = app.route(req(Method::Get, "/api/healthz")).await;
        assert_eq!(res.body(), b"/api/healthz");
    }

    #[tokio::test]
    async fn mount_does_not_claim_sibling_paths() {
        let res = router().route(req(Method::Get, "/application")).await;
        assert_eq!(res.status_code(), 404);
    }

    #[tokio::test]
    async fn wrong_method_is_405_with_allow() {
        let res = router().route(req(Method::Get, "/admin/reset")).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.header("allow"), Some("POST"));
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let res = router().route(req(Method::Get, "/nope")).await;
        assert_eq!(res.status_code(), 404);
        assert!(res.body().is_empty());
    }

    #[test]
    #[should_panic(expected = "must start with")]
    fn relative_mount_prefix_panics() {
        let _ = Router::new().mount("app", ok);
    }
}
