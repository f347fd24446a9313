//! Liveness check.
//!
//! If the process can answer HTTP at all it is alive, so the handler has no
//! dependencies and does not touch the hit counter:
//!
//! ```rust
//! use chirpy::{Method, Router, health};
//!
//! let app = Router::new().on(Method::Get, "/api/healthz", health::liveness);
//! ```

use crate::{Request, Response};

/// Always `200 OK` with the plain-text body `OK`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("OK")
}
