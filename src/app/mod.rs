//! Application state and the route table.

use std::future::Future;
use std::sync::Arc;

use crate::assets::StaticFiles;
use crate::config::Config;
use crate::handler::Handler;
use crate::middleware::{HitCounter, count_hits};
use crate::method::Method;
use crate::request::Request;
use crate::response::IntoResponse;
use crate::router::Router;
use crate::store::{MemoryUserStore, UserStore};
use crate::{admin, api, health};

/// Prefix under which static content is served and counted.
pub const APP_PREFIX: &str = "/app";

/// Shared by every request for the life of the process.
pub struct AppState {
    pub config: Config,
    pub hits: Arc<HitCounter>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(config: Config, users: Arc<dyn UserStore>) -> Self {
        Self { config, hits: Arc::new(HitCounter::new()), users }
    }

    /// State backed by the in-memory user store.
    pub fn in_memory(config: Config) -> Self {
        Self::new(config, Arc::new(MemoryUserStore::new()))
    }
}

/// Builds the full route table.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | any | `/app/*` | static files, counted |
/// | GET | `/api/healthz` | liveness |
/// | POST | `/api/validate_chirp` | chirp validation |
/// | POST | `/api/users` | user creation |
/// | GET | `/admin/metrics` | hit-count dashboard |
/// | POST | `/admin/reset` | dev-only reset |
pub fn router(state: Arc<AppState>) -> Router {
    let files = StaticFiles::new(state.config.filepath_root.clone());

    Router::new()
        .mount(APP_PREFIX, count_hits(Arc::clone(&state.hits), files.into_handler()))
        .on(Method::Get,  "/api/healthz",        health::liveness)
        .on(Method::Post, "/api/validate_chirp", api::validate_chirp)
        .on(Method::Post, "/api/users",          with_state(&state, api::create_user))
        .on(Method::Get,  "/admin/metrics",      with_state(&state, admin::metrics))
        .on(Method::Post, "/admin/reset",        with_state(&state, admin::reset))
}

/// Adapts a `(state, request)` handler to the single-argument [`Handler`] shape.
fn with_state<F, Fut, R>(state: &Arc<AppState>, f: F) -> impl Handler + use<F, Fut, R>
where
    F: Fn(Arc<AppState>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    let state = Arc::clone(state);
    move |req: Request| f(Arc::clone(&state), req)
}
