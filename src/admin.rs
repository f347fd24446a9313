//! `/admin/*` handlers: the hit-count dashboard and the dev-only reset.

use std::sync::Arc;

use tracing::info;

use crate::api::ApiError;
use crate::app::AppState;
use crate::request::Request;
use crate::response::Response;

/// Renders the admin dashboard for `hits` visits.
pub fn render_metrics(hits: i32) -> String {
    format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    \
         <p>Chirpy has been visited {hits} times!</p>\n  </body>\n</html>\n"
    )
}

/// `GET /admin/metrics`. Reads the counter without resetting it.
pub async fn metrics(state: Arc<AppState>, _req: Request) -> Response {
    Response::html(render_metrics(state.hits.read()))
}

/// `POST /admin/reset`. Dev only: deletes every user, then swaps the hit
/// counter to zero and reports the count it held.
pub async fn reset(state: Arc<AppState>, _req: Request) -> Result<Response, ApiError> {
    if !state.config.is_dev() {
        return Err(ApiError::Forbidden);
    }
    state.users.delete_all_users().await
        .map_err(|source| ApiError::Dependency { message: "server error", source })?;

    let hits = state.hits.read_and_reset();
    info!(hits, "hit counter reset");
    Ok(Response::text(format!("Hits: {hits}")))
}
