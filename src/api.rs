//! `/api/*` handlers and the error taxonomy every handler answers with.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::app::AppState;
use crate::chirp::{ChirpSubmission, Rejection};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response, json_error};
use crate::status::Status;
use crate::store::StoreError;

/// Failures surfaced at the handler boundary. Each variant maps to exactly
/// one status; parse and store details are logged, never sent.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Something went wrong")]
    MalformedInput(#[source] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("forbidden")]
    Forbidden,

    #[error("{message}")]
    Dependency {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl From<Rejection> for ApiError {
    fn from(r: Rejection) -> Self {
        Self::Validation(r.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::MalformedInput(_) => Status::InternalServerError,
            Self::Validation(_) => Status::BadRequest,
            Self::Forbidden => Status::Forbidden,
            Self::Dependency { .. } => Status::InternalServerError,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::MalformedInput(e) => warn!("malformed request body: {e}"),
            Self::Dependency { source, .. } => error!("{self}: {source}"),
            Self::Validation(_) | Self::Forbidden => {}
        }
        match self {
            Self::Forbidden => Response::status(Status::Forbidden),
            other => json_error(other.status(), &other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct CleanedChirp {
    cleaned_body: String,
}

/// `POST /api/validate_chirp`
pub async fn validate_chirp(req: Request) -> Result<Json<impl Serialize>, ApiError> {
    let submission: ChirpSubmission = req.json().map_err(ApiError::MalformedInput)?;
    let cleaned_body = submission.validate().into_result()?;
    Ok(Json::ok(CleanedChirp { cleaned_body }))
}

#[derive(Debug, Deserialize)]
struct CreateUser {
    email: String,
}

/// `POST /api/users`
pub async fn create_user(state: Arc<AppState>, req: Request) -> Result<Json<impl Serialize>, ApiError> {
    let input: CreateUser = req.json().map_err(ApiError::MalformedInput)?;
    let user = state.users.create_user(&input.email).await.map_err(|e| match e {
        StoreError::InvalidEmail => ApiError::Validation(e.to_string()),
        source => ApiError::Dependency { message: "user could not be created", source },
    })?;
    Ok(Json::new(Status::Created, user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        let malformed = serde_json::from_str::<CreateUser>("{").unwrap_err();
        assert_eq!(ApiError::MalformedInput(malformed).status(), Status::InternalServerError);
        assert_eq!(ApiError::from(Rejection::TooLong).status(), Status::BadRequest);
        assert_eq!(ApiError::Forbidden.status(), Status::Forbidden);
        let dep = ApiError::Dependency {
            message: "server error",
            source: StoreError::Unavailable("connection refused".into()),
        };
        assert_eq!(dep.status(), Status::InternalServerError);
    }

    #[test]
    fn dependency_details_are_not_leaked() {
        let res = ApiError::Dependency {
            message: "server error",
            source: StoreError::Unavailable("password=hunter2".into()),
        }
        .into_response();
        assert_eq!(res.body(), br#"{"error":"server error"}"#);
    }

    #[test]
    fn forbidden_has_no_body() {
        let res = ApiError::Forbidden.into_response();
        assert_eq!(res.status_code(), 403);
        assert!(res.body().is_empty());
    }
}
