//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use chirpy::{Response, Status};
//!
//! Response::status(Status::Forbidden);
//!
//! Response::builder()
//!     .status(Status::Created)
//!     .header("location", "/api/users/42")
//!     .json(br#"{"id":"42"}"#.to_vec());
//! ```

/// The status codes this service answers with.
#[allow(clippy::enum_variant_names)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                            // 200
    Created,                       // 201

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,                    // 400
    Forbidden,                     // 403
    NotFound,                      // 404
    MethodNotAllowed,              // 405
    ContentTooLarge,               // 413

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,           // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::Created             => 201,
            Status::BadRequest          => 400,
            Status::Forbidden           => 403,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::ContentTooLarge     => 413,
            Status::InternalServerError => 500,
        }
    }
}
