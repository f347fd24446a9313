//! # chirpy
//!
//! A small HTTP API for a short-form posting demo. It validates and
//! sanitises chirps, counts hits on its static front end, and exposes a few
//! admin endpoints.
//!
//! ## Request pipeline
//!
//! - [`chirp`]: length check (400 bytes) and whole-word profanity masking
//! - [`middleware`]: lock-free [`HitCounter`](middleware::HitCounter) fed by
//!   every request under `/app/`
//! - [`Router`]: exact method + path routes, one stripped prefix mount
//!
//! Underneath sits a minimal hyper layer: typed [`Method`] and [`Status`],
//! sealed [`Handler`] erasure, graceful shutdown on SIGTERM / Ctrl-C.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chirpy::app::{self, AppState};
//! use chirpy::{Config, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), chirpy::Error> {
//!     let config = Config::default();
//!     let addr = config.socket_addr();
//!     let state = Arc::new(AppState::in_memory(config));
//!
//!     Server::bind(addr).serve(app::router(state)).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod admin;
pub mod api;
pub mod app;
pub mod assets;
pub mod chirp;
pub mod config;
pub mod health;
pub mod middleware;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder, json_error};
pub use router::Router;
pub use server::{DEFAULT_MAX_BODY_BYTES, Server};
pub use status::Status;
