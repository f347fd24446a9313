//! Chirp validation and sanitisation.
//!
//! A chirp is accepted when its raw body is at most [`MAX_CHIRP_LEN`]
//! bytes long in UTF-8; accepted bodies have the profane words in
//! [`PROFANE_WORDS`] masked with [`PROFANITY_MASK`]. Nothing else is
//! inspected: no trimming, no escaping, no normalisation.

pub mod filter;

use std::sync::LazyLock;

use serde::Deserialize;
use thiserror::Error;

pub use filter::{WordFilter, filter};

/// Longest accepted chirp, in UTF-8 bytes of the raw body.
pub const MAX_CHIRP_LEN: usize = 400;

pub const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];
pub const PROFANITY_MASK: &str = "****";

static PROFANITY: LazyLock<WordFilter> =
    LazyLock::new(|| WordFilter::new(PROFANE_WORDS, PROFANITY_MASK));

/// Request body of `POST /api/validate_chirp`.
#[derive(Clone, Debug, Deserialize)]
pub struct ChirpSubmission {
    pub body: String,
}

/// Why a chirp was turned away.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum Rejection {
    #[error("Chirp is too long")]
    TooLong,
}

/// Outcome of [`validate`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ChirpValidation {
    Accepted { sanitized_body: String },
    Rejected { reason: Rejection },
}

impl ChirpValidation {
    pub fn into_result(self) -> Result<String, Rejection> {
        match self {
            Self::Accepted { sanitized_body } => Ok(sanitized_body),
            Self::Rejected { reason } => Err(reason),
        }
    }
}

/// Checks the length of `body` and masks profanity in it.
pub fn validate(body: &str) -> ChirpValidation {
    if body.len() > MAX_CHIRP_LEN {
        return ChirpValidation::Rejected { reason: Rejection::TooLong };
    }
    ChirpValidation::Accepted { sanitized_body: PROFANITY.apply(body) }
}

impl ChirpSubmission {
    pub fn validate(&self) -> ChirpValidation {
        validate(&self.body)
    }
}
