//! Unified infrastructure error type.

use thiserror::Error;

/// The error type returned by chirpy's fallible server operations.
///
/// Application-level failures (400, 403, 500 and friends) are expressed as
/// HTTP [`Response`](crate::Response) values, see [`ApiError`](crate::api::ApiError).
/// This type surfaces infrastructure failures: binding to a port, configuring
/// the listener.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_io() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken"));
        assert_eq!(err.to_string(), "io: port taken");
    }

    #[test]
    fn source_is_the_io_error() {
        use std::error::Error as _;
        let err = Error::from(std::io::Error::other("boom"));
        assert!(err.source().is_some());
    }
}
