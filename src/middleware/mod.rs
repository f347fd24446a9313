//! Middleware layer.
//!
//! Middleware wraps a [`Handler`](crate::Handler) in another handler and is
//! the place for cross-cutting concerns. The only one this service needs is
//! hit counting for static content: see [`count_hits`] and [`HitCounter`].

mod hits;

pub use hits::{HitCounter, count_hits};
