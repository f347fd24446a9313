//! Process-wide hit counter and the middleware that feeds it.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::handler::Handler;
use crate::request::Request;

/// Lock-free count of requests routed through [`count_hits`].
///
/// Every mutation is a single atomic instruction, so concurrent increments
/// are never lost and a reset never tears with an increment. The value
/// saturates at `i32::MAX` and is never negative.
#[derive(Debug, Default)]
pub struct HitCounter {
    hits: AtomicI32,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one hit.
    pub fn increment(&self) {
        // fetch_update never fails when the closure always returns Some.
        let _ = self.hits.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
            Some(n.saturating_add(1))
        });
    }

    /// Current count, without resetting it.
    pub fn read(&self) -> i32 {
        self.hits.load(Ordering::Acquire)
    }

    /// Swaps the count to zero and returns the value it held.
    pub fn read_and_reset(&self) -> i32 {
        self.hits.swap(0, Ordering::AcqRel)
    }
}

/// Wraps `inner` so each request counts one hit before `inner` runs.
///
/// The hit is recorded whatever `inner` answers: the count reflects
/// attempts, not successes.
pub fn count_hits(hits: Arc<HitCounter>, inner: impl Handler) -> impl Handler {
    let inner = inner.into_boxed_handler();
    move |req: Request| {
        hits.increment();
        inner.call(req)
    }
}
