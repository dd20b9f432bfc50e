//! Cooperative cancellation for long-running grid searches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation flag shared between a search and whoever started it.
///
/// Clones observe the same flag. A search polls [`is_done`](Self::is_done)
/// between units of work and gives up once it turns `true`; cancelling is
/// permanent.
#[derive(Clone, Debug, Default)]
pub struct Context {
    cancelled: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Ask every holder of this context to stop.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}
