use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter used to drop responses from fetches that were superseded by a newer one.
#[derive(Debug, Default)]
pub struct FetchGeneration(AtomicU64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchGeneration {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Starts a fetch; any ticket handed out earlier becomes stale.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Marks every outstanding ticket stale without starting a fetch.
    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.0.load(Ordering::SeqCst) == ticket.0
    }
}
