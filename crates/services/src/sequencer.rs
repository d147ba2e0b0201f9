use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket for one fetch issued by a [`FetchSequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Hands out monotonically increasing fetch tickets so only the most
/// recently issued fetch may publish its result.
///
/// Selections can change faster than the backend answers; a late response
/// for an old selection must never overwrite the current one.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    latest: AtomicU64,
}

impl FetchSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Issue a new ticket, superseding every ticket issued before it.
    #[must_use]
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the most recently issued one.
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
