// lib/src/generation.rs

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use crate::errors::{PhrError, Result};

/// Issues monotonically increasing tickets for one view. Only the holder of
/// the newest ticket may publish its result; older in-flight requests are
/// left to finish but their results are thrown away.
#[derive(Debug, Default)]
pub struct Generation {
    latest: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Runs `load` under a ticket taken at call time, not at first poll, so
    /// overlapping loads are ordered by when they were issued. Yields
    /// [`PhrError::Stale`] when a newer ticket was issued before `load`
    /// resolved, whether it succeeded or failed.
    pub fn load_latest<'a, T, F>(&'a self, load: F) -> impl Future<Output = Result<T>> + 'a
    where
        F: Future<Output = Result<T>> + 'a,
        T: 'a,
    {
        let ticket = self.begin();
        async move {
            let result = load.await;
            if self.is_current(&ticket) {
                result
            } else {
                debug!("Discarding result of superseded request {}", ticket.0);
                Err(PhrError::Stale)
            }
        }
    }
}
