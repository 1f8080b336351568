//! Timeouts for suspending operations
//!
//! Every operation that may wait takes a [`Timeout`]. The integer convention
//! used on the wire-facing API (`-1` waits forever, `0` does not wait, any
//! positive value is a number of milliseconds) maps onto it through
//! [`Timeout::from_millis`].

use std::future::Future;
use std::time::{Duration, Instant};

/// How long an operation may wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Single non-blocking attempt
    Immediate,
    /// Wait up to the given duration
    After(Duration),
    /// Wait until the operation completes
    Infinite,
}

impl Timeout {
    /// Convert from milliseconds (negative = infinite, zero = immediate)
    pub fn from_millis(ms: i64) -> Self {
        match ms {
            ms if ms < 0 => Timeout::Infinite,
            0 => Timeout::Immediate,
            ms => Timeout::After(Duration::from_millis(ms as u64)),
        }
    }

    /// Run a future under this timeout
    ///
    /// Returns `None` if the future did not complete in time. With
    /// `Immediate` the future is polled exactly once.
    pub(crate) async fn run<F: Future>(self, fut: F) -> Option<F::Output> {
        match self {
            Timeout::Immediate => tokio::time::timeout(Duration::ZERO, fut).await.ok(),
            Timeout::After(d) => tokio::time::timeout(d, fut).await.ok(),
            Timeout::Infinite => Some(fut.await),
        }
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout::Immediate
    }
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        if d.is_zero() {
            Timeout::Immediate
        } else {
            Timeout::After(d)
        }
    }
}

/// A timeout anchored at the moment an operation started
///
/// Used by loops that poll repeatedly and must spend only the remaining
/// budget on each attempt.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    timeout: Timeout,
    at: Option<Instant>,
}

impl Deadline {
    pub(crate) fn start(timeout: Timeout) -> Self {
        let at = match timeout {
            Timeout::After(d) => Instant::now().checked_add(d),
            _ => None,
        };
        Self { timeout, at }
    }

    /// Budget left for the next attempt
    pub(crate) fn remaining(&self) -> Timeout {
        match (self.timeout, self.at) {
            (Timeout::After(_), Some(at)) => {
                Timeout::from(at.saturating_duration_since(Instant::now()))
            }
            // Overflowed deadline, treat as unbounded
            (Timeout::After(_), None) => Timeout::Infinite,
            (other, _) => other,
        }
    }

    /// Whether another attempt is allowed
    ///
    /// `Immediate` deadlines are always expired after the first attempt.
    pub(crate) fn expired(&self) -> bool {
        match (self.timeout, self.at) {
            (Timeout::Immediate, _) => true,
            (Timeout::After(_), Some(at)) => Instant::now() >= at,
            _ => false,
        }
    }
}
