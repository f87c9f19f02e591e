//! Order and stop identifiers.
//!
//! The two id spaces are disjoint: an `OrderId` and a `StopId` with the
//! same numeric value do not refer to the same thing. Each is backed by
//! its own monotonic counter so ids are never reused within their
//! namespace, per `spec.md` §3/§6.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier for a regular (Limit/Market/FOK/IOC, or triggered) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O#{}", self.0)
    }
}

/// Identifier for an armed stop/stop-limit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct StopId(pub u64);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S#{}", self.0)
    }
}

/// Monotonic id generator. Starts at 1 so `0` can be used as a sentinel
/// by callers that want one; the engine itself never relies on that.
#[derive(Debug, Default)]
pub struct IdCounter(AtomicU64);

impl IdCounter {
    pub const fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    /// Returns the next value in the sequence. Never returns the same
    /// value twice for the lifetime of this counter.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}
