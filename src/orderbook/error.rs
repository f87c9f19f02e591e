//! Order book error taxonomy. See `spec.md` §7.

use crate::orderbook::ids::{OrderId, StopId};
use crate::orderbook::types::Side;

/// Errors that can occur while submitting or cancelling against the
/// engine. All of these are recoverable and surface synchronously at
/// the submit/cancel call site. The `Internal` class from `spec.md` §7
/// ("violated invariant... fatal: abort the process") is deliberately
/// not a variant here — those are raised via [`internal_error`], which
/// panics, since they are bugs to surface loudly, not `Result`s for a
/// caller to branch on.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OrderBookError {
    /// Malformed input: non-positive price/quantity, unknown side, or
    /// unrecognized stop mode. No state change occurs.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Human-readable description of what failed validation.
        message: String,
    },

    /// A market order was submitted against an empty opposing book.
    #[error("no liquidity available on the {side} side for a market order")]
    NoLiquidity {
        /// The side of the book that was found empty (the side a taker
        /// of `side` would have matched against).
        side: Side,
    },

    /// Cancel of an id that is not currently live.
    #[error("not found: {0:?}")]
    NotFound(CancelledId),
}

/// Which id space a `NotFound` cancel referred to, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelledId {
    Order(OrderId),
    Stop(StopId),
}

/// Raises an `Internal` failure per `spec.md` §7: "violated invariant...
/// must never occur in correct code and are worth a hard abort to aid
/// debugging." Used for things like a negative remaining quantity, an
/// empty level retained past a match, or an FOK probe/execute
/// discrepancy.
#[track_caller]
pub fn internal_error(message: &str) -> ! {
    panic!("limit-engine internal invariant violated: {message}");
}
