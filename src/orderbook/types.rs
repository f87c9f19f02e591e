//! Shared value types: sides, order kinds, stop modes, and the tagged
//! submit request from `spec.md` §6.

use crate::orderbook::ids::{OrderId, StopId};
use std::fmt;

/// Canonical price representation. `spec.md`'s boundary scenarios are
/// all given in plain integers (100, 101, 102, ...); this crate does
/// not introduce fixed-point or floating-point prices.
pub type Price = u64;

/// Canonical quantity representation.
pub type Qty = u64;

/// Which side of the book an order or stop belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side a taker on `self` matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// The order type, carrying the data a given type needs. This is the
/// type tag `spec.md` §3 assigns to every `Order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum OrderKind {
    Limit,
    Market,
    Fok,
    Ioc,
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Limit => write!(f, "limit"),
            OrderKind::Market => write!(f, "market"),
            OrderKind::Fok => write!(f, "fok"),
            OrderKind::Ioc => write!(f, "ioc"),
        }
    }
}

/// What a triggered stop becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum StopMode {
    /// Triggers into a `Market` order.
    TriggerMarket,
    /// Triggers into a `Limit` order at `limit_price`.
    TriggerLimit { limit_price: Price },
}

/// Why a `Cancelled` event was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum CancelReason {
    /// FOK could not be filled in full; no state change occurred.
    InsufficientLiquidity,
    /// IOC had no match, or had a non-zero remainder after one matching
    /// pass.
    NoMatch,
    /// A Market order's remaining quantity was cancelled because the
    /// opposing book ran dry before it was exhausted. Distinct from
    /// `NoMatch`: some quantity may already have traded (`spec.md`
    /// §4.4 calls this out by name — "no rejection of the
    /// already-executed fills").
    PartialMarketCancel,
    /// An explicit `Cancel{OrderId | StopId}` request.
    Requested,
}

/// Why a `Rejected` event was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RejectReason {
    /// Malformed input: non-positive price/quantity, unknown side/mode.
    InvalidRequest,
    /// Market order submitted against an empty opposing book.
    NoLiquidity,
}

/// A tagged inbound submission, per `spec.md` §6's Submit API table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRequest {
    Limit { side: Side, price: Price, qty: Qty },
    Market { side: Side, qty: Qty },
    Fok { side: Side, price: Price, qty: Qty },
    Ioc { side: Side, price: Price, qty: Qty },
    Stop { side: Side, stop_price: Price, qty: Qty, mode: StopMode },
}

/// The id a `Cancel` request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelTarget {
    Order(OrderId),
    Stop(StopId),
}
