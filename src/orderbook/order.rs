//! `Order` and `StopOrder`: the two owned entities in the engine.
//! See `spec.md` §3.

use crate::orderbook::error::OrderBookError;
use crate::orderbook::ids::{OrderId, StopId};
use crate::orderbook::types::{OrderKind, Price, Qty, Side, StopMode};

/// A live order: resting in a `PriceLevel`, mid-match as a taker, or
/// freshly triggered from a `StopOrder`. Created by `OrderRouter`,
/// mutated only by the `Matcher` (decrementing `remaining`), destroyed
/// when `remaining` reaches zero or policy cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub kind: OrderKind,
    /// Absent for `Market` orders.
    pub price: Option<Price>,
    pub original_qty: Qty,
    pub remaining: Qty,
}

impl Order {
    pub fn new(
        id: OrderId,
        side: Side,
        kind: OrderKind,
        price: Option<Price>,
        qty: Qty,
    ) -> Result<Self, OrderBookError> {
        validate_qty(qty)?;
        if let Some(p) = price {
            validate_price(p)?;
        } else if kind != OrderKind::Market {
            return Err(OrderBookError::InvalidRequest {
                message: format!("{kind} orders require a price"),
            });
        }
        Ok(Self {
            id,
            side,
            kind,
            price,
            original_qty: qty,
            remaining: qty,
        })
    }

    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }
}

/// An armed stop/stop-limit order. Armed at submission, destroyed when
/// triggered (it becomes a regular `Order`, see `OrderRouter::trigger`)
/// or explicitly cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopOrder {
    pub id: StopId,
    pub side: Side,
    pub stop_price: Price,
    pub qty: Qty,
    pub mode: StopMode,
}

impl StopOrder {
    pub fn new(
        id: StopId,
        side: Side,
        stop_price: Price,
        qty: Qty,
        mode: StopMode,
    ) -> Result<Self, OrderBookError> {
        validate_price(stop_price)?;
        validate_qty(qty)?;
        if let StopMode::TriggerLimit { limit_price } = mode {
            validate_price(limit_price)?;
        }
        Ok(Self {
            id,
            side,
            stop_price,
            qty,
            mode,
        })
    }

    /// True once `last_trade_price` satisfies this stop's arming rule:
    /// a Buy stop arms above the market, a Sell stop arms below.
    pub fn is_armed_by(&self, last_trade_price: Price) -> bool {
        match self.side {
            Side::Buy => last_trade_price >= self.stop_price,
            Side::Sell => last_trade_price <= self.stop_price,
        }
    }
}

pub(crate) fn validate_price(price: Price) -> Result<(), OrderBookError> {
    if price == 0 {
        return Err(OrderBookError::InvalidRequest {
            message: "price must be greater than 0".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn validate_qty(qty: Qty) -> Result<(), OrderBookError> {
    if qty == 0 {
        return Err(OrderBookError::InvalidRequest {
            message: "quantity must be greater than 0".to_string(),
        });
    }
    Ok(())
}
