//! `OrderRouter`: validates inbound requests and applies each order
//! type's fill policy. See `spec.md` §4.4.
//!
//! Grounded on the teacher's `operations.rs` (one function per public
//! operation, each doing validation then delegating to the matching
//! core) and on `original_source/Order_Book.py`'s
//! `limit_order`/`market_order`/`fill_or_kill_order`/
//! `immediate_or_cancel_order`/`stop_order`/`stop_limit_order` methods,
//! whose per-type policies this reproduces minus the bugs `spec.md` §9
//! calls out (the Python FOK method there mutates the book before
//! checking available liquidity; this module probes first and only
//! touches the book once the probe has already promised a full fill).

use crate::orderbook::engine::EngineState;
use crate::orderbook::error::{internal_error, OrderBookError};
use crate::orderbook::event::Event;
use crate::orderbook::ids::{OrderId, StopId};
use crate::orderbook::order::{Order, StopOrder};
use crate::orderbook::trigger;
use crate::orderbook::types::{CancelReason, OrderKind, Price, Qty, RejectReason, Side, StopMode};
use tracing::{trace, warn};

/// What a successful submit produced: a live order id, or an armed
/// stop id. The caller's `EventSink` has already received whatever
/// happened (trades, resting, rejection) — this is only the handle a
/// caller uses for a subsequent `Cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAck {
    Order(OrderId),
    Stop(StopId),
}

pub fn submit_limit(
    engine: &mut EngineState,
    side: Side,
    price: Price,
    qty: Qty,
) -> Result<SubmitAck, OrderBookError> {
    trace!(%side, price, qty, "submitting limit order");
    let id = engine.next_order_id();
    let order = new_order_or_reject(engine, id, side, OrderKind::Limit, Some(price), qty)?;
    let remainder = accept_and_match(engine, order);
    if remainder.remaining > 0 {
        rest(engine, remainder);
    }
    trigger::run_trigger_loop(engine);
    Ok(SubmitAck::Order(id))
}

pub fn submit_market(
    engine: &mut EngineState,
    side: Side,
    qty: Qty,
) -> Result<SubmitAck, OrderBookError> {
    trace!(%side, qty, "submitting market order");
    let id = engine.next_order_id();
    // `spec.md` §4.4: inputs are validated first, before any per-type
    // policy (including Market's opposing-book-empty check) runs.
    let order = new_order_or_reject(engine, id, side, OrderKind::Market, None, qty)?;
    if engine.book(side.opposite()).is_empty() {
        warn!(%side, "market order rejected: opposite side has no liquidity");
        let seq = engine.next_seq();
        engine.emit(Event::Rejected {
            seq,
            reason: RejectReason::NoLiquidity,
        });
        return Err(OrderBookError::NoLiquidity { side });
    }
    let remainder = accept_and_match(engine, order);
    if remainder.remaining > 0 {
        cancel_remainder(engine, remainder, CancelReason::PartialMarketCancel);
    }
    trigger::run_trigger_loop(engine);
    Ok(SubmitAck::Order(id))
}

/// Fill-or-Kill: a read-only probe of the opposite side decides up
/// front whether `qty` can be fully satisfied within `price`; only if
/// so does the book get touched at all. `spec.md` §4.4/§9 — the probe
/// and the subsequent execution must agree on fillability, or the
/// two have drifted out of sync and matching has a bug.
pub fn submit_fok(
    engine: &mut EngineState,
    side: Side,
    price: Price,
    qty: Qty,
) -> Result<SubmitAck, OrderBookError> {
    trace!(%side, price, qty, "submitting fill-or-kill order");
    let id = engine.next_order_id();
    let order = new_order_or_reject(engine, id, side, OrderKind::Fok, Some(price), qty)?;

    let (_, available) = engine
        .book(side.opposite())
        .liquidity_up_to(side, price, qty);
    if available < qty {
        warn!(%side, price, qty, available, "fok killed: insufficient liquidity");
        let seq = engine.next_seq();
        engine.emit(Event::Cancelled {
            seq,
            order_id: Some(id),
            stop_id: None,
            reason: CancelReason::InsufficientLiquidity,
        });
        return Ok(SubmitAck::Order(id));
    }

    let remainder = accept_and_match(engine, order);
    if remainder.remaining != 0 {
        internal_error("FOK probe promised a full fill but execution left a remainder");
    }
    trigger::run_trigger_loop(engine);
    Ok(SubmitAck::Order(id))
}

pub fn submit_ioc(
    engine: &mut EngineState,
    side: Side,
    price: Price,
    qty: Qty,
) -> Result<SubmitAck, OrderBookError> {
    trace!(%side, price, qty, "submitting immediate-or-cancel order");
    let id = engine.next_order_id();
    let order = new_order_or_reject(engine, id, side, OrderKind::Ioc, Some(price), qty)?;
    let remainder = accept_and_match(engine, order);
    if remainder.remaining > 0 {
        cancel_remainder(engine, remainder, CancelReason::NoMatch);
    }
    trigger::run_trigger_loop(engine);
    Ok(SubmitAck::Order(id))
}

pub fn submit_stop(
    engine: &mut EngineState,
    side: Side,
    stop_price: Price,
    qty: Qty,
    mode: StopMode,
) -> Result<SubmitAck, OrderBookError> {
    trace!(%side, stop_price, qty, ?mode, "submitting stop order");
    let id = engine.next_stop_id();
    let stop = match StopOrder::new(id, side, stop_price, qty, mode) {
        Ok(stop) => stop,
        Err(err) => {
            warn!(%side, stop_price, qty, %err, "stop order rejected");
            let seq = engine.next_seq();
            engine.emit(Event::Rejected {
                seq,
                reason: RejectReason::InvalidRequest,
            });
            return Err(err);
        }
    };

    // `spec.md` §4.4: a stop whose arming condition is already true at
    // submission time fires immediately instead of resting armed.
    if let Some(last) = engine.last_trade_price() {
        if stop.is_armed_by(last) {
            trigger::fire_stop(engine, stop);
            trigger::run_trigger_loop(engine);
            return Ok(SubmitAck::Stop(id));
        }
    }

    engine.stops.arm(stop);
    let seq = engine.next_seq();
    engine.emit(Event::StopArmed {
        seq,
        stop_id: id,
        side,
    });
    Ok(SubmitAck::Stop(id))
}

fn new_order_or_reject(
    engine: &mut EngineState,
    id: OrderId,
    side: Side,
    kind: OrderKind,
    price: Option<Price>,
    qty: Qty,
) -> Result<Order, OrderBookError> {
    match Order::new(id, side, kind, price, qty) {
        Ok(order) => Ok(order),
        Err(err) => {
            warn!(%kind, %side, %err, "order rejected");
            let seq = engine.next_seq();
            engine.emit(Event::Rejected {
                seq,
                reason: RejectReason::InvalidRequest,
            });
            Err(err)
        }
    }
}

/// Emits `OrderAccepted`, runs the order as a taker, and updates
/// `last_trade_price` if anything traded. Returns the (possibly
/// partially-filled) order so the caller can apply its own rest /
/// cancel-remainder policy.
pub(crate) fn accept_and_match(engine: &mut EngineState, order: Order) -> Order {
    let id = order.id;
    let side = order.side;
    let seq = engine.next_seq();
    engine.emit(Event::OrderAccepted { seq, order_id: id });

    let outcome = engine.execute_match(order);
    let traded = outcome.last_trade_price.is_some();
    if let Some(price) = outcome.last_trade_price {
        engine.last_trade_price = Some(price);
    }
    // `spec.md` §4.6: `BookEmpty` is an optional event; emit it when a
    // trade just drained the opposite side down to nothing.
    if traded && engine.book(side.opposite()).is_empty() {
        let seq = engine.next_seq();
        engine.emit(Event::BookEmpty {
            seq,
            side: side.opposite(),
        });
    }
    outcome.taker
}

/// Rests a non-empty remainder on its own side of the book. Limit and
/// triggered stop-limit orders that don't fully fill take this path.
pub(crate) fn rest(engine: &mut EngineState, order: Order) {
    let side = order.side;
    let price = order
        .price
        .unwrap_or_else(|| internal_error("cannot rest an order with no limit price"));
    let id = order.id;
    let remaining = order.remaining;
    engine.book_mut(side).add(price, order);
    let seq = engine.next_seq();
    engine.emit(Event::Resting {
        seq,
        order_id: id,
        remaining,
        price,
    });
}

/// Cancels an unfilled (or partially-filled) remainder instead of
/// resting it. Market and IOC orders take this path, each with its own
/// `CancelReason` (`spec.md` §4.4).
pub(crate) fn cancel_remainder(engine: &mut EngineState, order: Order, reason: CancelReason) {
    let seq = engine.next_seq();
    engine.emit(Event::Cancelled {
        seq,
        order_id: Some(order.id),
        stop_id: None,
        reason,
    });
}
