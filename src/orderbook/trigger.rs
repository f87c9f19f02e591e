//! `TriggerLoop`: the post-trade stop-scan/cascade procedure. See
//! `spec.md` §4.5.
//!
//! The Python ancestor embeds an (incomplete) trigger scan directly in
//! its order-submission methods, with an empty loop body in
//! `stop_market_order_check` (`original_source/Order_Book.py` lines
//! 113-123) — stop cascades never actually fire. This makes the scan
//! its own explicit procedure, run once after every price-moving
//! event, so a single trade can cascade through any number of armed
//! stops before control returns to the caller.

use crate::orderbook::engine::EngineState;
use crate::orderbook::error::internal_error;
use crate::orderbook::event::Event;
use crate::orderbook::order::{Order, StopOrder};
use crate::orderbook::router;
use crate::orderbook::types::{OrderKind, Side, StopMode};

/// Scans for triggerable stops and fires them one at a time, re-scanning
/// from scratch after each fire so a triggered stop's own trade can
/// immediately arm further stops (`spec.md` §4.5's cascade requirement).
/// Ordering per pass: bids highest-stop-first, then asks lowest-stop-
/// first — `StopStore::pop_triggered`'s own best-first traversal gives
/// FIFO-within-price for free.
pub(crate) fn run_trigger_loop(engine: &mut EngineState) {
    loop {
        let last = match engine.last_trade_price() {
            Some(price) => price,
            None => return,
        };

        let stop = engine
            .stops
            .pop_triggered(Side::Buy, last)
            .or_else(|| engine.stops.pop_triggered(Side::Sell, last));

        match stop {
            Some(stop) => fire_stop(engine, stop),
            None => return,
        }
    }
}

/// Converts an armed `StopOrder` into a fresh `Order` (a new `OrderId`
/// from the regular order namespace — the stop's own `StopId` is now
/// retired) and runs it through the same accept/match/rest-or-cancel
/// policy a directly-submitted order of that kind would get.
pub(crate) fn fire_stop(engine: &mut EngineState, stop: StopOrder) {
    let order_id = engine.next_order_id();
    let (kind, price) = match stop.mode {
        StopMode::TriggerMarket => (OrderKind::Market, None),
        StopMode::TriggerLimit { limit_price } => (OrderKind::Limit, Some(limit_price)),
    };

    let order: Order = match Order::new(order_id, stop.side, kind, price, stop.qty) {
        Ok(order) => order,
        Err(_) => internal_error("a triggered stop produced an order that failed validation"),
    };

    let seq = engine.next_seq();
    engine.emit(Event::StopTriggered {
        seq,
        stop_id: stop.id,
        new_order_id: order_id,
    });

    let remainder = router::accept_and_match(engine, order);
    if remainder.remaining > 0 {
        match kind {
            OrderKind::Limit => router::rest(engine, remainder),
            OrderKind::Market => router::cancel_remainder(
                engine,
                remainder,
                crate::orderbook::types::CancelReason::PartialMarketCancel,
            ),
            OrderKind::Fok | OrderKind::Ioc => {
                internal_error("a triggered stop can only produce Market or Limit orders")
            }
        }
    }
}
