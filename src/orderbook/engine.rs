//! `EngineState`: owns both `SideBook`s, the `StopStore`, the id
//! counters, the last-trade-price, and the `EventSink`. See
//! `spec.md` §3.
//!
//! Grounded on the teacher's `OrderBook<T>` struct in `book.rs` (field
//! layout: two books, id counters, last-trade-price, listener), with
//! the concurrency-specific fields (`DashMap` order index, `AtomicCell`,
//! `PhantomData<T>`, STP/fee/special-order fields) dropped — see
//! `SPEC_FULL.md`'s "Why no `dashmap` order-location index" for why.
//! `EngineState` has a single owner at a time; all synchronization
//! happens one layer up, in [`crate::orderbook::handle::EngineHandle`].

use crate::orderbook::error::OrderBookError;
use crate::orderbook::event::{Event, EventSink};
use crate::orderbook::ids::{IdCounter, OrderId, StopId};
use crate::orderbook::matcher::{run_match, MatchOutcome};
use crate::orderbook::order::Order;
use crate::orderbook::side_book::SideBook;
use crate::orderbook::stop_store::StopStore;
use crate::orderbook::types::{CancelTarget, Price, Qty, Side, SubmitRequest};

/// The matching engine's entire state for one symbol.
pub struct EngineState {
    pub(crate) bids: SideBook,
    pub(crate) asks: SideBook,
    pub(crate) stops: StopStore,
    pub(crate) order_ids: IdCounter,
    pub(crate) stop_ids: IdCounter,
    pub(crate) last_trade_price: Option<Price>,
    seq: u64,
    sink: Box<dyn EventSink>,
}

impl EngineState {
    pub fn new(sink: Box<dyn EventSink>) -> Self {
        Self {
            bids: SideBook::bids(),
            asks: SideBook::asks(),
            stops: StopStore::new(),
            order_ids: IdCounter::new(),
            stop_ids: IdCounter::new(),
            last_trade_price: None,
            seq: 0,
            sink,
        }
    }

    pub(crate) fn next_order_id(&self) -> OrderId {
        OrderId(self.order_ids.next())
    }

    pub(crate) fn next_stop_id(&self) -> StopId {
        StopId(self.stop_ids.next())
    }

    /// Assigns the next event sequence number. Strictly increasing and
    /// contiguous across the whole stream (`spec.md` §8).
    pub(crate) fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub(crate) fn emit(&mut self, event: Event) {
        self.sink.on_event(event);
    }

    pub(crate) fn book(&self, side: Side) -> &SideBook {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(crate) fn book_mut(&mut self, side: Side) -> &mut SideBook {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    pub(crate) fn opposite_book_mut(&mut self, side: Side) -> &mut SideBook {
        self.book_mut(side.opposite())
    }

    /// Runs `order` as a taker against its opposite book, emitting
    /// trades through this engine's own sink and sequence counter.
    /// Lives here (rather than in `router`/`matcher`) because it needs
    /// simultaneous `&mut` access to a book, the sink, and `seq` —
    /// fields `EngineState` alone owns all three of.
    pub(crate) fn execute_match(&mut self, order: Order) -> MatchOutcome {
        let side = order.side;
        let opposite = match side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };
        let sink = &mut self.sink;
        let seq = &mut self.seq;
        run_match(order, opposite, sink.as_mut(), &mut || {
            *seq += 1;
            *seq
        })
    }

    // ---- Submit API (spec.md §6) ----

    pub fn submit_limit(
        &mut self,
        side: Side,
        price: Price,
        qty: Qty,
    ) -> Result<crate::orderbook::router::SubmitAck, OrderBookError> {
        crate::orderbook::router::submit_limit(self, side, price, qty)
    }

    pub fn submit_market(
        &mut self,
        side: Side,
        qty: Qty,
    ) -> Result<crate::orderbook::router::SubmitAck, OrderBookError> {
        crate::orderbook::router::submit_market(self, side, qty)
    }

    pub fn submit_fok(
        &mut self,
        side: Side,
        price: Price,
        qty: Qty,
    ) -> Result<crate::orderbook::router::SubmitAck, OrderBookError> {
        crate::orderbook::router::submit_fok(self, side, price, qty)
    }

    pub fn submit_ioc(
        &mut self,
        side: Side,
        price: Price,
        qty: Qty,
    ) -> Result<crate::orderbook::router::SubmitAck, OrderBookError> {
        crate::orderbook::router::submit_ioc(self, side, price, qty)
    }

    pub fn submit_stop(
        &mut self,
        side: Side,
        stop_price: Price,
        qty: Qty,
        mode: crate::orderbook::types::StopMode,
    ) -> Result<crate::orderbook::router::SubmitAck, OrderBookError> {
        crate::orderbook::router::submit_stop(self, side, stop_price, qty, mode)
    }

    /// A single tagged entry point onto the five `submit_*` methods
    /// above, for callers that hold a `SubmitRequest` value rather than
    /// its unpacked fields — e.g. a request that arrived already
    /// decoded from an external message. Dispatches to the same
    /// per-type policy either way.
    pub fn submit(
        &mut self,
        request: SubmitRequest,
    ) -> Result<crate::orderbook::router::SubmitAck, OrderBookError> {
        match request {
            SubmitRequest::Limit { side, price, qty } => self.submit_limit(side, price, qty),
            SubmitRequest::Market { side, qty } => self.submit_market(side, qty),
            SubmitRequest::Fok { side, price, qty } => self.submit_fok(side, price, qty),
            SubmitRequest::Ioc { side, price, qty } => self.submit_ioc(side, price, qty),
            SubmitRequest::Stop {
                side,
                stop_price,
                qty,
                mode,
            } => self.submit_stop(side, stop_price, qty, mode),
        }
    }

    /// A single tagged entry point onto `cancel_order`/`cancel_stop`,
    /// mirroring `submit` above.
    pub fn cancel(&mut self, target: CancelTarget) -> Result<(), OrderBookError> {
        match target {
            CancelTarget::Order(id) => self.cancel_order(id),
            CancelTarget::Stop(id) => self.cancel_stop(id),
        }
    }

    // ---- Query API (spec.md §6): read-only, never mutates state. ----

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    pub fn depth(&self, side: Side, max_levels: usize) -> Vec<(Price, Qty)> {
        self.book(side).depth(max_levels)
    }

    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.saturating_sub(bid)),
            _ => None,
        }
    }

    pub fn last_trade_price(&self) -> Option<Price> {
        self.last_trade_price
    }

    /// Cancel of an `OrderId`: linear scan of the order's own side book
    /// (per `spec.md` §9, acceptable at this scale), removing it from
    /// its `PriceLevel` and the level itself if it empties. No state
    /// change if the id isn't live.
    pub fn cancel_order(&mut self, id: OrderId) -> Result<(), OrderBookError> {
        for side in [Side::Buy, Side::Sell] {
            let book = self.book_mut(side);
            let price = match find_order_price(book, id) {
                Some(p) => p,
                None => continue,
            };
            if let Some(level) = book.level_mut(price) {
                level.remove(id);
            }
            book.remove_level_if_empty(price);
            let seq = self.next_seq();
            self.emit(Event::Cancelled {
                seq,
                order_id: Some(id),
                stop_id: None,
                reason: crate::orderbook::types::CancelReason::Requested,
            });
            return Ok(());
        }
        Err(OrderBookError::NotFound(
            crate::orderbook::error::CancelledId::Order(id),
        ))
    }

    /// Cancel of a `StopId`: scans both per-side `StopStore` queues.
    pub fn cancel_stop(&mut self, id: StopId) -> Result<(), OrderBookError> {
        match self.stops.cancel(id) {
            Some(_) => {
                let seq = self.next_seq();
                self.emit(Event::Cancelled {
                    seq,
                    order_id: None,
                    stop_id: Some(id),
                    reason: crate::orderbook::types::CancelReason::Requested,
                });
                Ok(())
            }
            None => Err(OrderBookError::NotFound(
                crate::orderbook::error::CancelledId::Stop(id),
            )),
        }
    }
}

fn find_order_price(book: &SideBook, id: OrderId) -> Option<Price> {
    book.iter_from_best()
        .find(|(_, level)| level.iter().any(|o| o.id == id))
        .map(|(price, _)| price)
}
