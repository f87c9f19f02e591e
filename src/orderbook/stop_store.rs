//! `StopStore`: price-indexed collection of armed stop/stop-limit
//! orders. See `spec.md` §3/§4.5.
//!
//! The teacher's Python ancestor (`original_source/Order_Book.py`)
//! keeps two disjoint, inconsistently-accessed stores per side
//! (`stop_market_orders_bid/ask` vs. `stop_orders_limit`, the latter
//! never actually initialized on `self`). This unifies both stop modes
//! into one queue per side, keyed by stop price.

use crate::orderbook::order::StopOrder;
use crate::orderbook::types::{Price, Side};
use std::collections::{BTreeMap, VecDeque};

/// Two FIFO-per-price queues of armed stops, one per side. Scanning
/// order is side-aware: bids descending by stop price, asks ascending
/// — the most-about-to-trigger level first.
#[derive(Debug, Default)]
pub struct StopStore {
    bids: BTreeMap<Price, VecDeque<StopOrder>>,
    asks: BTreeMap<Price, VecDeque<StopOrder>>,
}

impl StopStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn side_map(&mut self, side: Side) -> &mut BTreeMap<Price, VecDeque<StopOrder>> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Arms `stop`, enqueued FIFO at its stop price.
    pub fn arm(&mut self, stop: StopOrder) {
        self.side_map(stop.side)
            .entry(stop.stop_price)
            .or_default()
            .push_back(stop);
    }

    /// Removes and returns the armed stop with the given id, if any.
    pub fn cancel(&mut self, id: crate::orderbook::ids::StopId) -> Option<StopOrder> {
        for map in [&mut self.bids, &mut self.asks] {
            let mut found_price = None;
            let mut removed = None;
            for (price, queue) in map.iter_mut() {
                if let Some(pos) = queue.iter().position(|s| s.id == id) {
                    removed = queue.remove(pos);
                    if queue.is_empty() {
                        found_price = Some(*price);
                    }
                    break;
                }
            }
            if let Some(price) = found_price {
                map.remove(&price);
            }
            if removed.is_some() {
                return removed;
            }
        }
        None
    }

    /// Dequeues and returns the most-about-to-trigger armed stop for
    /// `side` whose arming condition is satisfied by `last_trade_price`.
    /// Walks every resting price in best-first order (descending for
    /// bids, ascending for asks) rather than stopping at the single most
    /// extreme one: several prices can be simultaneously armed-but-
    /// unsatisfied while a less extreme one is already satisfied (e.g. a
    /// Buy stop at 95 and another at 105, both resting before any trade
    /// — a trade at 100 satisfies the 95 stop but not the 105 one, and
    /// the 105 stop sitting unsatisfied must not mask the 95 stop that
    /// is). Cleans up a price entry if it empties.
    pub fn pop_triggered(&mut self, side: Side, last_trade_price: Price) -> Option<StopOrder> {
        let prices: Vec<Price> = {
            let map = self.side_map(side);
            match side {
                Side::Buy => map.keys().rev().copied().collect(),
                Side::Sell => map.keys().copied().collect(),
            }
        };
        for price in prices {
            let map = self.side_map(side);
            let queue = match map.get_mut(&price) {
                Some(queue) => queue,
                None => continue,
            };
            let armed = queue.front().is_some_and(|stop| stop.is_armed_by(last_trade_price));
            if !armed {
                continue;
            }
            let stop = queue.pop_front();
            if queue.is_empty() {
                map.remove(&price);
            }
            return stop;
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
