//! `SideBook`: a price-ordered map of `PriceLevel`s for one side. See
//! `spec.md` §4.2 and §9's "Sorted price map" design note.
//!
//! Keyed by a canonical positive price (no key negation); side-aware
//! traversal direction gives best-first order instead. A concurrent
//! skip list buys nothing here — see `SPEC_FULL.md` for why — since
//! `EngineState` has a single owner at a time.

use crate::orderbook::price_level::PriceLevel;
use crate::orderbook::types::{Price, Qty, Side};
use std::collections::BTreeMap;

/// One side (bids or asks) of the book.
#[derive(Debug, Default)]
pub struct SideBook {
    side: SideKind,
    levels: BTreeMap<Price, PriceLevel>,
}

/// Which traversal direction "best-first" means for this book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SideKind {
    #[default]
    Bids,
    Asks,
}

impl SideBook {
    pub fn bids() -> Self {
        Self {
            side: SideKind::Bids,
            levels: BTreeMap::new(),
        }
    }

    pub fn asks() -> Self {
        Self {
            side: SideKind::Asks,
            levels: BTreeMap::new(),
        }
    }

    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Buy => Self::bids(),
            Side::Sell => Self::asks(),
        }
    }

    /// Finds or creates the level for `price` and appends `order`.
    pub fn add(&mut self, price: Price, order: crate::orderbook::order::Order) {
        self.levels.entry(price).or_default().append(order);
    }

    /// The best (price, level) in best-first order, or `None` if empty.
    pub fn best(&self) -> Option<(Price, &PriceLevel)> {
        match self.side {
            SideKind::Bids => self.levels.iter().next_back().map(|(p, l)| (*p, l)),
            SideKind::Asks => self.levels.iter().next().map(|(p, l)| (*p, l)),
        }
    }

    pub fn best_price(&self) -> Option<Price> {
        self.best().map(|(p, _)| p)
    }

    pub fn level_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Removes the level at `price`. No-op if absent. Invariant: the
    /// `Matcher`/router call this the moment a level becomes empty so
    /// no empty `PriceLevel` is ever retained (`spec.md` §3/§8).
    pub fn remove_level(&mut self, price: Price) {
        self.levels.remove(&price);
    }

    pub fn remove_level_if_empty(&mut self, price: Price) {
        if self.levels.get(&price).is_some_and(PriceLevel::is_empty) {
            self.levels.remove(&price);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// A lazy sequence of `(price, &PriceLevel)` in best-first order.
    pub fn iter_from_best(&self) -> Box<dyn Iterator<Item = (Price, &PriceLevel)> + '_> {
        match self.side {
            SideKind::Bids => Box::new(self.levels.iter().rev().map(|(p, l)| (*p, l))),
            SideKind::Asks => Box::new(self.levels.iter().map(|(p, l)| (*p, l))),
        }
    }

    /// True iff a level at `price` is tradable against a taker with
    /// limit `limit_price` on `taker_side`: for a Buy taker, an ask
    /// level at `price` is tradable iff `price <= limit_price`; for a
    /// Sell taker, a bid level at `price` is tradable iff
    /// `price >= limit_price`. `None` (market order) means always
    /// tradable.
    pub fn is_tradable(taker_side: Side, limit_price: Option<Price>, level_price: Price) -> bool {
        match limit_price {
            None => true,
            Some(limit) => match taker_side {
                Side::Buy => level_price <= limit,
                Side::Sell => level_price >= limit,
            },
        }
    }

    /// Walks best-first, summing `total_quantity()` across levels
    /// tradable against `limit_price`, stopping as soon as the
    /// cumulative sum reaches `target_qty`. Returns
    /// `(levels_touched, cumulative_qty)`. Read-only — used by the FOK
    /// probe in `OrderRouter`, per `spec.md` §4.2/§9.
    pub fn liquidity_up_to(
        &self,
        taker_side: Side,
        limit_price: Price,
        target_qty: Qty,
    ) -> (usize, Qty) {
        let mut levels_touched = 0usize;
        let mut cumulative = 0u64;
        for (price, level) in self.iter_from_best() {
            if !Self::is_tradable(taker_side, Some(limit_price), price) {
                break;
            }
            levels_touched += 1;
            cumulative += level.total_quantity();
            if cumulative >= target_qty {
                break;
            }
        }
        (levels_touched, cumulative)
    }

    /// Aggregate depth up to `max_levels`, best-first, for the Query
    /// API's `depth(side, max_levels)`.
    pub fn depth(&self, max_levels: usize) -> Vec<(Price, Qty)> {
        self.iter_from_best()
            .take(max_levels)
            .map(|(p, l)| (p, l.total_quantity()))
            .collect()
    }
}
