//! `Matcher`: walks the opposite side, applies fill policy, emits
//! trades. See `spec.md` §4.3.
//!
//! Walks price levels best-first, matches within each level, and
//! batch-removes levels once they empty, down to the
//! conservation-of-quantity core.

use crate::orderbook::error::internal_error;
use crate::orderbook::event::{Event, EventSink};
use crate::orderbook::order::Order;
use crate::orderbook::side_book::SideBook;
use crate::orderbook::types::{Price, Qty};

/// Result of one matching pass: the taker's state after the walk and
/// the levels it touched (for callers that need to know, e.g. tests).
pub struct MatchOutcome {
    pub taker: Order,
    pub last_trade_price: Option<Price>,
}

/// Runs the core matching algorithm from `spec.md` §4.3 against
/// `opposite`, consuming `taker.remaining` as far as liquidity and its
/// limit allow. Emits one `Event::Trade` per fill via `sink`, assigning
/// each a fresh sequence number from `next_seq`.
///
/// Price-time priority falls directly out of `SideBook::iter_from_best`
/// (best price first) and `PriceLevel`'s FIFO queue (earliest-inserted
/// maker first within a price) — this function adds no additional
/// ordering logic of its own.
pub fn run_match(
    mut taker: Order,
    opposite: &mut SideBook,
    sink: &mut dyn EventSink,
    next_seq: &mut impl FnMut() -> u64,
) -> MatchOutcome {
    let mut last_trade_price = None;
    let mut emptied: Vec<Price> = Vec::new();

    // `SideBook` borrows a `BTreeMap` internally; snapshot the best-first
    // price order up front so the loop body is free to take `&mut`
    // borrows of individual levels as it matches and empties them.
    let price_order: Vec<Price> = opposite.iter_from_best().map(|(p, _)| p).collect();

    for price in price_order {
        if taker.remaining == 0 {
            break;
        }
        if !SideBook::is_tradable(taker.side, taker.price, price) {
            break;
        }

        loop {
            if taker.remaining == 0 {
                break;
            }
            let level = match opposite.level_mut(price) {
                Some(level) => level,
                None => break,
            };
            if level.is_empty() {
                break;
            }

            let maker = match level.peek_front_mut() {
                Some(maker) => maker,
                None => break,
            };
            let qty: Qty = maker.remaining.min(taker.remaining);
            maker.remaining -= qty;
            taker.remaining -= qty;
            let maker_id = maker.id;
            let maker_filled = maker.remaining == 0;

            sink.on_event(Event::Trade {
                seq: next_seq(),
                taker_id: taker.id,
                maker_id,
                price,
                qty,
            });
            last_trade_price = Some(price);

            if maker_filled {
                let popped = level.pop_front();
                debug_assert!(
                    popped.is_some_and(|o| o.id == maker_id),
                    "front-of-queue maker did not match the one just filled"
                );
            }
        }

        if opposite.level_mut(price).is_some_and(|l| l.is_empty()) {
            emptied.push(price);
        }
    }

    for price in emptied {
        opposite.remove_level(price);
    }

    if taker.remaining > taker.original_qty {
        internal_error("taker remaining quantity exceeded its original quantity");
    }

    MatchOutcome {
        taker,
        last_trade_price,
    }
}
