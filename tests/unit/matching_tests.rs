//! Boundary scenarios for the core matching algorithm.

use limit_engine::orderbook::{EngineState, Side, SubmitAck, VecEventSink};

fn new_engine() -> EngineState {
    crate::init_test_tracing();
    EngineState::new(Box::new(VecEventSink::default()))
}

#[test]
fn basic_match_between_a_single_bid_and_ask() {
    let mut engine = new_engine();
    engine.submit_limit(Side::Sell, 100, 5).unwrap();
    engine.submit_limit(Side::Buy, 100, 5).unwrap();
    assert_eq!(engine.best_bid(), None);
    assert_eq!(engine.best_ask(), None);
    assert_eq!(engine.last_trade_price(), Some(100));
}

#[test]
fn price_time_priority_fills_earliest_order_first() {
    let mut engine = new_engine();
    let first = engine.submit_limit(Side::Sell, 100, 3).unwrap();
    let second = engine.submit_limit(Side::Sell, 100, 3).unwrap();
    engine.submit_limit(Side::Buy, 100, 4).unwrap();

    let SubmitAck::Order(first_id) = first else {
        unreachable!()
    };
    let SubmitAck::Order(second_id) = second else {
        unreachable!()
    };

    // first order fully filled (3), second order partially filled (1
    // of 3 remain resting) — confirmed indirectly via depth.
    assert_eq!(engine.depth(Side::Sell, 10), vec![(100, 2)]);
    assert!(engine.cancel_order(first_id).is_err());
    assert!(engine.cancel_order(second_id).is_ok());
}

#[test]
fn deeper_levels_trade_only_after_the_best_is_exhausted() {
    let mut engine = new_engine();
    engine.submit_limit(Side::Sell, 100, 2).unwrap();
    engine.submit_limit(Side::Sell, 101, 5).unwrap();
    engine.submit_limit(Side::Buy, 101, 4).unwrap();
    assert_eq!(engine.last_trade_price(), Some(101));
    assert_eq!(engine.depth(Side::Sell, 10), vec![(101, 3)]);
}

#[test]
fn fok_kills_the_whole_order_when_liquidity_is_insufficient() {
    let mut engine = new_engine();
    engine.submit_limit(Side::Sell, 100, 2).unwrap();
    engine.submit_fok(Side::Buy, 100, 5).unwrap();
    assert_eq!(engine.depth(Side::Sell, 10), vec![(100, 2)]);
    assert_eq!(engine.last_trade_price(), None);
}

#[test]
fn fok_fills_in_full_across_multiple_levels() {
    let mut engine = new_engine();
    engine.submit_limit(Side::Sell, 100, 2).unwrap();
    engine.submit_limit(Side::Sell, 101, 3).unwrap();
    engine.submit_fok(Side::Buy, 101, 5).unwrap();
    assert_eq!(engine.best_ask(), None);
    assert_eq!(engine.last_trade_price(), Some(101));
}

#[test]
fn ioc_fills_what_it_can_and_cancels_the_remainder() {
    let mut engine = new_engine();
    engine.submit_limit(Side::Sell, 100, 2).unwrap();
    engine.submit_ioc(Side::Buy, 100, 5).unwrap();
    assert_eq!(engine.best_ask(), None);
    assert_eq!(engine.best_bid(), None);
    assert_eq!(engine.last_trade_price(), Some(100));
}

#[test]
fn market_order_against_empty_opposite_book_is_rejected() {
    let mut engine = new_engine();
    let err = engine.submit_market(Side::Buy, 5);
    assert!(err.is_err());
}

#[test]
fn market_order_does_not_rest_its_unfilled_remainder() {
    let mut engine = new_engine();
    engine.submit_limit(Side::Sell, 100, 2).unwrap();
    engine.submit_market(Side::Buy, 5).unwrap();
    assert_eq!(engine.best_bid(), None);
    assert_eq!(engine.best_ask(), None);
}
