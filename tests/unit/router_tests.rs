//! Input validation and rejection behavior for each order type.

use limit_engine::orderbook::{EngineState, OrderBookError, Side, StopMode, VecEventSink};

fn new_engine() -> EngineState {
    EngineState::new(Box::new(VecEventSink::default()))
}

#[test]
fn zero_quantity_limit_is_rejected() {
    let mut engine = new_engine();
    let err = engine.submit_limit(Side::Buy, 100, 0);
    assert!(matches!(err, Err(OrderBookError::InvalidRequest { .. })));
    assert_eq!(engine.best_bid(), None);
}

#[test]
fn zero_price_limit_is_rejected() {
    let mut engine = new_engine();
    let err = engine.submit_limit(Side::Buy, 0, 10);
    assert!(matches!(err, Err(OrderBookError::InvalidRequest { .. })));
}

#[test]
fn zero_quantity_market_is_rejected_before_liquidity_check() {
    // The opposing book is deliberately left empty: if validation ran
    // after the liquidity check, this would surface `NoLiquidity`
    // instead of `InvalidRequest`.
    let mut engine = new_engine();
    let err = engine.submit_market(Side::Buy, 0);
    assert!(matches!(err, Err(OrderBookError::InvalidRequest { .. })));
}

#[test]
fn zero_stop_price_is_rejected() {
    let mut engine = new_engine();
    let err = engine.submit_stop(Side::Buy, 0, 5, StopMode::TriggerMarket);
    assert!(matches!(err, Err(OrderBookError::InvalidRequest { .. })));
}

#[test]
fn zero_limit_price_in_stop_limit_mode_is_rejected() {
    let mut engine = new_engine();
    let err = engine.submit_stop(
        Side::Buy,
        100,
        5,
        StopMode::TriggerLimit { limit_price: 0 },
    );
    assert!(matches!(err, Err(OrderBookError::InvalidRequest { .. })));
}

#[test]
fn cancel_of_unknown_order_id_is_not_found() {
    let mut engine = new_engine();
    let err = engine.cancel_order(limit_engine::orderbook::OrderId(999));
    assert!(matches!(err, Err(OrderBookError::NotFound(_))));
}

#[test]
fn cancel_of_unknown_stop_id_is_not_found() {
    let mut engine = new_engine();
    let err = engine.cancel_stop(limit_engine::orderbook::StopId(999));
    assert!(matches!(err, Err(OrderBookError::NotFound(_))));
}
