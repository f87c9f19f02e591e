//! Stop and stop-limit order arming, triggering, and cascade behavior.

use limit_engine::orderbook::{EngineState, Side, StopMode, SubmitAck, VecEventSink};

fn new_engine() -> EngineState {
    EngineState::new(Box::new(VecEventSink::default()))
}

#[test]
fn buy_stop_arms_and_rests_unarmed() {
    let mut engine = new_engine();
    let ack = engine
        .submit_stop(Side::Buy, 100, 5, StopMode::TriggerMarket)
        .unwrap();
    assert!(matches!(ack, SubmitAck::Stop(_)));
    // Nothing has traded yet, so nothing should have fired.
    assert_eq!(engine.last_trade_price(), None);
}

#[test]
fn buy_stop_triggers_once_the_market_trades_through_it() {
    let mut engine = new_engine();
    engine.submit_limit(Side::Sell, 105, 10).unwrap();
    engine
        .submit_stop(Side::Buy, 100, 5, StopMode::TriggerMarket)
        .unwrap();

    // Trade at 100 arms the stop; it should fire as a market buy
    // immediately afterwards and take liquidity from the 105 level.
    engine.submit_limit(Side::Sell, 100, 3).unwrap();
    engine.submit_limit(Side::Buy, 100, 3).unwrap();

    assert_eq!(engine.last_trade_price(), Some(105));
    assert_eq!(engine.depth(Side::Sell, 10), vec![(105, 5)]);
}

#[test]
fn sell_stop_triggers_when_price_falls_to_it() {
    let mut engine = new_engine();
    engine.submit_limit(Side::Buy, 95, 10).unwrap();
    engine
        .submit_stop(Side::Sell, 100, 5, StopMode::TriggerMarket)
        .unwrap();

    engine.submit_limit(Side::Buy, 100, 3).unwrap();
    engine.submit_limit(Side::Sell, 100, 3).unwrap();

    assert_eq!(engine.last_trade_price(), Some(95));
}

#[test]
fn stop_limit_rests_as_a_limit_order_once_triggered() {
    let mut engine = new_engine();
    engine.submit_limit(Side::Sell, 100, 3).unwrap();
    engine
        .submit_stop(
            Side::Buy,
            100,
            5,
            StopMode::TriggerLimit { limit_price: 99 },
        )
        .unwrap();

    // Trade at 100 arms and fires the stop-limit at 99 — it won't
    // cross the remaining ask at 100, so it must rest instead of fill.
    engine.submit_limit(Side::Sell, 100, 1).unwrap();
    engine.submit_limit(Side::Buy, 100, 1).unwrap();

    assert_eq!(engine.depth(Side::Buy, 10), vec![(99, 5)]);
}

#[test]
fn stop_that_is_already_armed_at_submission_fires_immediately() {
    let mut engine = new_engine();
    engine.submit_limit(Side::Sell, 105, 10).unwrap();
    // Establish a last_trade_price of 100 first.
    engine.submit_limit(Side::Sell, 100, 1).unwrap();
    engine.submit_limit(Side::Buy, 100, 1).unwrap();
    assert_eq!(engine.last_trade_price(), Some(100));

    // A buy stop at 100 is already armed by the current last trade
    // price, so this must fire on submission rather than resting.
    engine
        .submit_stop(Side::Buy, 100, 5, StopMode::TriggerMarket)
        .unwrap();
    assert_eq!(engine.depth(Side::Sell, 10), vec![(105, 5)]);
}

#[test]
fn cancelling_an_armed_stop_prevents_it_from_ever_triggering() {
    let mut engine = new_engine();
    engine.submit_limit(Side::Sell, 105, 10).unwrap();
    let ack = engine
        .submit_stop(Side::Buy, 100, 5, StopMode::TriggerMarket)
        .unwrap();
    let SubmitAck::Stop(stop_id) = ack else {
        unreachable!()
    };
    assert!(engine.cancel_stop(stop_id).is_ok());

    engine.submit_limit(Side::Sell, 100, 1).unwrap();
    engine.submit_limit(Side::Buy, 100, 1).unwrap();

    // The 105 level should be untouched since the cancelled stop never fired.
    assert_eq!(engine.depth(Side::Sell, 10), vec![(105, 10)]);
}

#[test]
fn boundary_scenario_sell_stop_triggers_and_cascades_into_the_next_bid() {
    // A Sell Stop armed at the trade price that is about to print fires
    // immediately off that trade, then its own market sell sweeps on
    // into the next bid level once the first is exhausted.
    let mut engine = new_engine();
    engine.submit_limit(Side::Buy, 99, 5).unwrap();
    engine.submit_limit(Side::Buy, 94, 20).unwrap();
    engine
        .submit_stop(Side::Sell, 99, 10, StopMode::TriggerMarket)
        .unwrap();

    // Taker sell at 99 trades out the whole Bid 99 level and sets
    // last_trade_price to 99, which satisfies the Sell stop's <= rule.
    engine.submit_limit(Side::Sell, 99, 5).unwrap();

    // The triggered market sell (qty 10) has no liquidity left at 99,
    // so it sweeps into Bid 94 for the full 10.
    assert_eq!(engine.last_trade_price(), Some(94));
    assert_eq!(engine.depth(Side::Buy, 10), vec![(94, 10)]);
    assert!(engine.stops.is_empty());
}

#[test]
fn a_less_extreme_armed_stop_fires_even_though_a_further_one_does_not() {
    // Two Buy stops rest simultaneously, at 95 and 105, both armed
    // before any trade has happened. A trade at 100 satisfies the 95
    // stop (100 >= 95) but not the 105 one (100 >= 105 is false). The
    // 95 stop must still fire instead of being masked by the
    // unsatisfied, more-extreme 105 stop — and deep resting liquidity
    // at 102 keeps the 95 stop's own triggered trade from also
    // crossing 105, so the 105 stop must remain armed afterwards.
    let mut engine = new_engine();
    engine.submit_limit(Side::Sell, 102, 50).unwrap();
    let near = engine
        .submit_stop(Side::Buy, 95, 5, StopMode::TriggerMarket)
        .unwrap();
    let far = engine
        .submit_stop(Side::Buy, 105, 5, StopMode::TriggerMarket)
        .unwrap();

    engine.submit_limit(Side::Sell, 100, 1).unwrap();
    engine.submit_limit(Side::Buy, 100, 1).unwrap();

    // The 95 stop fired: last trade moved to 102 (its triggered market
    // buy eating into the resting 102 level), not 100.
    assert_eq!(engine.last_trade_price(), Some(102));
    assert_eq!(engine.depth(Side::Sell, 10), vec![(102, 45)]);

    let SubmitAck::Stop(near_id) = near else {
        unreachable!()
    };
    let SubmitAck::Stop(far_id) = far else {
        unreachable!()
    };
    // The 95 stop already fired, so it's no longer a live stop id.
    assert!(engine.cancel_stop(near_id).is_err());
    // The 105 stop never fired (102 doesn't satisfy it) and must still
    // be armed and cancellable.
    assert!(engine.cancel_stop(far_id).is_ok());
}

#[test]
fn one_triggered_stop_can_cascade_into_another() {
    let mut engine = new_engine();
    // Resting asks that the cascade will eat through.
    engine.submit_limit(Side::Sell, 100, 5).unwrap();
    engine.submit_limit(Side::Sell, 101, 5).unwrap();

    // A buy stop at 100 fires a market buy that trades at 100, which
    // should in turn arm and trigger a sell stop at 100 (last trade
    // price 100 satisfies a Sell stop's `<=` arming rule).
    engine
        .submit_stop(Side::Buy, 100, 5, StopMode::TriggerMarket)
        .unwrap();
    engine
        .submit_stop(Side::Sell, 100, 2, StopMode::TriggerMarket)
        .unwrap();

    engine.submit_limit(Side::Buy, 99, 5).unwrap();
    // Trading through 100 arms and fires the buy stop; its own trade
    // at 100 then arms and fires the sell stop against the resting
    // buy limit at 99.
    engine.submit_limit(Side::Sell, 100, 1).unwrap();
    engine.submit_limit(Side::Buy, 100, 1).unwrap();

    assert!(engine.depth(Side::Buy, 10).iter().all(|(p, _)| *p != 100));
}
