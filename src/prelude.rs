//! Prelude module that re-exports the engine's public surface.
//!
//! ```rust
//! use limit_engine::prelude::*;
//! ```

pub use crate::orderbook::{
    CancelReason, CancelTarget, CancelledId, EngineConfig, EngineHandle, EngineState, Event,
    EventSink, IdCounter, JsonLineEventSink, Order, OrderBookError, OrderId, OrderKind, Price,
    Qty, RejectReason, Side, StopId, StopMode, StopOrder, SubmitAck, SubmitRequest,
    TracingEventSink, VecEventSink,
};
