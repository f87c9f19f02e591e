//! Single-symbol limit order book matching engine: price-time priority
//! matching, fill policies for Limit/Market/FOK/IOC orders, and a stop
//! and stop-limit order subsystem with cascading triggers.

mod engine;
mod error;
mod event;
mod handle;
mod ids;
mod matcher;
mod order;
mod price_level;
mod router;
mod side_book;
mod stop_store;
mod trigger;
mod types;

pub use engine::EngineState;
pub use error::{CancelledId, OrderBookError, internal_error};
pub use event::{Event, EventSink, JsonLineEventSink, TracingEventSink, VecEventSink};
pub use handle::{EngineConfig, EngineHandle};
pub use ids::{IdCounter, OrderId, StopId};
pub use order::{Order, StopOrder};
pub use router::SubmitAck;
pub use types::{
    CancelReason, CancelTarget, OrderKind, Price, Qty, RejectReason, Side, StopMode,
    SubmitRequest,
};
