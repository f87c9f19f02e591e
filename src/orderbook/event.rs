//! `Event` and `EventSink`: the event grammar from `spec.md` §4.6, and
//! the pure-consumer interface that receives it.
//!
//! Generalizes a single trade-callback closure into a trait since this
//! event grammar has more than one variant.

use crate::orderbook::ids::{OrderId, StopId};
use crate::orderbook::types::{CancelReason, Price, Qty, RejectReason, Side};

/// One event in the engine's total-ordered, append-only stream.
/// `seq` is assigned by the engine and is strictly increasing with no
/// gaps across the whole event stream (`spec.md` §6/§8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind")]
pub enum Event {
    OrderAccepted { seq: u64, order_id: OrderId },
    Trade {
        seq: u64,
        taker_id: OrderId,
        maker_id: OrderId,
        price: Price,
        qty: Qty,
    },
    Resting {
        seq: u64,
        order_id: OrderId,
        remaining: Qty,
        price: Price,
    },
    Cancelled {
        seq: u64,
        order_id: Option<OrderId>,
        stop_id: Option<StopId>,
        reason: CancelReason,
    },
    StopArmed { seq: u64, stop_id: StopId, side: Side },
    StopTriggered {
        seq: u64,
        stop_id: StopId,
        new_order_id: OrderId,
    },
    BookEmpty { seq: u64, side: Side },
    Rejected { seq: u64, reason: RejectReason },
}

impl Event {
    /// The sequence number every variant carries.
    pub fn seq(&self) -> u64 {
        match self {
            Event::OrderAccepted { seq, .. }
            | Event::Trade { seq, .. }
            | Event::Resting { seq, .. }
            | Event::Cancelled { seq, .. }
            | Event::StopArmed { seq, .. }
            | Event::StopTriggered { seq, .. }
            | Event::BookEmpty { seq, .. }
            | Event::Rejected { seq, .. } => *seq,
        }
    }
}

/// A pure consumer of the engine's event stream. Implementations never
/// have the engine read back from them (`spec.md` §4.6) and are invoked
/// synchronously from whichever thread is driving the engine
/// (`spec.md` §5) — an implementation that must do asynchronous work is
/// responsible for its own buffering.
pub trait EventSink: Send {
    fn on_event(&mut self, event: Event);
}

/// An `EventSink` that logs each event at `tracing::trace!`. Useful as
/// a default when a caller doesn't need to inspect events
/// programmatically.
#[derive(Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn on_event(&mut self, event: Event) {
        tracing::trace!(?event, "engine event");
    }
}

/// An `EventSink` that collects every event into a `Vec`, for tests and
/// for callers that want to inspect the whole stream after the fact.
#[derive(Debug, Default)]
pub struct VecEventSink {
    pub events: Vec<Event>,
}

impl EventSink for VecEventSink {
    fn on_event(&mut self, event: Event) {
        self.events.push(event);
    }
}

/// An `EventSink` that renders each event as a JSON line and hands it to
/// a caller-supplied writer, for publishing the stream to a log file or
/// message bus. Mirrors the teacher's `JsonEventSerializer`
/// (`serialize_trade`/`serialize_book_change`) collapsed onto this
/// crate's single `Event` type and a line-oriented sink instead of a
/// request/reply serializer trait.
pub struct JsonLineEventSink<W: std::io::Write + Send> {
    writer: W,
}

impl<W: std::io::Write + Send> JsonLineEventSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: std::io::Write + Send> EventSink for JsonLineEventSink<W> {
    fn on_event(&mut self, event: Event) {
        match serde_json::to_string(&event) {
            Ok(line) => {
                if let Err(err) = writeln!(self.writer, "{line}") {
                    tracing::warn!(%err, "failed to write event line to sink");
                }
            }
            Err(err) => tracing::warn!(%err, "failed to serialize event as json"),
        }
    }
}
