//! `EngineHandle`: a producer/consumer wrapper giving multiple callers
//! a cloneable, thread-safe front door onto a single-threaded
//! `EngineState`. See `spec.md` §5.
//!
//! Grounded on the teacher's `BookManagerStd::start_trade_processor`
//! (`manager.rs`): spawn a dedicated thread that owns the real state,
//! hand callers a channel `Sender` and loop `recv()` on the other end.
//! This generalizes that shape from "fire a `TradeEvent` and move on"
//! to "run a job against the engine and send its result back", since
//! `spec.md`'s Submit/Cancel/Query API is call-and-response, not
//! fire-and-forget. `crossbeam::channel` replaces `std::sync::mpsc`
//! for its bounded-channel support (`spec.md` §5's explicit backpressure
//! requirement — an unbounded queue would let a slow engine thread
//! accept unbounded inbound work).

use crate::orderbook::engine::EngineState;
use crate::orderbook::error::OrderBookError;
use crate::orderbook::event::{EventSink, TracingEventSink};
use crate::orderbook::ids::{OrderId, StopId};
use crate::orderbook::router::{self, SubmitAck};
use crate::orderbook::types::{CancelTarget, Price, Qty, Side, StopMode, SubmitRequest};

/// One unit of work run against the engine's state on its owning
/// thread. Boxed so `EngineHandle` doesn't need to know the concrete
/// closure type for every call site.
type Job = Box<dyn FnOnce(&mut EngineState) + Send>;

/// Configuration for spawning an [`EngineHandle`].
pub struct EngineConfig {
    /// Bound on the inbound job channel. A full channel makes
    /// `EngineHandle` calls block rather than grow memory without
    /// limit — see `spec.md` §5.
    pub channel_bound: usize,
    /// Where engine events go. Defaults to [`TracingEventSink`].
    pub sink: Option<Box<dyn EventSink>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            channel_bound: 1024,
            sink: None,
        }
    }
}

/// A handle onto an `EngineState` running on its own thread. Cloning
/// an `EngineHandle` is cheap (it's just a channel `Sender`) and every
/// clone talks to the same underlying engine.
#[derive(Clone)]
pub struct EngineHandle {
    jobs: crossbeam::channel::Sender<Job>,
}

impl EngineHandle {
    /// Spawns the engine's processing thread and returns a handle to
    /// it plus the thread's `JoinHandle`, for callers that want to
    /// wait for clean shutdown (drop every `EngineHandle` clone, which
    /// closes the channel and ends the `recv()` loop).
    pub fn spawn(config: EngineConfig) -> (Self, std::thread::JoinHandle<()>) {
        let (tx, rx) = crossbeam::channel::bounded::<Job>(config.channel_bound);
        let sink = config
            .sink
            .unwrap_or_else(|| Box::new(TracingEventSink) as Box<dyn EventSink>);

        let join = std::thread::spawn(move || {
            let mut engine = EngineState::new(sink);
            tracing::info!("engine processor started");
            while let Ok(job) = rx.recv() {
                job(&mut engine);
            }
            tracing::info!("engine processor stopped");
        });

        (Self { jobs: tx }, join)
    }

    /// Sends `f` to the engine thread and blocks for its result.
    /// Panics if the engine thread has already exited — a caller
    /// holding a live `EngineHandle` should never observe that.
    fn call<R: Send + 'static>(&self, f: impl FnOnce(&mut EngineState) -> R + Send + 'static) -> R {
        let (reply_tx, reply_rx) = crossbeam::channel::bounded(1);
        let job: Job = Box::new(move |engine| {
            let _ = reply_tx.send(f(engine));
        });
        self.jobs
            .send(job)
            .expect("engine processor thread is no longer running");
        reply_rx
            .recv()
            .expect("engine processor dropped the reply channel without answering")
    }

    pub fn submit_limit(
        &self,
        side: Side,
        price: Price,
        qty: Qty,
    ) -> Result<SubmitAck, OrderBookError> {
        self.call(move |engine| router::submit_limit(engine, side, price, qty))
    }

    pub fn submit_market(&self, side: Side, qty: Qty) -> Result<SubmitAck, OrderBookError> {
        self.call(move |engine| router::submit_market(engine, side, qty))
    }

    pub fn submit_fok(
        &self,
        side: Side,
        price: Price,
        qty: Qty,
    ) -> Result<SubmitAck, OrderBookError> {
        self.call(move |engine| router::submit_fok(engine, side, price, qty))
    }

    pub fn submit_ioc(
        &self,
        side: Side,
        price: Price,
        qty: Qty,
    ) -> Result<SubmitAck, OrderBookError> {
        self.call(move |engine| router::submit_ioc(engine, side, price, qty))
    }

    pub fn submit_stop(
        &self,
        side: Side,
        stop_price: Price,
        qty: Qty,
        mode: StopMode,
    ) -> Result<SubmitAck, OrderBookError> {
        self.call(move |engine| router::submit_stop(engine, side, stop_price, qty, mode))
    }

    pub fn cancel_order(&self, id: OrderId) -> Result<(), OrderBookError> {
        self.call(move |engine| engine.cancel_order(id))
    }

    pub fn cancel_stop(&self, id: StopId) -> Result<(), OrderBookError> {
        self.call(move |engine| engine.cancel_stop(id))
    }

    /// The tagged `submit`/`cancel` entry points, mirroring
    /// `EngineState::submit`/`EngineState::cancel` for callers that hold
    /// a `SubmitRequest`/`CancelTarget` rather than unpacked arguments.
    pub fn submit(&self, request: SubmitRequest) -> Result<SubmitAck, OrderBookError> {
        self.call(move |engine| engine.submit(request))
    }

    pub fn cancel(&self, target: CancelTarget) -> Result<(), OrderBookError> {
        self.call(move |engine| engine.cancel(target))
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.call(|engine| engine.best_bid())
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.call(|engine| engine.best_ask())
    }

    pub fn spread(&self) -> Option<Price> {
        self.call(|engine| engine.spread())
    }

    pub fn last_trade_price(&self) -> Option<Price> {
        self.call(|engine| engine.last_trade_price())
    }

    pub fn depth(&self, side: Side, max_levels: usize) -> Vec<(Price, Qty)> {
        self.call(move |engine| engine.depth(side, max_levels))
    }
}
