//! # Limit Order Book Matching Engine
//!
//! A single-symbol, price-time-priority limit order book matching
//! engine. It owns two sides of resting orders, matches incoming
//! takers against them, and arms/triggers stop and stop-limit orders
//! off the resulting trade prices.
//!
//! ## Order types
//!
//! - **Limit**: rests on the book at its limit price if it doesn't
//!   fully match immediately.
//! - **Market**: matches against whatever liquidity exists; any
//!   unfilled remainder is cancelled, never rested.
//! - **Fill-or-Kill (FOK)**: only executes if it can be filled in full
//!   immediately; otherwise the whole order is killed with no book
//!   side effects.
//! - **Immediate-or-Cancel (IOC)**: matches what it can immediately;
//!   the remainder is cancelled rather than rested.
//! - **Stop / Stop-Limit**: arm off a trigger price and, once the
//!   market trades through that price, convert into a Market or Limit
//!   order and re-enter matching. Triggered stops can cascade: one
//!   stop's own trade can arm and trigger further stops in the same
//!   call.
//!
//! ## Two ways to drive the engine
//!
//! [`orderbook::EngineState`] is the engine itself: single-owner,
//! single-threaded, synchronous. Call its `submit_*`/`cancel_*` methods
//! directly when you already have exclusive access (e.g. inside your
//! own actor or event loop).
//!
//! [`orderbook::EngineHandle`] wraps an `EngineState` running on its
//! own thread behind a bounded channel, for callers that want a
//! cloneable, thread-safe handle instead of owning the state
//! themselves.
//!
//! ## Events
//!
//! Every state-changing operation emits one or more [`orderbook::Event`]
//! values, each carrying a strictly increasing sequence number, through
//! an [`orderbook::EventSink`]. [`orderbook::TracingEventSink`] logs via
//! `tracing`; [`orderbook::VecEventSink`] collects events into a `Vec`
//! for callers (and tests) that want to inspect the whole stream.

pub mod orderbook;

pub mod prelude;
