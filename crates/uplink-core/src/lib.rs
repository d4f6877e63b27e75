//! Core systems for uplink.
//!
//! This crate provides the foundational components the uplink connectivity
//! monitor is built on:
//!
//! - **Signal/Slot System**: Type-safe observer registration and dispatch
//! - **Runtime Management**: A lazily-initialized global tokio runtime for
//!   background work
//!
//! # Signal/Slot Example
//!
//! ```
//! use uplink_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod runtime;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
