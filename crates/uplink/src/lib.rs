//! Network reachability monitoring for uplink.
//!
//! This crate determines, and continuously tracks, whether a host has
//! usable internet connectivity, distinguishing "link up" from "internet
//! reachable":
//!
//! - **One-shot checks**: ask for the current verdict once
//! - **Notifier**: continuous observation with change notification
//! - **Pluggable strategies**: passive link inspection or active endpoint
//!   probing, swappable at runtime
//!
//! # One-Shot Check
//!
//! ```ignore
//! use uplink::{ConnectivityMonitor, MonitorConfig};
//!
//! let monitor = ConnectivityMonitor::new(MonitorConfig::default())?;
//!
//! let status = monitor.check_once().await;
//! println!("Connectivity: {}", status);
//! ```
//!
//! # Continuous Observation
//!
//! ```ignore
//! use uplink::{ConnectivityMonitor, MonitorConfig, Status};
//!
//! let monitor = ConnectivityMonitor::new(MonitorConfig::default())?;
//!
//! // Connect to status changes
//! monitor.status_changed.connect(|status: &Status| {
//!     println!("Connectivity changed: {}", status);
//! });
//!
//! // Start polling in the background
//! monitor.start_notifier();
//!
//! // ... later
//! monitor.stop_notifier();
//! ```
//!
//! # Strategies
//!
//! Two strategies are built in and can be switched at runtime (a switch
//! while observing triggers an immediate re-check):
//!
//! ```ignore
//! use uplink::StrategyKind;
//!
//! monitor.set_strategy(StrategyKind::Passive);
//! ```
//!
//! Anything implementing [`ProbeStrategy`] can be plugged in via
//! [`ConnectivityMonitor::set_probe`].
//!
//! # Failure Model
//!
//! Network-level failures are expected steady-state events (airplane mode,
//! captive portals) and are folded into [`Status`] values; the monitor
//! never surfaces them as errors. Only configuration mistakes are hard
//! errors, surfaced synchronously as [`ConfigError`].

mod classify;
mod config;
mod error;
pub mod link;
mod monitor;
pub mod probe;
mod status;

pub use classify::classify;
pub use config::{MonitorConfig, StrategyKind};
pub use error::{ConfigError, ProbeError};
pub use link::{LinkSnapshot, Transport};
pub use monitor::{ConnectivityMonitor, MonitorState};
pub use probe::{
    ActiveProbeStrategy, PassiveLinkStrategy, ProbeResult, ProbeStrategy, Reachability,
};
pub use status::Status;

// Re-export the observer primitives so downstream code does not need a
// direct uplink-core dependency.
pub use uplink_core::{ConnectionGuard, ConnectionId, Signal};
