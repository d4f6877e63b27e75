//! Probe strategies.
//!
//! A probe performs one reachability test and reports what it saw as a
//! [`ProbeResult`]. Strategies are pluggable: the monitor holds an
//! `Arc<dyn ProbeStrategy>` and will happily drive anything that implements
//! the single-method contract.
//!
//! Two strategies are built in:
//!
//! - [`PassiveLinkStrategy`] - local interface state only, no traffic
//! - [`ActiveProbeStrategy`] - interface state plus bounded-timeout
//!   connects to reachability endpoints

mod active;
mod passive;

use std::time::Duration;

use futures_util::future::BoxFuture;

use crate::error::ProbeError;
use crate::link::Transport;

pub use active::{ActiveProbeStrategy, default_endpoints};
pub use passive::PassiveLinkStrategy;

/// Whether the internet was reachable when a probe ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reachability {
    /// The strategy cannot tell (passive strategies always report this).
    Unknown,
    /// At least one reachability endpoint responded in time.
    Reachable,
    /// No endpoint responded in time.
    Unreachable,
}

/// The raw outcome of a single probe. Immutable once produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeResult {
    /// Whether a usable local link was present.
    pub link_up: bool,
    /// Interface type the link was observed on.
    pub transport: Transport,
    /// Internet reachability verdict.
    pub internet: Reachability,
}

impl ProbeResult {
    /// The result a probe reports when there is no usable link at all.
    pub fn no_link() -> Self {
        Self {
            link_up: false,
            transport: Transport::None,
            internet: Reachability::Unknown,
        }
    }
}

/// A pluggable probing algorithm.
///
/// Implementations must be safe to invoke repeatedly and concurrently; each
/// probe call is independent and carries no shared mutable state. A probe
/// is side-effect-free besides the network traffic it may generate, and
/// must honor the timeout it is given so a hung network call can never
/// wedge the polling loop.
///
/// Per-endpoint failures are expected data, not errors: strategies fold
/// them into the returned [`ProbeResult`]. The `Err` path is reserved for
/// environmental failures such as [`ProbeError::PlatformUnavailable`].
pub trait ProbeStrategy: Send + Sync {
    /// Perform one reachability test, bounded by `timeout`.
    fn probe(&self, timeout: Duration) -> BoxFuture<'_, Result<ProbeResult, ProbeError>>;

    /// Short name for log lines.
    fn name(&self) -> &str {
        "custom"
    }
}
