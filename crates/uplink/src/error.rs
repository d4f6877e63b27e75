//! Error types for the connectivity monitor.

use std::time::Duration;

use thiserror::Error;

/// Errors a probe can fail with.
///
/// Probe failures are expected steady-state events (airplane mode, captive
/// portals, flaky links). The monitor recovers from them locally by folding
/// them into a [`Status`](crate::Status); they are never surfaced to
/// observers as errors.
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    /// The probe did not complete within its timeout.
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    /// No reachability endpoint could be contacted.
    #[error("no reachability endpoint could be contacted")]
    UnreachableEndpoint,

    /// The platform could not supply the information the probe needs
    /// (for example, interface enumeration failed).
    #[error("platform unavailable: {0}")]
    PlatformUnavailable(String),
}

/// Errors from validating monitor configuration.
///
/// These are programmer-error-class failures, surfaced synchronously from
/// the configuring call. They never disturb a monitor's existing state.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The poll interval must be greater than zero.
    #[error("invalid poll interval {0:?}: must be greater than zero")]
    InvalidPollInterval(Duration),

    /// The probe timeout must be greater than zero.
    #[error("invalid probe timeout {0:?}: must be greater than zero")]
    InvalidProbeTimeout(Duration),

    /// The named strategy is not one of the known kinds.
    #[error("unknown strategy {0:?}: expected \"passive\" or \"active\"")]
    UnknownStrategy(String),
}
