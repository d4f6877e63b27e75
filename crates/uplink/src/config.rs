//! Monitor configuration types.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::probe::default_endpoints;

/// The closed set of built-in probe strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Local interface inspection only; no traffic.
    Passive,
    /// Interface inspection plus endpoint reachability checks.
    Active,
}

impl StrategyKind {
    /// All known strategies, for surfaces that enumerate them.
    pub fn all() -> [StrategyKind; 2] {
        [StrategyKind::Passive, StrategyKind::Active]
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passive => write!(f, "passive"),
            Self::Active => write!(f, "active"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passive" => Ok(Self::Passive),
            "active" => Ok(Self::Active),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Configuration for a [`ConnectivityMonitor`](crate::ConnectivityMonitor).
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Which built-in strategy the monitor starts with.
    pub strategy: StrategyKind,

    /// Interval between polls while the notifier is running.
    pub poll_interval: Duration,

    /// Optional slower interval used while the owning application is
    /// backgrounded. `None` keeps `poll_interval` in both modes.
    pub background_poll_interval: Option<Duration>,

    /// Upper bound on a single probe. A hung network call is abandoned at
    /// this point and counts as unreachable.
    pub probe_timeout: Duration,

    /// Reachability endpoints for the active strategy.
    pub endpoints: Vec<SocketAddr>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Active,
            poll_interval: Duration::from_secs(10),
            background_poll_interval: None,
            probe_timeout: Duration::from_secs(5),
            endpoints: default_endpoints(),
        }
    }
}

impl MonitorConfig {
    /// Create a configuration with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting strategy.
    pub fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the poll interval.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the background poll interval.
    pub fn background_poll_interval(mut self, interval: Duration) -> Self {
        self.background_poll_interval = Some(interval);
        self
    }

    /// Set the per-probe timeout.
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the reachability endpoints for the active strategy.
    pub fn endpoints(mut self, endpoints: Vec<SocketAddr>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Validate the configuration.
    ///
    /// Intervals and the probe timeout must be greater than zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::InvalidPollInterval(self.poll_interval));
        }
        if let Some(background) = self.background_poll_interval {
            if background.is_zero() {
                return Err(ConfigError::InvalidPollInterval(background));
            }
        }
        if self.probe_timeout.is_zero() {
            return Err(ConfigError::InvalidProbeTimeout(self.probe_timeout));
        }
        Ok(())
    }
}
