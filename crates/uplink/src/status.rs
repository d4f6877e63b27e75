//! Connectivity status verdicts.

/// Discrete connectivity verdict published by the monitor.
///
/// Exactly one status is current at any instant; transitions are atomic
/// with respect to observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// A check is in progress and there is no verdict yet.
    Determining,
    /// Reachable, but the strategy could not distinguish the transport.
    Connected,
    /// Reachable over a Wi-Fi interface.
    ConnectedViaWifi,
    /// Reachable over a cellular interface.
    ConnectedViaCellular,
    /// A Wi-Fi link is present but the internet probe failed.
    ConnectedViaWifiWithoutInternet,
    /// A cellular link is present but the internet probe failed.
    ConnectedViaCellularWithoutInternet,
    /// No usable link.
    NotConnected,
}

impl Default for Status {
    fn default() -> Self {
        Self::Determining
    }
}

impl Status {
    /// Whether this status represents a usable connection.
    ///
    /// `Determining` is neither connected nor disconnected.
    pub fn is_connected(&self) -> bool {
        matches!(
            self,
            Self::Connected | Self::ConnectedViaWifi | Self::ConnectedViaCellular
        )
    }

    /// Whether this status represents the absence of usable connectivity.
    pub fn is_disconnected(&self) -> bool {
        matches!(
            self,
            Self::ConnectedViaWifiWithoutInternet
                | Self::ConnectedViaCellularWithoutInternet
                | Self::NotConnected
        )
    }

    /// Whether a check is still in flight.
    pub fn is_determining(&self) -> bool {
        matches!(self, Self::Determining)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Determining => write!(f, "Determining connectivity status"),
            Self::Connected => write!(f, "Internet access available"),
            Self::ConnectedViaWifi => write!(f, "Connected via Wi-Fi"),
            Self::ConnectedViaCellular => write!(f, "Connected via cellular"),
            Self::ConnectedViaWifiWithoutInternet => {
                write!(f, "Wi-Fi connection without internet access")
            }
            Self::ConnectedViaCellularWithoutInternet => {
                write!(f, "Cellular connection without internet access")
            }
            Self::NotConnected => write!(f, "Not connected"),
        }
    }
}
