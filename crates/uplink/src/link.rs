//! Local link inspection.
//!
//! This module answers the passive half of every reachability question:
//! does this host have a usable network link right now, and over what kind
//! of interface? It only reads local interface state; no traffic is
//! generated.

use netdev::interface::InterfaceType;

/// The network interface type active when a probe ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transport {
    /// A wireless (802.11) interface.
    Wifi,
    /// A cellular (WWAN) interface.
    Cellular,
    /// Some other usable interface (Ethernet, tunnel, ...).
    Other,
    /// No interface at all.
    None,
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wifi => write!(f, "Wi-Fi"),
            Self::Cellular => write!(f, "cellular"),
            Self::Other => write!(f, "other"),
            Self::None => write!(f, "none"),
        }
    }
}

/// A point-in-time view of the local link state.
#[derive(Clone, Debug)]
pub struct LinkSnapshot {
    /// Whether at least one non-loopback interface is up with an address.
    pub link_up: bool,
    /// Interface type of the default (internet-facing) interface.
    pub transport: Transport,
    /// Name of the interface the transport was read from, if any.
    pub interface_name: Option<String>,
}

impl LinkSnapshot {
    /// Capture the current link state from the system.
    ///
    /// The link is considered up if at least one non-loopback interface is
    /// up and has at least one IP address assigned. The transport is read
    /// from the default interface when the OS reports one, otherwise from
    /// the first usable interface found.
    pub fn capture() -> Self {
        let interfaces = netdev::get_interfaces();

        let usable = |iface: &netdev::Interface| {
            iface.is_up() && !iface.is_loopback() && (!iface.ipv4.is_empty() || !iface.ipv6.is_empty())
        };

        let link_up = interfaces.iter().any(usable);
        if !link_up {
            return Self {
                link_up: false,
                transport: Transport::None,
                interface_name: None,
            };
        }

        // Prefer the interface the OS routes internet traffic through.
        let chosen = netdev::get_default_interface()
            .ok()
            .filter(usable)
            .or_else(|| interfaces.into_iter().find(|iface| usable(iface)));

        match chosen {
            Some(iface) => Self {
                link_up: true,
                transport: classify_interface(iface.if_type),
                interface_name: Some(iface.name),
            },
            None => Self {
                link_up: true,
                transport: Transport::Other,
                interface_name: None,
            },
        }
    }
}

/// Map an OS interface type onto the transport set the classifier knows.
fn classify_interface(if_type: InterfaceType) -> Transport {
    match if_type {
        InterfaceType::Wireless80211 => Transport::Wifi,
        InterfaceType::Wwanpp | InterfaceType::Wwanpp2 => Transport::Cellular,
        _ => Transport::Other,
    }
}
