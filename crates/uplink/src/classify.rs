//! Status classification.

use crate::link::Transport;
use crate::probe::{ProbeResult, Reachability};
use crate::status::Status;

/// Map a raw probe result to a status verdict.
///
/// Pure and deterministic: equal inputs always classify to equal statuses.
///
/// - no link → [`Status::NotConnected`]
/// - link up, reachability unknown → best-effort connected, transport-qualified
///   when the transport is known
/// - link up, unreachable → `*WithoutInternet` per transport, or
///   [`Status::NotConnected`] when the transport is unknown
/// - link up, reachable → connected per transport
pub fn classify(result: &ProbeResult) -> Status {
    if !result.link_up {
        return Status::NotConnected;
    }

    match (result.internet, result.transport) {
        (Reachability::Unknown, Transport::Wifi) => Status::ConnectedViaWifi,
        (Reachability::Unknown, Transport::Cellular) => Status::ConnectedViaCellular,
        (Reachability::Unknown, _) => Status::Connected,

        (Reachability::Unreachable, Transport::Wifi) => Status::ConnectedViaWifiWithoutInternet,
        (Reachability::Unreachable, Transport::Cellular) => {
            Status::ConnectedViaCellularWithoutInternet
        }
        (Reachability::Unreachable, _) => Status::NotConnected,

        (Reachability::Reachable, Transport::Wifi) => Status::ConnectedViaWifi,
        (Reachability::Reachable, Transport::Cellular) => Status::ConnectedViaCellular,
        (Reachability::Reachable, _) => Status::Connected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(link_up: bool, transport: Transport, internet: Reachability) -> ProbeResult {
        ProbeResult {
            link_up,
            transport,
            internet,
        }
    }

    #[test]
    fn test_no_link_always_not_connected() {
        for transport in [Transport::Wifi, Transport::Cellular, Transport::Other, Transport::None] {
            for internet in [
                Reachability::Unknown,
                Reachability::Reachable,
                Reachability::Unreachable,
            ] {
                assert_eq!(
                    classify(&result(false, transport, internet)),
                    Status::NotConnected
                );
            }
        }
    }

    #[test]
    fn test_reachable_per_transport() {
        assert_eq!(
            classify(&result(true, Transport::Wifi, Reachability::Reachable)),
            Status::ConnectedViaWifi
        );
        assert_eq!(
            classify(&result(true, Transport::Cellular, Reachability::Reachable)),
            Status::ConnectedViaCellular
        );
        assert_eq!(
            classify(&result(true, Transport::Other, Reachability::Reachable)),
            Status::Connected
        );
        assert_eq!(
            classify(&result(true, Transport::None, Reachability::Reachable)),
            Status::Connected
        );
    }

    #[test]
    fn test_unreachable_per_transport() {
        assert_eq!(
            classify(&result(true, Transport::Wifi, Reachability::Unreachable)),
            Status::ConnectedViaWifiWithoutInternet
        );
        assert_eq!(
            classify(&result(true, Transport::Cellular, Reachability::Unreachable)),
            Status::ConnectedViaCellularWithoutInternet
        );
        // Unknown transport with a failed internet probe is not a usable
        // connection in any meaningful sense.
        assert_eq!(
            classify(&result(true, Transport::Other, Reachability::Unreachable)),
            Status::NotConnected
        );
        assert_eq!(
            classify(&result(true, Transport::None, Reachability::Unreachable)),
            Status::NotConnected
        );
    }

    #[test]
    fn test_unknown_reachability_is_best_effort() {
        assert_eq!(
            classify(&result(true, Transport::Wifi, Reachability::Unknown)),
            Status::ConnectedViaWifi
        );
        assert_eq!(
            classify(&result(true, Transport::Cellular, Reachability::Unknown)),
            Status::ConnectedViaCellular
        );
        assert_eq!(
            classify(&result(true, Transport::Other, Reachability::Unknown)),
            Status::Connected
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        for transport in [Transport::Wifi, Transport::Cellular, Transport::Other, Transport::None] {
            for internet in [
                Reachability::Unknown,
                Reachability::Reachable,
                Reachability::Unreachable,
            ] {
                for link_up in [false, true] {
                    let r = result(link_up, transport, internet);
                    assert_eq!(classify(&r), classify(&r));
                }
            }
        }
    }
}
