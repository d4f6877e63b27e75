//! Passive link-state probing.

use std::time::Duration;

use futures_util::future::BoxFuture;

use crate::error::ProbeError;
use crate::link::LinkSnapshot;
use crate::probe::{ProbeResult, ProbeStrategy, Reachability};

/// A strategy that inspects local interface state only.
///
/// Fast and traffic-free, but it cannot distinguish "link up without
/// internet" from "internet reachable"; it always reports
/// [`Reachability::Unknown`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveLinkStrategy;

impl PassiveLinkStrategy {
    /// Create a new passive strategy.
    pub fn new() -> Self {
        Self
    }
}

impl ProbeStrategy for PassiveLinkStrategy {
    fn probe(&self, _timeout: Duration) -> BoxFuture<'_, Result<ProbeResult, ProbeError>> {
        Box::pin(async move {
            let snapshot = LinkSnapshot::capture();
            tracing::trace!(
                target: "uplink::probe",
                link_up = snapshot.link_up,
                transport = %snapshot.transport,
                interface = snapshot.interface_name.as_deref().unwrap_or("-"),
                "passive probe"
            );

            if !snapshot.link_up {
                return Ok(ProbeResult::no_link());
            }

            Ok(ProbeResult {
                link_up: true,
                transport: snapshot.transport,
                internet: Reachability::Unknown,
            })
        })
    }

    fn name(&self) -> &str {
        "passive"
    }
}
