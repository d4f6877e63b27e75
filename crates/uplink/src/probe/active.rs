//! Active reachability probing.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::net::TcpStream;

use crate::error::ProbeError;
use crate::link::LinkSnapshot;
use crate::probe::{ProbeResult, ProbeStrategy, Reachability};

/// A strategy that verifies internet reachability with real traffic.
///
/// The local link is checked first so the probe fails fast when there is no
/// interface to speak of. With a link present, bounded-timeout TCP connects
/// race against every configured endpoint; the first endpoint that accepts
/// decides the verdict.
#[derive(Clone, Debug)]
pub struct ActiveProbeStrategy {
    endpoints: Vec<SocketAddr>,
}

impl Default for ActiveProbeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveProbeStrategy {
    /// Create a strategy probing the default well-known endpoints.
    pub fn new() -> Self {
        Self {
            endpoints: default_endpoints(),
        }
    }

    /// Create a strategy probing the given endpoints.
    pub fn with_endpoints(endpoints: Vec<SocketAddr>) -> Self {
        Self { endpoints }
    }

    /// The endpoints this strategy probes.
    pub fn endpoints(&self) -> &[SocketAddr] {
        &self.endpoints
    }
}

/// Well-known endpoints used when none are configured.
pub fn default_endpoints() -> Vec<SocketAddr> {
    vec![
        SocketAddr::from(([1, 1, 1, 1], 80)),        // Cloudflare
        SocketAddr::from(([8, 8, 8, 8], 53)),        // Google DNS
        SocketAddr::from(([208, 67, 222, 222], 53)), // OpenDNS
    ]
}

impl ProbeStrategy for ActiveProbeStrategy {
    fn probe(&self, timeout: Duration) -> BoxFuture<'_, Result<ProbeResult, ProbeError>> {
        Box::pin(async move {
            let snapshot = LinkSnapshot::capture();
            if !snapshot.link_up {
                tracing::trace!(target: "uplink::probe", "active probe: no link, skipping endpoints");
                return Ok(ProbeResult::no_link());
            }

            let internet = if any_endpoint_reachable(&self.endpoints, timeout).await {
                Reachability::Reachable
            } else {
                Reachability::Unreachable
            };

            tracing::trace!(
                target: "uplink::probe",
                transport = %snapshot.transport,
                internet = ?internet,
                "active probe"
            );

            Ok(ProbeResult {
                link_up: true,
                transport: snapshot.transport,
                internet,
            })
        })
    }

    fn name(&self) -> &str {
        "active"
    }
}

/// Race connects against all endpoints; any successful endpoint wins.
async fn any_endpoint_reachable(endpoints: &[SocketAddr], timeout: Duration) -> bool {
    if endpoints.is_empty() {
        tracing::warn!(
            target: "uplink::probe",
            "active probe has no endpoints configured; reporting unreachable"
        );
        return false;
    }

    let mut pending: FuturesUnordered<_> = endpoints
        .iter()
        .map(|&addr| async move { (addr, connect_endpoint(addr, timeout).await) })
        .collect();

    while let Some((addr, outcome)) = pending.next().await {
        match outcome {
            Ok(()) => {
                tracing::debug!(target: "uplink::probe", endpoint = %addr, "endpoint answered");
                return true;
            }
            Err(err) => {
                tracing::debug!(target: "uplink::probe", endpoint = %addr, %err, "endpoint failed");
            }
        }
    }

    false
}

/// One bounded connect attempt against a single endpoint.
async fn connect_endpoint(addr: SocketAddr, timeout: Duration) -> Result<(), ProbeError> {
    match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => Ok(()),
        Ok(Err(_)) => Err(ProbeError::UnreachableEndpoint),
        Err(_) => Err(ProbeError::Timeout(timeout)),
    }
}
