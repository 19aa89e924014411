//! One-shot mDNS discovery prober for BluOS players.

use crate::error::{DiscoveryError, Result};
use crate::session;
use async_channel::Sender;
use blubar_core::config::bluos_service_types;
use blubar_core::types::{DeviceAddress, DiscoveredDevice};
use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Maximum number of replies to buffer between the browse task and the
/// collecting loop
const REPLY_CHANNEL_CAPACITY: usize = 64;

/// Pause between successive service-type queries, to avoid flooding the
/// local segment. Not counted against the session deadline.
const QUERY_GAP: Duration = Duration::from_millis(100);

/// Best-effort mDNS prober for BluOS players.
///
/// A prober is cheap to construct and holds no network resources; the
/// multicast transport is acquired and released within each call to
/// [`discover`](DiscoveryProber::discover).
pub struct DiscoveryProber {
    service_types: Vec<String>,
}

impl DiscoveryProber {
    /// Creates a prober querying the well-known BluOS service types.
    pub fn new() -> Self {
        Self {
            service_types: bluos_service_types(),
        }
    }

    /// Creates a prober querying a custom set of service types, in order.
    pub fn with_service_types(service_types: Vec<String>) -> Self {
        Self { service_types }
    }

    /// Runs one discovery pass bounded by `timeout`.
    ///
    /// Each configured service type is queried in declared order with a soft
    /// window of `timeout / service_type_count`; replies carrying a
    /// resolvable IPv4 address accumulate into the result, deduplicated by
    /// base URL in first-seen order. The pass as a whole never outlives
    /// `timeout`: collection races the reply stream against a hard deadline
    /// and returns whatever has arrived when it fires.
    ///
    /// An empty result is not an error. A query failing for one service type
    /// is logged and does not abort the remaining queries.
    pub async fn discover(&self, timeout: Duration) -> Result<Vec<DiscoveredDevice>> {
        if timeout.is_zero() {
            return Err(DiscoveryError::InvalidTimeout);
        }
        if self.service_types.is_empty() {
            return Err(DiscoveryError::NoServiceTypes);
        }

        info!(?timeout, "starting BluOS device discovery");

        let daemon =
            ServiceDaemon::new().map_err(|e| DiscoveryError::DaemonInit(e.to_string()))?;

        let (tx, rx) = async_channel::bounded(REPLY_CHANNEL_CAPACITY);
        let window = timeout / self.service_types.len() as u32;

        let producer = tokio::spawn(run_queries(
            daemon.clone(),
            self.service_types.clone(),
            window,
            tx,
        ));

        let devices = session::collect_candidates(rx, timeout).await;

        // The deadline (or completion) ends the pass; any still-running
        // query is abandoned and its late replies are discarded.
        producer.abort();
        if let Err(e) = daemon.shutdown() {
            debug!(error = %e, "mDNS daemon shutdown failed");
        }

        info!(count = devices.len(), "discovery pass complete");
        Ok(devices)
    }
}

impl Default for DiscoveryProber {
    fn default() -> Self {
        Self::new()
    }
}

/// Browses each service type in turn, forwarding resolved replies to `tx`.
async fn run_queries(
    daemon: ServiceDaemon,
    service_types: Vec<String>,
    window: Duration,
    tx: Sender<DiscoveredDevice>,
) {
    for service_type in &service_types {
        debug!(service_type = %service_type, "browsing for service type");

        let receiver = match daemon.browse(service_type) {
            Ok(receiver) => receiver,
            Err(e) => {
                warn!(service_type = %service_type, error = %e, "service query failed");
                continue;
            }
        };

        let window_end = tokio::time::Instant::now() + window;
        loop {
            match tokio::time::timeout_at(window_end, receiver.recv_async()).await {
                Ok(Ok(ServiceEvent::ServiceResolved(reply))) => {
                    if let Some(device) = device_from_reply(&reply) {
                        // Send fails once the collector has hit its deadline
                        // and dropped the receiver; stop browsing then.
                        if tx.send(device).await.is_err() {
                            return;
                        }
                    }
                }
                Ok(Ok(_)) => {}
                Ok(Err(_)) => break,
                // Soft window for this service type elapsed.
                Err(_) => break,
            }
        }

        if let Err(e) = daemon.stop_browse(service_type) {
            debug!(service_type = %service_type, error = %e, "stop_browse failed");
        }

        tokio::time::sleep(QUERY_GAP).await;
    }
}

/// Converts a resolved mDNS reply into a device record, if it carries an
/// IPv4 address.
fn device_from_reply(reply: &ServiceInfo) -> Option<DiscoveredDevice> {
    let host = reply.get_addresses().iter().find_map(|addr| match addr {
        IpAddr::V4(v4) => Some(*v4),
        _ => None,
    })?;

    Some(DiscoveredDevice::new(
        DeviceAddress::new(host, reply.get_port()),
        reply.get_fullname(),
        reply.get_hostname(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_timeout_is_a_configuration_error() {
        let prober = DiscoveryProber::new();
        let result = prober.discover(Duration::ZERO).await;

        // Rejected before any network activity.
        assert!(matches!(result, Err(DiscoveryError::InvalidTimeout)));
    }

    #[tokio::test]
    async fn test_empty_service_types_rejected() {
        let prober = DiscoveryProber::with_service_types(vec![]);
        let result = prober.discover(Duration::from_secs(1)).await;

        assert!(matches!(result, Err(DiscoveryError::NoServiceTypes)));
    }

    #[test]
    fn test_default_service_types_are_bluos() {
        let prober = DiscoveryProber::default();
        assert_eq!(prober.service_types, bluos_service_types());
        assert_eq!(prober.service_types[0], "_musc._tcp.local.");
    }
}
