//! Reachability verification for candidate device addresses.

use crate::error::{ClientError, ProbeFailure, Result};
use blubar_core::types::{DeviceAddress, DiscoveredDevice};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

/// Status path used by the working-device check
const STATUS_PATH: &str = "/Status";

/// Paths tried in turn by the liveness check. Any response on any of them
/// counts as evidence of life.
const LIVENESS_PATHS: [&str; 3] = ["/Status", "/Volume", "/"];

/// Short timeout for the working-device check during selection
const DEFAULT_SELECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Longer timeout for the liveness check, tolerating a struggling host
const DEFAULT_LIVENESS_TIMEOUT: Duration = Duration::from_secs(15);

/// Confirms that candidate addresses actually serve requests.
///
/// Owns one HTTP client; per-request deadlines distinguish the fast
/// selection probe from the patient liveness probe.
#[derive(Debug, Clone)]
pub struct ReachabilityProbe {
    client: Client,
    select_timeout: Duration,
    liveness_timeout: Duration,
}

impl ReachabilityProbe {
    /// Creates a probe with the default two-tier timeouts.
    pub fn new() -> Self {
        Self::with_timeouts(DEFAULT_SELECT_TIMEOUT, DEFAULT_LIVENESS_TIMEOUT)
    }

    /// Creates a probe with explicit timeouts for the working-device check
    /// and the liveness check.
    pub fn with_timeouts(select_timeout: Duration, liveness_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            select_timeout,
            liveness_timeout,
        }
    }

    /// Tries candidates strictly in input order and returns the first one
    /// whose status endpoint answers with a success status.
    ///
    /// Probing stops at the first success; later candidates are never
    /// contacted. Individual failures are logged with their cause and
    /// recovered. If every candidate fails, the error reports how many were
    /// tried.
    pub async fn select_working_device(
        &self,
        candidates: &[DiscoveredDevice],
    ) -> Result<DeviceAddress> {
        for candidate in candidates {
            debug!(device = %candidate, "testing candidate");

            match self.probe_status(&candidate.address.base_url()).await {
                Ok(status) => {
                    info!(device = %candidate.address, %status, "found working device");
                    return Ok(candidate.address);
                }
                Err(failure) => {
                    debug!(device = %candidate.address, cause = %failure, "candidate rejected");
                }
            }
        }

        Err(ClientError::NoWorkingDevice {
            tried: candidates.len(),
        })
    }

    /// Best-effort check that a host is alive at all, even if its API is
    /// misbehaving.
    ///
    /// Tries several well-known paths in sequence with the longer timeout.
    /// Any HTTP response, including a 404 or 500, returns `true`; `false`
    /// means every path failed to connect.
    pub async fn is_reachable(&self, base_url: &str) -> bool {
        for path in LIVENESS_PATHS {
            let url = format!("{base_url}{path}");
            debug!(url = %url, "checking reachability");

            match self.probe_endpoint(&url, self.liveness_timeout).await {
                Ok(status) => {
                    info!(url = %url, %status, "device answered");
                    return true;
                }
                Err(ProbeFailure::Status { status, .. }) => {
                    info!(url = %url, %status, "device answered with error status");
                    return true;
                }
                Err(failure) => {
                    debug!(url = %url, cause = %failure, "no answer");
                }
            }
        }

        debug!(base_url = %base_url, "device is completely unreachable");
        false
    }

    /// Probes the status endpoint of a base address with the short
    /// selection timeout.
    pub async fn probe_status(
        &self,
        base_url: &str,
    ) -> std::result::Result<StatusCode, ProbeFailure> {
        let url = format!("{base_url}{STATUS_PATH}");
        self.probe_endpoint(&url, self.select_timeout).await
    }

    async fn probe_endpoint(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<StatusCode, ProbeFailure> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|source| ProbeFailure::Connection {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(status)
        } else {
            Err(ProbeFailure::Status {
                url: url.to_string(),
                status,
            })
        }
    }
}

impl Default for ReachabilityProbe {
    fn default() -> Self {
        Self::new()
    }
}
