//! Device resolution: discovery, verification, configured fallback.

use crate::error::{ClientError, Result};
use crate::probe::ReachabilityProbe;
use blubar_core::config::ResolverConfig;
use blubar_core::types::DiscoveredDevice;
use blubar_discovery::DiscoveryProber;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Where a resolved address came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Discovered on the network and verified by the working-device check
    Discovered,

    /// Statically configured fallback, trusted without re-verification
    Configured,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionSource::Discovered => write!(f, "discovered"),
            ResolutionSource::Configured => write!(f, "configured"),
        }
    }
}

/// A usable player base address for the rest of the system.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedDevice {
    /// Base URL of the player's HTTP API
    pub base_url: String,

    /// How the address was obtained
    pub source: ResolutionSource,
}

/// Produces a single usable device address.
///
/// Resolution is linear with no retries: discover, verify candidates in
/// discovery order, fall back to static configuration, or fail. Discovered
/// addresses are always verified before being trusted; only the configured
/// fallback is returned as-is.
pub struct DeviceResolver {
    config: ResolverConfig,
    prober: DiscoveryProber,
    probe: ReachabilityProbe,
}

impl DeviceResolver {
    /// Creates a resolver from a validated configuration.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        config.validate().map_err(ClientError::InvalidConfig)?;

        let prober = DiscoveryProber::with_service_types(config.service_types.clone());
        let probe =
            ReachabilityProbe::with_timeouts(config.select_timeout(), config.liveness_timeout());

        Ok(Self {
            config,
            prober,
            probe,
        })
    }

    /// Returns the reachability probe, for callers that want to run their
    /// own diagnostics against the resolved address.
    pub fn probe(&self) -> &ReachabilityProbe {
        &self.probe
    }

    /// Returns the resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves a device address: discovery first, then candidate
    /// verification, then the configured fallback.
    pub async fn resolve(&self) -> Result<ResolvedDevice> {
        let candidates = match self.prober.discover(self.config.discovery_timeout()).await {
            Ok(candidates) => candidates,
            Err(e) => {
                // Discovery is best-effort; a transport failure here is the
                // same as finding nothing.
                warn!(error = %e, "discovery failed");
                Vec::new()
            }
        };

        self.resolve_candidates(candidates).await
    }

    /// Runs the verification and fallback half of resolution over an
    /// already-obtained candidate list.
    ///
    /// Candidates are tried strictly in the given order. If none passes the
    /// working-device check and a fallback is configured, the fallback is
    /// returned unconditionally.
    pub async fn resolve_candidates(
        &self,
        candidates: Vec<DiscoveredDevice>,
    ) -> Result<ResolvedDevice> {
        if candidates.is_empty() {
            debug!("no candidates to verify");
        } else {
            match self.probe.select_working_device(&candidates).await {
                Ok(address) => {
                    return Ok(ResolvedDevice {
                        base_url: address.base_url(),
                        source: ResolutionSource::Discovered,
                    });
                }
                Err(e) => {
                    warn!(error = %e, "no discovered candidate passed the working-device check");
                }
            }
        }

        if let Some(url) = &self.config.fallback_url {
            info!(url = %url, "falling back to configured device address");
            return Ok(ResolvedDevice {
                base_url: url.clone(),
                source: ResolutionSource::Configured,
            });
        }

        Err(ClientError::NoDeviceFound)
    }
}
