//! Configuration for device resolution.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the device resolver.
///
/// Constructed once at startup (typically from a YAML file plus CLI/env
/// overrides) and handed to the resolution entry point by value. None of the
/// discovery or reachability logic reads configuration from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Statically configured fallback base address, e.g.
    /// `http://192.168.1.50:11000`. Used when discovery yields nothing
    /// usable; returned without re-verification.
    #[serde(default)]
    pub fallback_url: Option<String>,

    /// Human-readable network name, used only for diagnostic display.
    #[serde(default)]
    pub network_name: Option<String>,

    /// Overall discovery timeout budget (seconds)
    #[serde(default = "default_discovery_timeout")]
    pub discovery_timeout_secs: u64,

    /// Per-request timeout for the working-device check (seconds)
    #[serde(default = "default_select_timeout")]
    pub select_timeout_secs: u64,

    /// Per-request timeout for the liveness check (seconds)
    #[serde(default = "default_liveness_timeout")]
    pub liveness_timeout_secs: u64,

    /// mDNS service types to query, in query order
    #[serde(default = "bluos_service_types")]
    pub service_types: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback_url: None,
            network_name: None,
            discovery_timeout_secs: default_discovery_timeout(),
            select_timeout_secs: default_select_timeout(),
            liveness_timeout_secs: default_liveness_timeout(),
            service_types: bluos_service_types(),
        }
    }
}

impl ResolverConfig {
    /// Returns the discovery timeout as a Duration
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout_secs)
    }

    /// Returns the working-device check timeout as a Duration
    pub fn select_timeout(&self) -> Duration {
        Duration::from_secs(self.select_timeout_secs)
    }

    /// Returns the liveness check timeout as a Duration
    pub fn liveness_timeout(&self) -> Duration {
        Duration::from_secs(self.liveness_timeout_secs)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.discovery_timeout_secs == 0 {
            return Err("discovery_timeout_secs must be greater than zero".to_string());
        }

        if self.select_timeout_secs == 0 {
            return Err("select_timeout_secs must be greater than zero".to_string());
        }

        if self.liveness_timeout_secs == 0 {
            return Err("liveness_timeout_secs must be greater than zero".to_string());
        }

        if self.service_types.is_empty() {
            return Err("at least one service type must be configured".to_string());
        }

        if let Some(url) = &self.fallback_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("fallback_url must be an http(s) URL, got '{url}'"));
            }
        }

        Ok(())
    }
}

/// The well-known BluOS mDNS service types, in query order.
pub fn bluos_service_types() -> Vec<String> {
    vec![
        "_musc._tcp.local.".to_string(),
        "_musp._tcp.local.".to_string(),
        "_mush._tcp.local.".to_string(),
    ]
}

fn default_discovery_timeout() -> u64 {
    5
}

fn default_select_timeout() -> u64 {
    3
}

fn default_liveness_timeout() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ResolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.discovery_timeout(), Duration::from_secs(5));
        assert_eq!(config.service_types.len(), 3);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ResolverConfig {
            discovery_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_service_types_rejected() {
        let config = ResolverConfig {
            service_types: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_fallback_scheme_rejected() {
        let config = ResolverConfig {
            fallback_url: Some("192.168.1.50:11000".to_string()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("http"));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: ResolverConfig =
            serde_yaml::from_str("fallback_url: http://192.168.1.50:11000\n").unwrap();

        assert_eq!(
            config.fallback_url.as_deref(),
            Some("http://192.168.1.50:11000")
        );
        assert_eq!(config.discovery_timeout_secs, 5);
        assert_eq!(config.service_types, bluos_service_types());
        assert!(config.validate().is_ok());
    }
}
