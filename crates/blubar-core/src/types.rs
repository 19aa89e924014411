//! Core types for BluOS device resolution.
//!
//! This module defines the address and device types passed between the
//! discovery prober, the reachability verifier, and the consuming menu layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// A resolved player base address (scheme + host + port).
///
/// The formatted base URL (`http://<ip>:<port>`) is the canonical string form
/// consumed by the HTTP layers, and doubles as the deduplication key within a
/// discovery pass.
///
/// # Examples
///
/// ```
/// use blubar_core::types::DeviceAddress;
/// use std::net::Ipv4Addr;
///
/// let addr = DeviceAddress::new(Ipv4Addr::new(192, 168, 1, 50), 11000);
/// assert_eq!(addr.base_url(), "http://192.168.1.50:11000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceAddress {
    /// Resolved IPv4 address of the player
    pub host: Ipv4Addr,

    /// Port the player's HTTP API listens on
    pub port: u16,
}

impl DeviceAddress {
    /// Creates a new device address.
    pub fn new(host: Ipv4Addr, port: u16) -> Self {
        Self { host, port }
    }

    /// Returns the HTTP base URL for this address.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}:{}", self.host, self.port)
    }
}

/// A device discovered during one mDNS pass.
///
/// Ephemeral: instances exist only for the duration of a single discovery
/// pass and are never persisted. Deduplication within a pass is keyed by
/// [`DeviceAddress::base_url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredDevice {
    /// Address derived from the resolved service reply
    pub address: DeviceAddress,

    /// Full service instance name from the reply
    pub instance_name: String,

    /// Host name advertised by the device
    pub hostname: String,
}

impl DiscoveredDevice {
    /// Creates a new discovered device record.
    pub fn new(
        address: DeviceAddress,
        instance_name: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            address,
            instance_name: instance_name.into(),
            hostname: hostname.into(),
        }
    }
}

impl fmt::Display for DiscoveredDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.instance_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_format() {
        let addr = DeviceAddress::new(Ipv4Addr::new(10, 0, 0, 7), 11000);
        assert_eq!(addr.base_url(), "http://10.0.0.7:11000");
        assert_eq!(addr.to_string(), addr.base_url());
    }

    #[test]
    fn test_address_equality_is_dedup_key() {
        let a = DeviceAddress::new(Ipv4Addr::new(192, 168, 1, 20), 11000);
        let b = DeviceAddress::new(Ipv4Addr::new(192, 168, 1, 20), 11000);
        let c = DeviceAddress::new(Ipv4Addr::new(192, 168, 1, 20), 11001);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.base_url(), b.base_url());
    }

    #[test]
    fn test_discovered_device_display() {
        let device = DiscoveredDevice::new(
            DeviceAddress::new(Ipv4Addr::new(192, 168, 1, 20), 11000),
            "Living Room._musc._tcp.local.",
            "living-room.local.",
        );

        assert_eq!(
            device.to_string(),
            "http://192.168.1.20:11000 (Living Room._musc._tcp.local.)"
        );
    }
}
