//! Error types for device discovery

use thiserror::Error;

/// Result type alias for discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Errors that can occur during a discovery pass
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The configured timeout budget is unusable. Raised before any network
    /// activity takes place.
    #[error("discovery timeout must be greater than zero")]
    InvalidTimeout,

    /// No service types were configured to query
    #[error("at least one service type must be configured for discovery")]
    NoServiceTypes,

    /// mDNS transport failed to initialize
    #[error("failed to initialize mDNS daemon: {0}")]
    DaemonInit(String),
}
