//! Error types for device verification and resolution

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Why a single endpoint probe failed.
///
/// The two causes feed different diagnostics: a `Connection` failure means
/// the host never answered at the transport level, while a `Status` failure
/// means the host is alive but its API refused the request. The liveness
/// check treats the latter as evidence of life.
#[derive(Debug, Error)]
pub enum ProbeFailure {
    /// The transport failed to connect at all
    #[error("failed to connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived, but with a non-success HTTP status
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Errors surfaced by verification and resolution
#[derive(Debug, Error)]
pub enum ClientError {
    /// Resolver configuration failed validation
    #[error("invalid resolver configuration: {0}")]
    InvalidConfig(String),

    /// Candidates were found, but none passed the working-device check
    #[error("no working device among {tried} candidate(s)")]
    NoWorkingDevice { tried: usize },

    /// Neither discovery nor fallback configuration produced an address
    #[error("no device found via discovery and no fallback address configured")]
    NoDeviceFound,

    /// A status fetch exhausted its retry budget
    #[error("request to {url} failed after {attempts} attempt(s): {reason}")]
    Fetch {
        url: String,
        attempts: usize,
        reason: String,
    },

    /// The status document could not be parsed
    #[error("failed to parse status document: {0}")]
    Xml(#[from] quick_xml::de::DeError),
}
