//! # blubar-client
//!
//! HTTP-side device verification and resolution for BluOS players.
//!
//! Discovery replies go stale: players reboot, DHCP leases change, and a
//! cached address may point at nothing. This crate provides the second,
//! confirming half of device resolution:
//!
//! - **Reachability verifier** ([`ReachabilityProbe`]): a short-timeout
//!   working-device check used during selection, and an independent
//!   long-timeout liveness check that tolerates a degraded API.
//! - **Device resolution** ([`DeviceResolver`]): discovery first, verified
//!   selection second, configured fallback last.
//! - **Status client** ([`StatusClient`]): a bounded-retry fetch of the
//!   player's status document, for diagnostic display.

pub mod error;
pub mod probe;
pub mod resolve;
pub mod status;

// Re-export commonly used types
pub use error::{ClientError, ProbeFailure, Result};
pub use probe::ReachabilityProbe;
pub use resolve::{DeviceResolver, ResolutionSource, ResolvedDevice};
pub use status::{PlayerStatus, StatusClient};
