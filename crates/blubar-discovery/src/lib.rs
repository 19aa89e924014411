//! mDNS discovery of BluOS players on the local network.
//!
//! This crate implements a one-shot, best-effort discovery pass: it browses
//! for a fixed set of BluOS service types, splits the overall timeout budget
//! evenly across them, and accumulates every reply with a resolvable IPv4
//! address into a deduplicated candidate list.
//!
//! # Architecture
//!
//! A discovery pass runs as two cooperating halves:
//!
//! 1. A spawned producer browses each service type in declared order and
//!    forwards resolved replies into a bounded channel.
//! 2. The consumer races "next reply" against a hard session deadline and
//!    owns the accumulating result set exclusively.
//!
//! The hard deadline is independent of the per-service-type soft windows, so
//! inter-query pauses can never stretch a pass beyond its budget. Replies
//! collected before the deadline fires are returned as a valid partial
//! result; late producer output is discarded.
//!
//! # Example
//!
//! ```no_run
//! use blubar_discovery::{DiscoveryError, DiscoveryProber};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DiscoveryError> {
//!     let prober = DiscoveryProber::new();
//!     let devices = prober.discover(Duration::from_secs(5)).await?;
//!
//!     for device in &devices {
//!         println!("found {device}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod prober;
mod session;

pub use error::{DiscoveryError, Result};
pub use prober::DiscoveryProber;
