//! # blubar-core
//!
//! Core types and configuration for the blubar BluOS device resolver.
//!
//! This crate provides the foundational building blocks shared by the
//! discovery and client crates:
//!
//! - **Types**: `DeviceAddress` (a resolved player base address) and
//!   `DiscoveredDevice` (one mDNS reply, alive for a single discovery pass).
//! - **Configuration**: `ResolverConfig`, an explicit configuration struct
//!   constructed once at startup and passed into the resolution entry point.
//!   There are no ambient configuration reads anywhere in the system.

pub mod config;
pub mod types;

// Re-export commonly used types for convenience
pub use config::ResolverConfig;
pub use types::{DeviceAddress, DiscoveredDevice};
