//! Internet Gateway Device discovery library
//!
//! This crate discovers UPnP Internet Gateway Devices (home/office routers)
//! on the local network using SSDP, validates their device descriptions,
//! and reports the description URL needed to control them.
//!
//! # Quick Start
//!
//! ```no_run
//! use gateway_discovery::get;
//!
//! // Discover all gateways on the network
//! let gateways = get();
//! for gateway in gateways {
//!     println!("Found {} at {}", gateway.friendly_name, gateway.location);
//! }
//! ```
//!
//! # Iterator-based Discovery
//!
//! For more control, use the iterator API:
//!
//! ```no_run
//! use gateway_discovery::{get_iter, GatewayEvent};
//!
//! for event in get_iter() {
//!     match event {
//!         GatewayEvent::Found(gateway) => {
//!             println!("Found: {}", gateway.location);
//!             // Can break early if needed
//!         }
//!     }
//! }
//! ```

mod discovery;
mod error;
mod ssdp;
pub mod device;

pub use discovery::DiscoveryIterator;
pub use error::{DiscoveryError, Result};

use std::net::IpAddr;
use std::time::Duration;

/// Information about a discovered Internet Gateway Device.
#[derive(Debug, Clone)]
pub struct Gateway {
    /// URL of the gateway's UPnP device description document
    pub location: String,
    /// Friendly name of the device
    pub friendly_name: String,
    /// Manufacturer, when the description declares one
    pub manufacturer: Option<String>,
    /// Model name, when the description declares one
    pub model_name: Option<String>,
    /// Local interface address used to reach the gateway; this is the
    /// natural default for a port mapping's internal client
    pub local_addr: Option<IpAddr>,
}

/// Events emitted during gateway discovery.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// An Internet Gateway Device was found on the network
    Found(Gateway),
}

/// Discover all gateways on the local network with a default 3-second timeout.
///
/// Convenience function that collects all discovered gateways into a Vec.
/// For more control over the discovery process, use `get_iter()` instead.
pub fn get() -> Vec<Gateway> {
    get_with_timeout(Duration::from_secs(3))
}

/// Discover all gateways on the local network with a custom timeout.
///
/// # Arguments
///
/// * `timeout` - Maximum duration to wait for network operations
pub fn get_with_timeout(timeout: Duration) -> Vec<Gateway> {
    get_iter_with_timeout(timeout)
        .map(|event| match event {
            GatewayEvent::Found(gateway) => gateway,
        })
        .collect()
}

/// Get an iterator for discovering gateways with a default 3-second timeout.
///
/// The iterator yields `GatewayEvent::Found` for each validated gateway,
/// allowing streaming processing and early termination.
pub fn get_iter() -> DiscoveryIterator {
    get_iter_with_timeout(Duration::from_secs(3))
}

/// Get an iterator for discovering gateways with a custom timeout.
///
/// # Arguments
///
/// * `timeout` - Maximum duration to wait for network operations
pub fn get_iter_with_timeout(timeout: Duration) -> DiscoveryIterator {
    DiscoveryIterator::new(timeout).unwrap_or_else(|_| {
        // If socket setup fails, an empty iterator beats panicking
        DiscoveryIterator::empty()
    })
}
