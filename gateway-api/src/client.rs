//! High-level port mapping client.
//!
//! Wraps a `Device` with the operations most callers want: query the
//! public IP, open and close mappings, and list the mapping table.

use crate::device::Device;
use crate::error::{IgdError, Result};
use crate::mapping::{PortMapping, Protocol};
use crate::operations::{
    AddPortMapping, DeletePortMapping, GetExternalIpAddress, GetGenericPortMappingEntry,
};
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

/// Options for creating a port mapping.
///
/// `internal_port` defaults to the external port and `internal_client`
/// defaults to the local address recorded at discovery time, when one is
/// known.
#[derive(Debug, Clone)]
pub struct PortMappingOptions {
    pub protocol: Protocol,
    pub external_port: u16,
    pub internal_port: Option<u16>,
    pub internal_client: Option<String>,
    pub remote_host: Option<String>,
    pub description: Option<String>,
    /// Lease in seconds; 0 requests an unlimited lease
    pub lease_duration: u32,
}

impl PortMappingOptions {
    /// Map `external_port` to the same port on the given protocol; every
    /// other field takes its default.
    pub fn new(protocol: Protocol, external_port: u16) -> Self {
        Self {
            protocol,
            external_port,
            internal_port: None,
            internal_client: None,
            remote_host: None,
            description: None,
            lease_duration: 0,
        }
    }
}

/// A client for managing NAT port mappings on one gateway
///
/// The client holds no session state: every call runs its own
/// description fetch and service resolution against the device, so
/// concurrent calls never interfere with each other.
#[derive(Debug, Clone)]
pub struct IgdClient {
    device: Device,
    local_addr: Option<IpAddr>,
}

impl IgdClient {
    /// Create a client for an already-known device.
    pub fn new(device: Device) -> Self {
        Self {
            device,
            local_addr: None,
        }
    }

    /// Discover a gateway on the local network and create a client for
    /// it, with a default 3-second discovery timeout.
    ///
    /// # Errors
    ///
    /// `IgdError::Network` when no gateway answers the search.
    pub fn discover() -> Result<Self> {
        Self::discover_with_timeout(Duration::from_secs(3))
    }

    /// Discover a gateway with a custom timeout.
    pub fn discover_with_timeout(timeout: Duration) -> Result<Self> {
        let gateway = gateway_discovery::get_with_timeout(timeout)
            .into_iter()
            .next()
            .ok_or_else(|| IgdError::Network("no gateway found on the local network".to_string()))?;

        debug!(location = %gateway.location, name = %gateway.friendly_name, "gateway discovered");

        let device = Device::from_gateway(&gateway)?;
        Ok(Self {
            device,
            local_addr: gateway.local_addr,
        })
    }

    /// The underlying device handle.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Query the gateway's public IP address.
    pub fn external_ip(&self) -> Result<IpAddr> {
        self.device.execute(&GetExternalIpAddress)
    }

    /// Create a port mapping.
    ///
    /// # Errors
    ///
    /// `IgdError::InvalidParameter` when no internal client address is
    /// given and none was recorded at discovery time.
    pub fn add_port_mapping(&self, options: &PortMappingOptions) -> Result<()> {
        let internal_client = options
            .internal_client
            .clone()
            .or_else(|| self.local_addr.map(|addr| addr.to_string()))
            .ok_or_else(|| {
                IgdError::InvalidParameter("internal client address is required".to_string())
            })?;

        self.device.execute(&AddPortMapping {
            remote_host: options.remote_host.clone(),
            external_port: options.external_port,
            protocol: options.protocol,
            internal_port: options.internal_port.unwrap_or(options.external_port),
            internal_client,
            description: options
                .description
                .clone()
                .unwrap_or_else(|| "nat-upnp-rs".to_string()),
            lease_duration: options.lease_duration,
        })
    }

    /// Remove a port mapping.
    pub fn remove_port_mapping(
        &self,
        protocol: Protocol,
        external_port: u16,
        remote_host: Option<String>,
    ) -> Result<()> {
        self.device.execute(&DeletePortMapping {
            remote_host,
            external_port,
            protocol,
        })
    }

    /// List the gateway's port mapping table.
    ///
    /// Entries are fetched by index until the device rejects one; a UPnP
    /// fault or failed request on a later index ends the listing, while
    /// any other error propagates.
    pub fn port_mappings(&self) -> Result<Vec<PortMapping>> {
        let mut mappings = Vec::new();

        for index in 0.. {
            match self.device.execute(&GetGenericPortMappingEntry { index }) {
                Ok(mapping) => mappings.push(mapping),
                Err(IgdError::Fault(_)) | Err(IgdError::RequestFailed(_)) => break,
                Err(e) => return Err(e),
            }
        }

        debug!(count = mappings.len(), "port mapping table read");
        Ok(mappings)
    }
}
