//! Core discovery logic and iterator implementation.
//!
//! The discovery algorithm:
//! 1. Sends an SSDP M-SEARCH for Internet Gateway Devices
//! 2. Receives and filters SSDP responses
//! 3. Fetches candidate device descriptions via HTTP
//! 4. Validates that the device is a gateway
//! 5. Yields discovered gateways as events

use crate::device::fetch_gateway_description;
use crate::error::{DiscoveryError, Result};
use crate::ssdp::{local_addr_for, SsdpClient, SsdpResponse};
use crate::GatewayEvent;
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

const IGD_SEARCH_TARGET: &str = "urn:schemas-upnp-org:device:InternetGatewayDevice:1";

/// Iterator that discovers Internet Gateway Devices on the local network.
///
/// Performs SSDP discovery and yields `GatewayEvent::Found` for each
/// validated gateway. Handles deduplication by description URL, filtering
/// of non-gateway responders, and UDP socket cleanup.
///
/// # Examples
///
/// ```no_run
/// use gateway_discovery::{get_iter, GatewayEvent};
///
/// for event in get_iter() {
///     match event {
///         GatewayEvent::Found(gateway) => {
///             println!("Found: {}", gateway.location);
///         }
///     }
/// }
/// ```
pub struct DiscoveryIterator {
    ssdp_client: Option<SsdpClient>,
    ssdp_buffer: Vec<SsdpResponse>,
    buffer_index: usize,
    seen_locations: HashSet<String>,
    http_client: reqwest::blocking::Client,
}

impl DiscoveryIterator {
    /// Create a new discovery iterator with the specified timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let ssdp_client = SsdpClient::new(timeout)?;
        let http_client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DiscoveryError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            ssdp_client: Some(ssdp_client),
            ssdp_buffer: Vec::new(),
            buffer_index: 0,
            seen_locations: HashSet::new(),
            http_client,
        })
    }

    /// Create an empty iterator that yields no results
    ///
    /// Used as a fallback when socket initialization fails.
    pub(crate) fn empty() -> Self {
        Self {
            ssdp_client: None,
            ssdp_buffer: Vec::new(),
            buffer_index: 0,
            seen_locations: HashSet::new(),
            http_client: reqwest::blocking::Client::new(),
        }
    }

    /// Check if an SSDP response looks like a gateway (early filtering)
    fn is_likely_gateway(response: &SsdpResponse) -> bool {
        response.search_target.contains("InternetGatewayDevice")
            || response.usn.contains("InternetGatewayDevice")
    }

    /// Run the SSDP search and buffer every response within the timeout
    fn fill_buffer(&mut self) {
        if let Some(client) = self.ssdp_client.take() {
            match client.search(IGD_SEARCH_TARGET) {
                Ok(iter) => {
                    for result in iter {
                        match result {
                            Ok(response) => self.ssdp_buffer.push(response),
                            Err(DiscoveryError::Timeout) => {
                                debug!(
                                    responses = self.ssdp_buffer.len(),
                                    "SSDP search window closed"
                                );
                            }
                            Err(e) => {
                                debug!(error = %e, "SSDP receive failed");
                            }
                        }
                    }
                }
                Err(e) => {
                    debug!(error = %e, "SSDP search failed to start");
                }
            }
        }
    }
}

impl Iterator for DiscoveryIterator {
    type Item = GatewayEvent;

    fn next(&mut self) -> Option<Self::Item> {
        // Fill buffer on first call
        if self.ssdp_client.is_some() {
            self.fill_buffer();
        }

        loop {
            if self.buffer_index >= self.ssdp_buffer.len() {
                return None;
            }

            let ssdp_response = self.ssdp_buffer[self.buffer_index].clone();
            self.buffer_index += 1;

            // Deduplicate by description URL
            if !self.seen_locations.insert(ssdp_response.location.clone()) {
                continue;
            }

            if !Self::is_likely_gateway(&ssdp_response) {
                continue;
            }

            let description =
                match fetch_gateway_description(&self.http_client, &ssdp_response.location) {
                    Ok(description) => description,
                    Err(e) => {
                        debug!(location = %ssdp_response.location, error = %e, "skipping responder");
                        continue;
                    }
                };

            let local_addr = local_addr_for(&ssdp_response.peer);
            let gateway = description.to_gateway(ssdp_response.location, local_addr);

            return Some(GatewayEvent::Found(gateway));
        }
    }
}

impl Drop for DiscoveryIterator {
    fn drop(&mut self) {
        // Drop the SSDP client explicitly so the UDP socket is released
        // even when the iterator is abandoned early.
        if let Some(client) = self.ssdp_client.take() {
            drop(client);
        }
    }
}
