//! SSDP (Simple Service Discovery Protocol) client for gateway discovery
//!
//! Internal M-SEARCH client used to locate Internet Gateway Devices on the
//! local network. Not part of the public API.

use crate::error::{DiscoveryError, Result};
use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::time::Duration;

const SSDP_MULTICAST_ADDR: &str = "239.255.255.250:1900";

/// SSDP response containing device information
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SsdpResponse {
    pub location: String,
    pub search_target: String,
    pub usn: String,
    pub server: Option<String>,
    pub peer: SocketAddr,
}

/// SSDP client for gateway discovery
pub(crate) struct SsdpClient {
    socket: UdpSocket,
}

impl SsdpClient {
    /// Create a new SSDP client with the specified timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to bind UDP socket: {}", e)))?;

        socket
            .set_read_timeout(Some(timeout))
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set read timeout: {}", e)))?;

        socket
            .set_multicast_loop_v4(true)
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set multicast loop: {}", e)))?;

        Ok(Self { socket })
    }

    /// Send an M-SEARCH request and return an iterator of responses
    pub fn search(&self, search_target: &str) -> Result<SsdpResponseIterator> {
        let request = format!(
            "M-SEARCH * HTTP/1.1\r\n\
             HOST: 239.255.255.250:1900\r\n\
             MAN: \"ssdp:discover\"\r\n\
             MX: 2\r\n\
             ST: {}\r\n\
             USER-AGENT: nat-upnp-rs/0.1 UPnP/1.0\r\n\
             \r\n",
            search_target
        );

        self.socket
            .send_to(request.as_bytes(), SSDP_MULTICAST_ADDR)
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to send M-SEARCH: {}", e)))?;

        Ok(SsdpResponseIterator::new(&self.socket))
    }
}

/// Iterator for SSDP responses
pub(crate) struct SsdpResponseIterator<'a> {
    socket: &'a UdpSocket,
    buffer: [u8; 2048],
    finished: bool,
}

impl<'a> SsdpResponseIterator<'a> {
    fn new(socket: &'a UdpSocket) -> Self {
        Self {
            socket,
            buffer: [0; 2048],
            finished: false,
        }
    }
}

impl<'a> Iterator for SsdpResponseIterator<'a> {
    type Item = Result<SsdpResponse>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            match self.socket.recv_from(&mut self.buffer) {
                Ok((size, peer)) => {
                    let Ok(response_text) = std::str::from_utf8(&self.buffer[..size]) else {
                        continue;
                    };
                    if let Some(response) = parse_ssdp_response(response_text, peer) {
                        return Some(Ok(response));
                    }
                    // Not a usable response, keep reading until the timeout
                }
                Err(e) => {
                    self.finished = true;
                    return match e.kind() {
                        // Read timeout reached, the search window is over
                        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => {
                            Some(Err(DiscoveryError::Timeout))
                        }
                        _ => Some(Err(DiscoveryError::NetworkError(format!(
                            "Failed to receive SSDP response: {}",
                            e
                        )))),
                    };
                }
            }
        }
    }
}

/// Parse an SSDP HTTP-over-UDP response into its interesting headers
fn parse_ssdp_response(text: &str, peer: SocketAddr) -> Option<SsdpResponse> {
    let mut lines = text.lines();

    let status_line = lines.next()?;
    if !status_line.starts_with("HTTP/1.1 200") {
        return None;
    }

    let mut location = None;
    let mut search_target = None;
    let mut usn = None;
    let mut server = None;

    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match name.trim().to_ascii_uppercase().as_str() {
            "LOCATION" => location = Some(value.to_string()),
            "ST" => search_target = Some(value.to_string()),
            "USN" => usn = Some(value.to_string()),
            "SERVER" => server = Some(value.to_string()),
            _ => {}
        }
    }

    Some(SsdpResponse {
        location: location?,
        search_target: search_target?,
        usn: usn.unwrap_or_default(),
        server,
        peer,
    })
}

/// Determine the local interface address used to reach `peer`.
///
/// The kernel picks the outgoing interface on connect; the bound local
/// address is the one a port mapping's internal client should use.
pub(crate) fn local_addr_for(peer: &SocketAddr) -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect(peer).ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}
