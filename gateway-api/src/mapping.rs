//! Port mapping model types.

use std::fmt;
use std::str::FromStr;

/// Transport protocol of a port mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Wire form used by the IGD services
        match self {
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Udp => write!(f, "UDP"),
        }
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TCP" => Ok(Protocol::Tcp),
            "UDP" => Ok(Protocol::Udp),
            other => Err(format!("unknown protocol: {}", other)),
        }
    }
}

/// One NAT port mapping entry as reported by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct PortMapping {
    /// Remote host restriction; `None` means any remote host
    pub remote_host: Option<String>,
    /// Port on the gateway's WAN side
    pub external_port: u16,
    pub protocol: Protocol,
    /// Port on the mapped LAN host
    pub internal_port: u16,
    /// Address of the mapped LAN host
    pub internal_client: String,
    pub enabled: bool,
    pub description: String,
    /// Remaining lease in seconds; 0 means unlimited
    pub lease_duration: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_wire_form() {
        assert_eq!(Protocol::Tcp.to_string(), "TCP");
        assert_eq!(Protocol::Udp.to_string(), "UDP");
    }

    #[test]
    fn test_protocol_parses_case_insensitively() {
        assert_eq!("tcp".parse::<Protocol>().unwrap(), Protocol::Tcp);
        assert_eq!("UDP".parse::<Protocol>().unwrap(), Protocol::Udp);
        assert!("sctp".parse::<Protocol>().is_err());
    }
}
