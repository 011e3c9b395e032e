//! Error types for the discovery system.

use std::fmt;

/// Error type for discovery operations.
///
/// Represents the failure modes of gateway discovery: network issues,
/// parsing failures, timeouts, and non-gateway devices answering the
/// search.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Network-related errors (socket creation, HTTP requests, etc.)
    NetworkError(String),
    /// Parsing errors (XML, SSDP response, etc.)
    ParseError(String),
    /// Operation timed out waiting for responses
    Timeout,
    /// The responding device is not an Internet Gateway Device
    NotAGateway(String),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DiscoveryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DiscoveryError::Timeout => write!(f, "Operation timed out"),
            DiscoveryError::NotAGateway(msg) => write!(f, "Not a gateway: {}", msg),
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
