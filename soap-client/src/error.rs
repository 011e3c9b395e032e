//! Error types for the SOAP client

use thiserror::Error;

/// Errors that can occur during SOAP communication
#[derive(Debug, Error)]
pub enum SoapError {
    /// Transport-level failure (connect, DNS, socket I/O)
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The control endpoint answered with a non-success HTTP status
    #[error("Request failed: HTTP {0}")]
    RequestFailed(u16),

    /// SOAP response XML could not be parsed
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// No element qualified by the given namespace URI was found
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),

    /// UPnP fault returned by the device
    #[error("UPnP fault: error code {0}")]
    Fault(u16),
}
