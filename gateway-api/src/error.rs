use soap_client::SoapError;
use thiserror::Error;

/// Errors produced while controlling an Internet Gateway Device
///
/// Nothing here is retried or suppressed internally, and nothing is
/// process-fatal; every error propagates to the invocation that caused it
/// and the caller decides whether to retry, escalate, or ignore.
#[derive(Debug, Error)]
pub enum IgdError {
    /// Transport-level failure (connect, DNS, socket I/O)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status while fetching the device description
    #[error("Failed to look up device description: HTTP {0}")]
    DeviceUnreachable(u16),

    /// The device description XML could not be parsed
    #[error("Failed to parse device description: {0}")]
    DescriptionParse(String),

    /// No acceptable service is present in the description, or the
    /// matching service lacks a control or SCPD URL
    #[error("Service not found")]
    ServiceNotFound,

    /// Non-success HTTP status on the SOAP POST
    #[error("Request failed: HTTP {0}")]
    RequestFailed(u16),

    /// The SOAP response XML could not be parsed
    #[error("Failed to parse SOAP response: {0}")]
    ResponseParse(String),

    /// The SOAP Body could not be located by namespace URI
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),

    /// UPnP fault returned by the device
    #[error("UPnP fault: error code {0}")]
    Fault(u16),

    /// The action succeeded but its response lacks an expected field
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// An operation parameter is missing or has an invalid value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Convenience Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, IgdError>;

impl From<SoapError> for IgdError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Network(msg) => IgdError::Network(msg),
            SoapError::RequestFailed(status) => IgdError::RequestFailed(status),
            SoapError::Parse(msg) => IgdError::ResponseParse(msg),
            SoapError::NamespaceNotFound(ns) => IgdError::NamespaceNotFound(ns),
            SoapError::Fault(code) => IgdError::Fault(code),
        }
    }
}
