//! Private SOAP client for UPnP gateway communication
//!
//! This crate provides a minimal SOAP 1.1 client for invoking control
//! actions on UPnP Internet Gateway Devices (routers). It builds the
//! request envelope, performs the HTTP POST, and extracts the response
//! Body by namespace URI so that servers are free to pick any prefix.

mod error;

pub use error::SoapError;

use std::time::Duration;
use xmltree::{Element, XMLNode};

/// SOAP 1.1 envelope namespace URI
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// SOAP 1.1 encoding style URI
const SOAP_ENCODING_NS: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// A minimal SOAP client for UPnP gateway communication
#[derive(Debug, Clone)]
pub struct SoapClient {
    agent: ureq::Agent,
}

impl SoapClient {
    /// Create a new SOAP client with default timeouts
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .build(),
        }
    }

    /// Create a SOAP client backed by a custom agent
    ///
    /// Timeouts and retries are the agent's concern; the client itself
    /// never retries a request.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    /// Invoke a SOAP action and return the response Body element
    ///
    /// Arguments are written into the action element verbatim, in the
    /// order given; a `None` value produces an empty element.
    ///
    /// # Errors
    ///
    /// * `SoapError::Network` for transport failures
    /// * `SoapError::Fault` when the device answered a non-success status
    ///   with a parseable UPnP error code
    /// * `SoapError::RequestFailed` for any other non-success status
    /// * `SoapError::Parse` when the response XML is malformed
    /// * `SoapError::NamespaceNotFound` when no Body element qualified by
    ///   the SOAP envelope namespace exists in the response
    pub fn invoke(
        &self,
        control_url: &str,
        service_type: &str,
        action: &str,
        arguments: &[(&str, Option<String>)],
    ) -> Result<Element, SoapError> {
        let body = build_envelope(service_type, action, arguments);
        let soap_action = format!("\"{}#{}\"", service_type, action);

        let response = self
            .agent
            .post(control_url)
            .set("Content-Type", "text/xml; charset=\"utf-8\"")
            .set("Content-Length", &body.len().to_string())
            .set("Connection", "close")
            .set("SOAPACTION", &soap_action)
            .send_string(&body);

        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(status_error(code, response));
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(SoapError::Network(transport.to_string()));
            }
        };

        let xml_text = response
            .into_string()
            .map_err(|e| SoapError::Network(e.to_string()))?;

        let xml = Element::parse(xml_text.as_bytes())
            .map_err(|e| SoapError::Parse(e.to_string()))?;

        qualified_child(&xml, "Body", SOAP_ENVELOPE_NS)
            .cloned()
            .ok_or_else(|| SoapError::NamespaceNotFound(SOAP_ENVELOPE_NS.to_string()))
    }
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a SOAP 1.1 envelope for `action` qualified by `service_type`
///
/// Argument order and presence are preserved verbatim: each `(name, value)`
/// pair becomes one child element of the action element, and an omitted
/// value becomes an empty element.
pub fn build_envelope(
    service_type: &str,
    action: &str,
    arguments: &[(&str, Option<String>)],
) -> String {
    let mut args = String::new();
    for (name, value) in arguments {
        match value {
            Some(value) => {
                args.push_str(&format!("<{}>{}</{}>", name, escape_text(value), name));
            }
            None => {
                args.push_str(&format!("<{}></{}>", name, name));
            }
        }
    }

    format!(
        concat!(
            r#"<?xml version="1.0"?>"#,
            r#"<s:Envelope xmlns:s="{env}" s:encodingStyle="{enc}">"#,
            r#"<s:Body>"#,
            r#"<u:{action} xmlns:u="{service}">{args}</u:{action}>"#,
            r#"</s:Body>"#,
            r#"</s:Envelope>"#
        ),
        env = SOAP_ENVELOPE_NS,
        enc = SOAP_ENCODING_NS,
        action = action,
        service = service_type,
        args = args,
    )
}

/// Find a direct child element by local name and namespace URI
///
/// Prefixes are irrelevant: a response declaring
/// `xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"` matches the
/// same as one using `s` or a default namespace.
pub fn qualified_child<'a>(
    parent: &'a Element,
    local_name: &str,
    namespace: &str,
) -> Option<&'a Element> {
    parent
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .find(|child| child.name == local_name && child.namespace.as_deref() == Some(namespace))
}

/// Pull the UPnP error code out of a fault response body, if present
pub fn fault_code(body: &Element) -> Option<u16> {
    body.get_child("Fault")?
        .get_child("detail")?
        .get_child("UPnPError")?
        .get_child("errorCode")?
        .get_text()?
        .trim()
        .parse()
        .ok()
}

fn status_error(code: u16, response: ureq::Response) -> SoapError {
    // Gateways report UPnP faults as HTTP 500 with a SOAP Fault body;
    // surface the error code when one can be extracted.
    if let Ok(text) = response.into_string() {
        if let Ok(xml) = Element::parse(text.as_bytes()) {
            if let Some(body) = qualified_child(&xml, "Body", SOAP_ENVELOPE_NS) {
                if let Some(upnp_code) = fault_code(body) {
                    return SoapError::Fault(upnp_code);
                }
            }
        }
    }
    SoapError::RequestFailed(code)
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
