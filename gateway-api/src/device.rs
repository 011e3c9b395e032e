//! The gateway device handle and its invocation pipeline.
//!
//! A `Device` is identified by its description URL and the ordered list of
//! service types it is willing to control. Every invocation runs the full
//! fetch → parse → resolve → POST → extract pipeline; nothing is cached
//! between calls, so concurrent invocations are fully independent.

use crate::error::{IgdError, Result};
use crate::operation::IgdOperation;
use crate::resolve::{resolve_service, ResolvedService};
use soap_client::SoapClient;
use std::time::Duration;
use tracing::debug;
use url::Url;
use xmltree::Element;

/// WAN connection service types a gateway device controls by default,
/// in preference order.
pub const DEFAULT_SERVICE_TYPES: [&str; 4] = [
    "urn:schemas-upnp-org:service:WANIPConnection:1",
    "urn:schemas-upnp-org:service:WANPPPConnection:1",
    "urn:schemas-upnp-org:service:WANIPConnection:2",
    "urn:schemas-upnp-org:service:WANPPPConnection:2",
];

/// Handle to one UPnP Internet Gateway Device.
///
/// Immutable after construction. Cloning is cheap; clones share the
/// underlying HTTP agent but no other state.
#[derive(Debug, Clone)]
pub struct Device {
    description_url: Url,
    service_types: Vec<String>,
    agent: ureq::Agent,
    soap: SoapClient,
}

impl Device {
    /// Create a device handle for the given description URL, accepting
    /// the default WAN connection service types.
    pub fn new(description_url: Url) -> Self {
        Self::with_service_types(
            description_url,
            DEFAULT_SERVICE_TYPES.iter().map(|t| t.to_string()).collect(),
        )
    }

    /// Create a device handle restricted to a caller-chosen, ordered set
    /// of acceptable service types.
    pub fn with_service_types(description_url: Url, service_types: Vec<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(Duration::from_secs(10))
            .build();
        let soap = SoapClient::with_agent(agent.clone());

        Self {
            description_url,
            service_types,
            agent,
            soap,
        }
    }

    /// Create a device handle from a discovered gateway.
    ///
    /// # Errors
    ///
    /// `IgdError::InvalidParameter` if the gateway's location is not a
    /// valid URL.
    pub fn from_gateway(gateway: &gateway_discovery::Gateway) -> Result<Self> {
        let url = Url::parse(&gateway.location).map_err(|e| {
            IgdError::InvalidParameter(format!("invalid description URL '{}': {}", gateway.location, e))
        })?;
        Ok(Self::new(url))
    }

    /// The URL this device's description is fetched from.
    pub fn description_url(&self) -> &Url {
        &self.description_url
    }

    /// The acceptable service types, in caller-preference order.
    pub fn service_types(&self) -> &[String] {
        &self.service_types
    }

    /// Fetch and parse the device description document.
    ///
    /// # Errors
    ///
    /// * `IgdError::DeviceUnreachable` for a non-success HTTP status
    /// * `IgdError::Network` for transport failures
    /// * `IgdError::DescriptionParse` for malformed XML
    pub fn fetch_description(&self) -> Result<Element> {
        debug!(url = %self.description_url, "fetching device description");

        let response = match self.agent.get(self.description_url.as_str()).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(IgdError::DeviceUnreachable(code)),
            Err(ureq::Error::Transport(transport)) => {
                return Err(IgdError::Network(transport.to_string()))
            }
        };

        let text = response
            .into_string()
            .map_err(|e| IgdError::Network(e.to_string()))?;

        Element::parse(text.as_bytes()).map_err(|e| IgdError::DescriptionParse(e.to_string()))
    }

    /// Fetch the description and resolve a service acceptable to this
    /// device into absolute endpoints.
    pub fn resolve(&self) -> Result<ResolvedService> {
        let description = self.fetch_description()?;
        resolve_service(&description, &self.description_url, &self.service_types)
    }

    /// Invoke a SOAP action on this device and return the response Body.
    ///
    /// The full pipeline runs on every call: description fetch, service
    /// resolution, envelope POST, response parse, Body extraction. Each
    /// stage either succeeds or short-circuits with its error, so exactly
    /// one outcome is produced per invocation.
    pub fn run(&self, action: &str, arguments: &[(&str, Option<String>)]) -> Result<Element> {
        let service = self.resolve()?;
        debug!(
            action,
            service = %service.service_type,
            control_url = %service.control_url,
            "invoking SOAP action"
        );

        let body = self.soap.invoke(
            service.control_url.as_str(),
            &service.service_type,
            action,
            arguments,
        )?;
        Ok(body)
    }

    /// Execute a typed operation against this device.
    pub fn execute<Op: IgdOperation>(&self, operation: &Op) -> Result<Op::Response> {
        let body = self.run(Op::ACTION, &operation.arguments())?;

        let response_name = format!("{}Response", Op::ACTION);
        let response = body.get_child(response_name.as_str()).ok_or_else(|| {
            IgdError::InvalidResponse(format!("Missing {} element", response_name))
        })?;

        Op::parse_response(response)
    }
}
