//! AddPortMapping operation for the WAN connection services

use crate::error::Result;
use crate::mapping::Protocol;
use crate::operation::IgdOperation;
use xmltree::Element;

/// Create (or overwrite) a NAT port mapping on the gateway.
///
/// `remote_host` restricts the mapping to one WAN peer; `None` sends an
/// empty `NewRemoteHost`, meaning any peer. A `lease_duration` of 0
/// requests an unlimited lease.
#[derive(Debug, Clone)]
pub struct AddPortMapping {
    pub remote_host: Option<String>,
    pub external_port: u16,
    pub protocol: Protocol,
    pub internal_port: u16,
    pub internal_client: String,
    pub description: String,
    pub lease_duration: u32,
}

impl IgdOperation for AddPortMapping {
    type Response = ();

    const ACTION: &'static str = "AddPortMapping";

    fn arguments(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("NewRemoteHost", self.remote_host.clone()),
            ("NewExternalPort", Some(self.external_port.to_string())),
            ("NewProtocol", Some(self.protocol.to_string())),
            ("NewInternalPort", Some(self.internal_port.to_string())),
            ("NewInternalClient", Some(self.internal_client.clone())),
            ("NewEnabled", Some("1".to_string())),
            ("NewPortMappingDescription", Some(self.description.clone())),
            ("NewLeaseDuration", Some(self.lease_duration.to_string())),
        ]
    }

    fn parse_response(_xml: &Element) -> Result<Self::Response> {
        // AddPortMappingResponse carries no output arguments
        Ok(())
    }
}
