//! DeletePortMapping operation for the WAN connection services

use crate::error::Result;
use crate::mapping::Protocol;
use crate::operation::IgdOperation;
use xmltree::Element;

/// Remove a NAT port mapping identified by remote host, external port,
/// and protocol.
#[derive(Debug, Clone)]
pub struct DeletePortMapping {
    pub remote_host: Option<String>,
    pub external_port: u16,
    pub protocol: Protocol,
}

impl IgdOperation for DeletePortMapping {
    type Response = ();

    const ACTION: &'static str = "DeletePortMapping";

    fn arguments(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("NewRemoteHost", self.remote_host.clone()),
            ("NewExternalPort", Some(self.external_port.to_string())),
            ("NewProtocol", Some(self.protocol.to_string())),
        ]
    }

    fn parse_response(_xml: &Element) -> Result<Self::Response> {
        Ok(())
    }
}
