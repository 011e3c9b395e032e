//! GetExternalIPAddress operation for the WAN connection services

use crate::error::Result;
use crate::operation::{required_parsed, IgdOperation};
use std::net::IpAddr;
use xmltree::Element;

/// Query the gateway's public IP address. Takes no arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetExternalIpAddress;

impl IgdOperation for GetExternalIpAddress {
    type Response = IpAddr;

    const ACTION: &'static str = "GetExternalIPAddress";

    fn arguments(&self) -> Vec<(&'static str, Option<String>)> {
        Vec::new()
    }

    fn parse_response(xml: &Element) -> Result<Self::Response> {
        required_parsed(xml, "NewExternalIPAddress")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IgdError;

    #[test]
    fn test_arguments_are_empty() {
        assert!(GetExternalIpAddress.arguments().is_empty());
    }

    #[test]
    fn test_parse_response() {
        let xml_str = r#"
            <u:GetExternalIPAddressResponse xmlns:u="urn:schemas-upnp-org:service:WANIPConnection:1">
                <NewExternalIPAddress>203.0.113.7</NewExternalIPAddress>
            </u:GetExternalIPAddressResponse>
        "#;
        let xml = Element::parse(xml_str.as_bytes()).unwrap();

        let ip = GetExternalIpAddress::parse_response(&xml).unwrap();
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_parse_response_missing_address() {
        let xml_str = r#"<GetExternalIPAddressResponse></GetExternalIPAddressResponse>"#;
        let xml = Element::parse(xml_str.as_bytes()).unwrap();

        let result = GetExternalIpAddress::parse_response(&xml);
        assert!(matches!(result, Err(IgdError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_response_garbage_address() {
        let xml_str = r#"
            <GetExternalIPAddressResponse>
                <NewExternalIPAddress>not-an-ip</NewExternalIPAddress>
            </GetExternalIPAddressResponse>
        "#;
        let xml = Element::parse(xml_str.as_bytes()).unwrap();

        let result = GetExternalIpAddress::parse_response(&xml);
        assert!(matches!(result, Err(IgdError::InvalidResponse(_))));
    }
}
