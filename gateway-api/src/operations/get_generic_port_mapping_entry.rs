//! GetGenericPortMappingEntry operation for the WAN connection services

use crate::error::Result;
use crate::mapping::{PortMapping, Protocol};
use crate::operation::{optional_text, required_parsed, required_text, IgdOperation};
use xmltree::Element;

/// Fetch one port mapping entry by table index.
///
/// Gateways expose their mapping table only by index; listing means
/// walking indexes from 0 until the device rejects one.
#[derive(Debug, Clone, Copy)]
pub struct GetGenericPortMappingEntry {
    pub index: u32,
}

impl IgdOperation for GetGenericPortMappingEntry {
    type Response = PortMapping;

    const ACTION: &'static str = "GetGenericPortMappingEntry";

    fn arguments(&self) -> Vec<(&'static str, Option<String>)> {
        vec![("NewPortMappingIndex", Some(self.index.to_string()))]
    }

    fn parse_response(xml: &Element) -> Result<Self::Response> {
        let protocol: Protocol = required_parsed(xml, "NewProtocol")?;
        let enabled = matches!(
            required_text(xml, "NewEnabled")?.as_str(),
            "1" | "true" | "yes"
        );

        Ok(PortMapping {
            remote_host: optional_text(xml, "NewRemoteHost"),
            external_port: required_parsed(xml, "NewExternalPort")?,
            protocol,
            internal_port: required_parsed(xml, "NewInternalPort")?,
            internal_client: required_text(xml, "NewInternalClient")?,
            enabled,
            description: optional_text(xml, "NewPortMappingDescription").unwrap_or_default(),
            lease_duration: required_parsed(xml, "NewLeaseDuration")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IgdError;

    const RESPONSE: &str = r#"
        <u:GetGenericPortMappingEntryResponse xmlns:u="urn:schemas-upnp-org:service:WANIPConnection:1">
            <NewRemoteHost></NewRemoteHost>
            <NewExternalPort>8080</NewExternalPort>
            <NewProtocol>TCP</NewProtocol>
            <NewInternalPort>3000</NewInternalPort>
            <NewInternalClient>192.168.1.42</NewInternalClient>
            <NewEnabled>1</NewEnabled>
            <NewPortMappingDescription>dev server</NewPortMappingDescription>
            <NewLeaseDuration>0</NewLeaseDuration>
        </u:GetGenericPortMappingEntryResponse>
    "#;

    #[test]
    fn test_arguments_carry_the_index() {
        let operation = GetGenericPortMappingEntry { index: 7 };
        assert_eq!(
            operation.arguments(),
            vec![("NewPortMappingIndex", Some("7".to_string()))]
        );
    }

    #[test]
    fn test_parse_response() {
        let xml = Element::parse(RESPONSE.as_bytes()).unwrap();
        let mapping = GetGenericPortMappingEntry::parse_response(&xml).unwrap();

        assert_eq!(
            mapping,
            PortMapping {
                remote_host: None,
                external_port: 8080,
                protocol: Protocol::Tcp,
                internal_port: 3000,
                internal_client: "192.168.1.42".to_string(),
                enabled: true,
                description: "dev server".to_string(),
                lease_duration: 0,
            }
        );
    }

    #[test]
    fn test_empty_remote_host_means_any_peer() {
        let xml = Element::parse(RESPONSE.as_bytes()).unwrap();
        let mapping = GetGenericPortMappingEntry::parse_response(&xml).unwrap();
        assert_eq!(mapping.remote_host, None);
    }

    #[test]
    fn test_missing_required_field_is_invalid_response() {
        let xml_str = r#"
            <GetGenericPortMappingEntryResponse>
                <NewProtocol>TCP</NewProtocol>
            </GetGenericPortMappingEntryResponse>
        "#;
        let xml = Element::parse(xml_str.as_bytes()).unwrap();

        let result = GetGenericPortMappingEntry::parse_response(&xml);
        assert!(matches!(result, Err(IgdError::InvalidResponse(_))));
    }
}
