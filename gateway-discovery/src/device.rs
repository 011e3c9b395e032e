//! Gateway description parsing and validation.
//!
//! Parses the UPnP device description advertised by an SSDP responder and
//! checks that the device really is an Internet Gateway Device before it is
//! surfaced to callers.

use crate::error::{DiscoveryError, Result};
use crate::Gateway;
use serde::Deserialize;
use std::net::IpAddr;

/// UPnP device description root element.
#[derive(Debug, Deserialize)]
pub struct Root {
    pub device: GatewayDescription,
}

/// Device description fields relevant to gateway identification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayDescription {
    pub device_type: String,
    pub friendly_name: String,
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    #[serde(rename = "UDN")]
    pub udn: Option<String>,
}

impl GatewayDescription {
    /// Parse a gateway description from XML.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::ParseError` if the XML is malformed or
    /// missing required fields.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root: Root = quick_xml::de::from_str(xml)
            .map_err(|e| DiscoveryError::ParseError(format!("Failed to parse device XML: {}", e)))?;

        Ok(root.device)
    }

    /// Convert to the public `Gateway` type.
    pub fn to_gateway(&self, location: String, local_addr: Option<IpAddr>) -> Gateway {
        Gateway {
            location,
            friendly_name: self.friendly_name.clone(),
            manufacturer: self.manufacturer.clone(),
            model_name: self.model_name.clone(),
            local_addr,
        }
    }

    /// Check if this device is an Internet Gateway Device.
    pub fn is_gateway(&self) -> bool {
        self.device_type.contains("InternetGatewayDevice")
    }
}

/// Fetch a device description from `location` and validate that it really
/// belongs to an Internet Gateway Device.
///
/// # Errors
///
/// Returns `DiscoveryError::NetworkError` when the request fails,
/// `DiscoveryError::ParseError` when the body is not a device description,
/// and `DiscoveryError::NotAGateway` when the description names some other
/// device class.
pub fn fetch_gateway_description(
    client: &reqwest::blocking::Client,
    location: &str,
) -> Result<GatewayDescription> {
    let response = client.get(location).send().map_err(|e| {
        DiscoveryError::NetworkError(format!("Failed to fetch device description: {}", e))
    })?;

    let xml = response.text().map_err(|e| {
        DiscoveryError::NetworkError(format!("Failed to read response body: {}", e))
    })?;

    let description = GatewayDescription::from_xml(&xml)?;
    if !description.is_gateway() {
        return Err(DiscoveryError::NotAGateway(description.device_type));
    }

    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const IGD_XML: &str = r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <specVersion><major>1</major><minor>0</minor></specVersion>
  <device>
    <deviceType>urn:schemas-upnp-org:device:InternetGatewayDevice:1</deviceType>
    <friendlyName>Home Router</friendlyName>
    <manufacturer>MiniUPnP</manufacturer>
    <modelName>MiniUPnPd</modelName>
    <UDN>uuid:igd-0001</UDN>
  </device>
</root>"#;

    #[test]
    fn test_gateway_from_xml() {
        let description = GatewayDescription::from_xml(IGD_XML).unwrap();

        assert_eq!(
            description.device_type,
            "urn:schemas-upnp-org:device:InternetGatewayDevice:1"
        );
        assert_eq!(description.friendly_name, "Home Router");
        assert_eq!(description.manufacturer.as_deref(), Some("MiniUPnP"));
        assert!(description.is_gateway());
    }

    #[rstest]
    #[case("urn:schemas-upnp-org:device:InternetGatewayDevice:1", true)]
    #[case("urn:schemas-upnp-org:device:InternetGatewayDevice:2", true)]
    #[case("urn:schemas-upnp-org:device:MediaRenderer:1", false)]
    #[case("urn:schemas-upnp-org:device:Basic:1", false)]
    fn test_is_gateway_by_device_type(#[case] device_type: &str, #[case] expected: bool) {
        let description = GatewayDescription {
            device_type: device_type.to_string(),
            friendly_name: "Device".to_string(),
            manufacturer: None,
            model_name: None,
            udn: None,
        };
        assert_eq!(description.is_gateway(), expected);
    }

    #[test]
    fn test_to_gateway_conversion() {
        let description = GatewayDescription::from_xml(IGD_XML).unwrap();
        let gateway = description.to_gateway(
            "http://192.168.1.1:5000/rootDesc.xml".to_string(),
            Some("192.168.1.42".parse().unwrap()),
        );

        assert_eq!(gateway.location, "http://192.168.1.1:5000/rootDesc.xml");
        assert_eq!(gateway.friendly_name, "Home Router");
        assert_eq!(gateway.model_name.as_deref(), Some("MiniUPnPd"));
        assert_eq!(
            gateway.local_addr,
            Some("192.168.1.42".parse::<IpAddr>().unwrap())
        );
    }

    #[test]
    fn test_malformed_xml_is_a_parse_error() {
        let result = GatewayDescription::from_xml("<root><device></root>");
        assert!(matches!(result, Err(DiscoveryError::ParseError(_))));
    }
}
