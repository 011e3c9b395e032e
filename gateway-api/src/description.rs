//! Device description tree traversal.
//!
//! A UPnP description nests devices inside `deviceList` elements to
//! arbitrary depth, with each device carrying its own `serviceList`. This
//! module flattens that tree into ordered device and service sequences so
//! that service resolution can scan them in document order.

use xmltree::{Element, XMLNode};

/// Nested device lists deeper than this are ignored; real gateway
/// descriptions are two or three levels deep.
const MAX_DEVICE_DEPTH: usize = 16;

/// A device node lifted out of the description tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceNode {
    pub device_type: Option<String>,
    pub friendly_name: Option<String>,
    pub udn: Option<String>,
}

/// A service node lifted out of the description tree.
///
/// Either URL may be missing; such a service still exists in the tree but
/// can never be resolved to an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceNode {
    pub service_type: Option<String>,
    pub control_url: Option<String>,
    pub scpd_url: Option<String>,
}

/// The flattened view of a parsed description.
///
/// Devices appear root first, then depth-first descendants; services are
/// collected from every visited device's service list in the same visiting
/// order. No deduplication is performed.
#[derive(Debug, Default)]
pub struct FlatDescription {
    pub devices: Vec<DeviceNode>,
    pub services: Vec<ServiceNode>,
}

/// Flatten a parsed description rooted at the document's `root` element.
pub fn flatten(root: &Element) -> FlatDescription {
    let mut flat = FlatDescription::default();
    if let Some(device) = root.get_child("device") {
        visit_device(device, 0, &mut flat);
    }
    flat
}

/// The `URLBase` element of the description, when declared.
pub fn declared_base_url(root: &Element) -> Option<String> {
    child_text(root, "URLBase")
}

fn visit_device(device: &Element, depth: usize, flat: &mut FlatDescription) {
    if depth > MAX_DEVICE_DEPTH {
        return;
    }

    flat.devices.push(DeviceNode {
        device_type: child_text(device, "deviceType"),
        friendly_name: child_text(device, "friendlyName"),
        udn: child_text(device, "UDN"),
    });

    if let Some(service_list) = device.get_child("serviceList") {
        for service in elements_named(service_list, "service") {
            flat.services.push(ServiceNode {
                service_type: child_text(service, "serviceType"),
                control_url: child_text(service, "controlURL"),
                scpd_url: child_text(service, "SCPDURL"),
            });
        }
    }

    if let Some(device_list) = device.get_child("deviceList") {
        for child in elements_named(device_list, "device") {
            visit_device(child, depth + 1, flat);
        }
    }
}

fn elements_named<'a>(parent: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    parent
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(move |child| child.name == name)
}

pub(crate) fn child_text(parent: &Element, name: &str) -> Option<String> {
    parent
        .get_child(name)
        .and_then(|child| child.get_text())
        .map(|text| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    const NESTED_DESCRIPTION: &str = r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <device>
    <deviceType>urn:schemas-upnp-org:device:InternetGatewayDevice:1</deviceType>
    <friendlyName>Router</friendlyName>
    <serviceList>
      <service>
        <serviceType>urn:schemas-upnp-org:service:Layer3Forwarding:1</serviceType>
        <controlURL>/ctl/L3F</controlURL>
        <SCPDURL>/L3F.xml</SCPDURL>
      </service>
    </serviceList>
    <deviceList>
      <device>
        <deviceType>urn:schemas-upnp-org:device:WANDevice:1</deviceType>
        <serviceList>
          <service>
            <serviceType>urn:schemas-upnp-org:service:WANCommonInterfaceConfig:1</serviceType>
            <controlURL>/ctl/CmnIfCfg</controlURL>
            <SCPDURL>/WANCfg.xml</SCPDURL>
          </service>
        </serviceList>
        <deviceList>
          <device>
            <deviceType>urn:schemas-upnp-org:device:WANConnectionDevice:1</deviceType>
            <serviceList>
              <service>
                <serviceType>urn:schemas-upnp-org:service:WANIPConnection:1</serviceType>
                <controlURL>/ctl/IPConn</controlURL>
                <SCPDURL>/WANIPCn.xml</SCPDURL>
              </service>
            </serviceList>
          </device>
        </deviceList>
      </device>
    </deviceList>
  </device>
</root>"#;

    #[test]
    fn test_flatten_counts_devices_and_services_at_all_levels() {
        let flat = flatten(&parse(NESTED_DESCRIPTION));

        assert_eq!(flat.devices.len(), 3);
        assert_eq!(flat.services.len(), 3);
    }

    #[test]
    fn test_flatten_visits_in_document_order() {
        let flat = flatten(&parse(NESTED_DESCRIPTION));

        let device_types: Vec<_> = flat
            .devices
            .iter()
            .filter_map(|d| d.device_type.as_deref())
            .collect();
        assert_eq!(
            device_types,
            vec![
                "urn:schemas-upnp-org:device:InternetGatewayDevice:1",
                "urn:schemas-upnp-org:device:WANDevice:1",
                "urn:schemas-upnp-org:device:WANConnectionDevice:1",
            ]
        );

        let service_types: Vec<_> = flat
            .services
            .iter()
            .filter_map(|s| s.service_type.as_deref())
            .collect();
        assert_eq!(
            service_types,
            vec![
                "urn:schemas-upnp-org:service:Layer3Forwarding:1",
                "urn:schemas-upnp-org:service:WANCommonInterfaceConfig:1",
                "urn:schemas-upnp-org:service:WANIPConnection:1",
            ]
        );
    }

    #[test]
    fn test_flatten_keeps_services_with_missing_urls() {
        let xml = r#"
<root>
  <device>
    <deviceType>urn:example:device:Broken:1</deviceType>
    <serviceList>
      <service>
        <serviceType>urn:example:service:NoUrls:1</serviceType>
      </service>
    </serviceList>
  </device>
</root>"#;

        let flat = flatten(&parse(xml));
        assert_eq!(flat.services.len(), 1);
        assert_eq!(flat.services[0].control_url, None);
        assert_eq!(flat.services[0].scpd_url, None);
    }

    #[test]
    fn test_flatten_without_root_device_is_empty() {
        let flat = flatten(&parse("<root></root>"));
        assert!(flat.devices.is_empty());
        assert!(flat.services.is_empty());
    }

    #[test]
    fn test_flatten_bounds_recursion_depth() {
        let mut xml = String::from("<root>");
        for _ in 0..64 {
            xml.push_str("<device><deviceType>urn:example:device:Deep:1</deviceType><deviceList>");
        }
        for _ in 0..64 {
            xml.push_str("</deviceList></device>");
        }
        xml.push_str("</root>");

        let flat = flatten(&parse(&xml));
        assert_eq!(flat.devices.len(), MAX_DEVICE_DEPTH + 1);
    }

    #[test]
    fn test_declared_base_url() {
        let xml = r#"
<root>
  <URLBase>http://192.168.1.1:5000/</URLBase>
  <device><deviceType>urn:example:device:X:1</deviceType></device>
</root>"#;

        assert_eq!(
            declared_base_url(&parse(xml)),
            Some("http://192.168.1.1:5000/".to_string())
        );
        assert_eq!(declared_base_url(&parse("<root></root>")), None);
    }
}
