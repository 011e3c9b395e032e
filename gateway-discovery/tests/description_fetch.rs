//! Integration tests for fetching and validating device descriptions
//!
//! These tests serve device XML over HTTP with a mock server, so they
//! exercise the full fetch path without requiring a real gateway on the
//! network.

use gateway_discovery::device::fetch_gateway_description;
use gateway_discovery::DiscoveryError;
use mockito::Server;
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

fn description_for(device_type: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <device>
    <deviceType>{}</deviceType>
    <friendlyName>Some Device</friendlyName>
  </device>
</root>"#,
        device_type
    )
}

#[test]
fn test_fetch_parses_a_served_gateway_description() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rootDesc.xml")
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(IGD_XML)
        .create();

    let client = reqwest::blocking::Client::new();
    let location = format!("{}/rootDesc.xml", server.url());
    let description = fetch_gateway_description(&client, &location).unwrap();

    assert_eq!(description.friendly_name, "Home Router");
    assert_eq!(description.manufacturer.as_deref(), Some("MiniUPnP"));
    assert!(description.is_gateway());
    mock.assert();
}

#[rstest]
#[case("urn:schemas-upnp-org:device:MediaRenderer:1")]
#[case("urn:schemas-upnp-org:device:Basic:1")]
fn test_non_gateway_devices_are_rejected(#[case] device_type: &str) {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/desc.xml")
        .with_status(200)
        .with_body(description_for(device_type))
        .create();

    let client = reqwest::blocking::Client::new();
    let location = format!("{}/desc.xml", server.url());
    let result = fetch_gateway_description(&client, &location);

    match result {
        Err(DiscoveryError::NotAGateway(reported_type)) => {
            assert_eq!(reported_type, device_type);
        }
        other => panic!("expected NotAGateway, got {:?}", other),
    }
}

#[test]
fn test_garbage_body_is_a_parse_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/rootDesc.xml")
        .with_status(200)
        .with_body("<html>not a device description</html>")
        .create();

    let client = reqwest::blocking::Client::new();
    let location = format!("{}/rootDesc.xml", server.url());
    let result = fetch_gateway_description(&client, &location);

    assert!(matches!(result, Err(DiscoveryError::ParseError(_))));
}

#[test]
fn test_unreachable_server_is_a_network_error() {
    let client = reqwest::blocking::Client::new();
    let result = fetch_gateway_description(&client, "http://127.0.0.1:1/rootDesc.xml");

    assert!(matches!(result, Err(DiscoveryError::NetworkError(_))));
}
