//! Discover a gateway, print the public IP, and open a port mapping.
//!
//! Run with:
//! ```bash
//! RUST_LOG=debug cargo run --example port_forward
//! ```
//!
//! Requires an Internet Gateway Device with UPnP enabled on the local
//! network. The mapping is removed again before the example exits.

use nat_upnp_api::{IgdClient, PortMappingOptions, Protocol};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Searching for a gateway...");
    let client = IgdClient::discover()?;

    println!("Public IP: {}", client.external_ip()?);

    let options = PortMappingOptions {
        description: Some("nat-upnp-rs example".to_string()),
        lease_duration: 300,
        ..PortMappingOptions::new(Protocol::Tcp, 18080)
    };
    client.add_port_mapping(&options)?;
    println!("Mapped external port 18080");

    println!("Current mappings:");
    for mapping in client.port_mappings()? {
        println!(
            "  {} {} -> {}:{} ({})",
            mapping.protocol,
            mapping.external_port,
            mapping.internal_client,
            mapping.internal_port,
            mapping.description
        );
    }

    client.remove_port_mapping(Protocol::Tcp, 18080, None)?;
    println!("Mapping removed");

    Ok(())
}
