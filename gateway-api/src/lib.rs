//! NAT port mapping on UPnP Internet Gateway Devices.
//!
//! This crate talks SOAP to the WAN connection services of a home or
//! office router: it fetches the device description, resolves an
//! acceptable service to an absolute control endpoint, and invokes
//! actions on it. On top of that core it provides typed operations and a
//! high-level client for the usual port-mapping workflow.
//!
//! # Quick Start
//!
//! ```no_run
//! use nat_upnp_api::{IgdClient, PortMappingOptions, Protocol};
//!
//! let client = IgdClient::discover()?;
//! println!("public IP: {}", client.external_ip()?);
//!
//! client.add_port_mapping(&PortMappingOptions::new(Protocol::Tcp, 8080))?;
//! # Ok::<(), nat_upnp_api::IgdError>(())
//! ```
//!
//! # Raw actions
//!
//! Actions without a typed operation can be invoked directly; the
//! response Body element is returned for caller interpretation:
//!
//! ```no_run
//! use nat_upnp_api::Device;
//! use url::Url;
//!
//! let device = Device::new(Url::parse("http://192.168.1.1:5000/rootDesc.xml")?);
//! let body = device.run("GetStatusInfo", &[])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod description;
mod device;
mod error;
mod mapping;
mod operation;
pub mod operations;
mod resolve;

pub use client::{IgdClient, PortMappingOptions};
pub use description::{flatten, DeviceNode, FlatDescription, ServiceNode};
pub use device::{Device, DEFAULT_SERVICE_TYPES};
pub use error::{IgdError, Result};
pub use mapping::{PortMapping, Protocol};
pub use operation::IgdOperation;
pub use resolve::{resolve_service, ResolvedService};
