//! Typed operations for the WAN connection services.

mod add_port_mapping;
mod delete_port_mapping;
mod get_external_ip;
mod get_generic_port_mapping_entry;

pub use add_port_mapping::AddPortMapping;
pub use delete_port_mapping::DeletePortMapping;
pub use get_external_ip::GetExternalIpAddress;
pub use get_generic_port_mapping_entry::GetGenericPortMappingEntry;
