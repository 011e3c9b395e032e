//! Base trait for typed IGD operations.

use crate::description::child_text;
use crate::error::{IgdError, Result};
use xmltree::Element;

/// A typed UPnP IGD operation
///
/// Implementors describe one SOAP action: its name, the ordered argument
/// list it sends, and how its response element is interpreted. Argument
/// order and presence are forwarded verbatim into the SOAP body; an
/// argument with a `None` value is sent as an empty element.
pub trait IgdOperation {
    /// The typed response for this operation
    type Response;

    /// The SOAP action name
    const ACTION: &'static str;

    /// Ordered `(name, value)` argument pairs for the request body
    fn arguments(&self) -> Vec<(&'static str, Option<String>)>;

    /// Parse the `<ActionResponse>` element into the typed response
    fn parse_response(xml: &Element) -> Result<Self::Response>;
}

/// A response field that must be present, as trimmed text.
pub(crate) fn required_text(xml: &Element, name: &str) -> Result<String> {
    child_text(xml, name)
        .ok_or_else(|| IgdError::InvalidResponse(format!("Missing {} element", name)))
}

/// A response field that may be absent or empty.
pub(crate) fn optional_text(xml: &Element, name: &str) -> Option<String> {
    child_text(xml, name).filter(|text| !text.is_empty())
}

/// A required numeric response field.
pub(crate) fn required_parsed<T>(xml: &Element, name: &str) -> Result<T>
where
    T: std::str::FromStr,
{
    let text = required_text(xml, name)?;
    text.parse()
        .map_err(|_| IgdError::InvalidResponse(format!("Invalid {} value: {}", name, text)))
}
