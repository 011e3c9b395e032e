//! Service resolution against a device description.
//!
//! Picks the first service in tree-traversal order whose type is one of
//! the caller's acceptable service types, then turns its relative URLs
//! into absolute ones. Tree order dominates the caller's preference
//! order: the acceptable types act as a membership set, not a ranking.

use crate::description::{declared_base_url, flatten};
use crate::error::{IgdError, Result};
use url::Url;
use xmltree::Element;

/// A service resolved to fully-qualified endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedService {
    /// The service-type URI, exactly as declared in the description
    pub service_type: String,
    /// Absolute control endpoint for SOAP actions
    pub control_url: Url,
    /// Absolute URL of the service's SCPD document
    pub scpd_url: Url,
}

/// Resolve a service from a parsed description.
///
/// `description_url` is the URL the description was fetched from; it is
/// the resolution base when the description declares no `URLBase`.
///
/// # Errors
///
/// `IgdError::ServiceNotFound` when no service matches any acceptable
/// type, or when the matching service lacks a usable control or SCPD URL.
pub fn resolve_service(
    description: &Element,
    description_url: &Url,
    acceptable_types: &[String],
) -> Result<ResolvedService> {
    let flat = flatten(description);

    let service = flat
        .services
        .into_iter()
        .find(|service| {
            service
                .service_type
                .as_deref()
                .is_some_and(|t| acceptable_types.iter().any(|a| a == t))
        })
        .ok_or(IgdError::ServiceNotFound)?;

    let service_type = service.service_type.ok_or(IgdError::ServiceNotFound)?;
    let control_url = service.control_url.ok_or(IgdError::ServiceNotFound)?;
    let scpd_url = service.scpd_url.ok_or(IgdError::ServiceNotFound)?;

    let base = match declared_base_url(description) {
        Some(raw) => Url::parse(&raw)
            .map_err(|e| IgdError::DescriptionParse(format!("invalid URLBase '{}': {}", raw, e)))?,
        None => description_url.clone(),
    };

    Ok(ResolvedService {
        service_type,
        control_url: qualify(&control_url, &base)?,
        scpd_url: qualify(&scpd_url, &base)?,
    })
}

/// Qualify a possibly-relative URL against a base.
///
/// This is partial resolution, not an RFC 3986 join: a URL missing its
/// scheme or host copies those components from the base, while its own
/// path and query are kept untouched.
fn qualify(raw: &str, base: &Url) -> Result<Url> {
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            // Only path and query carry over; a fragment is dropped
            let raw = raw.split_once('#').map_or(raw, |(before, _)| before);

            if let Some(rest) = raw.strip_prefix("//") {
                // Scheme-relative: the URL brings its own host
                return Url::parse(&format!("{}://{}", base.scheme(), rest))
                    .map_err(|_| IgdError::ServiceNotFound);
            }

            let (path, query) = match raw.split_once('?') {
                Some((path, query)) => (path, Some(query)),
                None => (raw, None),
            };

            let mut url = base.clone();
            url.set_path(path);
            url.set_query(query);
            url.set_fragment(None);
            Ok(url)
        }
        // Anything else is a service URL too malformed to use
        Err(_) => Err(IgdError::ServiceNotFound),
    }
}
