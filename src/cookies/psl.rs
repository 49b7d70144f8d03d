//! Public Suffix List (PSL) lookups and filter-to-domain resolution.
//!
//! Turns whatever the user typed into the filter box (a full URL, a bare
//! hostname, or garbage) into the hostname and registrable domain the tier
//! classifier compares against.
//!
//! Uses Mozilla's Public Suffix List via the `psl` crate.

use psl::{List, Psl};
use std::net::IpAddr;
use url::Url;

/// Resolves the registrable domain (eTLD+1) of a hostname.
pub trait PublicSuffix: Send + Sync {
    /// For "sub.example.com" returns "example.com". `None` when no
    /// registrable domain exists.
    fn registrable_domain(&self, host: &str) -> Option<String>;
}

/// [`PublicSuffix`] backed by the compiled-in Mozilla list.
#[derive(Debug, Clone, Copy, Default)]
pub struct PslList;

impl PublicSuffix for PslList {
    fn registrable_domain(&self, host: &str) -> Option<String> {
        registrable_domain(host)
    }
}

/// Check if a domain is a public suffix (e.g., "com", "co.uk").
pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = domain.to_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    match List.suffix(domain_bytes) {
        Some(suffix) => suffix.is_known() && suffix.as_bytes() == domain_bytes,
        None => false,
    }
}

/// Get the registrable domain (eTLD+1) for a hostname.
///
/// Returns `None` for IP literals, for public suffixes themselves, and for
/// hosts whose suffix is not on the list (e.g. `printer.lan`).
pub fn registrable_domain(host: &str) -> Option<String> {
    if is_ip_literal(host) {
        return None;
    }
    let host_lower = host.to_lowercase();
    let domain = List.domain(host_lower.as_bytes())?;
    if !domain.suffix().is_known() {
        return None;
    }
    std::str::from_utf8(domain.as_bytes())
        .ok()
        .map(|s| s.to_string())
}

fn is_ip_literal(host: &str) -> bool {
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    bare.parse::<IpAddr>().is_ok()
}

/// Hostname and registrable domain derived from a filter string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainQuery {
    pub hostname: Option<String>,
    pub base_domain: Option<String>,
}

impl DomainQuery {
    /// Resolve a filter string against the compiled-in suffix list.
    pub fn parse(filter: &str) -> Self {
        Self::parse_with(filter, &PslList)
    }

    /// Resolve a filter string. Never fails: anything that is not an
    /// absolute URL with a host is taken verbatim as the hostname.
    pub fn parse_with(filter: &str, suffixes: &dyn PublicSuffix) -> Self {
        if filter.is_empty() {
            return Self::default();
        }

        let hostname = match Url::parse(filter) {
            Ok(url) => match url.host_str() {
                Some(host) if !host.is_empty() => host.to_string(),
                _ => filter.to_string(),
            },
            Err(_) => filter.to_string(),
        };

        let base_domain = suffixes.registrable_domain(&hostname);
        tracing::debug!(
            filter = %filter,
            hostname = %hostname,
            base_domain = ?base_domain,
            "resolved cookie filter"
        );

        Self {
            hostname: Some(hostname),
            base_domain,
        }
    }

    /// True when neither a hostname nor a domain could be derived.
    pub fn is_empty(&self) -> bool {
        self.hostname.is_none() && self.base_domain.is_none()
    }
}
