//! Domain-relevance tiers.
//!
//! Every cookie lands in exactly one tier relative to a [`DomainQuery`],
//! tested in this order:
//!
//! | Tier | Rule |
//! |------|------|
//! | [`Tier::DotDomain`] | `domain == "." + base_domain` |
//! | [`Tier::Hostname`] | `domain == hostname` |
//! | [`Tier::DotHostname`] | `domain == "." + hostname` |
//! | [`Tier::Other`] | anything else |
//!
//! A missing hostname or base domain simply never matches, so an empty
//! filter puts everything in [`Tier::Other`].

use crate::cookies::browser_cookie::BrowserCookie;
use crate::cookies::psl::DomainQuery;

/// Relevance bucket of a cookie relative to a queried host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    DotDomain,
    Hostname,
    DotHostname,
    Other,
}

impl Tier {
    /// Tier of a single cookie domain.
    pub fn of(cookie_domain: &str, query: &DomainQuery) -> Tier {
        if let Some(base) = query.base_domain.as_deref() {
            if is_dotted(cookie_domain, base) {
                return Tier::DotDomain;
            }
        }
        if let Some(hostname) = query.hostname.as_deref() {
            if cookie_domain == hostname {
                return Tier::Hostname;
            }
            if is_dotted(cookie_domain, hostname) {
                return Tier::DotHostname;
            }
        }
        Tier::Other
    }
}

// cookie_domain == "." + name, without allocating.
fn is_dotted(cookie_domain: &str, name: &str) -> bool {
    cookie_domain.strip_prefix('.') == Some(name)
}

/// A cookie list partitioned into the four tiers, each in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TieredCookies {
    dot_domain: Vec<BrowserCookie>,
    hostname: Vec<BrowserCookie>,
    dot_hostname: Vec<BrowserCookie>,
    other: Vec<BrowserCookie>,
}

impl TieredCookies {
    /// Partition `cookies` relative to `query`.
    pub fn classify(cookies: impl IntoIterator<Item = BrowserCookie>, query: &DomainQuery) -> Self {
        let mut tiers = Self::default();
        for cookie in cookies {
            match Tier::of(&cookie.domain, query) {
                Tier::DotDomain => tiers.dot_domain.push(cookie),
                Tier::Hostname => tiers.hostname.push(cookie),
                Tier::DotHostname => tiers.dot_hostname.push(cookie),
                Tier::Other => tiers.other.push(cookie),
            }
        }
        tiers
    }

    pub fn tier(&self, tier: Tier) -> &[BrowserCookie] {
        match tier {
            Tier::DotDomain => &self.dot_domain,
            Tier::Hostname => &self.hostname,
            Tier::DotHostname => &self.dot_hostname,
            Tier::Other => &self.other,
        }
    }

    /// Number of cookies related to the query (tiers 1-3).
    pub fn related_count(&self) -> usize {
        self.dot_domain.len() + self.hostname.len() + self.dot_hostname.len()
    }

    pub fn total_count(&self) -> usize {
        self.related_count() + self.other.len()
    }

    /// Concatenate tiers 1-3, plus [`Tier::Other`] when `include_unrelated`.
    pub fn into_ordered(self, include_unrelated: bool) -> Vec<BrowserCookie> {
        let mut ordered = self.dot_domain;
        ordered.extend(self.hostname);
        ordered.extend(self.dot_hostname);
        if include_unrelated {
            ordered.extend(self.other);
        }
        ordered
    }
}

/// Classify and concatenate in one step.
pub fn classify(
    cookies: impl IntoIterator<Item = BrowserCookie>,
    query: &DomainQuery,
    include_unrelated: bool,
) -> Vec<BrowserCookie> {
    let tiers = TieredCookies::classify(cookies, query);
    tracing::debug!(
        dot_domain = tiers.dot_domain.len(),
        hostname = tiers.hostname.len(),
        dot_hostname = tiers.dot_hostname.len(),
        other = tiers.other.len(),
        include_unrelated,
        "classified cookies"
    );
    tiers.into_ordered(include_unrelated)
}
