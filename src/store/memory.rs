//! In-memory collaborators.
//!
//! [`MemoryCookieStore`] behaves like a browser cookie jar closely enough to
//! drive the inspector end to end: domain-filtered reads, host-only vs
//! domain cookies on write, secure-origin checks, removal by URL.

use crate::base::error::{Result, ScopeError};
use crate::cookies::browser_cookie::{BrowserCookie, SameSite};
use crate::cookies::psl::is_public_suffix;
use crate::store::{
    CookieFilter, CookieStore, KeyValueStore, RemoveDetails, SetDetails, StoreFuture,
};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

/// Browser-like cookie jar kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: Mutex<Vec<BrowserCookie>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the jar with cookies as the browser would report them.
    pub fn with_cookies(cookies: Vec<BrowserCookie>) -> Self {
        Self {
            cookies: Mutex::new(cookies),
        }
    }

    /// Copy of every stored cookie.
    pub async fn snapshot(&self) -> Vec<BrowserCookie> {
        self.cookies.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.cookies.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cookies.lock().await.is_empty()
    }

    fn store_cookie(jar: &mut Vec<BrowserCookie>, details: SetDetails) -> Result<BrowserCookie> {
        let url = Url::parse(&details.url)
            .map_err(|e| ScopeError::InvalidCookieUrl(format!("{}: {}", details.url, e)))?;
        let host = url
            .host_str()
            .ok_or_else(|| ScopeError::InvalidCookieUrl(details.url.clone()))?
            .to_lowercase();

        if details.secure && url.scheme() != "https" {
            return Err(ScopeError::store(format!(
                "secure cookie {} cannot be set from {}",
                details.name, details.url
            )));
        }

        let (domain, host_only) = match details.domain.as_deref() {
            Some(d) => {
                if !Self::accepts_domain_attribute(d, &host) {
                    return Err(ScopeError::store(format!(
                        "domain {} is not valid for {}",
                        d, host
                    )));
                }
                let d = d.trim_start_matches('.').to_lowercase();
                (format!(".{}", d), false)
            }
            None => (host, true),
        };

        let path = if details.path.is_empty() {
            "/".to_string()
        } else {
            details.path
        };

        let cookie = BrowserCookie {
            name: details.name,
            value: details.value,
            domain,
            path,
            secure: details.secure,
            http_only: details.http_only,
            same_site: details.same_site.unwrap_or(SameSite::Unspecified),
            session: details.expiration_date.is_none(),
            host_only,
            expiration_date: details.expiration_date,
            store_id: details.store_id,
        };

        // Same name/domain/path replaces in place.
        match jar.iter_mut().find(|c| {
            c.name == cookie.name && c.domain == cookie.domain && c.path == cookie.path
        }) {
            Some(existing) => *existing = cookie.clone(),
            None => jar.push(cookie.clone()),
        }

        Ok(cookie)
    }

    /// Whether a write from `host` may scope a cookie to `domain`: the
    /// domain must cover the host and must not be a public suffix.
    fn accepts_domain_attribute(domain: &str, host: &str) -> bool {
        let domain = domain.trim_start_matches('.');
        !domain.is_empty() && !is_public_suffix(domain) && is_same_or_subdomain(host, domain)
    }

    /// RFC 6265 domain matching of a stored cookie against a request host.
    fn domain_matches(cookie: &BrowserCookie, request_host: &str) -> bool {
        if cookie.host_only {
            return cookie.domain.eq_ignore_ascii_case(request_host);
        }
        is_same_or_subdomain(request_host, cookie.host())
    }

    /// RFC 6265 path matching.
    fn path_matches(cookie_path: &str, request_path: &str) -> bool {
        if request_path == cookie_path {
            return true;
        }
        if let Some(rest) = request_path.strip_prefix(cookie_path) {
            return cookie_path.ends_with('/') || rest.starts_with('/');
        }
        false
    }
}

/// `host` equals `domain` or ends with `"." + domain`, ignoring ASCII case.
fn is_same_or_subdomain(host: &str, domain: &str) -> bool {
    if host.eq_ignore_ascii_case(domain) {
        return true;
    }
    if host.len() > domain.len() {
        let split = host.len() - domain.len();
        return host.is_char_boundary(split)
            && host[split..].eq_ignore_ascii_case(domain)
            && host[..split].ends_with('.');
    }
    false
}

impl CookieStore for MemoryCookieStore {
    fn get_all(&self, filter: CookieFilter) -> StoreFuture<'_, Vec<BrowserCookie>> {
        Box::pin(self.matching(filter))
    }

    fn set(&self, details: SetDetails) -> StoreFuture<'_, BrowserCookie> {
        Box::pin(async move {
            let mut jar = self.cookies.lock().await;
            Self::store_cookie(&mut jar, details)
        })
    }

    fn remove(&self, details: RemoveDetails) -> StoreFuture<'_, ()> {
        Box::pin(self.remove_matching(details))
    }
}

impl MemoryCookieStore {
    async fn matching(&self, filter: CookieFilter) -> Result<Vec<BrowserCookie>> {
        let jar = self.cookies.lock().await;
        let cookies: Vec<BrowserCookie> = match filter.domain.as_deref() {
            Some(domain) => {
                let domain = domain.trim_start_matches('.');
                jar.iter()
                    .filter(|c| is_same_or_subdomain(c.host(), domain))
                    .cloned()
                    .collect()
            }
            None => jar.clone(),
        };
        tracing::debug!(filter = ?filter.domain, count = cookies.len(), "get_all");
        Ok(cookies)
    }

    async fn remove_matching(&self, details: RemoveDetails) -> Result<()> {
        let url = Url::parse(&details.url)
            .map_err(|e| ScopeError::InvalidCookieUrl(format!("{}: {}", details.url, e)))?;
        let host = url
            .host_str()
            .ok_or_else(|| ScopeError::InvalidCookieUrl(details.url.clone()))?
            .to_lowercase();

        let mut jar = self.cookies.lock().await;
        let before = jar.len();
        jar.retain(|c| {
            !(c.name == details.name
                && Self::domain_matches(c, &host)
                && Self::path_matches(&c.path, url.path()))
        });
        tracing::debug!(
            name = %details.name,
            url = %details.url,
            removed = before - jar.len(),
            "remove"
        );
        Ok(())
    }
}

/// Thread-safe key/value store, e.g. a stand-in for `storage.session`.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<DashMap<String, serde_json::Value>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreFuture<'_, Option<serde_json::Value>> {
        let value = self.entries.get(key).map(|entry| entry.value().clone());
        Box::pin(std::future::ready(Ok(value)))
    }

    fn set(&self, key: &str, value: serde_json::Value) -> StoreFuture<'_, ()> {
        let key = key.to_string();
        Box::pin(async move {
            self.entries.insert(key, value);
            Ok(())
        })
    }
}
