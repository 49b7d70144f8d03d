//! Writing changes back to the browser.
//!
//! The browser addresses cookies by URL, so every mutation starts by
//! rebuilding one from the cookie itself: `https` iff the cookie is secure,
//! the domain with its leading dot stripped as host, then the path. The
//! actual write goes to the [`CookieStore`]; its errors come back untouched.

use crate::base::error::{Result, ScopeError};
use crate::cookies::browser_cookie::{BrowserCookie, SameSite};
use crate::store::{CookieStore, RemoveDetails, SetDetails};
use url::Url;

/// Partial update applied on top of an existing cookie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookieUpdate {
    pub value: Option<String>,
    pub path: Option<String>,
    pub secure: Option<bool>,
    pub http_only: Option<bool>,
    /// `Some(SameSite::Unspecified)` clears the attribute.
    pub same_site: Option<SameSite>,
    pub expiration_date: Option<f64>,
}

impl CookieUpdate {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn http_only(http_only: bool) -> Self {
        Self {
            http_only: Some(http_only),
            ..Self::default()
        }
    }

    pub fn secure(secure: bool) -> Self {
        Self {
            secure: Some(secure),
            ..Self::default()
        }
    }

    pub fn same_site(same_site: SameSite) -> Self {
        Self {
            same_site: Some(same_site),
            ..Self::default()
        }
    }
}

/// URL the browser associates with `cookie`.
///
/// The scheme always follows `cookie.secure`, and exactly one leading `.`
/// is dropped from the domain.
pub fn write_url(cookie: &BrowserCookie) -> String {
    let scheme = if cookie.secure { "https" } else { "http" };
    format!("{}://{}{}", scheme, cookie.host(), cookie.path)
}

/// Build the `cookies.set` arguments for applying `update` to `cookie`.
///
/// Host-only cookies are written without a `domain` so they stay
/// host-only; other cookies get the hostname parsed from [`write_url`].
pub fn set_details(cookie: &BrowserCookie, update: CookieUpdate) -> Result<SetDetails> {
    let url = write_url(cookie);
    let domain = if cookie.host_only {
        None
    } else {
        let parsed = Url::parse(&url)
            .map_err(|e| ScopeError::InvalidCookieUrl(format!("{}: {}", url, e)))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ScopeError::InvalidCookieUrl(url.clone()))?;
        Some(host.to_string())
    };

    let same_site = update.same_site.unwrap_or(cookie.same_site);

    Ok(SetDetails {
        url,
        name: cookie.name.clone(),
        value: update.value.unwrap_or_else(|| cookie.value.clone()),
        domain,
        path: update.path.unwrap_or_else(|| cookie.path.clone()),
        secure: update.secure.unwrap_or(cookie.secure),
        http_only: update.http_only.unwrap_or(cookie.http_only),
        same_site: match same_site {
            SameSite::Unspecified => None,
            other => Some(other),
        },
        expiration_date: update.expiration_date.or(if cookie.session {
            None
        } else {
            cookie.expiration_date
        }),
        store_id: cookie.store_id.clone(),
    })
}

/// Apply `update` to `cookie` through the cookie store.
pub async fn update_cookie(
    store: &dyn CookieStore,
    cookie: &BrowserCookie,
    update: CookieUpdate,
) -> Result<BrowserCookie> {
    let details = set_details(cookie, update)?;
    tracing::debug!(
        name = %details.name,
        url = %details.url,
        host_only = details.domain.is_none(),
        "updating cookie"
    );
    store.set(details).await
}

/// Delete `cookie` through the cookie store.
pub async fn remove_cookie(store: &dyn CookieStore, cookie: &BrowserCookie) -> Result<()> {
    let details = RemoveDetails {
        url: write_url(cookie),
        name: cookie.name.clone(),
    };
    tracing::debug!(name = %details.name, url = %details.url, "removing cookie");
    store.remove(details).await
}

/// SameSite values a cookie may be switched to. Browsers only accept
/// `no_restriction` on secure cookies.
pub fn same_site_choices(secure: bool) -> Vec<SameSite> {
    SameSite::ALL
        .into_iter()
        .filter(|s| secure || *s != SameSite::NoRestriction)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_url_scheme_follows_secure() {
        let insecure = BrowserCookie::new("a", "", "example.com").with_path("/p");
        assert_eq!(write_url(&insecure), "http://example.com/p");
        let secure = insecure.with_secure(true);
        assert_eq!(write_url(&secure), "https://example.com/p");
    }

    #[test]
    fn test_write_url_strips_one_dot() {
        let cookie = BrowserCookie::new("a", "", ".example.com");
        assert_eq!(write_url(&cookie), "http://example.com/");
    }

    #[test]
    fn test_host_only_omits_domain() {
        let cookie = BrowserCookie::new("a", "b", "shop.example.com");
        let details = set_details(&cookie, CookieUpdate::http_only(true)).unwrap();
        assert_eq!(details.domain, None);
        assert!(details.http_only);
        assert_eq!(details.url, "http://shop.example.com/");
    }

    #[test]
    fn test_domain_cookie_sends_hostname() {
        let cookie = BrowserCookie::new("a", "b", ".Example.com").with_secure(true);
        let details = set_details(&cookie, CookieUpdate::default()).unwrap();
        assert_eq!(details.domain.as_deref(), Some("example.com"));
        assert_eq!(details.url, "https://Example.com/");
        assert!(details.secure);
    }

    #[test]
    fn test_unspecified_same_site_is_omitted() {
        let cookie = BrowserCookie::new("a", "b", "example.com").with_same_site(SameSite::Lax);
        let details = set_details(&cookie, CookieUpdate::same_site(SameSite::Unspecified)).unwrap();
        assert_eq!(details.same_site, None);

        let kept = set_details(&cookie, CookieUpdate::default()).unwrap();
        assert_eq!(kept.same_site, Some(SameSite::Lax));
    }

    #[test]
    fn test_keeps_expiration() {
        let cookie = BrowserCookie::new("a", "b", "example.com").with_expiration(1_800_000_000.0);
        let details = set_details(&cookie, CookieUpdate::value("c")).unwrap();
        assert_eq!(details.expiration_date, Some(1_800_000_000.0));
        assert_eq!(details.value, "c");
    }

    #[test]
    fn test_invalid_host_is_error() {
        let cookie = BrowserCookie::new("a", "b", ".exa mple.com");
        let err = set_details(&cookie, CookieUpdate::default()).unwrap_err();
        assert!(matches!(err, ScopeError::InvalidCookieUrl(_)));
    }

    #[test]
    fn test_same_site_choices() {
        assert_eq!(same_site_choices(true).len(), 4);
        let insecure = same_site_choices(false);
        assert_eq!(
            insecure,
            vec![SameSite::Strict, SameSite::Lax, SameSite::Unspecified]
        );
    }
}
