use crate::base::error::ScopeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// A cookie as reported by the browser's cookie API.
///
/// Field names follow the WebExtension `cookies.Cookie` shape so payloads
/// from the browser deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserCookie {
    pub name: String,
    pub value: String,
    /// May carry a leading `.` meaning "includes subdomains".
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub same_site: SameSite,
    #[serde(default)]
    pub session: bool,
    #[serde(default)]
    pub host_only: bool,
    /// Unix seconds, possibly fractional. Absent for session cookies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

fn default_path() -> String {
    "/".to_string()
}

/// SameSite status in the browser API vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SameSite {
    Strict,
    Lax,
    NoRestriction,
    #[default]
    Unspecified,
}

impl SameSite {
    pub const ALL: [SameSite; 4] = [
        SameSite::Strict,
        SameSite::Lax,
        SameSite::NoRestriction,
        SameSite::Unspecified,
    ];

    /// Browser API spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            SameSite::Strict => "strict",
            SameSite::Lax => "lax",
            SameSite::NoRestriction => "no_restriction",
            SameSite::Unspecified => "unspecified",
        }
    }

    /// `SameSite=` attribute vocabulary. `None` means the attribute is left out.
    pub fn attribute_value(self) -> Option<cookie::SameSite> {
        match self {
            SameSite::Strict => Some(cookie::SameSite::Strict),
            SameSite::Lax => Some(cookie::SameSite::Lax),
            SameSite::NoRestriction => Some(cookie::SameSite::None),
            SameSite::Unspecified => None,
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SameSite {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "no_restriction" => Ok(SameSite::NoRestriction),
            "unspecified" => Ok(SameSite::Unspecified),
            other => Err(ScopeError::UnknownSameSite(other.to_string())),
        }
    }
}

impl Serialize for SameSite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Browsers add values over time; anything unknown is read as unspecified.
impl<'de> Deserialize<'de> for SameSite {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|_| {
            tracing::warn!(same_site = %raw, "unknown SameSite value, treating as unspecified");
            SameSite::Unspecified
        }))
    }
}

/// The `(name, domain)` identity a favorite is stored as.
///
/// `path` is deliberately not part of it: two cookies with the same name and
/// domain but different paths are the same favorite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteRef {
    pub name: String,
    pub domain: String,
}

impl FavoriteRef {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }

    pub fn matches(&self, cookie: &BrowserCookie) -> bool {
        self.name == cookie.name && self.domain == cookie.domain
    }
}

impl BrowserCookie {
    /// A session cookie on `domain` with path `/`. Host-only unless the
    /// domain carries a leading dot.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        let domain = domain.into();
        Self {
            name: name.into(),
            value: value.into(),
            host_only: !domain.starts_with('.'),
            domain,
            path: default_path(),
            secure: false,
            http_only: false,
            same_site: SameSite::Unspecified,
            session: true,
            expiration_date: None,
            store_id: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Makes this a persistent cookie expiring at `unix_secs`.
    pub fn with_expiration(mut self, unix_secs: f64) -> Self {
        self.expiration_date = Some(unix_secs);
        self.session = false;
        self
    }

    pub fn favorite_ref(&self) -> FavoriteRef {
        FavoriteRef::new(self.name.clone(), self.domain.clone())
    }

    /// Domain with a single leading dot removed, usable as a URL host.
    pub fn host(&self) -> &str {
        self.domain.strip_prefix('.').unwrap_or(&self.domain)
    }

    /// Expiration rounded to whole seconds, `None` for session cookies.
    pub fn expiration_secs(&self) -> Option<i64> {
        if self.session {
            return None;
        }
        self.expiration_date
            .filter(|secs| secs.is_finite())
            .map(|secs| secs.round() as i64)
    }

    /// Expiration as a calendar instant, `None` for session cookies or
    /// timestamps outside the representable range.
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.expiration_secs()
            .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
    }
}
