//! Inspector configuration.
//!
//! A single plain struct with sensible defaults, in the same spirit as a
//! request-context config: callers override only what they need.

use serde::{Deserialize, Serialize};

/// Storage key the favorite set is persisted under in the sync store.
pub const DEFAULT_FAVORITES_KEY: &str = "favoriteCookie";

/// Storage key the view state (filter, show-all toggle) lives under in the
/// session store.
pub const DEFAULT_VIEW_STATE_KEY: &str = "cookieView";

/// How the second column of a Netscape cookie file is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubdomainFlag {
    /// Always `TRUE`, whatever the domain looks like. Matches files produced
    /// by earlier releases.
    #[default]
    AlwaysTrue,
    /// `TRUE` only when the domain carries a leading `.`.
    FromDomainPrefix,
}

impl SubdomainFlag {
    pub fn render(self, domain: &str) -> &'static str {
        match self {
            SubdomainFlag::AlwaysTrue => "TRUE",
            SubdomainFlag::FromDomainPrefix if domain.starts_with('.') => "TRUE",
            SubdomainFlag::FromDomainPrefix => "FALSE",
        }
    }
}

/// Configuration options for [`CookieInspector`](crate::inspector::CookieInspector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Key of the favorite set in the sync store.
    pub favorites_key: String,

    /// Key of the persisted view state in the session store.
    pub view_state_key: String,

    /// Whether cookies unrelated to the queried domain are shown when no
    /// view state has been persisted yet.
    pub include_unrelated: bool,

    /// Netscape export flag column policy.
    pub subdomain_flag: SubdomainFlag,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
            view_state_key: DEFAULT_VIEW_STATE_KEY.to_string(),
            include_unrelated: false,
            subdomain_flag: SubdomainFlag::AlwaysTrue,
        }
    }
}

impl InspectorConfig {
    pub fn with_favorites_key(mut self, key: impl Into<String>) -> Self {
        self.favorites_key = key.into();
        self
    }

    pub fn with_view_state_key(mut self, key: impl Into<String>) -> Self {
        self.view_state_key = key.into();
        self
    }

    pub fn with_include_unrelated(mut self, include: bool) -> Self {
        self.include_unrelated = include;
        self
    }

    pub fn with_subdomain_flag(mut self, flag: SubdomainFlag) -> Self {
        self.subdomain_flag = flag;
        self
    }
}
