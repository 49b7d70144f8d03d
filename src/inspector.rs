//! Cookie Inspector - one inspection session over the collaborators.
//!
//! Owns the favorite set and the persisted view state, and runs the query
//! pipeline:
//!
//! ```text
//! filter ──► DomainQuery ──► CookieStore::get_all({domain}) ──► tiers ──► rank ──► rows
//! ```
//!
//! All favorite changes go through [`CookieInspector::toggle_favorite`], so
//! the in-memory set and the sync store stay in step for this session.

use crate::base::config::InspectorConfig;
use crate::base::error::Result;
use crate::cookies::browser_cookie::BrowserCookie;
use crate::cookies::export;
use crate::cookies::favorites::{FavoriteSet, ToggleOutcome};
use crate::cookies::mutator::{self, CookieUpdate};
use crate::cookies::psl::DomainQuery;
use crate::cookies::ranker;
use crate::cookies::tiers;
use crate::store::{CookieFilter, CookieStore, KeyValueStore, StoredValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the user is looking at: the filter text and the show-all toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    pub filter: String,
    pub include_unrelated: bool,
}

/// Classify, concatenate, and rank `cookies` for `query`.
///
/// Pure and idempotent; this is everything [`CookieInspector::refresh`]
/// does after fetching.
pub fn query_cookies(
    cookies: Vec<BrowserCookie>,
    query: &DomainQuery,
    include_unrelated: bool,
    favorites: &FavoriteSet,
) -> Vec<BrowserCookie> {
    let ordered = tiers::classify(cookies, query, include_unrelated);
    ranker::rank(ordered, favorites)
}

/// An inspection session.
pub struct CookieInspector {
    config: InspectorConfig,
    cookies: Arc<dyn CookieStore>,
    sync_store: Arc<dyn KeyValueStore>,
    favorites: FavoriteSet,
    view: StoredValue<ViewState>,
}

impl CookieInspector {
    /// Load favorites from `sync_store` and the view state from
    /// `session_store`. A `tab_url` (the popup case) replaces whatever filter
    /// was stored.
    pub async fn open(
        config: InspectorConfig,
        cookies: Arc<dyn CookieStore>,
        sync_store: Arc<dyn KeyValueStore>,
        session_store: Arc<dyn KeyValueStore>,
        tab_url: Option<&str>,
    ) -> Result<Self> {
        let favorites = FavoriteSet::load(sync_store.as_ref(), &config.favorites_key).await?;

        let initial = ViewState {
            filter: tab_url.unwrap_or_default().to_string(),
            include_unrelated: config.include_unrelated,
        };
        let mut view =
            StoredValue::load(session_store, config.view_state_key.clone(), initial).await?;

        if let Some(url) = tab_url {
            if view.get().filter != url {
                let state = ViewState {
                    filter: url.to_string(),
                    ..view.get().clone()
                };
                view.set(state).await?;
            }
        }

        tracing::debug!(
            favorites = favorites.len(),
            filter = %view.get().filter,
            "opened cookie inspector"
        );

        Ok(Self {
            config,
            cookies,
            sync_store,
            favorites,
            view,
        })
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewState {
        self.view.get()
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Domain query for the current filter.
    pub fn domain_query(&self) -> DomainQuery {
        DomainQuery::parse(&self.view.get().filter)
    }

    pub async fn set_filter(&mut self, filter: impl Into<String>) -> Result<()> {
        let state = ViewState {
            filter: filter.into(),
            ..self.view.get().clone()
        };
        self.view.set(state).await
    }

    pub async fn set_include_unrelated(&mut self, include_unrelated: bool) -> Result<()> {
        let state = ViewState {
            include_unrelated,
            ..self.view.get().clone()
        };
        self.view.set(state).await
    }

    /// Fetch, classify, and rank cookies for the current view.
    ///
    /// The cookie store is asked for the registrable domain only; hostname
    /// tiers are resolved locally.
    pub async fn refresh(&self) -> Result<Vec<BrowserCookie>> {
        let query = self.domain_query();
        let filter = CookieFilter {
            domain: query.base_domain.clone(),
        };
        let all = self.cookies.get_all(filter).await?;
        let ranked = query_cookies(
            all,
            &query,
            self.view.get().include_unrelated,
            &self.favorites,
        );
        tracing::debug!(count = ranked.len(), "refreshed cookies");
        Ok(ranked)
    }

    pub fn is_favorite(&self, cookie: &BrowserCookie) -> bool {
        self.favorites.is_favorite(cookie)
    }

    /// Toggle a favorite and persist the whole set.
    ///
    /// The session only sees the change once the sync store accepted it; a
    /// failed write leaves the favorites untouched and returns the error.
    pub async fn toggle_favorite(&mut self, cookie: &BrowserCookie) -> Result<ToggleOutcome> {
        let mut next = self.favorites.clone();
        let outcome = next.toggle(cookie);
        next.save(self.sync_store.as_ref(), &self.config.favorites_key)
            .await?;
        self.favorites = next;
        tracing::debug!(name = %cookie.name, domain = %cookie.domain, ?outcome, "toggled favorite");
        Ok(outcome)
    }

    pub async fn update_cookie(
        &self,
        cookie: &BrowserCookie,
        update: CookieUpdate,
    ) -> Result<BrowserCookie> {
        mutator::update_cookie(self.cookies.as_ref(), cookie, update).await
    }

    pub async fn remove_cookie(&self, cookie: &BrowserCookie) -> Result<()> {
        mutator::remove_cookie(self.cookies.as_ref(), cookie).await
    }

    /// Current view as a Netscape cookie file.
    pub async fn export_netscape(&self) -> Result<String> {
        let cookies = self.refresh().await?;
        Ok(export::to_netscape_file_with(
            &cookies,
            self.config.subdomain_flag,
        ))
    }

    pub fn attribute_string(&self, cookie: &BrowserCookie) -> String {
        export::to_attribute_string(cookie)
    }
}

impl std::fmt::Debug for CookieInspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieInspector")
            .field("config", &self.config)
            .field("favorites", &self.favorites.len())
            .field("view", self.view.get())
            .finish_non_exhaustive()
    }
}
