//! User-maintained favorite cookies.
//!
//! Favorites are identified by `(name, domain)` only. The set is an owned
//! value: load it once, read it synchronously, and route every change through
//! [`FavoriteSet::toggle`]. Saving writes the whole set back
//! (last-writer-wins; a concurrent toggle elsewhere can be lost).

use crate::base::error::Result;
use crate::cookies::browser_cookie::{BrowserCookie, FavoriteRef};
use crate::store::KeyValueStore;
use serde_json::Value;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// In-memory favorite set, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    refs: Vec<FavoriteRef>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from refs, dropping duplicates.
    pub fn from_refs(refs: impl IntoIterator<Item = FavoriteRef>) -> Self {
        let mut set = Self::new();
        for favorite in refs {
            if !set.refs.contains(&favorite) {
                set.refs.push(favorite);
            }
        }
        set
    }

    pub fn is_favorite(&self, cookie: &BrowserCookie) -> bool {
        self.refs.iter().any(|favorite| favorite.matches(cookie))
    }

    /// Remove the cookie's ref if present, otherwise add it.
    pub fn toggle(&mut self, cookie: &BrowserCookie) -> ToggleOutcome {
        if self.is_favorite(cookie) {
            self.refs.retain(|favorite| !favorite.matches(cookie));
            ToggleOutcome::Removed
        } else {
            self.refs.push(cookie.favorite_ref());
            ToggleOutcome::Added
        }
    }

    pub fn refs(&self) -> &[FavoriteRef] {
        &self.refs
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Load the set stored under `key`. A missing key is an empty set.
    ///
    /// Entries may be full cookie objects; only `name` and `domain` are kept.
    /// Entries that do not decode are skipped, and a value that is not an
    /// array reads as empty.
    pub async fn load(store: &dyn KeyValueStore, key: &str) -> Result<Self> {
        let entries = match store.get(key).await? {
            Some(Value::Array(entries)) => entries,
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                tracing::warn!(key = %key, value = %other, "ignoring non-array favorites");
                Vec::new()
            }
        };
        let refs = entries.into_iter().filter_map(|entry| {
            match serde_json::from_value::<FavoriteRef>(entry) {
                Ok(favorite) => Some(favorite),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "skipping undecodable favorite");
                    None
                }
            }
        });
        let set = Self::from_refs(refs);
        tracing::debug!(key = %key, count = set.len(), "loaded favorite cookies");
        Ok(set)
    }

    /// Write the complete set under `key`.
    pub async fn save(&self, store: &dyn KeyValueStore, key: &str) -> Result<()> {
        let raw = serde_json::to_value(&self.refs)?;
        store.set(key, raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKeyValueStore;
    use serde_json::json;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut set = FavoriteSet::from_refs(vec![FavoriteRef::new("x", "y.com")]);
        let original = set.clone();
        let cookie = BrowserCookie::new("sid", "v", ".example.com");

        assert_eq!(set.toggle(&cookie), ToggleOutcome::Added);
        assert!(set.is_favorite(&cookie));
        assert_eq!(set.toggle(&cookie), ToggleOutcome::Removed);
        assert!(!set.is_favorite(&cookie));
        assert_eq!(set, original);
    }

    #[test]
    fn test_toggle_matches_any_path() {
        let mut set = FavoriteSet::new();
        set.toggle(&BrowserCookie::new("sid", "v", "example.com").with_path("/a"));
        let other_path = BrowserCookie::new("sid", "v", "example.com").with_path("/b");
        assert!(set.is_favorite(&other_path));
        assert_eq!(set.toggle(&other_path), ToggleOutcome::Removed);
        assert!(set.is_empty());
    }

    #[test]
    fn test_from_refs_dedups() {
        let set = FavoriteSet::from_refs(vec![
            FavoriteRef::new("a", "b"),
            FavoriteRef::new("a", "b"),
        ]);
        assert_eq!(set.len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let store = MemoryKeyValueStore::new();
        let set = FavoriteSet::load(&store, "favoriteCookie").await.unwrap();
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_load_full_cookie_objects() {
        let store = MemoryKeyValueStore::new();
        store
            .set(
                "favoriteCookie",
                json!([{"name": "sid", "domain": ".example.com", "value": "x", "path": "/"}]),
            )
            .await
            .unwrap();
        let set = FavoriteSet::load(&store, "favoriteCookie").await.unwrap();
        assert_eq!(set.refs(), &[FavoriteRef::new("sid", ".example.com")]);
    }

    #[tokio::test]
    async fn test_load_skips_undecodable_entries() {
        let store = MemoryKeyValueStore::new();
        store
            .set(
                "favoriteCookie",
                json!([{"name": "sid"}, {"name": "a", "domain": "b"}, 42]),
            )
            .await
            .unwrap();
        let set = FavoriteSet::load(&store, "favoriteCookie").await.unwrap();
        assert_eq!(set.refs(), &[FavoriteRef::new("a", "b")]);
    }

    #[tokio::test]
    async fn test_load_non_array_is_empty() {
        let store = MemoryKeyValueStore::new();
        store
            .set("favoriteCookie", json!({"name": "a", "domain": "b"}))
            .await
            .unwrap();
        let set = FavoriteSet::load(&store, "favoriteCookie").await.unwrap();
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_whole_set() {
        let store = MemoryKeyValueStore::new();
        let mut set = FavoriteSet::new();
        set.toggle(&BrowserCookie::new("a", "", "a.com"));
        set.toggle(&BrowserCookie::new("b", "", "b.com"));
        set.save(&store, "favoriteCookie").await.unwrap();

        assert_eq!(
            store.get("favoriteCookie").await.unwrap(),
            Some(json!([
                {"name": "a", "domain": "a.com"},
                {"name": "b", "domain": "b.com"}
            ]))
        );
    }
}
