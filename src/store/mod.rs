//! External collaborators: the browser cookie store and key/value storage.
//!
//! The engine never owns cookies or persisted settings; it talks to these
//! traits. Calls are single-shot and never retried here, and errors are
//! handed back to the caller untouched.
//!
//! | Trait | Browser counterpart | Implementations |
//! |-------|---------------------|-----------------|
//! | [`CookieStore`] | `browser.cookies` | [`MemoryCookieStore`] |
//! | [`KeyValueStore`] | `browser.storage.sync` / `.session` | [`MemoryKeyValueStore`], [`JsonFileStore`] |
//!
//! Futures are boxed so both traits stay object-safe and can be shared as
//! `Arc<dyn …>`.

mod file;
mod memory;
pub mod stored_value;

pub use file::JsonFileStore;
pub use memory::{MemoryCookieStore, MemoryKeyValueStore};
pub use stored_value::StoredValue;

use crate::base::error::Result;
use crate::cookies::browser_cookie::{BrowserCookie, SameSite};
use serde::{Deserialize, Serialize};
use std::{future::Future, pin::Pin, sync::Arc};

/// Alias for the `Future` type returned by collaborator calls.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Filter for [`CookieStore::get_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieFilter {
    /// Only cookies whose domain matches or is a subdomain of this one.
    /// `None` returns every cookie.
    pub domain: Option<String>,
}

impl CookieFilter {
    pub fn domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
        }
    }
}

/// Arguments of a cookie write (`cookies.set`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDetails {
    pub url: String,
    pub name: String,
    pub value: String,
    /// `None` keeps the cookie host-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    /// `None` leaves SameSite unspecified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<SameSite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

/// Arguments of a cookie removal (`cookies.remove`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveDetails {
    pub url: String,
    pub name: String,
}

/// The browser's cookie API.
pub trait CookieStore: Send + Sync {
    /// All cookies matching `filter`, in the store's own order.
    fn get_all(&self, filter: CookieFilter) -> StoreFuture<'_, Vec<BrowserCookie>>;

    /// Write a cookie and return it as stored.
    fn set(&self, details: SetDetails) -> StoreFuture<'_, BrowserCookie>;

    /// Delete the cookie named `details.name` visible at `details.url`.
    fn remove(&self, details: RemoveDetails) -> StoreFuture<'_, ()>;
}

/// Persistent key/value storage holding JSON values.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StoreFuture<'_, Option<serde_json::Value>>;

    fn set(&self, key: &str, value: serde_json::Value) -> StoreFuture<'_, ()>;
}

impl<S: CookieStore + ?Sized> CookieStore for Arc<S> {
    fn get_all(&self, filter: CookieFilter) -> StoreFuture<'_, Vec<BrowserCookie>> {
        (**self).get_all(filter)
    }

    fn set(&self, details: SetDetails) -> StoreFuture<'_, BrowserCookie> {
        (**self).set(details)
    }

    fn remove(&self, details: RemoveDetails) -> StoreFuture<'_, ()> {
        (**self).remove(details)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> StoreFuture<'_, Option<serde_json::Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: serde_json::Value) -> StoreFuture<'_, ()> {
        (**self).set(key, value)
    }
}
