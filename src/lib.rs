//! # cookiescope
//!
//! The engine behind a browser cookie inspector.
//!
//! `cookiescope` takes the full cookie set a browser reports and answers
//! "which of these matter to this site, in what order", then exports them
//! in formats other tools understand.
//!
//! ## Features
//!
//! - **Domain matching**: URL or bare hostname → hostname + registrable domain (PSL)
//! - **Relevance tiers**: `.domain`, `hostname`, `.hostname`, everything else
//! - **Favorites**: `(name, domain)` set persisted to a key/value store
//! - **Ranking**: favorites first, tier order otherwise preserved
//! - **Export**: `Set-Cookie` attribute strings and Netscape cookie files
//! - **Mutation**: host-only-preserving updates and removals
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cookiescope::base::config::InspectorConfig;
//! use cookiescope::inspector::CookieInspector;
//! use cookiescope::store::{MemoryCookieStore, MemoryKeyValueStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> cookiescope::base::error::Result<()> {
//!     let inspector = CookieInspector::open(
//!         InspectorConfig::default(),
//!         Arc::new(MemoryCookieStore::new()),
//!         Arc::new(MemoryKeyValueStore::new()),
//!         Arc::new(MemoryKeyValueStore::new()),
//!         Some("https://shop.example.com/"),
//!     )
//!     .await?;
//!
//!     for cookie in inspector.refresh().await? {
//!         println!("{}", inspector.attribute_string(&cookie));
//!     }
//!     println!("{}", inspector.export_netscape().await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Errors and configuration
//! - [`cookies`] - Cookie model, tiers, favorites, ranking, export, mutation
//! - [`store`] - Cookie store and key/value store collaborators
//! - [`inspector`] - Session orchestration

pub mod base;
pub mod cookies;
pub mod inspector;
pub mod store;
