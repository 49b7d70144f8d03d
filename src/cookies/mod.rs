//! Cookie discovery, ranking, and export.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`browser_cookie`] | [`BrowserCookie`](browser_cookie::BrowserCookie), [`SameSite`](browser_cookie::SameSite), [`FavoriteRef`](browser_cookie::FavoriteRef) |
//! | [`psl`] | Filter string → hostname + registrable domain |
//! | [`tiers`] | Domain-relevance tiers |
//! | [`favorites`] | Favorite set and its persistence |
//! | [`ranker`] | Favorite-first stable ordering |
//! | [`export`] | `Set-Cookie` attribute string, Netscape file |
//! | [`mutator`] | Updates and removals through the cookie store |
//!
//! # Ranking a cookie list
//!
//! ```rust
//! use cookiescope::cookies::browser_cookie::BrowserCookie;
//! use cookiescope::cookies::favorites::FavoriteSet;
//! use cookiescope::cookies::psl::DomainQuery;
//! use cookiescope::cookies::{ranker, tiers};
//!
//! let all = vec![
//!     BrowserCookie::new("theme", "dark", "shop.example.com"),
//!     BrowserCookie::new("sid", "abc", ".example.com"),
//!     BrowserCookie::new("ads", "1", "tracker.net"),
//! ];
//! let mut favorites = FavoriteSet::new();
//! favorites.toggle(&all[0]);
//!
//! let query = DomainQuery::parse("https://shop.example.com/cart");
//! let ranked = ranker::rank(tiers::classify(all, &query, false), &favorites);
//! let names: Vec<_> = ranked.iter().map(|c| c.name.as_str()).collect();
//! assert_eq!(names, ["theme", "sid"]);
//! ```
//!
//! # Export to Netscape format (curl/wget compatible)
//!
//! ```rust
//! use cookiescope::cookies::browser_cookie::BrowserCookie;
//! use cookiescope::cookies::export::to_netscape_file;
//!
//! let cookie = BrowserCookie::new("a", "b", "example.com").with_expiration(1700000000.0);
//! assert_eq!(
//!     to_netscape_file(&[cookie]),
//!     "# Netscape HTTP Cookie File\nexample.com\tTRUE\t/\tFALSE\t1700000000\ta\tb"
//! );
//! ```

pub mod browser_cookie;
pub mod export;
pub mod favorites;
pub mod mutator;
pub mod psl;
pub mod ranker;
pub mod tiers;
