//! Favorite-first ordering.

use crate::cookies::browser_cookie::BrowserCookie;
use crate::cookies::favorites::FavoriteSet;

/// Move favorites ahead of everything else.
///
/// Single-key stable sort: favorites and non-favorites each keep the order
/// they arrived in (the tier order), and no secondary key is applied.
pub fn rank(mut cookies: Vec<BrowserCookie>, favorites: &FavoriteSet) -> Vec<BrowserCookie> {
    // `false < true`, so favorites (key false) sort first.
    cookies.sort_by_key(|cookie| !favorites.is_favorite(cookie));
    cookies
}
