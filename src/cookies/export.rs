//! Cookie export formats.
//!
//! - [`to_attribute_string`]: one cookie as a `Set-Cookie`-style string,
//!   e.g. `sid=abc; Path=/; Domain=.example.com; Secure; HttpOnly; SameSite=Lax; Expires=Tue, 14 Nov 2023 22:13:20 GMT`
//! - [`to_netscape_file`]: a list as a Netscape cookie file (curl/wget/yt-dlp)
//!
//! Both are pure: the same cookies always give the same text.

use crate::base::config::SubdomainFlag;
use crate::cookies::browser_cookie::BrowserCookie;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// First line of every Netscape cookie file.
pub const NETSCAPE_HEADER: &str = "# Netscape HTTP Cookie File";

const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

const LABEL_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Render one cookie as `name=value` followed by its attributes.
///
/// Name and value are percent-encoded. Attributes appear in the order
/// `Path`, `Domain`, `Secure`, `HttpOnly`, `SameSite`, `Expires`, each only
/// when it carries information, joined by `"; "` with no trailing separator.
pub fn to_attribute_string(cookie: &BrowserCookie) -> String {
    let pair = cookie::Cookie::new(cookie.name.as_str(), cookie.value.as_str());
    let mut parts = vec![pair.encoded().to_string()];

    if !cookie.path.is_empty() {
        parts.push(format!("Path={}", cookie.path));
    }
    if !cookie.domain.is_empty() {
        parts.push(format!("Domain={}", cookie.domain));
    }
    if cookie.secure {
        parts.push("Secure".to_string());
    }
    if cookie.http_only {
        parts.push("HttpOnly".to_string());
    }
    if let Some(same_site) = cookie.same_site.attribute_value() {
        parts.push(format!("SameSite={}", same_site));
    }
    if let Some(expires) = http_date(cookie) {
        parts.push(format!("Expires={}", expires));
    }

    parts.join("; ")
}

fn http_date(cookie: &BrowserCookie) -> Option<String> {
    let expires = cookie.expires_at()?;
    match expires.format(HTTP_DATE) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(name = %cookie.name, error = %e, "cannot format cookie expiry");
            None
        }
    }
}

/// Netscape cookie file with the flag column always `TRUE`.
///
/// `to_netscape_file(&[])` is exactly `"# Netscape HTTP Cookie File\n"`.
pub fn to_netscape_file(cookies: &[BrowserCookie]) -> String {
    to_netscape_file_with(cookies, SubdomainFlag::AlwaysTrue)
}

/// Netscape cookie file with an explicit flag column policy.
///
/// Each record is `domain\tflag\tpath\tsecure\texpiry\tname\tvalue`, in the
/// order given. Empty domains are written as `none`, empty paths as `/`,
/// and session cookies get expiry `0`.
pub fn to_netscape_file_with(cookies: &[BrowserCookie], flag: SubdomainFlag) -> String {
    let records: Vec<String> = cookies
        .iter()
        .map(|cookie| netscape_record(cookie, flag))
        .collect();
    format!("{}\n{}", NETSCAPE_HEADER, records.join("\n"))
}

fn netscape_record(cookie: &BrowserCookie, flag: SubdomainFlag) -> String {
    let domain = if cookie.domain.is_empty() {
        "none"
    } else {
        cookie.domain.as_str()
    };
    let path = if cookie.path.is_empty() {
        "/"
    } else {
        cookie.path.as_str()
    };
    let secure = if cookie.secure { "TRUE" } else { "FALSE" };
    let expiry = cookie.expiration_secs().unwrap_or(0);

    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        domain,
        flag.render(domain),
        path,
        secure,
        expiry,
        cookie.name,
        cookie.value
    )
}

/// Human-readable expiry: `Session`, or `YYYY-MM-DD HH:mm:ss` in UTC.
pub fn expiration_label(cookie: &BrowserCookie) -> String {
    if cookie.session {
        return "Session".to_string();
    }
    cookie
        .expires_at()
        .and_then(|expires| expires.format(LABEL_DATE).ok())
        .unwrap_or_else(|| "Session".to_string())
}
