//! Tier, ranking, favorite, and export properties over generated cookie lists.

use cookiescope::cookies::browser_cookie::{BrowserCookie, FavoriteRef};
use cookiescope::cookies::export::{to_attribute_string, to_netscape_file};
use cookiescope::cookies::favorites::FavoriteSet;
use cookiescope::cookies::psl::DomainQuery;
use cookiescope::cookies::ranker::rank;
use cookiescope::cookies::tiers::{classify, Tier, TieredCookies};

const DOMAINS: [&str; 7] = [
    ".example.com",
    "example.com",
    "shop.example.com",
    ".shop.example.com",
    "blog.example.com",
    "other.com",
    "",
];

/// Deterministic cookie lists: every cookie gets a unique name so order
/// can be checked by name.
fn generated_lists() -> Vec<Vec<BrowserCookie>> {
    let mut seed: u64 = 0x5eed;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as usize
    };

    (0..40)
        .map(|list| {
            let len = next() % 12;
            (0..len)
                .map(|i| {
                    let domain = DOMAINS[next() % DOMAINS.len()];
                    BrowserCookie::new(format!("c{}_{}", list, i), "v", domain)
                })
                .collect()
        })
        .collect()
}

fn queries() -> Vec<DomainQuery> {
    vec![
        DomainQuery::parse("shop.example.com"),
        DomainQuery::parse("https://example.com/"),
        DomainQuery::parse("other.com"),
        DomainQuery::parse(""),
        DomainQuery::parse("not a url"),
    ]
}

fn sorted_names(cookies: &[BrowserCookie]) -> Vec<String> {
    let mut names: Vec<String> = cookies.iter().map(|c| c.name.clone()).collect();
    names.sort();
    names
}

fn position(cookies: &[BrowserCookie], name: &str) -> usize {
    cookies.iter().position(|c| c.name == name).unwrap()
}

#[test]
fn test_tiers_partition_input() {
    for cookies in generated_lists() {
        for query in queries() {
            let tiers = TieredCookies::classify(cookies.clone(), &query);
            assert_eq!(tiers.total_count(), cookies.len());

            let mut union = Vec::new();
            for tier in [Tier::DotDomain, Tier::Hostname, Tier::DotHostname, Tier::Other] {
                for cookie in tiers.tier(tier) {
                    assert_eq!(Tier::of(&cookie.domain, &query), tier);
                    union.push(cookie.clone());
                }
            }
            assert_eq!(sorted_names(&union), sorted_names(&cookies));
        }
    }
}

#[test]
fn test_concatenation_order() {
    for cookies in generated_lists() {
        for query in queries() {
            for include_unrelated in [false, true] {
                let ordered = classify(cookies.clone(), &query, include_unrelated);
                let tiers: Vec<Tier> = ordered
                    .iter()
                    .map(|c| Tier::of(&c.domain, &query))
                    .collect();
                assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
                if !include_unrelated {
                    assert!(!tiers.contains(&Tier::Other));
                }
                // Arrival order within a tier.
                for pair in ordered.windows(2) {
                    if Tier::of(&pair[0].domain, &query) == Tier::of(&pair[1].domain, &query) {
                        assert!(position(&cookies, &pair[0].name) < position(&cookies, &pair[1].name));
                    }
                }
            }
        }
    }
}

#[test]
fn test_ranker_stability_and_priority() {
    let query = DomainQuery::parse("shop.example.com");
    for cookies in generated_lists() {
        let favorites = FavoriteSet::from_refs(
            cookies
                .iter()
                .step_by(3)
                .map(|c| FavoriteRef::new(c.name.clone(), c.domain.clone())),
        );
        let tiered = classify(cookies, &query, true);
        let ranked = rank(tiered.clone(), &favorites);
        assert_eq!(sorted_names(&ranked), sorted_names(&tiered));

        for a in &ranked {
            for b in &ranked {
                let (fa, fb) = (favorites.is_favorite(a), favorites.is_favorite(b));
                let (ra, rb) = (position(&ranked, &a.name), position(&ranked, &b.name));
                if fa && !fb {
                    assert!(ra < rb);
                }
                if fa == fb && position(&tiered, &a.name) < position(&tiered, &b.name) {
                    assert!(ra < rb);
                }
            }
        }
    }
}

#[test]
fn test_example_shop_query() {
    let cookies = vec![
        BrowserCookie::new("a", "1", ".example.com"),
        BrowserCookie::new("b", "2", "shop.example.com"),
        BrowserCookie::new("c", "3", ".shop.example.com"),
        BrowserCookie::new("d", "4", "other.com"),
    ];
    let ordered = classify(cookies, &DomainQuery::parse("shop.example.com"), false);
    let domains: Vec<_> = ordered.iter().map(|c| c.domain.as_str()).collect();
    assert_eq!(domains, vec![".example.com", "shop.example.com", ".shop.example.com"]);
}

#[test]
fn test_toggle_idempotent() {
    for cookies in generated_lists() {
        let mut set = FavoriteSet::new();
        for cookie in cookies.iter().take(3) {
            set.toggle(cookie);
        }
        let before = set.clone();
        for cookie in &cookies {
            set.toggle(cookie);
            set.toggle(cookie);
            for other in &cookies {
                assert_eq!(set.is_favorite(other), before.is_favorite(other));
            }
        }
    }
}

#[test]
fn test_netscape_spec_examples() {
    assert_eq!(to_netscape_file(&[]), "# Netscape HTTP Cookie File\n");

    let cookie = BrowserCookie::new("a", "b", "example.com")
        .with_secure(true)
        .with_expiration(1700000000.0);
    let file = to_netscape_file(&[cookie]);
    assert_eq!(
        file.lines().nth(1),
        Some("example.com\tTRUE\t/\tTRUE\t1700000000\ta\tb")
    );
}

#[test]
fn test_netscape_one_record_per_cookie() {
    for cookies in generated_lists() {
        let file = to_netscape_file(&cookies);
        let lines: Vec<&str> = file.split('\n').collect();
        assert_eq!(lines[0], "# Netscape HTTP Cookie File");
        if cookies.is_empty() {
            assert_eq!(lines, vec!["# Netscape HTTP Cookie File", ""]);
            continue;
        }
        assert_eq!(lines.len(), cookies.len() + 1);
        for (line, cookie) in lines[1..].iter().zip(&cookies) {
            let fields: Vec<&str> = line.split('\t').collect();
            assert_eq!(fields.len(), 7);
            assert_eq!(fields[5], cookie.name);
        }
    }
}

#[test]
fn test_exports_are_deterministic() {
    for cookies in generated_lists() {
        assert_eq!(to_netscape_file(&cookies), to_netscape_file(&cookies));
        for cookie in &cookies {
            assert_eq!(to_attribute_string(cookie), to_attribute_string(cookie));
        }
    }
}
