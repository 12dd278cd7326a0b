//! Table-driven tests for the record normalizer.
//!
//! A record is only dropped when its URL cannot be split at all; URLs that
//! split into empty components are kept.

use historymidi::services::normalizer::normalize;
use rstest::rstest;

#[rstest]
#[case("http://a.com/x", "a.com", "/x")]
#[case("https://a.com", "a.com", "")]
#[case("https://A.com/Path/", "A.com", "/Path/")]
#[case("HTTPS://a.com/x?y=1", "a.com", "/x")]
#[case("https://a.com/x#frag", "a.com", "/x")]
#[case("https://a.com/x;p=1?q", "a.com", "/x")]
#[case("file:///home/user/page.html", "", "/home/user/page.html")]
#[case("//cdn.example.com/lib.js", "cdn.example.com", "/lib.js")]
#[case("mailto:someone@example.com", "", "someone@example.com")]
#[case("view-source:https://a.com/", "", "https://a.com/")]
#[case("http://münchen.de/straße", "münchen.de", "/straße")]
#[case("", "", "")]
#[case("not a url but has no scheme??", "", "not a url but has no scheme")]
#[case("1http://a.com/x", "", "1http://a.com/x")]
fn test_splits_domain_and_path(#[case] url: &str, #[case] domain: &str, #[case] path: &str) {
    let parsed = normalize(url).unwrap();
    assert_eq!(parsed.domain, domain, "domain of {:?}", url);
    assert_eq!(parsed.path, path, "path of {:?}", url);
}

#[rstest]
#[case("http://[::1/")]
#[case("http://::1]/")]
#[case("https://[192.168.0.1]/")]
#[case("https://[example.com]/")]
#[case("https://[v.1]/")]
fn test_rejects_broken_netloc(#[case] url: &str) {
    let err = normalize(url).unwrap_err();
    assert_eq!(err.to_string(), format!("Malformed URL: {}", url));
}

#[rstest]
#[case("http://[2001:db8::7]/c=GB", "[2001:db8::7]", "/c=GB")]
#[case("http://[fe80::1%25eth0]:80/", "[fe80::1%25eth0]:80", "/")]
fn test_accepts_ipv6_literals(#[case] url: &str, #[case] domain: &str, #[case] path: &str) {
    let parsed = normalize(url).unwrap();
    assert_eq!(parsed.domain, domain);
    assert_eq!(parsed.path, path);
}

#[test]
fn test_path_length_counts_characters() {
    let parsed = normalize("http://a.com/ü").unwrap();
    assert_eq!(parsed.path.chars().count(), 2);
}
