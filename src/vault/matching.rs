use regex::RegexBuilder;
use url::{Host, Url};

use super::cipher::{CipherListView, UriMatchType};

const ANDROID_APP_SCHEME: &str = "androidapp";

/// Narrows a cipher list to the items saved for a given URI.
pub trait CipherMatcher: Send + Sync {
    fn filter_ciphers_for_matches(
        &self,
        ciphers: &[CipherListView],
        match_uri: &str,
    ) -> Vec<CipherListView>;
}

/// Matches on each login URI using its own match type (domain by default).
#[derive(Debug, Clone, Copy, Default)]
pub struct UriCipherMatcher {
    pub default_match_type: UriMatchType,
}

impl CipherMatcher for UriCipherMatcher {
    fn filter_ciphers_for_matches(
        &self,
        ciphers: &[CipherListView],
        match_uri: &str,
    ) -> Vec<CipherListView> {
        ciphers
            .iter()
            .filter(|c| {
                c.login.as_ref().is_some_and(|login| {
                    login.uris.iter().any(|u| {
                        let match_type = u.match_type.unwrap_or(self.default_match_type);
                        uri_matches(&u.uri, match_uri, match_type)
                    })
                })
            })
            .cloned()
            .collect()
    }
}

pub fn uri_matches(login_uri: &str, match_uri: &str, match_type: UriMatchType) -> bool {
    let login_uri = login_uri.trim();
    let match_uri = match_uri.trim();
    if login_uri.is_empty() || match_uri.is_empty() {
        return false;
    }
    match match_type {
        UriMatchType::Never => false,
        UriMatchType::Exact => login_uri.eq_ignore_ascii_case(match_uri),
        UriMatchType::StartsWith => match_uri
            .to_ascii_lowercase()
            .starts_with(&login_uri.to_ascii_lowercase()),
        UriMatchType::RegularExpression => regex_matches(login_uri, match_uri),
        UriMatchType::Host => {
            let (Some(a), Some(b)) = (parse(login_uri), parse(match_uri)) else {
                return false;
            };
            is_android_app(&a) == is_android_app(&b)
                && a.host_str().is_some_and(|h| !h.is_empty())
                && a.host_str() == b.host_str()
                && a.port() == b.port()
        }
        UriMatchType::Domain => {
            let (Some(a), Some(b)) = (parse(login_uri), parse(match_uri)) else {
                return false;
            };
            if is_android_app(&a) || is_android_app(&b) {
                return is_android_app(&a) && is_android_app(&b) && a.host_str() == b.host_str();
            }
            match (base_domain(&a), base_domain(&b)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
    }
}

/// The whole of `match_uri` must match `pattern`, ignoring case.
fn regex_matches(pattern: &str, match_uri: &str) -> bool {
    match RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.is_match(match_uri),
        Err(e) => {
            tracing::debug!(pattern, error = %e, "Ignoring invalid login URI pattern");
            false
        }
    }
}

/// Parse a URI, assuming http for scheme-less values such as `example.com`.
fn parse(uri: &str) -> Option<Url> {
    match Url::parse(uri) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{uri}")).ok(),
        Err(_) => None,
    }
}

fn is_android_app(url: &Url) -> bool {
    url.scheme() == ANDROID_APP_SCHEME
}

/// Last two labels of a domain name; IP addresses as-is.
fn base_domain(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(domain) => {
            let domain = domain.to_ascii_lowercase();
            Some(match domain.rmatch_indices('.').nth(1) {
                Some((idx, _)) => domain[idx + 1..].to_string(),
                None => domain,
            })
        }
        Host::Ipv4(ip) => Some(ip.to_string()),
        Host::Ipv6(ip) => Some(ip.to_string()),
    }
}
