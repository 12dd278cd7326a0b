//! Record Normalizer: splits a history URL into domain and path.
//!
//! The splitting follows the generic URL rules browsers' history exports are
//! usually processed with: anything that merely *looks* wrong (no scheme,
//! spaces, stray punctuation) still splits, possibly into empty strings. A
//! URL is only rejected when its network location is structurally broken,
//! which today means IPv6 brackets that do not pair up or do not hold an
//! IPv6 (or IPvFuture) literal.

use std::net::Ipv6Addr;

use crate::types::errors::MalformedUrl;
use crate::types::history::ParsedUrl;

/// Schemes whose last path segment may carry `;params`.
const USES_PARAMS: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtsps", "rtspu",
    "sip", "sips", "mms", "sftp", "tel",
];

/// Splits `url` into a [`ParsedUrl`].
///
/// Returns `Err` only when the URL cannot be split at all; callers skip such
/// records. An empty domain or path is a successful parse.
pub fn normalize(url: &str) -> Result<ParsedUrl, MalformedUrl> {
    let cleaned: String = url
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let (scheme, rest) = split_scheme(&cleaned);

    let (domain, rest) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            (&after[..end], &after[end..])
        }
        None => ("", rest),
    };
    check_netloc(domain).map_err(|_| MalformedUrl(url.to_string()))?;

    let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
    let rest = rest.split_once('?').map_or(rest, |(before, _)| before);
    let path = if USES_PARAMS.contains(&scheme.as_str()) {
        strip_params(rest)
    } else {
        rest
    };

    Ok(ParsedUrl {
        domain: domain.to_string(),
        path: path.to_string(),
    })
}

/// Returns the lowercased scheme and the remainder after `:`, or an empty
/// scheme and the whole input when there is no valid scheme prefix.
fn split_scheme(url: &str) -> (String, &str) {
    if let Some(colon) = url.find(':') {
        let candidate = &url[..colon];
        let mut chars = candidate.chars();
        let valid = match chars.next() {
            Some(first) => {
                first.is_ascii_alphabetic()
                    && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            }
            None => false,
        };
        if valid {
            return (candidate.to_ascii_lowercase(), &url[colon + 1..]);
        }
    }
    (String::new(), url)
}

fn check_netloc(netloc: &str) -> Result<(), ()> {
    let open = netloc.contains('[');
    let close = netloc.contains(']');
    if open != close {
        return Err(());
    }
    if open {
        let host = netloc
            .split_once('[')
            .and_then(|(_, after)| after.split_once(']'))
            .map_or("", |(inside, _)| inside);
        check_bracketed_host(host)?;
    }
    Ok(())
}

fn check_bracketed_host(host: &str) -> Result<(), ()> {
    if let Some(future) = host.strip_prefix('v') {
        // IPvFuture: "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
        return match future.split_once('.') {
            Some((version, body))
                if !version.is_empty()
                    && version.chars().all(|c| c.is_ascii_hexdigit())
                    && !body.is_empty() =>
            {
                Ok(())
            }
            _ => Err(()),
        };
    }
    let address = host.split_once('%').map_or(host, |(addr, _zone)| addr);
    address.parse::<Ipv6Addr>().map(|_| ()).map_err(|_| ())
}

/// Drops `;params` from the last path segment.
fn strip_params(path: &str) -> &str {
    let search_from = path.rfind('/').unwrap_or(0);
    match path[search_from..].find(';') {
        Some(offset) => &path[..search_from + offset],
        None => path,
    }
}
