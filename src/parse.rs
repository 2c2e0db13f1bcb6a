//! Scheme and host extraction from a normalized URL.
//!
//! This is deliberately not a full URL parser: it pulls out only the pieces the
//! security decision needs, and it works on the raw string so that numeric host
//! encodings reach the detectors unmodified (a conforming parser would rewrite
//! `0x7f000001` into `127.0.0.1` first).

const SCHEME_SEPARATOR: &str = "://";
const HOST_DELIMITERS: [char; 4] = [':', '/', '?', '#'];
const BRACKETED_FORBIDDEN: [char; 5] = ['/', '?', '#', '@', '['];

/// Scheme and host of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
    scheme: &'a str,
    host: &'a str,
}

impl<'a> UrlParts<'a> {
    /// Split `url` into scheme and host. Missing pieces come back empty.
    pub fn parse(url: &'a str) -> Self {
        Self {
            scheme: scheme(url),
            host: host(url),
        }
    }

    pub fn scheme(&self) -> &'a str {
        self.scheme
    }

    /// Host without userinfo or IPv6 brackets.
    pub fn host(&self) -> &'a str {
        self.host
    }

    pub fn is_https(&self) -> bool {
        self.scheme == "https"
    }
}

/// Everything before the first `://`, or empty if there is none.
pub fn scheme(url: &str) -> &str {
    url.find(SCHEME_SEPARATOR)
        .map(|i| &url[..i])
        .unwrap_or("")
}

/// Host portion of `url`, or empty if it cannot be determined.
///
/// An `@` before the first `:`, `/`, `?` or `#` marks userinfo; everything up
/// to the last such `@` is dropped, so `http://trusted.com@evil/` yields
/// `evil`. A leading `[` takes the bracketed literal without the brackets.
pub fn host(url: &str) -> &str {
    let Some(sep) = url.find(SCHEME_SEPARATOR) else {
        return "";
    };
    let mut rest = &url[sep + SCHEME_SEPARATOR.len()..];

    let first_delim = rest.find(HOST_DELIMITERS).unwrap_or(rest.len());
    if let Some(at) = rest[..first_delim].rfind('@') {
        rest = &rest[at + 1..];
    }

    if let Some(inner) = rest.strip_prefix('[') {
        return match inner.find(']') {
            Some(end) if !inner[..end].contains(BRACKETED_FORBIDDEN) => &inner[..end],
            _ => "",
        };
    }

    let end = rest.find(HOST_DELIMITERS).unwrap_or(rest.len());
    &rest[..end]
}
