//! Detection of obfuscated numeric IP hosts.
//!
//! Resolvers and URL libraries disagree on how `0x7f.1` or `2130706433` should
//! be read; many turn them into `127.0.0.1`. Anything that looks like such an
//! encoding is rejected outright, whatever address it would decode to.

/// Return the kind of numeric-IP obfuscation found in `host`, if any.
pub fn suspicious_encoding(host: &str) -> Option<&'static str> {
    if host.contains("0x") || host.contains("0X") {
        return Some("hexadecimal IP encoding not allowed");
    }

    if host.split('.').any(has_octal_prefix) {
        return Some("octal IP encoding (leading zero) not allowed");
    }

    if !host.is_empty() && !host.contains(['.', ':']) && host.bytes().all(|b| b.is_ascii_digit()) {
        return Some("decimal IP encoding not allowed");
    }

    if host.contains('%') {
        return Some("percent-encoded IP not allowed");
    }

    // 127.1 and 10.0.1 expand to full addresses in inet_aton.
    let parts: Vec<&str> = host.split('.').collect();
    if (parts.len() == 2 || parts.len() == 3)
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Some("short-form IP encoding not allowed");
    }

    // Bare hex such as 7f000001.
    if parts.len() == 1
        && !host.contains(':')
        && host.bytes().all(|b| b.is_ascii_hexdigit())
        && host.bytes().any(|b| b.is_ascii_alphabetic())
    {
        return Some("hexadecimal IP encoding not allowed");
    }

    None
}

pub fn has_suspicious_encoding(host: &str) -> bool {
    suspicious_encoding(host).is_some()
}

/// Whether a host that did not parse as an IP literal still looks numeric:
/// every label starts with a digit, or it contains `:`.
pub fn looks_numeric(host: &str) -> bool {
    if host.is_empty() {
        return false;
    }
    host.contains(':')
        || host
            .split('.')
            .all(|label| label.bytes().next().is_some_and(|b| b.is_ascii_digit()))
}

fn has_octal_prefix(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit()
}
