//! Blocklist for hostnames, checked against the raw host string.

/// Hosts blocked on exact match.
const BLOCKED_HOSTNAMES: &[(&str, &str)] = &[
    // Loopback and unspecified
    ("localhost", "loopback hostname"),
    ("localhost.localdomain", "loopback hostname"),
    ("127.0.0.1", "loopback address"),
    ("::1", "loopback address"),
    ("0.0.0.0", "unspecified address"),
    ("::", "unspecified address"),
    ("ip6-localhost", "loopback hostname"),
    ("ip6-loopback", "loopback hostname"),
    // AWS
    ("169.254.169.254", "cloud metadata endpoint (AWS/GCP/Azure)"),
    ("169.254.170.2", "cloud metadata endpoint (AWS ECS)"),
    ("fd00:ec2::254", "cloud metadata endpoint (AWS IPv6)"),
    ("instance-data", "cloud metadata endpoint (AWS EC2-Classic)"),
    // GCP
    ("metadata.google.internal", "cloud metadata endpoint (GCP)"),
    ("metadata", "cloud metadata endpoint (GCP)"),
    // Azure
    ("metadata.azure.com", "cloud metadata endpoint (Azure)"),
    ("metadata.azure.internal", "cloud metadata endpoint (Azure)"),
    // Alibaba
    ("100.100.100.200", "cloud metadata endpoint (Alibaba)"),
    // Kubernetes
    ("kubernetes.default", "Kubernetes API service"),
    ("kubernetes.default.svc", "Kubernetes API service"),
    ("kubernetes.default.svc.cluster.local", "Kubernetes API service"),
    // Docker
    ("docker.internal", "Docker internal hostname"),
    ("host.docker.internal", "Docker internal hostname"),
];

/// Hosts blocked when they contain one of these anywhere. Substring rather than
/// suffix match, so `a.local.example.org` is caught as well.
const BLOCKED_FRAGMENTS: &[(&str, &str)] = &[
    (".local", "reserved TLD (.local)"),
    (".localhost", "reserved TLD (.localhost)"),
    (".test", "reserved TLD (.test)"),
    (".example", "reserved TLD (.example)"),
    (".invalid", "reserved TLD (.invalid)"),
    (".internal", "internal TLD (.internal)"),
    ("metadata.goog", "cloud metadata domain (GCP)"),
];

const DEGENERATE_HOSTS: &[&str] = &["", ".", "..", "-"];

const IDN_PREFIX: &str = "xn--";

/// Check if a hostname is blocked. Returns the reason on a match.
pub fn is_hostname_blocked(host: &str) -> Option<&'static str> {
    let host_lower = host.to_ascii_lowercase();

    if let Some(&(_, reason)) = BLOCKED_HOSTNAMES
        .iter()
        .find(|(name, _)| host_lower == *name)
    {
        return Some(reason);
    }

    if let Some(&(_, reason)) = BLOCKED_FRAGMENTS
        .iter()
        .find(|(fragment, _)| host_lower.contains(fragment))
    {
        return Some(reason);
    }

    if DEGENERATE_HOSTS.contains(&host_lower.as_str()) {
        return Some("degenerate hostname");
    }

    // Homograph lookalikes are rejected rather than decoded.
    if !host_lower.is_ascii() {
        return Some("non-ASCII hostname (possible homograph)");
    }
    if host_lower.contains(IDN_PREFIX) {
        return Some("punycode hostname (possible homograph)");
    }

    None
}

pub fn is_blocked_hostname(host: &str) -> bool {
    is_hostname_blocked(host).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_aliases() {
        for host in [
            "localhost",
            "LOCALHOST",
            "localhost.localdomain",
            "127.0.0.1",
            "::1",
            "ip6-localhost",
            "ip6-loopback",
            "0.0.0.0",
            "::",
        ] {
            assert!(is_blocked_hostname(host), "{}", host);
        }
    }

    #[test]
    fn test_cloud_metadata() {
        for host in [
            "169.254.169.254",
            "169.254.170.2",
            "fd00:ec2::254",
            "instance-data",
            "metadata.google.internal",
            "METADATA.GOOGLE.INTERNAL",
            "metadata",
            "metadata.azure.com",
            "metadata.azure.internal",
            "100.100.100.200",
        ] {
            assert!(is_blocked_hostname(host), "{}", host);
        }
    }

    #[test]
    fn test_metadata_goog_substring() {
        assert!(is_blocked_hostname("metadata.goog"));
        assert!(is_blocked_hostname("computemetadata.goog"));
    }

    #[test]
    fn test_kubernetes_and_docker() {
        assert!(is_blocked_hostname("kubernetes.default"));
        assert!(is_blocked_hostname("kubernetes.default.svc"));
        assert!(is_blocked_hostname("kubernetes.default.svc.cluster.local"));
        assert!(is_blocked_hostname("docker.internal"));
        assert!(is_blocked_hostname("host.docker.internal"));
    }

    #[test]
    fn test_reserved_suffixes() {
        assert!(is_blocked_hostname("printer.local"));
        assert!(is_blocked_hostname("app.localhost"));
        assert!(is_blocked_hostname("foo.test"));
        assert!(is_blocked_hostname("www.example.com"));
        assert!(is_blocked_hostname("nothing.invalid"));
        assert!(is_blocked_hostname("db.corp.internal"));
    }

    #[test]
    fn test_suffix_match_is_substring() {
        assert!(is_blocked_hostname("a.local.evil.com"));
        assert!(is_blocked_hostname("x.testing.org"));
    }

    #[test]
    fn test_degenerate_hosts() {
        assert!(is_blocked_hostname(""));
        assert!(is_blocked_hostname("."));
        assert!(is_blocked_hostname(".."));
        assert!(is_blocked_hostname("-"));
    }

    #[test]
    fn test_idn() {
        assert!(is_blocked_hostname("xn--80ak6aa92e.com"));
        assert!(is_blocked_hostname("аpple.com")); // Cyrillic 'а'
        assert!(is_blocked_hostname("b\u{FFFD}d.com"));
    }

    #[test]
    fn test_public_hosts_pass() {
        assert!(!is_blocked_hostname("8.8.8.8"));
        assert!(!is_blocked_hostname("2001:4860:4860::8888"));
        assert!(!is_blocked_hostname("api.github.com"));
        assert!(!is_blocked_hostname("metadata.acme-corp.net"));
    }

    #[test]
    fn test_reason_is_returned() {
        let reason = is_hostname_blocked("169.254.169.254").unwrap();
        assert!(reason.contains("metadata"), "{}", reason);
    }
}
