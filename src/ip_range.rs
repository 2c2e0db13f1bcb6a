//! Private and reserved IP range classification.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::{Ipv4Net, Ipv6Net};

/// IPv4 ranges that are never fetched.
const IPV4_BLOCKED: &[(Ipv4Net, &str)] = &[
    (v4(127, 0, 0, 0, 8), "loopback (127.0.0.0/8)"),
    (v4(10, 0, 0, 0, 8), "private network (10.0.0.0/8)"),
    (v4(172, 16, 0, 0, 12), "private network (172.16.0.0/12)"),
    (v4(192, 168, 0, 0, 16), "private network (192.168.0.0/16)"),
    (v4(169, 254, 0, 0, 16), "link-local (169.254.0.0/16)"),
    (v4(100, 64, 0, 0, 10), "carrier-grade NAT (100.64.0.0/10)"),
    (v4(255, 255, 255, 0, 24), "broadcast (255.255.255.255)"),
    (v4(0, 0, 0, 0, 8), "this network (0.0.0.0/8)"),
    (v4(224, 0, 0, 0, 4), "multicast (224.0.0.0/4)"),
    (v4(240, 0, 0, 0, 4), "reserved (240.0.0.0/4)"),
];

/// IPv6 ranges that are never fetched. IPv4-mapped addresses are unwrapped
/// before this table is consulted.
const IPV6_BLOCKED: &[(Ipv6Net, &str)] = &[
    (v6([0, 0, 0, 0, 0, 0, 0, 1], 128), "loopback (::1)"),
    (v6([0xfe80, 0, 0, 0, 0, 0, 0, 0], 10), "link-local (fe80::/10)"),
    (v6([0xfec0, 0, 0, 0, 0, 0, 0, 0], 10), "site-local (fec0::/10)"),
    (v6([0xff00, 0, 0, 0, 0, 0, 0, 0], 8), "multicast (ff00::/8)"),
    (v6([0, 0, 0, 0, 0, 0, 0, 0], 128), "unspecified (::)"),
    (v6([0xfc00, 0, 0, 0, 0, 0, 0, 0], 7), "unique local (fc00::/7)"),
    (v6([0x2001, 0x0db8, 0, 0, 0, 0, 0, 0], 32), "documentation (2001:db8::/32)"),
    (v6([0x2002, 0, 0, 0, 0, 0, 0, 0], 16), "6to4 (2002::/16)"),
    (v6([0x2001, 0, 0, 0, 0, 0, 0, 0], 32), "Teredo (2001::/32)"),
];

const fn v4(a: u8, b: u8, c: u8, d: u8, prefix: u8) -> Ipv4Net {
    Ipv4Net::new_assert(Ipv4Addr::new(a, b, c, d), prefix)
}

const fn v6(s: [u16; 8], prefix: u8) -> Ipv6Net {
    Ipv6Net::new_assert(
        Ipv6Addr::new(s[0], s[1], s[2], s[3], s[4], s[5], s[6], s[7]),
        prefix,
    )
}

/// Return the reserved range `ip` falls in, if any.
pub fn classify(ip: IpAddr) -> Option<&'static str> {
    match ip {
        IpAddr::V4(ipv4) => classify_v4(ipv4),
        IpAddr::V6(ipv6) => classify_v6(ipv6),
    }
}

pub fn is_private_or_reserved(ip: IpAddr) -> bool {
    classify(ip).is_some()
}

pub fn classify_v4(ip: Ipv4Addr) -> Option<&'static str> {
    IPV4_BLOCKED
        .iter()
        .find(|(net, _)| net.contains(&ip))
        .map(|&(_, reason)| reason)
}

pub fn classify_v6(ip: Ipv6Addr) -> Option<&'static str> {
    // ::ffff:a.b.c.d is judged by the IPv4 table
    if let Some(ipv4) = ip.to_ipv4_mapped() {
        return classify_v4(ipv4);
    }

    // Deprecated IPv4-compatible form ::a.b.c.d. :: and ::1 keep their own meaning.
    let segments = ip.segments();
    if segments[0..6] == [0, 0, 0, 0, 0, 0] && (segments[6] != 0 || segments[7] > 1) {
        let [_, _, _, _, _, _, _, _, _, _, _, _, a, b, c, d] = ip.octets();
        return classify_v4(Ipv4Addr::new(a, b, c, d));
    }

    IPV6_BLOCKED
        .iter()
        .find(|(net, _)| net.contains(&ip))
        .map(|&(_, reason)| reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked(s: &str) -> bool {
        is_private_or_reserved(s.parse().unwrap())
    }

    // ==================== IPv4 ====================

    #[test]
    fn test_loopback_boundaries() {
        assert!(blocked("127.0.0.0"));
        assert!(blocked("127.0.0.1"));
        assert!(blocked("127.255.255.255"));
        assert!(!blocked("126.255.255.255"));
        assert!(!blocked("128.0.0.0"));
    }

    #[test]
    fn test_ten_boundaries() {
        assert!(blocked("10.0.0.0"));
        assert!(blocked("10.255.255.255"));
        assert!(!blocked("9.255.255.255"));
        assert!(!blocked("11.0.0.0"));
    }

    #[test]
    fn test_172_boundaries() {
        assert!(blocked("172.16.0.0"));
        assert!(blocked("172.31.255.255"));
        assert!(!blocked("172.15.255.255"));
        assert!(!blocked("172.32.0.0"));
    }

    #[test]
    fn test_192_168_boundaries() {
        assert!(blocked("192.168.0.0"));
        assert!(blocked("192.168.255.255"));
        assert!(!blocked("192.167.255.255"));
        assert!(!blocked("192.169.0.0"));
    }

    #[test]
    fn test_link_local() {
        assert!(blocked("169.254.0.0"));
        assert!(blocked("169.254.169.254"));
        assert!(blocked("169.254.255.255"));
        assert!(!blocked("169.253.255.255"));
        assert!(!blocked("169.255.0.0"));
    }

    #[test]
    fn test_cgnat_boundaries() {
        assert!(blocked("100.64.0.0"));
        assert!(blocked("100.127.255.255"));
        assert!(blocked("100.100.100.200"));
        assert!(!blocked("100.63.255.255"));
        assert!(!blocked("100.128.0.0"));
    }

    #[test]
    fn test_zero_network() {
        assert!(blocked("0.0.0.0"));
        assert!(blocked("0.255.255.255"));
        assert!(!blocked("1.0.0.0"));
    }

    #[test]
    fn test_multicast_and_reserved() {
        assert!(!blocked("223.255.255.255"));
        assert!(blocked("224.0.0.0"));
        assert!(blocked("239.255.255.255"));
        assert!(blocked("240.0.0.0"));
        assert!(blocked("255.255.255.254"));
        assert!(blocked("255.255.255.255"));
    }

    #[test]
    fn test_public_ipv4() {
        assert!(!blocked("8.8.8.8"));
        assert!(!blocked("1.1.1.1"));
        assert!(!blocked("93.184.216.34"));
        assert!(!blocked("192.0.2.1"));
    }

    #[test]
    fn test_reason_names_range() {
        let reason = classify("172.20.1.1".parse().unwrap()).unwrap();
        assert!(reason.contains("172.16.0.0/12"), "{}", reason);
    }

    // ==================== IPv6 ====================

    #[test]
    fn test_ipv6_loopback_and_unspecified() {
        assert!(blocked("::1"));
        assert!(blocked("0:0:0:0:0:0:0:1"));
        assert!(blocked("::"));
    }

    #[test]
    fn test_ipv6_link_and_site_local() {
        assert!(blocked("fe80::1"));
        assert!(blocked("febf:ffff::1"));
        assert!(blocked("fec0::1"));
        assert!(blocked("feff::1"));
        assert!(!blocked("fe7f::1"));
    }

    #[test]
    fn test_ipv6_multicast() {
        assert!(blocked("ff02::1"));
        assert!(blocked("ff0e::1"));
    }

    #[test]
    fn test_ipv6_unique_local() {
        assert!(blocked("fc00::1"));
        assert!(blocked("fd00::1"));
        assert!(blocked("fd00:ec2::254"));
        assert!(blocked("fdff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"));
        assert!(!blocked("fb00::1"));
        assert!(!blocked("fe00::1"));
    }

    #[test]
    fn test_ipv6_documentation_6to4_teredo() {
        assert!(blocked("2001:db8::1"));
        assert!(blocked("2001:db8:ffff::1"));
        assert!(blocked("2002::1"));
        assert!(blocked("2002:7f00:1::1"));
        assert!(blocked("2001::1"));
        assert!(blocked("2001:0:ffff::1"));
        assert!(!blocked("2001:db9::1"));
        assert!(!blocked("2001:1::1"));
    }

    #[test]
    fn test_ipv6_public() {
        assert!(!blocked("2001:4860:4860::8888"));
        assert!(!blocked("2606:4700:4700::1111"));
        assert!(!blocked("2a00:1450:4001::1"));
    }

    #[test]
    fn test_ipv4_mapped_unwrapped() {
        assert!(blocked("::ffff:127.0.0.1"));
        assert!(blocked("::ffff:7f00:1"));
        assert!(blocked("::ffff:10.0.0.1"));
        assert!(blocked("::ffff:169.254.169.254"));
        assert!(!blocked("::ffff:8.8.8.8"));
        assert_eq!(
            classify("::ffff:192.168.1.1".parse().unwrap()),
            classify("192.168.1.1".parse().unwrap())
        );
    }

    #[test]
    fn test_ipv4_compatible_unwrapped() {
        assert!(blocked("::127.0.0.1"));
        assert!(blocked("::169.254.169.254"));
        assert!(!blocked("::8.8.8.8"));
    }
}
