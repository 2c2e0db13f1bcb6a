//! Error types for ssrf_guard.

use std::net::IpAddr;

use thiserror::Error;

use crate::verdict::Verdict;

/// Reasons a URL was rejected.
///
/// Every variant is a "blocked" outcome; none of them is fatal. Use
/// [`Error::verdict`] for the coarse cause and [`Error::kind`] for the
/// malformed / policy / resolution split.
#[derive(Debug, Error)]
pub enum Error {
    /// Scheme missing or not http/https.
    #[error("Scheme not allowed: '{scheme}' (only http/https)")]
    SchemeNotAllowed { url: String, scheme: String },

    /// The URL has no usable host.
    #[error("Invalid URL: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Host is a name, but the policy only admits IP literals.
    #[error("Host is not an IP literal: {host}")]
    HostNotLiteral { url: String, host: String },

    /// Hostname is on the blocklist.
    #[error("SSRF blocked: {host} - {reason}")]
    HostnameBlocked {
        url: String,
        host: String,
        reason: String,
    },

    /// Host looks like an obfuscated numeric IP.
    #[error("Suspicious IP encoding in {host}: {reason}")]
    SuspiciousEncoding {
        url: String,
        host: String,
        reason: String,
    },

    /// Literal IP is in a private or reserved range.
    #[error("SSRF blocked: {ip} - {reason}")]
    SsrfBlocked {
        url: String,
        ip: IpAddr,
        reason: String,
    },

    /// DNS resolution failed, timed out, or returned nothing.
    #[error("DNS error for {host}: {message}")]
    DnsError { host: String, message: String },

    /// One of the resolved addresses is private or reserved.
    #[error("SSRF blocked: {host} resolves to {ip} - {reason}")]
    ResolvedToBlocked {
        host: String,
        ip: IpAddr,
        reason: String,
    },
}

/// Coarse error taxonomy. All kinds mean "do not fetch".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing scheme or host.
    MalformedInput,
    /// Matched a blocklist entry, a reserved range, or an obfuscation pattern.
    PolicyViolation,
    /// Resolution error, timeout, empty answer, or a blocked resolved address.
    ResolutionFailure,
}

impl Error {
    /// The verdict this rejection corresponds to.
    pub fn verdict(&self) -> Verdict {
        match self {
            Self::SchemeNotAllowed { .. } => Verdict::BlockedScheme,
            Self::InvalidUrl { .. } | Self::HostnameBlocked { .. } => Verdict::BlockedHostname,
            Self::HostNotLiteral { .. } => Verdict::BlockedHostNotLiteral,
            Self::SuspiciousEncoding { .. } => Verdict::BlockedIpEncoding,
            Self::SsrfBlocked { .. } => Verdict::BlockedIpRange,
            Self::DnsError { .. } | Self::ResolvedToBlocked { .. } => {
                Verdict::BlockedDnsResolution
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SchemeNotAllowed { scheme, .. } if scheme.is_empty() => ErrorKind::MalformedInput,
            Self::InvalidUrl { .. } => ErrorKind::MalformedInput,
            Self::SchemeNotAllowed { .. }
            | Self::HostNotLiteral { .. }
            | Self::HostnameBlocked { .. }
            | Self::SuspiciousEncoding { .. }
            | Self::SsrfBlocked { .. } => ErrorKind::PolicyViolation,
            Self::DnsError { .. } | Self::ResolvedToBlocked { .. } => ErrorKind::ResolutionFailure,
        }
    }

    pub(crate) fn scheme_not_allowed(url: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self::SchemeNotAllowed {
            url: url.into(),
            scheme: scheme.into(),
        }
    }

    pub(crate) fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn host_not_literal(url: impl Into<String>, host: impl Into<String>) -> Self {
        Self::HostNotLiteral {
            url: url.into(),
            host: host.into(),
        }
    }

    pub(crate) fn hostname_blocked(
        url: impl Into<String>,
        host: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::HostnameBlocked {
            url: url.into(),
            host: host.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn suspicious_encoding(
        url: impl Into<String>,
        host: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::SuspiciousEncoding {
            url: url.into(),
            host: host.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn ssrf_blocked(url: impl Into<String>, ip: IpAddr, reason: impl Into<String>) -> Self {
        Self::SsrfBlocked {
            url: url.into(),
            ip,
            reason: reason.into(),
        }
    }

    pub(crate) fn dns_error(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DnsError {
            host: host.into(),
            message: message.into(),
        }
    }

    pub(crate) fn resolved_to_blocked(
        host: impl Into<String>,
        ip: IpAddr,
        reason: impl Into<String>,
    ) -> Self {
        Self::ResolvedToBlocked {
            host: host.into(),
            ip,
            reason: reason.into(),
        }
    }
}
