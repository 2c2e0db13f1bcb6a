//! Classification outcome of a single validation call.

/// Why a URL was allowed or blocked.
///
/// Callers that only need pass/fail use [`Verdict::is_allowed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Allowed,
    /// Scheme missing or not http/https.
    BlockedScheme,
    /// Empty host or a blocklisted hostname.
    BlockedHostname,
    /// Hex, octal, decimal or percent-encoded numeric host.
    BlockedIpEncoding,
    /// Literal IP in a private or reserved range.
    BlockedIpRange,
    /// Resolution failed or produced a private/reserved address.
    BlockedDnsResolution,
    /// Host is a name and the policy only admits IP literals.
    BlockedHostNotLiteral,
}

impl Verdict {
    pub fn is_allowed(self) -> bool {
        self == Verdict::Allowed
    }

    pub fn is_blocked(self) -> bool {
        !self.is_allowed()
    }
}

impl<T> From<&Result<T, crate::Error>> for Verdict {
    fn from(result: &Result<T, crate::Error>) -> Self {
        match result {
            Ok(_) => Verdict::Allowed,
            Err(e) => e.verdict(),
        }
    }
}
