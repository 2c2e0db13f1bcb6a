//! Host admission policy.

use serde::{Deserialize, Serialize};

/// How hosts that are names rather than IP literals are treated.
///
/// Every other check (scheme, hostname blocklist, encoding, ranges, DNS) runs
/// under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Only IP literal hosts are admitted; any name is blocked before DNS.
    #[default]
    LiteralOnly,

    /// Names are admitted when they pass the hostname blocklist and every
    /// address they resolve to is public.
    ResolveNames,
}

impl Policy {
    pub fn requires_literal(self) -> bool {
        self == Policy::LiteralOnly
    }
}
