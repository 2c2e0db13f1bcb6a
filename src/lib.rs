//! # ssrf_guard
//!
//! Pre-flight SSRF defense: decide whether a URL is safe to fetch on the
//! server's behalf before any connection is opened.
//!
//! `ssrf_guard` does not make HTTP requests itself. It normalizes the URL,
//! extracts the host, rejects blocklisted names, obfuscated numeric IPs and
//! private or reserved ranges, resolves the host and checks every address it
//! maps to. Any doubt is a rejection.
//!
//! Redirects are not followed; validate every hop.
//!
//! ## Quick Start
//!
//! ```rust
//! use ssrf_guard::{validate_url, verdict, Verdict};
//!
//! assert!(validate_url("https://1.1.1.1/"));
//! assert!(!validate_url("http://169.254.169.254/latest/meta-data/"));
//! assert_eq!(verdict("http://0x7f000001/"), Verdict::BlockedHostNotLiteral);
//! ```
//!
//! By default only IP literal hosts are admitted ([`Policy::LiteralOnly`]).
//! Use [`Policy::ResolveNames`] to admit names whose every resolved address is
//! public:
//!
//! ```rust,no_run
//! use ssrf_guard::{validate, Policy};
//!
//! # async fn example() -> Result<(), ssrf_guard::Error> {
//! let result = validate("https://example.org/api", Policy::ResolveNames).await?;
//! println!("Safe to connect to {} ({:?})", result.host, result.addrs);
//! # Ok(())
//! # }
//! ```

mod blocklist;
mod encoding;
mod error;
mod guard;
mod ip_range;
mod normalize;
mod parse;
mod policy;
mod resolve;
mod validate;
mod verdict;

pub use blocklist::{is_blocked_hostname, is_hostname_blocked};
pub use encoding::{has_suspicious_encoding, looks_numeric, suspicious_encoding};
pub use error::{Error, ErrorKind};
pub use guard::{Guard, GuardBuilder, GuardConfig};
pub use ip_range::{classify, classify_v4, classify_v6, is_private_or_reserved};
pub use normalize::normalize;
pub use parse::{host, scheme, UrlParts};
pub use policy::Policy;
pub use resolve::{resolve_checked, resolves_to_blocked, Resolve, SystemResolver};
pub use validate::{validate, validate_sync, validate_url, verdict, Validated};
pub use verdict::Verdict;
