//! URL validation pipeline.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::runtime::{Builder, Handle, RuntimeFlavor};

use crate::blocklist::is_hostname_blocked;
use crate::encoding::{looks_numeric, suspicious_encoding};
use crate::error::Error;
use crate::guard::Guard;
use crate::ip_range::classify;
use crate::normalize::normalize;
use crate::parse::UrlParts;
use crate::policy::Policy;
use crate::resolve::{resolve_checked, Resolve};
use crate::verdict::Verdict;

const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Result of successful URL validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    /// The URL after normalization.
    pub url: String,

    /// Lowercased host, without userinfo or IPv6 brackets.
    pub host: String,

    /// Every address the host resolved to. All of them passed classification;
    /// connect to one of these rather than resolving again.
    pub addrs: Vec<IpAddr>,

    /// Whether HTTPS.
    pub https: bool,
}

impl Validated {
    /// 443 for https, 80 for http.
    pub fn default_port(&self) -> u16 {
        if self.https {
            443
        } else {
            80
        }
    }

    /// Socket addresses for the validated IPs on `port`.
    pub fn socket_addrs(&self, port: u16) -> Vec<SocketAddr> {
        self.addrs
            .iter()
            .map(|&ip| SocketAddr::new(ip, port))
            .collect()
    }
}

/// Run every check against `url`, stopping at the first failure.
///
/// 1. Normalize (percent-decode, lowercase)
/// 2. Scheme must be http or https
/// 3. Host must be present
/// 4. Under [`Policy::LiteralOnly`], host must be an IP literal
/// 5. Hostname blocklist
/// 6. Numeric encoding tricks (literals, and names that look numeric)
/// 7. Private/reserved range check for literals
/// 8. Resolve and check every address
pub(crate) async fn run<R: Resolve>(
    url: &str,
    policy: Policy,
    resolver: &R,
    dns_timeout: Option<Duration>,
) -> Result<Validated, Error> {
    let normalized = normalize(url);
    let parts = UrlParts::parse(&normalized);

    if !ALLOWED_SCHEMES.contains(&parts.scheme()) {
        return Err(Error::scheme_not_allowed(url, parts.scheme()));
    }

    let host = parts.host().to_ascii_lowercase();
    if host.is_empty() {
        return Err(Error::invalid_url(url, "URL must have a host"));
    }
    let https = parts.is_https();

    let literal = host.parse::<IpAddr>().ok();
    if literal.is_none() && policy.requires_literal() {
        return Err(Error::host_not_literal(url, host));
    }

    if let Some(reason) = is_hostname_blocked(&host) {
        return Err(Error::hostname_blocked(url, &host, reason));
    }

    if literal.is_some() || looks_numeric(&host) {
        if let Some(reason) = suspicious_encoding(&host) {
            return Err(Error::suspicious_encoding(url, &host, reason));
        }
    }

    if let Some(ip) = literal {
        if let Some(reason) = classify(ip) {
            return Err(Error::ssrf_blocked(url, ip, reason));
        }
    }

    let addrs = resolve_checked(resolver, &host, dns_timeout).await?;

    Ok(Validated {
        url: normalized,
        host,
        addrs,
        https,
    })
}

/// Validate a URL with the system resolver.
///
/// # Example
///
/// ```rust
/// use ssrf_guard::{validate, Policy};
///
/// # async fn example() -> Result<(), ssrf_guard::Error> {
/// let result = validate("https://1.1.1.1/dns-query", Policy::LiteralOnly).await?;
/// println!("Safe to connect to {:?}", result.addrs);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The scheme is not http/https or the host is missing
/// - The host is a name and the policy is [`Policy::LiteralOnly`]
/// - The host is blocklisted or uses a numeric IP encoding trick
/// - The address (or any resolved address) is private or reserved
/// - DNS resolution fails
pub async fn validate(url: &str, policy: Policy) -> Result<Validated, Error> {
    Guard::new(policy).check(url).await
}

/// Synchronous version of [`validate`].
///
/// Blocks the current thread while resolving. Works inside a multi-threaded
/// Tokio runtime and outside of any runtime (a temporary one is created).
pub fn validate_sync(url: &str, policy: Policy) -> Result<Validated, Error> {
    Guard::new(policy).check_sync(url)
}

/// `true` if `url` is safe to fetch under the default policy.
///
/// ```rust
/// assert!(ssrf_guard::validate_url("http://8.8.8.8/"));
/// assert!(!ssrf_guard::validate_url("http://127.0.0.1/"));
/// assert!(!ssrf_guard::validate_url("file:///etc/passwd"));
/// ```
pub fn validate_url(url: &str) -> bool {
    verdict(url).is_allowed()
}

/// The [`Verdict`] for `url` under the default policy.
pub fn verdict(url: &str) -> Verdict {
    Guard::default().verdict_sync(url)
}

/// Drive `fut` to completion from synchronous code.
///
/// Outside a runtime, a current-thread runtime is built for the call. Inside a
/// multi-threaded runtime the worker is handed off with `block_in_place`.
/// Inside a current-thread runtime the only worker cannot be blocked, so the
/// future runs on a scoped thread with a runtime of its own.
pub(crate) fn block_on<F>(fut: F) -> Result<F::Output, Error>
where
    F: Future + Send,
    F::Output: Send,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            Ok(tokio::task::block_in_place(|| handle.block_on(fut)))
        }
        Ok(_) => std::thread::scope(|scope| scope.spawn(move || block_on_fresh(fut)).join())
            .unwrap_or_else(|_| Err(Error::dns_error("runtime", "validation thread panicked"))),
        Err(_) => block_on_fresh(fut),
    }
}

fn block_on_fresh<F: Future>(fut: F) -> Result<F::Output, Error> {
    let rt = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::dns_error("runtime", e.to_string()))?;
    Ok(rt.block_on(fut))
}
