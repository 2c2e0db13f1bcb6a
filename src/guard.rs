//! Reusable, configured validator.
//!
//! A [`Guard`] bundles the three things that can vary between deployments:
//!
//! - **Policy**: whether hostnames may be resolved or only IP literals pass
//! - **Resolver**: the system resolver, or any [`Resolve`] implementation
//! - **DNS timeout**: an optional bound on the resolution step
//!
//! The hostname blocklist and the reserved ranges are fixed; a guard cannot
//! be configured to allow loopback or metadata addresses.
//!
//! ## Immutability
//!
//! Once built via [`GuardBuilder::build()`], a [`Guard`] cannot be modified.
//! It holds no per-call state, so one instance can be shared across threads
//! and tasks.
//!
//! ## Time of check, time of use
//!
//! A successful check returns the addresses it verified. Connect to those.
//! If the HTTP client resolves the name again, the answer may differ.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Error;
use crate::policy::Policy;
use crate::resolve::{Resolve, SystemResolver};
use crate::validate::{block_on, run, Validated};
use crate::verdict::Verdict;

/// Serializable guard settings, for embedding in an application's config file.
///
/// ```rust
/// use ssrf_guard::{GuardBuilder, GuardConfig, Policy};
///
/// let config = GuardConfig {
///     policy: Policy::ResolveNames,
///     dns_timeout_ms: Some(2_000),
/// };
/// let guard = GuardBuilder::from_config(&config).build();
/// assert_eq!(guard.policy(), Policy::ResolveNames);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    pub policy: Policy,

    /// Upper bound on DNS resolution, in milliseconds. Unset means no bound.
    pub dns_timeout_ms: Option<u64>,
}

/// A configured SSRF validator.
///
/// # Example
///
/// ```rust
/// use ssrf_guard::{Guard, Policy, Verdict};
///
/// let guard = Guard::new(Policy::LiteralOnly);
/// assert!(guard.is_allowed("https://1.1.1.1/"));
/// assert_eq!(guard.verdict_sync("http://10.0.0.1/"), Verdict::BlockedIpRange);
/// ```
#[derive(Debug, Clone)]
pub struct Guard<R = SystemResolver> {
    policy: Policy,
    dns_timeout: Option<Duration>,
    resolver: R,
}

impl Guard<SystemResolver> {
    /// Guard with the system resolver and no DNS timeout.
    pub fn new(policy: Policy) -> Self {
        GuardBuilder::new().policy(policy).build()
    }
}

impl Default for Guard<SystemResolver> {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl<R: Resolve> Guard<R> {
    /// Validate `url`. On success, returns the addresses to connect to.
    ///
    /// # Errors
    ///
    /// Every rejection is an [`Error`]; see [`Error::verdict`] for the cause.
    pub async fn check(&self, url: &str) -> Result<Validated, Error> {
        let result = run(url, self.policy, &self.resolver, self.dns_timeout).await;
        match &result {
            Ok(validated) => {
                debug!(host = %validated.host, addrs = ?validated.addrs, "URL allowed")
            }
            Err(e) => warn!(verdict = ?e.verdict(), error = %e, "URL blocked"),
        }
        result
    }

    /// Synchronous version of [`Guard::check`].
    ///
    /// Blocks the calling thread. Safe to call outside a runtime and from
    /// inside either Tokio runtime flavor; in async code prefer
    /// [`Guard::check`].
    pub fn check_sync(&self, url: &str) -> Result<Validated, Error> {
        block_on(self.check(url))?
    }

    pub async fn verdict(&self, url: &str) -> Verdict {
        Verdict::from(&self.check(url).await)
    }

    pub fn verdict_sync(&self, url: &str) -> Verdict {
        Verdict::from(&self.check_sync(url))
    }

    /// `true` if `url` is safe to fetch. Blocking.
    pub fn is_allowed(&self, url: &str) -> bool {
        self.verdict_sync(url).is_allowed()
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn dns_timeout(&self) -> Option<Duration> {
        self.dns_timeout
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

/// Builder for [`Guard`].
///
/// Each method consumes `self`, so a half-configured builder cannot be reused
/// by accident.
#[derive(Debug, Clone)]
pub struct GuardBuilder<R = SystemResolver> {
    policy: Policy,
    dns_timeout: Option<Duration>,
    resolver: R,
}

impl GuardBuilder<SystemResolver> {
    /// Default policy, system resolver, no DNS timeout.
    pub fn new() -> Self {
        Self {
            policy: Policy::default(),
            dns_timeout: None,
            resolver: SystemResolver,
        }
    }

    pub fn from_config(config: &GuardConfig) -> Self {
        let builder = Self::new().policy(config.policy);
        match config.dns_timeout_ms {
            Some(ms) => builder.dns_timeout(Duration::from_millis(ms)),
            None => builder,
        }
    }
}

impl Default for GuardBuilder<SystemResolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resolve> GuardBuilder<R> {
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Fail resolution (and block the URL) if it takes longer than `timeout`.
    pub fn dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout = Some(timeout);
        self
    }

    /// Replace the resolver.
    pub fn resolver<S: Resolve>(self, resolver: S) -> GuardBuilder<S> {
        GuardBuilder {
            policy: self.policy,
            dns_timeout: self.dns_timeout,
            resolver,
        }
    }

    pub fn build(self) -> Guard<R> {
        Guard {
            policy: self.policy,
            dns_timeout: self.dns_timeout,
            resolver: self.resolver,
        }
    }
}
