//! Name resolution and the DNS-rebinding check.
//!
//! The check is point-in-time. Connect to the addresses it returns (see
//! [`Validated::addrs`](crate::Validated)) or run it immediately before the
//! request; resolving again at connect time reopens the rebinding window.

use std::future::Future;
use std::io;
use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::TokioResolver;
use tracing::debug;

use crate::error::Error;
use crate::ip_range::classify;

/// A name-resolution capability.
///
/// The validator never calls the system resolver directly, so tests and
/// callers with their own DNS stack can substitute an implementation.
pub trait Resolve: Send + Sync {
    /// Resolve `host` to every address it currently maps to, both families.
    /// `host` is a name or an IP literal, never wrapped in brackets.
    fn lookup(&self, host: &str) -> impl Future<Output = io::Result<Vec<IpAddr>>> + Send;
}

/// Resolver backed by the system DNS configuration (`/etc/resolv.conf` and
/// friends). IP literals are returned as-is without a lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    async fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }

        let resolver = TokioResolver::builder_tokio()
            .map_err(io::Error::other)?
            .build();

        let response = resolver
            .lookup_ip(host)
            .await
            .map_err(io::Error::other)?;

        Ok(response.iter().collect())
    }
}

/// Resolve `host` and require every returned address to be public.
///
/// Lookup errors, an elapsed `timeout` and empty answers are all failures. A
/// single private or reserved address blocks the host even if the others are
/// public.
pub async fn resolve_checked<R: Resolve>(
    resolver: &R,
    host: &str,
    timeout: Option<Duration>,
) -> Result<Vec<IpAddr>, Error> {
    let lookup = resolver.lookup(host);
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, lookup)
            .await
            .map_err(|_| Error::dns_error(host, format!("lookup timed out after {:?}", limit)))?,
        None => lookup.await,
    };

    let addrs = result.map_err(|e| Error::dns_error(host, e.to_string()))?;
    if addrs.is_empty() {
        return Err(Error::dns_error(host, "no IP addresses found"));
    }

    for &ip in &addrs {
        if let Some(reason) = classify(ip) {
            return Err(Error::resolved_to_blocked(host, ip, reason));
        }
        debug!(host, %ip, "resolved address is public");
    }

    Ok(addrs)
}

/// Boolean form of [`resolve_checked`] with no timeout.
pub async fn resolves_to_blocked<R: Resolve>(resolver: &R, host: &str) -> bool {
    resolve_checked(resolver, host, None).await.is_err()
}
