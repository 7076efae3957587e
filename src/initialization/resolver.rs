//! DNS resolver initialization.
//!
//! The resolver talks to exactly one name server. There is no fallback to the
//! system configuration and no retry, so a slow or broken server degrades
//! individual candidates instead of being hidden behind another one.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_PORT;
use crate::error_handling::ConfigError;

/// Turns the user-supplied resolver address into a socket address.
///
/// Accepts `IP`, `IP:port`, `[v6]:port`, `host` and `host:port`. Hostnames are
/// looked up once through the system resolver; the first address wins.
///
/// # Errors
///
/// Returns `ConfigError::InvalidResolverAddress` if the address is empty or
/// the hostname does not resolve.
pub async fn resolve_resolver_address(address: &str) -> Result<SocketAddr, ConfigError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ConfigError::MissingResolver);
    }

    if let Ok(socket) = address.parse::<SocketAddr>() {
        return Ok(socket);
    }
    if let Ok(ip) = address.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DNS_PORT));
    }

    let invalid = |reason: String| ConfigError::InvalidResolverAddress {
        address: address.to_string(),
        reason,
    };

    let target = if address.contains(':') {
        address.to_string()
    } else {
        format!("{address}:{DNS_PORT}")
    };

    tokio::net::lookup_host(target)
        .await
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("no addresses found".to_string()))
}

/// Initializes a DNS resolver that only queries `name_server`.
///
/// UDP is used first; the TCP entry for the same address is there for
/// truncated answers, which large SPF records often produce. One attempt,
/// one outstanding request, no hosts file, no search domains and no cache.
///
/// # Returns
///
/// A `TokioAsyncResolver` wrapped in `Arc` for sharing across workers.
pub fn init_resolver(name_server: SocketAddr, timeout: Duration) -> Arc<TokioAsyncResolver> {
    let mut config = ResolverConfig::new();
    config.add_name_server(NameServerConfig::new(name_server, Protocol::Udp));
    config.add_name_server(NameServerConfig::new(name_server, Protocol::Tcp));

    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    opts.num_concurrent_reqs = 1;
    opts.ndots = 0;
    opts.use_hosts_file = false;
    opts.cache_size = 0;
    opts.edns0 = true;

    Arc::new(TokioAsyncResolver::tokio(config, opts))
}
