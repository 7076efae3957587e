//! TXT record queries.
//!
//! [`TxtLookup`] is the DNS-query capability the run controller is generic
//! over. [`HickoryTxtClient`] implements it on top of `hickory-resolver`;
//! tests substitute scripted implementations.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::rdata::TXT;
use hickory_resolver::TokioAsyncResolver;

use super::outcome::{QueryOutcome, ResolverFailure};
use crate::initialization::init_resolver;

/// A single TXT lookup against a fixed resolver.
///
/// Implementations make exactly one attempt and classify the result; they
/// never retry.
#[async_trait]
pub trait TxtLookup: Send + Sync {
    /// Looks up the TXT records of `domain`.
    async fn lookup_txt(&self, domain: &str) -> QueryOutcome;
}

#[async_trait]
impl<T: TxtLookup + ?Sized> TxtLookup for Arc<T> {
    async fn lookup_txt(&self, domain: &str) -> QueryOutcome {
        (**self).lookup_txt(domain).await
    }
}

/// Runs one lookup bounded by `timeout`.
///
/// The bound is enforced here rather than trusted to the implementation, so a
/// hung resolver costs a worker at most `timeout`.
pub async fn query<L: TxtLookup + ?Sized>(
    lookup: &L,
    domain: &str,
    timeout: Duration,
) -> QueryOutcome {
    match tokio::time::timeout(timeout, lookup.lookup_txt(domain)).await {
        Ok(outcome) => outcome,
        Err(_) => QueryOutcome::Timeout,
    }
}

/// `hickory-resolver` backed TXT client bound to one name server.
#[derive(Clone)]
pub struct HickoryTxtClient {
    resolver: Arc<TokioAsyncResolver>,
    name_server: SocketAddr,
}

impl HickoryTxtClient {
    /// Creates a client that only queries `name_server`.
    pub fn new(name_server: SocketAddr, timeout: Duration) -> Self {
        Self {
            resolver: init_resolver(name_server, timeout),
            name_server,
        }
    }

    /// The name server every query goes to.
    pub fn name_server(&self) -> SocketAddr {
        self.name_server
    }
}

#[async_trait]
impl TxtLookup for HickoryTxtClient {
    async fn lookup_txt(&self, domain: &str) -> QueryOutcome {
        // Fully qualified so no search domain is ever appended
        let fqdn = if domain.ends_with('.') {
            domain.to_string()
        } else {
            format!("{domain}.")
        };

        match self.resolver.txt_lookup(fqdn.as_str()).await {
            Ok(lookup) => QueryOutcome::from_records(txt_strings(lookup.iter())),
            Err(e) => classify_resolve_error(&e),
        }
    }
}

/// Flattens TXT rdata into its character-strings, lossily decoded as UTF-8.
pub fn txt_strings<'a>(records: impl IntoIterator<Item = &'a TXT>) -> Vec<String> {
    records
        .into_iter()
        .flat_map(|txt| txt.iter())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect()
}

/// Maps a resolver error onto a query outcome.
///
/// hickory reports every answer without records as `NoRecordsFound`,
/// including SERVFAIL and REFUSED. Only NXDOMAIN and an empty NOERROR answer
/// mean the domain has no TXT data.
pub fn classify_resolve_error(error: &ResolveError) -> QueryOutcome {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match response_code {
            ResponseCode::NXDomain | ResponseCode::NoError => QueryOutcome::NotFound,
            code => QueryOutcome::ResolverError(ResolverFailure::Protocol(format!(
                "resolver answered {code}"
            ))),
        },
        ResolveErrorKind::Timeout => QueryOutcome::Timeout,
        ResolveErrorKind::Io(e) => {
            QueryOutcome::ResolverError(ResolverFailure::Transport(e.to_string()))
        }
        ResolveErrorKind::NoConnections => {
            QueryOutcome::ResolverError(ResolverFailure::Transport(error.to_string()))
        }
        ResolveErrorKind::Proto(proto) => match proto.kind() {
            ProtoErrorKind::Timeout => QueryOutcome::Timeout,
            ProtoErrorKind::Io(_) => {
                QueryOutcome::ResolverError(ResolverFailure::Transport(proto.to_string()))
            }
            _ => QueryOutcome::ResolverError(ResolverFailure::Protocol(proto.to_string())),
        },
        _ => QueryOutcome::ResolverError(ResolverFailure::Protocol(error.to_string())),
    }
}
