//! SPF record details.
//!
//! Pulls the addresses and include targets out of a matched SPF record so the
//! CLI can show where a domain's mail is allowed to come from. Only the TXT
//! data already fetched is used; nothing here queries DNS.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static IP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ip4:([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+(?:/[0-9]+)?)|ip6:([0-9a-fA-F:]+(?:/[0-9]+)?)")
        .expect("SPF address pattern is valid")
});

static INCLUDE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"include:([\w.-]+)").expect("SPF include pattern is valid"));

/// Addresses and include targets found in one SPF record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpfDetails {
    /// `ip4:` and `ip6:` values in record order, CIDR suffix kept
    pub ips: Vec<String>,
    /// `include:` domains in record order
    pub includes: Vec<String>,
}

impl SpfDetails {
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty() && self.includes.is_empty()
    }

    /// Registrable-looking base domains of the includes, deduplicated, with
    /// `domain` itself left out.
    pub fn include_base_domains(&self, domain: &str) -> Vec<String> {
        let mut bases: Vec<String> = Vec::new();
        for include in &self.includes {
            let base = base_domain(include);
            if !base.eq_ignore_ascii_case(domain) && !bases.iter().any(|b| b == base) {
                bases.push(base.to_string());
            }
        }
        bases
    }
}

/// Returns `true` for records that declare SPF version 1.
pub fn is_spf_record(record: &str) -> bool {
    record.trim_start().starts_with("v=spf1")
}

/// Extracts `ip4:`/`ip6:` values and `include:` domains from `record`.
///
/// The record is not validated; anything that looks like a mechanism is
/// reported.
pub fn extract_spf_details(record: &str) -> SpfDetails {
    let ips = IP_REGEX
        .captures_iter(record)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect();
    let includes = INCLUDE_REGEX
        .captures_iter(record)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('.').to_string())
        .collect();
    SpfDetails { ips, includes }
}

/// Keeps the last two labels of `include`.
///
/// `_spf.createsend.com` becomes `createsend.com`. Names with fewer than two
/// labels are returned unchanged.
pub fn base_domain(include: &str) -> &str {
    let trimmed = include.trim_end_matches('.');
    match trimmed.rmatch_indices('.').nth(1) {
        Some((idx, _)) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
