//! DMARC and DKIM lookups for matched domains.
//!
//! A match only says the domain's TXT data carries the target value. These
//! follow-up lookups report whether the domain also publishes a DMARC policy
//! and a DKIM key under one of the common selectors. They go through the
//! same [`TxtLookup`] as the scan and are bounded by the same timeout.

use std::time::Duration;

use log::debug;
use serde::Serialize;

use crate::dns::{query, QueryOutcome, TxtLookup};

/// DKIM selectors tried in order.
pub const DKIM_SELECTORS: [&str; 3] = ["default", "selector1", "google"];

/// A DKIM key record and the selector it was published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DkimRecord {
    pub selector: String,
    pub record: String,
}

/// Mail authentication records found for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MailRecords {
    pub dmarc: Option<String>,
    pub dkim: Option<DkimRecord>,
}

/// Looks up the DMARC policy at `_dmarc.<domain>`.
///
/// Returns the first TXT string starting with `v=DMARC1`. Failures and
/// timeouts count as no record.
pub async fn dmarc_record<L: TxtLookup + ?Sized>(
    lookup: &L,
    domain: &str,
    timeout: Duration,
) -> Option<String> {
    let name = format!("_dmarc.{domain}");
    txt_strings(lookup, &name, timeout)
        .await
        .into_iter()
        .find(|record| record.trim_start().starts_with("v=DMARC1"))
}

/// Looks up `<selector>._domainkey.<domain>` for each of [`DKIM_SELECTORS`].
///
/// The first TXT string containing `k=` wins. Failures and timeouts move on
/// to the next selector.
pub async fn dkim_record<L: TxtLookup + ?Sized>(
    lookup: &L,
    domain: &str,
    timeout: Duration,
) -> Option<DkimRecord> {
    for selector in DKIM_SELECTORS {
        let name = format!("{selector}._domainkey.{domain}");
        let found = txt_strings(lookup, &name, timeout)
            .await
            .into_iter()
            .find(|record| record.contains("k="));
        if let Some(record) = found {
            return Some(DkimRecord {
                selector: selector.to_string(),
                record,
            });
        }
    }
    None
}

/// Runs the DMARC and DKIM lookups for `domain`.
pub async fn mail_records<L: TxtLookup + ?Sized>(
    lookup: &L,
    domain: &str,
    timeout: Duration,
) -> MailRecords {
    MailRecords {
        dmarc: dmarc_record(lookup, domain, timeout).await,
        dkim: dkim_record(lookup, domain, timeout).await,
    }
}

async fn txt_strings<L: TxtLookup + ?Sized>(
    lookup: &L,
    name: &str,
    timeout: Duration,
) -> Vec<String> {
    match query(lookup, name, timeout).await {
        QueryOutcome::Success(records) => records,
        other => {
            debug!("No TXT data at {}: {:?}", name, other);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers from a fixed table and remembers every name asked for.
    struct TableLookup {
        answers: HashMap<&'static str, QueryOutcome>,
        asked: Mutex<Vec<String>>,
    }

    impl TableLookup {
        fn new(answers: &[(&'static str, QueryOutcome)]) -> Self {
            Self {
                answers: answers.iter().cloned().collect(),
                asked: Mutex::new(Vec::new()),
            }
        }

        fn asked(&self) -> Vec<String> {
            self.asked.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TxtLookup for TableLookup {
        async fn lookup_txt(&self, domain: &str) -> QueryOutcome {
            self.asked.lock().unwrap().push(domain.to_string());
            self.answers
                .get(domain)
                .cloned()
                .unwrap_or(QueryOutcome::NotFound)
        }
    }

    fn txt(records: &[&str]) -> QueryOutcome {
        QueryOutcome::Success(records.iter().map(|r| r.to_string()).collect())
    }

    const TIMEOUT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn test_dmarc_picks_policy_string() {
        let lookup = TableLookup::new(&[(
            "_dmarc.example.com",
            txt(&["some-verification=abc", "v=DMARC1; p=reject; rua=mailto:d@example.com"]),
        )]);

        let dmarc = dmarc_record(&lookup, "example.com", TIMEOUT).await;

        assert_eq!(
            dmarc.as_deref(),
            Some("v=DMARC1; p=reject; rua=mailto:d@example.com")
        );
        assert_eq!(lookup.asked(), vec!["_dmarc.example.com"]);
    }

    #[tokio::test]
    async fn test_dmarc_ignores_unrelated_txt() {
        let lookup = TableLookup::new(&[("_dmarc.example.com", txt(&["v=spf1 -all"]))]);
        assert_eq!(dmarc_record(&lookup, "example.com", TIMEOUT).await, None);
    }

    #[tokio::test]
    async fn test_dkim_tries_selectors_in_order() {
        let lookup = TableLookup::new(&[
            ("default._domainkey.example.se", txt(&["no key here"])),
            (
                "google._domainkey.example.se",
                txt(&["v=DKIM1; k=rsa; p=MIIBIjAN"]),
            ),
        ]);

        let dkim = dkim_record(&lookup, "example.se", TIMEOUT).await;

        assert_eq!(
            dkim,
            Some(DkimRecord {
                selector: "google".to_string(),
                record: "v=DKIM1; k=rsa; p=MIIBIjAN".to_string(),
            })
        );
        assert_eq!(
            lookup.asked(),
            vec![
                "default._domainkey.example.se",
                "selector1._domainkey.example.se",
                "google._domainkey.example.se",
            ]
        );
    }

    #[tokio::test]
    async fn test_dkim_stops_at_first_key() {
        let lookup = TableLookup::new(&[(
            "default._domainkey.example.no",
            txt(&["k=rsa; p=abc"]),
        )]);

        let dkim = dkim_record(&lookup, "example.no", TIMEOUT).await;

        assert_eq!(dkim.map(|d| d.selector), Some("default".to_string()));
        assert_eq!(lookup.asked().len(), 1);
    }

    #[tokio::test]
    async fn test_failures_count_as_missing_records() {
        let lookup = TableLookup::new(&[
            ("_dmarc.example.dk", QueryOutcome::Timeout),
            (
                "default._domainkey.example.dk",
                QueryOutcome::ResolverError(crate::dns::ResolverFailure::Transport(
                    "unreachable".to_string(),
                )),
            ),
        ]);

        let records = mail_records(&lookup, "example.dk", TIMEOUT).await;

        assert_eq!(records, MailRecords::default());
        assert_eq!(lookup.asked().len(), 4);
    }
}
