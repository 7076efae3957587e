//! Match evaluation.
//!
//! Classifies a query outcome against the target TXT value. Pure: the result
//! depends only on the arguments, apart from the timestamp on a match.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::MatchPolicy;
use crate::dns::QueryOutcome;
use crate::error_handling::QueryErrorKind;

/// A domain whose TXT records carry the target value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub domain: String,
    /// The TXT string that matched, as returned by the resolver
    pub matched_record: String,
    pub timestamp: DateTime<Utc>,
}

/// Why a candidate could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReason {
    pub kind: QueryErrorKind,
    pub message: String,
}

impl std::fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

/// Outcome of evaluating one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedResult {
    Matched(MatchResult),
    NotMatched,
    Errored(ErrorReason),
}

/// Evaluates `outcome` with case-sensitive substring matching.
///
/// Equivalent to [`evaluate_with_policy`] with [`MatchPolicy::Contains`].
pub fn evaluate(domain: &str, outcome: &QueryOutcome, target: &str) -> ClassifiedResult {
    evaluate_with_policy(domain, outcome, target, MatchPolicy::Contains)
}

/// Evaluates `outcome` for `domain` under `policy`.
///
/// The first TXT string that satisfies the policy is reported. `NotFound` and
/// answers without a satisfying string are `NotMatched`; timeouts, resolver
/// failures and cancellations are `Errored`.
pub fn evaluate_with_policy(
    domain: &str,
    outcome: &QueryOutcome,
    target: &str,
    policy: MatchPolicy,
) -> ClassifiedResult {
    match outcome {
        QueryOutcome::Success(records) => records
            .iter()
            .find(|record| record_matches(record, target, policy))
            .map(|record| {
                ClassifiedResult::Matched(MatchResult {
                    domain: domain.to_string(),
                    matched_record: record.clone(),
                    timestamp: Utc::now(),
                })
            })
            .unwrap_or(ClassifiedResult::NotMatched),
        QueryOutcome::NotFound => ClassifiedResult::NotMatched,
        QueryOutcome::Timeout => ClassifiedResult::Errored(ErrorReason {
            kind: QueryErrorKind::Timeout,
            message: String::new(),
        }),
        QueryOutcome::ResolverError(failure) => ClassifiedResult::Errored(ErrorReason {
            kind: failure.kind(),
            message: failure.message().to_string(),
        }),
        QueryOutcome::Cancelled => ClassifiedResult::Errored(ErrorReason {
            kind: QueryErrorKind::Cancelled,
            message: String::new(),
        }),
    }
}

fn record_matches(record: &str, target: &str, policy: MatchPolicy) -> bool {
    match policy {
        MatchPolicy::Contains => record.contains(target),
        MatchPolicy::Exact => record.trim() == target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::ResolverFailure;

    fn success(records: &[&str]) -> QueryOutcome {
        QueryOutcome::Success(records.iter().map(|r| r.to_string()).collect())
    }

    #[test]
    fn test_substring_match() {
        let result = evaluate("d.com", &success(&["v=spf1 include:x"]), "spf1");
        match result {
            ClassifiedResult::Matched(m) => {
                assert_eq!(m.domain, "d.com");
                assert_eq!(m.matched_record, "v=spf1 include:x");
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_no_substring_is_not_matched() {
        assert_eq!(
            evaluate("d.com", &success(&["abc"]), "spf1"),
            ClassifiedResult::NotMatched
        );
    }

    #[test]
    fn test_timeout_is_errored() {
        assert!(matches!(
            evaluate("d.com", &QueryOutcome::Timeout, "spf1"),
            ClassifiedResult::Errored(ErrorReason {
                kind: QueryErrorKind::Timeout,
                ..
            })
        ));
    }

    #[test]
    fn test_not_found_is_not_matched() {
        assert_eq!(
            evaluate("d.com", &QueryOutcome::NotFound, "spf1"),
            ClassifiedResult::NotMatched
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(
            evaluate("d.com", &success(&["V=SPF1 -all"]), "v=spf1"),
            ClassifiedResult::NotMatched
        );
    }

    #[test]
    fn test_any_of_several_records_can_match() {
        let outcome = success(&["google-site-verification=abc", "v=spf1 include:_custspf.one.com ~all"]);
        match evaluate("d.se", &outcome, "_custspf.one.com") {
            ClassifiedResult::Matched(m) => {
                assert_eq!(m.matched_record, "v=spf1 include:_custspf.one.com ~all")
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_policy_requires_whole_record() {
        let target = "v=spf1 include:_custspf.one.com ~all";
        let padded = success(&[" v=spf1 include:_custspf.one.com ~all "]);
        assert!(matches!(
            evaluate_with_policy("d.no", &padded, target, MatchPolicy::Exact),
            ClassifiedResult::Matched(_)
        ));

        let longer = success(&["v=spf1 include:_custspf.one.com include:y ~all"]);
        assert_eq!(
            evaluate_with_policy("d.no", &longer, "include:y", MatchPolicy::Exact),
            ClassifiedResult::NotMatched
        );
    }

    #[test]
    fn test_resolver_failure_keeps_kind_and_message() {
        let outcome =
            QueryOutcome::ResolverError(ResolverFailure::Transport("connection refused".into()));
        match evaluate("d.dk", &outcome, "spf1") {
            ClassifiedResult::Errored(reason) => {
                assert_eq!(reason.kind, QueryErrorKind::Transport);
                assert_eq!(reason.to_string(), "DNS transport error: connection refused");
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_cancelled_is_errored() {
        assert!(matches!(
            evaluate("d.dk", &QueryOutcome::Cancelled, "spf1"),
            ClassifiedResult::Errored(ErrorReason {
                kind: QueryErrorKind::Cancelled,
                ..
            })
        ));
    }
}
