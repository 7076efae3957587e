//! Result output: the results file and JSON lines for `--log-format json`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::mail::MailRecords;
use crate::matching::MatchResult;
use crate::spf::SpfDetails;

/// One match with the optional details gathered for it, as printed in JSON
/// output mode.
#[derive(Debug, Serialize)]
pub struct MatchLine<'a> {
    #[serde(flatten)]
    pub result: &'a MatchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spf: Option<SpfDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail: Option<MailRecords>,
}

/// Serializes `value` as a single line of JSON.
pub fn json_line<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("Failed to serialize output line")
}

/// Appends one domain per line to `path`, creating the file if needed.
///
/// Existing content is kept, so repeated runs accumulate in the same file.
pub async fn append_results(path: &Path, results: &[MatchResult]) -> Result<()> {
    if results.is_empty() {
        return Ok(());
    }

    let mut buf = String::new();
    for result in results {
        buf.push_str(&result.domain);
        buf.push('\n');
    }

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open output file {}", path.display()))?;
    file.write_all(buf.as_bytes())
        .await
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    file.flush().await.context("Failed to flush output file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::DkimRecord;
    use crate::progress::ProgressSnapshot;
    use chrono::{TimeZone, Utc};

    fn result(domain: &str) -> MatchResult {
        MatchResult {
            domain: domain.to_string(),
            matched_record: "v=spf1".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_append_creates_and_appends() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");

        append_results(&path, &[result("a.com")]).await.expect("first write");
        append_results(&path, &[result("b.net"), result("c.org")])
            .await
            .expect("second write");

        let content = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(content, "a.com\nb.net\nc.org\n");
    }

    #[test]
    fn test_match_line_json() {
        let result = MatchResult {
            domain: "mail.se".to_string(),
            matched_record: "v=spf1 ip4:192.0.2.1 ~all".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };
        let line = MatchLine {
            result: &result,
            spf: Some(SpfDetails {
                ips: vec!["192.0.2.1".to_string()],
                includes: Vec::new(),
            }),
            mail: Some(MailRecords {
                dmarc: Some("v=DMARC1; p=none".to_string()),
                dkim: Some(DkimRecord {
                    selector: "google".to_string(),
                    record: "k=rsa; p=abc".to_string(),
                }),
            }),
        };

        let json = json_line(&line).expect("serializable");
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["domain"], "mail.se");
        assert_eq!(value["matched_record"], "v=spf1 ip4:192.0.2.1 ~all");
        assert_eq!(value["timestamp"], "2024-05-01T12:30:00Z");
        assert_eq!(value["spf"]["ips"][0], "192.0.2.1");
        assert_eq!(value["mail"]["dmarc"], "v=DMARC1; p=none");
        assert_eq!(value["mail"]["dkim"]["selector"], "google");
    }

    #[test]
    fn test_match_line_omits_missing_details() {
        let result = MatchResult {
            domain: "a.com".to_string(),
            matched_record: "x".to_string(),
            timestamp: Utc::now(),
        };
        let json = json_line(&MatchLine {
            result: &result,
            spf: None,
            mail: None,
        })
        .expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert!(value.get("spf").is_none());
        assert!(value.get("mail").is_none());
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = ProgressSnapshot {
            processed_count: 12,
            elapsed_seconds: 1.5,
            match_count: 2,
        };
        let value: serde_json::Value =
            serde_json::from_str(&json_line(&snapshot).expect("serializable")).expect("valid JSON");
        assert_eq!(value["processed_count"], 12);
        assert_eq!(value["match_count"], 2);
        assert_eq!(value["elapsed_seconds"], 1.5);
    }

    #[tokio::test]
    async fn test_append_nothing_does_not_create_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        append_results(&path, &[]).await.expect("no-op");
        assert!(!path.exists());
    }
}
