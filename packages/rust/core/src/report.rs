//! Grouping report builder.
//!
//! Runs the grouper and the URL generator over a keyword list and packages
//! the result as a self-describing JSON document.

use std::path::Path;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use kwgroup_ahrefs::{generate_grouped_ahrefs_urls_with, target_url};
use kwgroup_grouping::{group_keywords_with, summarize};
use kwgroup_shared::{
    CURRENT_SCHEMA_VERSION, GroupingOptions, GroupingReport, KwgroupError, ReportId, Result,
    UrlOptions,
};

/// Inputs for building a report.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Domain whose rankings the URLs query.
    pub domain: String,
    pub grouping: GroupingOptions,
    pub urls: UrlOptions,
    /// Tool version string.
    pub tool_version: String,
}

/// Group `keywords` and generate one URL per group.
#[instrument(skip_all, fields(domain = %config.domain, keywords = keywords.len()))]
pub fn build_report(config: &ReportConfig, keywords: &[String]) -> Result<GroupingReport> {
    config.grouping.validate()?;

    if keywords.is_empty() {
        return Err(KwgroupError::input("no keywords to group"));
    }
    if kwgroup_ahrefs::normalize_domain(&config.domain).is_empty() {
        return Err(KwgroupError::input("domain is empty"));
    }

    let groups = group_keywords_with(keywords, &config.grouping);
    let urls = generate_grouped_ahrefs_urls_with(&config.domain, &groups, &config.urls);
    let summary = summarize(&groups);

    info!(
        groups = summary.group_count,
        core = summary.core_groups,
        related = summary.related_groups,
        wider = summary.wider_groups,
        "report built"
    );

    Ok(GroupingReport {
        schema_version: CURRENT_SCHEMA_VERSION,
        id: ReportId::new(),
        generated_at: Utc::now(),
        tool_version: config.tool_version.clone(),
        domain: config.domain.clone(),
        target_url: target_url(&config.domain),
        input_fingerprint: input_fingerprint(keywords),
        keyword_count: keywords.len(),
        summary,
        groups,
        urls,
    })
}

/// SHA-256 hex over the normalized keyword list.
///
/// Keywords that differ only by case or surrounding whitespace hash the same.
pub fn input_fingerprint(keywords: &[String]) -> String {
    let mut hasher = Sha256::new();
    for (i, keyword) in keywords.iter().enumerate() {
        if i > 0 {
            hasher.update(b"\n");
        }
        hasher.update(keyword.trim().to_lowercase().as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Write a report as pretty-printed JSON, creating parent directories.
pub fn write_report(path: &Path, report: &GroupingReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| KwgroupError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|e| KwgroupError::io(path, e))?;
    debug!(path = %path.display(), "wrote report");
    Ok(())
}

/// Read a report back, rejecting unknown schema versions.
pub fn read_report(path: &Path) -> Result<GroupingReport> {
    let content = std::fs::read_to_string(path).map_err(|e| KwgroupError::io(path, e))?;
    let report: GroupingReport = serde_json::from_str(&content)
        .map_err(|e| KwgroupError::validation(format!("invalid report: {e}")))?;

    if report.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(KwgroupError::validation(format!(
            "unsupported schema_version: {} (expected {})",
            report.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::input::load_keywords;
    use kwgroup_shared::Relevance;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kwgroup-report-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn make_config() -> ReportConfig {
        ReportConfig {
            domain: "https://www.example.com/".into(),
            grouping: GroupingOptions::default(),
            urls: UrlOptions::default(),
            tool_version: "0.1.0-test".into(),
        }
    }

    fn fixture_keywords() -> Vec<String> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/keywords/finance.txt");
        load_keywords(&path).expect("load fixture")
    }

    #[test]
    fn report_covers_every_keyword() {
        let keywords = fixture_keywords();
        let report = build_report(&make_config(), &keywords).expect("build report");

        assert_eq!(report.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(report.keyword_count, 48);
        assert_eq!(report.summary.total_keywords, 48);
        assert_eq!(report.target_url, "https://example.com/");
        assert_eq!(report.urls.len(), report.groups.len());
        assert!(report.groups.iter().all(|g| g.len() <= 50));
    }

    #[test]
    fn report_groups_fixture_by_topic() {
        let report = build_report(&make_config(), &fixture_keywords()).expect("build report");
        let names: Vec<&str> = report.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Credit Keywords", "Mortgage Keywords", "Loan Keywords"]
        );

        assert_eq!(report.groups[0].len(), 18);
        assert_eq!(report.groups[0].relevance, Relevance::Core);
        assert_eq!(report.groups[1].len(), 16);
        // loan keywords absorb the six unthemed leftovers
        assert_eq!(report.groups[2].len(), 14);
        assert_eq!(report.groups[2].relevance, Relevance::Related);
        assert_eq!(report.urls[2].name, "Loan Keywords (14 keywords)");
    }

    #[test]
    fn fingerprint_ignores_case_and_padding() {
        let a = vec!["Credit Card".to_string(), " loan ".to_string()];
        let b = vec!["credit card".to_string(), "loan".to_string()];
        let c = vec!["loan".to_string(), "credit card".to_string()];
        assert_eq!(input_fingerprint(&a), input_fingerprint(&b));
        assert_ne!(input_fingerprint(&a), input_fingerprint(&c));
        assert_eq!(input_fingerprint(&b).len(), 64);
    }

    #[test]
    fn empty_keywords_rejected() {
        let err = build_report(&make_config(), &[]).unwrap_err();
        assert!(err.to_string().contains("no keywords"));
    }

    #[test]
    fn empty_domain_rejected() {
        let config = ReportConfig {
            domain: "https://".into(),
            ..make_config()
        };
        let err = build_report(&config, &["loan".to_string()]).unwrap_err();
        assert!(err.to_string().contains("domain is empty"));
    }

    #[test]
    fn invalid_options_rejected() {
        let mut config = make_config();
        config.grouping.ideal_chunk_size = 80;
        let err = build_report(&config, &["loan".to_string()]).unwrap_err();
        assert!(matches!(err, KwgroupError::Validation { .. }));
    }

    #[test]
    fn write_then_read_report() {
        let dir = temp_dir();
        let path = dir.join("nested/report.json");
        let report = build_report(&make_config(), &fixture_keywords()).expect("build report");

        write_report(&path, &report).expect("write report");
        let parsed = read_report(&path).expect("read report");
        assert_eq!(parsed.id, report.id);
        assert_eq!(parsed.groups, report.groups);
        assert_eq!(parsed.input_fingerprint, report.input_fingerprint);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_rejects_future_schema() {
        let dir = temp_dir();
        let path = dir.join("report.json");
        let mut report = build_report(&make_config(), &fixture_keywords()).expect("build report");
        report.schema_version = 99;
        write_report(&path, &report).expect("write report");

        let err = read_report(&path).unwrap_err();
        assert!(err.to_string().contains("schema_version: 99"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
