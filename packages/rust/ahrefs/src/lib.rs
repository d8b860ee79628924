//! Ahrefs Site Explorer URL generation for keyword groups.
//!
//! Each keyword group becomes one "organic keywords" report URL filtered to
//! the group's keywords, so a domain's rankings can be checked topic by topic.

use std::sync::LazyLock;

use tracing::{debug, instrument, warn};
use url::Url;

use kwgroup_shared::{GroupedUrl, KeywordGroup, UrlOptions};

/// Ahrefs accepts at most this many keywords in one keyword rule.
pub const MAX_KEYWORDS_PER_URL: usize = 50;

/// Default position filter.
pub const DEFAULT_POSITION_RANGE: &str = "1-50";

/// Columns shown in the organic keywords report.
const COLUMNS: &str = "CPC||KD||Keyword||OrganicTraffic||Position||SF||URL||Volume";

static REPORT_BASE: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://app.ahrefs.com/v2-site-explorer/organic-keywords").expect("valid url")
});

// ---------------------------------------------------------------------------
// Domain handling
// ---------------------------------------------------------------------------

/// Reduce user input like `https://www.example.com/` to `example.com`.
pub fn normalize_domain(domain: &str) -> String {
    let mut rest = domain.trim();

    for scheme in ["https://", "http://"] {
        if has_prefix_ignore_case(rest, scheme) {
            rest = &rest[scheme.len()..];
            break;
        }
    }

    if has_prefix_ignore_case(rest, "www.") {
        rest = &rest[4..];
    }

    rest.trim_end_matches('/').to_string()
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// The `https://<domain>/` target embedded in every report URL.
pub fn target_url(domain: &str) -> String {
    format!("https://{}/", normalize_domain(domain))
}

// ---------------------------------------------------------------------------
// URL generation
// ---------------------------------------------------------------------------

/// JSON keyword rule matching any of the given keywords.
///
/// Format: `[["contains","all"],"<k1>,<k2>,...","any"]`.
pub fn keyword_rules(keywords: &[String]) -> String {
    serde_json::json!([["contains", "all"], keywords.join(","), "any"]).to_string()
}

/// One report URL per group, using default country and mode.
pub fn generate_grouped_ahrefs_urls(
    domain: &str,
    groups: &[KeywordGroup],
    position_range: &str,
) -> Vec<GroupedUrl> {
    let opts = UrlOptions {
        position_range: position_range.to_string(),
        ..UrlOptions::default()
    };
    generate_grouped_ahrefs_urls_with(domain, groups, &opts)
}

/// One report URL per group.
///
/// Groups larger than [`MAX_KEYWORDS_PER_URL`] are clamped to their first
/// keywords. An empty position range omits the position filter.
#[instrument(skip_all, fields(domain = %domain, groups = groups.len()))]
pub fn generate_grouped_ahrefs_urls_with(
    domain: &str,
    groups: &[KeywordGroup],
    opts: &UrlOptions,
) -> Vec<GroupedUrl> {
    let target = target_url(domain);

    let urls: Vec<GroupedUrl> = groups
        .iter()
        .map(|group| {
            let keywords = clamp_keywords(group);
            GroupedUrl {
                name: format!("{} ({} keywords)", group.name, keywords.len()),
                url: report_url(&target, keywords, opts),
                relevance: group.relevance,
                keyword_count: keywords.len(),
            }
        })
        .collect();

    debug!(%target, urls = urls.len(), "report URLs generated");
    urls
}

fn clamp_keywords(group: &KeywordGroup) -> &[String] {
    if group.keywords.len() > MAX_KEYWORDS_PER_URL {
        warn!(
            group = %group.name,
            keywords = group.keywords.len(),
            "group exceeds URL keyword limit, truncating"
        );
        &group.keywords[..MAX_KEYWORDS_PER_URL]
    } else {
        &group.keywords
    }
}

fn report_url(target: &str, keywords: &[String], opts: &UrlOptions) -> String {
    let mut url = REPORT_BASE.clone();
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("columns", COLUMNS)
            .append_pair("compareDate", "dontCompare")
            .append_pair("country", &opts.country)
            .append_pair("keywordRules", &keyword_rules(keywords))
            .append_pair("mode", &opts.mode);
        if !opts.position_range.is_empty() {
            query.append_pair("positions", &opts.position_range);
        }
        query
            .append_pair("sort", "OrganicTrafficInitial")
            .append_pair("sortDirection", "desc")
            .append_pair("target", target);
    }
    url.into()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
