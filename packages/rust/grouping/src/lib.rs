//! Topic-based keyword grouping.
//!
//! Partitions a list of free-text search keywords into named groups of at most
//! 50 keywords, each named after its dominant shared term. The grouping is a
//! pure function of the input list:
//!
//! 1. Normalize (lowercase, trim)
//! 2. Count single words and adjacent two-word phrases
//! 3. Select core and related themes by frequency
//! 4. Let themes claim the keywords that contain them as whole words
//! 5. Split oversized groups, keep mid-sized ones, pack the rest
//! 6. Sort by priority, then name
//!
//! Every input keyword ends up in exactly one group.

mod naming;
mod sizing;
mod terms;
mod themes;

use tracing::{debug, instrument};

use kwgroup_shared::{GroupingOptions, GroupingSummary, KeywordGroup, Relevance, Theme};

pub use naming::title_case;
pub use terms::{STOP_WORDS, is_stop_word};

/// Group keywords using the fixed production thresholds.
pub fn group_keywords_by_topic<S: AsRef<str>>(keywords: &[S]) -> Vec<KeywordGroup> {
    group_keywords_with(keywords, &GroupingOptions::default())
}

/// Group keywords using the given thresholds.
///
/// Options are expected to have passed [`GroupingOptions::validate`]; invalid
/// options still yield a partition but may not respect the size cap.
#[instrument(skip_all, fields(keyword_count = keywords.len()))]
pub fn group_keywords_with<S: AsRef<str>>(
    keywords: &[S],
    opts: &GroupingOptions,
) -> Vec<KeywordGroup> {
    if keywords.is_empty() {
        return Vec::new();
    }

    let normalized = terms::normalize(keywords);
    let counts = terms::TermCounts::from_keywords(&normalized);
    let selected = themes::select_themes(&counts, normalized.len(), opts);
    let (theme_groups, ungrouped) = themes::claim_keywords(selected, &normalized, opts);

    let (mut groups, deferred) = sizing::normalize_sizes(theme_groups, ungrouped, opts);
    groups.extend(sizing::combine_small(deferred, opts));

    groups.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));

    debug!(groups = groups.len(), "keywords grouped");
    groups
}

/// Detect themes in claiming order, without grouping.
pub fn detect_themes<S: AsRef<str>>(keywords: &[S], opts: &GroupingOptions) -> Vec<Theme> {
    let normalized = terms::normalize(keywords);
    let counts = terms::TermCounts::from_keywords(&normalized);
    themes::select_themes(&counts, normalized.len(), opts)
}

/// Aggregate counts over a grouping result.
pub fn summarize(groups: &[KeywordGroup]) -> GroupingSummary {
    let count = |relevance: Relevance| groups.iter().filter(|g| g.relevance == relevance).count();

    GroupingSummary {
        total_keywords: groups.iter().map(KeywordGroup::len).sum(),
        group_count: groups.len(),
        core_groups: count(Relevance::Core),
        related_groups: count(Relevance::Related),
        wider_groups: count(Relevance::Wider),
        largest_group: groups.iter().map(KeywordGroup::len).max().unwrap_or(0),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
