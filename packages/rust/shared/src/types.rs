//! Core domain types for keyword grouping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current schema version for the report JSON format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Relevance
// ---------------------------------------------------------------------------

/// How closely a group relates to the keyword list's dominant topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    /// A standalone group built around a core theme.
    Core,
    /// A standalone related theme, or a combined group containing a core theme.
    Related,
    /// A combined group of minor themes and leftovers.
    Wider,
}

impl Relevance {
    /// Lowercase tag used in URLs and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Related => "related",
            Self::Wider => "wider",
        }
    }

    /// Sort priority (lower = more important).
    pub fn priority(&self) -> u32 {
        match self {
            Self::Core => 1,
            Self::Related => 2,
            Self::Wider => 3,
        }
    }
}

impl std::fmt::Display for Relevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// KeywordGroup
// ---------------------------------------------------------------------------

/// A named bucket of keywords sharing a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    /// Display name, e.g. `Credit Card Keywords` or `Loan Keywords (Part 2)`.
    pub name: String,
    /// Normalized keywords in discovery order.
    pub keywords: Vec<String>,
    /// Relevance tag.
    pub relevance: Relevance,
    /// Sort priority (lower = more important).
    pub priority: u32,
}

impl KeywordGroup {
    /// Build a group whose priority follows its relevance.
    pub fn new(name: impl Into<String>, keywords: Vec<String>, relevance: Relevance) -> Self {
        Self {
            name: name.into(),
            keywords,
            relevance,
            priority: relevance.priority(),
        }
    }

    /// Number of keywords in the group.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Whether the group has no keywords.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Frequency class of a detected theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Core,
    Related,
}

/// A recurring single word or two-word phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Normalized term (`loan`, `credit card`).
    pub term: String,
    /// Occurrences across all keywords.
    pub count: usize,
    pub kind: ThemeKind,
    /// True for two-word phrases.
    pub compound: bool,
}

// ---------------------------------------------------------------------------
// GroupedUrl
// ---------------------------------------------------------------------------

/// One rank-tracker URL generated for a keyword group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedUrl {
    /// Group name with keyword count, e.g. `Loan Keywords (42 keywords)`.
    pub name: String,
    pub url: String,
    pub relevance: Relevance,
    /// Keywords embedded in the URL (after clamping).
    pub keyword_count: usize,
}

// ---------------------------------------------------------------------------
// GroupingSummary
// ---------------------------------------------------------------------------

/// Aggregate numbers over a grouping result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingSummary {
    pub total_keywords: usize,
    pub group_count: usize,
    pub core_groups: usize,
    pub related_groups: usize,
    pub wider_groups: usize,
    pub largest_group: usize,
}

// ---------------------------------------------------------------------------
// ReportId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for report identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub Uuid);

impl ReportId {
    /// Generate a new time-sortable report identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ReportId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// GroupingReport
// ---------------------------------------------------------------------------

/// The JSON document produced by `kwgroup report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingReport {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    pub id: ReportId,
    pub generated_at: DateTime<Utc>,
    /// Tool version that produced the report.
    pub tool_version: String,
    /// Domain as given by the user.
    pub domain: String,
    /// Normalized `https://<domain>/` target embedded in every URL.
    pub target_url: String,
    /// SHA-256 hex of the normalized keyword list.
    pub input_fingerprint: String,
    pub keyword_count: usize,
    pub summary: GroupingSummary,
    pub groups: Vec<KeywordGroup>,
    pub urls: Vec<GroupedUrl>,
}
