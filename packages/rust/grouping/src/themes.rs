//! Theme selection and keyword claiming.

use std::cmp::Reverse;

use regex::Regex;
use tracing::{debug, warn};

use kwgroup_shared::{GroupingOptions, Theme, ThemeKind};

use crate::terms::{TermCounts, compound_is_content};

/// A theme together with the keywords it claimed, in input order.
#[derive(Debug, Clone)]
pub(crate) struct ThemeGroup {
    pub theme: Theme,
    pub keywords: Vec<String>,
}

/// Pick themes from term counts and order them for claiming.
///
/// Order: core before related, then descending count, then two-word phrases
/// before single words, then first appearance in the input.
pub(crate) fn select_themes(
    counts: &TermCounts,
    total: usize,
    opts: &GroupingOptions,
) -> Vec<Theme> {
    let related = opts.related_threshold(total);
    let core = opts.core_threshold(total);

    let words = counts.words.iter().map(|(term, stat)| (term, stat, false));
    let compounds = counts
        .compounds
        .iter()
        .filter(|(term, _)| compound_is_content(term))
        .map(|(term, stat)| (term, stat, true));

    let mut candidates: Vec<(Theme, usize)> = words
        .chain(compounds)
        .filter(|(_, stat, _)| stat.count as f64 >= related)
        .map(|(term, stat, compound)| {
            let kind = if stat.count as f64 >= core {
                ThemeKind::Core
            } else {
                ThemeKind::Related
            };
            let theme = Theme {
                term: term.clone(),
                count: stat.count,
                kind,
                compound,
            };
            (theme, stat.first_seen)
        })
        .collect();

    candidates.sort_by(|(a, a_seen), (b, b_seen)| {
        kind_rank(a.kind)
            .cmp(&kind_rank(b.kind))
            .then_with(|| Reverse(a.count).cmp(&Reverse(b.count)))
            .then_with(|| Reverse(a.compound).cmp(&Reverse(b.compound)))
            .then_with(|| a_seen.cmp(b_seen))
            .then_with(|| a.term.cmp(&b.term))
    });

    debug!(
        themes = candidates.len(),
        core_threshold = core,
        related_threshold = related,
        "themes selected"
    );

    candidates.into_iter().map(|(theme, _)| theme).collect()
}

fn kind_rank(kind: ThemeKind) -> u8 {
    match kind {
        ThemeKind::Core => 0,
        ThemeKind::Related => 1,
    }
}

/// Build the case-insensitive whole-word matcher for a theme.
pub(crate) fn theme_matcher(term: &str) -> Option<Regex> {
    match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(term, error = %e, "skipping theme with unbuildable matcher");
            None
        }
    }
}

/// Let each theme claim the still-unclaimed keywords that contain it.
///
/// A theme matching fewer than `min_theme_keywords` remaining keywords is
/// dropped and its keywords stay available. Returns the theme groups and the
/// leftover keywords, both in input order.
pub(crate) fn claim_keywords(
    themes: Vec<Theme>,
    keywords: &[String],
    opts: &GroupingOptions,
) -> (Vec<ThemeGroup>, Vec<String>) {
    let mut claimed = vec![false; keywords.len()];
    let mut groups = Vec::new();

    for theme in themes {
        let Some(matcher) = theme_matcher(&theme.term) else {
            continue;
        };

        let matched: Vec<usize> = keywords
            .iter()
            .enumerate()
            .filter(|(i, kw)| !claimed[*i] && matcher.is_match(kw))
            .map(|(i, _)| i)
            .collect();

        if matched.len() < opts.min_theme_keywords {
            continue;
        }

        for &i in &matched {
            claimed[i] = true;
        }
        groups.push(ThemeGroup {
            keywords: matched.iter().map(|&i| keywords[i].clone()).collect(),
            theme,
        });
    }

    let ungrouped: Vec<String> = keywords
        .iter()
        .zip(&claimed)
        .filter(|(_, taken)| !**taken)
        .map(|(kw, _)| kw.clone())
        .collect();

    debug!(
        theme_groups = groups.len(),
        ungrouped = ungrouped.len(),
        "keywords claimed"
    );

    (groups, ungrouped)
}
