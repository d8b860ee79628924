//! Size normalization: splitting oversized groups and packing small ones.

use tracing::debug;

use kwgroup_shared::{GroupingOptions, KeywordGroup, Relevance, ThemeKind};

use crate::naming;
use crate::themes::ThemeGroup;

/// Split `keywords` into contiguous chunks of at most `ideal` items, sized as
/// evenly as possible. Earlier chunks take the remainder.
pub(crate) fn split_evenly(keywords: Vec<String>, ideal: usize) -> Vec<Vec<String>> {
    let len = keywords.len();
    if len == 0 {
        return Vec::new();
    }

    let chunks = len.div_ceil(ideal.max(1));
    let base = len / chunks;
    let extra = len % chunks;

    let mut rest = keywords.into_iter();
    (0..chunks)
        .map(|i| {
            let size = if i < extra { base + 1 } else { base };
            rest.by_ref().take(size).collect()
        })
        .collect()
}

/// A group waiting to be packed with other small groups.
#[derive(Debug, Clone)]
pub(crate) struct Deferred {
    /// Source theme terms, in merge order.
    pub themes: Vec<String>,
    pub keywords: Vec<String>,
    pub has_core: bool,
    /// True for the leftover bucket.
    pub ungrouped: bool,
}

impl Deferred {
    fn absorb(&mut self, other: Deferred) {
        for term in other.themes {
            if !self.themes.contains(&term) {
                self.themes.push(term);
            }
        }
        self.keywords.extend(other.keywords);
        self.has_core |= other.has_core;
    }

    fn finish(self) -> KeywordGroup {
        let relevance = if self.has_core {
            Relevance::Related
        } else {
            Relevance::Wider
        };
        KeywordGroup::new(naming::combined_name(&self.themes), self.keywords, relevance)
    }
}

/// Turn theme groups into final groups where they are big enough, deferring
/// the rest (and the leftover bucket) for packing.
pub(crate) fn normalize_sizes(
    theme_groups: Vec<ThemeGroup>,
    ungrouped: Vec<String>,
    opts: &GroupingOptions,
) -> (Vec<KeywordGroup>, Vec<Deferred>) {
    let mut finished = Vec::new();
    let mut deferred = Vec::new();

    for ThemeGroup { theme, keywords } in theme_groups {
        let relevance = match theme.kind {
            ThemeKind::Core => Relevance::Core,
            ThemeKind::Related => Relevance::Related,
        };

        if keywords.len() > opts.max_group_size {
            let chunks = split_evenly(keywords, opts.ideal_chunk_size);
            let numbered = chunks.len() > 1;
            debug!(theme = %theme.term, parts = chunks.len(), "splitting oversized group");

            for (i, chunk) in chunks.into_iter().enumerate() {
                let name = if numbered {
                    naming::part_name(&theme.term, i + 1)
                } else {
                    naming::theme_name(&theme.term)
                };
                finished.push(KeywordGroup::new(name, chunk, relevance));
            }
        } else if keywords.len() >= opts.standalone_min {
            finished.push(KeywordGroup::new(
                naming::theme_name(&theme.term),
                keywords,
                relevance,
            ));
        } else {
            deferred.push(Deferred {
                themes: vec![theme.term],
                keywords,
                has_core: theme.kind == ThemeKind::Core,
                ungrouped: false,
            });
        }
    }

    if ungrouped.len() > opts.max_group_size {
        for chunk in split_evenly(ungrouped, opts.ideal_chunk_size) {
            deferred.push(leftover(chunk));
        }
    } else if !ungrouped.is_empty() {
        deferred.push(leftover(ungrouped));
    }

    (finished, deferred)
}

fn leftover(keywords: Vec<String>) -> Deferred {
    Deferred {
        themes: Vec::new(),
        keywords,
        has_core: false,
        ungrouped: true,
    }
}

/// Greedily pack deferred groups into combined groups within the size cap.
///
/// Named themes go before the leftover bucket, larger themes first.
pub(crate) fn combine_small(mut deferred: Vec<Deferred>, opts: &GroupingOptions) -> Vec<KeywordGroup> {
    deferred.sort_by_key(|d| (d.ungrouped, std::cmp::Reverse(d.keywords.len())));

    let mut items = deferred.into_iter();
    let Some(mut acc) = items.next() else {
        return Vec::new();
    };

    let mut combined = Vec::new();
    for item in items {
        if acc.keywords.len() + item.keywords.len() <= opts.max_group_size {
            acc.absorb(item);
        } else {
            combined.push(acc.finish());
            acc = item;
        }
    }
    combined.push(acc.finish());

    debug!(combined = combined.len(), "small groups packed");
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwgroup_shared::Theme;

    fn words(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix} {i}")).collect()
    }

    fn theme_group(term: &str, kind: ThemeKind, n: usize) -> ThemeGroup {
        ThemeGroup {
            theme: Theme {
                term: term.into(),
                count: n,
                kind,
                compound: term.contains(' '),
            },
            keywords: words(term, n),
        }
    }

    #[test]
    fn split_evenly_balances_chunks() {
        let sizes: Vec<usize> = split_evenly(words("k", 60), 40).iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![30, 30]);

        let sizes: Vec<usize> = split_evenly(words("k", 101), 40).iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![34, 34, 33]);

        assert!(split_evenly(Vec::new(), 40).is_empty());
    }

    #[test]
    fn split_evenly_keeps_order() {
        let chunks = split_evenly(words("k", 51), 40);
        assert_eq!(chunks[0][0], "k 0");
        assert_eq!(chunks[0].last().map(String::as_str), Some("k 25"));
        assert_eq!(chunks[1][0], "k 26");
    }

    #[test]
    fn oversized_theme_is_split_into_parts() {
        let opts = GroupingOptions::default();
        let (finished, deferred) =
            normalize_sizes(vec![theme_group("loan", ThemeKind::Core, 75)], Vec::new(), &opts);

        assert!(deferred.is_empty());
        assert_eq!(finished.len(), 2);
        assert_eq!(finished[0].name, "Loan Keywords (Part 1)");
        assert_eq!(finished[1].name, "Loan Keywords (Part 2)");
        assert!(finished.iter().all(|g| g.relevance == Relevance::Core));
        assert_eq!(finished.iter().map(KeywordGroup::len).sum::<usize>(), 75);
    }

    #[test]
    fn mid_sized_theme_stands_alone() {
        let opts = GroupingOptions::default();
        let (finished, deferred) = normalize_sizes(
            vec![theme_group("mortgage", ThemeKind::Related, 15)],
            Vec::new(),
            &opts,
        );
        assert!(deferred.is_empty());
        assert_eq!(finished[0].name, "Mortgage Keywords");
        assert_eq!(finished[0].priority, 2);
    }

    #[test]
    fn small_themes_and_leftovers_are_deferred() {
        let opts = GroupingOptions::default();
        let (finished, deferred) = normalize_sizes(
            vec![theme_group("loan", ThemeKind::Core, 14)],
            words("misc", 120),
            &opts,
        );
        assert!(finished.is_empty());
        // 1 theme + 3 leftover chunks of 40
        assert_eq!(deferred.len(), 4);
        assert!(deferred[1..].iter().all(|d| d.ungrouped && d.keywords.len() == 40));
    }

    #[test]
    fn packing_respects_cap_and_order() {
        let opts = GroupingOptions::default();
        let (_, deferred) = normalize_sizes(
            vec![
                theme_group("loan", ThemeKind::Core, 10),
                theme_group("mortgage", ThemeKind::Related, 14),
                theme_group("credit", ThemeKind::Related, 12),
                theme_group("auto", ThemeKind::Related, 13),
            ],
            words("misc", 8),
            &opts,
        );
        let combined = combine_small(deferred, &opts);

        // mortgage 14 + auto 13 + credit 12 + loan 10 = 49, misc 8 overflows
        assert_eq!(combined.len(), 2);
        assert_eq!(combined[0].name, "Mixed Keywords (Mortgage, Auto)");
        assert_eq!(combined[0].len(), 49);
        assert_eq!(combined[0].relevance, Relevance::Related);
        assert_eq!(combined[1].name, "Other Keywords");
        assert_eq!(combined[1].relevance, Relevance::Wider);
    }

    #[test]
    fn packing_nothing_yields_nothing() {
        assert!(combine_small(Vec::new(), &GroupingOptions::default()).is_empty());
    }
}
