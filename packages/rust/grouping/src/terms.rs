//! Keyword normalization and term frequency counting.

use std::collections::HashMap;

/// Common English function words excluded from theme detection.
///
/// Words of two characters or fewer are ignored regardless, so the short
/// entries only document intent.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "can", "do", "does", "for", "from",
    "how", "in", "into", "is", "it", "its", "my", "of", "on", "or", "our", "that", "the",
    "their", "this", "to", "was", "what", "when", "where", "which", "who", "why", "will",
    "with", "you", "your",
];

/// Words must be longer than this (in chars) to count as terms.
const MIN_TERM_CHARS: usize = 2;

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Lowercase and trim every keyword.
pub(crate) fn normalize(keywords: &[impl AsRef<str>]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .collect()
}

fn is_long_enough(word: &str) -> bool {
    word.chars().count() > MIN_TERM_CHARS
}

/// Occurrence count plus the position of the first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TermStat {
    pub count: usize,
    /// Sequence number shared across both tables; breaks frequency ties.
    pub first_seen: usize,
}

/// Single-word and two-word phrase frequencies over a keyword list.
#[derive(Debug, Default)]
pub(crate) struct TermCounts {
    pub words: HashMap<String, TermStat>,
    pub compounds: HashMap<String, TermStat>,
    seq: usize,
}

impl TermCounts {
    /// Count terms over already-normalized keywords.
    pub fn from_keywords(keywords: &[String]) -> Self {
        let mut counts = Self::default();

        for keyword in keywords {
            let words: Vec<&str> = keyword.split_whitespace().collect();

            for word in &words {
                if is_long_enough(word) && !is_stop_word(word) {
                    counts.bump_word(word);
                }
            }

            for pair in words.windows(2) {
                if is_long_enough(pair[0]) && is_long_enough(pair[1]) {
                    counts.bump_compound(format!("{} {}", pair[0], pair[1]));
                }
            }
        }

        counts
    }

    fn bump_word(&mut self, word: &str) {
        let seq = self.next_seq();
        self.words
            .entry(word.to_string())
            .and_modify(|s| s.count += 1)
            .or_insert(TermStat {
                count: 1,
                first_seen: seq,
            });
    }

    fn bump_compound(&mut self, phrase: String) {
        let seq = self.next_seq();
        self.compounds
            .entry(phrase)
            .and_modify(|s| s.count += 1)
            .or_insert(TermStat {
                count: 1,
                first_seen: seq,
            });
    }

    fn next_seq(&mut self) -> usize {
        self.seq += 1;
        self.seq
    }
}

/// Whether neither word of a two-word phrase is a stop word.
pub(crate) fn compound_is_content(phrase: &str) -> bool {
    phrase.split(' ').all(|w| !is_stop_word(w))
}
