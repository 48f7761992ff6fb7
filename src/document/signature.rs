//! Heading normalization for similarity checks

use super::heading_title;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Words ignored when comparing headings
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "a", "an", "of", "to", "in", "on", "by", "from", "your", "our",
    "this", "that",
];

static RE_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("parenthetical regex"));
static RE_NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("non-alphanumeric regex"));
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Comparable form of a heading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingSignature {
    /// Lowercased title, punctuation and parentheticals removed
    pub normalized: String,
    /// Stemmed title words minus stop words
    pub tokens: BTreeSet<String>,
}

impl HeadingSignature {
    pub fn from_heading(heading: &str) -> Self {
        let title = RE_PARENTHETICAL.replace_all(heading_title(heading), "");
        let lowered = title.to_lowercase();
        let cleaned = RE_NON_ALNUM.replace_all(&lowered, " ");
        let normalized = RE_WHITESPACE.replace_all(&cleaned, " ").trim().to_string();

        if normalized.is_empty() {
            return Self::default();
        }

        let mut tokens: BTreeSet<String> = normalized
            .split(' ')
            .filter(|token| !STOP_WORDS.contains(token))
            .map(stem)
            .collect();

        if tokens.is_empty() {
            tokens.insert(normalized.clone());
        }

        Self { normalized, tokens }
    }

    /// Whether a section with this signature belongs with `other`.
    ///
    /// Non-empty token sets match when equal, when one contains the other, or
    /// when they share at least two tokens. Identical non-empty titles always
    /// match.
    pub fn overlaps(&self, other_tokens: &BTreeSet<String>, other_normalized: &str) -> bool {
        let tokens_match = !self.tokens.is_empty()
            && !other_tokens.is_empty()
            && (self.tokens.is_subset(other_tokens)
                || self.tokens.is_superset(other_tokens)
                || self.tokens.intersection(other_tokens).nth(1).is_some());

        tokens_match || (!self.normalized.is_empty() && self.normalized == other_normalized)
    }

    /// Shared tokens between two signatures
    pub fn shared_tokens(&self, other: &HeadingSignature) -> usize {
        self.tokens.intersection(&other.tokens).count()
    }
}

/// Crude suffix stemming: "ies" → "y", "ing" dropped, trailing "s" dropped
fn stem(token: &str) -> String {
    let len = token.len();
    if len > 3 && token.ends_with("ies") {
        format!("{}y", &token[..len - 3])
    } else if len > 5 && token.ends_with("ing") {
        token[..len - 3].to_string()
    } else if len > 3 && token.ends_with('s') {
        token[..len - 1].to_string()
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(heading: &str) -> Vec<String> {
        HeadingSignature::from_heading(heading).tokens.into_iter().collect()
    }

    #[test]
    fn test_normalizes_title() {
        let sig = HeadingSignature::from_heading("## Output Format (JSON only!) & Rules:");
        assert_eq!(sig.normalized, "output format rules");
        assert_eq!(tokens("## Output Format (JSON only!) & Rules:"), vec!["format", "output", "rule"]);
    }

    #[test]
    fn test_stemming() {
        assert_eq!(tokens("# Strategies"), vec!["strategy"]);
        assert_eq!(tokens("# Testing"), vec!["test"]);
        assert_eq!(tokens("# Sing"), vec!["sing"]);
        assert_eq!(tokens("# Goals"), vec!["goal"]);
        assert_eq!(tokens("# Bus"), vec!["bus"]);
    }

    #[test]
    fn test_stop_words_removed() {
        assert_eq!(tokens("## Tips for the Reviewer"), vec!["reviewer", "tip"]);
    }

    #[test]
    fn test_all_stop_words_fall_back_to_title() {
        let sig = HeadingSignature::from_heading("## Of The");
        assert_eq!(sig.normalized, "of the");
        assert_eq!(tokens("## Of The"), vec!["of the"]);
    }

    #[test]
    fn test_empty_heading() {
        let sig = HeadingSignature::from_heading("## (draft) !!!");
        assert!(sig.normalized.is_empty());
        assert!(sig.tokens.is_empty());
    }

    #[test]
    fn test_overlap_rules() {
        let goals = HeadingSignature::from_heading("## Goals");
        let overview = HeadingSignature::from_heading("## Goals Overview");
        let workflow = HeadingSignature::from_heading("## Workflow");
        let review_rules = HeadingSignature::from_heading("## Code Review Rules");
        let review_notes = HeadingSignature::from_heading("## Review Rules and Notes");

        assert!(overview.overlaps(&goals.tokens, &goals.normalized));
        assert!(goals.overlaps(&overview.tokens, &overview.normalized));
        assert!(!workflow.overlaps(&goals.tokens, &goals.normalized));
        assert!(review_notes.overlaps(&review_rules.tokens, &review_rules.normalized));
        assert_eq!(review_notes.shared_tokens(&review_rules), 2);
    }

    #[test]
    fn test_empty_signature_only_matches_nothing() {
        let empty = HeadingSignature::from_heading("## ???");
        let goals = HeadingSignature::from_heading("## Goals");
        assert!(!empty.overlaps(&goals.tokens, &goals.normalized));
        assert!(!empty.overlaps(&empty.tokens, &empty.normalized));
    }
}
