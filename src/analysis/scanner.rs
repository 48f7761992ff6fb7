//! Read-only estimators for each optimization category
//!
//! Every function returns an estimated token saving for one category. The
//! estimates are independent and may overlap.

use crate::document::{example_blocks, HeadingSignature};
use crate::metrics::{word_count, TOKENS_PER_WORD};
use regex::Regex;
use std::sync::LazyLock;

/// Phrase patterns and the tokens each match is assumed to waste
static REDUNDANT_PATTERNS: LazyLock<Vec<(Regex, usize)>> = LazyLock::new(|| {
    [
        (r"it is important to note that", 50),
        (r"please note that", 30),
        (r"it should be noted", 30),
        (r"as mentioned (above|before|previously)", 40),
        (r"in order to", 20),
        (r"for the purpose of", 30),
        (r"due to the fact that", 40),
        (r"at this point in time", 40),
    ]
    .into_iter()
    .map(|(pattern, cost)| {
        let re = Regex::new(&format!("(?i){pattern}")).expect("redundant phrase regex");
        (re, cost)
    })
    .collect()
});

static RE_SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence break regex"));
static RE_EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n\n+").expect("newline run regex"));
static RE_EXCESS_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\.\.+|!!!+|\?\?\?+").expect("punctuation run regex"));
static RE_COMPLEX_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(utilize|facilitate|implement|leverage|paradigm)\b")
        .expect("complex word regex")
});
static RE_MERGE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"##\s+([^\n]+)").expect("merge heading regex"));

/// Sentences longer than this are considered verbose
pub const LONG_SENTENCE_WORDS: usize = 40;

/// Examples beyond this count are considered excessive
pub const MAX_EXAMPLES: usize = 3;

const VERBOSE_REDUCTION: f64 = 0.2;
const MERGE_SAVINGS: usize = 100;
const BLANK_RUN_SAVINGS: usize = 5;
const PUNCT_RUN_SAVINGS: usize = 3;
const COMPLEX_WORD_SAVINGS: usize = 5;

pub fn redundancy_savings(text: &str) -> usize {
    REDUNDANT_PATTERNS
        .iter()
        .map(|(re, cost)| re.find_iter(text).count() * cost)
        .sum()
}

/// 20% of the words in sentences over the length limit, in tokens
pub fn verbosity_savings(text: &str) -> usize {
    let long_words: usize = RE_SENTENCE_BREAK
        .split(text)
        .map(word_count)
        .filter(|&words| words > LONG_SENTENCE_WORDS)
        .sum();

    (long_words as f64 * VERBOSE_REDUCTION * TOKENS_PER_WORD) as usize
}

/// 100 tokens per pair of `##` headings sharing two or more tokens
pub fn merge_savings(text: &str) -> usize {
    let signatures: Vec<HeadingSignature> = RE_MERGE_HEADING
        .captures_iter(text)
        .map(|caps| HeadingSignature::from_heading(&caps[1]))
        .collect();

    let mut pairs = 0;
    for (idx, first) in signatures.iter().enumerate() {
        pairs += signatures[idx + 1..]
            .iter()
            .filter(|second| first.shared_tokens(second) >= 2)
            .count();
    }

    pairs * MERGE_SAVINGS
}

/// Tokens held by example blocks beyond the first three
pub fn example_savings(text: &str) -> usize {
    let blocks = example_blocks(text);
    if blocks.len() <= MAX_EXAMPLES {
        return 0;
    }

    let excess = blocks.len() - MAX_EXAMPLES;
    let total_words: usize = blocks.iter().map(|r| word_count(&text[r.clone()])).sum();
    let average = total_words as f64 / blocks.len() as f64;

    (excess as f64 * average * TOKENS_PER_WORD) as usize
}

pub fn formatting_savings(text: &str) -> usize {
    RE_EXCESS_NEWLINES.find_iter(text).count() * BLANK_RUN_SAVINGS
        + RE_EXCESS_PUNCT.find_iter(text).count() * PUNCT_RUN_SAVINGS
}

pub fn language_savings(text: &str) -> usize {
    RE_COMPLEX_WORDS.find_iter(text).count() * COMPLEX_WORD_SAVINGS
}
