//! Text statistics and token estimates

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Rough language-model tokens per whitespace-delimited word
pub const TOKENS_PER_WORD: f64 = 0.75;

/// Fraction of the original token estimate used as the default target
pub const DEFAULT_TARGET_RATIO: f64 = 0.8;

static RE_SECTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"##?\s+").expect("section marker regex"));

/// Number of whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated token count for a word count (truncated)
pub fn estimate_tokens(words: usize) -> usize {
    (words as f64 * TOKENS_PER_WORD) as usize
}

/// Snapshot of a document's size, recomputed on demand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// Characters (Unicode scalar values)
    pub characters: usize,
    /// Whitespace-delimited words
    pub words: usize,
    /// Words × 0.75, truncated
    pub estimated_tokens: usize,
    /// Newline-separated lines (an empty text has one line)
    pub lines: usize,
    /// Heading markers found in the text
    pub sections: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let words = word_count(text);
        Self {
            characters: text.chars().count(),
            words,
            estimated_tokens: estimate_tokens(words),
            lines: text.split('\n').count(),
            sections: RE_SECTION_MARKER.find_iter(text).count(),
        }
    }
}

/// Token savings between two snapshots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reduction {
    pub tokens: i64,
    pub percentage: f64,
}

impl Reduction {
    pub fn between(original: &TextStats, optimized: &TextStats) -> Self {
        let tokens = original.estimated_tokens as i64 - optimized.estimated_tokens as i64;
        let percentage = if original.estimated_tokens > 0 {
            tokens as f64 / original.estimated_tokens as f64 * 100.0
        } else {
            0.0
        };
        Self { tokens, percentage }
    }
}
