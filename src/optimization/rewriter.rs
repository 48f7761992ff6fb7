//! Phrase-level and sentence-level rewrites

use super::{OptimizationEvent, OptimizationStrategy, StrategyOutput};
use crate::analysis::scanner::LONG_SENTENCE_WORDS;
use crate::metrics::word_count;
use regex::Regex;
use std::sync::LazyLock;

/// Longest pattern prefix shown in the log
const PATTERN_DISPLAY_LEN: usize = 30;

/// (pattern, replacement), applied in order
const REDUNDANT_PHRASES: &[(&str, &str)] = &[
    (r"it is important to note that\s+", ""),
    (r"please note that\s+", ""),
    (r"it should be noted that\s+", ""),
    (r"as mentioned (above|before|previously),?\s+", ""),
    (r"in order to\s+", "to "),
    (r"for the purpose of\s+", "to "),
    (r"due to the fact that\s+", "because "),
    (r"at this point in time\s+", "now "),
    (r"has the ability to\s+", "can "),
];

struct PhraseRule {
    pattern: &'static str,
    regex: Regex,
    replacement: &'static str,
}

static PHRASE_RULES: LazyLock<Vec<PhraseRule>> = LazyLock::new(|| {
    REDUNDANT_PHRASES
        .iter()
        .map(|&(pattern, replacement)| PhraseRule {
            pattern,
            regex: Regex::new(&format!("(?i){pattern}")).expect("redundant phrase regex"),
            replacement,
        })
        .collect()
});

static RE_SENTENCE_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+\s+").expect("sentence delimiter regex"));
static RE_FILLER_INTENSIFIERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(very|really|quite|rather|fairly|pretty)\s+").expect("filler regex")
});
static RE_FILLER_HEDGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(basically|essentially|actually|literally)\s+").expect("hedge regex")
});

/// Drops or shortens stock filler phrases ("in order to" → "to")
#[derive(Debug, Default, Clone, Copy)]
pub struct PhraseRewriter;

impl OptimizationStrategy for PhraseRewriter {
    fn name(&self) -> &str {
        "remove_redundancy"
    }

    fn apply(&self, text: &str) -> StrategyOutput {
        let mut result = text.to_string();
        let mut events = Vec::new();

        for rule in PHRASE_RULES.iter() {
            let before = word_count(&result);
            let rewritten = rule.regex.replace_all(&result, rule.replacement).into_owned();
            if word_count(&rewritten) != before {
                let shown: String = rule.pattern.chars().take(PATTERN_DISPLAY_LEN).collect();
                events.push(OptimizationEvent::new(format!(
                    "Removed redundant phrase pattern: {shown}..."
                )));
            }
            result = rewritten;
        }

        StrategyOutput {
            text: result,
            events,
        }
    }
}

/// Strips filler words from sentences over the length limit
#[derive(Debug, Default, Clone, Copy)]
pub struct SentenceSimplifier;

impl SentenceSimplifier {
    fn simplify(sentence: &str) -> String {
        let trimmed = RE_FILLER_INTENSIFIERS.replace_all(sentence, "");
        RE_FILLER_HEDGES.replace_all(&trimmed, "").into_owned()
    }
}

impl OptimizationStrategy for SentenceSimplifier {
    fn name(&self) -> &str {
        "simplify_verbosity"
    }

    fn apply(&self, text: &str) -> StrategyOutput {
        let mut result = String::with_capacity(text.len());
        let mut events = Vec::new();
        let mut start = 0;

        // Each sentence is followed by its delimiter, the last one by nothing.
        let delimiters = RE_SENTENCE_DELIMITER
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .chain(std::iter::once((text.len(), text.len())));

        for (delim_start, delim_end) in delimiters {
            let sentence = &text[start..delim_start];
            let words = word_count(sentence);

            if words > LONG_SENTENCE_WORDS {
                let simplified = Self::simplify(sentence);
                let removed = words.saturating_sub(word_count(&simplified));
                if removed > 0 {
                    events.push(OptimizationEvent::new(format!(
                        "Simplified verbose sentence (reduced by {removed} words)"
                    )));
                }
                result.push_str(&simplified);
            } else {
                result.push_str(sentence);
            }

            result.push_str(&text[delim_start..delim_end]);
            start = delim_end;
        }

        StrategyOutput {
            text: result,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_important_to_note() {
        let output = PhraseRewriter.apply("It is important to note that the system works.");
        assert_eq!(output.text, "the system works.");
        assert_eq!(
            output.events,
            vec![OptimizationEvent::new(
                "Removed redundant phrase pattern: it is important to note that\\s..."
            )]
        );
    }

    #[test]
    fn test_shortens_phrases() {
        let text = "In order to ship, due to the fact that time is short, we act. \
                    At this point in time the tool has the ability to help.";
        let output = PhraseRewriter.apply(text);
        assert_eq!(
            output.text,
            "to ship, because time is short, we act. now the tool can help."
        );
        assert_eq!(output.events.len(), 4);
    }

    #[test]
    fn test_as_mentioned_with_comma() {
        let output = PhraseRewriter.apply("As mentioned above, keep it short.");
        assert_eq!(output.text, "keep it short.");
        assert_eq!(output.events.len(), 1);
    }

    #[test]
    fn test_rewriter_noop() {
        let text = "Nothing to remove here.\n";
        let output = PhraseRewriter.apply(text);
        assert_eq!(output, StrategyOutput::unchanged(text));
    }

    #[test]
    fn test_simplifies_only_long_sentences() {
        let long = format!("This is very basically {} end", vec!["word"; 40].join(" "));
        let text = format!("Short and very clear. {long}. Next!\n");
        let output = SentenceSimplifier.apply(&text);

        let expected_long = format!("This is {} end", vec!["word"; 40].join(" "));
        assert_eq!(output.text, format!("Short and very clear. {expected_long}. Next!\n"));
        assert_eq!(
            output.events,
            vec![OptimizationEvent::new("Simplified verbose sentence (reduced by 2 words)")]
        );
    }

    #[test]
    fn test_simplifier_keeps_delimiters() {
        let text = "One...  Two?!\n\nThree";
        let output = SentenceSimplifier.apply(text);
        assert_eq!(output.text, text);
        assert!(output.events.is_empty());
    }
}
