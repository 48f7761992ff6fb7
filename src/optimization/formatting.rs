//! Whitespace and punctuation cleanup

use super::{OptimizationEvent, OptimizationStrategy, StrategyOutput};
use regex::Regex;
use std::sync::LazyLock;

static RE_MULTI_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n\n+").expect("newline run regex"));
static RE_ELLIPSIS_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\.\.+").expect("ellipsis regex"));
static RE_BANG_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!!!+").expect("bang regex"));
static RE_QUESTION_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?\?\?+").expect("question regex"));

/// Strip trailing whitespace from each line
pub fn strip_trailing_whitespace(text: &str) -> String {
    text.split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trims trailing whitespace, collapses blank-line runs to a single blank
/// line and shortens punctuation runs.
///
/// Trailing whitespace goes first so that lines holding only spaces count as
/// blank when runs are collapsed; this keeps the cleaner idempotent.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormattingCleaner;

impl FormattingCleaner {
    pub fn clean(&self, text: &str) -> String {
        let result = strip_trailing_whitespace(text);
        let result = RE_MULTI_NEWLINE.replace_all(&result, "\n\n");
        let result = RE_ELLIPSIS_RUN.replace_all(&result, "...");
        let result = RE_BANG_RUN.replace_all(&result, "!");
        RE_QUESTION_RUN.replace_all(&result, "?").into_owned()
    }
}

impl OptimizationStrategy for FormattingCleaner {
    fn name(&self) -> &str {
        "clean_formatting"
    }

    fn apply(&self, text: &str) -> StrategyOutput {
        let cleaned = self.clean(text);

        let before = text.chars().count();
        let after = cleaned.chars().count();
        let events = if after < before {
            vec![OptimizationEvent::new(format!(
                "Cleaned formatting (saved {} characters)",
                before - after
            ))]
        } else {
            Vec::new()
        };

        StrategyOutput {
            text: cleaned,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_blank_lines_and_punctuation() {
        let text = "Title  \n\n\n\nWait..... what?????\nNo!!!!\t\n";
        let output = FormattingCleaner.apply(text);
        assert_eq!(output.text, "Title\n\nWait... what?\nNo!\n");
        assert_eq!(
            output.events,
            vec![OptimizationEvent::new("Cleaned formatting (saved 14 characters)")]
        );
    }

    #[test]
    fn test_whitespace_only_lines_count_as_blank() {
        let text = "a\n   \n\t\nb";
        assert_eq!(FormattingCleaner.clean(text), "a\n\nb");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for text in [
            "a\n  \n\n\nb....\n",
            "x!!! \n \n \ny???",
            "## Head   \n\n\n\n\ncontent\r\n",
            "",
        ] {
            let once = FormattingCleaner.clean(text);
            assert_eq!(FormattingCleaner.clean(&once), once);
        }
    }

    #[test]
    fn test_clean_text_is_noop() {
        let text = "## Role\nYou help.\n\n## Workflow\n1. Ask...\n";
        let output = FormattingCleaner.apply(text);
        assert_eq!(output, StrategyOutput::unchanged(text));
    }
}
