//! Caps the number of example sections

use super::{OptimizationEvent, OptimizationStrategy, StrategyOutput};
use crate::analysis::scanner::MAX_EXAMPLES;
use crate::document::Document;
use std::collections::BTreeSet;

/// Removed titles listed in the log before eliding the rest
const MAX_LISTED_REMOVALS: usize = 3;

/// Keeps the first two and the last example section when there are more
/// than three; everything else is left in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExampleConsolidator;

impl ExampleConsolidator {
    pub fn consolidate(&self, document: &Document) -> (Document, Option<OptimizationEvent>) {
        let example_indices = document.example_indices();
        if example_indices.len() <= MAX_EXAMPLES {
            return (document.clone(), None);
        }

        let keep: BTreeSet<usize> = example_indices
            .iter()
            .take(2)
            .chain(example_indices.last())
            .copied()
            .collect();

        let mut removed_titles = Vec::new();
        let mut sections = Vec::with_capacity(document.sections.len());
        for (idx, section) in document.sections.iter().enumerate() {
            if section.is_example() && !keep.contains(&idx) {
                removed_titles.push(section.title().to_string());
            } else {
                sections.push(section.clone());
            }
        }

        let mut description = format!(
            "Consolidated examples: kept {} of {}",
            keep.len(),
            example_indices.len()
        );
        if !removed_titles.is_empty() {
            let mut listed = removed_titles
                .iter()
                .take(MAX_LISTED_REMOVALS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if removed_titles.len() > MAX_LISTED_REMOVALS {
                listed.push_str(", ...");
            }
            description.push_str(&format!(" (removed {listed})"));
        }

        (
            Document::new(document.preamble.clone(), sections),
            Some(OptimizationEvent::new(description)),
        )
    }
}

impl OptimizationStrategy for ExampleConsolidator {
    fn name(&self) -> &str {
        "consolidate_examples"
    }

    fn apply(&self, text: &str) -> StrategyOutput {
        let document = Document::segment(text);

        match self.consolidate(&document) {
            (consolidated, Some(event)) => StrategyOutput {
                text: consolidated.rebuild(),
                events: vec![event],
            },
            (_, None) => StrategyOutput::unchanged(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::word_count;
    use regex::Regex;

    fn count_examples(text: &str) -> usize {
        Regex::new(r"(?mi)^##\s+Example").unwrap().find_iter(text).count()
    }

    #[test]
    fn test_limits_examples_to_three() {
        let text = "# Prompt Title\n\n\
            ## Example 1\nExample content one.\n\n\
            ## Example 2\nExample content two.\n\n\
            ## Example 3\nExample content three.\n\n\
            ## Example 4\nExample content four.\n\n\
            ## Guidance\nFollow the structure above.\n";

        let output = ExampleConsolidator.apply(text);

        assert_eq!(count_examples(&output.text), 3);
        assert!(!output.text.contains("## Example 3"));
        assert!(output.text.contains("## Guidance\nFollow the structure above.\n"));
        assert!(word_count(&output.text) < word_count(text));
        assert_eq!(
            output.events,
            vec![OptimizationEvent::new(
                "Consolidated examples: kept 3 of 4 (removed Example 3)"
            )]
        );
    }

    #[test]
    fn test_lists_at_most_three_removed_titles() {
        let text: String = (1..=8).map(|n| format!("## Example {n}\nbody {n}\n")).collect();
        let output = ExampleConsolidator.apply(&text);

        assert_eq!(count_examples(&output.text), 3);
        assert!(output.text.contains("## Example 1\n"));
        assert!(output.text.contains("## Example 2\n"));
        assert!(output.text.contains("## Example 8\n"));
        assert_eq!(
            output.events,
            vec![OptimizationEvent::new(
                "Consolidated examples: kept 3 of 8 (removed Example 3, Example 4, Example 5, ...)"
            )]
        );
    }

    #[test]
    fn test_three_examples_is_noop() {
        let text = "## Example 1\na\n## Example 2\nb\n## Example 3\nc\n## Notes\nd\n";
        let output = ExampleConsolidator.apply(text);
        assert_eq!(output, StrategyOutput::unchanged(text));
    }

    #[test]
    fn test_non_example_sections_keep_order() {
        let text = "pre\n## Example A\n1\n## Setup\n2\n## Example B\n3\n## Sample example\n4\n## Tail\n5\n## Example C\n6\n";
        let output = ExampleConsolidator.apply(text);
        assert_eq!(
            output.text,
            "pre\n## Example A\n1\n## Setup\n2\n## Example B\n3\n## Tail\n5\n## Example C\n6\n"
        );
    }
}
