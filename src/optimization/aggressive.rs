//! Lossy final pass: one example, tidy headings

use super::{OptimizationEvent, OptimizationStrategy, StrategyOutput};
use crate::document::example_blocks;
use regex::Regex;
use std::sync::LazyLock;

static RE_LOOSE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"##\s+(.+?)\s*\n").expect("loose heading regex"));

/// Removes every example block after the first and normalizes the spacing
/// of `##` heading lines. Always logs, even when nothing changed.
#[derive(Debug, Default, Clone, Copy)]
pub struct AggressivePass;

impl AggressivePass {
    fn drop_extra_examples(text: &str) -> Option<String> {
        let blocks = example_blocks(text);
        if blocks.len() <= 1 {
            return None;
        }

        let mut result = String::with_capacity(text.len());
        let mut cursor = 0;
        for block in &blocks[1..] {
            result.push_str(&text[cursor..block.start]);
            cursor = block.end;
        }
        result.push_str(&text[cursor..]);
        Some(result)
    }
}

impl OptimizationStrategy for AggressivePass {
    fn name(&self) -> &str {
        "aggressive"
    }

    fn apply(&self, text: &str) -> StrategyOutput {
        let mut events = Vec::new();

        let trimmed = match Self::drop_extra_examples(text) {
            Some(trimmed) => {
                events.push(OptimizationEvent::new("Aggressively reduced examples to 1"));
                trimmed
            }
            None => text.to_string(),
        };

        let tidied = RE_LOOSE_HEADING.replace_all(&trimmed, "## ${1}\n").into_owned();
        events.push(OptimizationEvent::new("Applied aggressive optimization"));

        StrategyOutput {
            text: tidied,
            events,
        }
    }
}
