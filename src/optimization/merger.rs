//! Merges sections whose headings cover the same topic

use super::{OptimizationEvent, OptimizationStrategy, StrategyOutput};
use crate::document::{heading_title, Document, HeadingSignature, Section};
use std::collections::BTreeSet;

/// Accumulates every section folded into one output section
#[derive(Debug, Clone)]
struct MergeGroup {
    heading: String,
    /// Normalized title of the first heading; never updated
    normalized: String,
    /// Union of all merged headings' tokens
    tokens: BTreeSet<String>,
    blocks: Vec<String>,
    merged_headings: Vec<String>,
}

impl MergeGroup {
    fn open(section: &Section, signature: HeadingSignature) -> Self {
        Self {
            heading: section.heading.clone(),
            normalized: signature.normalized,
            tokens: signature.tokens,
            blocks: vec![section.content.clone()],
            merged_headings: Vec::new(),
        }
    }

    fn accepts(&self, signature: &HeadingSignature) -> bool {
        signature.overlaps(&self.tokens, &self.normalized)
    }

    fn absorb(&mut self, section: &Section, signature: HeadingSignature) {
        self.tokens.extend(signature.tokens);

        let normalized = normalize_block(&section.content);
        if !normalized.is_empty() && !self.blocks.iter().any(|b| normalize_block(b) == normalized) {
            self.blocks.push(section.content.clone());
        }

        self.merged_headings.push(section.heading.clone());
    }

    fn into_section(self) -> Section {
        Section::new(self.heading, combine_blocks(&self.blocks))
    }

    fn summary(&self) -> Option<String> {
        if self.merged_headings.is_empty() {
            return None;
        }
        let absorbed: Vec<&str> = self.merged_headings.iter().map(|h| heading_title(h)).collect();
        Some(format!(
            "{} (merged: {})",
            heading_title(&self.heading),
            absorbed.join(", ")
        ))
    }
}

/// Folds later sections into the first earlier section with an overlapping
/// heading, dropping content blocks that are already present.
///
/// Grouping is greedy and follows document order: a section joins the first
/// group it matches, never the best one. Example sections always open a new
/// group, though later sections may still join it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SectionMerger;

impl SectionMerger {
    pub fn merge(&self, document: &Document) -> (Document, Option<OptimizationEvent>) {
        let mut groups: Vec<MergeGroup> = Vec::new();

        for section in &document.sections {
            let signature = section.signature();
            let is_example = signature.normalized.contains("example");

            let target = if is_example {
                None
            } else {
                groups.iter_mut().find(|group| group.accepts(&signature))
            };

            match target {
                Some(group) => group.absorb(section, signature),
                None => groups.push(MergeGroup::open(section, signature)),
            }
        }

        let summaries: Vec<String> = groups.iter().filter_map(MergeGroup::summary).collect();
        if summaries.is_empty() {
            return (document.clone(), None);
        }

        let sections = groups.into_iter().map(MergeGroup::into_section).collect();
        let merged = Document::new(document.preamble.clone(), sections);
        let event = OptimizationEvent::new(format!("Merged sections: {}", summaries.join("; ")));

        (merged, Some(event))
    }
}

impl OptimizationStrategy for SectionMerger {
    fn name(&self) -> &str {
        "merge_sections"
    }

    fn apply(&self, text: &str) -> StrategyOutput {
        let document = Document::segment(text);
        if document.sections.is_empty() {
            return StrategyOutput::unchanged(text);
        }

        match self.merge(&document) {
            (merged, Some(event)) => StrategyOutput {
                text: merged.rebuild(),
                events: vec![event],
            },
            (_, None) => StrategyOutput::unchanged(text),
        }
    }
}

/// Trimmed, non-blank lines, lowercased; empty for blank blocks
fn normalize_block(block: &str) -> String {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}

/// First block verbatim, later blocks appended after a blank line
fn combine_blocks(blocks: &[String]) -> String {
    let Some((first, rest)) = blocks.split_first() else {
        return String::new();
    };

    let mut combined = first.clone();
    for block in rest {
        if normalize_block(block).is_empty() {
            continue;
        }
        combined.truncate(combined.trim_end_matches('\n').len());
        combined.push_str("\n\n");
        combined.push_str(block.trim_matches('\n'));
        if block.ends_with('\n') {
            combined.push('\n');
        }
    }
    combined
}
