//! Analysis mode: estimate savings without touching the prompt

pub mod scanner;

use crate::metrics::TextStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of opportunities turned into recommendations
const MAX_RECOMMENDATIONS: usize = 5;

/// Tokens to words, for the savings summary line
const WORDS_PER_TOKEN: f64 = 1.33;

/// Category of a savings opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    Redundancy,
    Verbosity,
    SectionMerge,
    Examples,
    Formatting,
    Language,
}

impl OpportunityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityKind::Redundancy => "redundancy",
            OpportunityKind::Verbosity => "verbosity",
            OpportunityKind::SectionMerge => "section_merge",
            OpportunityKind::Examples => "examples",
            OpportunityKind::Formatting => "formatting",
            OpportunityKind::Language => "language",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OpportunityKind::Redundancy => "Remove redundant phrases and repetitive content",
            OpportunityKind::Verbosity => "Simplify verbose explanations",
            OpportunityKind::SectionMerge => "Merge similar or overlapping sections",
            OpportunityKind::Examples => "Consolidate or reduce redundant examples",
            OpportunityKind::Formatting => "Remove excessive formatting and whitespace",
            OpportunityKind::Language => "Simplify complex language patterns",
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            OpportunityKind::Redundancy | OpportunityKind::SectionMerge => Priority::High,
            OpportunityKind::Verbosity | OpportunityKind::Examples | OpportunityKind::Language => {
                Priority::Medium
            }
            OpportunityKind::Formatting => Priority::Low,
        }
    }

    fn estimate(&self, text: &str) -> usize {
        match self {
            OpportunityKind::Redundancy => scanner::redundancy_savings(text),
            OpportunityKind::Verbosity => scanner::verbosity_savings(text),
            OpportunityKind::SectionMerge => scanner::merge_savings(text),
            OpportunityKind::Examples => scanner::example_savings(text),
            OpportunityKind::Formatting => scanner::formatting_savings(text),
            OpportunityKind::Language => scanner::language_savings(text),
        }
    }

    /// All categories in report order
    pub const ALL: [OpportunityKind; 6] = [
        OpportunityKind::Redundancy,
        OpportunityKind::Verbosity,
        OpportunityKind::SectionMerge,
        OpportunityKind::Examples,
        OpportunityKind::Formatting,
        OpportunityKind::Language,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// One category with a non-zero estimated saving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    pub description: String,
    pub estimated_savings: usize,
    pub priority: Priority,
}

/// Result of analyzing a prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub timestamp: DateTime<Utc>,
    pub original_stats: TextStats,
    pub opportunities: Vec<Opportunity>,
    /// Sum of all opportunity estimates
    pub estimated_savings: usize,
    pub recommendations: Vec<String>,
}

/// Scan a prompt and report where tokens could be saved
pub fn analyze(text: &str) -> Analysis {
    let opportunities: Vec<Opportunity> = OpportunityKind::ALL
        .iter()
        .filter_map(|kind| {
            let savings = kind.estimate(text);
            debug!(kind = kind.as_str(), savings, "Estimated opportunity");
            (savings > 0).then(|| Opportunity {
                kind: *kind,
                description: kind.description().to_string(),
                estimated_savings: savings,
                priority: kind.priority(),
            })
        })
        .collect();

    let estimated_savings = opportunities.iter().map(|o| o.estimated_savings).sum();
    let recommendations = recommendations(&opportunities, estimated_savings);

    Analysis {
        timestamp: Utc::now(),
        original_stats: TextStats::of(text),
        opportunities,
        estimated_savings,
        recommendations,
    }
}

/// Top opportunities by savings, then a total line
fn recommendations(opportunities: &[Opportunity], total: usize) -> Vec<String> {
    let mut ranked: Vec<&Opportunity> = opportunities.iter().collect();
    ranked.sort_by(|a, b| b.estimated_savings.cmp(&a.estimated_savings));

    let mut lines: Vec<String> = ranked
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|o| format!("{} (save ~{} tokens)", o.description, o.estimated_savings))
        .collect();

    if total > 0 {
        lines.push(format!(
            "Total potential savings: ~{} tokens ({:.0} words)",
            total,
            total as f64 * WORDS_PER_TOKEN
        ));
    } else {
        lines.push("Prompt is already well-optimized".to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_prompt_has_no_opportunities() {
        let analysis = analyze("# Role\nYou answer questions.\n");
        assert!(analysis.opportunities.is_empty());
        assert_eq!(analysis.estimated_savings, 0);
        assert_eq!(analysis.recommendations, vec!["Prompt is already well-optimized"]);
    }

    #[test]
    fn test_opportunities_in_category_order() {
        let text = "## Code Review Rules\nIt is important to note that we leverage tools!!!\n\n\n\n## Review Rules\nIn order to pass.\n";
        let analysis = analyze(text);
        let kinds: Vec<OpportunityKind> = analysis.opportunities.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![
                OpportunityKind::Redundancy,
                OpportunityKind::SectionMerge,
                OpportunityKind::Formatting,
                OpportunityKind::Language,
            ]
        );
        assert_eq!(analysis.estimated_savings, 70 + 100 + 8 + 5);
    }

    #[test]
    fn test_recommendations_ranked_by_savings() {
        let text = "## Code Review Rules\nIt is important to note that we leverage tools.\n## Review Rules\nx\n";
        let analysis = analyze(text);
        assert_eq!(
            analysis.recommendations,
            vec![
                "Merge similar or overlapping sections (save ~100 tokens)".to_string(),
                "Remove redundant phrases and repetitive content (save ~50 tokens)".to_string(),
                "Simplify complex language patterns (save ~5 tokens)".to_string(),
                "Total potential savings: ~155 tokens (206 words)".to_string(),
            ]
        );
    }

    #[test]
    fn test_analysis_serializes_with_type_key() {
        let analysis = analyze("Please note that this is it.\n");
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["opportunities"][0]["type"], "redundancy");
        assert_eq!(json["opportunities"][0]["priority"], "high");
        assert_eq!(json["estimated_savings"], 30);
        assert_eq!(json["original_stats"]["words"], 6);
    }
}
