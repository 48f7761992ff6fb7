//! Optimization strategies for reducing prompt length

mod aggressive;
mod consolidator;
mod formatting;
mod merger;
mod pipeline;
mod rewriter;

pub use aggressive::AggressivePass;
pub use consolidator::ExampleConsolidator;
pub use formatting::FormattingCleaner;
pub use merger::SectionMerger;
pub use pipeline::{quality_maintained, PromptOptimizer, QUALITY_MARKERS};
pub use rewriter::{PhraseRewriter, SentenceSimplifier};

use crate::metrics::TextStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options for one optimize run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationConfig {
    /// Run the lossy pass after the default pipeline
    pub aggressive: bool,
    /// Token budget; defaults to 60% of the original word count
    pub target_tokens: Option<usize>,
}

/// One applied change, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptimizationEvent {
    pub description: String,
}

impl OptimizationEvent {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl fmt::Display for OptimizationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Text produced by a strategy plus what it changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOutput {
    pub text: String,
    pub events: Vec<OptimizationEvent>,
}

impl StrategyOutput {
    /// Input passed through untouched
    pub fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            events: Vec::new(),
        }
    }
}

/// A single pipeline stage. Stages never mutate their input.
pub trait OptimizationStrategy: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, text: &str) -> StrategyOutput;
}

/// Result of an optimize run, minus the optimized text itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub timestamp: DateTime<Utc>,
    pub original_stats: TextStats,
    pub optimized_stats: TextStats,
    pub target_tokens: usize,
    pub optimizations_applied: Vec<OptimizationEvent>,
    /// False when more than one key marker word disappeared
    pub quality_maintained: bool,
    pub achieved_target: bool,
    pub token_reduction: i64,
    pub reduction_percentage: f64,
}
