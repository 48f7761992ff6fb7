//! Pipeline orchestration: runs every stage in order and builds the report

use super::{
    AggressivePass, ExampleConsolidator, FormattingCleaner, OptimizationConfig,
    OptimizationEvent, OptimizationReport, OptimizationStrategy, PhraseRewriter, SectionMerger,
    SentenceSimplifier,
};
use crate::analysis::{self, Analysis};
use crate::metrics::{word_count, Reduction, TextStats, DEFAULT_TARGET_RATIO, TOKENS_PER_WORD};
use chrono::Utc;
use tracing::{debug, warn};

/// Words whose disappearance suggests a section was lost
pub const QUALITY_MARKERS: &[&str] = &["role", "mission", "workflow", "example"];

/// Prompt optimizer that applies the stages in a fixed order:
/// redundancy, verbosity, merge, examples, formatting, then the optional
/// aggressive pass.
pub struct PromptOptimizer {
    config: OptimizationConfig,
    strategies: Vec<Box<dyn OptimizationStrategy>>,
}

impl PromptOptimizer {
    pub fn new(config: OptimizationConfig) -> Self {
        let mut strategies: Vec<Box<dyn OptimizationStrategy>> = vec![
            Box::new(PhraseRewriter),
            Box::new(SentenceSimplifier),
            Box::new(SectionMerger),
            Box::new(ExampleConsolidator),
            Box::new(FormattingCleaner),
        ];
        if config.aggressive {
            strategies.push(Box::new(AggressivePass));
        }

        Self { config, strategies }
    }

    pub fn config(&self) -> &OptimizationConfig {
        &self.config
    }

    /// Stage names in execution order
    pub fn stages(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Estimate savings without rewriting
    pub fn analyze(&self, prompt: &str) -> Analysis {
        analysis::analyze(prompt)
    }

    /// Run the full pipeline over a prompt
    pub fn optimize(&self, prompt: &str) -> (String, OptimizationReport) {
        let original_stats = TextStats::of(prompt);
        let target_tokens = self.config.target_tokens.unwrap_or_else(|| {
            (original_stats.words as f64 * TOKENS_PER_WORD * DEFAULT_TARGET_RATIO) as usize
        });

        let mut optimized = prompt.to_string();
        let mut applied: Vec<OptimizationEvent> = Vec::new();

        for strategy in &self.strategies {
            let output = strategy.apply(&optimized);
            debug!(
                stage = strategy.name(),
                words_before = word_count(&optimized),
                words_after = word_count(&output.text),
                events = output.events.len(),
                "Applied optimization stage"
            );
            applied.extend(output.events);
            optimized = output.text;
        }

        let optimized_stats = TextStats::of(&optimized);
        let reduction = Reduction::between(&original_stats, &optimized_stats);
        let quality_maintained = quality_maintained(prompt, &optimized);
        if !quality_maintained {
            warn!("Key sections may have been lost during optimization");
        }

        let report = OptimizationReport {
            timestamp: Utc::now(),
            original_stats,
            optimized_stats,
            target_tokens,
            optimizations_applied: applied,
            quality_maintained,
            achieved_target: optimized_stats.estimated_tokens <= target_tokens,
            token_reduction: reduction.tokens,
            reduction_percentage: reduction.percentage,
        };

        (optimized, report)
    }
}

impl Default for PromptOptimizer {
    fn default() -> Self {
        Self::new(OptimizationConfig::default())
    }
}

/// True unless two or more marker words present in the original are gone
pub fn quality_maintained(original: &str, optimized: &str) -> bool {
    let original = original.to_lowercase();
    let optimized = optimized.to_lowercase();

    let lost = QUALITY_MARKERS
        .iter()
        .filter(|marker| original.contains(*marker) && !optimized.contains(*marker))
        .count();

    lost <= 1
}
