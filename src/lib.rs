//! Prompt Optimizer - Shrink long Markdown system prompts without losing structure
//!
//! This library estimates where a prompt wastes tokens and rewrites it through a
//! fixed, heading-aware pipeline.
//!
//! ## Key Features
//!
//! - **Analysis**: Per-category savings estimates with priorities and recommendations
//! - **Section Merging**: Fold sections whose headings overlap into their first occurrence
//! - **Example Consolidation**: Keep the first two and the last example block
//! - **Phrase Rewriting**: Drop filler phrases and tidy formatting
//! - **Reports**: JSON and Markdown reports of every run

pub mod analysis;
pub mod config;
pub mod document;
pub mod metrics;
pub mod optimization;
pub mod report;
pub mod terminal;

pub use analysis::{analyze, Analysis, Opportunity, OpportunityKind, Priority};
pub use config::{Config, ConfigBuilder, ConfigError};
pub use document::{Document, HeadingSignature, Section};
pub use metrics::{Reduction, TextStats};
pub use optimization::{
    OptimizationConfig, OptimizationEvent, OptimizationReport, OptimizationStrategy,
    PromptOptimizer,
};
pub use terminal::TerminalRenderer;
