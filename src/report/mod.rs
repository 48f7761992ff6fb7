//! Human-readable Markdown reports
//!
//! JSON reports are the serde form of [`Analysis`] and
//! [`OptimizationReport`]; this module renders the Markdown companions that
//! the CLI writes next to them.

use crate::analysis::{Analysis, Priority};
use crate::optimization::OptimizationReport;

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "\u{1F534}",
        Priority::Medium => "\u{1F7E1}",
        Priority::Low => "\u{1F7E2}",
    }
}

/// Format an integer with comma thousands separators
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn footer() -> String {
    format!(
        "\n---\n\n*Generated by Prompt Optimizer v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}

fn yes_no(flag: bool, no: &str) -> &str {
    if flag {
        "\u{2705} Yes"
    } else {
        no
    }
}

/// Markdown report for an analysis run
pub fn render_analysis(analysis: &Analysis, file_name: &str) -> String {
    let stats = &analysis.original_stats;

    let mut report = format!(
        "# Prompt Optimization Analysis\n\n\
         **File:** `{file_name}`\n\
         **Analyzed:** {analyzed}\n\n\
         ## Current Statistics\n\n\
         - **Characters:** {characters}\n\
         - **Words:** {words}\n\
         - **Est. Tokens:** ~{tokens}\n\
         - **Lines:** {lines}\n\
         - **Sections:** {sections}\n\n\
         ## Optimization Opportunities\n\n\
         **Total Potential Savings:** ~{savings} tokens\n\n",
        analyzed = analysis.timestamp.to_rfc3339(),
        characters = thousands(stats.characters),
        words = thousands(stats.words),
        tokens = thousands(stats.estimated_tokens),
        lines = thousands(stats.lines),
        sections = stats.sections,
        savings = analysis.estimated_savings,
    );

    for opportunity in &analysis.opportunities {
        report.push_str(&format!(
            "\n### {} {}\n\
             - **Type:** {}\n\
             - **Priority:** {}\n\
             - **Est. Savings:** ~{} tokens\n",
            priority_marker(opportunity.priority),
            opportunity.description,
            opportunity.kind.as_str(),
            opportunity.priority.as_str(),
            opportunity.estimated_savings,
        ));
    }

    report.push_str("\n## Recommendations\n\n");
    for recommendation in &analysis.recommendations {
        report.push_str(&format!("- {recommendation}\n"));
    }

    report.push_str(&footer());
    report
}

/// Markdown report for an optimize run
pub fn render_optimization(result: &OptimizationReport, file_name: &str) -> String {
    let mut report = format!(
        "# Prompt Optimization Report\n\n\
         **File:** `{file_name}`\n\
         **Optimized:** {optimized}\n\n\
         ## Results\n\n\
         ### Before Optimization\n\
         - **Words:** {words_before}\n\
         - **Est. Tokens:** ~{tokens_before}\n\n\
         ### After Optimization\n\
         - **Words:** {words_after}\n\
         - **Est. Tokens:** ~{tokens_after}\n\n\
         ### Savings\n\
         - **Token Reduction:** {reduction} tokens\n\
         - **Reduction:** {percentage:.1}%\n\
         - **Target Achieved:** {target}\n\
         - **Quality Maintained:** {quality}\n\n\
         ## Optimizations Applied\n\n",
        optimized = result.timestamp.to_rfc3339(),
        words_before = thousands(result.original_stats.words),
        tokens_before = thousands(result.original_stats.estimated_tokens),
        words_after = thousands(result.optimized_stats.words),
        tokens_after = thousands(result.optimized_stats.estimated_tokens),
        reduction = result.token_reduction,
        percentage = result.reduction_percentage,
        target = yes_no(result.achieved_target, "\u{274C} No"),
        quality = yes_no(result.quality_maintained, "\u{26A0}\u{FE0F} Review Needed"),
    );

    for applied in &result.optimizations_applied {
        report.push_str(&format!("- \u{2705} {applied}\n"));
    }

    report.push_str(&footer());
    report
}
