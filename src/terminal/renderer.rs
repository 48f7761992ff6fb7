//! Styled CLI summaries and markdown report rendering

use crossterm::style::{Color, Stylize};
use termimad::MadSkin;

use super::theme::Theme;
use crate::analysis::{Analysis, Priority};
use crate::optimization::OptimizationReport;

/// Opportunities listed in the analysis summary
const SUMMARY_OPPORTUNITIES: usize = 3;

/// Terminal renderer with markdown and styled output
pub struct TerminalRenderer {
    theme: Theme,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        let theme = Theme::default();
        let skin = Self::build_skin(&theme);
        Self { theme, skin }
    }

    fn build_skin(theme: &Theme) -> MadSkin {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(to_termimad_color(theme.title));
        skin.bold.set_fg(to_termimad_color(Color::White));
        skin.italic.set_fg(to_termimad_color(theme.dim));
        skin.inline_code.set_fg(to_termimad_color(theme.success));
        skin
    }

    fn rule(&self, title: &str) {
        let line = "=".repeat(60);
        println!("\n{}", line.as_str().with(self.theme.dim));
        println!("{}", title.with(self.theme.title));
        println!("{}", line.as_str().with(self.theme.dim));
    }

    fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.theme.high,
            Priority::Medium => self.theme.medium,
            Priority::Low => self.theme.low,
        }
    }

    /// Summary printed after an analysis run
    pub fn render_analysis_summary(&self, analysis: &Analysis) {
        self.rule("Analysis Results");
        println!(
            "{} ~{} tokens",
            "Original:".with(self.theme.dim),
            analysis.original_stats.estimated_tokens.to_string().with(self.theme.stats)
        );
        println!(
            "{} ~{} tokens",
            "Potential Savings:".with(self.theme.dim),
            analysis.estimated_savings.to_string().with(self.theme.stats)
        );

        if analysis.opportunities.is_empty() {
            self.render_success("Prompt is already well-optimized");
            return;
        }

        println!("\nTop Opportunities:");
        for opportunity in analysis.opportunities.iter().take(SUMMARY_OPPORTUNITIES) {
            println!(
                "  {} {}: ~{} tokens",
                "\u{25CF}".with(self.priority_color(opportunity.priority)),
                opportunity.description,
                opportunity.estimated_savings.to_string().with(self.theme.stats)
            );
        }
    }

    /// Summary printed after an optimize run
    pub fn render_optimization_summary(&self, report: &OptimizationReport) {
        self.rule("Optimization Complete");
        println!(
            "{} ~{} tokens",
            "Original:".with(self.theme.dim),
            report.original_stats.estimated_tokens.to_string().with(self.theme.stats)
        );
        println!(
            "{} ~{} tokens",
            "Optimized:".with(self.theme.dim),
            report.optimized_stats.estimated_tokens.to_string().with(self.theme.stats)
        );
        println!(
            "{} {} tokens ({:.1}%)",
            "Savings:".with(self.theme.dim),
            report.token_reduction.to_string().with(self.theme.stats),
            report.reduction_percentage
        );

        if report.quality_maintained {
            self.render_success("Quality: maintained");
        } else {
            self.render_warning("Quality: review needed");
        }
        if !report.achieved_target {
            self.render_warning(&format!("Target of {} tokens not reached", report.target_tokens));
        }
    }

    /// Render a markdown document with the theme's skin
    pub fn render_markdown(&self, content: &str) {
        println!();
        self.skin.print_text(content);
    }

    pub fn render_success(&self, msg: &str) {
        println!("  {} {}", "\u{2713}".with(self.theme.success), msg.with(self.theme.success));
    }

    pub fn render_warning(&self, msg: &str) {
        println!("  {} {}", "\u{26A0}".with(self.theme.warning), msg.with(self.theme.warning));
    }

    pub fn render_error(&self, msg: &str) {
        println!("  {} {}", "\u{2717}".with(self.theme.error), msg.with(self.theme.error));
    }

    /// Render info text
    pub fn render_info(&self, msg: &str) {
        println!("  {}", msg.with(self.theme.dim));
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert crossterm Color to termimad color
fn to_termimad_color(color: Color) -> termimad::crossterm::style::Color {
    use termimad::crossterm::style::Color as MadColor;

    match color {
        Color::Black => MadColor::Black,
        Color::DarkGrey => MadColor::DarkGrey,
        Color::Red => MadColor::Red,
        Color::DarkRed => MadColor::DarkRed,
        Color::Green => MadColor::Green,
        Color::DarkGreen => MadColor::DarkGreen,
        Color::Yellow => MadColor::Yellow,
        Color::DarkYellow => MadColor::DarkYellow,
        Color::Blue => MadColor::Blue,
        Color::DarkBlue => MadColor::DarkBlue,
        Color::Magenta => MadColor::Magenta,
        Color::DarkMagenta => MadColor::DarkMagenta,
        Color::Cyan => MadColor::Cyan,
        Color::DarkCyan => MadColor::DarkCyan,
        Color::White => MadColor::White,
        Color::Grey => MadColor::Grey,
        _ => MadColor::Reset,
    }
}
