//! Terminal color definitions

use crossterm::style::Color;

/// Colors for CLI summaries
pub struct Theme {
    /// Banner/title lines
    pub title: Color,
    /// Labels and secondary info
    pub dim: Color,
    /// Token counts and percentages
    pub stats: Color,
    pub success: Color,
    /// Review-needed and missed-target notices
    pub warning: Color,
    pub error: Color,
    /// High-priority opportunities
    pub high: Color,
    pub medium: Color,
    pub low: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Color::Magenta,
            dim: Color::DarkGrey,
            stats: Color::Blue,
            success: Color::Green,
            warning: Color::DarkYellow,
            error: Color::Red,
            high: Color::Red,
            medium: Color::Yellow,
            low: Color::Green,
        }
    }
}
