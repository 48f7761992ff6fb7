//! Terminal output for the CLI

pub mod renderer;
pub mod theme;

pub use renderer::TerminalRenderer;
pub use theme::Theme;
