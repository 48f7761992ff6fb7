//! Configuration management for Prompt Optimizer
//!
//! Supports configuration via:
//! 1. Config file (~/.config/prompt-optimizer/config.toml)
//! 2. Environment variables (PROMPT_OPTIMIZER_AGGRESSIVE, etc.)
//! 3. CLI arguments (override file/env settings)

use crate::optimization::OptimizationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const ENV_AGGRESSIVE: &str = "PROMPT_OPTIMIZER_AGGRESSIVE";
pub const ENV_TARGET_TOKENS: &str = "PROMPT_OPTIMIZER_TARGET_TOKENS";
pub const ENV_MARKDOWN_REPORT: &str = "PROMPT_OPTIMIZER_MARKDOWN_REPORT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pipeline settings
    pub optimization: OptimizationSettings,

    /// Report output settings
    pub report: ReportSettings,
}

/// Optimization settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationSettings {
    /// Run the aggressive pass after the standard stages
    pub aggressive: bool,

    /// Target token budget (unset means 60% of the original word count)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_tokens: Option<usize>,
}

/// Report settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Write the Markdown report next to the prompt or output file
    pub markdown: bool,

    /// Print the Markdown report to the terminal
    pub render: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            markdown: true,
            render: false,
        }
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string(), value.to_string()))
}

impl Config {
    /// Get default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("prompt-optimizer")
            .join("config.toml")
    }

    /// Load config from default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    /// Load config from specific path, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::read_file(path)?.with_env_overrides()
    }

    /// Parse the file alone, without environment overrides
    pub fn read_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Parse an existing config file, failing if it is missing
    pub fn load_existing(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::read_file(path)
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_AGGRESSIVE) {
            self.optimization.aggressive = parse_value(ENV_AGGRESSIVE, &value)?;
        }
        if let Some(value) = lookup(ENV_TARGET_TOKENS) {
            self.optimization.target_tokens = Some(parse_value(ENV_TARGET_TOKENS, &value)?);
        }
        if let Some(value) = lookup(ENV_MARKDOWN_REPORT) {
            self.report.markdown = parse_value(ENV_MARKDOWN_REPORT, &value)?;
        }

        Ok(self)
    }

    /// Set a single `section.key` value from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "optimization.aggressive" => self.optimization.aggressive = parse_value(key, value)?,
            "optimization.target_tokens" => {
                self.optimization.target_tokens = match value.trim() {
                    "" | "none" => None,
                    v => Some(parse_value(key, v)?),
                }
            }
            "report.markdown" => self.report.markdown = parse_value(key, value)?,
            "report.render" => self.report.render = parse_value(key, value)?,
            _ => return Err(ConfigError::InvalidValue(key.to_string(), value.to_string())),
        }
        Ok(())
    }

    /// Save config to default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path())
    }

    /// Save config to specific path
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Reject values the pipeline cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.optimization.target_tokens == Some(0) {
            return Err(ConfigError::InvalidValue(
                "optimization.target_tokens".to_string(),
                "0".to_string(),
            ));
        }
        Ok(())
    }

    /// Options value for [`crate::optimization::PromptOptimizer`]
    pub fn to_optimization_config(&self) -> OptimizationConfig {
        OptimizationConfig {
            aggressive: self.optimization.aggressive,
            target_tokens: self.optimization.target_tokens,
        }
    }

    /// Generate example config content
    pub fn example() -> String {
        toml::to_string_pretty(&Config::default()).unwrap_or_default()
    }
}

/// Builder for creating Config programmatically
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn aggressive(mut self, aggressive: bool) -> Self {
        self.config.optimization.aggressive = aggressive;
        self
    }

    pub fn target_tokens(mut self, tokens: usize) -> Self {
        self.config.optimization.target_tokens = Some(tokens);
        self
    }

    pub fn markdown_report(mut self, enabled: bool) -> Self {
        self.config.report.markdown = enabled;
        self
    }

    pub fn render_report(mut self, enabled: bool) -> Self {
        self.config.report.render = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.optimization.aggressive);
        assert_eq!(config.optimization.target_tokens, None);
        assert!(config.report.markdown);
        assert!(!config.report.render);
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .aggressive(true)
            .target_tokens(800)
            .markdown_report(false)
            .build();

        assert!(config.optimization.aggressive);
        assert_eq!(config.optimization.target_tokens, Some(800));
        assert!(!config.report.markdown);

        let options = config.to_optimization_config();
        assert!(options.aggressive);
        assert_eq!(options.target_tokens, Some(800));
    }

    #[test]
    fn test_example_config() {
        let example = Config::example();
        assert!(example.contains("[optimization]"));
        assert!(example.contains("[report]"));
        assert!(example.contains("markdown = true"));
        assert!(!example.contains("target_tokens"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[optimization]\naggressive = true\n").unwrap();
        assert!(config.optimization.aggressive);
        assert!(config.report.markdown);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = ConfigBuilder::new().target_tokens(1200).render_report(true).build();
        config.save_to(&path).unwrap();

        assert_eq!(Config::read_file(&path).unwrap(), config);
        assert_eq!(Config::load_existing(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert_eq!(Config::read_file(&path).unwrap(), Config::default());
        assert!(matches!(
            Config::load_existing(&path),
            Err(ConfigError::NotFound(p)) if p == path
        ));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[optimization\naggressive = ").unwrap();

        assert!(matches!(Config::read_file(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_AGGRESSIVE, "true"),
            (ENV_TARGET_TOKENS, "500"),
            (ENV_MARKDOWN_REPORT, "false"),
        ]
        .into_iter()
        .collect();

        let config = Config::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert!(config.optimization.aggressive);
        assert_eq!(config.optimization.target_tokens, Some(500));
        assert!(!config.report.markdown);
    }

    #[test]
    fn test_invalid_env_value() {
        let result = Config::default().with_overrides(|key| {
            (key == ENV_TARGET_TOKENS).then(|| "lots".to_string())
        });

        match result {
            Err(ConfigError::InvalidValue(key, value)) => {
                assert_eq!(key, ENV_TARGET_TOKENS);
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();
        config.set("optimization.aggressive", "true").unwrap();
        config.set("optimization.target_tokens", "300").unwrap();
        config.set("report.render", "true").unwrap();
        assert!(config.optimization.aggressive);
        assert_eq!(config.optimization.target_tokens, Some(300));
        assert!(config.report.render);

        config.set("optimization.target_tokens", "none").unwrap();
        assert_eq!(config.optimization.target_tokens, None);

        assert!(config.set("report.markdown", "maybe").is_err());
        assert!(config.set("cache.size", "1").is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());
        assert!(ConfigBuilder::new().target_tokens(0).build().validate().is_err());
    }
}
