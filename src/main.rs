//! Prompt Optimizer CLI - Analyze and shrink Markdown system prompts

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prompt_optimizer::{
    config::{self, Config},
    optimization::PromptOptimizer,
    report,
    terminal::TerminalRenderer,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prompt_optimizer")]
#[command(about = "Reduce token usage of heading-structured prompts while keeping their sections")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate savings without rewriting the prompt
    Analyze {
        /// Prompt file to analyze
        #[arg(short, long)]
        prompt: PathBuf,

        /// Write the JSON analysis to this file
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Rewrite a prompt and report what changed
    Optimize {
        /// Prompt file to optimize
        #[arg(short, long)]
        prompt: PathBuf,

        /// Where to write the optimized prompt
        #[arg(short, long)]
        output: PathBuf,

        /// Target token count (default: 60% of the original word count)
        #[arg(short, long)]
        target_tokens: Option<usize>,

        /// Also keep only the first example and tidy headings
        #[arg(long)]
        aggressive: bool,

        /// Write the JSON report to this file
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize configuration file with defaults
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., optimization.aggressive, report.render)
        key: String,

        /// Value to set
        value: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            TerminalRenderer::new().render_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Analyze { prompt, report } => {
            run_analyze(&prompt, Config::load()?, report.as_deref()).await?;
        }
        Commands::Optimize {
            prompt,
            output,
            target_tokens,
            aggressive,
            report,
        } => {
            let mut config = Config::load()?;
            if aggressive {
                config.optimization.aggressive = true;
            }
            if target_tokens.is_some() {
                config.optimization.target_tokens = target_tokens;
            }
            run_optimize(&prompt, &output, config, report.as_deref()).await?;
        }
        Commands::Config(cmd) => {
            run_config_command(cmd)?;
        }
    }

    Ok(())
}

async fn read_prompt(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read prompt file: {}", path.display()))
}

/// Sibling of `path` named `<stem><suffix>`
fn companion_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "prompt".to_string());
    path.with_file_name(format!("{stem}{suffix}"))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn run_analyze(prompt_path: &Path, config: Config, json_path: Option<&Path>) -> Result<()> {
    let renderer = TerminalRenderer::new();

    info!("Analyzing prompt: {}", prompt_path.display());
    let prompt = read_prompt(prompt_path).await?;

    let optimizer = PromptOptimizer::new(config.to_optimization_config());
    let analysis = optimizer.analyze(&prompt);
    renderer.render_analysis_summary(&analysis);

    if let Some(path) = json_path {
        tokio::fs::write(path, serde_json::to_string_pretty(&analysis)?).await?;
        renderer.render_info(&format!("Analysis written to: {}", path.display()));
    }

    let markdown = report::render_analysis(&analysis, &display_name(prompt_path));
    if config.report.markdown {
        let md_path = companion_path(prompt_path, "-analysis.md");
        tokio::fs::write(&md_path, &markdown).await?;
        renderer.render_info(&format!("Markdown report: {}", md_path.display()));
    }
    if config.report.render {
        renderer.render_markdown(&markdown);
    }

    Ok(())
}

async fn run_optimize(
    prompt_path: &Path,
    output_path: &Path,
    config: Config,
    json_path: Option<&Path>,
) -> Result<()> {
    config.validate()?;

    let renderer = TerminalRenderer::new();
    let optimizer = PromptOptimizer::new(config.to_optimization_config());

    info!(
        stages = ?optimizer.stages(),
        target_tokens = ?optimizer.config().target_tokens,
        "Optimizing prompt: {}",
        prompt_path.display()
    );
    let prompt = read_prompt(prompt_path).await?;

    let (optimized, result) = optimizer.optimize(&prompt);

    tokio::fs::write(output_path, &optimized)
        .await
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;
    info!("Optimized prompt written to: {}", output_path.display());

    renderer.render_optimization_summary(&result);

    if let Some(path) = json_path {
        tokio::fs::write(path, serde_json::to_string_pretty(&result)?).await?;
        renderer.render_info(&format!("Report written to: {}", path.display()));
    }

    let markdown = report::render_optimization(&result, &display_name(prompt_path));
    if config.report.markdown {
        let md_path = companion_path(output_path, "-optimization-report.md");
        tokio::fs::write(&md_path, &markdown).await?;
        renderer.render_info(&format!("Markdown report: {}", md_path.display()));
    }
    if config.report.render {
        renderer.render_markdown(&markdown);
    }

    Ok(())
}

fn run_config_command(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { force } => config_init(force)?,
        ConfigCommands::Show => config_show()?,
        ConfigCommands::Path => config_path(),
        ConfigCommands::Set { key, value } => config_set(&key, &value)?,
    }
    Ok(())
}

fn config_init(force: bool) -> Result<()> {
    let renderer = TerminalRenderer::new();
    let path = Config::default_path();

    if path.exists() && !force {
        renderer.render_warning(&format!(
            "Configuration file already exists at: {}",
            path.display()
        ));
        renderer.render_info("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save()?;
    renderer.render_success(&format!("Configuration file created at: {}", path.display()));

    Ok(())
}

fn config_show() -> Result<()> {
    let config = Config::load()?;
    println!("{}", toml::to_string_pretty(&config)?);

    println!("--- Environment Variables ---");
    for key in [
        config::ENV_AGGRESSIVE,
        config::ENV_TARGET_TOKENS,
        config::ENV_MARKDOWN_REPORT,
    ] {
        println!(
            "{}: {}",
            key,
            std::env::var(key).unwrap_or_else(|_| "not set".to_string())
        );
    }

    Ok(())
}

fn config_set(key: &str, value: &str) -> Result<()> {
    let path = Config::default_path();
    let mut config = Config::read_file(&path)?;

    config.set(key, value)?;
    config.validate()?;
    config.save()?;

    TerminalRenderer::new().render_success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn config_path() {
    let path = Config::default_path();
    println!("{}", path.display());

    if path.exists() {
        println!("(file exists)");
    } else {
        println!("(file does not exist - run 'config init' to create)");
    }
}
