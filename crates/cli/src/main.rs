//! Behat Harness CLI
//!
//! Runs feature files through the external runner, renders parameter
//! input forms, and lists available features.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use behat_harness::{
    catalog, Config, ExecutionService, FeatureSource, FeatureTemplate, FormGenerator, RunResult,
};

mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "behat-harness")]
#[command(about = "Wrapper around an external Behat-style BDD runner")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(long, default_value = "behat-harness.toml", global = true)]
    config_file: PathBuf,

    /// Staging workspace directory (overrides the config file)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a feature file through the external runner
    Run {
        /// Feature file to run
        feature: PathBuf,

        /// Parameter values as key=value pairs
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Print the HTML input form for a feature file's parameters
    Form {
        /// Feature file to inspect
        feature: PathBuf,
    },

    /// List feature files in a directory
    List {
        /// Directory to scan (defaults to the configured features directory)
        dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(&cli.config_file)
        .with_context(|| format!("loading {}", cli.config_file.display()))?;
    if let Some(workspace) = &cli.workspace {
        config = config.with("workspace", workspace.display().to_string());
    }

    match cli.command {
        Commands::Run { feature, params } => run(&config, &feature, &params, cli.format),
        Commands::Form { feature } => form(&feature),
        Commands::List { dir } => list(&config, dir, cli.format),
    }
}

fn run(
    config: &Config,
    feature: &Path,
    raw_params: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let params = parse_pairs(raw_params)?;

    let source = FeatureSource::open(feature)?;
    let mut template = FeatureTemplate::from_source(&source)?;
    let mut service = ExecutionService::from_config(config);
    let result = service.execute(&mut template, &params)?;

    print_run(source.name(), &result, format);

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}

fn print_run(name: &str, result: &RunResult, format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        output::print_item(result, format);
        return;
    }

    for line in &result.output {
        println!("{line}");
    }
    println!();
    output::print_item(result, format);

    if result.success {
        println!("{} {}", "✓".green(), name.green());
    } else {
        println!("{} {}", "✗".red(), name.red());
    }
}

fn form(feature: &Path) -> anyhow::Result<()> {
    let source = FeatureSource::open(feature)?;
    let html = FormGenerator::new().generate(&source.contents()?);
    println!("{html}");
    Ok(())
}

fn list(config: &Config, dir: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let dir = dir
        .or_else(|| config.get(behat_harness::config::KEY_FEATURES).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let entries = catalog::list_features(&dir)?;
    output::print_list(&entries, format);
    Ok(())
}

/// Split `key=value` tokens, preserving the order they were given in.
fn parse_pairs(raw: &[String]) -> anyhow::Result<IndexMap<String, String>> {
    let mut params = IndexMap::new();
    for token in raw {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                params.insert(key.to_string(), value.to_string());
            }
            _ => bail!("invalid parameter '{token}', expected KEY=VALUE"),
        }
    }
    Ok(params)
}
