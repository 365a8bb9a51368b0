//! koreplan CLI - Command line interface for the Korea travel planner
//!
//! Generates travel plans through a chat backend and renders plan text to
//! HTML for display or PDF export.

mod commands;

use clap::{Parser, Subcommand};
use koreplan_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{GenerateArgs, RenderArgs};

/// koreplan: Korea travel plans, generated and rendered
#[derive(Parser, Debug)]
#[command(name = "koreplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Chat API base URL (overrides config and env)
    #[arg(long, global = true, env = "KOREPLAN_API_BASE")]
    api_base: Option<String>,

    /// Model to use (overrides config and env)
    #[arg(long, global = true, env = "KOREPLAN_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Render plan text to HTML
    Render(RenderArgs),

    /// Generate a travel plan
    #[command(visible_alias = "gen")]
    Generate(GenerateArgs),

    /// Show current configuration
    Config {
        /// Create a secrets file template if none exists
        #[arg(long)]
        init_secrets: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = Config::load_with_overrides(cli.api_base.clone(), cli.model.clone())?;

    if cli.verbose {
        tracing::info!(
            base_url = %config.api.base_url,
            model = %config.api.model,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("koreplan {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Render(args)) => {
            args.execute(cli.verbose, &config)?;
        }
        Some(Commands::Generate(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Config { init_secrets }) => {
            if init_secrets {
                let path = Secrets::create_template()?;
                println!("Secrets template: {}", path.display());
                println!();
            }
            print_config(&config)?;
        }
        None => {
            println!("koreplan - Korea travel plans, generated and rendered");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn print_config(config: &Config) -> anyhow::Result<()> {
    println!("koreplan Configuration");
    println!("======================");
    println!();
    println!("Render Settings:");
    println!("  stale_year: {}", config.render.stale_year);
    match config.render.current_year {
        Some(year) => println!("  current_year: {}", year),
        None => println!("  current_year: (local calendar year)"),
    }
    println!("  max_input_bytes: {}", config.render.max_input_bytes);
    println!();
    println!("API Settings:");
    println!("  base_url: {}", config.api.base_url);
    println!("  model: {}", config.api.model);
    println!("  timeout: {:?}", config.api.timeout);
    println!();
    println!("Retry Settings:");
    println!("  max_attempts: {}", config.retry.max_attempts);
    println!("  initial_delay: {:?}", config.retry.initial_delay);
    println!();
    println!("Limits:");
    println!("  requests_per_minute: {}", config.limits.requests_per_minute);
    println!();

    if let Some(path) = Config::default_config_path() {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }

    let secrets = Secrets::load()?;
    if let Some(path) = Secrets::default_secrets_path() {
        println!("Secrets file: {}", path.display());
    }
    if secrets.api_key().is_some() {
        println!("  API key: configured");
    } else {
        println!("  API key: missing (set DEEPSEEK_API_KEY or run `koreplan config --init-secrets`)");
    }

    Ok(())
}
