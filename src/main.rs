use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubescout::config::{Config, LoggingConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "tubescout",
    version,
    about = "Collect YouTube channels with contact information by keyword",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML config file (defaults to environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Options shared by the collecting commands
#[derive(Args, Debug, Clone)]
struct CrawlArgs {
    /// New channels to collect per keyword
    #[arg(short, long)]
    target: Option<usize>,

    /// Search order (relevance, date, viewCount)
    #[arg(long)]
    order: Option<String>,

    /// Keep channels from any country
    #[arg(long, default_value = "false")]
    all_locales: bool,

    /// Keep channels without contact information
    #[arg(long, default_value = "false")]
    allow_no_contact: bool,

    /// Ignore the existing catalog and start fresh
    #[arg(long, default_value = "false")]
    fresh: bool,

    /// Directory catalog files are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl CrawlArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(target) = self.target {
            config.crawler.target_per_keyword = target;
        }
        if let Some(order) = &self.order {
            config.crawler.order = order.clone();
        }
        if self.all_locales {
            config.crawler.domestic_only = false;
        }
        if self.allow_no_contact {
            config.crawler.contactable_only = false;
        }
        if self.fresh {
            config.crawler.update_mode = false;
        }
        if let Some(dir) = &self.output_dir {
            config.crawler.output_dir = dir.clone();
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Collect channels for a single search keyword
    Crawl {
        /// Search keyword
        query: String,

        /// Catalog file (defaults to youtube_channels_<keyword>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        args: CrawlArgs,
    },

    /// Collect channels for every keyword in a keyword file
    Run {
        /// Keyword file, one keyword per line
        #[arg(short, long)]
        keywords: Option<PathBuf>,

        /// Pause between keywords in seconds
        #[arg(long)]
        delay: Option<u64>,

        #[command(flatten)]
        args: CrawlArgs,
    },

    /// Show statistics for a catalog file
    Stats {
        /// Catalog file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    if cli.verbose {
        config.logging.level = String::from("debug");
    }

    // Initialize tracing/logging
    setup_tracing(&config.logging)?;

    tracing::info!("tubescout starting");

    match cli.command {
        Commands::Crawl {
            query,
            output,
            args,
        } => {
            args.apply(&mut config);
            tracing::info!(
                query = %query,
                target = config.crawler.target_per_keyword,
                output = ?output,
                "Starting crawl command"
            );
            commands::crawl(&config, &query, output).await?;
        }

        Commands::Run {
            keywords,
            delay,
            args,
        } => {
            args.apply(&mut config);
            if let Some(keywords) = keywords {
                config.crawler.keywords_file = keywords;
            }
            if let Some(delay) = delay {
                config.crawler.keyword_delay_secs = delay;
            }
            tracing::info!(
                keywords = %config.crawler.keywords_file.display(),
                target = config.crawler.target_per_keyword,
                "Starting run command"
            );
            commands::run(&config).await?;
        }

        Commands::Stats { file } => {
            tracing::info!(file = %file.display(), "Starting stats command");
            commands::stats(&file)?;
        }
    }

    tracing::info!("tubescout completed successfully");
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::from_env().context("Failed to load configuration from environment"),
    }
}

fn setup_tracing(logging: &LoggingConfig) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_new(logging.filter_directives())
        .with_context(|| format!("Invalid log level: {}", logging.level))?;

    if logging.is_json() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    Ok(())
}
