use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tubescout::config::Config;
use tubescout::crawler::{ChannelDirectory, ChannelSearch, CrawlOrchestrator, CrawlReport, CrawlRequest};
use tubescout::keywords::catalog_filename;
use tubescout::storage::{CatalogStats, ChannelCatalog};
use tubescout::youtube::YouTubeClient;

/// Result of collecting one keyword into its catalog file
pub struct KeywordOutcome {
    pub file: PathBuf,
    pub report: CrawlReport,
    pub catalog: CatalogStats,
}

/// Build an orchestrator backed by the YouTube API
pub fn build_orchestrator(
    config: &Config,
) -> Result<CrawlOrchestrator<Arc<YouTubeClient>, Arc<YouTubeClient>>> {
    config.validate().context("Invalid configuration")?;

    let client = Arc::new(YouTubeClient::from_config(config).context("Failed to create API client")?);
    Ok(CrawlOrchestrator::new(client.clone(), client))
}

/// Crawl one keyword, merge with the existing catalog and save it
pub async fn collect_keyword<S: ChannelSearch, D: ChannelDirectory>(
    orchestrator: &CrawlOrchestrator<S, D>,
    config: &Config,
    keyword: &str,
    file: &Path,
) -> Result<KeywordOutcome> {
    let catalog = if config.crawler.update_mode {
        ChannelCatalog::load(file)
    } else {
        ChannelCatalog::new()
    };

    let request = CrawlRequest::new(keyword, config.crawler.target_per_keyword)
        .with_order(config.search_order())
        .domestic_only(config.crawler.domestic_only)
        .contactable_only(config.crawler.contactable_only);

    let report = orchestrator.crawl(&request, &catalog).await;

    let merged = catalog.merge(report.records.clone());
    ChannelCatalog::save(file, &merged)
        .with_context(|| format!("Failed to save catalog: {}", file.display()))?;

    Ok(KeywordOutcome {
        file: file.to_path_buf(),
        report,
        catalog: CatalogStats::from_records(&merged),
    })
}

pub async fn crawl(config: &Config, query: &str, output: Option<PathBuf>) -> Result<()> {
    let orchestrator = build_orchestrator(config)?;
    let file = output.unwrap_or_else(|| config.crawler.output_dir.join(catalog_filename(query)));

    println!("YouTube Channel Crawl: '{query}'");
    println!("=============================");
    println!("Catalog: {}", file.display());
    println!("Target: {} new channels", config.crawler.target_per_keyword);
    println!("Order: {}", config.search_order().korean_label());

    let outcome = collect_keyword(&orchestrator, config, query, &file).await?;
    print_outcome(&outcome, config);

    Ok(())
}

pub fn print_outcome(outcome: &KeywordOutcome, config: &Config) {
    let report = &outcome.report;
    let stats = &report.stats;

    println!("\nCrawl Summary");
    println!("=============");
    if stats.duplicates > 0 {
        println!("Skipped (already known): {}", stats.duplicates);
    }
    if config.crawler.domestic_only && stats.locale_filtered > 0 {
        println!("Filtered (not Korean): {}", stats.locale_filtered);
    }
    if config.crawler.contactable_only && stats.contact_filtered > 0 {
        println!("Filtered (no contact): {}", stats.contact_filtered);
    }
    println!("New channels: {}", report.records.len());
    if report.shortfall() > 0 {
        println!(
            "Target ({}) not reached, short by {} ({})",
            report.target,
            report.shortfall(),
            report.stop_reason.as_str()
        );
    }
    println!("Total channels: {}", outcome.catalog.total);
    println!(
        "Contactable: {}/{} ({:.1}%)",
        outcome.catalog.contactable,
        outcome.catalog.total,
        outcome.catalog.contactable_rate() * 100.0
    );
    println!("Saved: {}", outcome.file.display());
}
