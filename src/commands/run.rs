use anyhow::Result;

use tubescout::config::Config;
use tubescout::error::{Error, TubescoutErrorTrait};
use tubescout::keywords::{catalog_filename, read_keywords, write_sample};

use super::crawl::{build_orchestrator, collect_keyword, print_outcome, KeywordOutcome};

/// Counts reported for a keyword that was collected
struct CollectedCounts {
    file: String,
    total: usize,
    new: usize,
    contactable: usize,
}

impl From<&KeywordOutcome> for CollectedCounts {
    fn from(outcome: &KeywordOutcome) -> Self {
        Self {
            file: outcome.file.display().to_string(),
            total: outcome.catalog.total,
            new: outcome.report.records.len(),
            contactable: outcome.catalog.contactable,
        }
    }
}

/// Per-keyword line of the final summary
struct KeywordSummary {
    keyword: String,
    result: std::result::Result<CollectedCounts, String>,
}

pub async fn run(config: &Config) -> Result<()> {
    let keywords_file = &config.crawler.keywords_file;

    if !keywords_file.exists() {
        write_sample(keywords_file)?;
        anyhow::bail!(
            "Keyword file {} not found; a sample was created, edit it and run again",
            keywords_file.display()
        );
    }

    let keywords = read_keywords(keywords_file)?;
    if keywords.is_empty() {
        anyhow::bail!("Keyword file {} is empty", keywords_file.display());
    }

    // Fails on a missing API key before any request is made
    let orchestrator = build_orchestrator(config)?;

    println!("YouTube Channel Batch Collection");
    println!("================================");
    println!("Keyword file: {}", keywords_file.display());
    println!("Keywords: {}", keywords.len());
    println!("Target per keyword: {}", config.crawler.target_per_keyword);
    println!("Korean only: {}", config.crawler.domestic_only);
    println!("Contact required: {}", config.crawler.contactable_only);
    println!("Order: {}", config.search_order().korean_label());
    for (i, keyword) in keywords.iter().enumerate() {
        println!("  {}. {keyword}", i + 1);
    }

    let mut summaries = Vec::with_capacity(keywords.len());

    for (idx, keyword) in keywords.iter().enumerate() {
        println!("\n[{}/{}] '{keyword}'", idx + 1, keywords.len());

        let file = config.crawler.output_dir.join(catalog_filename(keyword));
        let result = match collect_keyword(&orchestrator, config, keyword, &file).await {
            Ok(outcome) => {
                print_outcome(&outcome, config);
                Ok(CollectedCounts::from(&outcome))
            }
            Err(e) => {
                match e.downcast_ref::<Error>() {
                    Some(cause) => tracing::error!(
                        keyword = %keyword,
                        error = %e,
                        category = cause.category().as_str(),
                        recoverable = cause.is_recoverable(),
                        "Keyword collection failed: {}",
                        cause.korean_desc()
                    ),
                    None => tracing::error!(keyword = %keyword, error = %e, "Keyword collection failed"),
                }
                Err(e.to_string())
            }
        };
        summaries.push(KeywordSummary {
            keyword: keyword.clone(),
            result,
        });

        if idx + 1 < keywords.len() {
            tokio::time::sleep(config.keyword_delay()).await;
        }
    }

    print_summary(&summaries);
    Ok(())
}

fn print_summary(summaries: &[KeywordSummary]) {
    let failed = summaries.iter().filter(|s| s.result.is_err()).count();

    println!("\nBatch Summary");
    println!("=============");
    println!("Keywords processed: {}", summaries.len());
    println!("Succeeded: {}", summaries.len() - failed);
    println!("Failed: {failed}");
    println!();

    for (i, summary) in summaries.iter().enumerate() {
        println!("{}", summary_row(i + 1, summary));
    }
}

fn summary_row(position: usize, summary: &KeywordSummary) -> String {
    match &summary.result {
        Ok(counts) => format!(
            "{position:2}. {:20} - {:3} channels ({} new, {} contactable)\n    file: {}",
            summary.keyword, counts.total, counts.new, counts.contactable, counts.file
        ),
        Err(e) => format!("{position:2}. {:20} - failed: {e}", summary.keyword),
    }
}
