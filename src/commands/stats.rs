use anyhow::Result;
use std::path::Path;

use tubescout::storage::{CatalogStats, ChannelCatalog};
use tubescout::utils::truncate_text;

pub fn stats(file: &Path) -> Result<()> {
    if !file.exists() {
        println!("Catalog not found: {}", file.display());
        println!("Run a crawl first to create it.");
        return Ok(());
    }

    let catalog = ChannelCatalog::load(file);
    let stats = CatalogStats::from_records(catalog.records());

    let pct = |n: usize| {
        if stats.total > 0 {
            n as f64 / stats.total as f64 * 100.0
        } else {
            0.0
        }
    };

    println!("Catalog Statistics");
    println!("==================");
    println!("File: {}", file.display());
    println!();
    println!("Total channels: {}", stats.total);
    println!("  Korean:      {} ({:.1}%)", stats.domestic, pct(stats.domestic));
    println!("  Contactable: {} ({:.1}%)", stats.contactable, pct(stats.contactable));
    println!("    Email:   {}", stats.with_email);
    println!("    Phone:   {}", stats.with_phone);
    println!("    KakaoTalk: {}", stats.with_messaging);
    println!("    Links:   {}", stats.with_links);
    println!();

    for record in catalog.records() {
        let contact = record.contact().summary();
        println!(
            "- {} [{} subscribers] {}",
            truncate_text(&record.title, 30),
            record.subscriber_count,
            if contact.is_empty() {
                String::from("no contact")
            } else {
                contact.join(", ")
            }
        );
    }

    Ok(())
}
