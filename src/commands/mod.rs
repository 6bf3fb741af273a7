pub mod crawl;
pub mod run;
pub mod stats;

// Re-export command functions for convenience
pub use crawl::crawl;
pub use run::run;
pub use stats::stats;
