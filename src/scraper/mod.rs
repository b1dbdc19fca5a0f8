//! Product page scraping.
//!
//! # Architecture
//!
//! ```text
//! Candidate → fetch → (localized alternate?) → ProductExtractor → ProductRecord
//! ```
//!
//! [`PageScraper`] does the HTTP side: it loads the candidate page, follows
//! its `hreflang` alternate for the configured language after a short random
//! pause, and falls back to the original page when the alternate does not
//! load. [`ProductExtractor`] reads the fields from whichever page won.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sitemill::scraper::{PageScraper, Scraper, ScraperConfig};
//!
//! let config = ScraperConfig::default();
//! let fetcher = Arc::new(HttpFetcher::new(&config)?);
//! let scraper = PageScraper::new(config, fetcher)?;
//!
//! let record = scraper.scrape(&candidate).await?;
//! ```

mod config;
mod extractor;
mod page;
mod structured_data;

pub use config::ScraperConfig;
pub use extractor::ProductExtractor;
pub use page::PageScraper;
pub use structured_data::StructuredData;

use crate::app::Result;
use crate::domain::{Candidate, ProductRecord};
use async_trait::async_trait;

/// Trait for turning one candidate into one record
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Scrape a single candidate. Errors drop the candidate, never the batch.
    async fn scrape(&self, candidate: &Candidate) -> Result<ProductRecord>;
}
