use std::sync::Arc;

use async_trait::async_trait;
use scraper::Html;

use crate::app::Result;
use crate::domain::{Candidate, ProductRecord};
use crate::fetcher::{FetchedPage, Fetcher};
use crate::scraper::config::ScraperConfig;
use crate::scraper::extractor::ProductExtractor;
use crate::scraper::Scraper;

/// Scrapes product pages over HTTP, preferring the localized alternate.
pub struct PageScraper {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    config: ScraperConfig,
    extractor: ProductExtractor,
}

impl PageScraper {
    pub fn new(config: ScraperConfig, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let extractor = ProductExtractor::new(&config)?;

        Ok(Self {
            fetcher,
            config,
            extractor,
        })
    }

    /// Fetch the candidate, then swap in its localized alternate if one loads.
    async fn load_page(&self, candidate: &Candidate) -> Result<FetchedPage> {
        let page = self.fetcher.fetch(candidate.as_str()).await?;

        // Html is !Send; keep it out of scope across awaits
        let alternate = {
            let document = Html::parse_document(&page.body);
            self.extractor.alternate_href(&document, &page.url)
        };

        let Some(alternate) = alternate else {
            tracing::debug!("No localized alternate for {}", candidate);
            return Ok(page);
        };

        tokio::time::sleep(self.config.throttle_delay()).await;

        match self.fetcher.fetch(&alternate).await {
            Ok(localized) => Ok(localized),
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch localized page {} ({}), using {}",
                    alternate,
                    e,
                    page.url
                );
                Ok(page)
            }
        }
    }
}

#[async_trait]
impl Scraper for PageScraper {
    async fn scrape(&self, candidate: &Candidate) -> Result<ProductRecord> {
        let page = self.load_page(candidate).await?;
        let document = Html::parse_document(&page.body);
        Ok(self.extractor.extract(&document, &page.url))
    }
}
