use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::FetchPool;
use crate::fetcher::Fetcher;
use crate::harvest::Harvester;
use crate::report::ReportWriter;
use crate::scraper::PageScraper;

/// Every pipeline stage, wired to one shared fetcher.
pub struct AppContext {
    pub config: Config,
    pub harvester: Harvester,
    pub pool: FetchPool,
    pub report: ReportWriter,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.scraper)?);
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let harvester = Harvester::new(config.harvest.clone(), fetcher.clone());
        let scraper = Arc::new(PageScraper::new(config.scraper.clone(), fetcher)?);
        let pool = FetchPool::with_config(scraper, &config.pool);
        let report = ReportWriter::new(&config.report);

        Ok(Self {
            config,
            harvester,
            pool,
            report,
        })
    }
}
