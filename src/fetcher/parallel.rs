use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::app::SitemillError;
use crate::config::PoolConfig;
use crate::domain::{Candidate, ProductRecord};
use crate::scraper::Scraper;

/// Records gathered by a pool run, in completion order.
#[derive(Debug, Default)]
pub struct PoolOutcome {
    pub records: Vec<ProductRecord>,
    /// Candidates whose scrape failed or whose task died
    pub failed: usize,
}

/// Runs one scrape per candidate with at most `workers` in flight.
pub struct FetchPool {
    scraper: Arc<dyn Scraper>,
    semaphore: Arc<Semaphore>,
    progress_every: usize,
}

impl FetchPool {
    pub fn new(scraper: Arc<dyn Scraper>) -> Self {
        Self::with_config(scraper, &PoolConfig::default())
    }

    pub fn with_config(scraper: Arc<dyn Scraper>, config: &PoolConfig) -> Self {
        Self {
            scraper,
            semaphore: Arc::new(Semaphore::new(config.workers.max(1))),
            progress_every: config.progress_every.max(1),
        }
    }

    pub async fn run_all(&self, candidates: Vec<Candidate>) -> PoolOutcome {
        let total = candidates.len();
        let mut tasks = JoinSet::new();

        for candidate in candidates {
            let scraper = self.scraper.clone();
            let semaphore = self.semaphore.clone();

            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => scraper.scrape(&candidate).await,
                    Err(e) => Err(SitemillError::Other(format!("Worker pool closed: {}", e))),
                };
                (candidate, result)
            });
        }

        let mut outcome = PoolOutcome::default();
        let mut completed = 0;

        while let Some(joined) = tasks.join_next().await {
            completed += 1;

            match joined {
                Ok((_, Ok(record))) => outcome.records.push(record),
                Ok((candidate, Err(e))) => {
                    outcome.failed += 1;
                    tracing::warn!("Dropping {}: {}", candidate, e);
                }
                Err(e) => {
                    outcome.failed += 1;
                    tracing::error!("Task join error: {}", e);
                }
            }

            if completed % self.progress_every == 0 {
                tracing::info!("Progress: {}/{}", completed, total);
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::app::Result;

    /// Fails any candidate whose path contains "broken"; tracks peak concurrency.
    #[derive(Default)]
    struct CountingScraper {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Scraper for CountingScraper {
        async fn scrape(&self, candidate: &Candidate) -> Result<ProductRecord> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if candidate.as_str().contains("broken") {
                return Err(SitemillError::HttpStatus {
                    url: candidate.to_string(),
                    status: 500,
                });
            }
            Ok(ProductRecord::new(candidate.as_str()))
        }
    }

    fn candidates(paths: &[&str]) -> Vec<Candidate> {
        paths
            .iter()
            .map(|p| Candidate::parse(&format!("https://shop.example/nl/{p}")).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_failures_are_dropped() {
        let pool = FetchPool::new(Arc::new(CountingScraper::default()));

        let outcome = pool
            .run_all(candidates(&["bolt", "broken-page", "nut"]))
            .await;

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.failed, 1);
        let mut sources: Vec<_> = outcome.records.iter().map(|r| r.source_url.as_str()).collect();
        sources.sort();
        assert_eq!(
            sources,
            vec!["https://shop.example/nl/bolt", "https://shop.example/nl/nut"]
        );
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let scraper = Arc::new(CountingScraper::default());
        let pool = FetchPool::with_config(
            scraper.clone(),
            &PoolConfig {
                workers: 3,
                progress_every: 5,
            },
        );

        let paths: Vec<String> = (0..20).map(|i| format!("item-{i}")).collect();
        let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
        let outcome = pool.run_all(candidates(&paths)).await;

        assert_eq!(outcome.records.len(), 20);
        assert!(scraper.peak.load(Ordering::SeqCst) <= 3);
        assert!(scraper.peak.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let pool = FetchPool::new(Arc::new(CountingScraper::default()));
        let outcome = pool.run_all(Vec::new()).await;
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.failed, 0);
    }
}
