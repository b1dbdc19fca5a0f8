//! Sitemap harvesting.
//!
//! ```text
//! sitemap.xml → <loc> entries → filter → dedupe → cap → candidates
//! ```
//!
//! The sitemap is read as loose markup rather than strict XML, so a
//! malformed document still yields whatever `<loc>` entries it contains.

mod config;

pub use config::HarvestConfig;

use std::collections::HashSet;
use std::sync::Arc;

use scraper::{Html, Selector};

use crate::app::{Result, SitemillError};
use crate::domain::Candidate;
use crate::fetcher::Fetcher;

/// Raw locations logged when nothing survives filtering
const SAMPLE_SIZE: usize = 5;

pub struct Harvester {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    config: HarvestConfig,
    blacklist: HashSet<String>,
}

impl Harvester {
    pub fn new(config: HarvestConfig, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let blacklist = config
            .blacklist
            .iter()
            .map(|segment| segment.to_lowercase())
            .collect();

        Self {
            fetcher,
            config,
            blacklist,
        }
    }

    /// Fetch the sitemap and return the candidates worth scraping.
    pub async fn harvest(&self) -> Result<Vec<Candidate>> {
        tracing::info!("Fetching sitemap from {}", self.config.sitemap_url);
        let page = self.fetcher.fetch(&self.config.sitemap_url).await?;

        let locations = parse_locations(&page.body)?;
        tracing::debug!("Found {} <loc> entries", locations.len());

        Ok(self.select(&locations))
    }

    /// Filter, dedupe and cap raw sitemap locations.
    ///
    /// Candidates keep sitemap order; the cap drops whatever comes last.
    pub fn select(&self, locations: &[String]) -> Vec<Candidate> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for location in locations {
            let candidate = match Candidate::parse(location) {
                Ok(candidate) => candidate,
                Err(e) => {
                    tracing::debug!("Skipping unparsable location {:?}: {}", location, e);
                    continue;
                }
            };

            if !self.accepts(&candidate) {
                continue;
            }

            if seen.insert(candidate.as_str().to_string()) {
                candidates.push(candidate);
            }
        }

        tracing::info!("Total raw URLs: {}", locations.len());
        tracing::info!("Total valid URLs: {}", candidates.len());

        if candidates.is_empty() {
            for location in locations.iter().take(SAMPLE_SIZE) {
                tracing::info!("Sample sitemap URL: {}", location);
            }
        }

        if candidates.len() > self.config.max_urls {
            tracing::warn!(
                "Keeping the first {} of {} candidates; the rest are not scraped",
                self.config.max_urls,
                candidates.len()
            );
            candidates.truncate(self.config.max_urls);
        }

        candidates
    }

    /// Whether a location looks like a product page in the source language.
    pub fn accepts(&self, candidate: &Candidate) -> bool {
        let marker = self.config.language_segment.as_str();

        if !candidate.has_segment(marker) || candidate.segments().len() < 2 {
            return false;
        }

        let (Some(slug), Some(section)) = (candidate.last_segment(), candidate.segment_after(marker))
        else {
            return false;
        };

        !self.is_blacklisted(slug) && !self.is_blacklisted(section)
    }

    fn is_blacklisted(&self, segment: &str) -> bool {
        self.blacklist.contains(&segment.to_lowercase())
    }
}

/// Collect the trimmed text of every `<loc>` element.
pub fn parse_locations(markup: &str) -> Result<Vec<String>> {
    let selector =
        Selector::parse("loc").map_err(|e| SitemillError::Selector(format!("loc: {e}")))?;
    let document = Html::parse_document(markup);

    Ok(document
        .select(&selector)
        .map(|loc| loc.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect())
}
