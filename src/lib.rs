//! # sitemill
//!
//! Harvests product pages listed in a retailer's sitemap and exports their
//! details to a spreadsheet.
//!
//! ## Architecture
//!
//! sitemill is a single-pass pipeline:
//!
//! ```text
//! Sitemap → Harvester → FetchPool(PageScraper) → ReportWriter → .xlsx
//! ```
//!
//! - [`harvest`]: `<loc>` extraction and candidate filtering
//! - [`scraper`]: page loading with localized-alternate fallback, field extraction
//! - [`fetcher`]: HTTP client and the bounded worker pool
//! - [`report`]: spreadsheet writer with hyperlink cells
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape with the built-in defaults
//! sitemill
//!
//! # List what would be scraped
//! sitemill harvest
//!
//! # Write a config file to edit
//! sitemill init-config
//! ```

/// Application context, pipeline, and error handling.
///
/// [`AppContext`](app::AppContext) wires the harvester, pool, and report
/// writer to one shared fetcher.
pub mod app;

/// Command-line interface using clap.
///
/// - no command / `run` - full pipeline
/// - `harvest` - print candidate URLs
/// - `init-config` - write the default config file
pub mod cli;

/// TOML configuration with `harvest`, `scraper`, `pool` and `report` sections.
pub mod config;

/// Core domain models.
///
/// - [`Candidate`](domain::Candidate): a sitemap URL queued for scraping
/// - [`ProductRecord`](domain::ProductRecord): the fields scraped from one page
pub mod domain;

/// HTTP fetching and concurrent scraping.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for page fetching
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`FetchPool`](fetcher::parallel::FetchPool): Concurrent scraping with semaphore
pub mod fetcher;

/// Sitemap harvesting.
pub mod harvest;

/// Spreadsheet export.
pub mod report;

/// Product page scraping.
pub mod scraper;
