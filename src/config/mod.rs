//! Configuration management for sitemill.
//!
//! Configuration is read from `--config <path>` when given, otherwise from
//! `~/.config/sitemill/config.toml` if that file exists. Without either the
//! built-in defaults target the Duramotion catalog.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use url::Url;

use crate::harvest::HarvestConfig;
use crate::scraper::ScraperConfig;

pub const DEFAULT_WORKERS: usize = 5;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub harvest: HarvestConfig,
    pub scraper: ScraperConfig,
    pub pool: PoolConfig,
    pub report: ReportConfig,
}

/// Worker pool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Concurrent page extractions (default: 5)
    pub workers: usize,

    /// Log a progress line every this many completions (default: 10)
    pub progress_every: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            progress_every: 10,
        }
    }
}

/// Spreadsheet output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_path: PathBuf,
    pub sheet_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("Duramotion_Full_Catalog.xlsx"),
            sheet_name: "Catalog".to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise the default path is used if
    /// present, and built-in defaults if not. Missing fields fall back to
    /// their defaults either way.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Ok(default_path) if default_path.exists() => Self::from_file(&default_path)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/sitemill/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("sitemill").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool.workers == 0 {
            return Err(ConfigError::Invalid("pool.workers must be at least 1".into()));
        }
        if self.pool.progress_every == 0 {
            return Err(ConfigError::Invalid(
                "pool.progress_every must be at least 1".into(),
            ));
        }
        if self.scraper.throttle_min_ms > self.scraper.throttle_max_ms {
            return Err(ConfigError::Invalid(format!(
                "scraper.throttle_min_ms ({}) exceeds scraper.throttle_max_ms ({})",
                self.scraper.throttle_min_ms, self.scraper.throttle_max_ms
            )));
        }
        if self.harvest.language_segment.is_empty() {
            return Err(ConfigError::Invalid(
                "harvest.language_segment must not be empty".into(),
            ));
        }
        for (name, value) in [
            ("harvest.sitemap_url", &self.harvest.sitemap_url),
            ("scraper.base_url", &self.scraper.base_url),
        ] {
            Url::parse(value)
                .map_err(|e| ConfigError::Invalid(format!("{name} {value:?}: {e}")))?;
        }
        Ok(())
    }

    /// Write the commented default config file.
    pub fn write_default(path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# sitemill configuration
#
# Every key is optional; anything left out keeps the value shown here.

[harvest]
# Sitemap listing every page of the target site
sitemap_url = "https://www.duramotion.nl/sitemap.xml"

# Only URLs with this path segment are considered
language_segment = "nl"

# Upper bound on pages scraped per run
max_urls = 10000

# Path segments of non-product pages. Checked case-insensitively against the
# last segment and the segment right after the language segment.
blacklist = [
    "contact", "sitemap", "nieuws", "reviews", "cookies", "assortiment",
    "categorieen", "faq", "vacatures", "blog", "team", "partners",
    "omvormen", "kennis-partner", "technische-support", "klantportaal",
    "projectmanagement", "express-delivery", "van-der-valk", "recom",
    "algemene-voorwaarden", "privacy", "enphase", "his", "links",
    "nieuwsbrief-inschrijving", "huawei", "eaton", "cimco", "omvormers",
    "elektra", "kabels", "klein-materiaal", "onderconstructie",
    "calculators", "chint", "sas-box", "cah-caw",
]

[scraper]
# Relative image and PDF links are resolved against this
base_url = "https://www.duramotion.nl"

# Per-request timeout in seconds
timeout_secs = 10

# hreflang of the localized page to prefer
target_language = "en"

# Random pause before fetching the localized page (milliseconds)
throttle_min_ms = 500
throttle_max_ms = 1500

# Request headers
user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
accept = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
accept_language = "en-US,en;q=0.9,nl;q=0.8"

# Field selectors
code_selector = "div.zl_product_list_code"
title_selector = "h1"
description_selector = "div#omschrijving"
image_selector = "a[rel~=\"productImage\"]"
structured_data_selector = "script[type=\"application/ld+json\"]"

# Class of the PDF icon; the link is the icon itself or its enclosing anchor
pdf_icon_class = "fa-file-pdf"

[pool]
# Concurrent page extractions
workers = 5

# Progress line every N completed pages
progress_every = 10

[report]
output_path = "Duramotion_Full_Catalog.xlsx"
sheet_name = "Catalog"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config file already exists at {0} (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        let defaults = Config::default();
        assert_eq!(config.harvest.sitemap_url, defaults.harvest.sitemap_url);
        assert_eq!(config.harvest.blacklist, defaults.harvest.blacklist);
        assert_eq!(config.harvest.max_urls, defaults.harvest.max_urls);
        assert_eq!(config.scraper.image_selector, defaults.scraper.image_selector);
        assert_eq!(config.scraper.user_agent, defaults.scraper.user_agent);
        assert_eq!(config.pool.workers, DEFAULT_WORKERS);
        assert_eq!(config.report.sheet_name, "Catalog");
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[pool]
workers = 12

[report]
output_path = "out.xlsx"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.pool.workers, 12);
        assert_eq!(config.report.output_path, PathBuf::from("out.xlsx"));
        // Defaults survive
        assert_eq!(config.pool.progress_every, 10);
        assert_eq!(config.report.sheet_name, "Catalog");
        assert_eq!(config.harvest.language_segment, "nl");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.pool.workers, DEFAULT_WORKERS);
        assert_eq!(config.scraper.timeout_secs, 10);
        assert_eq!(config.harvest.blacklist.len(), 38);
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = Config::default();
        config.pool.workers = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_throttle() {
        let mut config = Config::default();
        config.scraper.throttle_min_ms = 2000;
        config.scraper.throttle_max_ms = 100;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.scraper.base_url = "not a url".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemill.toml");
        fs::write(&path, "[harvest]\nmax_urls = 3\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.harvest.max_urls, 3);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[pool]\nworkers = \"many\"\n").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_write_default_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::write_default(&path, false).unwrap();
        let written = Config::from_file(&path).unwrap();
        assert_eq!(written.pool.workers, DEFAULT_WORKERS);

        assert!(matches!(
            Config::write_default(&path, false),
            Err(ConfigError::AlreadyExists(_))
        ));
        Config::write_default(&path, true).unwrap();
    }
}
