use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for fetching and reading product pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Base for resolving relative image and PDF links
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// `hreflang` of the localized alternate to prefer (default: "en")
    pub target_language: String,

    /// Lower bound of the pause before fetching the alternate, in milliseconds (default: 500)
    pub throttle_min_ms: u64,

    /// Upper bound of the pause before fetching the alternate, in milliseconds (default: 1500)
    pub throttle_max_ms: u64,

    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,

    /// Container holding the product code
    pub code_selector: String,

    /// Page heading used as the title
    pub title_selector: String,

    /// Container holding the description
    pub description_selector: String,

    /// Anchor linking the full-size product image
    pub image_selector: String,

    /// Embedded JSON-LD blocks searched when the code container is missing
    pub structured_data_selector: String,

    /// Icon class marking the datasheet link
    pub pdf_icon_class: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.duramotion.nl".to_string(),
            timeout_secs: 10,
            target_language: "en".to_string(),
            throttle_min_ms: 500,
            throttle_max_ms: 1500,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,\
                     image/avif,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.9,nl;q=0.8".to_string(),
            code_selector: "div.zl_product_list_code".to_string(),
            title_selector: "h1".to_string(),
            description_selector: "div#omschrijving".to_string(),
            image_selector: "a[rel~=\"productImage\"]".to_string(),
            structured_data_selector: "script[type=\"application/ld+json\"]".to_string(),
            pdf_icon_class: "fa-file-pdf".to_string(),
        }
    }
}

impl ScraperConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Pick a pause uniformly from the throttle window.
    pub fn throttle_delay(&self) -> Duration {
        let low = self.throttle_min_ms.min(self.throttle_max_ms);
        let high = self.throttle_min_ms.max(self.throttle_max_ms);
        Duration::from_millis(rand::thread_rng().gen_range(low..=high))
    }

    /// A config that never sleeps, for fixtures and local mirrors.
    pub fn unthrottled() -> Self {
        Self {
            throttle_min_ms: 0,
            throttle_max_ms: 0,
            ..Default::default()
        }
    }
}
