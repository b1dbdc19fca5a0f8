pub mod http_fetcher;
pub mod parallel;
#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;

use crate::app::Result;

/// A page body returned with HTTP 200.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: String,
    pub body: String,
}

#[async_trait]
pub trait Fetcher {
    /// Fetch `url`, failing on transport errors and any status other than 200.
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}
