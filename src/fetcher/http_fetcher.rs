use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};

use crate::app::{Result, SitemillError};
use crate::fetcher::{FetchedPage, Fetcher};
use crate::scraper::ScraperConfig;

/// reqwest-backed fetcher shared by every worker.
///
/// `Client` pools connections internally, so one instance serves the whole run.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&config.accept_language)?);

        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| SitemillError::Other(format!("Invalid header value {value:?}: {e}")))
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SitemillError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        Ok(FetchedPage {
            url: url.to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_ok_returns_body_and_requested_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nl/bolt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Bolt</h1>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&ScraperConfig::default()).unwrap();
        let url = format!("{}/nl/bolt", server.uri());
        let page = fetcher.fetch(&url).await.unwrap();

        assert_eq!(page.url, url);
        assert_eq!(page.body, "<h1>Bolt</h1>");
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nl/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&ScraperConfig::default()).unwrap();
        let err = fetcher
            .fetch(&format!("{}/nl/gone", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, SitemillError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_sends_configured_headers() {
        let server = MockServer::start().await;
        let config = ScraperConfig {
            user_agent: "sitemill-test/1.0".into(),
            accept_language: "en".into(),
            ..Default::default()
        };
        Mock::given(method("GET"))
            .and(header("user-agent", "sitemill-test/1.0"))
            .and(header("accept-language", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&config).unwrap();
        let page = fetcher.fetch(&server.uri()).await.unwrap();
        assert_eq!(page.body, "ok");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let config = ScraperConfig {
            accept: "text/html\n".into(),
            ..Default::default()
        };
        assert!(HttpFetcher::new(&config).is_err());
    }
}
