//! In-memory fetcher for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::{Result, SitemillError};
use crate::fetcher::{FetchedPage, Fetcher};

enum StubResponse {
    Body(String),
    Status(u16),
}

/// Serves canned bodies by exact URL; unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct StubFetcher {
    responses: HashMap<String, StubResponse>,
    requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), StubResponse::Body(body.to_string()));
        self
    }

    pub(crate) fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), StubResponse::Status(status));
        self
    }

    /// URLs requested so far, in request order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.responses.get(url) {
            Some(StubResponse::Body(body)) => Ok(FetchedPage {
                url: url.to_string(),
                body: body.clone(),
            }),
            Some(StubResponse::Status(status)) => Err(SitemillError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(SitemillError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
