// src/ct_search/client.rs
use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::decoder::{decode_cert, decode_search};
use super::types::{CertResponse, SearchResponse};
use crate::error::SearchError;

pub const DEFAULT_API_ROOT: &str = "https://transparencyreport.google.com/transparencyreport/api/v3";

pub const SEARCH_API: &str = "/httpsreport/ct/certsearch";
pub const PAGING_API: &str = "/httpsreport/ct/certsearch/page";
pub const BYHASH_API: &str = "/httpsreport/ct/certbyhash";

/// Raw request/response seam between the search client and the network.
///
/// Returns the response body on a successful status.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, SearchError>;
}

/// HTTP transport backed by a pooled reqwest client
pub struct HttpTransport {
    api_root: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new transport for the given API root
    pub fn new(api_root: String, timeout: Duration, user_agent: &str) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .gzip(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_root: api_root.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn endpoint_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, SearchError> {
        Url::parse_with_params(&format!("{}{}", self.api_root, endpoint), params)
            .map_err(|e| SearchError::Transport(format!("invalid URL for {}: {}", endpoint, e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, SearchError> {
        let url = self.endpoint_url(endpoint, params)?;

        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Transport(format!("request to {} failed: {}", endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                warn!("Rate limited by search API on {}", endpoint);
            }

            return Err(SearchError::Transport(format!(
                "{} returned status {}",
                endpoint, status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SearchError::Transport(format!("reading body from {} failed: {}", endpoint, e)))
    }
}

/// Client for the three certificate search API calls
#[derive(Clone)]
pub struct SearchClient {
    transport: Arc<dyn Transport>,
}

impl SearchClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the first search page for `domain`, subdomains included
    pub async fn fetch_first_page(
        &self,
        domain: &str,
        include_expired: bool,
    ) -> Result<SearchResponse, SearchError> {
        info!("Searching for domain: {}", domain);

        let params = [
            ("domain", domain),
            ("include_subdomains", "true"),
            ("include_expired", if include_expired { "true" } else { "false" }),
        ];

        let body = self.transport.get(SEARCH_API, &params).await?;
        decode_search(&body)
    }

    /// Fetch a search result page by its page token
    pub async fn fetch_page(&self, page_hash: &str) -> Result<SearchResponse, SearchError> {
        debug!("Fetching result page by hash: {}", page_hash);

        let body = self.transport.get(PAGING_API, &[("p", page_hash)]).await?;
        decode_search(&body)
    }

    /// Fetch a certificate's detail by its hash
    pub async fn fetch_certificate(&self, cert_hash: &str) -> Result<CertResponse, SearchError> {
        debug!("Fetching certificate by hash: {}", cert_hash);

        let body = self.transport.get(BYHASH_API, &[("hash", cert_hash)]).await?;
        decode_cert(&body)
    }
}
