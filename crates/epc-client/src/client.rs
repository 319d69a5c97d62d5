//! HTTP client for the EPC registry search endpoint.

use async_trait::async_trait;
use epc_core::{Credentials, EpcError, RegistryConfig, Result, SearchParams, SearchResultPage};
use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::registry::Registry;

const USER_AGENT: &str = concat!("epc-scan/", env!("CARGO_PKG_VERSION"));

/// EPC registry API client.
///
/// Each call is a single GET with no retry, no backoff and no timeout
/// beyond the transport's own defaults. Failures are logged here and
/// returned to the caller.
#[derive(Debug, Clone)]
pub struct EpcClient {
    http: reqwest::Client,
    search_url: String,
    credentials: Credentials,
}

impl EpcClient {
    /// Creates a client for the registry at `base_url`.
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| EpcError::transport_with_source("failed to build HTTP client", e))?;

        Ok(Self {
            http,
            search_url: format!("{}/search", base_url.trim_end_matches('/')),
            credentials,
        })
    }

    /// Creates a client from registry configuration.
    ///
    /// Fails with a config error if the credentials are missing.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        Self::new(&config.base_url, config.credentials()?)
    }

    /// Full URL of the search endpoint.
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    async fn fetch(&self, params: &SearchParams) -> Result<Option<SearchResultPage>> {
        tracing::debug!(url = %self.search_url, params = ?params.pairs(), "Searching registry");

        let response = self
            .http
            .get(&self.search_url)
            .header(AUTHORIZATION, self.credentials.authorization_header())
            .header(ACCEPT, "application/json")
            .query(&params.pairs())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %self.search_url, error = %e, "Registry request failed");
                EpcError::transport_with_source(format!("request to {} failed", self.search_url), e)
            })?;

        let status = response.status();
        let url = response.url().to_string();

        if !status.is_success() {
            tracing::error!(%url, status = status.as_u16(), "Registry rejected request");
            return Err(EpcError::RequestFailed {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!(%url, error = %e, "Failed to read registry response");
            EpcError::transport_with_source(format!("reading response from {url} failed"), e)
        })?;

        let page = parse_body(&body)?;
        tracing::info!(
            rows = page.as_ref().map_or(0, SearchResultPage::len),
            "Registry search completed"
        );
        Ok(page)
    }
}

#[async_trait]
impl Registry for EpcClient {
    async fn search(&self, params: &SearchParams) -> Result<Option<SearchResultPage>> {
        self.fetch(params).await
    }
}

/// Parses a registry response body.
///
/// An empty (or whitespace-only) body and a literal JSON `null` are both a
/// successful "no result". Anything else must be a page object.
pub fn parse_body(body: &str) -> Result<Option<SearchResultPage>> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str::<Option<SearchResultPage>>(body).map_err(|source| {
        tracing::error!(error = %source, body = %body, "Failed to parse registry response");
        EpcError::ParseFailed {
            source,
            body: body.to_string(),
        }
    })
}
