//! HTTP client for the PSIS pesticide registration API.
//!
//! One `service.do` endpoint serves both calls: `SVC01` lists registrations
//! matching the search filters and `SVC02` returns the usage standard for a
//! single product/disease pair. List failures are returned to the caller;
//! detail failures degrade to placeholder values so one bad item cannot
//! abort a search.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use psis_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::PsisError;
use crate::flatten::flatten_item;
use crate::normalize::{usage_from_record, PendingRow};
use crate::query::{detail_params, list_params, SearchFilters};
use crate::types::{DetailResult, SearchOutcome};
use crate::xml::{parse_document, XmlElement};

const DEFAULT_BASE_URL: &str = "https://psis.rda.go.kr/openApi/service.do";
const DEFAULT_USER_AGENT: &str = "psis-search/0.1 (pesticide-lookup)";
const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_DETAIL_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the PSIS open API.
///
/// Use [`PsisClient::from_config`] in production or
/// [`PsisClient::with_base_url`] to point at a mock server in tests.
pub struct PsisClient {
    client: Client,
    api_key: String,
    base_url: Url,
    list_timeout: Duration,
    detail_timeout: Duration,
    detail_concurrency: usize,
}

impl PsisClient {
    /// Creates a client pointed at the production endpoint with default
    /// timeouts and sequential detail lookups.
    ///
    /// # Errors
    ///
    /// Returns [`PsisError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str) -> Result<Self, PsisError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PsisError::Http`] if the `reqwest::Client` cannot be built
    /// or [`PsisError::InvalidBaseUrl`] if `api_url` does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, PsisError> {
        let client = Self::build(&config.api_key, &config.api_url, &config.user_agent)?;
        Ok(client
            .with_timeouts(
                Duration::from_secs(config.list_timeout_secs),
                Duration::from_secs(config.detail_timeout_secs),
            )
            .with_detail_concurrency(config.detail_concurrency))
    }

    /// Creates a client with a custom endpoint URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PsisError::Http`] if the `reqwest::Client` cannot be built
    /// or [`PsisError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, PsisError> {
        Self::build(api_key, base_url, DEFAULT_USER_AGENT)
    }

    fn build(api_key: &str, base_url: &str, user_agent: &str) -> Result<Self, PsisError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(base_url).map_err(|e| PsisError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
            list_timeout: DEFAULT_LIST_TIMEOUT,
            detail_timeout: DEFAULT_DETAIL_TIMEOUT,
            detail_concurrency: 1,
        })
    }

    /// Overrides the per-request timeouts of the list and detail calls.
    #[must_use]
    pub fn with_timeouts(mut self, list: Duration, detail: Duration) -> Self {
        self.list_timeout = list;
        self.detail_timeout = detail;
        self
    }

    /// Sets how many detail lookups may be in flight at once (minimum 1).
    ///
    /// Row order and contents do not depend on this value.
    #[must_use]
    pub fn with_detail_concurrency(mut self, concurrency: usize) -> Self {
        self.detail_concurrency = concurrency.max(1);
        self
    }

    /// Runs a list search and normalizes every result item into a row.
    ///
    /// Items missing usage timing or count are enriched from a detail lookup
    /// when both their product code and disease/use sequence are known.
    ///
    /// # Errors
    ///
    /// - [`PsisError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`PsisError::Xml`] / [`PsisError::MalformedXml`] if the response
    ///   body is not a well-formed XML document.
    pub async fn search(&self, filters: &SearchFilters) -> Result<SearchOutcome, PsisError> {
        let url = self.build_url(&list_params(filters));
        tracing::info!(filters = ?filters.params(), "PSIS list search");

        let root = self.fetch_document(&url, self.list_timeout).await?;

        if let Some(code) = root.child_text("errorCode").filter(|c| !c.is_empty()) {
            let message = root.child_text("errorMsg").unwrap_or("").to_string();
            tracing::warn!(code, message = %message, "PSIS API returned an error");
            return Ok(SearchOutcome::ApiError {
                code: code.to_string(),
                message,
            });
        }

        let pending: Vec<PendingRow> = root
            .descendants("item")
            .into_iter()
            .map(|item| PendingRow::from_record(flatten_item(item)))
            .collect();

        if pending.is_empty() {
            tracing::info!("PSIS list search returned no items");
            return Ok(SearchOutcome::NoResults);
        }

        let rows = stream::iter(pending)
            .map(|row| self.complete_row(row))
            .buffered(self.detail_concurrency)
            .collect::<Vec<_>>()
            .await;

        tracing::info!(rows = rows.len(), "PSIS list search complete");
        Ok(SearchOutcome::Rows(rows))
    }

    /// Looks up usage timing and count for one product/disease pair.
    ///
    /// Never fails: any transport, status, or parse problem, or a response
    /// without an `item`, yields [`DetailResult::unavailable`].
    pub async fn lookup_detail(&self, pesti_code: &str, disease_use_seq: &str) -> DetailResult {
        match self.try_lookup_detail(pesti_code, disease_use_seq).await {
            Ok(Some(detail)) => detail,
            Ok(None) => {
                tracing::debug!(pesti_code, disease_use_seq, "PSIS detail has no item");
                DetailResult::unavailable()
            }
            Err(e) => {
                tracing::warn!(
                    pesti_code,
                    disease_use_seq,
                    error = %e,
                    "PSIS detail lookup failed; using placeholders"
                );
                DetailResult::unavailable()
            }
        }
    }

    async fn try_lookup_detail(
        &self,
        pesti_code: &str,
        disease_use_seq: &str,
    ) -> Result<Option<DetailResult>, PsisError> {
        let url = self.build_url(&detail_params(pesti_code, disease_use_seq));
        let root = self.fetch_document(&url, self.detail_timeout).await?;
        Ok(root
            .descendants("item")
            .first()
            .map(|item| usage_from_record(&flatten_item(item))))
    }

    async fn complete_row(&self, mut pending: PendingRow) -> psis_core::NormalizedRow {
        if let Some((code, seq)) = pending.detail_keys() {
            let detail = self.lookup_detail(code, seq).await;
            pending.merge_detail(detail);
        }
        pending.into_row()
    }

    /// Builds the request URL: the API key first, then `params`, all
    /// percent-encoded via [`Url::query_pairs_mut`].
    fn build_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apiKey", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as XML.
    ///
    /// URLs are stripped from transport errors so the API key never reaches
    /// logs or user-facing messages.
    async fn fetch_document(&self, url: &Url, timeout: Duration) -> Result<XmlElement, PsisError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;
        parse_document(&body)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
