use serde::de::DeserializeOwned;

use crate::credentials::CredentialSet;
use crate::error::AgentError;
use crate::retry::RetryPolicy;

use super::FetchError;
use super::types::{ApiResponse, DEFAULT_PAGE_SIZE};

pub const API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Thin GET client over the v4 API. Auth headers are installed once as
/// default headers; retry composition happens per call via a `RetryPolicy`.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(credentials: &CredentialSet) -> Result<Self, AgentError> {
        Self::with_base_url(credentials, API_BASE.to_string())
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub fn with_base_url(
        credentials: &CredentialSet,
        base_url: String,
    ) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .default_headers(credentials.header_map()?)
            .build()
            .map_err(|e| AgentError::AuthConfig(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn api_base(&self) -> &str {
        &self.base_url
    }

    /// One attempt, status classified for the retry policy. 404 maps to
    /// an absent result, never an error.
    async fn get_envelope(
        &self,
        path: &str,
    ) -> Result<Option<ApiResponse<serde_json::Value>>, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;

        let status = response.status().as_u16();
        match status {
            401 | 403 => return Err(FetchError::AuthRejected { status }),
            404 => return Ok(None),
            400 | 405 => return Err(FetchError::Unavailable { status }),
            429 | 500..=599 => {
                return Err(FetchError::Transient {
                    status: Some(status),
                    message: format!("HTTP {}", status),
                });
            }
            _ => {}
        }

        let body: ApiResponse<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(format!("{}: {}", path, e)))?;

        if !body.success {
            return Err(FetchError::Api {
                status,
                message: body.error_message(),
            });
        }

        Ok(Some(body))
    }

    /// GET through the retry policy, returning the raw `result` value.
    pub async fn get_result(
        &self,
        policy: &RetryPolicy,
        path: &str,
    ) -> Result<Option<serde_json::Value>, FetchError> {
        let body = policy.execute(|| self.get_envelope(path)).await?;
        Ok(body.and_then(|b| b.result))
    }

    /// GET through the retry policy, decoding `result` into `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        policy: &RetryPolicy,
        path: &str,
    ) -> Result<Option<T>, FetchError> {
        match self.get_result(policy, path).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| FetchError::Decode(format!("{}: {}", path, e))),
            None => Ok(None),
        }
    }

    /// Collect every page of a page-numbered listing endpoint.
    pub async fn get_paged<T: DeserializeOwned>(
        &self,
        policy: &RetryPolicy,
        path: &str,
    ) -> Result<Vec<T>, FetchError> {
        let mut all_results = Vec::new();
        let mut page = 1u32;

        loop {
            let separator = if path.contains('?') { '&' } else { '?' };
            let paged_path = format!(
                "{}{}page={}&per_page={}",
                path, separator, page, DEFAULT_PAGE_SIZE
            );

            let Some(body) = policy.execute(|| self.get_envelope(&paged_path)).await? else {
                break;
            };

            let items: Vec<T> = match body.result {
                Some(value) => serde_json::from_value(value)
                    .map_err(|e| FetchError::Decode(format!("{}: {}", path, e)))?,
                None => Vec::new(),
            };
            let count = items.len() as u32;
            all_results.extend(items);

            let total_count = body
                .result_info
                .as_ref()
                .and_then(|info| info.total_count)
                .unwrap_or(0);

            if count == 0 || page.saturating_mul(DEFAULT_PAGE_SIZE) >= total_count {
                break;
            }

            page += 1;
        }

        Ok(all_results)
    }

    /// Collect every batch of a cursor-paginated listing endpoint.
    pub async fn get_cursor_paged<T: DeserializeOwned>(
        &self,
        policy: &RetryPolicy,
        path: &str,
    ) -> Result<Vec<T>, FetchError> {
        let mut all_results = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let paged_path = match &cursor {
                Some(c) => format!("{}?per_page={}&cursor={}", path, DEFAULT_PAGE_SIZE, c),
                None => format!("{}?per_page={}", path, DEFAULT_PAGE_SIZE),
            };

            let Some(body) = policy.execute(|| self.get_envelope(&paged_path)).await? else {
                break;
            };

            let items: Vec<T> = match body.result {
                Some(value) => serde_json::from_value(value)
                    .map_err(|e| FetchError::Decode(format!("{}: {}", path, e)))?,
                None => Vec::new(),
            };
            if items.is_empty() {
                break;
            }
            all_results.extend(items);

            let next_cursor = body
                .result_info
                .as_ref()
                .and_then(|info| info.cursors.as_ref())
                .and_then(|c| c.after.clone())
                .filter(|c| !c.is_empty());

            match next_cursor {
                Some(c) => cursor = Some(c),
                None => break,
            }
        }

        Ok(all_results)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
