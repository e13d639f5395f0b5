// GitHub API HTTP client.
// Handles authentication, rate limit tracking, and request/response processing.

use std::sync::Mutex;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{FirstprError, Result};

use super::types::RateLimit;

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client. The token is optional: unauthenticated requests work
/// against the search endpoint, just with a much lower rate limit.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    rate_limit: Mutex<RateLimit>,
}

impl GitHubClient {
    /// Create a new GitHub client, authenticated when a token is given.
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_base_url(token, GITHUB_API_BASE)
    }

    /// Create a client against an explicit API base URL.
    pub fn with_base_url(token: Option<&str>, base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| FirstprError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("firstpr-cli"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FirstprError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Get the most recently observed rate limit information.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .map(|rl| rl.clone())
            .unwrap_or_default()
    }

    /// Make a GET request to the GitHub API, failing on error status.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FirstprError::Api)?;

        self.update_rate_limit(&response);
        self.check_response(response).await
    }

    /// Make a GET request with query parameters, keeping the response even on
    /// error status. The search endpoint delivers rate-limit and validation
    /// payloads as JSON bodies on 403/422, and those bodies are what the
    /// caller classifies.
    pub async fn get_lenient<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(FirstprError::Api)?;

        self.update_rate_limit(&response);
        Ok(response)
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &Response) {
        let Ok(mut rate_limit) = self.rate_limit.lock() else {
            return;
        };

        if let Some(limit) = response
            .headers()
            .get("x-ratelimit-limit")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
        {
            rate_limit.limit = limit;
        }

        if let Some(remaining) = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
        {
            rate_limit.remaining = remaining;
        }

        if let Some(reset) = response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
        {
            rate_limit.reset = reset;
        }
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(response),
            StatusCode::UNAUTHORIZED => Err(FirstprError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(FirstprError::NotFound(url))
            }
            StatusCode::FORBIDDEN => {
                let rate_limit = self.rate_limit();
                if rate_limit.remaining == 0 {
                    let reset_at = chrono::DateTime::from_timestamp(rate_limit.reset as i64, 0)
                        .map(|dt| dt.format("%H:%M:%S").to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    Err(FirstprError::Other(format!(
                        "Rate limit exceeded, resets at {}",
                        reset_at
                    )))
                } else {
                    Err(FirstprError::Other(format!(
                        "Forbidden: {}",
                        response.text().await.unwrap_or_default()
                    )))
                }
            }
            status => Err(FirstprError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}
