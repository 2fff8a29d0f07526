use crate::config::Config;
use crate::constants::ACCESS_KEY_HEADER;
use crate::errors::{AppError, AppResult};
use crate::utils::format_elapsed;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::time::Instant;
use tracing::{info, warn};

/// Anything that can answer a GET on an API endpoint with a JSON value.
///
/// The orchestrator only talks to this trait, which keeps it independent of
/// HTTP and lets tests drive it with canned responses.
#[allow(async_fn_in_trait)]
pub trait JsonSource {
    /// Returns the parsed body, or `None` when no data could be obtained.
    ///
    /// Implementations report failures themselves; callers treat `None` as
    /// "no data" and carry on.
    async fn fetch(&self, endpoint: &str) -> Option<Value>;
}

/// HTTP client for the course-catalog API.
///
/// A single `reqwest::Client` is reused for the whole run so connections are
/// kept alive between the sequential requests.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds the client with the access-key header and timeout from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the access key is not a valid header value
    /// and `NetworkError` if the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut key = HeaderValue::from_str(&config.access_key).map_err(|e| {
            AppError::InvalidConfig(format!("ACCESS_KEY is not a valid header value: {e}"))
        })?;
        key.set_sensitive(true);

        let name = HeaderName::from_bytes(ACCESS_KEY_HEADER.as_bytes())
            .map_err(|e| AppError::InvalidConfig(format!("Invalid header name: {e}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(name, key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint; the endpoint is appended verbatim.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Sends a GET for `endpoint` and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// - `NetworkError` on connection failures and timeouts
    /// - `HttpStatus` on any non-2xx response
    /// - `ParseError` if a 2xx body is not valid JSON
    pub async fn get_json(&self, endpoint: &str) -> AppResult<Value> {
        let url = self.url_for(endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to fetch {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        // decode failures map to `ParseError`, body read failures to `NetworkError`
        Ok(response.json::<Value>().await?)
    }
}

impl JsonSource for ApiClient {
    async fn fetch(&self, endpoint: &str) -> Option<Value> {
        let url = self.url_for(endpoint);
        info!("GET {url} ...");

        let start = Instant::now();
        let result = self.get_json(endpoint).await;
        let elapsed = format_elapsed(start.elapsed());

        match result {
            Ok(value) => {
                info!("GET {url} ... OK ({elapsed})");
                Some(value)
            }
            Err(e) => {
                warn!(error = %e, "GET {url} ... FAILED ({elapsed})");
                None
            }
        }
    }
}
