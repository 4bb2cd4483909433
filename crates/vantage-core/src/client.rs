//! HTTP transport and retry logic.
//!
//! This module provides the [`Client`] every query and resource wrapper
//! funnels through, plus the [`RetryPolicy`] applied to transient failures.

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("vantage-core/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default number of retries after the initial attempt (three attempts total).
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default initial retry delay in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 200;

/// Default maximum retry delay in milliseconds (cap for exponential backoff).
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 5000;

/// HTTP statuses treated as transient and eligible for retry.
pub const RETRY_STATUS_CODES: [u16; 4] = [500, 502, 503, 504];

/// Retry policy with exponential backoff.
///
/// Applies only to the statuses in [`RETRY_STATUS_CODES`] and to
/// transport-level timeouts and connection failures; every other failure
/// propagates immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,

    /// Delay before the first retry.
    pub initial_delay: Duration,

    /// Cap for the exponentially growing delay.
    pub max_delay: Duration,

    /// Backoff multiplier applied per retry.
    pub backoff_multiplier: u32,
}

impl RetryPolicy {
    /// Create a retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_RETRY_MAX_DELAY_MS),
            backoff_multiplier: 2,
        }
    }

    /// Create a retry policy that never retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_millis(0),
            max_delay: Duration::from_millis(0),
            backoff_multiplier: 1,
        }
    }

    /// Set the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the initial delay.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Calculate the delay before the given retry attempt (1-based).
    ///
    /// delay = min(initial_delay * multiplier^(attempt - 1), max_delay)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let multiplier = self.backoff_multiplier.saturating_pow(attempt - 1);
        let delay_ms = self.initial_delay.as_millis() as u64 * u64::from(multiplier);

        std::cmp::min(Duration::from_millis(delay_ms), self.max_delay)
    }

    /// Check if retries are enabled.
    #[must_use]
    pub const fn has_retries(&self) -> bool {
        self.max_retries > 0
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip surrounding whitespace and path separators from an endpoint so it
/// can be appended to the base URL.
#[must_use]
pub fn normalize_endpoint(endpoint: &str) -> &str {
    endpoint.trim().trim_matches('/')
}

/// HTTP client for the Vantage API.
///
/// Owns one HTTP session shared by every query, cursor, and wrapper derived
/// from it; cloning is cheap and shares the underlying connection pool. All
/// verb methods funnel through a single request path that injects headers,
/// applies the retry policy, and maps response statuses onto [`Error`].
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Config,
    retry_policy: RetryPolicy,
}

impl Client {
    /// Create a client with the default retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP session cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_retry_policy(config, RetryPolicy::new())
    }

    /// Create a client with an explicit retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP session cannot be built.
    pub fn with_retry_policy(config: Config, retry_policy: RetryPolicy) -> Result<Self> {
        let http = reqwest::ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT))
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            config,
            retry_policy,
        })
    }

    /// The configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The retry policy applied to transient failures.
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// See [`Client::request`] error mapping.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::GET, endpoint, None).await
    }

    /// Issue a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`Client::request`] error mapping.
    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::DELETE, endpoint, None).await
    }

    /// Issue a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::request`] error mapping.
    pub async fn post<B>(&self, endpoint: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, Some(serde_json::to_value(body)?))
            .await
    }

    /// Issue a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::request`] error mapping.
    pub async fn put<B>(&self, endpoint: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, Some(serde_json::to_value(body)?))
            .await
    }

    /// Issue a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::request`] error mapping.
    pub async fn patch<B>(&self, endpoint: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, endpoint, Some(serde_json::to_value(body)?))
            .await
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let normalized = normalize_endpoint(endpoint);
        let full = format!("{}{}", self.config.base_url(), normalized);
        Url::parse(&full)
            .map_err(|err| Error::InvalidEndpoint(format!("`{full}`: {err}")))
    }

    /// Single request path shared by every verb: header injection, retry
    /// loop, and response-to-error mapping.
    ///
    /// Status mapping runs before the generic check: 2xx parses the JSON
    /// body, 401 maps to [`Error::Unauthorized`], 404 to [`Error::NotFound`],
    /// statuses in [`RETRY_STATUS_CODES`] consume the retry budget, and
    /// anything else becomes [`Error::HttpError`] immediately.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<Value>,
    ) -> Result<Value> {
        let url = self.endpoint_url(endpoint)?;
        let mut attempt: u32 = 0;
        let mut last_error: Option<Error> = None;

        loop {
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .header(CONTENT_TYPE, "application/json");

            if let Some(api_key) = self.config.api_key() {
                request = request.header(AUTHORIZATION, format!("ApiKey {api_key}"));
            }

            if let Some(body) = &payload {
                request = request.json(body);
            }

            debug!(%method, %url, attempt, "sending request");

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return response.json::<Value>().await.map_err(|err| {
                            Error::ParseError(format!(
                                "Failed to decode response body from `{url}`: {err}"
                            ))
                        });
                    }

                    let body = response.text().await.unwrap_or_default();

                    match status {
                        StatusCode::UNAUTHORIZED => return Err(Error::Unauthorized(body)),
                        StatusCode::NOT_FOUND => return Err(Error::NotFound(body)),
                        status if RETRY_STATUS_CODES.contains(&status.as_u16()) => {
                            last_error = Some(Error::HttpError {
                                status: status.as_u16(),
                                body,
                            });
                        }
                        status => {
                            return Err(Error::HttpError {
                                status: status.as_u16(),
                                body,
                            })
                        }
                    }
                }
                Err(err) => {
                    let error = Error::from(err);
                    if error.is_retryable() {
                        last_error = Some(error);
                    } else {
                        return Err(error);
                    }
                }
            }

            attempt += 1;
            if attempt > self.retry_policy.max_retries {
                break;
            }

            let delay = self.retry_policy.delay_for_attempt(attempt);
            if !delay.is_zero() {
                warn!(%url, attempt, ?delay, "retrying after transient failure");
                sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::ServiceUnavailable(format!("request to `{url}` failed after retries"))
        }))
    }
}
