//! Retry-aware HTTP client.
//!
//! # Responsibilities
//! - Wrap `reqwest` with a fixed per-call timeout
//! - Retry responses with status exactly 500, linear backoff between attempts
//! - Surface every failure with a verb-prefixed message, logged at error level
//!
//! # Design Decisions
//! - The retry condition is deliberately narrow: transport errors and
//!   non-500 statuses fail immediately. A timeout is not a 500.
//! - Backoff before retry N is `N * base_delay` (linear, not exponential).

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::OutboundError;

/// Retry behavior, configured once per client.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt, so `3` means up to 4 attempts total.
    pub max_retries: u32,
    /// Multiplied by the retry number to produce the backoff delay.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn should_retry(&self, status: StatusCode) -> bool {
        status == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Delay before retry `attempt` (1-based): 1s, 2s, 3s with the default base.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// HTTP client wrapper with uniform error wrapping and bounded retry.
#[derive(Clone)]
pub struct ResilientHttpClient {
    http: reqwest::Client,
    policy: RetryPolicy,
}

impl ResilientHttpClient {
    pub fn new(timeout: Duration, policy: RetryPolicy) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, policy })
    }

    /// GET `url` with query parameters and deserialize the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, OutboundError> {
        let response = self
            .send_with_retry("GET", || self.http.get(url).query(query))
            .await
            .inspect_err(|e| tracing::error!("{e}"))?;

        response.json::<T>().await.map_err(|source| {
            let err = OutboundError::Transport {
                verb: "GET",
                source,
            };
            tracing::error!("{err}");
            err
        })
    }

    /// POST a JSON body to `url` and deserialize the JSON response.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, OutboundError> {
        let response = self
            .send_with_retry("POST", || self.http.post(url).json(body))
            .await
            .inspect_err(|e| tracing::error!("{e}"))?;

        response.json::<T>().await.map_err(|source| {
            let err = OutboundError::Transport {
                verb: "POST",
                source,
            };
            tracing::error!("{err}");
            err
        })
    }

    /// Send a request, retrying while the response status satisfies the
    /// retry condition and the retry budget is not exhausted.
    async fn send_with_retry(
        &self,
        verb: &'static str,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, OutboundError> {
        let mut attempt = 0u32;
        loop {
            match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if self.policy.should_retry(status) && attempt < self.policy.max_retries {
                        attempt += 1;
                        tracing::info!("Retry attempt: {attempt}");
                        tokio::time::sleep(self.policy.backoff(attempt)).await;
                        continue;
                    }
                    if !status.is_success() {
                        return Err(OutboundError::Status {
                            verb,
                            status: status.as_u16(),
                        });
                    }
                    return Ok(response);
                }
                // Transport errors (incl. timeouts) carry no 500 status and
                // are therefore outside the retry condition.
                Err(source) => return Err(OutboundError::Transport { verb, source }),
            }
        }
    }
}
