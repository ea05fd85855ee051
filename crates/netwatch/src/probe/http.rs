use std::time::Duration;

use tracing::debug;

use super::Probe;
use super::retry::{Attempt, RetryPolicy};
use super::types::ProbeResult;

/// Whether an HTTP status code counts as the site being up (100-399)
pub fn is_success_status(code: u16) -> bool {
    (100..400).contains(&code)
}

/// Human-readable class of an HTTP status code
fn status_class(code: u16) -> &'static str {
    match code {
        100..=199 => "informational response",
        200..=299 => "successful response",
        300..=399 => "redirection",
        400..=499 => "client error",
        500..=599 => "server error",
        _ => "unexpected status",
    }
}

/// HTTP GET probe
///
/// Any received status code is final: only transport failures (timeout,
/// DNS, refused connection, invalid URL) are retried.
pub struct HttpProbe {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpProbe {
    pub fn new(timeout: Duration, retry: RetryPolicy) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, retry })
    }
}

#[async_trait::async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> ProbeResult {
        let client = &self.client;

        let (result, attempts) = self
            .retry
            .run(|attempt| async move {
                match client.get(url).send().await {
                    Ok(response) => {
                        let code = response.status().as_u16();
                        let detail =
                            format!("request to {url} returned {code} ({})", status_class(code));

                        Attempt::Done(if is_success_status(code) {
                            ProbeResult::up(detail)
                        } else {
                            ProbeResult::down(detail)
                        })
                    }
                    Err(e) => {
                        debug!(url, attempt, error = %e, "HTTP attempt failed");
                        Attempt::Retry(ProbeResult::down(format!(
                            "could not complete the request to {url}: {e}"
                        )))
                    }
                }
            })
            .await;

        debug!(url, attempts, success = result.success, "HTTP probe finished");
        result.with_attempts(attempts)
    }
}
