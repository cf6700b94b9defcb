//! Bounded-time HTTP retrieval with a browser-like identity.

use crate::config::PreviewConfig;
use crate::error::FetchError;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue, REFERER};
use std::time::Duration;
use url::Url;

const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,\
     image/avif,image/webp,image/apng,image/svg+xml,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// A fully read response body.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    /// URL after following redirects.
    pub final_url: Url,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// What to do when a body is larger than allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Keep the first `limit` bytes.
    Truncate,
    /// Fail with [`FetchError::TooLarge`].
    Reject,
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(config: &PreviewConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }

    /// Sends a GET and fails unless a 2xx response arrives within `timeout`.
    /// The same deadline keeps running while the caller reads the body.
    pub async fn fetch_with_timeout(
        &self,
        url: &Url,
        timeout: Duration,
        referer: Option<&Url>,
    ) -> Result<reqwest::Response, FetchError> {
        let mut request = self.client.get(url.as_str()).timeout(timeout);
        if let Some(referer) = referer {
            request = request.header(REFERER, referer.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify(url, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    /// Fetches `url` and reads at most `limit` bytes of its body.
    pub async fn fetch_body(
        &self,
        url: &Url,
        timeout: Duration,
        referer: Option<&Url>,
        limit: usize,
        overflow: Overflow,
    ) -> Result<FetchedBody, FetchError> {
        let response = self.fetch_with_timeout(url, timeout, referer).await?;

        if overflow == Overflow::Reject
            && response
                .content_length()
                .is_some_and(|len| len > limit as u64)
        {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                limit,
            });
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        let body = read_limited(response, url, timeout, limit, overflow).await?;

        Ok(FetchedBody {
            final_url,
            content_type,
            body,
        })
    }
}

/// Streams the body so an absent or lying `Content-Length` cannot push us past `limit`.
async fn read_limited(
    mut response: reqwest::Response,
    url: &Url,
    timeout: Duration,
    limit: usize,
    overflow: Overflow,
) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| classify(url, timeout, e))?
    {
        if body.len() + chunk.len() > limit {
            return match overflow {
                Overflow::Truncate => {
                    body.extend_from_slice(&chunk[..limit - body.len()]);
                    Ok(body)
                }
                Overflow::Reject => Err(FetchError::TooLarge {
                    url: url.to_string(),
                    limit,
                }),
            };
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

fn classify(url: &Url, timeout: Duration, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    } else {
        FetchError::Network(err)
    }
}
