use std::error::Error as StdError;
use std::time::Duration;

use log::debug;
use reqwest::Url;
use thiserror::Error;

use crate::cep::validation::is_dot_segment;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed upstream exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The exchange with the upstream could not complete.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0} cannot be used as a base URL")]
    InvalidBaseUrl(Url),
    #[error("path segment {0:?} would be dropped from the upstream URL")]
    DotSegment(String),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl TransportError {
    /// The error and its whole source chain, for the `details` field.
    pub fn details(&self) -> String {
        let mut details = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            details.push_str(": ");
            details.push_str(&cause.to_string());
            source = cause.source();
        }
        details
    }
}

#[derive(Debug, Clone)]
pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ViaCepClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(ViaCepClient { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn fetch_by_postal_code(&self, code: &str) -> Result<RawResponse, TransportError> {
        self.get(&[code]).await
    }

    pub async fn fetch_by_address(
        &self,
        state: &str,
        city: &str,
        street: &str
    ) -> Result<RawResponse, TransportError> {
        self.get(&[state, city, street]).await
    }

    async fn get(&self, segments: &[&str]) -> Result<RawResponse, TransportError> {
        let url = self.endpoint(segments)?;
        debug!("Fetching {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("Upstream answered {} ({} bytes)", status, body.len());
        Ok(RawResponse { status, body })
    }

    /// `{base}/{segments..}/json/`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        // `extend` silently skips `.` and `..`.
        if let Some(dot) = segments.iter().find(|segment| is_dot_segment(segment)) {
            return Err(TransportError::DotSegment(dot.to_string()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments)
            .extend(&["json", ""]);
        Ok(url)
    }
}
