// src/core/net.rs
// Page fetching. Redirects are followed; the caller compares `final_url`
// against what it asked for to notice one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, redirect};

use crate::config::consts::{MAX_REDIRECTS, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::TransportError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
    /// Address the response actually came from, after redirects.
    pub final_url: String,
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self { final_url: url.into(), status: 200, body: body.into() }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

/// Anything that can turn a URL into page text.
/// Shared by every book task, hence `Send + Sync`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, TransportError>;
}

/// reqwest-backed fetcher with one pooled client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, TransportError> {
        let request_failed = |source| TransportError::Request { url: s!(url), source };

        let resp = self.client.get(url).send().await.map_err(request_failed)?;
        let final_url = resp.url().to_string();
        let status = resp.status();
        if status.is_server_error() {
            return Err(TransportError::ServerStatus { url: s!(url), status: status.as_u16() });
        }
        let body = resp.text().await.map_err(request_failed)?;

        Ok(FetchResponse { final_url, status: status.as_u16(), body })
    }
}

/// Compare two addresses ignoring a trailing `/`.
pub fn same_address(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}
