// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP transport seam
//!
//! [`Transport`] is the single capability the session layer consumes: one
//! exchange in, one completion out. The reqwest-backed [`HttpClient`] is
//! the production implementation; tests substitute scripted transports.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::debug;

use super::cookie::CookieJar;
use super::headers;
use super::request::Request;
use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// One HTTP exchange: request in, completion (response or failure) out
///
/// Implementations must not follow redirects; a 3xx comes back to the
/// caller like any other response. Connection management, TLS and retries
/// are below this seam and opaque to the session layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single exchange
    async fn execute(&self, request: Request) -> Result<Response>;
}

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout
    pub timeout: Duration,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

/// reqwest-backed transport with cookie jar attachment
///
/// The jar is read before each exchange (Cookie header) and written after
/// it (Set-Cookie headers). Redirect following is disabled here on
/// purpose; the session layer owns that policy.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    cookie_jar: CookieJar,
}

impl HttpClient {
    /// Create a transport with a fresh cookie jar
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        Self::with_cookie_jar(config, CookieJar::new())
    }

    /// Create a transport attached to an existing shared jar
    pub fn with_cookie_jar(config: HttpClientConfig, cookie_jar: CookieJar) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::none())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .cookie_store(false); // the shared jar is ours, not reqwest's

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            cookie_jar,
        })
    }

    /// Get the attached cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Get transport configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: Request) -> Result<Response> {
        debug!(method = %request.method, url = %request.url, "executing exchange");

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(cookie_header) = self.cookie_jar.get_cookie_header(&request.url) {
            builder = builder.header(headers::COOKIE, cookie_header);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;

        let final_url = response.url().clone();
        let status = response.status();
        let response_headers = response.headers().clone();

        for cookie in response_headers.get_all(headers::SET_COOKIE) {
            if let Ok(cookie_str) = cookie.to_str() {
                self.cookie_jar.add_from_header(cookie_str, &final_url);
            }
        }

        let body = response.bytes().await?;

        debug!(status = status.as_u16(), url = %final_url, "exchange complete");

        Ok(Response::new(status, response_headers, body, final_url))
    }
}
