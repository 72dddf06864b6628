// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session configuration

use std::collections::HashMap;
use std::time::Duration;

use crate::http::{CookieJar, DEFAULT_USER_AGENT};

/// Configuration for a root session
///
/// Header overrides are layered onto the process-wide default profiles at
/// construction; the defaults themselves are never mutated. Frames do not
/// take a config of their own, they inherit from their parent.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Initial referer, empty for none
    pub referer: String,
    /// Existing jar to share with unrelated session trees
    pub cookie_jar: Option<CookieJar>,
    /// Per-instance overrides for the navigate header profile
    pub navigate_headers: HashMap<String, String>,
    /// Per-instance overrides for the resource header profile
    pub resource_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
    /// Transport timeout per exchange
    pub timeout: Duration,
    /// Redirect hop ceiling per operation
    pub max_redirects: usize,
    /// Accept invalid TLS certificates
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            referer: String::new(),
            cookie_jar: None,
            navigate_headers: HashMap::new(),
            resource_headers: HashMap::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

impl SessionConfig {
    /// Create a new session config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial referer
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    /// Share an existing cookie jar
    pub fn cookie_jar(mut self, jar: CookieJar) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Override a navigate-profile header
    pub fn navigate_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.navigate_headers.insert(name.into(), value.into());
        self
    }

    /// Override a resource-profile header
    pub fn resource_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.resource_headers.insert(name.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set per-exchange timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the redirect hop ceiling
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}
