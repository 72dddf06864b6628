// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for webemu sessions
//!
//! Provides the request/response types, the cookie-jar collaborator and
//! the transport seam the session layer drives. The transport performs a
//! single exchange per call; redirect following is session policy, not a
//! transport concern.

mod cookie;
mod request;
mod response;
mod transport;

pub use cookie::{Cookie, CookieJar, SameSite};
pub use request::{MultipartField, Request};
pub use response::Response;
pub use transport::{HttpClient, HttpClientConfig, Transport};

use lazy_static::lazy_static;
use reqwest::header::{HeaderMap, HeaderValue};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_6) AppleWebKit/603.1.30 (KHTML, like Gecko) Version/10.1 Safari/603.1.30";

lazy_static! {
    /// Default header profile for page navigations.
    ///
    /// Built once at startup and never mutated; sessions layer their own
    /// overrides on a clone of this map.
    pub static ref DEFAULT_NAVIGATE_HEADERS: HeaderMap = {
        let mut map = HeaderMap::new();
        map.insert(
            "accept",
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        map.insert(
            "accept-language",
            HeaderValue::from_static("en-US;q=0.5,en;q=0.3"),
        );
        map.insert("user-agent", HeaderValue::from_static(DEFAULT_USER_AGENT));
        map
    };

    /// Default header profile for background/XHR-style resource fetches.
    pub static ref DEFAULT_RESOURCE_HEADERS: HeaderMap = {
        let mut map = HeaderMap::new();
        map.insert(
            "accept",
            HeaderValue::from_static("application/json,text/plain,*/*"),
        );
        map.insert(
            "accept-language",
            HeaderValue::from_static("en-US;q=0.5,en;q=0.3"),
        );
        map.insert("user-agent", HeaderValue::from_static(DEFAULT_USER_AGENT));
        map.insert(
            "x-requested-with",
            HeaderValue::from_static("XMLHttpRequest"),
        );
        map
    };
}

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const ACCEPT_LANGUAGE: &str = "accept-language";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
    pub const REFERER: &str = "referer";
    pub const LOCATION: &str = "location";
    pub const X_REQUESTED_WITH: &str = "x-requested-with";
}
