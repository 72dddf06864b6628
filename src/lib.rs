// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Webemu - Browser-Grade HTTP Session Emulation
//!
//! Emulates a browser's page-navigation and sub-resource-fetch behavior
//! over HTTP without a rendering engine. A [`Session`] tracks the state a
//! real browser would keep per page: the cookie jar, the referer chain,
//! distinct header profiles for page loads vs. XHR-style calls, and child
//! frames that die when the page changes.
//!
//! ## Features
//!
//! - Redirect following with browser semantics: method downgrade to GET,
//!   relative Location resolution, bounded hop count
//! - Referer chaining: only completed page navigations move the referer
//! - Shared cookie jar across a session tree (and across trees on request)
//! - Frames as child sessions, destroyed when their page navigates away
//! - Distinct navigate/resource header profiles with per-call overrides
//! - Every failure is a branchable error, never a panic
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use webemu::{Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new(SessionConfig::default())?;
//!
//!     session.get_page("https://example.com/login", &[]).await?;
//!
//!     let mut form = HashMap::new();
//!     form.insert("user".to_string(), "me".to_string());
//!     form.insert("pass".to_string(), "secret".to_string());
//!
//!     // follows the post-login redirect, carries cookies and referer
//!     let home = session.post_page("https://example.com/login", form).await?;
//!     println!("landed on {}", home.url_str());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod session;

// Re-exports for convenience

// Session API
pub use session::{FetchOptions, PageOptions, RedirectPolicy, Session, SessionConfig};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{
    Cookie, CookieJar, HttpClient, HttpClientConfig, MultipartField, Request, Response, SameSite,
    Transport,
};

/// Webemu version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
