// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for webemu sessions
//!
//! Every failure is reported through [`Result`] so callers scripting
//! multi-step flows (login, form submission, pagination) can branch on
//! each kind. Nothing in this crate panics on a failed exchange.

use thiserror::Error;

/// Result type alias for webemu operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for webemu sessions
#[derive(Error, Debug)]
pub enum Error {
    /// Operation attempted on a session (page or frame) that has been closed
    #[error("page or frame has been closed")]
    PageClosed,

    /// Operation called without a target URL
    #[error("no URL supplied")]
    MissingUrl,

    /// Opaque transport failure (DNS, connection reset, timeout, TLS)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing failed, either on caller input or on a Location value
    /// that could not be resolved against the current exchange's URI
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Redirect hop ceiling exceeded while following a chain
    #[error("too many redirects ({hops}) following chain, last target {url}")]
    TooManyRedirects { url: String, hops: usize },

    /// Serialization error (JSON payloads, cookie export)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a closed-session rejection
    pub fn is_closed(&self) -> bool {
        matches!(self, Error::PageClosed)
    }

    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is a redirect-loop rejection
    pub fn is_redirect_loop(&self) -> bool {
        matches!(self, Error::TooManyRedirects { .. })
    }

    /// Check if this is a caller error (bad or missing input)
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Error::MissingUrl | Error::Url(_))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
