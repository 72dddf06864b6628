// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-call payload options
//!
//! Headers and query pairs apply to any method; bodies (form, multipart,
//! JSON, raw) are only attached for mutating methods, mirroring what a
//! browser would actually send.

use std::collections::HashMap;

use bytes::Bytes;
use serde::Serialize;

use crate::error::Result;
use crate::http::MultipartField;

/// Options for a page navigation
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Per-call header overrides, layered over the session's navigate profile
    pub headers: HashMap<String, String>,
    /// Query pairs appended to the URL
    pub query: Vec<(String, String)>,
    /// Form-urlencoded body (mutating methods only)
    pub form: Option<HashMap<String, String>>,
    /// Multipart body (mutating methods only)
    pub multipart: Option<Vec<MultipartField>>,
    /// Raw body (mutating methods only)
    pub body: Option<Bytes>,
}

impl PageOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Override a header for this call
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Append a query pair
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append many query pairs
    pub fn query_pairs(mut self, pairs: &[(String, String)]) -> Self {
        self.query.extend_from_slice(pairs);
        self
    }

    /// Set a form-urlencoded body
    pub fn form(mut self, form: HashMap<String, String>) -> Self {
        self.form = Some(form);
        self
    }

    /// Add one form field
    pub fn form_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set a multipart body
    pub fn multipart(mut self, fields: Vec<MultipartField>) -> Self {
        self.multipart = Some(fields);
        self
    }

    /// Set a raw body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Options for a background resource fetch
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Per-call header overrides, layered over the session's resource profile
    pub headers: HashMap<String, String>,
    /// Query pairs appended to the URL
    pub query: Vec<(String, String)>,
    /// JSON body (mutating methods only); also sets Content-Type
    pub json: Option<serde_json::Value>,
    /// Form-urlencoded body (mutating methods only)
    pub form: Option<HashMap<String, String>>,
    /// Multipart body (mutating methods only)
    pub multipart: Option<Vec<MultipartField>>,
    /// Raw body (mutating methods only)
    pub body: Option<Bytes>,
}

impl FetchOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Override a header for this call
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Append a query pair
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append many query pairs
    pub fn query_pairs(mut self, pairs: &[(String, String)]) -> Self {
        self.query.extend_from_slice(pairs);
        self
    }

    /// Set a JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.json = Some(serde_json::to_value(data)?);
        Ok(self)
    }

    /// Set a form-urlencoded body
    pub fn form(mut self, form: HashMap<String, String>) -> Self {
        self.form = Some(form);
        self
    }

    /// Set a multipart body
    pub fn multipart(mut self, fields: Vec<MultipartField>) -> Self {
        self.multipart = Some(fields);
        self
    }

    /// Set a raw body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}
