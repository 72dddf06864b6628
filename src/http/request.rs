// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request representation and body encoding

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use super::headers;
use crate::error::Result;

/// A single outgoing HTTP exchange
///
/// Carries exactly what the session layer decided to send: the merged
/// header set, the shared jar is attached by the transport, and the body
/// is already encoded. The transport performs one exchange per request;
/// it never follows redirects on its own.
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL (query pairs already attached)
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Encoded request body
    pub body: Option<Bytes>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl Request {
    /// Create a new request
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        })
    }

    /// Create a GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Replace the full header set
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Layer string-keyed overrides onto the current header set, override
    /// wins per key
    pub fn merge_headers(mut self, overrides: &HashMap<String, String>) -> Self {
        for (name, value) in overrides {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                self.headers.insert(name, value);
            }
        }
        self
    }

    /// Append query pairs to the URL
    pub fn query(mut self, pairs: &[(String, String)]) -> Self {
        if !pairs.is_empty() {
            self.url
                .query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        self
    }

    /// Set a raw body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a form-urlencoded body
    pub fn form(mut self, data: &HashMap<String, String>) -> Self {
        let body = data
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding_encode(k), urlencoding_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.body = Some(Bytes::from(body));
        self.header(headers::CONTENT_TYPE, "application/x-www-form-urlencoded")
    }

    /// Set a JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Bytes::from(json));
        Ok(self.header(headers::CONTENT_TYPE, "application/json"))
    }

    /// Set a multipart/form-data body
    pub fn multipart(mut self, fields: &[MultipartField]) -> Self {
        let boundary = multipart_boundary();
        self.body = Some(encode_multipart(fields, &boundary));
        self.header(
            headers::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

/// One field of a multipart/form-data body
#[derive(Debug, Clone)]
pub struct MultipartField {
    /// Field name
    pub name: String,
    /// File name, for file parts
    pub filename: Option<String>,
    /// Part content type
    pub content_type: Option<String>,
    /// Part data
    pub data: Bytes,
}

impl MultipartField {
    /// Create a plain text field
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: None,
            data: Bytes::from(value.into()),
        }
    }

    /// Create a file field
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: Some(content_type.into()),
            data: data.into(),
        }
    }
}

/// URL encode a string
fn urlencoding_encode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push('+'),
            _ => {
                for byte in c.to_string().bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

/// Generate a multipart boundary unique enough per process
fn multipart_boundary() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!(
        "----webemu{:x}{:x}",
        duration.as_secs(),
        duration.subsec_nanos()
    )
}

/// Encode fields as a multipart/form-data body
fn encode_multipart(fields: &[MultipartField], boundary: &str) -> Bytes {
    let mut out = Vec::new();
    for field in fields {
        out.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match &field.filename {
            Some(filename) => out.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    field.name, filename
                )
                .as_bytes(),
            ),
            None => out.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", field.name).as_bytes(),
            ),
        }
        if let Some(ct) = &field.content_type {
            out.extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&field.data);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    Bytes::from(out)
}
