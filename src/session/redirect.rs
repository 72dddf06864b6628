// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Redirect resolution policy
//!
//! Applies identically to navigations and resource fetches. A response is
//! a redirect to follow iff its status is 3xx and it carries a Location
//! header; a 3xx without Location is passed through as the terminal
//! response. The target is resolved against the exchange's final request
//! URI, so relative Location values behave the way a browser resolves
//! them. Hops are bounded; the original chain semantics are otherwise
//! preserved, including method downgrade to GET with an empty payload.

use url::Url;

use crate::error::{Error, Result};
use crate::http::Response;

/// Bounded browser-style redirect policy
#[derive(Debug, Clone, Copy)]
pub struct RedirectPolicy {
    /// Maximum hops to follow per operation
    pub max_hops: usize,
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self { max_hops: 10 }
    }
}

impl RedirectPolicy {
    /// Create a policy with the given hop ceiling
    pub fn limited(max_hops: usize) -> Self {
        Self { max_hops }
    }

    /// Decide the next hop for a response
    ///
    /// Returns `Ok(None)` when the response is terminal, `Ok(Some(url))`
    /// with the resolved absolute target when it must be followed, and
    /// `Err` when the hop ceiling has been reached or the Location value
    /// cannot be resolved. `hops` is the number of redirects already
    /// followed in this operation.
    pub fn next_target(&self, response: &Response, hops: usize) -> Result<Option<Url>> {
        if !response.is_redirect() {
            return Ok(None);
        }

        // Lenient: a locationless 3xx is terminal, not an error.
        let Some(location) = response.location() else {
            return Ok(None);
        };

        let target = response.url.join(location)?;

        if hops >= self.max_hops {
            return Err(Error::TooManyRedirects {
                url: target.to_string(),
                hops,
            });
        }

        Ok(Some(target))
    }
}
