// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session and navigation state machine
//!
//! A [`Session`] represents one page (or one frame nested under a page)
//! and carries the state a real browser would: tracked referer, shared
//! cookie jar, distinct header profiles for navigations and background
//! fetches, and a list of child frames that die with the page.

mod config;
mod options;
mod redirect;
#[allow(clippy::module_inception)]
mod session;

pub use config::SessionConfig;
pub use options::{FetchOptions, PageOptions};
pub use redirect::RedirectPolicy;
pub use session::Session;
