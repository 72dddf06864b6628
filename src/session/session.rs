// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session implementation
//!
//! The session is the stateful unit of this crate: one page or one frame.
//! It owns the referer tracked across navigations, a handle on the shared
//! cookie jar, the two header profiles, and its child frames. Redirects
//! are followed here, hop by hop, against the transport seam.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use super::config::SessionConfig;
use super::options::{FetchOptions, PageOptions};
use super::redirect::RedirectPolicy;
use crate::error::{Error, Result};
use crate::http::{
    headers, CookieJar, HttpClient, HttpClientConfig, Request, Response, Transport,
    DEFAULT_NAVIGATE_HEADERS, DEFAULT_RESOURCE_HEADERS,
};

/// One page or frame of browsing state
///
/// Constructed directly for a root page, or through
/// [`Session::create_frame`] for frames. A session and all of its
/// descendant frames share one cookie jar. Closing a session cascades to
/// its frames and permanently blocks new operations; it never aborts an
/// exchange already in flight.
///
/// Concurrent operations against one session are not serialized here:
/// two navigations racing on the same session produce a last-settled-wins
/// result on the referer and the frame list.
pub struct Session {
    /// URL of the last completed page navigation, empty initially
    referer: RwLock<String>,
    /// Jar shared across this session tree
    cookie_jar: CookieJar,
    /// Header profile for page navigations
    navigate_headers: HeaderMap,
    /// Header profile for background resource fetches
    resource_headers: HeaderMap,
    /// Once set, permanently blocks new operations
    closed: AtomicBool,
    /// Back-reference for frames; informational only
    parent: Weak<Session>,
    /// Handle on our own Arc, for wiring frame parent links
    weak_self: Weak<Session>,
    /// Child frames in creation order
    frames: RwLock<Vec<Arc<Session>>>,
    /// Transport collaborator
    transport: Arc<dyn Transport>,
    /// Redirect-following policy
    redirect: RedirectPolicy,
}

impl Session {
    /// Create a root session backed by the reqwest transport
    pub fn new(config: SessionConfig) -> Result<Arc<Self>> {
        let cookie_jar = config.cookie_jar.clone().unwrap_or_default();
        let transport = HttpClient::with_cookie_jar(
            HttpClientConfig {
                user_agent: config.user_agent.clone(),
                timeout: config.timeout,
                accept_invalid_certs: config.accept_invalid_certs,
                proxy: config.proxy.clone(),
            },
            cookie_jar.clone(),
        )?;

        Ok(Self::build(&config, cookie_jar, Arc::new(transport)))
    }

    /// Create a root session over a custom transport
    pub fn with_transport(config: SessionConfig, transport: Arc<dyn Transport>) -> Arc<Self> {
        let cookie_jar = config.cookie_jar.clone().unwrap_or_default();
        Self::build(&config, cookie_jar, transport)
    }

    /// Create a fresh jar suitable for sharing across session trees
    pub fn jar() -> CookieJar {
        CookieJar::new()
    }

    fn build(
        config: &SessionConfig,
        cookie_jar: CookieJar,
        transport: Arc<dyn Transport>,
    ) -> Arc<Self> {
        let mut navigate_profile = DEFAULT_NAVIGATE_HEADERS.clone();
        let mut resource_profile = DEFAULT_RESOURCE_HEADERS.clone();
        if let Ok(ua) = HeaderValue::try_from(config.user_agent.as_str()) {
            navigate_profile.insert(headers::USER_AGENT, ua.clone());
            resource_profile.insert(headers::USER_AGENT, ua);
        }

        Arc::new_cyclic(|weak| Self {
            referer: RwLock::new(config.referer.clone()),
            cookie_jar,
            navigate_headers: merged_headers(&navigate_profile, &config.navigate_headers),
            resource_headers: merged_headers(&resource_profile, &config.resource_headers),
            closed: AtomicBool::new(false),
            parent: Weak::new(),
            weak_self: weak.clone(),
            frames: RwLock::new(Vec::new()),
            transport,
            redirect: RedirectPolicy::limited(config.max_redirects),
        })
    }

    /// Navigate this session to a URL, following redirects like a browser
    ///
    /// A terminal (non-redirect) result updates the tracked referer to the
    /// final resolved URL and destroys all current frames, since the page
    /// they belonged to no longer exists. Transport failures propagate
    /// unmodified.
    pub async fn navigate(
        &self,
        method: Method,
        url: &str,
        options: PageOptions,
    ) -> Result<Response> {
        self.ensure_open()?;
        if url.is_empty() {
            return Err(Error::MissingUrl);
        }

        debug!(%method, url, "navigate");

        let mut request = self.page_request(method, url, &options)?;
        let mut hops = 0usize;

        loop {
            let mut response = self.transport.execute(request).await?;

            match self.redirect.next_target(&response, hops)? {
                Some(target) => {
                    hops += 1;
                    debug!(location = %target, hops, "following navigate redirect");
                    request =
                        self.page_request(Method::GET, target.as_str(), &PageOptions::new())?;
                }
                None => {
                    response.redirected = hops > 0;
                    self.close_all_frames();
                    *self.referer.write() = response.url_str().to_string();
                    debug!(referer = %response.url_str(), "navigate complete");
                    return Ok(response);
                }
            }
        }
    }

    /// Fetch a background resource (XHR-style) without changing pages
    ///
    /// Redirects are followed exactly as in [`Session::navigate`], but a
    /// terminal result never updates the referer and never touches frames.
    pub async fn fetch_resource(
        &self,
        method: Method,
        url: &str,
        options: FetchOptions,
    ) -> Result<Response> {
        self.ensure_open()?;
        if url.is_empty() {
            return Err(Error::MissingUrl);
        }

        debug!(%method, url, "fetch resource");

        let mut request = self.resource_request(method, url, &options)?;
        let mut hops = 0usize;

        loop {
            let mut response = self.transport.execute(request).await?;

            match self.redirect.next_target(&response, hops)? {
                Some(target) => {
                    hops += 1;
                    debug!(location = %target, hops, "following resource redirect");
                    request =
                        self.resource_request(Method::GET, target.as_str(), &FetchOptions::new())?;
                }
                None => {
                    response.redirected = hops > 0;
                    return Ok(response);
                }
            }
        }
    }

    /// Navigate with GET and optional query pairs
    pub async fn get_page(&self, url: &str, query: &[(String, String)]) -> Result<Response> {
        self.navigate(Method::GET, url, PageOptions::new().query_pairs(query))
            .await
    }

    /// Navigate with a form-encoded POST
    pub async fn post_page(
        &self,
        url: &str,
        form: HashMap<String, String>,
    ) -> Result<Response> {
        self.navigate(Method::POST, url, PageOptions::new().form(form))
            .await
    }

    /// Fetch a resource with GET and optional query pairs
    pub async fn get_resource(&self, url: &str, query: &[(String, String)]) -> Result<Response> {
        self.fetch_resource(Method::GET, url, FetchOptions::new().query_pairs(query))
            .await
    }

    /// Fetch a resource with a JSON POST
    pub async fn post_resource<T: Serialize>(&self, url: &str, json: &T) -> Result<Response> {
        self.fetch_resource(Method::POST, url, FetchOptions::new().json(json)?)
            .await
    }

    /// Create a child frame under this session
    ///
    /// The frame shares this session's cookie jar, starts from its current
    /// referer, and layers the supplied overrides onto this session's
    /// header profiles. Construction is synchronous; no network I/O.
    pub fn create_frame(
        &self,
        navigate_overrides: &HashMap<String, String>,
        resource_overrides: &HashMap<String, String>,
    ) -> Result<Arc<Session>> {
        self.ensure_open()?;

        debug!("creating frame");

        let frame = Arc::new_cyclic(|weak| Session {
            referer: RwLock::new(self.referer.read().clone()),
            cookie_jar: self.cookie_jar.clone(),
            navigate_headers: merged_headers(&self.navigate_headers, navigate_overrides),
            resource_headers: merged_headers(&self.resource_headers, resource_overrides),
            closed: AtomicBool::new(false),
            parent: self.weak_self.clone(),
            weak_self: weak.clone(),
            frames: RwLock::new(Vec::new()),
            transport: Arc::clone(&self.transport),
            redirect: self.redirect,
        });

        self.frames.write().push(Arc::clone(&frame));
        Ok(frame)
    }

    /// Close this session and cascade to every current frame
    ///
    /// Idempotent. Blocks new operations only; exchanges already in
    /// flight run to completion.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("session closed");
        }
        self.close_all_frames();
    }

    fn close_all_frames(&self) {
        let frames = std::mem::take(&mut *self.frames.write());
        for frame in frames {
            frame.close();
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::PageClosed);
        }
        Ok(())
    }

    fn page_request(&self, method: Method, url: &str, options: &PageOptions) -> Result<Request> {
        let mut request = Request::new(method.clone(), url)?
            .with_headers(self.navigate_headers.clone())
            .merge_headers(&options.headers)
            .query(&options.query);

        request = self.attach_referer(request);

        if is_mutating(&method) {
            if let Some(form) = &options.form {
                request = request.form(form);
            }
            if let Some(fields) = &options.multipart {
                request = request.multipart(fields);
            }
            if let Some(body) = &options.body {
                request = request.body(body.clone());
            }
        }

        Ok(request)
    }

    fn resource_request(
        &self,
        method: Method,
        url: &str,
        options: &FetchOptions,
    ) -> Result<Request> {
        let mut request = Request::new(method.clone(), url)?
            .with_headers(self.resource_headers.clone())
            .merge_headers(&options.headers)
            .query(&options.query);

        request = self.attach_referer(request);

        if is_mutating(&method) {
            if let Some(json) = &options.json {
                request = request.json(json)?;
            }
            if let Some(form) = &options.form {
                request = request.form(form);
            }
            if let Some(fields) = &options.multipart {
                request = request.multipart(fields);
            }
            if let Some(body) = &options.body {
                request = request.body(body.clone());
            }
        }

        Ok(request)
    }

    // Only the explicitly tracked referer ever goes out; the target URL is
    // never used to synthesize one.
    fn attach_referer(&self, request: Request) -> Request {
        let referer = self.referer.read().clone();
        if referer.is_empty() {
            request
        } else {
            request.header(headers::REFERER, referer)
        }
    }

    /// Get the tracked referer, empty if no navigation has completed
    pub fn referer(&self) -> String {
        self.referer.read().clone()
    }

    /// Get the shared cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Check if this session has been closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Get the parent session, if this is a frame and the parent is alive
    pub fn parent(&self) -> Option<Arc<Session>> {
        self.parent.upgrade()
    }

    /// Get the current frames in creation order
    pub fn frames(&self) -> Vec<Arc<Session>> {
        self.frames.read().clone()
    }

    /// Get the number of open frames
    pub fn frame_count(&self) -> usize {
        self.frames.read().len()
    }

    /// Get the effective navigate header profile
    pub fn navigate_header_profile(&self) -> &HeaderMap {
        &self.navigate_headers
    }

    /// Get the effective resource header profile
    pub fn resource_header_profile(&self) -> &HeaderMap {
        &self.resource_headers
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

fn is_mutating(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// Layer string-keyed overrides onto a header profile, override wins
fn merged_headers(base: &HeaderMap, overrides: &HashMap<String, String>) -> HeaderMap {
    let mut merged = base.clone();
    for (name, value) in overrides {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            merged.insert(name, value);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use bytes::Bytes;
    use parking_lot::Mutex;
    use reqwest::StatusCode;

    /// Scripted transport: pops one canned exchange per request, records
    /// every request it saw.
    struct MockTransport {
        responses: Mutex<VecDeque<(StatusCode, HeaderMap)>>,
        requests: Mutex<Vec<Request>>,
    }

    impl MockTransport {
        fn scripted(responses: Vec<(StatusCode, HeaderMap)>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<Request> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(&self, request: Request) -> Result<Response> {
            let (status, headers) = self
                .responses
                .lock()
                .pop_front()
                .expect("unscripted exchange");
            let response = Response::new(status, headers, Bytes::new(), request.url.clone());
            self.requests.lock().push(request);
            Ok(response)
        }
    }

    fn ok() -> (StatusCode, HeaderMap) {
        (StatusCode::OK, HeaderMap::new())
    }

    fn redirect_to(location: &str) -> (StatusCode, HeaderMap) {
        let mut headers = HeaderMap::new();
        headers.insert("location", HeaderValue::from_str(location).unwrap());
        (StatusCode::FOUND, headers)
    }

    fn session_over(transport: Arc<MockTransport>) -> Arc<Session> {
        Session::with_transport(SessionConfig::default(), transport)
    }

    #[tokio::test]
    async fn test_header_layering() {
        let transport = MockTransport::scripted(vec![ok()]);
        let session = session_over(transport.clone());

        session
            .navigate(
                Method::GET,
                "https://h/a",
                PageOptions::new()
                    .header("accept", "application/xml")
                    .header("x-trace", "1"),
            )
            .await
            .unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(
            sent.headers.get("accept").unwrap().to_str().unwrap(),
            "application/xml"
        );
        assert_eq!(sent.headers.get("x-trace").unwrap().to_str().unwrap(), "1");
        // profile keys without overrides survive
        assert!(sent.headers.contains_key("user-agent"));
        assert!(sent.headers.contains_key("accept-language"));
        // no referer before any completed navigation
        assert!(!sent.headers.contains_key("referer"));
    }

    #[tokio::test]
    async fn test_referer_chains_between_navigations() {
        let transport = MockTransport::scripted(vec![ok(), ok()]);
        let session = session_over(transport.clone());

        session
            .navigate(Method::GET, "https://h/first", PageOptions::new())
            .await
            .unwrap();
        session
            .navigate(Method::GET, "https://h/second", PageOptions::new())
            .await
            .unwrap();

        let requests = transport.requests();
        assert!(!requests[0].headers.contains_key("referer"));
        assert_eq!(
            requests[1].headers.get("referer").unwrap().to_str().unwrap(),
            "https://h/first"
        );
        assert_eq!(session.referer(), "https://h/second");
    }

    #[tokio::test]
    async fn test_redirect_chain_resolves_to_terminal() {
        let transport = MockTransport::scripted(vec![redirect_to("/b"), redirect_to("c"), ok()]);
        let session = session_over(transport.clone());

        let response = session
            .navigate(Method::GET, "https://h/a/x", PageOptions::new())
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[1].url.as_str(), "https://h/b");
        // "c" resolves against https://h/b, not the original input URL
        assert_eq!(requests[2].url.as_str(), "https://h/c");

        assert_eq!(response.status_code(), 200);
        assert!(response.redirected);
        assert_eq!(session.referer(), "https://h/c");
    }

    #[tokio::test]
    async fn test_method_downgrade_on_redirect() {
        let transport = MockTransport::scripted(vec![redirect_to("/done"), ok()]);
        let session = session_over(transport.clone());

        session
            .navigate(
                Method::POST,
                "https://h/submit",
                PageOptions::new().form_field("user", "me"),
            )
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert!(requests[0].body.is_some());
        assert_eq!(requests[1].method, Method::GET);
        assert!(requests[1].body.is_none());
    }

    #[tokio::test]
    async fn test_body_ignored_for_non_mutating_method() {
        let transport = MockTransport::scripted(vec![ok()]);
        let session = session_over(transport.clone());

        session
            .navigate(
                Method::GET,
                "https://h/a",
                PageOptions::new().form_field("dropped", "yes"),
            )
            .await
            .unwrap();

        assert!(transport.requests()[0].body.is_none());
    }

    #[tokio::test]
    async fn test_frame_cascade_on_navigate() {
        let transport = MockTransport::scripted(vec![ok()]);
        let session = session_over(transport.clone());

        let frame_a = session
            .create_frame(&HashMap::new(), &HashMap::new())
            .unwrap();
        let frame_b = session
            .create_frame(&HashMap::new(), &HashMap::new())
            .unwrap();
        assert_eq!(session.frame_count(), 2);

        session
            .navigate(Method::GET, "https://h/next-page", PageOptions::new())
            .await
            .unwrap();

        assert!(frame_a.is_closed());
        assert!(frame_b.is_closed());
        assert_eq!(session.frame_count(), 0);
        assert!(!session.is_closed());
    }

    #[tokio::test]
    async fn test_resource_fetch_isolation() {
        let transport = MockTransport::scripted(vec![ok(), redirect_to("/moved"), ok()]);
        let session = session_over(transport.clone());

        session
            .navigate(Method::GET, "https://h/page", PageOptions::new())
            .await
            .unwrap();
        let frame = session
            .create_frame(&HashMap::new(), &HashMap::new())
            .unwrap();

        let response = session
            .fetch_resource(Method::GET, "https://h/api/data", FetchOptions::new())
            .await
            .unwrap();

        assert!(response.redirected);
        assert_eq!(session.referer(), "https://h/page");
        assert!(!frame.is_closed());
        assert_eq!(session.frame_count(), 1);
    }

    #[tokio::test]
    async fn test_resource_profile_and_json_payload() {
        let transport = MockTransport::scripted(vec![ok()]);
        let session = session_over(transport.clone());

        session
            .post_resource("https://h/api", &serde_json::json!({ "id": 7 }))
            .await
            .unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(
            sent.headers.get("x-requested-with").unwrap().to_str().unwrap(),
            "XMLHttpRequest"
        );
        assert_eq!(
            sent.headers.get("content-type").unwrap().to_str().unwrap(),
            "application/json"
        );
        let body: serde_json::Value = serde_json::from_slice(sent.body.as_ref().unwrap()).unwrap();
        assert_eq!(body["id"], 7);
    }

    #[tokio::test]
    async fn test_closed_session_rejects_everything() {
        let transport = MockTransport::scripted(vec![]);
        let session = session_over(transport.clone());
        session.close();

        let nav = session
            .navigate(Method::GET, "https://h/a", PageOptions::new())
            .await;
        assert!(matches!(nav, Err(Error::PageClosed)));

        let fetch = session
            .fetch_resource(Method::GET, "https://h/a", FetchOptions::new())
            .await;
        assert!(matches!(fetch, Err(Error::PageClosed)));

        let frame = session.create_frame(&HashMap::new(), &HashMap::new());
        assert!(matches!(frame, Err(Error::PageClosed)));

        // no network call was attempted
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_url_rejected_before_transport() {
        let transport = MockTransport::scripted(vec![]);
        let session = session_over(transport.clone());

        let nav = session.navigate(Method::GET, "", PageOptions::new()).await;
        assert!(matches!(nav, Err(Error::MissingUrl)));

        let fetch = session
            .fetch_resource(Method::POST, "", FetchOptions::new())
            .await;
        assert!(matches!(fetch, Err(Error::MissingUrl)));

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_frame_shares_cookie_jar() {
        let transport = MockTransport::scripted(vec![]);
        let session = session_over(transport);
        let frame = session
            .create_frame(&HashMap::new(), &HashMap::new())
            .unwrap();

        assert!(frame.cookie_jar().shares_store_with(session.cookie_jar()));

        frame
            .cookie_jar()
            .add(crate::http::Cookie::new("sid", "42").domain("h"));
        let url = url::Url::parse("https://h/").unwrap();
        assert_eq!(session.cookie_jar().get_cookies(&url).len(), 1);
    }

    #[tokio::test]
    async fn test_frame_inherits_referer_and_header_profiles() {
        let transport = MockTransport::scripted(vec![ok()]);
        let session = session_over(transport);

        session
            .navigate(Method::GET, "https://h/page", PageOptions::new())
            .await
            .unwrap();

        let mut nav_overrides = HashMap::new();
        nav_overrides.insert("accept-language".to_string(), "fi-FI".to_string());
        let frame = session.create_frame(&nav_overrides, &HashMap::new()).unwrap();

        assert_eq!(frame.referer(), "https://h/page");
        assert_eq!(
            frame
                .navigate_header_profile()
                .get("accept-language")
                .unwrap()
                .to_str()
                .unwrap(),
            "fi-FI"
        );
        // untouched profile key inherited from the parent
        assert!(frame.navigate_header_profile().contains_key("user-agent"));
        // resource profile unchanged
        assert_eq!(
            frame
                .resource_header_profile()
                .get("accept-language")
                .unwrap()
                .to_str()
                .unwrap(),
            "en-US;q=0.5,en;q=0.3"
        );
        assert!(frame.parent().is_some());
    }

    #[tokio::test]
    async fn test_nested_frame_close_cascades_depth_first() {
        let transport = MockTransport::scripted(vec![]);
        let session = session_over(transport);

        let frame = session
            .create_frame(&HashMap::new(), &HashMap::new())
            .unwrap();
        let nested = frame
            .create_frame(&HashMap::new(), &HashMap::new())
            .unwrap();

        session.close();

        assert!(session.is_closed());
        assert!(frame.is_closed());
        assert!(nested.is_closed());
        assert_eq!(session.frame_count(), 0);
        assert_eq!(frame.frame_count(), 0);
    }

    #[tokio::test]
    async fn test_idempotent_close() {
        let transport = MockTransport::scripted(vec![]);
        let session = session_over(transport);
        let _ = session.create_frame(&HashMap::new(), &HashMap::new());

        session.close();
        session.close();

        assert!(session.is_closed());
        assert_eq!(session.frame_count(), 0);
    }

    #[tokio::test]
    async fn test_too_many_redirects() {
        let transport = MockTransport::scripted(vec![
            redirect_to("/1"),
            redirect_to("/2"),
            redirect_to("/3"),
        ]);
        let session = Session::with_transport(
            SessionConfig::new().max_redirects(2),
            transport.clone(),
        );

        let err = session
            .navigate(Method::GET, "https://h/start", PageOptions::new())
            .await
            .unwrap_err();

        assert!(err.is_redirect_loop());
        // the two allowed hops were issued, the third was not
        assert_eq!(transport.requests().len(), 3);
        // a failed navigation never updates the referer
        assert_eq!(session.referer(), "");
    }

    #[tokio::test]
    async fn test_locationless_redirect_is_terminal() {
        let transport =
            MockTransport::scripted(vec![(StatusCode::MOVED_PERMANENTLY, HeaderMap::new())]);
        let session = session_over(transport);

        let response = session
            .navigate(Method::GET, "https://h/legacy", PageOptions::new())
            .await
            .unwrap();

        assert_eq!(response.status_code(), 301);
        assert!(!response.redirected);
        assert_eq!(session.referer(), "https://h/legacy");
    }

    #[tokio::test]
    async fn test_shared_jar_across_unrelated_trees() {
        let jar = Session::jar();
        let transport_a = MockTransport::scripted(vec![]);
        let transport_b = MockTransport::scripted(vec![]);

        let a = Session::with_transport(
            SessionConfig::new().cookie_jar(jar.clone()),
            transport_a,
        );
        let b = Session::with_transport(
            SessionConfig::new().cookie_jar(jar.clone()),
            transport_b,
        );

        assert!(a.cookie_jar().shares_store_with(b.cookie_jar()));
    }

    #[tokio::test]
    async fn test_login_flow_end_to_end() {
        use wiremock::matchers::{header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("set-cookie", "sid=abc123")
                    .insert_header("location", "/home"),
            )
            .mount(&server)
            .await;

        // /home only answers when the login cookie comes back
        Mock::given(method("GET"))
            .and(path("/home"))
            .and(header("cookie", "sid=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_string("welcome"))
            .mount(&server)
            .await;

        let session = Session::new(SessionConfig::default()).unwrap();

        let mut form = HashMap::new();
        form.insert("user".to_string(), "me".to_string());
        form.insert("pass".to_string(), "secret".to_string());

        let response = session
            .post_page(&format!("{}/login", server.uri()), form)
            .await
            .unwrap();

        assert_eq!(response.status_code(), 200);
        assert!(response.redirected);
        assert_eq!(response.text().unwrap(), "welcome");
        assert!(session.referer().ends_with("/home"));
        assert_eq!(session.cookie_jar().len(), 1);
    }
}
