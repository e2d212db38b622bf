use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod mock_adapter;
pub mod playwright_adapter;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("launch failed: {0}")]
    LaunchFailed(String),
    #[error("navigation failed: {0}")]
    NavigationFailed(String),
    #[error("script evaluation failed: {0}")]
    ScriptFailed(String),
    #[error("browser error: {0}")]
    Other(String),
}

/// Outcome of a DOM lookup. Replaces "try find, catch not-found" control
/// flow with ordinary branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found,
    NotFound,
}

/// Raw per-anchor snapshot taken from the live DOM. `img_src` is `None`
/// when the anchor has no image descendant; `caption` is `None` when the
/// sibling-scope heading lookup failed. Filtering happens in the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostAnchor {
    pub img_src: Option<String>,
    pub caption: Option<String>,
}

/// Narrow capability the scrape flow needs from a live page. Keeping this
/// seam selector-driven lets the DOM matching strategy change without
/// touching navigation, pagination or extraction logic, and lets tests run
/// against a scripted mock.
#[async_trait]
pub trait ProfilePage: Send + Sync {
    /// Navigate to a URL, waiting only for the navigation itself.
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    /// Wait up to `timeout` for a selector to be present. A timeout is an
    /// ordinary `NotFound`, not an error.
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Lookup, BrowserError>;

    async fn current_url(&self) -> Result<String, BrowserError>;

    async fn title(&self) -> Result<String, BrowserError>;

    /// Programmatically click the first element matching `selector` (and
    /// containing `text`, when given) via direct event dispatch. No
    /// scrolling or pointer simulation, so overlays cannot intercept it.
    async fn dispatch_click(
        &self,
        selector: &str,
        text: Option<&str>,
    ) -> Result<Lookup, BrowserError>;

    /// Snapshot all anchors under `scope` (or the whole page when `None`),
    /// resolving each anchor's image source and best-effort caption through
    /// `caption_selector` applied to the anchor's parent scope.
    async fn post_anchors(
        &self,
        scope: Option<&str>,
        caption_selector: &str,
    ) -> Result<Vec<PostAnchor>, BrowserError>;

    /// Current page HTML, for diagnostics.
    async fn page_source(&self) -> Result<String, BrowserError>;

    /// Screenshot to `path`, for diagnostics.
    async fn save_screenshot(&self, path: &str) -> Result<(), BrowserError>;
}
