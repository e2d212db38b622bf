use super::{BrowserError, Lookup, PostAnchor, ProfilePage};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

#[derive(Default)]
struct MockState {
    visited: Vec<String>,
    click_attempts: usize,
    scopes: Vec<Option<String>>,
}

/// Scripted page used by unit and flow tests: which container waits
/// succeed, whether the desktop page redirects to a login wall, how many
/// load-more probes find the control, and which anchors extraction sees.
pub struct MockProfilePage {
    desktop_container: bool,
    mobile_container: bool,
    login_redirect: bool,
    load_more_rounds: usize,
    dispatch_error_on: Option<usize>,
    anchors: Vec<PostAnchor>,
    state: Mutex<MockState>,
}

impl Default for MockProfilePage {
    fn default() -> Self {
        Self {
            desktop_container: true,
            mobile_container: false,
            login_redirect: false,
            load_more_rounds: 0,
            dispatch_error_on: None,
            anchors: Vec::new(),
            state: Mutex::new(MockState::default()),
        }
    }
}

impl MockProfilePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_desktop_container(mut self, present: bool) -> Self {
        self.desktop_container = present;
        self
    }

    pub fn with_mobile_container(mut self, present: bool) -> Self {
        self.mobile_container = present;
        self
    }

    pub fn with_login_redirect(mut self, redirect: bool) -> Self {
        self.login_redirect = redirect;
        self
    }

    /// The load-more control exists for exactly this many probes and is
    /// absent afterwards.
    pub fn with_load_more_rounds(mut self, rounds: usize) -> Self {
        self.load_more_rounds = rounds;
        self
    }

    /// Make the n-th click dispatch (1-based) fail with a script error.
    pub fn with_dispatch_error_on(mut self, attempt: usize) -> Self {
        self.dispatch_error_on = Some(attempt);
        self
    }

    pub fn with_anchors(mut self, anchors: Vec<PostAnchor>) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn click_attempts(&self) -> usize {
        self.state.lock().unwrap().click_attempts
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    /// Scopes passed to `post_anchors`, in call order.
    pub fn anchor_scopes(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().scopes.clone()
    }

    fn on_mobile(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .visited
            .last()
            .map(|url| url.contains("//m."))
            .unwrap_or(false)
    }
}

#[async_trait]
impl ProfilePage for MockProfilePage {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        info!("[Mock] Navigating to {}", url);
        self.state.lock().unwrap().visited.push(url.to_string());
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<Lookup, BrowserError> {
        info!("[Mock] Waiting for {}", selector);
        let present = if self.on_mobile() {
            self.mobile_container
        } else {
            self.desktop_container
        };
        Ok(if present { Lookup::Found } else { Lookup::NotFound })
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        if self.login_redirect && !self.on_mobile() {
            return Ok("https://www.instagram.com/accounts/login/".to_string());
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .visited
            .last()
            .cloned()
            .unwrap_or_default())
    }

    async fn title(&self) -> Result<String, BrowserError> {
        if self.login_redirect && !self.on_mobile() {
            return Ok("Log in \u{2022} Instagram".to_string());
        }
        Ok("Profile".to_string())
    }

    async fn dispatch_click(
        &self,
        selector: &str,
        _text: Option<&str>,
    ) -> Result<Lookup, BrowserError> {
        let attempt = {
            let mut state = self.state.lock().unwrap();
            state.click_attempts += 1;
            state.click_attempts
        };
        info!("[Mock] Click dispatch #{} on {}", attempt, selector);

        if self.dispatch_error_on == Some(attempt) {
            return Err(BrowserError::ScriptFailed("mock dispatch failure".to_string()));
        }

        Ok(if attempt <= self.load_more_rounds {
            Lookup::Found
        } else {
            Lookup::NotFound
        })
    }

    async fn post_anchors(
        &self,
        scope: Option<&str>,
        _caption_selector: &str,
    ) -> Result<Vec<PostAnchor>, BrowserError> {
        self.state
            .lock()
            .unwrap()
            .scopes
            .push(scope.map(|s| s.to_string()));
        Ok(self.anchors.clone())
    }

    async fn page_source(&self) -> Result<String, BrowserError> {
        Ok("<html><body>mock page</body></html>".to_string())
    }

    async fn save_screenshot(&self, path: &str) -> Result<(), BrowserError> {
        info!("[Mock] Taking screenshot to {}", path);
        if let Some(parent) = std::path::Path::new(path).parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BrowserError::Other(e.to_string()))?;
        }
        tokio::fs::write(path, b"mock screenshot")
            .await
            .map_err(|e| BrowserError::Other(e.to_string()))?;
        Ok(())
    }
}
