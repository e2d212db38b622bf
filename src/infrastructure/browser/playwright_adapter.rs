use super::{BrowserError, Lookup, PostAnchor, ProfilePage};
use crate::core::config::ScrapeConfig;
use crate::core::proxy::ProxySpec;
use crate::infrastructure::proxy::build_auth_extension;
use async_trait::async_trait;
use playwright::api::{Browser, BrowserContext, BrowserType, Page, ProxySettings};
use playwright::Playwright;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Init script making the automation marker invisible to page scripts.
const WEBDRIVER_OVERRIDE: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

/// Pretend the visit came from a search engine; a direct hit with no
/// referer trips the login wall much more often.
const SEARCH_ENGINE_REFERER: &str = "https://www.google.com/";

/// One browser process plus its context and page, owned for exactly one
/// run. `close` must be called on every exit path of the run.
pub struct PlaywrightSession {
    _playwright: Playwright,
    browser: Browser,
    _context: BrowserContext,
    page: Page,
}

fn evasion_args(config: &ScrapeConfig) -> Vec<String> {
    let mut args: Vec<String> = [
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--window-size=1280,1200",
        "--lang=en-US",
        "--ignore-certificate-errors",
        "--allow-insecure-localhost",
        "--disable-blink-features=AutomationControlled",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if config.debug {
        // Keep engine and console output on stderr for later inspection.
        args.push("--enable-logging=stderr".to_string());
        args.push("--v=1".to_string());
    }

    args
}

async fn launch_with_args(
    chromium: &BrowserType,
    headless: bool,
    args: &[String],
) -> Result<Browser, BrowserError> {
    chromium
        .launcher()
        .headless(headless)
        .args(args)
        .launch()
        .await
        .map_err(|e| BrowserError::LaunchFailed(format!("failed to launch browser: {}", e)))
}

async fn launch_with_native_proxy(
    chromium: &BrowserType,
    headless: bool,
    args: &[String],
    spec: &ProxySpec,
) -> Result<Browser, BrowserError> {
    let settings = ProxySettings {
        server: spec.server_url(),
        bypass: None,
        username: spec.username.clone(),
        password: spec.password.clone(),
    };

    chromium
        .launcher()
        .headless(headless)
        .args(args)
        .proxy(settings)
        .launch()
        .await
        .map_err(|e| {
            BrowserError::LaunchFailed(format!("failed to launch with native proxy: {}", e))
        })
}

/// Fallback for authenticated proxies when native routing is unavailable:
/// package a fixed-proxy extension that answers the auth challenge, then
/// relaunch with it loaded. Extensions cannot load in legacy headless, so
/// headless runs switch to the new headless mode via a flag.
async fn launch_with_auth_extension(
    chromium: &BrowserType,
    config: &ScrapeConfig,
    args: &[String],
    spec: &ProxySpec,
) -> Result<Browser, BrowserError> {
    let ext_dir = build_auth_extension(spec)
        .map_err(|e| BrowserError::LaunchFailed(format!("proxy extension packaging failed: {}", e)))?;

    let mut flags = args.to_vec();
    flags.push(format!(
        "--proxy-server={}://{}:{}",
        spec.scheme.extension_scheme(),
        spec.host,
        spec.port
    ));
    flags.push(format!("--disable-extensions-except={}", ext_dir.display()));
    flags.push(format!("--load-extension={}", ext_dir.display()));
    if config.headless {
        flags.push("--headless=new".to_string());
    }

    info!("launching with proxy auth extension at {}", ext_dir.display());
    launch_with_args(chromium, false, &flags).await
}

impl PlaywrightSession {
    /// Build a browser session configured for evasion, proxy routing and
    /// the desktop identity chosen in `config`. Every failure here is
    /// fatal to the run; nothing has been navigated yet.
    pub async fn launch(config: &ScrapeConfig) -> Result<Self, BrowserError> {
        let playwright = Playwright::initialize().await.map_err(|e| {
            BrowserError::LaunchFailed(format!("failed to initialize Playwright: {}", e))
        })?;

        let chromium = playwright.chromium();
        let args = evasion_args(config);

        let browser = match &config.proxy {
            None => launch_with_args(&chromium, config.headless, &args).await?,
            Some(spec) if !spec.has_credentials() => {
                info!("routing through unauthenticated proxy {}", spec);
                let mut flags = args.clone();
                flags.push(format!("--proxy-server={}", spec.server_url()));
                launch_with_args(&chromium, config.headless, &flags).await?
            }
            Some(spec) => {
                info!("routing through authenticated proxy {}", spec);
                match launch_with_native_proxy(&chromium, config.headless, &args, spec).await {
                    Ok(browser) => browser,
                    Err(e) => {
                        warn!("native proxy auth unavailable ({}), falling back to extension", e);
                        launch_with_auth_extension(&chromium, config, &args, spec).await?
                    }
                }
            }
        };

        let mut headers = HashMap::new();
        headers.insert("Referer".to_string(), SEARCH_ENGINE_REFERER.to_string());

        let context = browser
            .context_builder()
            .user_agent(&config.user_agent)
            .extra_http_headers(headers)
            .build()
            .await
            .map_err(|e| BrowserError::LaunchFailed(format!("failed to create context: {}", e)))?;

        context
            .add_init_script(WEBDRIVER_OVERRIDE)
            .await
            .map_err(|e| {
                BrowserError::LaunchFailed(format!("failed to install init script: {}", e))
            })?;

        let page = context
            .new_page()
            .await
            .map_err(|e| BrowserError::LaunchFailed(format!("failed to create page: {}", e)))?;

        debug!("session ready, user agent: {}", config.user_agent);

        Ok(Self {
            _playwright: playwright,
            browser,
            _context: context,
            page,
        })
    }

    /// Tear the browser process down. Best-effort: a close failure is
    /// logged, never propagated, so teardown can run on error paths too.
    pub async fn close(&self) {
        if let Err(e) = self.browser.close().await {
            warn!("failed to close browser cleanly: {}", e);
        }
    }
}

#[async_trait]
impl ProfilePage for PlaywrightSession {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.page
            .goto_builder(url)
            .goto()
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Lookup, BrowserError> {
        let result = self
            .page
            .wait_for_selector_builder(selector)
            .timeout(timeout.as_millis() as f64)
            .wait_for_selector()
            .await;

        match result {
            Ok(Some(_)) => Ok(Lookup::Found),
            Ok(None) => Ok(Lookup::NotFound),
            // The driver reports an exceeded wait as an error; for this
            // seam it is an ordinary NotFound.
            Err(e) => {
                debug!("wait for '{}' ended without a match: {}", selector, e);
                Ok(Lookup::NotFound)
            }
        }
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        self.page
            .url()
            .map_err(|e| BrowserError::Other(format!("failed to get current URL: {}", e)))
    }

    async fn title(&self) -> Result<String, BrowserError> {
        self.page
            .evaluate("document.title", ())
            .await
            .map_err(|e| BrowserError::ScriptFailed(format!("failed to read title: {}", e)))
    }

    async fn dispatch_click(
        &self,
        selector: &str,
        text: Option<&str>,
    ) -> Result<Lookup, BrowserError> {
        let quoted_selector = serde_json::to_string(selector)
            .map_err(|e| BrowserError::ScriptFailed(e.to_string()))?;

        let script = match text {
            Some(needle) => {
                let quoted_needle = serde_json::to_string(needle)
                    .map_err(|e| BrowserError::ScriptFailed(e.to_string()))?;
                format!(
                    "Array.from(document.querySelectorAll({selector})).some((el) => {{ \
                       if (!(el.textContent || '').includes({needle})) return false; \
                       el.click(); return true; }})",
                    selector = quoted_selector,
                    needle = quoted_needle
                )
            }
            None => format!(
                "(() => {{ const el = document.querySelector({selector}); \
                   if (!el) return false; el.click(); return true; }})()",
                selector = quoted_selector
            ),
        };

        let clicked: bool = self
            .page
            .evaluate(&script, ())
            .await
            .map_err(|e| BrowserError::ScriptFailed(format!("click dispatch failed: {}", e)))?;

        Ok(if clicked { Lookup::Found } else { Lookup::NotFound })
    }

    async fn post_anchors(
        &self,
        scope: Option<&str>,
        caption_selector: &str,
    ) -> Result<Vec<PostAnchor>, BrowserError> {
        // Prefer anchors under the confirmed container; degrade to a whole
        // page scan when no container was ever confirmed.
        let anchors = match scope {
            Some(container_selector) => {
                let container = self
                    .page
                    .query_selector(container_selector)
                    .await
                    .map_err(|e| BrowserError::Other(format!("container query failed: {}", e)))?;
                match container {
                    Some(container) => container.query_selector_all("a").await.map_err(|e| {
                        BrowserError::Other(format!("anchor query failed: {}", e))
                    })?,
                    None => self.page.query_selector_all("a").await.map_err(|e| {
                        BrowserError::Other(format!("anchor query failed: {}", e))
                    })?,
                }
            }
            None => self
                .page
                .query_selector_all("a")
                .await
                .map_err(|e| BrowserError::Other(format!("anchor query failed: {}", e)))?,
        };

        let mut snapshots = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            // The DOM mutates while we read it; any per-anchor failure is
            // local and must not abort the remaining anchors.
            let img_src = match anchor.query_selector("img").await {
                Ok(Some(img)) => img.get_attribute("src").await.unwrap_or(None),
                Ok(None) => None,
                Err(e) => {
                    debug!("image lookup failed on anchor, skipping: {}", e);
                    None
                }
            };

            let caption = match anchor.query_selector("xpath=..").await {
                Ok(Some(wrapper)) => match wrapper.query_selector(caption_selector).await {
                    Ok(Some(node)) => node.inner_html().await.ok(),
                    _ => None,
                },
                _ => None,
            };

            snapshots.push(PostAnchor { img_src, caption });
        }

        Ok(snapshots)
    }

    async fn page_source(&self) -> Result<String, BrowserError> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::Other(format!("failed to get page source: {}", e)))
    }

    async fn save_screenshot(&self, path: &str) -> Result<(), BrowserError> {
        self.page
            .screenshot_builder()
            .path(std::path::PathBuf::from(path))
            .screenshot()
            .await
            .map_err(|e| BrowserError::Other(format!("failed to take screenshot: {}", e)))?;
        Ok(())
    }
}
