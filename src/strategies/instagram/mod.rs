use crate::core::config::ScrapeConfig;
use crate::core::error::{AppError, AppResult};
use crate::core::models::ScrapeResult;
use crate::infrastructure::browser::playwright_adapter::PlaywrightSession;
use crate::infrastructure::browser::ProfilePage;
use crate::infrastructure::diagnostics::dump_debug_artifacts;
use crate::infrastructure::proxy::probe_outbound_ip;
use tracing::{debug, info, warn};

pub mod constants;
pub mod detector;
pub mod extractor;
pub mod navigator;
pub mod pagination;

use constants::InstagramConfig;

static CONFIG: once_cell::sync::Lazy<InstagramConfig> =
    once_cell::sync::Lazy::new(InstagramConfig::default);

/// Scrape all publicly visible posts of one profile. Owns the browser
/// session for the whole run and guarantees it is torn down on every exit
/// path; only session setup (and pre-session validation) may abort the
/// run, everything after it degrades to the empty result.
pub async fn scrape_profile(config: &ScrapeConfig, username: &str) -> AppResult<ScrapeResult> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username must not be empty".to_string()));
    }

    if config.debug {
        if let Some(spec) = &config.proxy {
            match probe_outbound_ip(spec).await {
                Ok(ip) => info!("proxy probe OK, outbound IP: {}", ip),
                Err(e) => warn!("proxy probe failed (continuing anyway): {}", e),
            }
        }
    }

    let session = PlaywrightSession::launch(config)
        .await
        .map_err(|e| AppError::SessionInit(e.to_string()))?;

    let result = scrape_with_page(&session, &CONFIG, config, username).await;

    session.close().await;

    Ok(result)
}

/// Run navigate → paginate → extract against an already-acquired page.
/// Every failure past this point is absorbed: the DOM state after a failed
/// load is not trustworthy enough to extract from, so the run degrades to
/// a clean empty result instead of a partial one.
pub async fn scrape_with_page(
    page: &dyn ProfilePage,
    site: &InstagramConfig,
    config: &ScrapeConfig,
    username: &str,
) -> ScrapeResult {
    match run_scrape(page, site, config, username).await {
        Ok(result) => {
            info!("extracted {} unique posts for {}", result.total_posts, username);
            result
        }
        Err(e) => {
            warn!("scrape of {} degraded to empty result: {}", username, e);
            if config.debug {
                let prefix = match e {
                    AppError::Nav { .. } => format!("timeout_{}", username),
                    _ => format!("error_{}", username),
                };
                dump_debug_artifacts(page, &prefix).await;
            }
            ScrapeResult::empty(username)
        }
    }
}

async fn run_scrape(
    page: &dyn ProfilePage,
    site: &InstagramConfig,
    config: &ScrapeConfig,
    username: &str,
) -> AppResult<ScrapeResult> {
    let view = navigator::open_profile(page, site, username, config.timeout).await?;

    let rounds = pagination::load_all_posts(page, site).await;
    debug!("pagination finished after {} load-more rounds", rounds);

    let posts = extractor::extract_posts(page, site, &view).await?;
    Ok(ScrapeResult::new(username, posts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_username_rejected_before_any_session() {
        let config = ScrapeConfig::new(true, 30, false, None).unwrap();
        let err = scrape_profile(&config, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
