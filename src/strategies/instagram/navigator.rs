use crate::core::error::{AppError, AppResult, NavReason};
use crate::infrastructure::browser::{Lookup, ProfilePage};
use crate::strategies::instagram::constants::InstagramConfig;
use crate::strategies::instagram::detector::LoginRedirectDetector;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// How much of the page the navigator could confirm. Extraction scopes
/// itself to the container when confirmed and broad-scans otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileView {
    /// The content container appeared within the timeout.
    Container,
    /// The page loaded but the container never appeared and no login wall
    /// was detected; extraction may still salvage anchors from it.
    Unconfirmed,
}

/// Load the profile page, falling back once to the mobile endpoint when
/// the desktop page redirects to the login wall.
pub async fn open_profile(
    page: &dyn ProfilePage,
    site: &InstagramConfig,
    username: &str,
    timeout: Duration,
) -> AppResult<ProfileView> {
    let desktop_url = site.desktop_profile_url(username);
    info!("loading profile {}", desktop_url);

    if let Err(e) = page.goto(&desktop_url).await {
        warn!("desktop navigation failed: {}", e);
        return Err(AppError::Nav {
            reason: NavReason::Timeout,
        });
    }

    let container = &site.selectors.content_container;
    if page.wait_for_selector(container, timeout).await? == Lookup::Found {
        settle(site).await;
        return Ok(ProfileView::Container);
    }

    if !LoginRedirectDetector::is_login_wall(page, &site.urls).await {
        warn!("content container never appeared; falling back to a broad anchor scan");
        return Ok(ProfileView::Unconfirmed);
    }

    let mobile_url = site.mobile_profile_url(username);
    info!("login wall on desktop, retrying via {}", mobile_url);

    if let Err(e) = page.goto(&mobile_url).await {
        warn!("mobile navigation failed: {}", e);
        return Err(AppError::Nav {
            reason: NavReason::Redirect,
        });
    }

    if page.wait_for_selector(container, timeout).await? == Lookup::Found {
        settle(site).await;
        return Ok(ProfileView::Container);
    }

    warn!("mobile endpoint did not expose the content container either");
    Err(AppError::Nav {
        reason: NavReason::Redirect,
    })
}

/// Container presence precedes child content; give the client-side
/// renderer a moment before interacting.
async fn settle(site: &InstagramConfig) {
    sleep(Duration::from_secs(site.timeouts.render_settle_secs)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::browser::mock_adapter::MockProfilePage;

    fn fast_site() -> InstagramConfig {
        let mut site = InstagramConfig::default();
        site.timeouts.render_settle_secs = 0;
        site.timeouts.pagination_settle_secs = 0;
        site
    }

    #[tokio::test]
    async fn test_container_found_on_desktop() {
        let page = MockProfilePage::new().with_desktop_container(true);
        let view = open_profile(&page, &fast_site(), "someone", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(view, ProfileView::Container);
        assert_eq!(page.visited(), vec!["https://www.instagram.com/someone/"]);
    }

    #[tokio::test]
    async fn test_no_container_no_redirect_is_unconfirmed() {
        let page = MockProfilePage::new().with_desktop_container(false);
        let view = open_profile(&page, &fast_site(), "someone", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(view, ProfileView::Unconfirmed);
        // No mobile attempt without a login wall.
        assert_eq!(page.visited().len(), 1);
    }

    #[tokio::test]
    async fn test_login_redirect_recovers_via_mobile() {
        let page = MockProfilePage::new()
            .with_desktop_container(false)
            .with_login_redirect(true)
            .with_mobile_container(true);
        let view = open_profile(&page, &fast_site(), "someone", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(view, ProfileView::Container);
        assert_eq!(
            page.visited(),
            vec![
                "https://www.instagram.com/someone/",
                "https://m.instagram.com/someone/"
            ]
        );
    }

    #[tokio::test]
    async fn test_login_redirect_with_mobile_failure_is_terminal() {
        let page = MockProfilePage::new()
            .with_desktop_container(false)
            .with_login_redirect(true)
            .with_mobile_container(false);
        let err = open_profile(&page, &fast_site(), "someone", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Nav {
                reason: NavReason::Redirect
            }
        ));
    }
}
