use crate::infrastructure::browser::ProfilePage;
use crate::strategies::instagram::constants::Urls;
use tracing::info;

/// Decides whether a navigation that never produced the content container
/// ended up on the login wall instead.
pub struct LoginRedirectDetector;

impl LoginRedirectDetector {
    pub async fn is_login_wall(page: &dyn ProfilePage, urls: &Urls) -> bool {
        let url = page.current_url().await.unwrap_or_default();
        let title = page.title().await.unwrap_or_default();
        let redirected = Self::matches(&url, &title, urls);
        if redirected {
            info!("login wall detected (url: {}, title: {})", url, title);
        }
        redirected
    }

    pub fn matches(url: &str, title: &str, urls: &Urls) -> bool {
        url.contains(&urls.login_path) || title.contains(&urls.login_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_login_url() {
        let urls = Urls::default();
        assert!(LoginRedirectDetector::matches(
            "https://www.instagram.com/accounts/login/?next=%2Fsomeone%2F",
            "Instagram",
            &urls
        ));
    }

    #[test]
    fn test_detects_login_title() {
        let urls = Urls::default();
        assert!(LoginRedirectDetector::matches(
            "https://www.instagram.com/someone/",
            "Log in \u{2022} Instagram",
            &urls
        ));
    }

    #[test]
    fn test_profile_page_is_not_login_wall() {
        let urls = Urls::default();
        assert!(!LoginRedirectDetector::matches(
            "https://www.instagram.com/someone/",
            "Someone (@someone) \u{2022} Instagram photos and videos",
            &urls
        ));
    }
}
