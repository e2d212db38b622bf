use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InstagramConfig {
    pub urls: Urls,
    pub selectors: Selectors,
    pub timeouts: Timeouts,
    pub pagination: PaginationLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Urls {
    pub desktop_base: String,
    pub mobile_base: String,
    /// URL fragment that marks a redirect to the login wall.
    pub login_path: String,
    /// Title fragment that marks the login wall.
    pub login_title: String,
}

impl Default for Urls {
    fn default() -> Self {
        Self {
            desktop_base: "https://www.instagram.com".to_string(),
            mobile_base: "https://m.instagram.com".to_string(),
            login_path: "/accounts/login".to_string(),
            login_title: "Log in".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selectors {
    /// The DOM region expected to hold the profile's post anchors. Its
    /// presence, not a page-load event, is the navigation success signal.
    pub content_container: String,
    /// Caption lookup applied within each anchor's parent scope.
    pub caption: String,
    /// Candidate elements for the load-more control, scoped to the
    /// content container.
    pub load_more_button: String,
    /// Label text distinguishing the load-more control from other buttons.
    pub load_more_text: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            content_container: "article".to_string(),
            caption: "h2 span".to_string(),
            load_more_button: "article button".to_string(),
            load_more_text: "Show more posts".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeouts {
    /// Pause after the container appears, letting client-side rendering
    /// finish mounting children before any interaction.
    pub render_settle_secs: u64,
    /// Pause after each load-more activation before re-probing.
    pub pagination_settle_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            render_settle_secs: 3,
            pagination_settle_secs: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationLimits {
    /// Hard ceiling on load-more activations, so a malfunctioning control
    /// cannot keep the loop alive forever.
    pub max_rounds: usize,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self { max_rounds: 300 }
    }
}

impl InstagramConfig {
    pub fn desktop_profile_url(&self, username: &str) -> String {
        format!("{}/{}/", self.urls.desktop_base, username)
    }

    pub fn mobile_profile_url(&self, username: &str) -> String {
        format!("{}/{}/", self.urls.mobile_base, username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_urls() {
        let config = InstagramConfig::default();
        assert_eq!(
            config.desktop_profile_url("someone"),
            "https://www.instagram.com/someone/"
        );
        assert_eq!(
            config.mobile_profile_url("someone"),
            "https://m.instagram.com/someone/"
        );
    }
}
