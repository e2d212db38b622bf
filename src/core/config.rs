use crate::core::error::{AppError, AppResult};
use crate::core::proxy::ProxySpec;
use rand::prelude::IndexedRandom;
use std::time::Duration;

/// Desktop user agents rotated per run. A mobile UA is never sent
/// proactively; the mobile fallback is a URL change, not a UA change.
const DESKTOP_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36",
];

/// Session configuration, frozen once built. The user agent is picked here
/// so that one run never mixes identities.
#[derive(Clone, Debug)]
pub struct ScrapeConfig {
    pub headless: bool,
    pub timeout: Duration,
    pub debug: bool,
    pub proxy: Option<ProxySpec>,
    pub user_agent: String,
}

impl ScrapeConfig {
    pub fn new(
        headless: bool,
        timeout_secs: u64,
        debug: bool,
        proxy: Option<ProxySpec>,
    ) -> AppResult<Self> {
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "timeout must be a positive number of seconds".to_string(),
            ));
        }

        let user_agent = DESKTOP_USER_AGENTS
            .choose(&mut rand::rng())
            .expect("user agent pool is non-empty")
            .to_string();

        Ok(Self {
            headless,
            timeout: Duration::from_secs(timeout_secs),
            debug,
            proxy,
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_from_pool() {
        let config = ScrapeConfig::new(true, 30, false, None).unwrap();
        assert!(DESKTOP_USER_AGENTS.contains(&config.user_agent.as_str()));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(ScrapeConfig::new(true, 0, false, None).is_err());
    }
}
