use crate::infrastructure::browser::{Lookup, ProfilePage};
use crate::strategies::instagram::constants::InstagramConfig;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Drive the load-more control until it disappears. Each iteration probes
/// for the control and activates it via direct event dispatch; a missing
/// control means the feed is exhausted, and any other activation failure
/// is also treated as exhaustion so an unknown error never becomes an
/// infinite retry. Returns the number of activations performed.
pub async fn load_all_posts(page: &dyn ProfilePage, site: &InstagramConfig) -> usize {
    let mut activations = 0;

    while activations < site.pagination.max_rounds {
        let probe = page
            .dispatch_click(
                &site.selectors.load_more_button,
                Some(&site.selectors.load_more_text),
            )
            .await;

        match probe {
            Ok(Lookup::Found) => {
                activations += 1;
                debug!("activated load-more control (round {})", activations);
                sleep(Duration::from_secs(site.timeouts.pagination_settle_secs)).await;
            }
            Ok(Lookup::NotFound) => {
                debug!(
                    "load-more control gone after {} activations, feed exhausted",
                    activations
                );
                return activations;
            }
            Err(e) => {
                warn!("load-more activation failed, treating feed as exhausted: {}", e);
                return activations;
            }
        }
    }

    warn!(
        "pagination ceiling of {} rounds reached, stopping",
        site.pagination.max_rounds
    );
    activations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::browser::mock_adapter::MockProfilePage;

    fn fast_site() -> InstagramConfig {
        let mut site = InstagramConfig::default();
        site.timeouts.pagination_settle_secs = 0;
        site
    }

    #[tokio::test]
    async fn test_exactly_n_activations() {
        let page = MockProfilePage::new().with_load_more_rounds(4);
        let activations = load_all_posts(&page, &fast_site()).await;
        assert_eq!(activations, 4);
        // Four activations plus the final probe that found nothing.
        assert_eq!(page.click_attempts(), 5);
    }

    #[tokio::test]
    async fn test_absent_control_means_zero_rounds() {
        let page = MockProfilePage::new().with_load_more_rounds(0);
        assert_eq!(load_all_posts(&page, &fast_site()).await, 0);
        assert_eq!(page.click_attempts(), 1);
    }

    #[tokio::test]
    async fn test_unexpected_error_stops_the_loop() {
        let page = MockProfilePage::new()
            .with_load_more_rounds(10)
            .with_dispatch_error_on(3);
        let activations = load_all_posts(&page, &fast_site()).await;
        assert_eq!(activations, 2);
        assert_eq!(page.click_attempts(), 3);
    }

    #[tokio::test]
    async fn test_ceiling_bounds_a_control_that_never_disappears() {
        let mut site = fast_site();
        site.pagination.max_rounds = 7;
        let page = MockProfilePage::new().with_load_more_rounds(usize::MAX);
        assert_eq!(load_all_posts(&page, &site).await, 7);
    }
}
