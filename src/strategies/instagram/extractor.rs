use crate::core::models::Post;
use crate::infrastructure::browser::{BrowserError, ProfilePage};
use crate::strategies::instagram::constants::InstagramConfig;
use crate::strategies::instagram::navigator::ProfileView;
use std::collections::HashSet;
use tracing::debug;

/// Walk the loaded DOM for post anchors and turn them into de-duplicated
/// posts. Anchors without an image, or with an empty source, are not
/// posts and are skipped silently; a missing caption becomes the empty
/// string rather than an error.
pub async fn extract_posts(
    page: &dyn ProfilePage,
    site: &InstagramConfig,
    view: &ProfileView,
) -> Result<Vec<Post>, BrowserError> {
    let scope = match view {
        ProfileView::Container => Some(site.selectors.content_container.as_str()),
        ProfileView::Unconfirmed => None,
    };

    let anchors = page.post_anchors(scope, &site.selectors.caption).await?;
    debug!("scanned {} anchors (scoped: {})", anchors.len(), scope.is_some());

    let mut posts = Vec::new();
    for anchor in anchors {
        let img_src = match anchor.img_src {
            Some(src) if !src.is_empty() => src,
            _ => continue,
        };
        posts.push(Post {
            img_src,
            img_caption: anchor.caption.unwrap_or_default(),
        });
    }

    Ok(dedup_posts(posts))
}

/// Stable, order-preserving reduction: the first occurrence of each
/// `img_src` wins, later duplicates are dropped.
pub fn dedup_posts(posts: Vec<Post>) -> Vec<Post> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(posts.len());

    for post in posts {
        if seen.insert(post.img_src.clone()) {
            unique.push(post);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::browser::mock_adapter::MockProfilePage;
    use crate::infrastructure::browser::PostAnchor;

    fn post(src: &str) -> Post {
        Post::new(src, "")
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let input = vec![post("A"), post("B"), post("A"), post("C")];
        let output = dedup_posts(input);
        let srcs: Vec<_> = output.iter().map(|p| p.img_src.as_str()).collect();
        assert_eq!(srcs, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let input = vec![post("A"), post("B"), post("A"), post("A"), post("C")];
        let once = dedup_posts(input);
        let twice = dedup_posts(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_dedup_keeps_first_caption() {
        let input = vec![Post::new("A", "first"), Post::new("A", "second")];
        let output = dedup_posts(input);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].img_caption, "first");
    }

    #[tokio::test]
    async fn test_extract_skips_imageless_and_empty_sources() {
        let page = MockProfilePage::new().with_anchors(vec![
            PostAnchor {
                img_src: None,
                caption: Some("not a post".to_string()),
            },
            PostAnchor {
                img_src: Some(String::new()),
                caption: None,
            },
            PostAnchor {
                img_src: Some("https://cdn/a.jpg".to_string()),
                caption: Some("hello".to_string()),
            },
        ]);

        let posts = extract_posts(&page, &InstagramConfig::default(), &ProfileView::Container)
            .await
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].img_src, "https://cdn/a.jpg");
        assert_eq!(posts[0].img_caption, "hello");
    }

    #[tokio::test]
    async fn test_caption_falls_back_to_empty_string() {
        let page = MockProfilePage::new().with_anchors(vec![PostAnchor {
            img_src: Some("https://cdn/a.jpg".to_string()),
            caption: None,
        }]);

        let posts = extract_posts(&page, &InstagramConfig::default(), &ProfileView::Container)
            .await
            .unwrap();
        assert_eq!(posts[0].img_caption, "");
    }

    #[tokio::test]
    async fn test_unconfirmed_view_broad_scans() {
        let page = MockProfilePage::new().with_anchors(vec![]);
        extract_posts(&page, &InstagramConfig::default(), &ProfileView::Unconfirmed)
            .await
            .unwrap();
        assert_eq!(page.anchor_scopes(), vec![None]);
    }

    #[tokio::test]
    async fn test_confirmed_view_scopes_to_container() {
        let page = MockProfilePage::new().with_anchors(vec![]);
        extract_posts(&page, &InstagramConfig::default(), &ProfileView::Container)
            .await
            .unwrap();
        assert_eq!(page.anchor_scopes(), vec![Some("article".to_string())]);
    }
}
