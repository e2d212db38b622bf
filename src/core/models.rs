use serde::{Deserialize, Serialize};

/// One extracted profile entry. Two posts are the same entity iff their
/// `img_src` values are byte-equal; the caption carries no identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub img_src: String,
    pub img_caption: String,
}

impl Post {
    pub fn new(img_src: impl Into<String>, img_caption: impl Into<String>) -> Self {
        Self {
            img_src: img_src.into(),
            img_caption: img_caption.into(),
        }
    }
}

/// Final output of a run. `total_posts` always equals `posts.len()`;
/// a failed run carries the empty shape rather than a partial one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapeResult {
    pub username: String,
    pub total_posts: usize,
    pub posts: Vec<Post>,
}

impl ScrapeResult {
    pub fn new(username: impl Into<String>, posts: Vec<Post>) -> Self {
        Self {
            username: username.into(),
            total_posts: posts.len(),
            posts,
        }
    }

    pub fn empty(username: impl Into<String>) -> Self {
        Self::new(username, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_posts_tracks_len() {
        let result = ScrapeResult::new(
            "someone",
            vec![Post::new("https://cdn/a.jpg", ""), Post::new("https://cdn/b.jpg", "hi")],
        );
        assert_eq!(result.total_posts, result.posts.len());
        assert_eq!(result.total_posts, 2);
    }

    #[test]
    fn test_empty_shape() {
        let result = ScrapeResult::empty("someone");
        assert_eq!(result.username, "someone");
        assert_eq!(result.total_posts, 0);
        assert!(result.posts.is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let result = ScrapeResult::new("u", vec![Post::new("src", "cap")]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_posts"], 1);
        assert_eq!(json["posts"][0]["img_src"], "src");
        assert_eq!(json["posts"][0]["img_caption"], "cap");
    }

    #[test]
    fn test_roundtrip() {
        let result = ScrapeResult::new("u", vec![Post::new("src", "")]);
        let serialized = serde_json::to_string(&result).unwrap();
        let deserialized: ScrapeResult = serde_json::from_str(&serialized).unwrap();
        assert_eq!(result, deserialized);
    }
}
