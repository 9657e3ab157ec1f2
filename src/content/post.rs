//! Post and Chapter display models
//!
//! These are the flattened shapes consumed by page rendering, as opposed to
//! the CMS's nested wire shape (see `cms::wire`). They are built once per
//! request by the mapper and immutable afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image shown when a post has no featured image.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=400&width=800";

/// A blog post in display form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// CMS record id
    pub id: i64,

    /// Post title
    pub title: String,

    /// URL-safe unique identifier
    pub slug: String,

    /// Short HTML excerpt
    pub excerpt: String,

    /// Raw rich-text HTML body (expand with `ContentRenderer` before display)
    pub content: String,

    /// Category display name, "Uncategorized" when the source has none
    pub category: String,

    /// Category slug, "uncategorized" when the source has none
    pub category_slug: String,

    /// Tag display names
    pub tags: Vec<String>,

    /// Tag slugs, index-aligned with `tags`
    pub tag_slugs: Vec<String>,

    /// Post author
    pub author: Author,

    /// Publication timestamp
    pub published_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// Human read-time label, e.g. "4 min read"
    pub read_time: String,

    /// Whether the post is flagged for prominent (sticky) placement
    pub featured: bool,

    /// Featured image URL, placeholder when absent
    pub image: String,

    /// Chapters for long-form "definitive guide" posts; empty for regular posts
    pub chapters: Vec<Chapter>,
}

/// Post authorship in display form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub slug: String,
    pub bio: String,
    /// Avatar image URL; empty means "render initials instead"
    pub avatar: String,
}

impl Author {
    /// Initials used when no avatar image is configured
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// A chapter of a long-form guide post
///
/// A chapter either owns an ordered list of posts, or (when it has none)
/// carries freestanding `content`/`summary` HTML of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub posts: Vec<Post>,
}

impl Post {
    /// Tag name/slug pairs in display order
    pub fn tag_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags
            .iter()
            .zip(self.tag_slugs.iter())
            .map(|(name, slug)| (name.as_str(), slug.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_initials() {
        let author = Author {
            name: "Jane van Doe".to_string(),
            ..Default::default()
        };
        assert_eq!(author.initials(), "JV");

        let single = Author {
            name: "plato".to_string(),
            ..Default::default()
        };
        assert_eq!(single.initials(), "P");
    }

    #[test]
    fn test_tag_pairs_alignment() {
        let post = Post {
            id: 1,
            title: "t".to_string(),
            slug: "t".to_string(),
            excerpt: String::new(),
            content: String::new(),
            category: "Uncategorized".to_string(),
            category_slug: "uncategorized".to_string(),
            tags: vec!["Rust".to_string(), "Async".to_string()],
            tag_slugs: vec!["rust".to_string(), "async".to_string()],
            author: Author::default(),
            published_at: Utc::now(),
            updated_at: Utc::now(),
            read_time: "1 min read".to_string(),
            featured: false,
            image: PLACEHOLDER_IMAGE.to_string(),
            chapters: Vec::new(),
        };
        let pairs: Vec<_> = post.tag_pairs().collect();
        assert_eq!(pairs, vec![("Rust", "rust"), ("Async", "async")]);
    }
}
