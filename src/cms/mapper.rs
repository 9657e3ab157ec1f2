//! Mapping from the CMS wire shape to the display model
//!
//! One translation, done once at the client boundary: every downstream
//! consumer sees the flat `Post` with its documented defaults, never the
//! nested wire shape.

use chrono::{DateTime, Utc};

use crate::cms::wire::{WirePost, WireTag};
use crate::content::{Author, Chapter, Post, PLACEHOLDER_IMAGE};
use crate::helpers::strip_html;

/// Reading speed assumed for the read-time label
const WORDS_PER_MINUTE: usize = 200;

/// Map one CMS post record into the display model.
///
/// Fully-absent relations get the documented defaults: category
/// "Uncategorized"/"uncategorized", author "Anonymous" with empty bio and
/// avatar, and the placeholder featured image.
pub fn map_post(wire: &WirePost) -> Post {
    let attrs = &wire.attributes;

    let category = attrs
        .categories
        .as_ref()
        .and_then(|rel| rel.data.first());
    let author = attrs
        .author
        .as_ref()
        .and_then(|rel| rel.data.as_ref());
    let image = attrs
        .featured_image
        .as_ref()
        .and_then(|rel| rel.data.as_ref());

    let (tags, tag_slugs) = split_tags(
        attrs
            .tags
            .as_ref()
            .map(|rel| rel.data.iter().map(|entry| &entry.attributes))
            .into_iter()
            .flatten(),
    );

    let content = attrs.content.clone().unwrap_or_default();

    Post {
        id: wire.id,
        title: attrs.title.clone(),
        slug: attrs.slug.clone(),
        excerpt: attrs.excerpt.clone().unwrap_or_default(),
        category: category
            .map(|c| c.attributes.name.clone())
            .unwrap_or_else(|| "Uncategorized".to_string()),
        category_slug: category
            .map(|c| c.attributes.slug.clone())
            .unwrap_or_else(|| "uncategorized".to_string()),
        tags,
        tag_slugs,
        author: Author {
            name: author
                .map(|a| a.attributes.name.clone())
                .unwrap_or_else(|| "Anonymous".to_string()),
            slug: author
                .map(|a| a.attributes.slug.clone())
                .unwrap_or_else(|| "anonymous".to_string()),
            bio: author
                .and_then(|a| a.attributes.bio.clone())
                .unwrap_or_default(),
            avatar: author
                .and_then(|a| a.attributes.avatar.as_ref())
                .map(|img| img.url.clone())
                .unwrap_or_default(),
        },
        published_at: parse_timestamp(attrs.published_at.as_deref().unwrap_or(&attrs.created_at)),
        updated_at: parse_timestamp(&attrs.updated_at),
        read_time: calculate_read_time(&content),
        featured: attrs.kind.as_deref() == Some("featured"),
        image: image
            .map(|img| img.attributes.url.clone())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        chapters: attrs
            .chapters
            .as_ref()
            .map(|rel| {
                rel.data
                    .iter()
                    .map(|entry| {
                        let chapter = &entry.attributes;
                        Chapter {
                            title: chapter.title.clone(),
                            slug: chapter.slug.clone(),
                            summary: chapter.summary.clone(),
                            content: chapter.content.clone(),
                            posts: chapter
                                .posts
                                .as_deref()
                                .unwrap_or_default()
                                .iter()
                                .map(map_post)
                                .collect(),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default(),
        content,
    }
}

/// Map a batch of post records
pub fn map_posts(wire: &[WirePost]) -> Vec<Post> {
    wire.iter().map(map_post).collect()
}

/// Resolve the canonical name/slug pair for each wire tag.
///
/// Slugs the editor left unset fall back to the lower-cased tag name, so the
/// two vectors are always the same length and index-aligned.
fn split_tags<'a>(tags: impl Iterator<Item = &'a WireTag>) -> (Vec<String>, Vec<String>) {
    let mut names = Vec::new();
    let mut slugs = Vec::new();
    for tag in tags {
        names.push(tag.name.clone());
        slugs.push(
            tag.slug
                .clone()
                .unwrap_or_else(|| tag.name.to_lowercase()),
        );
    }
    (names, slugs)
}

/// Read time at a fixed reading speed, floored at one minute
pub fn calculate_read_time(content: &str) -> String {
    let words = strip_html(content).split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

/// Resolve a tag's display name from its slug.
///
/// Linear scan of the tag pairs attached to any post in the result set,
/// case-insensitive on the slug. An unknown slug resolves to itself: the
/// listing was selected by this slug, so using it verbatim is definitional,
/// not an error.
pub fn resolve_tag_name(posts: &[Post], slug: &str) -> String {
    posts
        .iter()
        .flat_map(|post| post.tag_pairs())
        .find(|(_, tag_slug)| tag_slug.eq_ignore_ascii_case(slug))
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| slug.to_string())
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH)
}
