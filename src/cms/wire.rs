//! Wire types for the content API
//!
//! The CMS responds with `{ data: [{ id, attributes }], meta }` and nests
//! every relation behind its own `data` wrapper. Each relation is optional:
//! posts without an author, category, image, tags, or chapters are all valid
//! and must deserialize cleanly.

use serde::Deserialize;

/// Top-level list response
#[derive(Debug, Clone, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub data: Vec<WirePost>,
    #[serde(default)]
    pub meta: WireMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireMeta {
    pub pagination: Option<WirePagination>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePagination {
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total: usize,
}

/// One post record on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct WirePost {
    pub id: i64,
    pub attributes: WirePostAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePostAttributes {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// "featured" marks sticky posts
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub featured_image: Option<SingleRelation<WireImage>>,
    #[serde(default)]
    pub author: Option<SingleRelation<WireAuthor>>,
    #[serde(default)]
    pub categories: Option<ManyRelation<WireCategory>>,
    #[serde(default)]
    pub tags: Option<ManyRelation<WireTag>>,
    #[serde(default)]
    pub chapters: Option<ManyRelation<WireChapter>>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<String>,
}

/// To-one relation wrapper; `data` is null when the relation is unset
#[derive(Debug, Clone, Deserialize)]
pub struct SingleRelation<T> {
    #[serde(default)]
    pub data: Option<WireEntry<T>>,
}

/// To-many relation wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct ManyRelation<T> {
    #[serde(default)]
    pub data: Vec<WireEntry<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireEntry<T> {
    #[serde(default)]
    pub id: i64,
    pub attributes: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireImage {
    pub url: String,
    #[serde(default, rename = "alternativeText")]
    pub alternative_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireAuthor {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<WireImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireCategory {
    pub name: String,
    pub slug: String,
}

/// The editor sometimes leaves tag slugs unset; the mapper fills them in
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireTag {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireChapter {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub posts: Option<Vec<WirePost>>,
}
