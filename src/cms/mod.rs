//! CMS client module - wire shape, mapping, caching, and HTTP access

mod cache;
mod client;
mod mapper;
pub mod wire;

pub use client::{CmsClient, CmsError, PostsPage};
pub use mapper::{calculate_read_time, map_post, map_posts, resolve_tag_name};
