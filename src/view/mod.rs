//! Collection view engine - filtering, sorting, and pagination

pub mod collection;
pub mod pagination;

pub use collection::{ListView, ALL_CATEGORIES, POSTS_PER_PAGE};
pub use pagination::{visible_pages, PageToken};
