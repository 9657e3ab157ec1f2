//! Content module - display models and rich-text rendering

mod post;
mod renderer;

pub use post::{Author, Chapter, Post, PLACEHOLDER_IMAGE};
pub use renderer::ContentRenderer;
