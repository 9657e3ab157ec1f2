//! Helper functions shared by page rendering

mod date;
mod html;

pub use date::*;
pub use html::*;
