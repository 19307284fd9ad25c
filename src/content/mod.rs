//! Content module - handles daily posts and content processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{id_for_source, slug_for_source, Post, PostSummary};
