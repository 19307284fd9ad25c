//! Post models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A daily post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Stable opaque identifier derived from the source path
    pub id: String,

    /// Site-relative URL path, e.g. `/day-1/`
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    pub video_id: Option<String>,
    pub codesandbox_id: Option<String>,
    pub intro: Option<String>,
    pub dataset: Option<String>,

    /// Hero image, already resolved to a site-relative path
    pub image: Option<String>,

    /// Source file path (relative to the source dir)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Whether the post is published
    pub published: bool,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, date: DateTime<Local>, source: String) -> Self {
        let slug = slug_for_source(&source);
        let id = id_for_source(&source);
        Self {
            id,
            slug,
            title,
            date,
            raw: String::new(),
            content: String::new(),
            video_id: None,
            codesandbox_id: None,
            intro: None,
            dataset: None,
            image: None,
            source: source.clone(),
            full_source: PathBuf::from(&source),
            published: true,
            extra: HashMap::new(),
        }
    }

    /// The record handed to the card grid
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id.clone(),
            slug: self.slug.clone(),
            title: self.title.clone(),
        }
    }
}

/// The slice of a post the card grid renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
}

impl PostSummary {
    pub fn new(id: impl Into<String>, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
        }
    }
}

/// Derive the URL path for a source file.
///
/// `_posts/day-1.md` becomes `/day-1/` and `_posts/day-2/index.md` becomes `/day-2/`.
/// The site root belongs to the card grid, so a top-level `_posts/index.md`
/// keeps its own `/index/` path.
pub fn slug_for_source(source: &str) -> String {
    let source = source.replace('\\', "/");
    let relative = source
        .strip_prefix("_posts/")
        .unwrap_or(&source)
        .trim_start_matches('/');

    let without_ext = relative
        .strip_suffix(".markdown")
        .or_else(|| relative.strip_suffix(".md"))
        .unwrap_or(relative);

    let path = without_ext.strip_suffix("/index").unwrap_or(without_ext);
    format!("/{}/", path)
}

/// Derive a stable identifier for a source file.
///
/// 64-bit FNV-1a over the normalized path, so ids do not change between
/// builds or toolchains.
pub fn id_for_source(source: &str) -> String {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = source
        .replace('\\', "/")
        .bytes()
        .fold(FNV_OFFSET, |acc, b| (acc ^ u64::from(b)).wrapping_mul(FNV_PRIME));
    format!("{:016x}", hash)
}
