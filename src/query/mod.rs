//! Content query - resolves a page slug to the fixed-shape record its page renders
//!
//! Built once per generation from the loaded posts. The card grid reads only
//! the summaries; post pages read the full [`PageData`].

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::{Post, PostSummary};
use crate::helpers::format_date;

/// Errors returned by content queries
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// No post is published under the slug
    #[error("no post found for slug: {0}")]
    NotFound(String),
}

/// Site-wide metadata
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SiteMetadata {
    pub title: String,
}

/// A post image with its responsive candidates
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImageData {
    pub public_url: String,
    /// `srcset` attribute value
    pub src_set: String,
}

/// Front-matter as exposed to the post page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PostFrontmatter {
    pub title: String,
    /// Already formatted with the site's `date_format`
    pub date: String,
    pub video_id: Option<String>,
    pub codesandbox_id: Option<String>,
    pub intro: Option<String>,
    pub dataset: Option<String>,
    pub image: Option<ImageData>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PostNode {
    pub id: String,
    pub slug: String,
    /// Compiled HTML body
    pub body: String,
    pub frontmatter: PostFrontmatter,
}

/// Everything a post page needs
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageData {
    pub site: SiteMetadata,
    pub post: PostNode,
}

/// Index of loaded posts, queried by slug
pub struct ContentIndex<'a> {
    config: &'a SiteConfig,
    posts: Vec<&'a Post>,
    by_slug: HashMap<&'a str, usize>,
}

impl<'a> ContentIndex<'a> {
    /// Index posts; they keep the order they were loaded in.
    ///
    /// A slug maps to exactly one post: the first one wins and later
    /// posts with the same slug are left out of the index.
    pub fn build(config: &'a SiteConfig, posts: &'a [Post]) -> Self {
        let mut unique = Vec::with_capacity(posts.len());
        let mut by_slug: HashMap<&'a str, usize> = HashMap::with_capacity(posts.len());

        for post in posts {
            if let Some(&kept) = by_slug.get(post.slug.as_str()) {
                let kept: &Post = unique[kept];
                tracing::warn!(
                    "Slug {} is used by both {} and {}; skipping {}",
                    post.slug,
                    kept.source,
                    post.source,
                    post.source
                );
                continue;
            }
            by_slug.insert(post.slug.as_str(), unique.len());
            unique.push(post);
        }

        Self {
            config,
            posts: unique,
            by_slug,
        }
    }

    /// Indexed posts, one per slug
    pub fn posts(&self) -> &[&'a Post] {
        &self.posts
    }

    pub fn site_metadata(&self) -> SiteMetadata {
        SiteMetadata {
            title: self.config.title.clone(),
        }
    }

    /// Summaries of every post, in index order
    pub fn all_summaries(&self) -> Vec<PostSummary> {
        self.posts.iter().map(|post| post.summary()).collect()
    }

    /// Look up the page record for a slug
    pub fn page(&self, slug: &str) -> Result<PageData, QueryError> {
        let post = self
            .by_slug
            .get(slug)
            .map(|&i| self.posts[i])
            .ok_or_else(|| QueryError::NotFound(slug.to_string()))?;

        Ok(PageData {
            site: self.site_metadata(),
            post: PostNode {
                id: post.id.clone(),
                slug: post.slug.clone(),
                body: post.content.clone(),
                frontmatter: PostFrontmatter {
                    title: post.title.clone(),
                    date: format_date(&post.date, &self.config.date_format),
                    video_id: post.video_id.clone(),
                    codesandbox_id: post.codesandbox_id.clone(),
                    intro: post.intro.clone(),
                    dataset: post.dataset.clone(),
                    image: post
                        .image
                        .as_deref()
                        .map(|url| image_data(url, self.config.image.max_width)),
                },
            },
        })
    }
}

/// Build the image record: quarter, half and full `max_width` candidates
pub fn image_data(public_url: &str, max_width: u32) -> ImageData {
    let mut widths = vec![max_width / 4, max_width / 2, max_width];
    widths.retain(|&w| w > 0);
    widths.dedup();

    let src_set = widths
        .iter()
        .map(|w| format!("{} {}w", public_url, w))
        .collect::<Vec<_>>()
        .join(",\n");

    ImageData {
        public_url: public_url.to_string(),
        src_set,
    }
}
