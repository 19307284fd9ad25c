//! Content loader - loads daily posts from the source directory

use anyhow::Result;
use chrono::Local;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Post};
use crate::helpers::{is_absolute_url, url_for};
use crate::Site;

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::from_config(&site.config.highlight);
        Self { site, renderer }
    }

    /// Directory holding the daily posts
    pub fn posts_dir(&self) -> PathBuf {
        self.site.source_dir.join("_posts")
    }

    /// Load all posts from source/_posts, oldest first
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.posts_dir();
        if !posts_dir.exists() {
            tracing::debug!("No posts directory at {:?}", posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !(path.is_file() && is_markdown_file(path)) {
                continue;
            }

            match self.load_post(path) {
                Ok(post) if post.published || self.site.config.render_drafts => posts.push(post),
                Ok(post) => tracing::debug!("Skipping unpublished post {}", post.source),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", path, e),
            }
        }

        // Day 1 is the oldest post; the source path keeps same-day posts deterministic
        posts.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.source.cmp(&b.source)));

        // One page per slug: `day-1.md` and `day-1/index.md` both publish to /day-1/
        let mut seen = HashSet::new();
        posts.retain(|post| {
            let fresh = seen.insert(post.slug.clone());
            if !fresh {
                tracing::warn!("Skipping {}: slug {} is already taken", post.source, post.slug);
            }
            fresh
        });

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let file_modified = fs::metadata(path)?
            .modified()
            .ok()
            .map(chrono::DateTime::<Local>::from);

        let date = fm
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));

        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let source = path
            .strip_prefix(&self.site.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        let mut post = Post::new(title, date, source);
        post.raw = body.to_string();
        post.content = self.renderer.render(body)?;
        post.image = fm
            .image
            .as_deref()
            .map(|image| self.resolve_image(&post.slug, image));
        post.video_id = fm.video_id;
        post.codesandbox_id = fm.codesandbox_id;
        post.intro = fm.intro;
        post.dataset = fm.dataset;
        post.full_source = path.to_path_buf();
        post.published = fm.published;
        post.extra = fm.extra;

        tracing::debug!("Loaded post {} -> {}", post.source, post.slug);

        Ok(post)
    }

    /// Resolve a front-matter image reference to a site URL.
    ///
    /// Relative references point into the post's asset folder, which is
    /// published under the post's slug.
    fn resolve_image(&self, slug: &str, image: &str) -> String {
        if is_absolute_url(image) {
            image.to_string()
        } else if let Some(absolute) = image.strip_prefix('/') {
            url_for(&self.site.config, absolute)
        } else {
            let relative = image.trim_start_matches("./");
            url_for(&self.site.config, &format!("{}{}", slug, relative))
        }
    }
}

/// Asset folder of a post: `_posts/day-1.md` owns `_posts/day-1/`,
/// `_posts/day-2/index.md` owns its own directory.
///
/// An `index.md` directly in the posts dir never owns the whole posts dir.
pub fn asset_dir_for(posts_dir: &Path, post_path: &Path) -> Option<PathBuf> {
    let parent = post_path.parent()?;
    let stem = post_path.file_stem()?;
    if stem == "index" && parent != posts_dir {
        Some(parent.to_path_buf())
    } else {
        Some(parent.join(stem))
    }
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
