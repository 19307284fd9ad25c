//! Generator module - writes the card grid index, post pages and assets

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::loader::{asset_dir_for, is_markdown_file};
use crate::content::Post;
use crate::grid::{card_label, CardGrid, GridLayout};
use crate::helpers::{
    css, date_xml, encode_url, html_escape, image_tag, is_absolute_url, link_to, meta_generator,
};
use crate::query::{ContentIndex, PageData};
use crate::Site;

/// Stylesheet written next to the grid rules
pub const STYLESHEET: &str = "css/grid.css";

/// Card and post styles appended after the generated grid rules
const BASE_STYLES: &str = r#"
body {
  margin: 0;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
  color: #222;
  background: #fafafa;
}

.site-header {
  text-align: center;
  padding: 2rem 1rem 0;
}

.site-header a {
  color: inherit;
  text-decoration: none;
}

.card {
  width: 100%;
  max-width: 300px;
  background: #fff;
  border-radius: 6px;
  box-shadow: 0 1px 4px rgba(0, 0, 0, 0.12);
  overflow: hidden;
}

.card-cover img {
  display: block;
  width: 100%;
}

.card-title {
  margin: 0;
  padding: 1rem;
  font-size: 1rem;
}

.card-title a {
  color: inherit;
  text-decoration: none;
}

.post {
  max-width: 800px;
  margin: 0 auto;
  padding: 2rem 1rem 4rem;
}

.post-image img {
  width: 100%;
}

.embed {
  position: relative;
  padding-top: 56.25%;
  margin: 2rem 0;
}

.embed iframe {
  position: absolute;
  top: 0;
  left: 0;
  width: 100%;
  height: 100%;
  border: 0;
}

.post-nav {
  display: flex;
  justify-content: space-between;
  margin-top: 3rem;
}
"#;

/// Placeholder cover written when the site does not ship its own
const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="400" viewBox="0 0 600 400">
  <rect width="600" height="400" fill="#1a472a"/>
  <circle cx="300" cy="200" r="110" fill="#c0392b"/>
  <text x="300" y="225" font-family="sans-serif" font-size="72" font-weight="bold" fill="#fff" text-anchor="middle">Advent</text>
</svg>
"##;

/// Static site generator
pub struct Generator {
    site: Site,
    layout: GridLayout,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Self {
        Self {
            site: site.clone(),
            layout: GridLayout::new(&site.config.grid),
        }
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        // One post per slug from here on
        let index = ContentIndex::build(&self.site.config, posts);

        // Static files first, so generated pages win on conflicts
        self.copy_source_assets()?;
        self.copy_post_assets(index.posts())?;
        self.ensure_cover_image()?;

        self.write_output(Path::new(STYLESHEET), &self.stylesheet())?;

        self.generate_index_page(&index)?;
        self.generate_post_pages(&index)?;

        Ok(())
    }

    /// Grid rules followed by the card and post styles
    pub fn stylesheet(&self) -> String {
        format!("{}{}", self.layout.stylesheet(), BASE_STYLES)
    }

    /// Generate the index page holding the card grid
    fn generate_index_page(&self, index: &ContentIndex) -> Result<()> {
        let config = &self.site.config;
        let grid = CardGrid::new(config).render_html(&index.all_summaries());

        let mut body = String::new();
        // Description above the grid
        if !config.description.is_empty() {
            body.push_str(&format!(
                "<p class=\"site-description\">{}</p>\n",
                html_escape(&config.description)
            ));
        }
        body.push_str(&grid);

        let html = self.page_layout(&config.title, &body);
        self.write_output(Path::new("index.html"), &html)?;
        tracing::debug!("Generated index with {} cards", index.posts().len());

        Ok(())
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, index: &ContentIndex) -> Result<()> {
        let posts = index.posts();

        for (i, post) in posts.iter().enumerate() {
            let output = Path::new(post.slug.trim_matches('/')).join("index.html");
            // The site root is the card grid
            if output == Path::new("index.html") {
                tracing::warn!("Skipping {}: its slug would replace the card grid", post.source);
                continue;
            }

            let page = index.page(&post.slug)?;
            let article = self.render_post(&page, post, i, posts);
            let title = format!("{} | {}", page.post.frontmatter.title, page.site.title);
            let html = self.page_layout(&title, &article);

            self.write_output(&output, &html)?;
            tracing::debug!("Generated post: {:?}", output);
        }

        Ok(())
    }

    /// Render the article for one post
    fn render_post(&self, page: &PageData, post: &Post, index: usize, posts: &[&Post]) -> String {
        let config = &self.site.config;
        let fm = &page.post.frontmatter;
        let mut html = String::new();

        html.push_str("<article class=\"post\">\n<header>\n");
        html.push_str(&format!(
            "<p class=\"post-day\">{} {}</p>\n",
            html_escape(&config.label_prefix),
            index + 1
        ));
        html.push_str(&format!("<h1>{}</h1>\n", html_escape(&fm.title)));
        html.push_str(&format!(
            "<time datetime=\"{}\">{}</time>\n",
            date_xml(&post.date),
            html_escape(&fm.date)
        ));
        html.push_str("</header>\n");

        if let Some(intro) = &fm.intro {
            html.push_str(&format!("<p class=\"intro\">{}</p>\n", html_escape(intro)));
        }

        if let Some(image) = &fm.image {
            html.push_str(&format!(
                "<figure class=\"post-image\">{}</figure>\n",
                image_tag(config, &image.public_url, &fm.title, Some(&image.src_set))
            ));
        }

        if let Some(video_id) = &fm.video_id {
            html.push_str(&youtube_embed(video_id, &fm.title));
        }

        html.push_str(&format!("<div class=\"post-body\">\n{}</div>\n", page.post.body));

        if let Some(sandbox_id) = &fm.codesandbox_id {
            html.push_str(&codesandbox_embed(sandbox_id, &fm.title));
        }

        if let Some(dataset) = &fm.dataset {
            html.push_str(&format!(
                "<p class=\"dataset\">Dataset: {}</p>\n",
                link_to(config, dataset, &html_escape(dataset))
            ));
        }

        html.push_str(&self.post_nav(index, posts));
        html.push_str("</article>");
        html
    }

    /// Links to the previous and next day
    fn post_nav(&self, index: usize, posts: &[&Post]) -> String {
        let config = &self.site.config;
        let link = |p: &Post, i: usize, class: &str| {
            let label = card_label(&config.label_prefix, i, &p.title);
            format!(
                "<span class=\"{}\">{}</span>",
                class,
                link_to(config, &p.slug, &html_escape(&label))
            )
        };

        let prev = index
            .checked_sub(1)
            .and_then(|i| posts.get(i).map(|p| link(*p, i, "prev")))
            .unwrap_or_default();
        let next = posts
            .get(index + 1)
            .map(|p| link(*p, index + 1, "next"))
            .unwrap_or_default();

        format!("<nav class=\"post-nav\">{}{}</nav>\n", prev, next)
    }

    /// Wrap page content in the shared HTML document
    fn page_layout(&self, title: &str, body: &str) -> String {
        let config = &self.site.config;
        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{generator}
{stylesheet}
</head>
<body>
<header class="site-header"><h2>{home}</h2></header>
<main>
{body}
</main>
</body>
</html>
"#,
            lang = html_escape(&config.language),
            title = html_escape(title),
            generator = meta_generator(),
            stylesheet = css(config, STYLESHEET.trim_start_matches("css/")),
            home = link_to(config, "/", &html_escape(&config.title)),
            body = body,
        )
    }

    /// Write a file below the public directory, creating parents
    fn write_output(&self, relative: &Path, content: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        Ok(())
    }

    /// Copy source assets (images, etc.) to public directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_markdown_file(path) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            // Post folders are published under their slug instead
            if relative
                .components()
                .any(|c| c.as_os_str() == "_posts" || c.as_os_str() == "_drafts")
            {
                continue;
            }

            copy_file(path, &self.site.public_dir.join(relative))?;
        }

        Ok(())
    }

    /// Copy each post's asset folder into its slug directory
    fn copy_post_assets(&self, posts: &[&Post]) -> Result<()> {
        let posts_dir = self.site.source_dir.join("_posts");

        for post in posts {
            let Some(asset_dir) =
                asset_dir_for(&posts_dir, &post.full_source).filter(|d| d.is_dir())
            else {
                continue;
            };
            let target = self.site.public_dir.join(post.slug.trim_start_matches('/'));

            for entry in WalkDir::new(&asset_dir)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && !is_markdown_file(path) {
                    copy_file(path, &target.join(path.strip_prefix(&asset_dir)?))?;
                }
            }
        }

        Ok(())
    }

    /// Make sure the placeholder cover every card points at exists
    fn ensure_cover_image(&self) -> Result<()> {
        let cover = &self.site.config.cover_image;
        if is_absolute_url(cover) {
            return Ok(());
        }

        let path: PathBuf = self.site.public_dir.join(cover.trim_start_matches('/'));
        if path.exists() {
            return Ok(());
        }

        // Only SVG has a built-in stand-in
        if path.extension().is_some_and(|ext| ext == "svg") {
            self.write_output(Path::new(cover.trim_start_matches('/')), PLACEHOLDER_SVG)?;
            tracing::info!("Wrote built-in cover placeholder to {:?}", path);
        } else {
            tracing::warn!("Cover image {} not found in source", cover);
        }

        Ok(())
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)?;
    Ok(())
}

/// Responsive YouTube player
fn youtube_embed(video_id: &str, title: &str) -> String {
    format!(
        "<div class=\"embed video\"><iframe src=\"https://www.youtube.com/embed/{}\" title=\"{}\" allow=\"accelerometer; encrypted-media; gyroscope; picture-in-picture\" allowfullscreen></iframe></div>\n",
        encode_url(video_id),
        html_escape(title)
    )
}

/// Embedded CodeSandbox editor
fn codesandbox_embed(sandbox_id: &str, title: &str) -> String {
    format!(
        "<div class=\"embed sandbox\"><iframe src=\"https://codesandbox.io/embed/{}?fontsize=14&amp;hidenavigation=1\" title=\"{}\" sandbox=\"allow-modals allow-forms allow-popups allow-scripts allow-same-origin\"></iframe></div>\n",
        encode_url(sandbox_id),
        html_escape(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::content::loader::ContentLoader;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn build_site(tmp: &TempDir) -> Site {
        write(
            tmp.path(),
            "_config.yml",
            "title: 30 Days of Rust\ndescription: One lesson a day\n",
        );
        write(
            tmp.path(),
            "source/_posts/day-1.md",
            "---\ntitle: Intro\ndate: 2024-12-01\nvideoId: abc123\nintro: Start here.\nimage: ./cover.png\n---\nWelcome!",
        );
        write(tmp.path(), "source/_posts/day-1/cover.png", "png");
        write(
            tmp.path(),
            "source/_posts/day-2/index.md",
            "---\ntitle: Arrays\ndate: 2024-12-02\ncodesandboxId: arrays-xyz\ndataset: https://example.com/a.csv\n---\nArrays!",
        );
        write(tmp.path(), "source/images/favicon.ico", "ico");
        Site::new(tmp.path()).unwrap()
    }

    fn generate(site: &Site) {
        let posts = ContentLoader::new(site).load_posts().unwrap();
        Generator::new(site).generate(&posts).unwrap();
    }

    #[test]
    fn test_generate_index_grid() {
        let tmp = TempDir::new().unwrap();
        let site = build_site(&tmp);
        generate(&site);

        let index = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(index.contains("<title>30 Days of Rust</title>"));
        assert!(index.contains(r#"<a href="/day-1/">Day 1: Intro</a>"#));
        assert!(index.contains(r#"<a href="/day-2/">Day 2: Arrays</a>"#));
        assert!(index.find("Day 1: Intro").unwrap() < index.find("Day 2: Arrays").unwrap());
        assert!(index.contains(r#"href="/css/grid.css""#));
        assert!(index.contains("One lesson a day"));
    }

    #[test]
    fn test_generate_post_pages() {
        let tmp = TempDir::new().unwrap();
        let site = build_site(&tmp);
        generate(&site);

        let day1 = fs::read_to_string(site.public_dir.join("day-1/index.html")).unwrap();
        assert!(day1.contains("<h1>Intro</h1>"));
        assert!(day1.contains("December 01, 2024"));
        assert!(day1.contains("https://www.youtube.com/embed/abc123"));
        assert!(day1.contains(r#"<p class="intro">Start here.</p>"#));
        assert!(day1.contains("/day-1/cover.png 1240w"));
        assert!(day1.contains("Welcome!"));
        assert!(day1.contains(r#"<a href="/day-2/">Day 2: Arrays</a>"#));
        assert!(!day1.contains("codesandbox.io"));

        let day2 = fs::read_to_string(site.public_dir.join("day-2/index.html")).unwrap();
        assert!(day2.contains("https://codesandbox.io/embed/arrays-xyz"));
        assert!(day2.contains("https://example.com/a.csv"));
        assert!(day2.contains(r#"<a href="/day-1/">Day 1: Intro</a>"#));
        assert!(!day2.contains("youtube.com"));
    }

    #[test]
    fn test_generate_assets() {
        let tmp = TempDir::new().unwrap();
        let site = build_site(&tmp);
        generate(&site);

        assert!(site.public_dir.join("images/favicon.ico").exists());
        assert!(site.public_dir.join("day-1/cover.png").exists());
        assert!(!site.public_dir.join("_posts").exists());

        let cover = fs::read_to_string(site.public_dir.join("images/advent-logo.svg")).unwrap();
        assert!(cover.starts_with("<svg"));

        let css = fs::read_to_string(site.public_dir.join(STYLESHEET)).unwrap();
        assert!(css.contains("@media (max-width: 640px)"));
        assert!(css.contains(".card-title"));
    }

    #[test]
    fn test_existing_cover_is_kept() {
        let tmp = TempDir::new().unwrap();
        let site = build_site(&tmp);
        write(tmp.path(), "source/images/advent-logo.svg", "<svg>custom</svg>");
        generate(&site);

        let cover = fs::read_to_string(site.public_dir.join("images/advent-logo.svg")).unwrap();
        assert_eq!(cover, "<svg>custom</svg>");
    }

    #[test]
    fn test_generate_without_posts() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        generate(&site);

        let index = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(index.contains(r#"<div class="card-grid"></div>"#));
    }

    #[test]
    fn test_top_level_index_post_keeps_grid() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "source/_posts/index.md",
            "---\ntitle: Welcome\ndate: 2024-12-01\n---\nHello there.",
        );
        write(
            tmp.path(),
            "source/_posts/day-2.md",
            "---\ntitle: Arrays\ndate: 2024-12-02\n---\nArrays!",
        );
        write(tmp.path(), "source/_posts/notes.txt", "scratch");
        let site = Site::new(tmp.path()).unwrap();
        generate(&site);

        let index = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(index.contains(r#"<div class="card-grid">"#));
        assert!(index.contains(r#"<a href="/index/">Day 1: Welcome</a>"#));
        assert!(index.contains(r#"<a href="/day-2/">Day 2: Arrays</a>"#));

        let welcome = fs::read_to_string(site.public_dir.join("index/index.html")).unwrap();
        assert!(welcome.contains("<h1>Welcome</h1>"));
        // The posts dir itself is not published as an asset folder
        assert!(!site.public_dir.join("notes.txt").exists());
        assert!(!site.public_dir.join("index/notes.txt").exists());
    }

    #[test]
    fn test_root_slug_never_replaces_grid() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        let mut root = Post::new(
            "Root".to_string(),
            chrono::Local::now(),
            "_posts/root.md".to_string(),
        );
        root.slug = "/".to_string();

        Generator::new(&site).generate(&[root]).unwrap();

        let index = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(index.contains(r#"<div class="card-grid">"#));
        assert!(!index.contains("<article"));
    }

    #[test]
    fn test_duplicate_slug_renders_one_page() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "source/_posts/day-1.md",
            "---\ntitle: Flat\ndate: 2024-12-01\n---\nFrom the file.",
        );
        write(
            tmp.path(),
            "source/_posts/day-1/index.md",
            "---\ntitle: Folder\ndate: 2024-12-01\n---\nFrom the folder.",
        );
        write(
            tmp.path(),
            "source/_posts/day-2.md",
            "---\ntitle: Arrays\ndate: 2024-12-02\n---\nArrays!",
        );
        let site = Site::new(tmp.path()).unwrap();
        generate(&site);

        let index = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert_eq!(index.matches(r#"<a href="/day-1/">"#).count(), 2);
        assert!(index.contains("Day 1: Flat"));
        assert!(index.contains("Day 2: Arrays"));
        assert!(!index.contains("Folder"));

        let day1 = fs::read_to_string(site.public_dir.join("day-1/index.html")).unwrap();
        assert!(day1.contains("<h1>Flat</h1>"));
        assert!(day1.contains("From the file."));

        let day2 = fs::read_to_string(site.public_dir.join("day-2/index.html")).unwrap();
        assert!(day2.contains(r#"<a href="/day-1/">Day 1: Flat</a>"#));
    }

    #[test]
    fn test_embeds_escape_ids() {
        assert!(youtube_embed("a b", "t").contains("/embed/a%20b\""));
        assert!(codesandbox_embed("x\"y", "t").contains("/embed/x%22y?"));
    }
}
