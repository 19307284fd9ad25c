//! Create a new daily post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Site;

const DEFAULT_SCAFFOLD: &str = r#"---
title: {{ title }}
date: {{ date }}
videoId:
codesandboxId:
intro:
dataset:
---
"#;

/// Scaffold `source/_posts/<slug>.md` and return its path
pub fn run(site: &Site, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let target_dir = site.source_dir.join("_posts");
    fs::create_dir_all(&target_dir)?;

    let filename = match path {
        Some(p) => format!("{}.md", p.trim_end_matches(".md")),
        None => format!("{}.md", slug::slugify(title)),
    };
    let file_path = target_dir.join(filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    // A site may override the scaffold in scaffolds/post.md
    let scaffold_path = site.base_dir.join("scaffolds").join("post.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        DEFAULT_SCAFFOLD.to_string()
    };

    let content = scaffold
        .replace("{{ title }}", title)
        .replace("{{ date }}", &now.format("%Y-%m-%d %H:%M:%S").to_string());

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
