//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::grid::card_label;
use crate::Site;

/// One line per post, labelled the way its card is
pub fn post_lines(site: &Site) -> Result<Vec<String>> {
    let posts = ContentLoader::new(site).load_posts()?;
    let lines = posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            format!(
                "{} - {} [{}]",
                post.date.format("%Y-%m-%d"),
                card_label(&site.config.label_prefix, i, &post.title),
                post.slug
            )
        })
        .collect();
    Ok(lines)
}

/// Print the site's posts
pub fn run(site: &Site) -> Result<()> {
    let lines = post_lines(site)?;
    println!("Posts ({}):", lines.len());
    for line in lines {
        println!("  {}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_post_lines() {
        let tmp = TempDir::new().unwrap();
        let posts_dir = tmp.path().join("source/_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("b.md"),
            "---\ntitle: Arrays\ndate: 2024-12-02\n---\n",
        )
        .unwrap();
        fs::write(
            posts_dir.join("a.md"),
            "---\ntitle: Intro\ndate: 2024-12-01\n---\n",
        )
        .unwrap();

        let site = Site::new(tmp.path()).unwrap();
        let lines = post_lines(&site).unwrap();
        assert_eq!(
            lines,
            vec![
                "2024-12-01 - Day 1: Intro [/a/]".to_string(),
                "2024-12-02 - Day 2: Arrays [/b/]".to_string(),
            ]
        );
    }
}
