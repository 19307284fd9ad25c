//! Card grid rendering
//!
//! One card per post summary, labelled by its position in the sequence and
//! linked to the post's slug. Every card shares the site's placeholder cover.

use serde::Serialize;

use super::layout::GRID_CLASS;
use crate::config::SiteConfig;
use crate::content::PostSummary;
use crate::helpers::{html_escape, image_tag, link_to};

/// Alt text of the placeholder cover
const COVER_ALT: &str = "logo";

/// A single rendered card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Render key, the post id
    pub key: String,
    /// "Day N: title"
    pub label: String,
    /// Link target, the post slug
    pub href: String,
    /// Cover image path; the same placeholder for every card
    pub cover: String,
}

impl Card {
    pub fn to_html(&self, config: &SiteConfig) -> String {
        let cover = image_tag(config, &self.cover, COVER_ALT, None);
        format!(
            r#"<div class="card" data-key="{key}">
  <div class="card-cover">{cover}</div>
  <h3 class="card-title">{title}</h3>
</div>"#,
            key = html_escape(&self.key),
            cover = link_to(config, &self.href, &cover),
            title = link_to(config, &self.href, &html_escape(&self.label)),
        )
    }
}

/// Label for the post at a zero-based position
pub fn card_label(prefix: &str, index: usize, title: &str) -> String {
    format!("{} {}: {}", prefix, index + 1, title)
}

/// The cards of one grid render, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedGrid {
    pub cards: Vec<Card>,
}

impl RenderedGrid {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn to_html(&self, config: &SiteConfig) -> String {
        if self.cards.is_empty() {
            return format!(r#"<div class="{}"></div>"#, GRID_CLASS);
        }

        let cards = self
            .cards
            .iter()
            .map(|card| card.to_html(config))
            .collect::<Vec<_>>()
            .join("\n");
        format!("<div class=\"{}\">\n{}\n</div>", GRID_CLASS, cards)
    }
}

/// Renders post summaries as a grid of cards
pub struct CardGrid<'a> {
    config: &'a SiteConfig,
}

impl<'a> CardGrid<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Map each summary to a card. Duplicate ids are not detected.
    pub fn render(&self, posts: &[PostSummary]) -> RenderedGrid {
        let cards = posts
            .iter()
            .enumerate()
            .map(|(i, post)| Card {
                key: post.id.clone(),
                label: card_label(&self.config.label_prefix, i, &post.title),
                href: post.slug.clone(),
                cover: self.config.cover_image.clone(),
            })
            .collect();

        RenderedGrid { cards }
    }

    /// Render straight to the grid container markup
    pub fn render_html(&self, posts: &[PostSummary]) -> String {
        self.render(posts).to_html(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries() -> Vec<PostSummary> {
        vec![
            PostSummary::new("a", "/day-1", "Intro"),
            PostSummary::new("b", "/day-2", "Arrays"),
        ]
    }

    #[test]
    fn test_render_two_posts() {
        let config = SiteConfig::default();
        let grid = CardGrid::new(&config).render(&summaries());

        assert_eq!(grid.len(), 2);
        assert_eq!(grid.cards[0].label, "Day 1: Intro");
        assert_eq!(grid.cards[0].href, "/day-1");
        assert_eq!(grid.cards[0].key, "a");
        assert_eq!(grid.cards[1].label, "Day 2: Arrays");
        assert_eq!(grid.cards[1].href, "/day-2");
        assert_eq!(grid.cards[1].key, "b");
    }

    #[test]
    fn test_render_empty() {
        let config = SiteConfig::default();
        let grid = CardGrid::new(&config).render(&[]);
        assert!(grid.is_empty());
        assert_eq!(grid.to_html(&config), r#"<div class="card-grid"></div>"#);
    }

    #[test]
    fn test_one_card_per_post_in_order() {
        let config = SiteConfig::default();
        let posts: Vec<_> = (0..25)
            .map(|i| PostSummary::new(format!("id-{}", i), format!("/day-{}/", i + 1), format!("T{}", i)))
            .collect();

        let grid = CardGrid::new(&config).render(&posts);
        assert_eq!(grid.len(), posts.len());
        for (i, (card, post)) in grid.cards.iter().zip(&posts).enumerate() {
            assert_eq!(card.key, post.id);
            assert_eq!(card.href, post.slug);
            assert_eq!(card.label, format!("Day {}: {}", i + 1, post.title));
        }
    }

    #[test]
    fn test_swapping_records_moves_keys_and_relabels() {
        let config = SiteConfig::default();
        let mut posts = summaries();
        posts.swap(0, 1);

        let grid = CardGrid::new(&config).render(&posts);
        assert_eq!(grid.cards[0].key, "b");
        assert_eq!(grid.cards[0].label, "Day 1: Arrays");
        assert_eq!(grid.cards[0].href, "/day-2");
        assert_eq!(grid.cards[1].key, "a");
        assert_eq!(grid.cards[1].label, "Day 2: Intro");
    }

    #[test]
    fn test_cover_is_static_placeholder() {
        let config = SiteConfig {
            cover_image: "images/logo.png".to_string(),
            ..Default::default()
        };
        let grid = CardGrid::new(&config).render(&summaries());
        assert!(grid.cards.iter().all(|c| c.cover == "images/logo.png"));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let config = SiteConfig::default();
        let posts = summaries();
        let before = posts.clone();
        let _ = CardGrid::new(&config).render(&posts);
        assert_eq!(posts, before);
    }

    #[test]
    fn test_card_html() {
        let config = SiteConfig::default();
        let html = CardGrid::new(&config).render_html(&summaries());

        assert!(html.starts_with(r#"<div class="card-grid">"#));
        assert!(html.contains(r#"<div class="card" data-key="a">"#));
        assert!(html.contains(r#"<a href="/day-1">Day 1: Intro</a>"#));
        assert!(html.contains(
            r#"<a href="/day-1"><img src="/images/advent-logo.svg" alt="logo"></a>"#
        ));
        assert!(html.find("Day 1: Intro").unwrap() < html.find("Day 2: Arrays").unwrap());
    }

    #[test]
    fn test_label_is_escaped() {
        let config = SiteConfig::default();
        let html = CardGrid::new(&config).render_html(&[PostSummary::new("x", "/x/", "<Maps & Sets>")]);
        assert!(html.contains("Day 1: &lt;Maps &amp; Sets&gt;"));
    }

    #[test]
    fn test_missing_title_renders_blank_label() {
        let config = SiteConfig::default();
        let grid = CardGrid::new(&config).render(&[PostSummary::new("x", "", "")]);
        assert_eq!(grid.cards[0].label, "Day 1: ");
        assert_eq!(grid.cards[0].href, "");
    }

    #[test]
    fn test_label_prefix_from_config() {
        let config = SiteConfig {
            label_prefix: "Tag".to_string(),
            ..Default::default()
        };
        let grid = CardGrid::new(&config).render(&summaries());
        assert_eq!(grid.cards[1].label, "Tag 2: Arrays");
    }
}
