//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Writing
    pub date_format: String,
    pub render_drafts: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Cards
    /// Placeholder cover shown on every card, relative to the site root
    pub cover_image: String,
    /// Word placed before the ordinal in card labels ("Day 3: ...")
    pub label_prefix: String,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub image: ImageConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Advent".to_string(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            date_format: "MMMM DD, YYYY".to_string(),
            render_drafts: false,
            highlight: HighlightConfig::default(),

            cover_image: "images/advent-logo.svg".to_string(),
            label_prefix: "Day".to_string(),
            grid: GridConfig::default(),
            image: ImageConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }
}

/// Card grid container settings.
///
/// The defaults are the stock grid: 1300px wide, 20px between cards at
/// every breakpoint. Setting `gap` changes that spacing for all bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Maximum container width in pixels
    pub max_width: u32,
    /// Gap between cards in pixels, 20 unless overridden
    pub gap: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_width: 1300,
            gap: 20,
        }
    }
}

/// Responsive post image settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Largest width advertised in a post image's srcset
    pub max_width: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self { max_width: 1240 }
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}
