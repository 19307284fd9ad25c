//! Configuration module

mod site;

pub use site::GridConfig;
pub use site::HighlightConfig;
pub use site::ImageConfig;
pub use site::SiteConfig;
