//! Helper functions for page rendering
//!
//! URL generation, HTML tag builders and date formatting shared by the
//! card grid and the page generator.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
