//! Card grid - renders daily posts as a responsive grid of linked cards

mod card;
mod layout;

pub use card::{card_label, Card, CardGrid, RenderedGrid};
pub use layout::{Breakpoint, GridLayout, BREAKPOINTS, GRID_CLASS, WIDEST_COLUMNS};
