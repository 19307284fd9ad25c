//! Responsive column rules for the card grid

use std::fmt::Write;

use crate::config::GridConfig;

/// Column count used above the widest breakpoint
pub const WIDEST_COLUMNS: u32 = 4;

/// A `max-width` media rule: at or below `max_width` pixels the grid has `columns` columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub max_width: u32,
    pub columns: u32,
}

/// Breakpoints, widest first
pub const BREAKPOINTS: [Breakpoint; 3] = [
    Breakpoint {
        max_width: 1100,
        columns: 3,
    },
    Breakpoint {
        max_width: 940,
        columns: 2,
    },
    Breakpoint {
        max_width: 640,
        columns: 1,
    },
];

/// CSS class of the grid container
pub const GRID_CLASS: &str = "card-grid";

/// Layout rule table for the card grid container
#[derive(Debug, Clone)]
pub struct GridLayout {
    max_width: u32,
    gap: u32,
    breakpoints: Vec<Breakpoint>,
}

impl GridLayout {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            max_width: config.max_width,
            gap: config.gap,
            breakpoints: BREAKPOINTS.to_vec(),
        }
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Number of columns at a viewport width.
    ///
    /// Media rules cascade, so the narrowest matching breakpoint wins; a width
    /// exactly on a breakpoint belongs to the narrower band.
    pub fn columns_for_width(&self, viewport_px: u32) -> u32 {
        self.breakpoints
            .iter()
            .rev()
            .find(|bp| viewport_px <= bp.max_width)
            .map(|bp| bp.columns)
            .unwrap_or(WIDEST_COLUMNS)
    }

    /// Container rule followed by one media rule per breakpoint, widest first
    pub fn stylesheet(&self) -> String {
        let mut css = String::new();

        let _ = writeln!(css, ".{} {{", GRID_CLASS);
        css.push_str(&self.track_rules(WIDEST_COLUMNS, "  "));
        let _ = writeln!(css, "  margin: 0 auto;");
        let _ = writeln!(css, "  padding: 3rem 0;");
        let _ = writeln!(css, "  max-width: {}px;", self.max_width);
        css.push_str("}\n");

        for bp in &self.breakpoints {
            let _ = writeln!(css, "\n@media (max-width: {}px) {{", bp.max_width);
            let _ = writeln!(css, "  .{} {{", GRID_CLASS);
            css.push_str(&self.track_rules(bp.columns, "    "));
            css.push_str("  }\n}\n");
        }

        css
    }

    /// Declarations shared by every breakpoint
    fn track_rules(&self, columns: u32, indent: &str) -> String {
        let mut css = String::new();
        let _ = writeln!(css, "{}display: grid;", indent);
        let _ = writeln!(css, "{}grid-gap: {}px;", indent, self.gap);
        let _ = writeln!(css, "{}align-items: center;", indent);
        let _ = writeln!(css, "{}justify-items: center;", indent);
        let _ = writeln!(
            css,
            "{}grid-template-columns: repeat({}, 1fr);",
            indent, columns
        );
        css
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}
