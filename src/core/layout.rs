//! Indentation and collapse-affordance rules.
//!
//! Hierarchy is only drawn in the stacked orientation.  In the flowed
//! orientation every indent is zero and no affordance is shown.

use std::fmt;
use std::str::FromStr;

// ───────────────────────────────────────── orientation ───────

/// How the host lays out its tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Tabs stacked in a column; depth is shown as indentation.
    #[default]
    Stacked,
    /// Tabs flowed in a row; hierarchy is flattened.
    Flowed,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Self::Stacked => Self::Flowed,
            Self::Flowed => Self::Stacked,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stacked => "stacked",
            Self::Flowed => "flowed",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stacked" | "vertical" | "left" => Ok(Self::Stacked),
            "flowed" | "horizontal" | "top" => Ok(Self::Flowed),
            other => Err(format!("unknown orientation: {other}")),
        }
    }
}

// ───────────────────────────────────────── rectangles ────────

/// Rectangle allocated by the host to one tab-strip entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl TabRect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Shift the left edge right by `indent`, keeping the right edge fixed.
    pub fn indented(self, indent: u16) -> Self {
        let indent = indent.min(self.width);
        Self {
            x: self.x.saturating_add(indent),
            width: self.width - indent,
            ..self
        }
    }
}

// ───────────────────────────────────────── indents ───────────

/// Default per-level indent, in host units.
pub const DEFAULT_INDENT: u16 = 20;

/// Per-level indents.  The selector rectangle and the header content are
/// configured separately since hosts draw them with different insets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentConfig {
    pub tab_indent: u16,
    pub header_indent: u16,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            tab_indent: DEFAULT_INDENT,
            header_indent: DEFAULT_INDENT,
        }
    }
}

impl IndentConfig {
    pub fn uniform(indent: u16) -> Self {
        Self {
            tab_indent: indent,
            header_indent: indent,
        }
    }

    /// Offset of the selector rectangle for a tab at `depth`.
    pub fn tab_offset(&self, depth: usize, orientation: Orientation) -> u16 {
        scaled(self.tab_indent, depth, orientation)
    }

    /// Offset of the header content for a tab at `depth`.
    pub fn header_offset(&self, depth: usize, orientation: Orientation) -> u16 {
        scaled(self.header_indent, depth, orientation)
    }
}

fn scaled(per_level: u16, depth: usize, orientation: Orientation) -> u16 {
    match orientation {
        Orientation::Stacked => {
            let depth = u16::try_from(depth).unwrap_or(u16::MAX);
            per_level.saturating_mul(depth)
        }
        Orientation::Flowed => 0,
    }
}

// ───────────────────────────────────────── affordance ────────

/// State of the collapse/expand toggle drawn in front of a tab header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Expanded,
    Collapsed,
    /// Nothing to toggle.  The toggle's width is still reserved.
    Blank,
}

impl Affordance {
    pub fn for_tab(has_children: bool, collapsed: bool, orientation: Orientation) -> Self {
        match (has_children, orientation) {
            (true, Orientation::Stacked) if collapsed => Self::Collapsed,
            (true, Orientation::Stacked) => Self::Expanded,
            _ => Self::Blank,
        }
    }

    pub fn is_toggle(self) -> bool {
        !matches!(self, Self::Blank)
    }
}
