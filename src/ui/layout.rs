//! Layout helpers: split the terminal area into regions.

use htabs::core::layout::Orientation;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: the tab strip, the selected tab's content, and a bottom
/// status bar.
pub struct AppLayout {
    pub strip_area: Rect,
    pub content_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Stacked tabs form a sidebar of `tab_bar_width` columns on the left;
    /// flowed tabs form a three-row strip along the top.
    pub fn from_area(area: Rect, orientation: Orientation, tab_bar_width: u16) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // strip + content
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let (direction, strip) = match orientation {
            Orientation::Stacked => (Direction::Horizontal, Constraint::Length(tab_bar_width)),
            Orientation::Flowed => (Direction::Vertical, Constraint::Length(3)),
        };
        let panes = Layout::default()
            .direction(direction)
            .constraints([strip, Constraint::Min(1)])
            .split(rows[0]);

        Self {
            strip_area: panes[0],
            content_area: panes[1],
            status_area: rows[1],
        }
    }
}

/// Whether the cell at (`column`, `row`) lies inside `rect`.
pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
