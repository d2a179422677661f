//! Ratatui binding of the flat tab strip.
//!
//! Stacked orientation draws one tab per row, indented by depth, with a
//! collapse toggle in front of tabs that have children.  Flowed orientation
//! hands the entries to Ratatui's [`Tabs`] widget, flat.

use htabs::core::host::{FlatList, StripEntry};
use htabs::core::layout::{Affordance, Orientation, TabRect};
use htabs::core::manager::TabManager;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, StatefulWidget, Tabs, Widget},
};

use super::layout::contains;
use super::theme::Theme;

/// Columns reserved for the collapse toggle, drawn or not.
pub const AFFORDANCE_WIDTH: u16 = 2;

const DIVIDER: &str = "│";
const DIVIDER_WIDTH: u16 = 1;

// ───────────────────────────────────────── state ─────────────

/// Persistent state of the stacked strip (scroll offset).
#[derive(Debug, Default)]
pub struct TabStripState {
    /// First entry shown.
    pub offset: usize,
}

impl TabStripState {
    /// Keep `selected` within a viewport of `height` rows.
    pub fn clamp_scroll(&mut self, selected: usize, height: usize) {
        if height == 0 {
            return;
        }
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + height {
            self.offset = selected - height + 1;
        }
    }
}

/// Border drawn around the strip.  Hit-testing relies on rendering and
/// testing with the same block.
pub fn strip_block(orientation: Orientation) -> Block<'static> {
    Block::default()
        .title(format!(" Tabs ({orientation}) "))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style())
}

fn entry_label(entry: &StripEntry) -> Line<'_> {
    let mut spans = Vec::with_capacity(2);
    if let Some(icon) = &entry.icon {
        spans.push(Span::styled(format!("{icon} "), Theme::icon_style()));
    }
    spans.push(Span::raw(entry.title.as_str()));
    Line::from(spans)
}

fn affordance_glyph(affordance: Option<Affordance>) -> &'static str {
    match affordance {
        Some(Affordance::Expanded) => "▼ ",
        Some(Affordance::Collapsed) => "▶ ",
        Some(Affordance::Blank) | None => "  ",
    }
}

// ───────────────────────────────────────── widget ────────────

/// The tab strip widget: created fresh each frame.
pub struct TabStrip<'a> {
    tabs: &'a TabManager<FlatList>,
    block: Option<Block<'a>>,
}

impl<'a> TabStrip<'a> {
    pub fn new(tabs: &'a TabManager<FlatList>) -> Self {
        Self { tabs, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn render_stacked(&self, inner: Rect, buf: &mut Buffer, state: &mut TabStripState) {
        let host = self.tabs.host();
        let entries = host.entries();
        let height = inner.height as usize;
        if let Some(selected) = host.selected_index() {
            state.clamp_scroll(selected, height);
        }

        // One rectangle per entry; the manager shifts managed ones by depth.
        let mut rects = vec![TabRect::new(inner.x, 0, inner.width, 1); entries.len()];
        self.tabs.indent_rects(&mut rects);

        let rows = entries.iter().enumerate().skip(state.offset).take(height);
        for (row, (index, entry)) in rows.enumerate() {
            let y = inner.y + row as u16;
            let is_selected = host.selected_index() == Some(index);

            if is_selected {
                let r = rects[index];
                buf.set_style(Rect::new(r.x, y, r.width, 1), Theme::selected_style());
            }

            let title_style = match entry.tab.and_then(|id| self.tabs.tab(id)) {
                None => Theme::unmanaged_tab_style(),
                Some(node) if node.depth == 0 => Theme::root_tab_style(),
                Some(_) => Theme::tab_style(),
            };
            let mut label = entry_label(entry);
            label.spans.insert(
                0,
                Span::styled(affordance_glyph(self.tabs.affordance(index)), Theme::affordance_style()),
            );
            if let Some(title) = label.spans.last_mut() {
                title.style = title_style;
            }
            if is_selected {
                label = label.patch_style(Theme::selected_style());
            }

            let header_x = inner.x + self.tabs.header_indent(index).unwrap_or(0).min(inner.width);
            buf.set_line(header_x, y, &label, inner.right().saturating_sub(header_x));
        }
    }

    fn render_flowed(&self, inner: Rect, buf: &mut Buffer) {
        let host = self.tabs.host();
        let titles: Vec<Line> = host.entries().iter().map(entry_label).collect();
        Tabs::new(titles)
            .style(Theme::tab_style())
            .highlight_style(Theme::selected_style())
            .select(host.selected_index().unwrap_or(0))
            .divider(DIVIDER)
            .padding(" ", " ")
            .render(inner, buf);
    }
}

impl<'a> StatefulWidget for TabStrip<'a> {
    type State = TabStripState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        match self.tabs.orientation() {
            Orientation::Stacked => self.render_stacked(inner, buf, state),
            Orientation::Flowed => self.render_flowed(inner, buf),
        }
    }
}

// ───────────────────────────────────────── hit testing ───────

/// What a click on the strip landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripHit {
    Select(usize),
    /// The collapse toggle of the entry.
    Toggle(usize),
}

/// Map a click inside `area` (the strip including its border) to an entry.
pub fn hit_test(
    tabs: &TabManager<FlatList>,
    state: &TabStripState,
    area: Rect,
    column: u16,
    row: u16,
) -> Option<StripHit> {
    let orientation = tabs.orientation();
    let inner = strip_block(orientation).inner(area);
    if !contains(inner, column, row) {
        return None;
    }
    let entries = tabs.host().entries();

    match orientation {
        Orientation::Stacked => {
            let index = state.offset + (row - inner.y) as usize;
            if index >= entries.len() {
                return None;
            }
            let header_x = inner.x + tabs.header_indent(index).unwrap_or(0).min(inner.width);
            let on_toggle = column >= header_x && column < header_x.saturating_add(AFFORDANCE_WIDTH);
            if on_toggle && tabs.affordance(index).is_some_and(Affordance::is_toggle) {
                Some(StripHit::Toggle(index))
            } else {
                Some(StripHit::Select(index))
            }
        }
        Orientation::Flowed => {
            // Mirrors `Tabs`: padding, title, padding, then a divider.
            let mut x = inner.x;
            for (index, entry) in entries.iter().enumerate() {
                let width = entry_label(entry).width() as u16 + 2;
                if column < x.saturating_add(width) {
                    return Some(StripHit::Select(index));
                }
                x = x.saturating_add(width + DIVIDER_WIDTH);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use htabs::core::layout::IndentConfig;
    use htabs::core::tree::TabPayload;

    fn sample(orientation: Orientation) -> TabManager<FlatList> {
        let mut m = TabManager::new(FlatList::new(Orientation::Stacked), IndentConfig::uniform(2));
        let a = m.add_root(TabPayload::titled("A")).unwrap();
        m.add_child(a, TabPayload::titled("A1")).unwrap();
        m.set_orientation(orientation).unwrap();
        m
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_stacked_rows_are_indented() {
        let m = sample(Orientation::Stacked);
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        let mut state = TabStripState::default();
        TabStrip::new(&m)
            .block(strip_block(Orientation::Stacked))
            .render(area, &mut buf, &mut state);

        assert!(row(&buf, 1).starts_with("│▼ A "));
        assert!(row(&buf, 2).starts_with("│    A1"));
    }

    #[test]
    fn test_stacked_hit_test_finds_toggle() {
        let m = sample(Orientation::Stacked);
        let area = Rect::new(0, 0, 20, 4);
        let state = TabStripState::default();
        assert_eq!(hit_test(&m, &state, area, 1, 1), Some(StripHit::Toggle(0)));
        assert_eq!(hit_test(&m, &state, area, 6, 1), Some(StripHit::Select(0)));
        // A1 has nothing to toggle.
        assert_eq!(hit_test(&m, &state, area, 3, 2), Some(StripHit::Select(1)));
        assert_eq!(hit_test(&m, &state, area, 0, 0), None);
    }

    #[test]
    fn test_flowed_hit_test_walks_titles() {
        let m = sample(Orientation::Flowed);
        let area = Rect::new(0, 0, 30, 3);
        let state = TabStripState::default();
        assert_eq!(hit_test(&m, &state, area, 2, 1), Some(StripHit::Select(0)));
        assert_eq!(hit_test(&m, &state, area, 6, 1), Some(StripHit::Select(1)));
        assert_eq!(hit_test(&m, &state, area, 20, 1), None);
    }

    #[test]
    fn test_clamp_scroll_follows_selection() {
        let mut state = TabStripState::default();
        state.clamp_scroll(7, 5);
        assert_eq!(state.offset, 3);
        state.clamp_scroll(1, 5);
        assert_eq!(state.offset, 1);
    }

    #[test]
    fn test_hit_test_survives_deep_indent() {
        let mut m = TabManager::new(FlatList::new(Orientation::Stacked), IndentConfig::uniform(u16::MAX));
        let a = m.add_root(TabPayload::titled("A")).unwrap();
        m.add_child(a, TabPayload::titled("A1")).unwrap();
        let area = Rect::new(0, 0, 20, 4);
        let state = TabStripState::default();
        assert_eq!(hit_test(&m, &state, area, 5, 2), Some(StripHit::Select(1)));
    }
}
