//! Content pane: details of the selected tab.

use htabs::core::host::FlatList;
use htabs::core::manager::TabManager;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::theme::Theme;

pub struct ContentPane<'a> {
    pub tabs: &'a TabManager<FlatList>,
}

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:>10}: "), Theme::label_style()),
        Span::raw(value),
    ])
}

impl Widget for ContentPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let selected = self
            .tabs
            .active_tab()
            .and_then(|id| self.tabs.tab(id).map(|node| (id, node)));

        let Some((id, node)) = selected else {
            Paragraph::new("no more tabs")
                .block(Block::default().borders(Borders::ALL).border_style(Theme::border_style()))
                .render(area, buf);
            return;
        };

        let payload = &node.payload;
        let parent = node
            .parent
            .and_then(|p| self.tabs.payload(p))
            .map_or_else(|| "—".to_string(), |p| p.title.clone());

        let lines = vec![
            field("Content", payload.content.clone().unwrap_or_default()),
            field("Tooltip", payload.tooltip.clone().unwrap_or_default()),
            Line::raw(""),
            field("Tab", id.to_string()),
            field("Parent", parent),
            field("Depth", node.depth.to_string()),
            field("Children", node.children.len().to_string()),
            field("Collapsed", if node.collapsed { "yes" } else { "no" }.to_string()),
        ];

        let block = Block::default()
            .title(format!(" {} ", payload.title))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(Theme::border_style());

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
