//! Bordered card showing one dashboard counter

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct StatCard<'a> {
    label: &'a str,
    value: Option<u32>,
    accent: Color,
}

impl<'a> StatCard<'a> {
    pub fn new(label: &'a str, value: Option<u32>) -> Self {
        Self {
            label,
            value,
            accent: Color::Cyan,
        }
    }

    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

impl<'a> Widget for StatCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // "--" until the stats arrive
        let value = self
            .value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "--".to_string());
        let lines = vec![
            Line::styled(
                value,
                Style::default()
                    .fg(self.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(self.label.to_string(), Style::default().fg(Color::Gray)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}
