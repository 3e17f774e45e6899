//! Centered overlay for help, reports and confirmations.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub struct ModalPanel<'a> {
    pub title: &'a str,
    pub lines: Vec<Line<'a>>,
    pub border_style: Style,
}

impl<'a> ModalPanel<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let height = (self.lines.len() as u16 + 2).min(area.height);
        let rect = centered_rect(70, height, area);
        let paragraph = Paragraph::new(self.lines.clone())
            .block(
                Block::default()
                    .title(self.title)
                    .borders(Borders::ALL)
                    .border_style(self.border_style),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(Clear, rect);
        f.render_widget(paragraph, rect);
    }
}

/// A rect `percent_x` wide and `height` rows tall, centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let side = 100u16.saturating_sub(percent_x) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(side),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(side),
        ])
        .split(vertical[1])[1]
}
