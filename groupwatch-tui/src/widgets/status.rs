//! Status indicator widget: labelled counters in one bordered line.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct StatusCount {
    pub label: &'static str,
    pub value: usize,
    pub style: Style,
}

pub struct StatusIndicator {
    pub title: String,
    pub counts: Vec<StatusCount>,
    /// Right-hand trailer, e.g. the refresh state.
    pub trailer: String,
    pub trailer_style: Style,
}

impl StatusIndicator {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = Vec::new();
        for count in &self.counts {
            spans.push(Span::styled("● ", count.style));
            spans.push(Span::raw(format!("{} {}   ", count.label, count.value)));
        }
        spans.push(Span::styled(self.trailer.clone(), self.trailer_style));

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(self.title.as_str())
                .borders(Borders::ALL),
        );
        f.render_widget(paragraph, area);
    }
}
