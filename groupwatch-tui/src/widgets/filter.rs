//! Filter bar widget: one line of chips plus free-form filter values.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone)]
pub struct FilterOption {
    pub label: String,
    pub active: bool,
}

pub struct FilterBar<'a> {
    pub title: &'a str,
    pub chips: &'a [FilterOption],
    /// `(label, value)` pairs rendered after the chips.
    pub values: Vec<(&'a str, String)>,
    pub active_style: Style,
    pub inactive_style: Style,
    pub value_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans: Vec<Span> = self
            .chips
            .iter()
            .map(|chip| {
                let style = if chip.active {
                    self.active_style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    self.inactive_style
                };
                Span::styled(format!(" {} ", chip.label), style)
            })
            .collect();

        for (label, value) in &self.values {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("{label}: "), self.inactive_style));
            spans.push(Span::styled(value.clone(), self.value_style));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().title(self.title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}
