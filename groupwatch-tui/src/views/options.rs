//! Option lists behind the squad/head/manager filters.

use crate::state::{App, OptionList};
use groupwatch_core::AssignmentField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (field, column) in AssignmentField::ALL.iter().zip(columns.iter()) {
        render_list(f, app, *field, app.options.get(*field), *column);
    }
}

fn render_list(f: &mut Frame<'_>, app: &App, field: AssignmentField, list: &OptionList, area: Rect) {
    let active = app.groups_view.query.filter().assignment(field);
    let items: Vec<ListItem> = if list.loading {
        vec![ListItem::new("carregando…")]
    } else if let Some(err) = &list.error {
        vec![ListItem::new(format!("erro: {err}")).style(Style::default().fg(app.theme.error))]
    } else if list.values.is_empty() {
        vec![ListItem::new("nenhuma opção").style(Style::default().fg(app.theme.text_dim))]
    } else {
        list.values
            .iter()
            .map(|value| {
                let style = if Some(value.as_str()) == active {
                    Style::default().fg(app.theme.primary)
                } else {
                    Style::default().fg(app.theme.text)
                };
                ListItem::new(value.clone()).style(style)
            })
            .collect()
    };

    let title = format!("{} ({})", field.label(), list.values.len());
    let widget = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(widget, area);
}
