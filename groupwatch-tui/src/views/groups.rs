//! Group triage table.

use crate::state::App;
use crate::theme::{activity_color, category_color, OdontoTheme};
use crate::widgets::{DetailPanel, FilterBar, FilterOption};
use groupwatch_core::{
    classify_record, format_last_update, format_response_time, has_interaction_on,
    situation_text, summary_text, AssignmentField, CategoryFilter, FilteredPage, GroupRecord,
    StatusCategory,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const NONE: &str = "-";

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_filter_bar(f, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(rows[1]);

    let page = app.groups_view.page(app.today);
    render_table(f, app, &page, columns[0]);
    render_detail_panel(f, app, columns[1]);
    render_pagination(f, app, &page, rows[2]);
}

fn render_filter_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let filter = app.groups_view.query.filter();
    let chips: Vec<FilterOption> = CategoryFilter::ALL
        .iter()
        .enumerate()
        .map(|(i, category)| FilterOption {
            label: format!("{} {}", i + 1, category.label()),
            active: *category == filter.category,
        })
        .collect();

    let mut values = Vec::new();
    if !filter.name_query.is_empty() {
        values.push(("Nome", filter.name_query.clone()));
    }
    for field in AssignmentField::ALL {
        let value = filter.assignment(field).unwrap_or("todos").to_string();
        values.push((field.label(), value));
    }

    let bar = FilterBar {
        title: "Filtros",
        chips: &chips,
        values,
        active_style: Style::default().fg(app.theme.primary),
        inactive_style: Style::default().fg(app.theme.text_dim),
        value_style: Style::default().fg(app.theme.text),
    };
    bar.render(f, area);
}

fn render_table(f: &mut Frame<'_>, app: &App, page: &FilteredPage<'_>, area: Rect) {
    let theme = &app.theme;
    let header = Row::new(vec![
        "", "Grupo", "Squad", "Head", "Gestor", "Última atualização", "Tempo médio", "Situação",
        "Resumo",
    ])
    .style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD));

    let body: Vec<Row> = page
        .items
        .iter()
        .map(|group| {
            let dot = category_dot(classify_record(group), theme);
            let interacted = has_interaction_on(group.last_update.as_deref(), app.today);
            Row::new(vec![
                Cell::from(dot),
                Cell::from(group.display_name().to_string()),
                Cell::from(assignment_text(group, AssignmentField::Squad)),
                Cell::from(assignment_text(group, AssignmentField::Head)),
                Cell::from(assignment_text(group, AssignmentField::Manager)),
                Cell::from(format_last_update(group.last_update.as_deref()))
                    .style(Style::default().fg(activity_color(interacted, theme))),
                Cell::from(format_response_time(group.avg_response_time.as_deref())),
                Cell::from(situation_text(group, app.today)),
                Cell::from(summary_text(group, app.today)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Percentage(18),
        Constraint::Percentage(9),
        Constraint::Percentage(9),
        Constraint::Percentage(9),
        Constraint::Length(18),
        Constraint::Length(11),
        Constraint::Percentage(14),
        Constraint::Min(10),
    ];

    let title = if app.groups_view.loading {
        "Grupos (carregando)".to_string()
    } else if page.is_empty() {
        "Grupos (nenhum grupo encontrado)".to_string()
    } else {
        "Grupos".to_string()
    };

    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(theme.bg_highlight).add_modifier(Modifier::BOLD));

    let mut state = TableState::default();
    if let Some(selected) = app.groups_view.selected {
        state.select(page.items.iter().position(|g| g.id == selected));
    }
    f.render_stateful_widget(table, area, &mut state);
}

/// Status dot for a row; groups without messages get none.
fn category_dot(category: StatusCategory, theme: &OdontoTheme) -> Span<'static> {
    match category {
        StatusCategory::NoMessages => Span::raw(""),
        other => Span::styled("●", Style::default().fg(category_color(other, theme))),
    }
}

fn assignment_text(group: &GroupRecord, field: AssignmentField) -> String {
    group.assignment(field).unwrap_or(NONE).to_string()
}

fn render_detail_panel(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mut fields = Vec::new();
    if let Some(group) = app.groups_view.selected_record(app.today) {
        fields.push(("Grupo", group.display_name().to_string()));
        fields.push(("Chave", group.group_key.clone()));
        fields.push(("Categoria", classify_record(group).label().to_string()));
        fields.push((
            "Mensagens",
            group
                .message_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| NONE.to_string()),
        ));
        fields.push(("Status", situation_text(group, app.today)));
        fields.push(("Resumo", summary_text(group, app.today)));
    }

    let detail = DetailPanel {
        title: "Detalhes",
        fields,
        label_style: Style::default().fg(app.theme.secondary),
        placeholder: "Nenhum grupo selecionado",
    };
    detail.render(f, area);
}

fn render_pagination(f: &mut Frame<'_>, app: &App, page: &FilteredPage<'_>, area: Rect) {
    let text = if page.total_filtered == 0 {
        "0 grupos".to_string()
    } else {
        format!(
            "{}-{} de {} grupos | página {}/{}",
            page.start + 1,
            page.end,
            page.total_filtered,
            page.page,
            page.total_pages.max(1)
        )
    };
    let line = Paragraph::new(text).style(Style::default().fg(app.theme.text_dim));
    f.render_widget(line, area);
}
