//! View rendering dispatch.

pub mod groups;
pub mod options;

use crate::nav::View;
use crate::state::App;
use crate::theme::{category_color, notification_color};
use crate::widgets::{ModalPanel, StatusCount, StatusIndicator};
use groupwatch_core::StatusCategory;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_view {
        View::Groups => groups::render(f, app, layout[1]),
        View::Options => options::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);
    render_overlay(f, app, f.size());
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let summary = app.groups_view.summary(app.today);
    let theme = &app.theme;
    let count = |label, value, category| StatusCount {
        label,
        value,
        style: Style::default().fg(category_color(category, theme)),
    };

    let trailer = if app.groups_view.loading {
        "atualizando…".to_string()
    } else if let Some(at) = app.last_refresh {
        format!("atualizado {}", at.format("%H:%M:%S"))
    } else {
        "não carregado".to_string()
    };

    let indicator = StatusIndicator {
        title: format!("GroupWatch | {}", app.active_view.title()),
        counts: vec![
            count("Estável", summary.stable, StatusCategory::Stable),
            count("Alerta", summary.alert, StatusCategory::Alert),
            count("Crítico", summary.critical, StatusCategory::Critical),
            StatusCount {
                label: "Sem interação hoje",
                value: summary.no_interaction_today,
                style: Style::default().fg(theme.warning),
            },
        ],
        trailer,
        trailer_style: Style::default().fg(theme.text_dim),
    };
    indicator.render(f, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = "/ buscar • c categoria • s/h/g filtros • S/H/G atribuir • x limpar • d excluir • ? ajuda • q sair";
    let (text, style) = if let Some(search) = &app.search {
        (
            format!("Buscar: {}▏  (Enter confirma, Esc cancela)", search.input),
            Style::default().fg(app.theme.primary),
        )
    } else if let Some(note) = app.notifications.last() {
        (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_overlay(f: &mut Frame<'_>, app: &App, area: Rect) {
    if let Some(pending) = &app.pending {
        let panel = ModalPanel {
            title: "Confirmar",
            lines: vec![
                Line::from(pending.prompt()),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" confirma  "),
                    Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" cancela"),
                ]),
            ],
            border_style: Style::default().fg(app.theme.error),
        };
        panel.render(f, area);
    } else if let Some(modal) = &app.modal {
        let panel = ModalPanel {
            title: modal.title.as_str(),
            lines: modal.lines.iter().map(|l| Line::from(l.as_str())).collect(),
            border_style: Style::default().fg(app.theme.border_focus),
        };
        panel.render(f, area);
    }
}
