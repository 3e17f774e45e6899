//! Action handling: turns key actions into state changes and store calls.
//!
//! Store failures never abort the loop; they end up as footer
//! notifications and the user retries with refresh.

use crate::api_client::ApiClientError;
use crate::keys::{map_key, map_search_key, Action};
use crate::nav::View;
use crate::notifications::NotificationLevel;
use crate::state::{next_option, App, Modal, PendingAction};
use crate::traits::GroupStore;
use chrono::Local;
use crossterm::event::KeyEvent;
use groupwatch_core::{
    classify_record, plan_invalid_status_cleanup, plan_stale_status_cleanup, AssignmentField,
    CategoryFilter, GroupId, StatusCategory, NO_MESSAGES_PLACEHOLDER,
};
use std::collections::HashMap;

/// Handle one key press. Returns `true` when the app should quit.
pub async fn handle_key<S>(app: &mut App, store: &S, key: KeyEvent) -> bool
where
    S: GroupStore + ?Sized,
{
    if app.search.is_some() {
        if let Some(search_key) = map_search_key(key) {
            app.apply_search_key(search_key);
        }
        return false;
    }
    match map_key(key) {
        Some(action) => handle_action(app, store, action).await,
        None => false,
    }
}

pub async fn handle_action<S>(app: &mut App, store: &S, action: Action) -> bool
where
    S: GroupStore + ?Sized,
{
    // While a confirmation or modal is up only confirm/cancel/quit apply.
    if app.pending.is_some() || app.modal.is_some() {
        match action {
            Action::Confirm => {
                if app.pending.is_some() {
                    confirm_pending(app, store).await;
                } else {
                    app.modal = None;
                }
            }
            Action::Cancel => {
                app.cancel();
            }
            Action::Quit => return true,
            _ => {}
        }
        return false;
    }

    match action {
        Action::Quit => return true,
        Action::NextView => app.active_view = app.active_view.next(),
        Action::PrevView => app.active_view = app.active_view.previous(),
        Action::MoveDown => app.select_next(),
        Action::MoveUp => app.select_previous(),
        Action::NextPage => app.next_page(),
        Action::PrevPage => app.prev_page(),
        Action::CycleCategory => app.cycle_category(),
        Action::SelectCategory(index) => {
            if let Some(category) = CategoryFilter::from_index(index) {
                app.set_category(category);
            }
        }
        Action::CycleFilter(field) => app.cycle_filter(field),
        Action::CycleAssignment(field) => cycle_assignment(app, store, field).await,
        Action::ResetFilters => app.reset_filters(),
        Action::ClearStatus => clear_selected_status(app, store).await,
        Action::DeleteGroup => request_delete(app),
        Action::CleanInvalidStatuses => {
            app.request_confirmation(PendingAction::CleanInvalidStatuses)
        }
        Action::CleanStaleStatuses => request_stale_cleanup(app),
        Action::CheckSoftDelete => check_soft_delete(app, store).await,
        Action::OpenHelp => app.open_help(),
        Action::OpenSearch => {
            app.active_view = View::Groups;
            app.open_search();
        }
        Action::Refresh => {
            refresh_groups(app, store).await;
            load_options(app, store).await;
        }
        Action::Confirm | Action::Cancel => {}
    }
    false
}

// ============================================================================
// Loading
// ============================================================================

pub async fn refresh_groups<S>(app: &mut App, store: &S)
where
    S: GroupStore + ?Sized,
{
    app.groups_view.loading = true;
    match store.fetch_all_groups().await {
        Ok(groups) => {
            let today = app.today;
            app.groups_view.replace(groups, today);
            app.last_refresh = Some(Local::now());
        }
        Err(err) => {
            tracing::warn!(error = %err, "group refresh failed");
            app.groups_view.error = Some(err.to_string());
            app.notify(NotificationLevel::Error, format!("Falha ao carregar grupos: {err}"));
        }
    }
    app.groups_view.loading = false;
}

/// Load the three option lists; each one fails on its own.
pub async fn load_options<S>(app: &mut App, store: &S)
where
    S: GroupStore + ?Sized,
{
    for field in AssignmentField::ALL {
        app.options.get_mut(field).loading = true;
        let result = store.list_options(field).await;
        let list = app.options.get_mut(field);
        list.loading = false;
        match result {
            Ok(values) => {
                list.values = values;
                list.error = None;
            }
            Err(err) => {
                tracing::warn!(field = field.column(), error = %err, "option load failed");
                list.error = Some(err.to_string());
                app.notify(
                    NotificationLevel::Warning,
                    format!("Falha ao carregar {}: {err}", field.label()),
                );
            }
        }
    }
}

// ============================================================================
// Single-group edits
// ============================================================================

/// Move the selected group's `field` to the next option (or back to none).
pub async fn cycle_assignment<S>(app: &mut App, store: &S, field: AssignmentField)
where
    S: GroupStore + ?Sized,
{
    let Some(group) = app.groups_view.selected_record(app.today) else {
        app.notify(NotificationLevel::Info, "Nenhum grupo selecionado");
        return;
    };
    let id = group.id;
    let options = app.options.get(field);
    // Without a usable list the cycle would land on none and wipe the value.
    if options.loading || options.error.is_some() || options.values.is_empty() {
        let reason = if options.loading {
            "carregando"
        } else if options.error.is_some() {
            "falha ao carregar"
        } else {
            "nenhuma opção cadastrada"
        };
        app.notify(
            NotificationLevel::Warning,
            format!("{} indisponível ({reason}); nada foi alterado", field.label()),
        );
        return;
    }
    let next = next_option(&options.values, group.assignment(field));

    match store.update_group_field(id, field, next.clone()).await {
        Ok(()) => {
            if let Some(group) = app.groups_view.get_mut(id) {
                group.set_assignment(field, next.clone());
            }
            let shown = next.unwrap_or_else(|| "nenhum".to_string());
            app.notify(
                NotificationLevel::Success,
                format!("{} atualizado: {shown}", field.label()),
            );
            let today = app.today;
            app.groups_view.clamp_selection(today);
        }
        Err(err) => report_failure(app, "atualizar", err),
    }
}

pub async fn clear_selected_status<S>(app: &mut App, store: &S)
where
    S: GroupStore + ?Sized,
{
    let Some(group) = app.groups_view.selected_record(app.today) else {
        app.notify(NotificationLevel::Info, "Nenhum grupo selecionado");
        return;
    };
    if classify_record(group) == StatusCategory::NoMessages {
        app.notify(NotificationLevel::Info, "O grupo já está sem status");
        return;
    }
    let id = group.id;

    match store.clear_group_status(id).await {
        Ok(()) => {
            if let Some(group) = app.groups_view.get_mut(id) {
                group.status = None;
                group.summary = Some(NO_MESSAGES_PLACEHOLDER.to_string());
            }
            app.notify(NotificationLevel::Success, "Status limpo");
            let today = app.today;
            app.groups_view.clamp_selection(today);
        }
        Err(err) => report_failure(app, "limpar status", err),
    }
}

pub fn request_delete(app: &mut App) {
    if !app.config.soft_delete {
        app.notify(NotificationLevel::Warning, "Exclusão lógica desativada na configuração");
        return;
    }
    let Some(group) = app.groups_view.selected_record(app.today) else {
        app.notify(NotificationLevel::Info, "Nenhum grupo selecionado");
        return;
    };
    let action = PendingAction::DeleteGroup {
        id: group.id,
        name: group.display_name().to_string(),
    };
    app.request_confirmation(action);
}

pub fn request_stale_cleanup(app: &mut App) {
    let ids = plan_stale_status_cleanup(&app.groups_view.groups, app.today);
    if ids.is_empty() {
        app.notify(NotificationLevel::Info, "Nenhum status desatualizado");
        return;
    }
    app.request_confirmation(PendingAction::CleanStaleStatuses { ids });
}

pub async fn confirm_pending<S>(app: &mut App, store: &S)
where
    S: GroupStore + ?Sized,
{
    let Some(action) = app.pending.take() else {
        return;
    };
    match action {
        PendingAction::DeleteGroup { id, name } => delete_group(app, store, id, &name).await,
        PendingAction::CleanInvalidStatuses => clean_invalid_statuses(app, store).await,
        PendingAction::CleanStaleStatuses { ids } => {
            clear_many(app, store, &ids, "sem atualização hoje").await
        }
    }
}

async fn delete_group<S>(app: &mut App, store: &S, id: GroupId, name: &str)
where
    S: GroupStore + ?Sized,
{
    match store.soft_delete_group(id).await {
        Ok(()) => {
            app.groups_view.remove(id);
            let today = app.today;
            app.groups_view.clamp_selection(today);
            app.notify(NotificationLevel::Success, format!("Grupo \"{name}\" excluído"));
        }
        Err(err) => report_failure(app, "excluir", err),
    }
}

// ============================================================================
// Maintenance
// ============================================================================

/// Clear status and summary of analysed groups with no stored messages.
pub async fn clean_invalid_statuses<S>(app: &mut App, store: &S)
where
    S: GroupStore + ?Sized,
{
    let mut lookups: HashMap<GroupId, Option<bool>> = HashMap::new();
    for group in app.groups_view.groups.iter().filter(|g| g.has_analysis()) {
        let answer = match store.group_has_messages(&group.group_key).await {
            Ok(has) => Some(has),
            Err(err) => {
                tracing::warn!(id = group.id, error = %err, "message lookup failed; skipping");
                None
            }
        };
        lookups.insert(group.id, answer);
    }
    let ids = plan_invalid_status_cleanup(&app.groups_view.groups, |g| {
        lookups.get(&g.id).copied().flatten()
    });
    if ids.is_empty() {
        app.notify(NotificationLevel::Info, "Nenhum status inválido encontrado");
        return;
    }
    clear_many(app, store, &ids, "sem mensagens").await;
}

async fn clear_many<S>(app: &mut App, store: &S, ids: &[GroupId], reason: &str)
where
    S: GroupStore + ?Sized,
{
    match store.clear_statuses(ids).await {
        Ok(()) => {
            for id in ids {
                if let Some(group) = app.groups_view.get_mut(*id) {
                    group.status = None;
                    group.summary = None;
                }
            }
            tracing::info!(count = ids.len(), reason, "cleanup applied");
            app.notify(
                NotificationLevel::Success,
                format!("{} status limpo(s) ({reason})", ids.len()),
            );
            let today = app.today;
            app.groups_view.clamp_selection(today);
        }
        Err(err) => report_failure(app, "limpar status", err),
    }
}

/// Show the active/deleted split, or the migration to run when the
/// soft-delete column is missing.
pub async fn check_soft_delete<S>(app: &mut App, store: &S)
where
    S: GroupStore + ?Sized,
{
    match store.soft_delete_report().await {
        Ok(report) => {
            app.modal = Some(Modal {
                title: "Exclusão lógica".to_string(),
                lines: vec![
                    format!("Ativos:     {}", report.active),
                    format!("Excluídos:  {}", report.deleted),
                    format!("Sem valor:  {}", report.unset),
                    format!("Total:      {}", report.total()),
                ],
            });
        }
        Err(ApiClientError::MissingColumn { table, column }) => {
            app.modal = Some(Modal {
                title: "Coluna ausente".to_string(),
                lines: migration_lines(&table, &column),
            });
        }
        Err(err) => report_failure(app, "verificar exclusão lógica", err),
    }
}

pub fn migration_lines(table: &str, column: &str) -> Vec<String> {
    vec![
        format!("A coluna \"{column}\" não existe em \"{table}\". Execute:"),
        String::new(),
        format!("ALTER TABLE \"{table}\" ADD COLUMN \"{column}\" BOOLEAN DEFAULT FALSE;"),
        format!("UPDATE \"{table}\" SET \"{column}\" = FALSE WHERE \"{column}\" IS NULL;"),
    ]
}

fn report_failure(app: &mut App, what: &str, err: ApiClientError) {
    tracing::error!(error = %err, "failed to {what}");
    app.notify(NotificationLevel::Error, format!("Falha ao {what}: {err}"));
}
