//! Application state and view state definitions.

use crate::config::TuiConfig;
use crate::keys::{SearchKey, HELP_LINES};
use crate::nav::View;
use crate::notifications::{Notification, NotificationLevel, NOTIFICATION_TTL_MS};
use crate::persistence::PersistedState;
use crate::theme::OdontoTheme;
use chrono::{DateTime, Local, NaiveDate, Utc};
use groupwatch_core::{
    summarize_on, AssignmentField, CategoryFilter, FilteredPage, GroupFilter, GroupId,
    GroupQuery, GroupRecord, StatusSummary,
};

/// Notifications kept for the footer.
const MAX_NOTIFICATIONS: usize = 50;

pub struct App {
    pub config: TuiConfig,
    pub theme: OdontoTheme,
    pub active_view: View,

    pub groups_view: GroupsViewState,
    pub options: OptionsState,

    pub notifications: Vec<Notification>,
    pub search: Option<NameSearch>,
    pub modal: Option<Modal>,
    pub pending: Option<PendingAction>,

    pub last_refresh: Option<DateTime<Local>>,
    /// Reference day for "interacted today" checks.
    pub today: NaiveDate,
}

impl App {
    pub fn new(config: TuiConfig, today: NaiveDate) -> Self {
        Self {
            config,
            theme: OdontoTheme::odonto(),
            active_view: View::Groups,
            groups_view: GroupsViewState::new(),
            options: OptionsState::default(),
            notifications: Vec::new(),
            search: None,
            modal: None,
            pending: None,
            last_refresh: None,
            today,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let overflow = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..overflow);
        }
    }

    /// Drop notifications older than the footer TTL at `now`.
    pub fn expire_notifications(&mut self, now: DateTime<Utc>) {
        self.notifications
            .retain(|n| !n.is_expired(now, NOTIFICATION_TTL_MS));
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        if self.today != today {
            self.today = today;
            self.groups_view.clamp_selection(today);
        }
    }

    pub fn restore(&mut self, state: PersistedState) {
        self.active_view = state.active_view;
        self.groups_view.query = GroupQuery::new(state.filter);
    }

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            active_view: self.active_view,
            filter: self.groups_view.query.filter().clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------------

    pub fn cycle_category(&mut self) {
        let next = self.groups_view.query.filter().category.next();
        self.set_category(next);
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.groups_view.query.set_category(category);
        self.groups_view.clamp_selection(self.today);
    }

    /// Step the list filter for `field`: none, each option in order, none.
    pub fn cycle_filter(&mut self, field: AssignmentField) {
        let current = self.groups_view.query.filter().assignment(field);
        let next = next_option(&self.options.get(field).values, current);
        self.groups_view.query.set_assignment(field, next);
        self.groups_view.clamp_selection(self.today);
    }

    pub fn reset_filters(&mut self) {
        self.groups_view.query.set_filter(GroupFilter::default());
        self.groups_view.clamp_selection(self.today);
    }

    pub fn open_search(&mut self) {
        let current = self.groups_view.query.filter().name_query.clone();
        self.search = Some(NameSearch {
            input: current.clone(),
            original: current,
        });
    }

    /// Apply one search keystroke; the list narrows as the user types.
    pub fn apply_search_key(&mut self, key: SearchKey) {
        let Some(search) = self.search.as_mut() else {
            return;
        };
        match key {
            SearchKey::Insert(c) => search.input.push(c),
            SearchKey::Backspace => {
                search.input.pop();
            }
            SearchKey::Clear => search.input.clear(),
            SearchKey::Submit => {
                self.search = None;
                return;
            }
            SearchKey::Cancel => {
                let original = search.original.clone();
                self.search = None;
                self.groups_view.query.set_name_query(original);
                self.groups_view.clamp_selection(self.today);
                return;
            }
        }
        let input = search.input.clone();
        self.groups_view.query.set_name_query(input);
        self.groups_view.clamp_selection(self.today);
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn next_page(&mut self) {
        let total_pages = self.groups_view.page(self.today).total_pages;
        self.groups_view.query.next_page(total_pages);
        self.groups_view.clamp_selection(self.today);
    }

    pub fn prev_page(&mut self) {
        self.groups_view.query.prev_page();
        self.groups_view.clamp_selection(self.today);
    }

    pub fn select_next(&mut self) {
        let ids = self.groups_view.page_ids(self.today);
        select_next_id(&ids, &mut self.groups_view.selected);
    }

    pub fn select_previous(&mut self) {
        let ids = self.groups_view.page_ids(self.today);
        select_prev_id(&ids, &mut self.groups_view.selected);
    }

    // ------------------------------------------------------------------------
    // Overlays
    // ------------------------------------------------------------------------

    pub fn open_help(&mut self) {
        self.modal = Some(Modal {
            title: "Atalhos".to_string(),
            lines: HELP_LINES
                .iter()
                .map(|(keys, what)| format!("{keys:<14} {what}"))
                .collect(),
        });
    }

    pub fn request_confirmation(&mut self, action: PendingAction) {
        self.modal = None;
        self.pending = Some(action);
    }

    /// Drop whatever overlay is open. Returns whether anything was closed.
    pub fn cancel(&mut self) -> bool {
        let had_overlay = self.pending.is_some() || self.modal.is_some();
        self.pending = None;
        self.modal = None;
        had_overlay
    }
}

/// The name search being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSearch {
    pub input: String,
    /// Query in effect when editing started, restored on cancel.
    pub original: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub lines: Vec<String>,
}

/// Destructive operations waiting for Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteGroup { id: GroupId, name: String },
    CleanInvalidStatuses,
    CleanStaleStatuses { ids: Vec<GroupId> },
}

impl PendingAction {
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::DeleteGroup { name, .. } => {
                format!("Excluir o grupo \"{name}\"?")
            }
            PendingAction::CleanInvalidStatuses => {
                "Limpar status e resumo dos grupos sem mensagens registradas?".to_string()
            }
            PendingAction::CleanStaleStatuses { ids } => format!(
                "Limpar status e resumo de {} grupo(s) sem atualização hoje?",
                ids.len()
            ),
        }
    }
}

// ============================================================================
// GROUPS VIEW
// ============================================================================

#[derive(Debug, Clone)]
pub struct GroupsViewState {
    pub groups: Vec<GroupRecord>,
    pub query: GroupQuery,
    pub selected: Option<GroupId>,
    pub loading: bool,
    pub error: Option<String>,
}

impl GroupsViewState {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            query: GroupQuery::default(),
            selected: None,
            loading: false,
            error: None,
        }
    }

    /// Swap in a fresh fetch, keeping the selection when the group is still
    /// on the current page.
    pub fn replace(&mut self, groups: Vec<GroupRecord>, today: NaiveDate) {
        self.groups = groups;
        self.error = None;
        self.clamp_selection(today);
    }

    pub fn get(&self, id: GroupId) -> Option<&GroupRecord> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn get_mut(&mut self, id: GroupId) -> Option<&mut GroupRecord> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    pub fn remove(&mut self, id: GroupId) {
        self.groups.retain(|g| g.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    pub fn page(&self, today: NaiveDate) -> FilteredPage<'_> {
        self.query.run(&self.groups, today)
    }

    pub fn page_ids(&self, today: NaiveDate) -> Vec<GroupId> {
        self.page(today).items.iter().map(|g| g.id).collect()
    }

    /// Headline over every loaded group, independent of the filters.
    pub fn summary(&self, today: NaiveDate) -> StatusSummary {
        summarize_on(&self.groups, today)
    }

    /// The selected group, if it is on the current page.
    pub fn selected_record(&self, today: NaiveDate) -> Option<&GroupRecord> {
        let id = self.selected?;
        self.page(today).items.into_iter().find(|g| g.id == id)
    }

    /// Pull the page back in range and keep the selection on it.
    pub fn clamp_selection(&mut self, today: NaiveDate) {
        let total_pages = self.page(today).total_pages;
        if self.query.page() > total_pages.max(1) {
            self.query.set_page(total_pages);
        }
        let ids = self.page_ids(today);
        match self.selected {
            Some(id) if ids.contains(&id) => {}
            _ => self.selected = ids.first().copied(),
        }
    }
}

impl Default for GroupsViewState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// OPTION LISTS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    pub values: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OptionsState {
    pub squads: OptionList,
    pub heads: OptionList,
    pub managers: OptionList,
}

impl OptionsState {
    pub fn get(&self, field: AssignmentField) -> &OptionList {
        match field {
            AssignmentField::Squad => &self.squads,
            AssignmentField::Head => &self.heads,
            AssignmentField::Manager => &self.managers,
        }
    }

    pub fn get_mut(&mut self, field: AssignmentField) -> &mut OptionList {
        match field {
            AssignmentField::Squad => &mut self.squads,
            AssignmentField::Head => &mut self.heads,
            AssignmentField::Manager => &mut self.managers,
        }
    }
}

/// The value after `current` in `values`; none after the last one. An
/// unknown or absent current value starts over at the first option.
pub fn next_option(values: &[String], current: Option<&str>) -> Option<String> {
    match current.and_then(|c| values.iter().position(|v| v == c)) {
        Some(index) => values.get(index + 1).cloned(),
        None => values.first().cloned(),
    }
}

fn select_next_id(ids: &[GroupId], selected: &mut Option<GroupId>) {
    if ids.is_empty() {
        *selected = None;
        return;
    }
    let next = match selected.and_then(|id| ids.iter().position(|item| *item == id)) {
        Some(index) => (index + 1) % ids.len(),
        None => 0,
    };
    *selected = Some(ids[next]);
}

fn select_prev_id(ids: &[GroupId], selected: &mut Option<GroupId>) {
    if ids.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .and_then(|id| ids.iter().position(|item| *item == id))
        .unwrap_or(0);
    let prev = if index == 0 { ids.len() - 1 } else { index - 1 };
    *selected = Some(ids[prev]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, TablesConfig, ThemeConfig};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    fn config() -> TuiConfig {
        TuiConfig {
            api_base_url: "http://localhost:54321".to_string(),
            auth: AuthConfig {
                api_key: "anon".to_string(),
                access_token: None,
            },
            request_timeout_ms: 5_000,
            refresh_interval_ms: 60_000,
            tables: TablesConfig {
                groups: "Lista_de_Grupos".to_string(),
                messages: "Lista_de_Mensagens".to_string(),
                squads: "squads".to_string(),
                heads: "heads".to_string(),
                managers: "gestores".to_string(),
                option_column: "nome".to_string(),
            },
            soft_delete: true,
            persistence_path: "tmp/state.json".into(),
            log_path: "tmp/groupwatch.log".into(),
            theme: ThemeConfig {
                name: "odonto".to_string(),
            },
        }
    }

    fn numbered(count: i64) -> Vec<GroupRecord> {
        (1..=count)
            .map(|i| {
                let mut g = GroupRecord::new(i, format!("grupo-{i}"));
                g.display_name = Some(format!("Unidade {i}"));
                g
            })
            .collect()
    }

    fn app_with(count: i64) -> App {
        let mut app = App::new(config(), today());
        app.groups_view.replace(numbered(count), today());
        app
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    #[test]
    fn replace_selects_first_row() {
        let app = app_with(3);
        assert_eq!(app.groups_view.selected, Some(1));
    }

    #[test]
    fn replace_on_empty_clears_selection() {
        let mut app = app_with(3);
        app.groups_view.replace(Vec::new(), today());
        assert_eq!(app.groups_view.selected, None);
        assert!(app.groups_view.selected_record(today()).is_none());
    }

    #[test]
    fn selection_wraps_within_page() {
        let mut app = app_with(12);
        for _ in 0..9 {
            app.select_next();
        }
        assert_eq!(app.groups_view.selected, Some(10));
        app.select_next();
        assert_eq!(app.groups_view.selected, Some(1), "stays on page one");
        app.select_previous();
        assert_eq!(app.groups_view.selected, Some(10));
    }

    #[test]
    fn paging_moves_selection_to_new_page() {
        let mut app = app_with(12);
        app.next_page();
        assert_eq!(app.groups_view.query.page(), 2);
        assert_eq!(app.groups_view.selected, Some(11));
        app.next_page();
        assert_eq!(app.groups_view.query.page(), 2, "no page three");
        app.prev_page();
        assert_eq!(app.groups_view.selected, Some(1));
    }

    #[test]
    fn shrinking_list_pulls_page_back() {
        let mut app = app_with(25);
        app.next_page();
        app.next_page();
        assert_eq!(app.groups_view.query.page(), 3);
        app.groups_view.replace(numbered(8), today());
        assert_eq!(app.groups_view.query.page(), 1);
        assert_eq!(app.groups_view.selected, Some(1));
    }

    #[test]
    fn remove_drops_selection() {
        let mut app = app_with(2);
        app.groups_view.remove(1);
        assert_eq!(app.groups_view.selected, None);
        assert_eq!(app.groups_view.groups.len(), 1);
    }

    // ========================================================================
    // Filters
    // ========================================================================

    #[test]
    fn option_cycle_goes_through_values_then_none() {
        let values = strings(&["A", "B"]);
        assert_eq!(next_option(&values, None), Some("A".to_string()));
        assert_eq!(next_option(&values, Some("A")), Some("B".to_string()));
        assert_eq!(next_option(&values, Some("B")), None);
        assert_eq!(next_option(&values, Some("gone")), Some("A".to_string()));
        assert_eq!(next_option(&[], None), None);
    }

    #[test]
    fn cycle_filter_uses_loaded_options() {
        let mut app = app_with(3);
        app.groups_view.groups[1].squad = Some("Squad B".to_string());
        app.options.squads.values = strings(&["Squad A", "Squad B"]);

        app.cycle_filter(AssignmentField::Squad);
        assert_eq!(app.groups_view.query.filter().squad.as_deref(), Some("Squad A"));
        assert_eq!(app.groups_view.selected, None);

        app.cycle_filter(AssignmentField::Squad);
        assert_eq!(app.groups_view.selected, Some(2));

        app.cycle_filter(AssignmentField::Squad);
        assert_eq!(app.groups_view.query.filter().squad, None);
    }

    #[test]
    fn cycle_category_walks_all_chips() {
        let mut app = app_with(1);
        let mut seen = vec![app.groups_view.query.filter().category];
        for _ in 0..CategoryFilter::ALL.len() - 1 {
            app.cycle_category();
            seen.push(app.groups_view.query.filter().category);
        }
        assert_eq!(seen, CategoryFilter::ALL.to_vec());
        app.cycle_category();
        assert_eq!(app.groups_view.query.filter().category, CategoryFilter::All);
    }

    #[test]
    fn search_narrows_live_and_cancel_restores() {
        let mut app = app_with(12);
        app.open_search();
        for c in "unidade 1".chars() {
            app.apply_search_key(SearchKey::Insert(c));
        }
        // 1, 10, 11, 12
        assert_eq!(app.groups_view.page(today()).total_filtered, 4);

        app.apply_search_key(SearchKey::Cancel);
        assert!(app.search.is_none());
        assert_eq!(app.groups_view.query.filter().name_query, "");
        assert_eq!(app.groups_view.page(today()).total_filtered, 12);
    }

    #[test]
    fn search_submit_keeps_query() {
        let mut app = app_with(3);
        app.open_search();
        app.apply_search_key(SearchKey::Insert('3'));
        app.apply_search_key(SearchKey::Submit);
        assert!(app.search.is_none());
        assert_eq!(app.groups_view.query.filter().name_query, "3");
        assert_eq!(app.groups_view.selected, Some(3));
    }

    #[test]
    fn search_keys_without_search_are_ignored() {
        let mut app = app_with(3);
        app.apply_search_key(SearchKey::Insert('x'));
        assert_eq!(app.groups_view.query.filter().name_query, "");
    }

    #[test]
    fn reset_filters_returns_to_defaults() {
        let mut app = app_with(3);
        app.set_category(CategoryFilter::Critical);
        app.groups_view.query.set_name_query("x");
        app.reset_filters();
        assert_eq!(app.groups_view.query.filter(), &GroupFilter::default());
        assert_eq!(app.groups_view.selected, Some(1));
    }

    // ========================================================================
    // Overlays and persistence
    // ========================================================================

    #[test]
    fn cancel_closes_pending_and_modal() {
        let mut app = app_with(1);
        app.open_help();
        assert!(app.modal.is_some());
        app.request_confirmation(PendingAction::CleanInvalidStatuses);
        assert!(app.modal.is_none());
        assert!(app.cancel());
        assert!(app.pending.is_none());
        assert!(!app.cancel());
    }

    #[test]
    fn persisted_state_round_trips_filters_only() {
        let mut app = app_with(30);
        app.set_category(CategoryFilter::NoMessages);
        app.next_page();
        let state = app.persisted_state();

        let mut restored = App::new(config(), today());
        restored.restore(state.clone());
        assert_eq!(restored.groups_view.query.filter(), &state.filter);
        assert_eq!(restored.groups_view.query.page(), 1);
    }

    #[test]
    fn notifications_are_capped() {
        let mut app = app_with(0);
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            app.notify(NotificationLevel::Info, format!("n{i}"));
        }
        assert_eq!(app.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(app.notifications[0].message, "n5");
    }

    #[test]
    fn notifications_expire_after_ttl() {
        let mut app = app_with(0);
        app.notify(NotificationLevel::Info, "velha");
        app.notify(NotificationLevel::Success, "nova");
        let now = app.notifications[1].created_at;
        app.notifications[0].created_at = now - chrono::Duration::milliseconds(NOTIFICATION_TTL_MS);

        app.expire_notifications(now);
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].message, "nova");

        app.expire_notifications(now + chrono::Duration::milliseconds(NOTIFICATION_TTL_MS));
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn pending_prompts_name_the_target() {
        let delete = PendingAction::DeleteGroup {
            id: 4,
            name: "Unidade Sul".to_string(),
        };
        assert!(delete.prompt().contains("Unidade Sul"));
        let stale = PendingAction::CleanStaleStatuses { ids: vec![1, 2, 3] };
        assert!(stale.prompt().contains('3'));
    }
}
