use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use groupwatch_core::{AssignmentField, CategoryFilter, StatusCategory, PAGE_SIZE};
use groupwatch_test_utils::fixtures::{mixed_groups, today};
use groupwatch_test_utils::generators::{arb_category_filter, arb_group_filter, arb_group_records};
use groupwatch_tui::config::{AuthConfig, ConfigError, TablesConfig, ThemeConfig, TuiConfig};
use groupwatch_tui::keys::{map_key, map_search_key, Action, SearchKey};
use groupwatch_tui::persistence::{self, PersistedState};
use groupwatch_tui::state::{next_option, App};
use groupwatch_tui::theme::{category_color, OdontoTheme};
use proptest::prelude::*;
use std::collections::HashSet;

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "https://example.supabase.co".to_string(),
        auth: AuthConfig {
            api_key: "anon-key".to_string(),
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
        persistence_path: "tmp/groupwatch-state.json".into(),
        log_path: "tmp/groupwatch.log".into(),
        theme: ThemeConfig {
            name: "odonto".to_string(),
        },
    }
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn invalid_field(config: &TuiConfig) -> Option<&'static str> {
    match config.validate() {
        Err(ConfigError::InvalidValue { field, .. }) => Some(field),
        _ => None,
    }
}

// ============================================================================
// Config validation
// ============================================================================

#[test]
fn base_config_is_valid() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn config_rejects_empty_url() {
    let mut config = base_config();
    config.api_base_url = "  ".to_string();
    assert_eq!(invalid_field(&config), Some("api_base_url"));
}

#[test]
fn config_requires_api_key() {
    let mut config = base_config();
    config.auth.api_key = String::new();
    assert_eq!(invalid_field(&config), Some("auth.api_key"));
}

#[test]
fn config_rejects_zero_timeouts() {
    let mut config = base_config();
    config.request_timeout_ms = 0;
    assert_eq!(invalid_field(&config), Some("request_timeout_ms"));

    let mut config = base_config();
    config.refresh_interval_ms = 0;
    assert_eq!(invalid_field(&config), Some("refresh_interval_ms"));
}

#[test]
fn config_requires_known_theme() {
    let mut config = base_config();
    config.theme = ThemeConfig {
        name: "synthwave".to_string(),
    };
    assert_eq!(invalid_field(&config), Some("theme.name"));

    config.theme.name = "ODONTO".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn config_requires_table_names() {
    let mut config = base_config();
    config.tables.messages = String::new();
    assert_eq!(invalid_field(&config), Some("tables.messages"));
}

#[test]
fn config_falls_back_to_api_key_as_bearer() {
    let mut config = base_config();
    assert_eq!(config.bearer_token(), "anon-key");
    config.auth.access_token = Some("jwt".to_string());
    assert_eq!(config.bearer_token(), "jwt");
}

// ============================================================================
// Keybindings and theme
// ============================================================================

#[test]
fn assignment_keys_map_by_case() {
    let cases = [
        ('s', Action::CycleFilter(AssignmentField::Squad)),
        ('h', Action::CycleFilter(AssignmentField::Head)),
        ('g', Action::CycleFilter(AssignmentField::Manager)),
        ('S', Action::CycleAssignment(AssignmentField::Squad)),
        ('H', Action::CycleAssignment(AssignmentField::Head)),
        ('G', Action::CycleAssignment(AssignmentField::Manager)),
    ];
    for (c, expected) in cases {
        assert_eq!(map_key(press(KeyCode::Char(c), KeyModifiers::NONE)), Some(expected));
    }
}

#[test]
fn refresh_has_two_bindings() {
    assert_eq!(map_key(press(KeyCode::Char('r'), KeyModifiers::NONE)), Some(Action::Refresh));
    assert_eq!(
        map_key(press(KeyCode::Char('r'), KeyModifiers::CONTROL)),
        Some(Action::Refresh)
    );
}

#[test]
fn category_colors_are_distinct() {
    let theme = OdontoTheme::odonto();
    let colors: HashSet<_> = StatusCategory::ALL
        .iter()
        .map(|c| format!("{:?}", category_color(*c, &theme)))
        .collect();
    assert_eq!(colors.len(), StatusCategory::ALL.len());
}

#[test]
fn fixture_summary_drives_header_counts() {
    let mut app = App::new(base_config(), today());
    app.groups_view.replace(mixed_groups(), today());
    let summary = app.groups_view.summary(today());
    assert_eq!(summary.headline(), (2, 1, 1));
    assert_eq!(summary.no_interaction_today, 2);
}

proptest! {
    #[test]
    fn digits_pick_category_chips(digit in 0u8..=9u8) {
        let ch = char::from(b'0' + digit);
        let action = map_key(press(KeyCode::Char(ch), KeyModifiers::NONE));
        match ch {
            '1'..='6' => {
                let index = (digit - 1) as usize;
                prop_assert_eq!(action, Some(Action::SelectCategory(index)));
                prop_assert!(CategoryFilter::from_index(index).is_some());
            }
            '0' => prop_assert_eq!(action, Some(Action::ResetFilters)),
            _ => prop_assert!(action.is_none()),
        }
    }

    #[test]
    fn search_mode_types_every_plain_char(c in proptest::char::range('!', '~')) {
        prop_assert_eq!(
            map_search_key(press(KeyCode::Char(c), KeyModifiers::NONE)),
            Some(SearchKey::Insert(c))
        );
    }

    #[test]
    fn timeouts_above_zero_validate(timeout in 1u64..120_000, refresh in 1u64..600_000) {
        let mut config = base_config();
        config.request_timeout_ms = timeout;
        config.refresh_interval_ms = refresh;
        prop_assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_themes_are_rejected(name in "[a-z]{1,12}") {
        prop_assume!(name != "odonto");
        let mut config = base_config();
        config.theme.name = name;
        prop_assert_eq!(invalid_field(&config), Some("theme.name"));
    }

    // ========================================================================
    // App state over generated groups
    // ========================================================================

    #[test]
    fn selection_always_lies_on_current_page(
        groups in arb_group_records(today(), 45),
        category in arb_category_filter(),
        moves in proptest::collection::vec(0u8..4, 0..20),
    ) {
        let mut app = App::new(base_config(), today());
        app.groups_view.replace(groups, today());
        app.set_category(category);
        for m in moves {
            match m {
                0 => app.select_next(),
                1 => app.select_previous(),
                2 => app.next_page(),
                _ => app.prev_page(),
            }
            let page_ids = app.groups_view.page_ids(today());
            prop_assert!(page_ids.len() <= PAGE_SIZE);
            match app.groups_view.selected {
                Some(id) => prop_assert!(page_ids.contains(&id)),
                None => prop_assert!(page_ids.is_empty()),
            }
        }
    }

    #[test]
    fn filter_cycle_returns_to_none(options in proptest::collection::vec("[A-Z][a-z]{2,6}", 0..5)) {
        let mut unique = options.clone();
        unique.sort();
        unique.dedup();
        let mut current: Option<String> = None;
        for _ in 0..unique.len() {
            current = next_option(&unique, current.as_deref());
            prop_assert!(current.is_some());
        }
        prop_assert_eq!(next_option(&unique, current.as_deref()), None);
    }

    #[test]
    fn persisted_filters_survive_a_restart(filter in arb_group_filter()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let state = PersistedState { filter, ..PersistedState::default() };
        persistence::save(&path, &state).unwrap();
        let loaded = persistence::load(&path).unwrap().unwrap();

        let mut app = App::new(base_config(), today());
        app.restore(loaded);
        prop_assert_eq!(app.persisted_state(), state);
        prop_assert_eq!(app.groups_view.query.page(), 1);
    }
}
