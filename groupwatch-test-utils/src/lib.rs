//! GroupWatch Test Utilities
//!
//! Shared test infrastructure for the GroupWatch workspace:
//! - Proptest generators for group records and their free-text columns
//! - Fixtures for common scenarios
//! - Assertions over summaries and pages

pub use groupwatch_core::{
    classify, classify_record, AssignmentField, CategoryFilter, FilteredPage, GroupFilter,
    GroupId, GroupQuery, GroupRecord, StatusCategory, StatusSummary, PAGE_SIZE,
};

use chrono::NaiveDate;

/// Format a naive local timestamp the way the groups table stores it.
pub fn timestamp_on(date: NaiveDate, hour: u32) -> String {
    format!("{}T{:02}:30:00", date.format("%Y-%m-%d"), hour % 24)
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating GroupWatch records.

    use super::*;
    use proptest::prelude::*;

    /// Words the classifier reacts to, in both fields.
    pub const KEYWORDS: &[&str] = &[
        "sem mensagens",
        "sem mensagem",
        "crítico",
        "critico",
        "problema",
        "erro",
        "alerta",
        "warning",
        "pendência",
        "pendencia",
        "dificuldade",
        "aguardando",
        "estável",
        "estavel",
        "ativo",
        "ok",
        "positivo",
        "bom",
        "satisfatório",
        "aprovado",
        "cordial",
        "colaborativo",
        "produtivo",
        "tranquilo",
    ];

    /// A keyword, possibly upper-cased and padded.
    pub fn arb_keyword() -> impl Strategy<Value = String> {
        (prop::sample::select(KEYWORDS), any::<bool>(), "[ \t]{0,2}").prop_map(
            |(word, upper, pad)| {
                let word = if upper { word.to_uppercase() } else { word.to_string() };
                format!("{pad}{word}{pad}")
            },
        )
    }

    /// Free text the way analysts write it: keyword phrases, arbitrary
    /// Unicode, whitespace-only and empty strings.
    pub fn arb_free_text() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[ \t\n]{1,4}",
            arb_keyword(),
            (arb_keyword(), "[a-zà-ú ]{0,20}").prop_map(|(k, rest)| format!("{k} {rest}")),
            "\\PC{0,40}",
        ]
    }

    pub fn arb_optional_text() -> impl Strategy<Value = Option<String>> {
        prop::option::of(arb_free_text())
    }

    pub fn arb_message_count() -> impl Strategy<Value = Option<i64>> {
        prop_oneof![Just(None), Just(Some(0)), (0i64..5_000).prop_map(Some)]
    }

    /// A last-update column relative to `today`: today, an earlier day,
    /// malformed text, or null.
    pub fn arb_last_update(today: NaiveDate) -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            (0u32..24).prop_map(move |h| Some(timestamp_on(today, h))),
            (1u64..400, 0u32..24).prop_map(move |(days, h)| {
                let day = today
                    .checked_sub_days(chrono::Days::new(days))
                    .unwrap_or(today);
                Some(timestamp_on(day, h))
            }),
            Just(Some("sem data".to_string())),
            Just(None),
        ]
    }

    /// One of a small option list, or null.
    pub fn arb_assignment(options: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop::sample::select(options).prop_map(str::to_string))
    }

    pub const SQUADS: &[&str] = &["Squad A", "Squad B", "Squad C"];
    pub const HEADS: &[&str] = &["Carla", "Rafael"];
    pub const MANAGERS: &[&str] = &["Marina", "João", "Bia"];

    /// Generate a group record; the id is assigned by [`arb_group_records`].
    pub fn arb_group_record(today: NaiveDate) -> impl Strategy<Value = GroupRecord> {
        (
            "[a-z0-9]{4,12}",
            prop::option::of("[A-Za-zÀ-ú ]{0,24}"),
            arb_optional_text(),
            arb_optional_text(),
            arb_message_count(),
            arb_last_update(today),
            arb_assignment(SQUADS),
            arb_assignment(HEADS),
            arb_assignment(MANAGERS),
        )
            .prop_map(
                |(key, name, status, summary, count, last_update, squad, head, manager)| {
                    let mut record = GroupRecord::new(0, format!("{key}@g.us"));
                    record.display_name = name;
                    record.status = status;
                    record.summary = summary;
                    record.message_count = count;
                    record.last_update = last_update;
                    record.squad = squad;
                    record.head = head;
                    record.manager = manager;
                    record
                },
            )
    }

    /// A collection of records with unique, ascending ids.
    pub fn arb_group_records(
        today: NaiveDate,
        max_len: usize,
    ) -> impl Strategy<Value = Vec<GroupRecord>> {
        prop::collection::vec(arb_group_record(today), 0..max_len).prop_map(|mut records| {
            for (i, record) in records.iter_mut().enumerate() {
                record.id = i as GroupId + 1;
            }
            records
        })
    }

    pub fn arb_category_filter() -> impl Strategy<Value = CategoryFilter> {
        prop::sample::select(CategoryFilter::ALL.to_vec())
    }

    pub fn arb_group_filter() -> impl Strategy<Value = GroupFilter> {
        (
            prop_oneof![Just(String::new()), "[a-zA-Z ]{1,4}"],
            arb_category_filter(),
            arb_assignment(SQUADS),
            arb_assignment(HEADS),
            arb_assignment(MANAGERS),
        )
            .prop_map(|(name_query, category, squad, head, manager)| GroupFilter {
                name_query,
                category,
                squad,
                head,
                manager,
            })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built records for common testing scenarios.

    use super::*;

    /// Fixed reference day for date-sensitive tests.
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap_or_default()
    }

    /// A bare group with identity columns only.
    pub fn group(id: GroupId) -> GroupRecord {
        GroupRecord::new(id, format!("1203630{id}@g.us"))
    }

    pub fn group_named(id: GroupId, name: &str) -> GroupRecord {
        let mut record = group(id);
        record.display_name = Some(name.to_string());
        record
    }

    /// A group analysed and updated on [`today`].
    pub fn analysed_group(id: GroupId, status: &str, summary: &str) -> GroupRecord {
        let mut record = group(id);
        record.status = Some(status.to_string());
        record.summary = Some(summary.to_string());
        record.message_count = Some(8);
        record.last_update = Some(timestamp_on(today(), 9));
        record
    }

    /// One group per label plus one idle group.
    pub fn mixed_groups() -> Vec<GroupRecord> {
        let mut idle = analysed_group(5, "Estável", "Tudo certo");
        idle.last_update = Some(timestamp_on(today().pred_opt().unwrap_or_default(), 15));
        vec![
            analysed_group(1, "Estável", "Atendimento cordial"),
            analysed_group(2, "Alerta", "Paciente aguardando retorno"),
            analysed_group(3, "Crítico", "Problema no agendamento"),
            group_named(4, "Unidade Sem Conversa"),
            idle,
        ]
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions over core outputs.

    use super::*;

    /// Panic unless the summary's buckets add up to `total`.
    pub fn assert_buckets_sum(summary: &StatusSummary, total: usize) {
        assert_eq!(
            summary.stable + summary.alert + summary.critical + summary.no_messages,
            total,
            "summary buckets do not add up: {summary:?}"
        );
    }

    /// Panic unless the page holds at most [`PAGE_SIZE`] items and its bounds
    /// are consistent.
    pub fn assert_page_shape(page: &FilteredPage<'_>) {
        assert!(page.items.len() <= PAGE_SIZE);
        assert_eq!(page.items.len(), page.end - page.start);
        assert!(page.end <= page.total_filtered);
    }
}
