use groupwatch_core::{
    classify, paginate, summarize_on, CategoryFilter, GroupFilter, GroupQuery, StatusCategory,
    PAGE_SIZE,
};
use groupwatch_test_utils::assertions::{assert_buckets_sum, assert_page_shape};
use groupwatch_test_utils::fixtures::{analysed_group, mixed_groups, today};
use groupwatch_test_utils::generators::{
    arb_category_filter, arb_free_text, arb_group_filter, arb_group_records, arb_message_count,
    arb_optional_text,
};
use proptest::prelude::*;

// ============================================================================
// Classifier examples pinned literally
// ============================================================================

#[test]
fn classifier_reference_cases() {
    assert_eq!(classify(None, None, Some(0)), StatusCategory::NoMessages);
    assert_eq!(classify(None, None, None), StatusCategory::NoMessages);
    assert_eq!(
        classify(Some("Crítico - problema no atendimento"), None, Some(5)),
        StatusCategory::Critical
    );
    assert_eq!(
        classify(Some(""), Some("Tudo estável e cordial"), Some(5)),
        StatusCategory::Stable
    );
    assert_eq!(classify(Some("xyz-unrecognized"), None, Some(5)), StatusCategory::Stable);
    assert_eq!(
        classify(Some("Sem mensagens"), Some("Crítico"), Some(10)),
        StatusCategory::NoMessages
    );
}

#[test]
fn mixed_fixture_summary() {
    let groups = mixed_groups();
    let summary = summarize_on(&groups, today());
    assert_eq!(summary.headline(), (2, 1, 1));
    assert_eq!(summary.no_messages, 1);
    // group 4 has no last update, group 5 was updated yesterday
    assert_eq!(summary.no_interaction_today, 2);
}

#[test]
fn filter_and_page_over_fixture() {
    let groups = mixed_groups();
    let mut query = GroupQuery::default();
    query.set_category(CategoryFilter::NoInteractionToday);
    let page = query.run(&groups, today());
    let ids: Vec<i64> = page.items.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![4, 5]);

    query.set_name_query("sem conversa");
    let page = query.run(&groups, today());
    assert_eq!(page.total_filtered, 1);
}

#[test]
fn twenty_three_groups_make_three_pages() {
    let groups: Vec<_> = (0..23)
        .map(|i| analysed_group(i, "Estável", "ok"))
        .collect();
    let filter = GroupFilter::default();

    let page_one = paginate(filter.apply(&groups, today()), 1);
    assert_eq!(page_one.items.first().map(|g| g.id), Some(0));
    assert_eq!(page_one.items.last().map(|g| g.id), Some(9));

    let page_three = paginate(filter.apply(&groups, today()), 3);
    let ids: Vec<i64> = page_three.items.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![20, 21, 22]);
    assert_eq!(page_three.total_pages, 3);
}

proptest! {
    // ========================================================================
    // Classifier totality and precedence
    // ========================================================================

    #[test]
    fn classifier_is_total(
        status in arb_optional_text(),
        summary in arb_optional_text(),
        count in arb_message_count(),
    ) {
        let label = classify(status.as_deref(), summary.as_deref(), count);
        prop_assert!(StatusCategory::ALL.contains(&label));
    }

    #[test]
    fn blank_fields_are_no_messages(
        status in prop::option::of("[ \t\n]{0,3}"),
        summary in prop::option::of("[ \t\n]{0,3}"),
        count in arb_message_count(),
    ) {
        prop_assert_eq!(
            classify(status.as_deref(), summary.as_deref(), count),
            StatusCategory::NoMessages
        );
    }

    #[test]
    fn critical_status_ignores_summary(summary in arb_optional_text(), count in arb_message_count()) {
        prop_assert_eq!(
            classify(Some("Problema no atendimento"), summary.as_deref(), count),
            StatusCategory::Critical
        );
    }

    #[test]
    fn any_non_blank_text_is_never_no_messages_without_the_phrase(text in "[a-z ]{1,20}") {
        prop_assume!(!text.trim().is_empty());
        prop_assume!(!text.contains("sem mensage"));
        prop_assert_ne!(classify(Some(&text), None, None), StatusCategory::NoMessages);
    }

    #[test]
    fn classifier_is_deterministic(status in arb_free_text(), summary in arb_free_text()) {
        let first = classify(Some(&status), Some(&summary), None);
        let second = classify(Some(&status), Some(&summary), None);
        prop_assert_eq!(first, second);
    }

    // ========================================================================
    // Aggregator
    // ========================================================================

    #[test]
    fn summary_buckets_sum_to_total(groups in arb_group_records(today(), 40)) {
        let summary = summarize_on(&groups, today());
        assert_buckets_sum(&summary, groups.len());
        prop_assert!(summary.no_interaction_today <= groups.len());
    }

    #[test]
    fn summary_is_order_independent(groups in arb_group_records(today(), 30)) {
        let forward = summarize_on(&groups, today());
        let backward = summarize_on(groups.iter().rev(), today());
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn category_filters_agree_with_summary(groups in arb_group_records(today(), 30)) {
        let summary = summarize_on(&groups, today());
        for category in StatusCategory::ALL {
            let filter = GroupFilter { category: category.into(), ..GroupFilter::default() };
            prop_assert_eq!(filter.apply(&groups, today()).len(), summary.count(category));
        }
        let idle = GroupFilter {
            category: CategoryFilter::NoInteractionToday,
            ..GroupFilter::default()
        };
        prop_assert_eq!(idle.apply(&groups, today()).len(), summary.no_interaction_today);
    }

    // ========================================================================
    // Filter / paginate
    // ========================================================================

    #[test]
    fn filter_is_idempotent(groups in arb_group_records(today(), 30), filter in arb_group_filter()) {
        let once: Vec<_> = filter.apply(&groups, today()).into_iter().cloned().collect();
        let twice: Vec<_> = filter.apply(&once, today()).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filtered_records_satisfy_every_predicate(
        groups in arb_group_records(today(), 30),
        filter in arb_group_filter(),
    ) {
        for group in filter.apply(&groups, today()) {
            let needle = filter.name_query.to_lowercase();
            prop_assert!(group.display_name().to_lowercase().contains(&needle));
            if let Some(squad) = filter.squad.as_deref() {
                prop_assert_eq!(group.squad.as_deref(), Some(squad));
            }
        }
    }

    #[test]
    fn pages_partition_the_filtered_list(
        groups in arb_group_records(today(), 45),
        category in arb_category_filter(),
    ) {
        let filter = GroupFilter { category, ..GroupFilter::default() };
        let all = filter.apply(&groups, today());
        let first = paginate(all.clone(), 1);
        let mut seen = Vec::new();
        for page_number in 1..=first.total_pages.max(1) {
            let page = paginate(all.clone(), page_number);
            assert_page_shape(&page);
            seen.extend(page.items.iter().map(|g| g.id));
        }
        let expected: Vec<i64> = all.iter().map(|g| g.id).collect();
        prop_assert_eq!(seen, expected);
        prop_assert_eq!(first.total_pages, all.len().div_ceil(PAGE_SIZE));
    }

    #[test]
    fn changing_any_filter_input_resets_page(
        page in 2usize..20,
        filter in arb_group_filter(),
        category in arb_category_filter(),
    ) {
        let mut query = GroupQuery::default();
        query.set_page(page);
        query.set_filter(filter.clone());
        if filter != GroupFilter::default() {
            prop_assert_eq!(query.page(), 1);
        } else {
            prop_assert_eq!(query.page(), page);
        }

        query.set_page(page);
        let changed = query.filter().category != category;
        query.set_category(category);
        prop_assert_eq!(query.page() == 1, changed);
    }
}
