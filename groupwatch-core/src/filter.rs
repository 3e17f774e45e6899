//! Group list filtering and pagination
//!
//! [`GroupFilter`] narrows a record slice by name, category and the three
//! assignment fields. [`GroupQuery`] pairs a filter with the current page and
//! resets the page to 1 whenever a filter input changes.

use crate::activity::no_interaction_on;
use crate::classify::classify_record;
use crate::enums::{AssignmentField, CategoryFilter};
use crate::record::GroupRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed number of groups per page.
pub const PAGE_SIZE: usize = 10;

/// Filter inputs of the group list. All predicates are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFilter {
    /// Case-insensitive substring of the display name.
    pub name_query: String,
    pub category: CategoryFilter,
    pub squad: Option<String>,
    pub head: Option<String>,
    pub manager: Option<String>,
}

impl GroupFilter {
    pub fn assignment(&self, field: AssignmentField) -> Option<&str> {
        match field {
            AssignmentField::Squad => self.squad.as_deref(),
            AssignmentField::Head => self.head.as_deref(),
            AssignmentField::Manager => self.manager.as_deref(),
        }
    }

    fn assignment_mut(&mut self, field: AssignmentField) -> &mut Option<String> {
        match field {
            AssignmentField::Squad => &mut self.squad,
            AssignmentField::Head => &mut self.head,
            AssignmentField::Manager => &mut self.manager,
        }
    }

    /// Whether any name or assignment filter is set (the category is not
    /// counted).
    pub fn has_field_filters(&self) -> bool {
        !self.name_query.is_empty()
            || AssignmentField::ALL
                .iter()
                .any(|field| self.assignment(*field).is_some_and(|v| !v.is_empty()))
    }

    fn matches_name(&self, record: &GroupRecord) -> bool {
        self.name_query.is_empty()
            || record
                .display_name()
                .to_lowercase()
                .contains(&self.name_query.to_lowercase())
    }

    fn matches_category(&self, record: &GroupRecord, today: NaiveDate) -> bool {
        match self.category {
            CategoryFilter::All => true,
            CategoryFilter::NoInteractionToday => {
                no_interaction_on(record.last_update.as_deref(), today)
            }
            filter => filter.category() == Some(classify_record(record)),
        }
    }

    fn matches_assignments(&self, record: &GroupRecord) -> bool {
        AssignmentField::ALL.iter().all(|field| match self.assignment(*field) {
            Some(wanted) if !wanted.is_empty() => record.assignment(*field) == Some(wanted),
            _ => true,
        })
    }

    /// Whether `record` passes every predicate.
    pub fn matches(&self, record: &GroupRecord, today: NaiveDate) -> bool {
        self.matches_name(record)
            && self.matches_category(record, today)
            && self.matches_assignments(record)
    }

    /// Records passing the filter, in input order.
    pub fn apply<'a>(&self, records: &'a [GroupRecord], today: NaiveDate) -> Vec<&'a GroupRecord> {
        records.iter().filter(|r| self.matches(r, today)).collect()
    }
}

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredPage<'a> {
    pub items: Vec<&'a GroupRecord>,
    /// Size of the filtered list before slicing.
    pub total_filtered: usize,
    /// 1-based page number that was sliced.
    pub page: usize,
    pub total_pages: usize,
    /// Index of the first item on the page within the filtered list.
    pub start: usize,
    /// One past the last item on the page.
    pub end: usize,
}

impl FilteredPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice `filtered` to the 1-based `page`. Page 0 is read as page 1; a page
/// past the end is empty.
pub fn paginate(filtered: Vec<&GroupRecord>, page: usize) -> FilteredPage<'_> {
    let page = page.max(1);
    let total_filtered = filtered.len();
    let total_pages = total_filtered.div_ceil(PAGE_SIZE);
    let start = ((page - 1) * PAGE_SIZE).min(total_filtered);
    let end = (page * PAGE_SIZE).min(total_filtered);
    let items = filtered[start..end].to_vec();
    FilteredPage {
        items,
        total_filtered,
        page,
        total_pages,
        start,
        end,
    }
}

/// Filter plus current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupQuery {
    filter: GroupFilter,
    page: usize,
}

impl Default for GroupQuery {
    fn default() -> Self {
        Self::new(GroupFilter::default())
    }
}

impl GroupQuery {
    pub fn new(filter: GroupFilter) -> Self {
        Self { filter, page: 1 }
    }

    pub fn filter(&self) -> &GroupFilter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_name_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.filter.name_query != query {
            self.filter.name_query = query;
            self.page = 1;
        }
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        if self.filter.category != category {
            self.filter.category = category;
            self.page = 1;
        }
    }

    pub fn set_assignment(&mut self, field: AssignmentField, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        let slot = self.filter.assignment_mut(field);
        if *slot != value {
            *slot = value;
            self.page = 1;
        }
    }

    /// Replace the whole filter; the page resets if anything differs.
    pub fn set_filter(&mut self, filter: GroupFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Advance one page, staying within `total_pages`.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Filter `records` and slice the current page.
    pub fn run<'a>(&self, records: &'a [GroupRecord], today: NaiveDate) -> FilteredPage<'a> {
        paginate(self.filter.apply(records, today), self.page)
    }
}
