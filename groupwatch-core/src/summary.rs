//! Status summary aggregation.

use crate::activity::no_interaction_on;
use crate::classify::classify_record;
use crate::enums::StatusCategory;
use crate::record::GroupRecord;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Per-label counts over a group collection.
///
/// `no_messages` is tracked so the buckets always add up to the total, but
/// only stable/alert/critical form the headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusSummary {
    pub stable: usize,
    pub alert: usize,
    pub critical: usize,
    pub no_messages: usize,
    /// Groups whose last update is not today, whatever their label.
    pub no_interaction_today: usize,
}

impl StatusSummary {
    /// Count one label.
    pub fn record(&mut self, category: StatusCategory) {
        match category {
            StatusCategory::Stable => self.stable += 1,
            StatusCategory::Alert => self.alert += 1,
            StatusCategory::Critical => self.critical += 1,
            StatusCategory::NoMessages => self.no_messages += 1,
        }
    }

    pub fn count(&self, category: StatusCategory) -> usize {
        match category {
            StatusCategory::Stable => self.stable,
            StatusCategory::Alert => self.alert,
            StatusCategory::Critical => self.critical,
            StatusCategory::NoMessages => self.no_messages,
        }
    }

    /// `(stable, alert, critical)`.
    pub fn headline(&self) -> (usize, usize, usize) {
        (self.stable, self.alert, self.critical)
    }

    /// Number of records folded in.
    pub fn total(&self) -> usize {
        self.stable + self.alert + self.critical + self.no_messages
    }
}

/// Summarize `records` with `today` as the reference day.
pub fn summarize_on<'a, I>(records: I, today: NaiveDate) -> StatusSummary
where
    I: IntoIterator<Item = &'a GroupRecord>,
{
    records
        .into_iter()
        .fold(StatusSummary::default(), |mut summary, record| {
            summary.record(classify_record(record));
            if no_interaction_on(record.last_update.as_deref(), today) {
                summary.no_interaction_today += 1;
            }
            summary
        })
}

/// Summarize `records` against the current local date.
pub fn summarize<'a, I>(records: I) -> StatusSummary
where
    I: IntoIterator<Item = &'a GroupRecord>,
{
    summarize_on(records, Local::now().date_naive())
}
