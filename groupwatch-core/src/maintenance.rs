//! Selection logic for bulk status cleanups.
//!
//! These functions only decide which rows a cleanup touches; the updates
//! themselves go through the data-access client.

use crate::activity::no_interaction_on;
use crate::record::{GroupId, GroupRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary text written when a single group is cleared by hand.
pub const NO_MESSAGES_PLACEHOLDER: &str = "Sem mensagens no grupo";

/// Groups with a non-null status or summary that was not refreshed on
/// `today`. Empty strings are non-null and get cleared too.
pub fn plan_stale_status_cleanup(records: &[GroupRecord], today: NaiveDate) -> Vec<GroupId> {
    records
        .iter()
        .filter(|r| r.has_stored_analysis() && no_interaction_on(r.last_update.as_deref(), today))
        .map(|r| r.id)
        .collect()
}

/// Groups carrying a status or summary although the messages table has
/// nothing for them.
///
/// `has_messages` is only consulted for records that carry analysis text.
/// A lookup error should be reported as `None`; such records are skipped.
pub fn plan_invalid_status_cleanup<F>(records: &[GroupRecord], mut has_messages: F) -> Vec<GroupId>
where
    F: FnMut(&GroupRecord) -> Option<bool>,
{
    records
        .iter()
        .filter(|r| r.has_analysis())
        .filter(|r| has_messages(*r) == Some(false))
        .map(|r| r.id)
        .collect()
}

/// Active/deleted split of the soft-delete flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SoftDeleteReport {
    pub active: usize,
    pub deleted: usize,
    /// Rows whose flag is still null.
    pub unset: usize,
}

impl SoftDeleteReport {
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = Option<bool>>,
    {
        flags.into_iter().fold(Self::default(), |mut report, flag| {
            match flag {
                Some(true) => report.deleted += 1,
                Some(false) => report.active += 1,
                None => {
                    report.active += 1;
                    report.unset += 1;
                }
            }
            report
        })
    }

    pub fn total(&self) -> usize {
        self.active + self.deleted
    }
}
