//! GroupWatch Core - Group triage logic
//!
//! Plain record types plus the pure functions the dashboard is built on:
//! status classification, summary aggregation, filtering and pagination.
//! Nothing here performs IO; records come from whatever snapshot the caller
//! fetched.

pub mod activity;
pub mod classify;
pub mod enums;
pub mod error;
pub mod filter;
pub mod maintenance;
pub mod record;
pub mod summary;

pub use activity::{
    format_last_update, format_response_time, has_interaction_on, no_interaction_on,
    parse_local_datetime, situation_text, summary_text,
};
pub use classify::{classify, classify_record};
pub use enums::{AssignmentField, CategoryFilter, StatusCategory};
pub use error::{CoreError, CoreResult};
pub use filter::{paginate, FilteredPage, GroupFilter, GroupQuery, PAGE_SIZE};
pub use maintenance::{
    plan_invalid_status_cleanup, plan_stale_status_cleanup, SoftDeleteReport,
    NO_MESSAGES_PLACEHOLDER,
};
pub use record::{GroupId, GroupRecord};
pub use summary::{summarize, summarize_on, StatusSummary};
