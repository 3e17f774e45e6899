//! Data-access seam of the dashboard.

use crate::api_client::ApiClientError;
use async_trait::async_trait;
use groupwatch_core::{AssignmentField, GroupId, GroupRecord, SoftDeleteReport};

/// Operations the dashboard needs from the backing store.
///
/// [`crate::api_client::RestClient`] is the production implementation;
/// tests substitute an in-memory store.
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Every visible group, ordered by id.
    async fn fetch_all_groups(&self) -> Result<Vec<GroupRecord>, ApiClientError>;

    /// Set one assignment column; `None` writes null.
    async fn update_group_field(
        &self,
        id: GroupId,
        field: AssignmentField,
        value: Option<String>,
    ) -> Result<(), ApiClientError>;

    /// Null the status and put the no-messages placeholder in the summary.
    async fn clear_group_status(&self, id: GroupId) -> Result<(), ApiClientError>;

    /// Null status and summary for every id in `ids`.
    async fn clear_statuses(&self, ids: &[GroupId]) -> Result<(), ApiClientError>;

    async fn soft_delete_group(&self, id: GroupId) -> Result<(), ApiClientError>;

    /// Whether the messages table has at least one row for `group_key`.
    async fn group_has_messages(&self, group_key: &str) -> Result<bool, ApiClientError>;

    /// Values of one assignment option table, sorted.
    async fn list_options(&self, field: AssignmentField) -> Result<Vec<String>, ApiClientError>;

    async fn soft_delete_report(&self) -> Result<SoftDeleteReport, ApiClientError>;
}
