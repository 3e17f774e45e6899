//! REST client for the PostgREST endpoints backing the dashboard.

use crate::config::{TablesConfig, TuiConfig};
use crate::traits::GroupStore;
use async_trait::async_trait;
use groupwatch_core::{
    AssignmentField, GroupId, GroupRecord, SoftDeleteReport, NO_MESSAGES_PLACEHOLDER,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Column holding the WhatsApp group key in the messages table.
const MESSAGE_GROUP_COLUMN: &str = "grupoJid";
const SOFT_DELETE_COLUMN: &str = "excluido";
/// Postgres `undefined_column`.
const UNDEFINED_COLUMN_CODE: &str = "42703";

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Column '{column}' does not exist on table '{table}'")]
    MissingColumn { table: String, column: String },
    #[error("Config error: {0}")]
    Config(String),
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: String,
}

impl PostgrestError {
    fn mentions_missing_column(&self, column: &str) -> bool {
        self.code.as_deref() == Some(UNDEFINED_COLUMN_CODE)
            || (self.message.contains(column) && self.message.contains("does not exist"))
    }
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderMap,
    tables: TablesConfig,
    soft_delete: bool,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let auth_header = build_auth_headers(&config.auth.api_key, config.bearer_token())?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_header,
            tables: config.tables.clone(),
            soft_delete: config.soft_delete,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn option_table(&self, field: AssignmentField) -> &str {
        match field {
            AssignmentField::Squad => &self.tables.squads,
            AssignmentField::Head => &self.tables.heads,
            AssignmentField::Manager => &self.tables.managers,
        }
    }

    async fn get_json<T>(&self, table: &str, query: &[(&str, String)]) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(self.table_url(table))
            .headers(self.auth_header.clone())
            .query(query)
            .send()
            .await?;
        tracing::debug!(table, status = response.status().as_u16(), "GET");
        self.parse_response(response).await
    }

    async fn patch_rows(
        &self,
        table: &str,
        filter: (&str, String),
        body: &Value,
    ) -> Result<(), ApiClientError> {
        let response = self
            .client
            .patch(self.table_url(table))
            .headers(self.auth_header.clone())
            .header("Prefer", "return=minimal")
            .query(&[filter])
            .json(body)
            .send()
            .await?;
        tracing::debug!(table, status = response.status().as_u16(), "PATCH");
        self.parse_empty(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str::<T>(&text)?)
        } else {
            let text = response.text().await?;
            Err(error_from_body(status.as_u16(), &text))
        }
    }

    async fn parse_empty(&self, response: reqwest::Response) -> Result<(), ApiClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await?;
            Err(error_from_body(status.as_u16(), &text))
        }
    }
}

/// Map a failed response body to an error, preferring PostgREST's
/// `code: message` form.
pub fn error_from_body(status: u16, text: &str) -> ApiClientError {
    if let Ok(api_error) = serde_json::from_str::<PostgrestError>(text) {
        return ApiClientError::InvalidResponse(format!(
            "{}: {}",
            api_error.code.as_deref().unwrap_or("unknown"),
            api_error.message
        ));
    }
    ApiClientError::InvalidResponse(format!("HTTP {}: {}", status, text))
}

/// Format an `in.(...)` filter over group ids.
pub fn id_in_filter(ids: &[GroupId]) -> String {
    let joined = ids
        .iter()
        .map(GroupId::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({joined})")
}

/// Pull the string values of `column` out of option rows, dropping nulls
/// and blanks.
pub fn extract_option_values(rows: &[Value], column: &str) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(column).and_then(Value::as_str))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Deserialize)]
struct SoftDeleteRow {
    excluido: Option<bool>,
}

#[async_trait]
impl GroupStore for RestClient {
    async fn fetch_all_groups(&self) -> Result<Vec<GroupRecord>, ApiClientError> {
        let mut query = vec![("select", "*".to_string()), ("order", "id.asc".to_string())];
        if self.soft_delete {
            query.push((SOFT_DELETE_COLUMN, "is.false".to_string()));
        }
        let groups: Vec<GroupRecord> = self.get_json(&self.tables.groups, &query).await?;
        tracing::info!(count = groups.len(), "groups fetched");
        Ok(groups)
    }

    async fn update_group_field(
        &self,
        id: GroupId,
        field: AssignmentField,
        value: Option<String>,
    ) -> Result<(), ApiClientError> {
        let mut body = serde_json::Map::new();
        body.insert(field.column().to_string(), json!(value));
        self.patch_rows(&self.tables.groups, ("id", format!("eq.{id}")), &Value::Object(body))
            .await?;
        tracing::info!(id, field = field.column(), ?value, "assignment updated");
        Ok(())
    }

    async fn clear_group_status(&self, id: GroupId) -> Result<(), ApiClientError> {
        let body = json!({ "status": null, "resumo": NO_MESSAGES_PLACEHOLDER });
        self.patch_rows(&self.tables.groups, ("id", format!("eq.{id}")), &body)
            .await?;
        tracing::info!(id, "status cleared");
        Ok(())
    }

    async fn clear_statuses(&self, ids: &[GroupId]) -> Result<(), ApiClientError> {
        if ids.is_empty() {
            return Ok(());
        }
        let body = json!({ "status": null, "resumo": null });
        self.patch_rows(&self.tables.groups, ("id", id_in_filter(ids)), &body)
            .await?;
        tracing::info!(count = ids.len(), "statuses cleared");
        Ok(())
    }

    async fn soft_delete_group(&self, id: GroupId) -> Result<(), ApiClientError> {
        let body = json!({ "excluido": true });
        self.patch_rows(&self.tables.groups, ("id", format!("eq.{id}")), &body)
            .await?;
        tracing::info!(id, "group soft-deleted");
        Ok(())
    }

    async fn group_has_messages(&self, group_key: &str) -> Result<bool, ApiClientError> {
        let query = [
            ("select", "id".to_string()),
            (MESSAGE_GROUP_COLUMN, format!("eq.{group_key}")),
            ("limit", "1".to_string()),
        ];
        let rows: Vec<Value> = self.get_json(&self.tables.messages, &query).await?;
        Ok(!rows.is_empty())
    }

    async fn list_options(&self, field: AssignmentField) -> Result<Vec<String>, ApiClientError> {
        let column = self.tables.option_column.as_str();
        let query = [
            ("select", column.to_string()),
            ("order", format!("{column}.asc")),
        ];
        let rows: Vec<Value> = self.get_json(self.option_table(field), &query).await?;
        Ok(extract_option_values(&rows, column))
    }

    async fn soft_delete_report(&self) -> Result<SoftDeleteReport, ApiClientError> {
        let table = self.tables.groups.as_str();
        let response = self
            .client
            .get(self.table_url(table))
            .headers(self.auth_header.clone())
            .query(&[("select", SOFT_DELETE_COLUMN)])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            if let Ok(api_error) = serde_json::from_str::<PostgrestError>(&text) {
                if api_error.mentions_missing_column(SOFT_DELETE_COLUMN) {
                    return Err(ApiClientError::MissingColumn {
                        table: table.to_string(),
                        column: SOFT_DELETE_COLUMN.to_string(),
                    });
                }
            }
            return Err(error_from_body(status.as_u16(), &text));
        }
        let rows: Vec<SoftDeleteRow> = serde_json::from_str(&text)?;
        Ok(SoftDeleteReport::from_flags(rows.into_iter().map(|r| r.excluido)))
    }
}

fn build_auth_headers(api_key: &str, bearer: &str) -> Result<HeaderMap, ApiClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("apikey"),
        HeaderValue::from_str(api_key).map_err(|e| ApiClientError::Config(e.to_string()))?,
    );
    let value = format!("Bearer {}", bearer);
    headers.insert(
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&value).map_err(|e| ApiClientError::Config(e.to_string()))?,
    );
    Ok(headers)
}
