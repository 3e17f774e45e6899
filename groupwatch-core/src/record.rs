//! Group record as stored in the groups table.

use crate::enums::AssignmentField;
use serde::{Deserialize, Serialize};

/// Database identifier of a group row.
pub type GroupId = i64;

/// One monitored group conversation.
///
/// Field names follow the columns of the hosted table. Every column except
/// the identifier and the raw group key may be null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: GroupId,
    /// Raw group key (the messaging platform's group JID).
    #[serde(rename = "grupo", default)]
    pub group_key: String,
    #[serde(rename = "nome_grupo", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "resumo", default)]
    pub summary: Option<String>,
    #[serde(rename = "total_mensagens", default)]
    pub message_count: Option<i64>,
    /// ISO datetime string, kept verbatim; see [`crate::activity`].
    #[serde(rename = "ultima_atualizacao", default)]
    pub last_update: Option<String>,
    #[serde(rename = "tempo_medio_resposta", default)]
    pub avg_response_time: Option<String>,
    #[serde(default)]
    pub squad: Option<String>,
    #[serde(default)]
    pub head: Option<String>,
    #[serde(rename = "gestor", default)]
    pub manager: Option<String>,
    #[serde(rename = "excluido", default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl GroupRecord {
    /// Create a record with only the identity columns set.
    pub fn new(id: GroupId, group_key: impl Into<String>) -> Self {
        Self {
            id,
            group_key: group_key.into(),
            display_name: None,
            status: None,
            summary: None,
            message_count: None,
            last_update: None,
            avg_response_time: None,
            squad: None,
            head: None,
            manager: None,
            deleted: None,
        }
    }

    /// Display name, falling back to the raw group key.
    ///
    /// An empty display name also falls back.
    pub fn display_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.group_key,
        }
    }

    /// Current value of one of the categorical assignment fields.
    pub fn assignment(&self, field: AssignmentField) -> Option<&str> {
        match field {
            AssignmentField::Squad => self.squad.as_deref(),
            AssignmentField::Head => self.head.as_deref(),
            AssignmentField::Manager => self.manager.as_deref(),
        }
    }

    /// Set one of the categorical assignment fields.
    pub fn set_assignment(&mut self, field: AssignmentField, value: Option<String>) {
        match field {
            AssignmentField::Squad => self.squad = value,
            AssignmentField::Head => self.head = value,
            AssignmentField::Manager => self.manager = value,
        }
    }

    /// Whether the status or summary column carries any text at all.
    ///
    /// Mirrors the original truthiness check: an empty string counts as
    /// absent, whitespace does not.
    pub fn has_analysis(&self) -> bool {
        self.status.as_deref().is_some_and(|s| !s.is_empty())
            || self.summary.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Whether either column is non-null, empty strings included.
    pub fn has_stored_analysis(&self) -> bool {
        self.status.is_some() || self.summary.is_some()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_group_key() {
        let mut record = GroupRecord::new(1, "5511999@g.us");
        assert_eq!(record.display_name(), "5511999@g.us");

        record.display_name = Some(String::new());
        assert_eq!(record.display_name(), "5511999@g.us");

        record.display_name = Some("Clínica Centro".to_string());
        assert_eq!(record.display_name(), "Clínica Centro");
    }

    #[test]
    fn deserializes_table_columns() {
        let json = r#"{
            "id": 7,
            "grupo": "120363@g.us",
            "nome_grupo": "Unidade Sul",
            "status": "Estável",
            "resumo": null,
            "total_mensagens": 12,
            "ultima_atualizacao": "2024-05-02T10:15:00+00:00",
            "tempo_medio_resposta": "2h 30min",
            "squad": "Squad A",
            "head": null,
            "gestor": "Marina",
            "excluido": false
        }"#;
        let record: GroupRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.display_name(), "Unidade Sul");
        assert_eq!(record.message_count, Some(12));
        assert_eq!(record.assignment(AssignmentField::Manager), Some("Marina"));
        assert_eq!(record.assignment(AssignmentField::Head), None);
        assert!(!record.is_deleted());
    }

    #[test]
    fn missing_optional_columns_default_to_none() {
        let record: GroupRecord = serde_json::from_str(r#"{"id": 3, "grupo": "k"}"#).unwrap();
        assert_eq!(record, GroupRecord::new(3, "k"));
    }

    #[test]
    fn has_analysis_treats_empty_as_absent() {
        let mut record = GroupRecord::new(1, "k");
        assert!(!record.has_analysis());
        record.status = Some(String::new());
        assert!(!record.has_analysis());
        record.summary = Some("  ".to_string());
        assert!(record.has_analysis());
    }

    #[test]
    fn stored_analysis_counts_empty_strings() {
        let mut record = GroupRecord::new(1, "k");
        assert!(!record.has_stored_analysis());
        record.summary = Some(String::new());
        assert!(record.has_stored_analysis());
        assert!(!record.has_analysis());
    }
}
