//! Enum types for GroupWatch labels and filters

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// STATUS CATEGORY
// ============================================================================

/// Triage label assigned to a group by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    /// No messages, or no analysis to go on
    #[serde(rename = "sem-mensagens")]
    NoMessages,
    #[serde(rename = "estavel")]
    Stable,
    #[serde(rename = "alerta")]
    Alert,
    #[serde(rename = "critico")]
    Critical,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 4] = [
        StatusCategory::NoMessages,
        StatusCategory::Stable,
        StatusCategory::Alert,
        StatusCategory::Critical,
    ];

    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            StatusCategory::NoMessages => "sem-mensagens",
            StatusCategory::Stable => "estavel",
            StatusCategory::Alert => "alerta",
            StatusCategory::Critical => "critico",
        }
    }

    /// Parse from database string representation or the English name.
    pub fn from_db_str(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_lowercase().as_str() {
            "sem-mensagens" | "no-messages" => Ok(StatusCategory::NoMessages),
            "estavel" | "stable" => Ok(StatusCategory::Stable),
            "alerta" | "alert" => Ok(StatusCategory::Alert),
            "critico" | "critical" => Ok(StatusCategory::Critical),
            _ => Err(CoreError::InvalidCategory(s.to_string())),
        }
    }

    /// Human label shown in the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            StatusCategory::NoMessages => "Sem mensagens",
            StatusCategory::Stable => "Estável",
            StatusCategory::Alert => "Alerta",
            StatusCategory::Critical => "Crítico",
        }
    }

    /// Whether this label counts towards the stable/alert/critical headline.
    pub fn is_headline(&self) -> bool {
        !matches!(self, StatusCategory::NoMessages)
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for StatusCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s)
    }
}

// ============================================================================
// CATEGORY FILTER
// ============================================================================

/// Category selector of the group list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryFilter {
    #[default]
    #[serde(rename = "todos")]
    All,
    #[serde(rename = "estavel")]
    Stable,
    #[serde(rename = "alerta")]
    Alert,
    #[serde(rename = "critico")]
    Critical,
    #[serde(rename = "sem-mensagens")]
    NoMessages,
    /// Last update is not today; bypasses the classifier
    #[serde(rename = "sem-interacao")]
    NoInteractionToday,
}

impl CategoryFilter {
    pub const ALL: [CategoryFilter; 6] = [
        CategoryFilter::All,
        CategoryFilter::Stable,
        CategoryFilter::Alert,
        CategoryFilter::Critical,
        CategoryFilter::NoMessages,
        CategoryFilter::NoInteractionToday,
    ];

    pub fn as_db_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "todos",
            CategoryFilter::Stable => "estavel",
            CategoryFilter::Alert => "alerta",
            CategoryFilter::Critical => "critico",
            CategoryFilter::NoMessages => "sem-mensagens",
            CategoryFilter::NoInteractionToday => "sem-interacao",
        }
    }

    pub fn from_db_str(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_lowercase().as_str() {
            "todos" | "all" => Ok(CategoryFilter::All),
            "estavel" | "stable" => Ok(CategoryFilter::Stable),
            "alerta" | "alert" => Ok(CategoryFilter::Alert),
            "critico" | "critical" => Ok(CategoryFilter::Critical),
            "sem-mensagens" | "no-messages" => Ok(CategoryFilter::NoMessages),
            "sem-interacao" | "no-interaction-today" => Ok(CategoryFilter::NoInteractionToday),
            _ => Err(CoreError::InvalidCategoryFilter(s.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "Todos",
            CategoryFilter::Stable => "Estável",
            CategoryFilter::Alert => "Alerta",
            CategoryFilter::Critical => "Crítico",
            CategoryFilter::NoMessages => "Sem mensagens",
            CategoryFilter::NoInteractionToday => "Sem interação hoje",
        }
    }

    /// The classifier label this filter selects, if it selects by label.
    pub fn category(&self) -> Option<StatusCategory> {
        match self {
            CategoryFilter::Stable => Some(StatusCategory::Stable),
            CategoryFilter::Alert => Some(StatusCategory::Alert),
            CategoryFilter::Critical => Some(StatusCategory::Critical),
            CategoryFilter::NoMessages => Some(StatusCategory::NoMessages),
            CategoryFilter::All | CategoryFilter::NoInteractionToday => None,
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<CategoryFilter> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> CategoryFilter {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl From<StatusCategory> for CategoryFilter {
    fn from(category: StatusCategory) -> Self {
        match category {
            StatusCategory::NoMessages => CategoryFilter::NoMessages,
            StatusCategory::Stable => CategoryFilter::Stable,
            StatusCategory::Alert => CategoryFilter::Alert,
            StatusCategory::Critical => CategoryFilter::Critical,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s)
    }
}

// ============================================================================
// ASSIGNMENT FIELD
// ============================================================================

/// The three categorical assignment columns of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentField {
    Squad,
    Head,
    Manager,
}

impl AssignmentField {
    pub const ALL: [AssignmentField; 3] = [
        AssignmentField::Squad,
        AssignmentField::Head,
        AssignmentField::Manager,
    ];

    /// Column name in the groups table.
    pub fn column(&self) -> &'static str {
        match self {
            AssignmentField::Squad => "squad",
            AssignmentField::Head => "head",
            AssignmentField::Manager => "gestor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssignmentField::Squad => "Squad",
            AssignmentField::Head => "Head",
            AssignmentField::Manager => "Gestor",
        }
    }
}

impl fmt::Display for AssignmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl FromStr for AssignmentField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "squad" => Ok(AssignmentField::Squad),
            "head" => Ok(AssignmentField::Head),
            "gestor" | "manager" => Ok(AssignmentField::Manager),
            _ => Err(CoreError::InvalidAssignmentField(s.to_string())),
        }
    }
}
