//! Status classification
//!
//! Maps the free-text `status` and `resumo` columns plus the message count to
//! a [`StatusCategory`]. The rules are an ordered keyword ladder evaluated
//! first match wins: status text before summary text, and within a field
//! no-messages before critical before alert before stable. Keywords are the
//! Portuguese phrases analysts write into those columns and are matched as
//! plain substrings of the lower-cased text.

use crate::enums::StatusCategory;
use crate::record::GroupRecord;

/// One step of the keyword ladder.
#[derive(Debug, Clone, Copy)]
struct KeywordRule {
    label: StatusCategory,
    /// Whole-text matches.
    exact: &'static [&'static str],
    /// Substring matches.
    contains: &'static [&'static str],
}

impl KeywordRule {
    fn matches(&self, text: &str) -> bool {
        self.exact.iter().any(|word| text == *word)
            || self.contains.iter().any(|word| text.contains(word))
    }
}

const NO_MESSAGES_KEYWORDS: &[&str] = &["sem mensagens", "sem mensagem"];
const CRITICAL_KEYWORDS: &[&str] = &["crítico", "critico", "problema", "erro"];
const ALERT_KEYWORDS: &[&str] = &[
    "alerta",
    "warning",
    "pendência",
    "pendencia",
    "dificuldade",
    "aguardando",
];
const STATUS_STABLE_KEYWORDS: &[&str] = &[
    "estável",
    "estavel",
    "ativo",
    "ok",
    "positivo",
    "bom",
    "satisfatório",
    "aprovado",
];
const SUMMARY_STABLE_KEYWORDS: &[&str] = &[
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

const STATUS_RULES: [KeywordRule; 4] = [
    KeywordRule {
        label: StatusCategory::NoMessages,
        exact: &[],
        contains: NO_MESSAGES_KEYWORDS,
    },
    KeywordRule {
        label: StatusCategory::Critical,
        exact: &[],
        contains: CRITICAL_KEYWORDS,
    },
    KeywordRule {
        label: StatusCategory::Alert,
        exact: &["alerta"],
        contains: ALERT_KEYWORDS,
    },
    KeywordRule {
        label: StatusCategory::Stable,
        exact: &["estável", "estavel"],
        contains: STATUS_STABLE_KEYWORDS,
    },
];

const SUMMARY_RULES: [KeywordRule; 4] = [
    KeywordRule {
        label: StatusCategory::NoMessages,
        exact: &[],
        contains: NO_MESSAGES_KEYWORDS,
    },
    KeywordRule {
        label: StatusCategory::Critical,
        exact: &[],
        contains: CRITICAL_KEYWORDS,
    },
    KeywordRule {
        label: StatusCategory::Alert,
        exact: &[],
        contains: ALERT_KEYWORDS,
    },
    KeywordRule {
        label: StatusCategory::Stable,
        exact: &[],
        contains: SUMMARY_STABLE_KEYWORDS,
    },
];

fn is_blank(text: Option<&str>) -> bool {
    text.map_or(true, |t| t.trim().is_empty())
}

fn first_match(rules: &[KeywordRule], text: &str) -> Option<StatusCategory> {
    rules.iter().find(|rule| rule.matches(text)).map(|rule| rule.label)
}

/// Classify a group from its status text, summary text and message count.
///
/// Total: every input, including all-`None`, yields a label.
pub fn classify(
    status: Option<&str>,
    summary: Option<&str>,
    message_count: Option<i64>,
) -> StatusCategory {
    let status_blank = is_blank(status);
    let summary_blank = is_blank(summary);

    // Both checks are kept: the first is the zero-message case, the second
    // covers messages that were never analysed.
    if message_count == Some(0) && status_blank && summary_blank {
        tracing::trace!(rule = "no-messages:empty", "classified");
        return StatusCategory::NoMessages;
    }
    if status_blank && summary_blank {
        tracing::trace!(rule = "no-messages:no-analysis", "classified");
        return StatusCategory::NoMessages;
    }

    let status_text = status.unwrap_or_default().trim().to_lowercase();
    if !status_text.is_empty() {
        if let Some(label) = first_match(&STATUS_RULES, &status_text) {
            tracing::trace!(rule = "status", %label, "classified");
            return label;
        }
    }

    let summary_text = summary.unwrap_or_default().to_lowercase();
    if !summary_text.is_empty() {
        if let Some(label) = first_match(&SUMMARY_RULES, &summary_text) {
            tracing::trace!(rule = "summary", %label, "classified");
            return label;
        }
    }

    if !status_blank || !summary_blank {
        tracing::trace!(rule = "fallback:unrecognized-text", "classified");
        return StatusCategory::Stable;
    }

    tracing::trace!(rule = "fallback:no-data", "classified");
    StatusCategory::NoMessages
}

/// Classify a record by its status, summary and message count columns.
pub fn classify_record(record: &GroupRecord) -> StatusCategory {
    classify(
        record.status.as_deref(),
        record.summary.as_deref(),
        record.message_count,
    )
}
