//! Last-update and response-time helpers.
//!
//! Timestamps arrive as strings from the database and are never trusted to be
//! well formed. A string that cannot be parsed never means "updated today".

use crate::record::GroupRecord;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

pub const DATE_UNAVAILABLE: &str = "Data não disponível";
pub const RESPONSE_TIME_UNAVAILABLE: &str = "Não disponível";
pub const NO_MESSAGES_IN_GROUP: &str = "Sem mensagens no grupo";
pub const NO_MESSAGES_TODAY: &str = "Não há mensagens hoje no grupo";
pub const STATUS_NOT_INFORMED: &str = "Não informado";
pub const SUMMARY_MISSING: &str = "Sem descrição";

/// Parse a database timestamp into local time.
///
/// Accepts RFC 3339, Postgres text output with an hour-only offset, naive
/// date-times (taken as local time) and bare dates (taken as UTC midnight).
pub fn parse_local_datetime(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Local));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)).with_timezone(&Local))
}

/// Whether the timestamp falls on `today` in local time.
///
/// `None` and malformed strings yield `false`.
pub fn has_interaction_on(last_update: Option<&str>, today: NaiveDate) -> bool {
    last_update
        .and_then(parse_local_datetime)
        .is_some_and(|dt| dt.date_naive() == today)
}

/// Negation of [`has_interaction_on`]; malformed timestamps count as no
/// interaction.
pub fn no_interaction_on(last_update: Option<&str>, today: NaiveDate) -> bool {
    !has_interaction_on(last_update, today)
}

/// Format a last-update timestamp as `dd/mm/yyyy, HH:MM` in local time.
pub fn format_last_update(last_update: Option<&str>) -> String {
    match last_update {
        None => DATE_UNAVAILABLE.to_string(),
        Some(raw) if raw.is_empty() => DATE_UNAVAILABLE.to_string(),
        Some(raw) => match parse_local_datetime(raw) {
            Some(dt) => dt.format("%d/%m/%Y, %H:%M").to_string(),
            None => raw.to_string(),
        },
    }
}

/// Response time is stored pre-formatted ("2h 30min"); only the fallback is
/// applied here.
pub fn format_response_time(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => RESPONSE_TIME_UNAVAILABLE.to_string(),
    }
}

fn column_text(record: &GroupRecord, value: Option<&str>, missing: &str, today: NaiveDate) -> String {
    if !record.has_analysis() {
        return NO_MESSAGES_IN_GROUP.to_string();
    }
    if !has_interaction_on(record.last_update.as_deref(), today) {
        return NO_MESSAGES_TODAY.to_string();
    }
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => missing.to_string(),
    }
}

/// Text for the table's status column.
pub fn situation_text(record: &GroupRecord, today: NaiveDate) -> String {
    column_text(record, record.status.as_deref(), STATUS_NOT_INFORMED, today)
}

/// Text for the table's summary column.
pub fn summary_text(record: &GroupRecord, today: NaiveDate) -> String {
    column_text(record, record.summary.as_deref(), SUMMARY_MISSING, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn naive_timestamps_are_local() {
        let today = day(2024, 5, 2);
        assert!(has_interaction_on(Some("2024-05-02T10:15:00"), today));
        assert!(has_interaction_on(Some("2024-05-02 23:59:59.999"), today));
        assert!(!has_interaction_on(Some("2024-05-01T23:59:59"), today));
    }

    #[test]
    fn offset_timestamps_convert_to_local() {
        let now = Local::now();
        let rfc = now.with_timezone(&Utc).to_rfc3339();
        assert!(has_interaction_on(Some(&rfc), now.date_naive()));

        let yesterday = (now - Duration::days(1)).with_timezone(&Utc).to_rfc3339();
        assert!(!has_interaction_on(Some(&yesterday), now.date_naive()));
    }

    #[test]
    fn postgres_hour_offset_is_accepted() {
        assert!(parse_local_datetime("2024-05-02 10:15:00.123+00").is_some());
        assert!(parse_local_datetime("2024-05-02 10:15:00+00:00").is_some());
    }

    #[test]
    fn malformed_or_missing_is_not_today() {
        let today = Local::now().date_naive();
        assert!(!has_interaction_on(None, today));
        assert!(!has_interaction_on(Some(""), today));
        assert!(!has_interaction_on(Some("ontem à tarde"), today));
        assert!(no_interaction_on(Some("not a date"), today));
    }

    #[test]
    fn format_last_update_fallbacks() {
        assert_eq!(format_last_update(None), DATE_UNAVAILABLE);
        assert_eq!(format_last_update(Some("")), DATE_UNAVAILABLE);
        assert_eq!(format_last_update(Some("garbage")), "garbage");
        assert_eq!(format_last_update(Some("2024-05-02T09:05:00")), "02/05/2024, 09:05");
    }

    #[test]
    fn response_time_fallback() {
        assert_eq!(format_response_time(None), RESPONSE_TIME_UNAVAILABLE);
        assert_eq!(format_response_time(Some("  ")), RESPONSE_TIME_UNAVAILABLE);
        assert_eq!(format_response_time(Some("2h 30min")), "2h 30min");
    }

    #[test]
    fn situation_and_summary_columns() {
        let today = day(2024, 5, 2);
        let mut record = GroupRecord::new(1, "k");
        assert_eq!(situation_text(&record, today), NO_MESSAGES_IN_GROUP);

        record.summary = Some("Conversa tranquila".to_string());
        record.last_update = Some("2024-05-01T10:00:00".to_string());
        assert_eq!(situation_text(&record, today), NO_MESSAGES_TODAY);
        assert_eq!(summary_text(&record, today), NO_MESSAGES_TODAY);

        record.last_update = Some("2024-05-02T10:00:00".to_string());
        assert_eq!(situation_text(&record, today), STATUS_NOT_INFORMED);
        assert_eq!(summary_text(&record, today), "Conversa tranquila");
    }
}
