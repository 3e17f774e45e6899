//! Odonto theme and color utilities.

use crate::notifications::NotificationLevel;
use groupwatch_core::StatusCategory;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct OdontoTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl OdontoTheme {
    pub fn odonto() -> Self {
        Self {
            bg: Color::Rgb(15, 23, 42),
            bg_highlight: Color::Rgb(30, 41, 59),
            primary: Color::Rgb(20, 184, 166),
            primary_dim: Color::Rgb(15, 118, 110),
            secondary: Color::Rgb(99, 102, 241),
            success: Color::Rgb(34, 197, 94),
            warning: Color::Rgb(234, 179, 8),
            error: Color::Rgb(239, 68, 68),
            info: Color::Rgb(56, 189, 248),
            text: Color::Rgb(241, 245, 249),
            text_dim: Color::Rgb(148, 163, 184),
            text_muted: Color::Rgb(71, 85, 105),
            border: Color::Rgb(51, 65, 85),
            border_focus: Color::Rgb(20, 184, 166),
        }
    }
}

/// Dot color for a classifier label.
pub fn category_color(category: StatusCategory, theme: &OdontoTheme) -> Color {
    match category {
        StatusCategory::Stable => theme.success,
        StatusCategory::Alert => theme.warning,
        StatusCategory::Critical => theme.error,
        StatusCategory::NoMessages => theme.text_dim,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &OdontoTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}

/// Last-update color: dimmed once the group went quiet today.
pub fn activity_color(interacted_today: bool, theme: &OdontoTheme) -> Color {
    if interacted_today {
        theme.text
    } else {
        theme.warning
    }
}
