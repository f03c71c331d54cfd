use ratatui::{prelude::*, widgets::Gauge};

use crate::core::system_monitor::{classify, Status};

/// Color for a visual status class
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Unavailable => Color::DarkGray,
        Status::Normal => Color::Cyan,
        Status::Warning => Color::LightYellow,
        Status::Critical => Color::LightRed,
    }
}

/// Create a gauge with color based on value thresholds
pub fn colored_gauge<'a>(value: f64, label: &'a str) -> Gauge<'a> {
    let color = status_color(classify(Some(value)));
    let ratio = if value.is_finite() {
        (value / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(ratio)
        .label(label)
}
