use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{BarChart, Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

use super::app::MonitorApp;
use super::widgets::{colored_gauge, status_color};
use crate::client::SnapshotSource;
use crate::core::config::Layout as CardLayout;
use crate::core::system_monitor::{
    classify, format_number, overall_status, sparkline_points, ComponentKind, MetricValue,
    Snapshot,
};
use crate::ui::detail_table::{snapshot_detail, DetailSection, NOT_AVAILABLE};

/// Resolution of the history bars.
const HISTORY_LEVELS: u64 = 100;

/// Main render function
pub fn render_ui<T: SnapshotSource>(frame: &mut Frame, app: &MonitorApp<T>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with connection status
            Constraint::Min(0),    // Cards
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_cards(frame, chunks[1], app);
    render_footer(frame, chunks[2]);

    if app.detail_open {
        render_detail(frame, area, app);
    }
    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header<T: SnapshotSource>(frame: &mut Frame, area: Rect, app: &MonitorApp<T>) {
    let next = app.poller.time_until_next(Instant::now()).as_secs();

    let (status_text, color) = match (app.poller.last_error(), app.poller.latest()) {
        (Some(error), Some(_)) => (
            format!("Showing stale data │ {} │ retry in {}s", error, next),
            Color::LightRed,
        ),
        (Some(error), None) => (format!("{} │ retry in {}s", error, next), Color::LightRed),
        (None, Some(snapshot)) => {
            let overall = overall_status(snapshot);
            (
                format!("Status: {} │ next update in {}s", overall.as_str(), next),
                status_color(overall),
            )
        }
        (None, None) => ("Connecting...".to_string(), Color::DarkGray),
    };

    let title = format!(
        " hwpulse │ {} │ Layout: {} ",
        app.server_url,
        app.layout.as_str()
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(status_text)
        .style(Style::default().fg(color))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn card_areas(area: Rect, layout: CardLayout) -> Vec<Rect> {
    match layout {
        CardLayout::Grid => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);

            rows.iter()
                .flat_map(|row| {
                    Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .split(*row)
                        .to_vec()
                })
                .collect()
        }
        CardLayout::List => Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area)
            .to_vec(),
    }
}

fn render_cards<T: SnapshotSource>(frame: &mut Frame, area: Rect, app: &MonitorApp<T>) {
    for (kind, card_area) in ComponentKind::ALL
        .into_iter()
        .zip(card_areas(area, app.layout))
    {
        render_card(frame, card_area, app, kind);
    }
}

fn render_card<T: SnapshotSource>(
    frame: &mut Frame,
    area: Rect,
    app: &MonitorApp<T>,
    kind: ComponentKind,
) {
    let snapshot = app.poller.latest();
    let value = snapshot.and_then(|s| s.display_value(kind));
    let selected = app.selected == kind;

    let mut border_style = Style::default().fg(status_color(classify(value)));
    if selected {
        border_style = border_style.add_modifier(Modifier::BOLD);
    }

    let block = Block::default()
        .title(format!(
            " {}{} ",
            if selected { "▶ " } else { "" },
            card_title(snapshot, kind)
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(snapshot) = snapshot else {
        let waiting = Paragraph::new("Waiting for data...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(waiting, inner);
        return;
    };

    let Some(value) = value else {
        let missing = Paragraph::new(vec![
            Line::from(Span::styled(
                NOT_AVAILABLE,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("No supported GPU detected"),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
        frame.render_widget(missing, inner);
        return;
    };

    let label = format!("{}%", format_number(value));
    let (primary, secondary) = card_lines(snapshot, kind);

    if inner.height < 4 {
        frame.render_widget(colored_gauge(value, &label), inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Primary metric
            Constraint::Length(1), // Secondary metric
            Constraint::Length(1), // Gauge
            Constraint::Min(0),    // History
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(primary).style(Style::default().add_modifier(Modifier::BOLD)),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(secondary).style(Style::default().fg(Color::Gray)),
        rows[1],
    );
    frame.render_widget(colored_gauge(value, &label), rows[2]);
    render_history(frame, rows[3], app, kind);
}

fn render_history<T: SnapshotSource>(
    frame: &mut Frame,
    area: Rect,
    app: &MonitorApp<T>,
    kind: ComponentKind,
) {
    if area.height == 0 || area.width < 2 {
        return;
    }

    let points = sparkline_points(&app.poller.history().series(kind), HISTORY_LEVELS);
    if points.is_empty() {
        let pending = Paragraph::new("Collecting history...")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(pending, area);
        return;
    }

    // One column per bar plus one column of gap
    let max_bars = (area.width as usize / 2).max(1);
    let start = points.len().saturating_sub(max_bars);
    let data: Vec<(&str, u64)> = points[start..].iter().map(|&p| ("", p)).collect();

    let chart = BarChart::default()
        .direction(Direction::Vertical)
        .bar_width(1)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Cyan))
        .data(&data)
        .max(HISTORY_LEVELS);
    frame.render_widget(chart, area);
}

fn card_title(snapshot: Option<&Snapshot>, kind: ComponentKind) -> String {
    let Some(snapshot) = snapshot else {
        return kind.title().to_string();
    };

    let subtitle = match kind {
        ComponentKind::Cpu => snapshot.cpu.model.clone(),
        ComponentKind::Ram => snapshot.ram.details.clone(),
        ComponentKind::Gpu => snapshot
            .gpu
            .as_ref()
            .map(|g| g.name.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ComponentKind::Disk => format!("{} {}", snapshot.disk.mountpoint, snapshot.disk.model),
    };
    format!("{} │ {}", kind.title(), subtitle)
}

/// Primary and secondary metric lines of a card.
fn card_lines(snapshot: &Snapshot, kind: ComponentKind) -> (String, String) {
    match kind {
        ComponentKind::Cpu => (
            pair(&snapshot.cpu.main_metric_label, Some(&snapshot.cpu.main_metric)),
            pair(&snapshot.cpu.label_name, snapshot.cpu.label_value.as_ref()),
        ),
        ComponentKind::Ram => (
            pair(&snapshot.ram.main_metric_label, Some(&snapshot.ram.main_metric)),
            pair(&snapshot.ram.label_name, snapshot.ram.label_value.as_ref()),
        ),
        ComponentKind::Gpu => match &snapshot.gpu {
            Some(gpu) => (
                pair(&gpu.main_metric_label, Some(&gpu.main_metric)),
                pair(&gpu.label_name, gpu.label_value.as_ref()),
            ),
            None => (NOT_AVAILABLE.to_string(), String::new()),
        },
        ComponentKind::Disk => (
            format!(
                "{}: {}",
                snapshot.disk.main_metric_label,
                format_number(snapshot.disk.main_metric)
            ),
            pair(&snapshot.disk.label_name, snapshot.disk.label_value.as_ref()),
        ),
    }
}

fn pair(label: &str, value: Option<&MetricValue>) -> String {
    match value {
        Some(value) => format!("{}: {}", label, value),
        None => format!("{}: {}", label, NOT_AVAILABLE),
    }
}

fn render_detail<T: SnapshotSource>(frame: &mut Frame, area: Rect, app: &MonitorApp<T>) {
    let popup_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} details │ Esc to close ", app.selected.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let detail = app
        .poller
        .latest()
        .map(|snapshot| snapshot_detail(snapshot, app.selected))
        .unwrap_or_default();

    if detail.is_empty() {
        let empty = Paragraph::new(format!("{}: no data for this component", NOT_AVAILABLE))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, popup_area);
        return;
    }

    let rows: Vec<Row> = detail
        .iter()
        .map(|row| {
            let style = match row.section {
                DetailSection::Primary => Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                DetailSection::Secondary => Style::default().fg(Color::Cyan),
                DetailSection::Field => Style::default(),
                DetailSection::Sensor => Style::default().fg(Color::Gray),
            };
            Row::new(vec![
                Cell::from(row.label.clone()),
                Cell::from(row.value.clone()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["Field", "Value"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(50)])
        .header(header)
        .block(block);
    frame.render_widget(table, popup_area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = " q: Quit │ ?: Help │ l: Layout │ Enter: Details │ r: Retry │ x: Stop server ";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = r#"
    hwpulse monitor - Help

    Keyboard Shortcuts:
    ─────────────────────────────────────
    q / Esc        Quit the application
    ?              Toggle this help screen
    l              Switch grid / list layout
    Arrows / j k   Move the selection
    Tab            Next card
    Enter          Open the card details
    r              Fetch now
    x              Stop the server and quit

    Press any key to close this help
    "#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::DarkGray));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
