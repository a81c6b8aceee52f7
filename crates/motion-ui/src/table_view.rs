//! Plain-text tables for the chart views.
//!
//! Columns are padded by display width (via `unicode-width`) so accented
//! modality labels line up.

use unicode_width::UnicodeWidthStr;

use motion_core::formatting::{format_angle, format_number, format_seconds, session_label};
use motion_core::models::Modality;
use motion_data::aggregator::{
    ChartBundle, MovementSummary, SessionAngles, SessionMovementSummary, SessionTimeline,
    SessionTimes,
};

// ── ChartView ─────────────────────────────────────────────────────────────────

/// Which view(s) of a [`ChartBundle`] to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartView {
    All,
    /// Angle per movement, per session.
    Angles,
    /// Movements and time per modality.
    Movements,
    /// Movements and time per session.
    Sessions,
    /// Angle over time, per session.
    Timeline,
    /// Assigned against real game time.
    Times,
}

impl ChartView {
    /// Parse a view name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "all" => Some(ChartView::All),
            "angles" => Some(ChartView::Angles),
            "movements" => Some(ChartView::Movements),
            "sessions" => Some(ChartView::Sessions),
            "timeline" => Some(ChartView::Timeline),
            "times" => Some(ChartView::Times),
            _ => None,
        }
    }
}

// ── TextTable ─────────────────────────────────────────────────────────────────

/// A titled grid of cells rendered with aligned columns.
#[derive(Debug, Clone)]
pub struct TextTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Render the title, header, separator and rows. Empty tables print a
    /// "no data" line under the title.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.title);
        if self.rows.is_empty() {
            out.push_str("  (no data)\n");
            return out;
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.width());
                }
            }
        }

        out.push_str(&render_line(&self.headers, &widths));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&render_line(&rule, &widths));
        for row in &self.rows {
            out.push_str(&render_line(row, &widths));
        }
        out
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from(" ");
    for (cell, width) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
        line.push_str(" |");
    }
    line.truncate(line.trim_end_matches(" |").len());
    line.push('\n');
    line
}

// ── View tables ───────────────────────────────────────────────────────────────

/// Angle per movement, one table per modality.
pub fn angles_tables(views: &[SessionAngles], decimals: u32) -> Vec<TextTable> {
    Modality::ALL
        .iter()
        .filter(|m| views.iter().any(|v| v.modality == **m))
        .map(|modality| {
            let mut table = TextTable::new(
                format!("Angle per movement - {}", modality),
                &["Session", "Movement", "Angle"],
            );
            for view in views.iter().filter(|v| v.modality == *modality) {
                for point in &view.points {
                    table.push(vec![
                        session_label(view.session_index),
                        point.movement_index.to_string(),
                        format_angle(point.angle, decimals),
                    ]);
                }
            }
            table
        })
        .collect()
}

/// Movements and longest game time per modality.
pub fn movements_table(summary: &[MovementSummary], decimals: u32) -> TextTable {
    let mut table = TextTable::new(
        "Movements and time by type",
        &["Type", "Movements", "Time"],
    );
    for s in summary {
        table.push(vec![
            s.modality.to_string(),
            format_number(s.count as f64, 0),
            format_seconds(s.time, decimals),
        ]);
    }
    table
}

/// Movements and longest game time per session, one table per modality.
pub fn sessions_tables(summary: &[SessionMovementSummary], decimals: u32) -> Vec<TextTable> {
    Modality::ALL
        .iter()
        .filter(|m| summary.iter().any(|s| s.modality == **m))
        .map(|modality| {
            let mut table = TextTable::new(
                format!("Movements and time by session - {}", modality),
                &["Session", "Movements", "Time"],
            );
            for s in summary.iter().filter(|s| s.modality == *modality) {
                table.push(vec![
                    session_label(s.session_index),
                    format_number(s.count as f64, 0),
                    format_seconds(s.time, decimals),
                ]);
            }
            table
        })
        .collect()
}

/// Angle over time for one modality.
pub fn timeline_table(
    modality: Modality,
    lines: &[SessionTimeline],
    decimals: u32,
) -> TextTable {
    let mut table = TextTable::new(
        format!("Angle over time - {}", modality),
        &["Session", "Time (s)", "Angle"],
    );
    for line in lines.iter().filter(|l| l.modality == modality) {
        for point in &line.points {
            table.push(vec![
                session_label(line.session_index),
                format_number(point.timestamp, decimals.max(1)),
                format_angle(point.angle, decimals),
            ]);
        }
    }
    table
}

/// Assigned against real game time, one table per modality.
pub fn times_tables(times: &[SessionTimes], decimals: u32) -> Vec<TextTable> {
    Modality::ALL
        .iter()
        .filter(|m| times.iter().any(|t| t.modality == **m))
        .map(|modality| {
            let mut table = TextTable::new(
                format!("Assigned vs real time by session - {}", modality),
                &["Session", "Assigned", "Real"],
            );
            for t in times.iter().filter(|t| t.modality == *modality) {
                table.push(vec![
                    session_label(t.session_index),
                    format_seconds(t.assigned, decimals),
                    format_seconds(t.real, decimals),
                ]);
            }
            table
        })
        .collect()
}

/// Render the selected view(s) of `bundle` as text.
pub fn render_bundle(bundle: &ChartBundle, view: ChartView, decimals: u32) -> String {
    let mut tables: Vec<TextTable> = Vec::new();
    let all = view == ChartView::All;

    if all || view == ChartView::Angles {
        tables.extend(angles_tables(&bundle.angles, decimals));
    }
    if all || view == ChartView::Movements {
        tables.push(movements_table(&bundle.movements_by_type, decimals));
    }
    if all || view == ChartView::Sessions {
        tables.extend(sessions_tables(&bundle.movements_by_session, decimals));
    }
    if all || view == ChartView::Timeline {
        for modality in Modality::ALL {
            tables.push(timeline_table(modality, &bundle.timelines, decimals));
        }
    }
    if all || view == ChartView::Times {
        tables.extend(times_tables(&bundle.times, decimals));
    }

    if tables.is_empty() {
        return "(no data)\n".to_string();
    }
    tables
        .iter()
        .map(|t| t.render())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the selected view(s) of `bundle` as pretty JSON for an external
/// plotting tool.
pub fn render_bundle_json(bundle: &ChartBundle, view: ChartView) -> serde_json::Result<String> {
    match view {
        ChartView::All => serde_json::to_string_pretty(bundle),
        ChartView::Angles => serde_json::to_string_pretty(&bundle.angles),
        ChartView::Movements => serde_json::to_string_pretty(&bundle.movements_by_type),
        ChartView::Sessions => serde_json::to_string_pretty(&bundle.movements_by_session),
        ChartView::Timeline => serde_json::to_string_pretty(&bundle.timelines),
        ChartView::Times => serde_json::to_string_pretty(&bundle.times),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
