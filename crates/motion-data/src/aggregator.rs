//! Chart views derived from the flat table.
//!
//! Every query is read-only over `&[FlatRow]`. Groups come out in
//! [`Modality`] order (flexion-extension first) and then by ascending
//! session index. "Max" aggregates skip missing values and are `None` when a
//! group has no value at all, so a consumer can tell "no data" from zero.

use std::collections::BTreeMap;

use motion_core::models::{FlatRow, Modality};
use serde::Serialize;

// ── View types ────────────────────────────────────────────────────────────────

/// One point of a per-session angle line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnglePoint {
    pub movement_index: usize,
    pub angle: Option<f64>,
}

/// Angle per movement for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionAngles {
    pub modality: Modality,
    pub session_index: usize,
    /// Ordered by `movement_index`.
    pub points: Vec<AnglePoint>,
}

/// Movement count and longest game time for one modality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementSummary {
    pub modality: Modality,
    pub count: usize,
    /// Max of the modality's own game-time column.
    pub time: Option<f64>,
}

/// Movement count and longest game time for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionMovementSummary {
    pub modality: Modality,
    pub session_index: usize,
    pub count: usize,
    pub time: Option<f64>,
}

/// One point of an angle-over-time line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedAngle {
    pub timestamp: f64,
    pub angle: Option<f64>,
}

/// Angle against capture time for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionTimeline {
    pub modality: Modality,
    pub session_index: usize,
    /// Ordered by `timestamp`; movements without a timestamp are left out.
    pub points: Vec<TimedAngle>,
}

/// Assigned against measured game time for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionTimes {
    pub modality: Modality,
    pub session_index: usize,
    pub assigned: Option<f64>,
    pub real: Option<f64>,
}

/// All chart views for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBundle {
    pub angles: Vec<SessionAngles>,
    pub movements_by_type: Vec<MovementSummary>,
    pub movements_by_session: Vec<SessionMovementSummary>,
    /// Timelines for both modalities, flexion-extension first.
    pub timelines: Vec<SessionTimeline>,
    pub times: Vec<SessionTimes>,
}

impl ChartBundle {
    /// Compute every view over `rows`.
    pub fn from_rows(rows: &[FlatRow]) -> Self {
        Self {
            angles: SessionAggregator::angles_by_session(rows),
            movements_by_type: SessionAggregator::movements_and_time_by_type(rows),
            movements_by_session: SessionAggregator::movements_and_time_by_session(rows),
            timelines: Modality::ALL
                .iter()
                .flat_map(|m| SessionAggregator::angle_vs_timestamp(rows, *m))
                .collect(),
            times: SessionAggregator::assigned_vs_real_time(rows),
        }
    }

    /// `true` when no view has anything to plot.
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
            && self.movements_by_type.is_empty()
            && self.movements_by_session.is_empty()
            && self.timelines.is_empty()
            && self.times.is_empty()
    }
}

// ── SessionAggregator ─────────────────────────────────────────────────────────

/// Stateless helper grouping flat rows into chart series.
pub struct SessionAggregator;

impl SessionAggregator {
    /// Angle per movement, one series per (modality, session).
    pub fn angles_by_session(rows: &[FlatRow]) -> Vec<SessionAngles> {
        group_by_session(rows)
            .into_iter()
            .map(|((modality, session_index), mut group)| {
                group.sort_by_key(|r| r.movement_index);
                SessionAngles {
                    modality,
                    session_index,
                    points: group
                        .iter()
                        .map(|r| AnglePoint {
                            movement_index: r.movement_index,
                            angle: r.angle,
                        })
                        .collect(),
                }
            })
            .collect()
    }

    /// Movement count and max game time per modality.
    pub fn movements_and_time_by_type(rows: &[FlatRow]) -> Vec<MovementSummary> {
        let mut groups: BTreeMap<Modality, Vec<&FlatRow>> = BTreeMap::new();
        for row in rows {
            groups.entry(row.modality).or_default().push(row);
        }

        groups
            .into_iter()
            .map(|(modality, group)| MovementSummary {
                modality,
                count: group.len(),
                time: max_present(group.iter().map(|r| r.game_time())),
            })
            .collect()
    }

    /// Movement count and max game time per (modality, session).
    pub fn movements_and_time_by_session(rows: &[FlatRow]) -> Vec<SessionMovementSummary> {
        group_by_session(rows)
            .into_iter()
            .map(|((modality, session_index), group)| SessionMovementSummary {
                modality,
                session_index,
                count: group.len(),
                time: max_present(group.iter().map(|r| r.game_time())),
            })
            .collect()
    }

    /// Angle against timestamp for the sessions of `modality`.
    ///
    /// Sessions where every timestamp is missing are excluded entirely.
    pub fn angle_vs_timestamp(rows: &[FlatRow], modality: Modality) -> Vec<SessionTimeline> {
        group_by_session(rows)
            .into_iter()
            .filter(|((m, _), _)| *m == modality)
            .filter_map(|((modality, session_index), group)| {
                let mut points: Vec<TimedAngle> = group
                    .iter()
                    .filter_map(|r| {
                        r.timestamp.filter(|ts| !ts.is_nan()).map(|timestamp| TimedAngle {
                            timestamp,
                            angle: r.angle,
                        })
                    })
                    .collect();
                if points.is_empty() {
                    return None;
                }
                points.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
                Some(SessionTimeline {
                    modality,
                    session_index,
                    points,
                })
            })
            .collect()
    }

    /// Max assigned and max measured game time per (modality, session).
    pub fn assigned_vs_real_time(rows: &[FlatRow]) -> Vec<SessionTimes> {
        group_by_session(rows)
            .into_iter()
            .map(|((modality, session_index), group)| SessionTimes {
                modality,
                session_index,
                assigned: max_present(group.iter().map(|r| r.assigned_game_time)),
                real: max_present(group.iter().map(|r| r.game_time())),
            })
            .collect()
    }
}

// ── Private ───────────────────────────────────────────────────────────────────

/// Rows keyed by (modality, session index); each group keeps table order.
fn group_by_session(rows: &[FlatRow]) -> BTreeMap<(Modality, usize), Vec<&FlatRow>> {
    let mut groups: BTreeMap<(Modality, usize), Vec<&FlatRow>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.modality, row.session_index))
            .or_default()
            .push(row);
    }
    groups
}

/// Largest present value; `None` and NaN are skipped.
fn max_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values
        .flatten()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| {
            Some(match acc {
                Some(a) if a >= v => a,
                _ => v,
            })
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
