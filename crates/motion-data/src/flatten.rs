//! Session document → flat table rows.

use motion_core::error::{LogError, Result};
use motion_core::models::{FlatRow, Modality, MovementRecord, SessionDocument, SessionRecord};

/// Flatten `document` into one [`FlatRow`] per movement.
///
/// Flexion-extension sessions come first, then abduction-adduction; within
/// each collection sessions and movements keep their source order and their
/// zero-based positions become `session_index` / `movement_index`.
///
/// Returns [`LogError::EmptyResult`] when the document holds no movements.
pub fn flatten(document: &SessionDocument) -> Result<Vec<FlatRow>> {
    let mut rows = Vec::with_capacity(document.movement_count());

    for modality in Modality::ALL {
        for (session_index, session) in document.sessions(modality).iter().enumerate() {
            rows.extend(session.movements.iter().enumerate().map(|(movement_index, movement)| {
                build_row(document, modality, session_index, session, movement_index, movement)
            }));
        }
    }

    if rows.is_empty() {
        return Err(LogError::EmptyResult);
    }
    Ok(rows)
}

fn build_row(
    document: &SessionDocument,
    modality: Modality,
    session_index: usize,
    session: &SessionRecord,
    movement_index: usize,
    movement: &MovementRecord,
) -> FlatRow {
    FlatRow {
        user_name: document.user_name.clone(),
        date: document.date.clone(),
        high_score_fe: document.high_score_fe,
        high_score_abad: document.high_score_abad,
        modality,
        session_index,
        movement_index,
        movement_type: movement.movement_type.clone(),
        angle: movement.angle,
        threshold_angle: movement.threshold_angle,
        timestamp: movement.timestamp,
        joycon_used: session.joycon_used.clone(),
        axis_used: session.axis_used.clone(),
        assigned_game_time: session.assigned_game_time,
        total_movements: session.total_movements,
        total_game_time_fe: session.total_game_time_fe,
        total_game_time_abad: session.total_game_time_abad,
        reward_count: session.reward_count,
        character_id: session.character_id.clone(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
