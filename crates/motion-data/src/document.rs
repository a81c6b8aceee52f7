//! Session document loading.
//!
//! Turns the JSON written by the game into a typed [`SessionDocument`].
//! Scalar fields are coerced leniently (see [`FieldCoercer`]); structural
//! problems such as a session without a `movements` list are
//! [`LogError::MalformedInput`].

use std::path::Path;

use motion_core::data_processors::FieldCoercer;
use motion_core::error::{LogError, Result};
use motion_core::models::{Modality, MovementRecord, SessionDocument, SessionRecord};
use serde_json::Value;
use tracing::debug;

/// Read and parse the session document at `path`.
pub fn read_document(path: &Path) -> Result<SessionDocument> {
    let content = std::fs::read_to_string(path).map_err(|source| LogError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_document(&content)?;
    debug!(
        "Parsed {}: {} FE sessions, {} AbAd sessions, {} movements",
        path.display(),
        document.flexion_extension.len(),
        document.abduccion_aduccion.len(),
        document.movement_count()
    );
    Ok(document)
}

/// Parse a session document from JSON text.
///
/// A leading UTF-8 byte-order mark is ignored.
pub fn parse_document(json: &str) -> Result<SessionDocument> {
    let json = json.strip_prefix('\u{feff}').unwrap_or(json);
    let value: Value = serde_json::from_str(json)?;
    document_from_value(&value)
}

/// Build a [`SessionDocument`] from an already-parsed JSON value.
pub fn document_from_value(value: &Value) -> Result<SessionDocument> {
    if !value.is_object() {
        return Err(LogError::MalformedInput(
            "top-level value must be an object".to_string(),
        ));
    }

    Ok(SessionDocument {
        user_name: FieldCoercer::text(value, "userName"),
        date: FieldCoercer::text(value, "date"),
        high_score_fe: FieldCoercer::number(value, "highScoreFE"),
        high_score_abad: FieldCoercer::number(value, "highScoreAbAd"),
        flexion_extension: sessions_from_value(value, Modality::FlexionExtension)?,
        abduccion_aduccion: sessions_from_value(value, Modality::AbductionAdduction)?,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// An absent or `null` collection is empty; anything but an array is an error.
fn sessions_from_value(document: &Value, modality: Modality) -> Result<Vec<SessionRecord>> {
    let key = modality.collection_key();
    let sessions = match document.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(LogError::MalformedInput(format!(
                "\"{}\" must be a list of sessions",
                key
            )))
        }
    };

    sessions
        .iter()
        .enumerate()
        .map(|(idx, session)| session_from_value(session, key, idx))
        .collect()
}

fn session_from_value(session: &Value, key: &str, idx: usize) -> Result<SessionRecord> {
    if !session.is_object() {
        return Err(LogError::MalformedInput(format!(
            "{}[{}] must be an object",
            key, idx
        )));
    }

    let movements = match session.get("movements") {
        Some(Value::Array(items)) => items.iter().map(movement_from_value).collect(),
        Some(_) => {
            return Err(LogError::MalformedInput(format!(
                "{}[{}].movements must be a list",
                key, idx
            )))
        }
        None => {
            return Err(LogError::MalformedInput(format!(
                "{}[{}] has no \"movements\" list",
                key, idx
            )))
        }
    };

    Ok(SessionRecord {
        joycon_used: FieldCoercer::text(session, "joyconUsed"),
        axis_used: FieldCoercer::text(session, "axisUsed"),
        assigned_game_time: FieldCoercer::number(session, "assignedGameTime"),
        total_movements: FieldCoercer::number(session, "totalMovements"),
        total_game_time_fe: FieldCoercer::number(session, "totalGameTimeFE"),
        total_game_time_abad: FieldCoercer::number(session, "totalGameTimeAbAd"),
        reward_count: FieldCoercer::number(session, "rewardCount"),
        character_id: FieldCoercer::text(session, "characterID"),
        movements,
    })
}

/// Non-object movements yield a record with every field missing.
fn movement_from_value(movement: &Value) -> MovementRecord {
    MovementRecord {
        movement_type: FieldCoercer::text(movement, "movementType"),
        angle: FieldCoercer::number(movement, "Angle"),
        threshold_angle: FieldCoercer::number(movement, "thresholdAngle"),
        timestamp: FieldCoercer::number(movement, "timeStamp"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
