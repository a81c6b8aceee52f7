use serde::{Deserialize, Serialize};
use std::fmt;

/// Exercise modality a session was recorded under.
///
/// Variant order is the fixed output order of every grouped view:
/// flexion-extension first, then abduction-adduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Modality {
    /// Flexion-extension movements (cave mode).
    #[serde(rename = "Flexión-Extensión")]
    FlexionExtension,
    /// Abduction-adduction movements (road mode).
    #[serde(rename = "Abducción-Aducción")]
    AbductionAdduction,
}

impl Modality {
    /// Both modalities in output order.
    pub const ALL: [Modality; 2] = [Modality::FlexionExtension, Modality::AbductionAdduction];

    /// Label written to the `type` column.
    pub fn label(&self) -> &'static str {
        match self {
            Modality::FlexionExtension => "Flexión-Extensión",
            Modality::AbductionAdduction => "Abducción-Aducción",
        }
    }

    /// Key of the session collection in the source document.
    pub fn collection_key(&self) -> &'static str {
        match self {
            Modality::FlexionExtension => "flexionExtension",
            Modality::AbductionAdduction => "abduccionAduccion",
        }
    }

    /// The game-time column that belongs to this modality.
    pub fn game_time(&self, row: &FlatRow) -> Option<f64> {
        match self {
            Modality::FlexionExtension => row.total_game_time_fe,
            Modality::AbductionAdduction => row.total_game_time_abad,
        }
    }

    /// Parse a short or full modality name (`fe`, `abad`, or the column label).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "fe" | "flexion-extension" | "flexión-extensión" => Some(Modality::FlexionExtension),
            "abad" | "abduction-adduction" | "abducción-aducción" => {
                Some(Modality::AbductionAdduction)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One movement captured during a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementRecord {
    /// Free-form movement label (e.g. `"flexion"`).
    pub movement_type: String,
    /// Measured angle in degrees.
    pub angle: Option<f64>,
    /// Threshold angle the movement was judged against.
    pub threshold_angle: Option<f64>,
    /// Seconds since the session started.
    pub timestamp: Option<f64>,
}

/// One played session for a single modality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRecord {
    /// Which controller was used (`"izquierdo"` / `"derecho"`).
    pub joycon_used: String,
    /// Sensor axis the session tracked.
    pub axis_used: String,
    /// Game time the therapist assigned, in seconds.
    pub assigned_game_time: Option<f64>,
    /// Movement count recorded by the game.
    pub total_movements: Option<f64>,
    /// Measured flexion-extension play time, in seconds.
    pub total_game_time_fe: Option<f64>,
    /// Measured abduction-adduction play time, in seconds.
    pub total_game_time_abad: Option<f64>,
    /// Rewards collected during the session.
    pub reward_count: Option<f64>,
    /// Character the patient played with.
    pub character_id: String,
    /// Movements in capture order.
    pub movements: Vec<MovementRecord>,
}

/// A full session report for one patient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionDocument {
    pub user_name: String,
    pub date: String,
    pub high_score_fe: Option<f64>,
    pub high_score_abad: Option<f64>,
    pub flexion_extension: Vec<SessionRecord>,
    pub abduccion_aduccion: Vec<SessionRecord>,
}

impl SessionDocument {
    /// Sessions recorded under `modality`, in source order.
    pub fn sessions(&self, modality: Modality) -> &[SessionRecord] {
        match modality {
            Modality::FlexionExtension => &self.flexion_extension,
            Modality::AbductionAdduction => &self.abduccion_aduccion,
        }
    }

    /// Total number of movements across both collections.
    pub fn movement_count(&self) -> usize {
        Modality::ALL
            .iter()
            .flat_map(|m| self.sessions(*m))
            .map(|s| s.movements.len())
            .sum()
    }
}

/// Column names of the persisted table, in write order.
pub const TABLE_COLUMNS: [&str; 19] = [
    "userName",
    "date",
    "highScoreFE",
    "highScoreAbAd",
    "type",
    "sessionIndex",
    "movementIndex",
    "movementType",
    "Angle",
    "thresholdAngle",
    "timestamp",
    "joyconUsed",
    "axisUsed",
    "assignedGameTime",
    "totalMovements",
    "totalGameTimeFE",
    "totalGameTimeAbAd",
    "rewardCount",
    "characterID",
];

/// One movement joined with its session and document fields.
///
/// Field order matches [`TABLE_COLUMNS`]; the serde names are the column
/// headers. Missing numerics are `None` and serialise as empty fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub date: String,
    #[serde(rename = "highScoreFE")]
    pub high_score_fe: Option<f64>,
    #[serde(rename = "highScoreAbAd")]
    pub high_score_abad: Option<f64>,
    #[serde(rename = "type")]
    pub modality: Modality,
    #[serde(rename = "sessionIndex")]
    pub session_index: usize,
    #[serde(rename = "movementIndex")]
    pub movement_index: usize,
    #[serde(rename = "movementType")]
    pub movement_type: String,
    #[serde(rename = "Angle")]
    pub angle: Option<f64>,
    #[serde(rename = "thresholdAngle")]
    pub threshold_angle: Option<f64>,
    pub timestamp: Option<f64>,
    #[serde(rename = "joyconUsed")]
    pub joycon_used: String,
    #[serde(rename = "axisUsed")]
    pub axis_used: String,
    #[serde(rename = "assignedGameTime")]
    pub assigned_game_time: Option<f64>,
    #[serde(rename = "totalMovements")]
    pub total_movements: Option<f64>,
    #[serde(rename = "totalGameTimeFE")]
    pub total_game_time_fe: Option<f64>,
    #[serde(rename = "totalGameTimeAbAd")]
    pub total_game_time_abad: Option<f64>,
    #[serde(rename = "rewardCount")]
    pub reward_count: Option<f64>,
    #[serde(rename = "characterID")]
    pub character_id: String,
}

impl FlatRow {
    /// Game time of this row's own modality.
    pub fn game_time(&self) -> Option<f64> {
        self.modality.game_time(self)
    }
}
