use serde_json::Value;
use tracing::warn;

// ── FieldCoercer ──────────────────────────────────────────────────────────────

/// Reads loosely-typed fields out of a session document object.
///
/// Session files are written by the game without a schema, so each field is
/// coerced into one of two shapes: text (absent → empty string) or an
/// optional number (absent → `None`).
pub struct FieldCoercer;

impl FieldCoercer {
    /// Read `key` from `obj` as text.
    ///
    /// * absent / `null` → `""`
    /// * string          → the string itself
    /// * number / bool   → its JSON rendering
    /// * array / object  → compact JSON
    pub fn text(obj: &Value, key: &str) -> String {
        match obj.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Read `key` from `obj` as an optional number.
    ///
    /// * absent / `null`   → `None`
    /// * number            → `Some(f64)`
    /// * numeric string    → parsed value
    /// * empty string      → `None`
    /// * anything else (bool, array, object) → `None`, with a warning
    pub fn number(obj: &Value, key: &str) -> Option<f64> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => Self::parse_numeric_str(key, s),
            Some(other) => {
                warn!("FieldCoercer: field \"{}\" is not numeric: {}", key, other);
                None
            }
        }
    }

    fn parse_numeric_str(key: &str, s: &str) -> Option<f64> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                warn!("FieldCoercer: field \"{}\" is not numeric: \"{}\"", key, s);
                None
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
