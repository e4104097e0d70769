use serde::{Serialize, Serializer};

use crate::domain::SlotIndex;

pub const STATUS_PATH: &str = "/api/status";
pub const MANUAL_FEED_PATH: &str = "/api/manual-feed";
pub const SET_SLOT_PATH: &str = "/api/set-slot";
pub const RESET_PATH: &str = "/api/reset";

/// Formats a number the way the device's web page stringifies it:
/// `25` rather than `25.0`, `12.5` unchanged, and exponent form (`1e+21`,
/// `1e-7`) outside `[1e-6, 1e21)`.
pub fn plain_number(value: f64) -> String {
    if value == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}Infinity");
    }
    let magnitude = value.abs();
    if magnitude.is_nan() || (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }

    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

fn serialize_plain_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&plain_number(*value))
}

fn serialize_slot_index<S>(value: &SlotIndex, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(value.0 as u64)
}

/// Query string of `POST /api/manual-feed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualFeedRequest {
    #[serde(serialize_with = "serialize_plain_number")]
    pub amount: f64,
}

/// Query string of `POST /api/set-slot`.
///
/// `hour` and `minute` travel exactly as they were typed into the slot's
/// time field, so `07` is sent as `07`. Range checks belong to the device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetSlotRequest {
    #[serde(serialize_with = "serialize_slot_index")]
    pub index: SlotIndex,
    pub hour: String,
    pub minute: String,
    #[serde(serialize_with = "serialize_plain_number")]
    pub weight: f64,
}
