use serde_json::Value;
use shared::domain::{DeviceStatus, FeedLogEntry, ScheduleSlot};

use crate::coerce;

/// Maps a raw `/api/status` body into a [`DeviceStatus`].
///
/// The device sends `{weight, feedingActive, nextTime, slots: [{hour,
/// minute, weight, active}], history: [{time, type, target, final}]}`, but
/// any JSON value yields a status, each malformed field falling back to its
/// default on its own.
pub fn reconcile(payload: &Value) -> DeviceStatus {
    DeviceStatus {
        weight: coerce::non_negative(payload.get("weight")),
        feeding_active: coerce::truthy(payload.get("feedingActive")),
        next_scheduled_time: coerce::display_text(payload.get("nextTime")),
        slots: payload
            .get("slots")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(reconcile_slot).collect()),
        history: payload
            .get("history")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(reconcile_feed_log).collect()),
    }
}

fn reconcile_slot(item: &Value) -> ScheduleSlot {
    ScheduleSlot {
        hour: coerce::whole_number(item.get("hour")),
        minute: coerce::whole_number(item.get("minute")),
        weight: coerce::non_negative(item.get("weight")),
        active: coerce::truthy(item.get("active")),
    }
}

fn reconcile_feed_log(item: &Value) -> FeedLogEntry {
    FeedLogEntry {
        time: coerce::display_text(item.get("time")).unwrap_or_default(),
        kind: coerce::display_text(item.get("type")).unwrap_or_default(),
        target: coerce::number(item.get("target")),
        final_weight: coerce::number(item.get("final")),
    }
}

#[cfg(test)]
#[path = "tests/reconciler_tests.rs"]
mod tests;
