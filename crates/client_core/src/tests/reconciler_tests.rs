use serde_json::{json, Value};

use super::*;

/// A status body the way the device firmware builds it.
fn well_formed_payload() -> Value {
    json!({
        "weight": 42.5,
        "feedingActive": true,
        "nextTime": "12:00",
        "slots": [
            {"hour": 8, "minute": 0, "weight": 20.0, "active": true},
            {"hour": 18, "minute": 30, "weight": 0.0, "active": true},
        ],
        "history": [
            {"time": "08:00", "type": "Slot 1", "target": 20.0, "final": 19.0},
        ],
    })
}

#[test]
fn well_formed_payload_maps_every_field() {
    let payload = well_formed_payload();

    let status = reconcile(&payload);

    assert_eq!(status.weight, 42.5);
    assert!(status.feeding_active);
    assert_eq!(status.next_time_label(), "12:00");
    let slots = status.slots.expect("slots");
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].hour, 18);
    assert_eq!(slots[1].minute, 30);
    assert!(slots[0].effective_active());
    assert!(!slots[1].effective_active());
    let history = status.history.expect("history");
    assert_eq!(history[0].kind, "Slot 1");
    assert_eq!(history[0].final_weight, 19.0);
}

#[test]
fn malformed_payloads_fall_back_to_defaults() {
    let payloads = [
        Value::Null,
        json!([]),
        json!("status"),
        json!(17),
        json!({}),
        json!({"weight": "heavy", "feedingActive": 0, "nextTime": null}),
        json!({"weight": null, "feedingActive": "", "nextTime": ""}),
        json!({"weight": {"grams": 4}, "feedingActive": null, "nextTime": false}),
    ];

    for payload in payloads {
        let status = reconcile(&payload);
        assert_eq!(status.weight, 0.0, "payload {payload}");
        assert!(!status.feeding_active, "payload {payload}");
        assert_eq!(status.next_time_label(), "None", "payload {payload}");
        assert!(status.slots.is_none(), "payload {payload}");
        assert!(status.history.is_none(), "payload {payload}");
    }
}

#[test]
fn fields_degrade_independently() {
    let status = reconcile(&json!({
        "weight": "13.5",
        "feedingActive": "yes",
        "nextTime": [],
        "slots": "not a list",
    }));

    assert_eq!(status.weight, 13.5);
    assert!(status.feeding_active);
    assert_eq!(status.next_scheduled_time, None);
    assert!(status.slots.is_none());
}

#[test]
fn odd_slot_elements_become_default_slots() {
    let status = reconcile(&json!({
        "slots": [
            null,
            {"hour": "7", "minute": 45.9, "weight": "15", "active": 1},
            {"hour": -2, "weight": -10, "active": true},
            42,
        ]
    }));

    let slots = status.slots.expect("slots");
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0], ScheduleSlot::default());
    assert_eq!(slots[1].hour, 7);
    assert_eq!(slots[1].minute, 45);
    assert_eq!(slots[1].weight, 15.0);
    assert!(slots[1].effective_active());
    assert_eq!(slots[2].hour, 0);
    assert_eq!(slots[2].weight, 0.0);
    assert!(slots[2].active);
    assert!(!slots[2].effective_active());
    assert_eq!(slots[3], ScheduleSlot::default());
}

#[test]
fn negative_sensor_reading_is_clamped() {
    let status = reconcile(&json!({"weight": -1.2}));
    assert_eq!(status.weight, 0.0);
}

#[test]
fn empty_slot_array_is_still_a_sequence() {
    let status = reconcile(&json!({"slots": [], "history": []}));
    assert_eq!(status.slots, Some(Vec::new()));
    assert_eq!(status.history, Some(Vec::new()));
}
