use shared::{
    domain::{ScheduleSlot, SlotIndex},
    protocol::{plain_number, SetSlotRequest},
};

use crate::coerce;

const EMPTY_TIME: &str = "00:00";

#[derive(Debug, Clone)]
struct SlotControl {
    time_field: String,
    weight_field: String,
    effective_active: bool,
    confirmed: Option<ScheduleSlot>,
    editing: bool,
    revision: u64,
}

impl Default for SlotControl {
    fn default() -> Self {
        Self {
            time_field: EMPTY_TIME.to_string(),
            weight_field: "0".to_string(),
            effective_active: false,
            confirmed: None,
            editing: false,
            revision: 0,
        }
    }
}

/// Displayed values of one slot, parsed back into numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotReading {
    pub hour: u32,
    pub minute: u32,
    pub weight: f64,
}

/// Values captured from a slot's editable fields, ready to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDraft {
    pub index: SlotIndex,
    pub hour: String,
    pub minute: String,
    pub weight: f64,
    /// Edit revision of the slot when the fields were read.
    pub revision: u64,
}

impl From<SlotDraft> for SetSlotRequest {
    fn from(draft: SlotDraft) -> Self {
        Self {
            index: draft.index,
            hour: draft.hour,
            minute: draft.minute,
            weight: draft.weight,
        }
    }
}

/// Render-ready snapshot of one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRow {
    pub index: SlotIndex,
    pub time_field: String,
    pub weight_field: String,
    pub effective_active: bool,
    pub editing: bool,
    pub confirmed: Option<ScheduleSlot>,
}

#[derive(Debug, Clone)]
pub struct SlotStore {
    controls: Vec<SlotControl>,
}

impl SlotStore {
    /// A store with `count` slot controls, indices `0..count`.
    pub fn new(count: usize) -> Self {
        Self {
            controls: vec![SlotControl::default(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn read(&self, index: SlotIndex) -> Option<SlotReading> {
        let control = self.controls.get(index.0)?;
        let (hour, minute) = split_time(&control.time_field);
        Some(SlotReading {
            hour: hour.parse().unwrap_or(0),
            minute: minute.parse().unwrap_or(0),
            weight: parse_weight(&control.weight_field),
        })
    }

    /// Overwrites the displayed fields of `index` from a reconciled slot.
    ///
    /// Returns whether the display changed hands: unknown indices are
    /// ignored, and a slot under edit only records the confirmed value.
    pub fn write(&mut self, index: SlotIndex, slot: &ScheduleSlot) -> bool {
        let Some(control) = self.controls.get_mut(index.0) else {
            return false;
        };
        control.confirmed = Some(*slot);
        if control.editing {
            return false;
        }
        control.time_field = slot.time_label();
        control.weight_field = plain_number(slot.weight);
        control.effective_active = slot.effective_active();
        true
    }

    /// Writes reconciled slots by position. Extra slots are dropped.
    pub fn write_all(&mut self, slots: &[ScheduleSlot]) -> usize {
        slots
            .iter()
            .enumerate()
            .filter(|(i, slot)| self.write(SlotIndex(*i), slot))
            .count()
    }

    pub fn edit_time(&mut self, index: SlotIndex, text: &str) -> bool {
        let Some(control) = self.controls.get_mut(index.0) else {
            return false;
        };
        control.time_field = text.trim().to_string();
        control.editing = true;
        control.revision += 1;
        true
    }

    pub fn edit_weight(&mut self, index: SlotIndex, text: &str) -> bool {
        let Some(control) = self.controls.get_mut(index.0) else {
            return false;
        };
        control.weight_field = text.trim().to_string();
        control.editing = true;
        control.revision += 1;
        true
    }

    /// Ends the edit a submitted draft came from, so the next poll may
    /// overwrite the fields again. An edit made after the draft was captured
    /// keeps the slot locked. The fields keep their current text until then.
    pub fn release(&mut self, draft: &SlotDraft) -> bool {
        let Some(control) = self.controls.get_mut(draft.index.0) else {
            return false;
        };
        if control.revision != draft.revision {
            return false;
        }
        control.editing = false;
        true
    }

    /// Drops an edit and restores the last confirmed values, if any.
    pub fn discard(&mut self, index: SlotIndex) -> bool {
        let Some(control) = self.controls.get_mut(index.0) else {
            return false;
        };
        control.editing = false;
        if let Some(confirmed) = control.confirmed {
            self.write(index, &confirmed);
        }
        true
    }

    pub fn is_editing(&self, index: SlotIndex) -> bool {
        self.controls
            .get(index.0)
            .is_some_and(|control| control.editing)
    }

    pub fn capture_draft(&self, index: SlotIndex) -> Option<SlotDraft> {
        let control = self.controls.get(index.0)?;
        let (hour, minute) = split_time(&control.time_field);
        Some(SlotDraft {
            index,
            hour,
            minute,
            weight: parse_weight(&control.weight_field),
            revision: control.revision,
        })
    }

    pub fn rows(&self) -> Vec<SlotRow> {
        self.controls
            .iter()
            .enumerate()
            .map(|(i, control)| SlotRow {
                index: SlotIndex(i),
                time_field: control.time_field.clone(),
                weight_field: control.weight_field.clone(),
                effective_active: control.effective_active,
                editing: control.editing,
                confirmed: control.confirmed,
            })
            .collect()
    }
}

/// Splits `HH:MM` into its typed components. A missing, empty or non-digit
/// component becomes `"0"`.
fn split_time(text: &str) -> (String, String) {
    let mut parts = text.split(':');
    let hour = time_component(parts.next());
    let minute = time_component(parts.next());
    (hour, minute)
}

fn time_component(part: Option<&str>) -> String {
    match part.map(str::trim) {
        Some(p) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => p.to_string(),
        _ => "0".to_string(),
    }
}

fn parse_weight(text: &str) -> f64 {
    coerce::parse_float(text)
        .filter(|w| w.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
#[path = "tests/slot_store_tests.rs"]
mod tests;
