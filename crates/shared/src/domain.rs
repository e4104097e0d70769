use serde::{Deserialize, Serialize};

macro_rules! index_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub usize);
    };
}

index_newtype!(SlotIndex);

impl SlotIndex {
    /// One-based number shown to people ("Slot 1").
    pub fn number(self) -> usize {
        self.0 + 1
    }
}

/// A configured time-of-day and portion rule, identified by its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub hour: u32,
    pub minute: u32,
    pub weight: f64,
    pub active: bool,
}

impl ScheduleSlot {
    /// A slot with zero weight never dispenses, whatever its stored flag says.
    pub fn effective_active(&self) -> bool {
        self.active && self.weight > 0.0
    }

    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

impl Default for ScheduleSlot {
    fn default() -> Self {
        Self {
            hour: 0,
            minute: 0,
            weight: 0.0,
            active: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedLogEntry {
    pub time: String,
    pub kind: String,
    pub target: f64,
    pub final_weight: f64,
}

/// Device state as of one successful poll. Replaced wholesale on the next.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub weight: f64,
    pub feeding_active: bool,
    pub next_scheduled_time: Option<String>,
    /// `None` when the payload carried no slot sequence this cycle.
    pub slots: Option<Vec<ScheduleSlot>>,
    /// `None` when the payload carried no history sequence this cycle.
    pub history: Option<Vec<FeedLogEntry>>,
}

impl DeviceStatus {
    pub const NO_SCHEDULE_LABEL: &'static str = "None";

    pub fn next_time_label(&self) -> &str {
        self.next_scheduled_time
            .as_deref()
            .unwrap_or(Self::NO_SCHEDULE_LABEL)
    }
}
