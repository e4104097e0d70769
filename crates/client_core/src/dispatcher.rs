use std::sync::Arc;

use shared::{
    domain::SlotIndex,
    error::CommandError,
    protocol::{plain_number, ManualFeedRequest, SetSlotRequest},
};
use tracing::{info, warn};

use crate::{coerce, slot_store::SlotDraft, transport::FeederApi};

pub const PORTION_PROMPT: &str = "Enter a portion > 0 g";
pub const FEEDING_STARTED: &str = "Feeding started!";
pub const NETWORK_ERROR: &str = "Network error";

/// Where a notice belongs: next to the input that caused it, or as a
/// notification the user has to acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSurface {
    Inline,
    Blocking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub surface: NoticeSurface,
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn new(surface: NoticeSurface, level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            surface,
            level,
            text: text.into(),
        }
    }

    pub fn manual_feed(result: &Result<(), CommandError>) -> Self {
        match result {
            Ok(()) => Self::new(NoticeSurface::Inline, NoticeLevel::Success, FEEDING_STARTED),
            Err(err) => Self::new(NoticeSurface::Inline, NoticeLevel::Error, failure_text(err)),
        }
    }

    pub fn slot_saved(index: SlotIndex, result: &Result<(), CommandError>) -> Self {
        match result {
            Ok(()) => Self::new(
                NoticeSurface::Blocking,
                NoticeLevel::Success,
                format!("Slot {} saved!", index.number()),
            ),
            Err(err) => Self::new(NoticeSurface::Blocking, NoticeLevel::Error, failure_text(err)),
        }
    }

    pub fn reset(result: &Result<(), CommandError>) -> Self {
        let text = match result {
            Ok(()) => "System reset",
            Err(CommandError::Network(_)) => "Reset failed (network error)",
            Err(_) => "Reset failed",
        };
        let level = if result.is_ok() {
            NoticeLevel::Success
        } else {
            NoticeLevel::Error
        };
        Self::new(NoticeSurface::Blocking, level, text)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

fn failure_text(err: &CommandError) -> String {
    match err {
        CommandError::Validation(message) => message.clone(),
        CommandError::Rejected { body, .. } => format!("Error: {body}"),
        CommandError::Network(_) => NETWORK_ERROR.to_string(),
    }
}

/// Reads a portion the way the amount field is read: empty means 0, then
/// the leading number is taken. Anything not strictly positive is refused.
pub fn parse_portion(input: &str) -> Result<f64, CommandError> {
    let text = if input.is_empty() { "0" } else { input };
    match coerce::parse_float(text) {
        Some(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(CommandError::validation(PORTION_PROMPT)),
    }
}

pub struct CommandDispatcher {
    api: Arc<dyn FeederApi>,
}

impl CommandDispatcher {
    pub fn new(api: Arc<dyn FeederApi>) -> Self {
        Self { api }
    }

    pub async fn manual_feed(&self, amount_input: &str) -> Result<(), CommandError> {
        let amount = parse_portion(amount_input)?;
        info!(amount = %plain_number(amount), "dispatching manual feed");
        let result = self.api.manual_feed(&ManualFeedRequest { amount }).await;
        log_outcome("manual feed", &result);
        result
    }

    pub async fn save_slot(&self, draft: SlotDraft) -> Result<(), CommandError> {
        info!(
            slot = draft.index.0,
            hour = %draft.hour,
            minute = %draft.minute,
            weight = %plain_number(draft.weight),
            "dispatching slot save"
        );
        let result = self.api.set_slot(&SetSlotRequest::from(draft)).await;
        log_outcome("slot save", &result);
        result
    }

    pub async fn reset(&self) -> Result<(), CommandError> {
        info!("dispatching device reset");
        let result = self.api.reset().await;
        log_outcome("reset", &result);
        result
    }
}

fn log_outcome(command: &str, result: &Result<(), CommandError>) {
    if let Err(err) = result {
        warn!(command, "command failed: {err}");
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
