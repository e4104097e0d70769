use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use shared::domain::{DeviceStatus, FeedLogEntry, SlotIndex};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::{debug, info, warn};

use crate::{
    dispatcher::{CommandDispatcher, Notice},
    poller::{LatestGate, StatusPoller},
    slot_store::{SlotRow, SlotStore},
    transport::FeederApi,
};

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FeederView {
    /// `None` until the first successful poll.
    pub status: Option<DeviceStatus>,
    pub slots: Vec<SlotRow>,
    pub history: Vec<FeedLogEntry>,
    pub manual_message: Option<String>,
    pub last_synced_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub enum ControllerEvent {
    ViewChanged(FeederView),
    Notice(Notice),
}

struct ControllerState {
    status: Option<DeviceStatus>,
    history: Vec<FeedLogEntry>,
    slots: SlotStore,
    gate: LatestGate,
    manual_message: Option<String>,
    last_synced_at: Option<DateTime<Utc>>,
}

impl ControllerState {
    fn apply(&mut self, status: DeviceStatus) {
        if let Some(slots) = &status.slots {
            let written = self.slots.write_all(slots);
            if slots.len() > self.slots.len() {
                debug!(
                    reported = slots.len(),
                    rendered = self.slots.len(),
                    "ignoring slots without a control"
                );
            }
            debug!(written, "slots reconciled");
        }
        if let Some(history) = &status.history {
            self.history = history.clone();
        }
        self.status = Some(status);
        self.last_synced_at = Some(Utc::now());
    }

    fn view(&self) -> FeederView {
        FeederView {
            status: self.status.clone(),
            slots: self.slots.rows(),
            history: self.history.clone(),
            manual_message: self.manual_message.clone(),
            last_synced_at: self.last_synced_at,
        }
    }
}

pub struct FeederController {
    poller: StatusPoller,
    dispatcher: CommandDispatcher,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<ControllerEvent>,
}

impl FeederController {
    pub fn new(api: Arc<dyn FeederApi>, slot_count: usize) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            poller: StatusPoller::new(Arc::clone(&api)),
            dispatcher: CommandDispatcher::new(api),
            inner: Mutex::new(ControllerState {
                status: None,
                history: Vec::new(),
                slots: SlotStore::new(slot_count),
                gate: LatestGate::default(),
                manual_message: None,
                last_synced_at: None,
            }),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub async fn view(&self) -> FeederView {
        self.inner.lock().await.view()
    }

    pub fn polls_issued(&self) -> u64 {
        self.poller.issued()
    }

    /// One poll cycle. Returns whether the response was applied; failed
    /// cycles and responses superseded by a newer request leave state as is.
    pub async fn poll_once(&self) -> bool {
        let outcome = self.poller.poll().await;
        let generation = outcome.generation.0;

        let status = match outcome.result {
            Ok(status) => status,
            Err(err) => {
                warn!(generation, "status poll failed: {err}");
                return false;
            }
        };

        let view = {
            let mut guard = self.inner.lock().await;
            if !guard.gate.admit(outcome.generation) {
                debug!(generation, "discarding superseded status response");
                return false;
            }
            guard.apply(status);
            guard.view()
        };

        let _ = self.events.send(ControllerEvent::ViewChanged(view));
        true
    }

    /// Polls on a fixed cadence until the task is aborted. A cycle that
    /// outlasts the period swallows the missed ticks instead of stacking
    /// requests.
    pub fn spawn_polling(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                controller.poll_once().await;
            }
        })
    }

    pub async fn manual_feed(&self, amount_input: &str) -> Notice {
        let result = self.dispatcher.manual_feed(amount_input).await;
        let notice = Notice::manual_feed(&result);

        let view = {
            let mut guard = self.inner.lock().await;
            guard.manual_message = Some(notice.text.clone());
            guard.view()
        };
        let _ = self.events.send(ControllerEvent::ViewChanged(view));
        let _ = self.events.send(ControllerEvent::Notice(notice.clone()));
        notice
    }

    pub async fn edit_slot_time(&self, index: SlotIndex, text: &str) -> bool {
        self.edit_slot(index, |slots| slots.edit_time(index, text))
            .await
    }

    pub async fn edit_slot_weight(&self, index: SlotIndex, text: &str) -> bool {
        self.edit_slot(index, |slots| slots.edit_weight(index, text))
            .await
    }

    /// Abandons a draft and shows the last confirmed values again.
    pub async fn cancel_slot_edit(&self, index: SlotIndex) -> bool {
        self.edit_slot(index, |slots| slots.discard(index)).await
    }

    async fn edit_slot(
        &self,
        index: SlotIndex,
        edit: impl FnOnce(&mut SlotStore) -> bool,
    ) -> bool {
        let view = {
            let mut guard = self.inner.lock().await;
            if !edit(&mut guard.slots) {
                debug!(slot = index.0, "edit for unknown slot ignored");
                return false;
            }
            guard.view()
        };
        let _ = self.events.send(ControllerEvent::ViewChanged(view));
        true
    }

    /// Submits the slot's current fields. `None` when the slot has no
    /// control. On acknowledgement the draft is released, unless the slot was
    /// edited again meanwhile, and one status poll runs right away.
    pub async fn save_slot(&self, index: SlotIndex) -> Option<Notice> {
        let draft = self.inner.lock().await.slots.capture_draft(index)?;
        let result = self.dispatcher.save_slot(draft.clone()).await;
        let notice = Notice::slot_saved(index, &result);

        if result.is_ok() && !self.inner.lock().await.slots.release(&draft) {
            debug!(slot = index.0, "slot edited again while saving, keeping draft");
        }
        let _ = self.events.send(ControllerEvent::Notice(notice.clone()));

        if result.is_ok() {
            info!(slot = index.0, "slot saved, refreshing status");
            self.poll_once().await;
        }
        Some(notice)
    }

    pub async fn reset(&self) -> Notice {
        let result = self.dispatcher.reset().await;
        let notice = Notice::reset(&result);
        let _ = self.events.send(ControllerEvent::Notice(notice.clone()));

        if result.is_ok() {
            self.poll_once().await;
        }
        notice
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
