use super::*;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use client_core::{error::PollError, FeederApi};
use serde_json::{json, Value};
use shared::{
    domain::SlotIndex,
    error::CommandError,
    protocol::{ManualFeedRequest, SetSlotRequest},
};

#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<String>>,
}

impl RecordingApi {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl FeederApi for RecordingApi {
    async fn fetch_status(&self) -> Result<Value, PollError> {
        self.calls.lock().expect("calls lock").push("status".into());
        Ok(json!({ "weight": 4, "feedingActive": false }))
    }

    async fn manual_feed(&self, request: &ManualFeedRequest) -> Result<(), CommandError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(format!("feed {}", request.amount));
        Ok(())
    }

    async fn set_slot(&self, request: &SetSlotRequest) -> Result<(), CommandError> {
        self.calls.lock().expect("calls lock").push(format!(
            "slot {} {}:{} {}",
            request.index.0, request.hour, request.minute, request.weight
        ));
        Ok(())
    }

    async fn reset(&self) -> Result<(), CommandError> {
        self.calls.lock().expect("calls lock").push("reset".into());
        Ok(())
    }
}

fn controller() -> (Arc<RecordingApi>, Arc<FeederController>) {
    let api = Arc::new(RecordingApi::default());
    let controller = FeederController::new(api.clone(), 3);
    (api, controller)
}

#[tokio::test]
async fn out_of_range_slot_is_reported_without_requests() {
    let (api, controller) = controller();

    let reply = run_command(&controller, ConsoleCommand::Save { index: SlotIndex(5) }).await;

    assert_eq!(reply, Reply::Print("No slot 6".into()));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn edited_slot_is_submitted_then_refreshed() {
    let (api, controller) = controller();

    let edit = ConsoleCommand::SetTime {
        index: SlotIndex(0),
        time: "07:30".into(),
    };
    assert_eq!(run_command(&controller, edit).await, Reply::Quiet);
    let weight = ConsoleCommand::SetWeight {
        index: SlotIndex(0),
        weight: "15".into(),
    };
    assert_eq!(run_command(&controller, weight).await, Reply::Quiet);
    let save = ConsoleCommand::Save { index: SlotIndex(0) };
    assert_eq!(run_command(&controller, save).await, Reply::Quiet);

    assert_eq!(api.calls(), vec!["slot 0 07:30 15".to_string(), "status".into()]);
}

#[tokio::test]
async fn status_prints_the_current_frame() {
    let (_api, controller) = controller();
    controller.poll_once().await;

    let Reply::Print(frame) = run_command(&controller, ConsoleCommand::Status).await else {
        panic!("status must print a frame");
    };
    assert!(frame.contains("Bowl: 4.0 g  [Ready to feed]  Idle"));
}

#[tokio::test]
async fn quit_and_help_need_no_device() {
    let (api, controller) = controller();

    assert_eq!(run_command(&controller, ConsoleCommand::Quit).await, Reply::Quit);
    assert_eq!(
        run_command(&controller, ConsoleCommand::Help).await,
        Reply::Print(HELP.to_string())
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn feed_goes_through_the_dispatcher() {
    let (api, controller) = controller();

    let feed = ConsoleCommand::Feed {
        amount: "25".into(),
    };
    assert_eq!(run_command(&controller, feed).await, Reply::Quiet);

    assert_eq!(api.calls(), vec!["feed 25".to_string()]);
    assert_eq!(
        controller.view().await.manual_message.as_deref(),
        Some("Feeding started!")
    );
}
