use super::*;
use async_trait::async_trait;
use serde_json::{json, Value};
use shared::{
    error::CommandError,
    protocol::{ManualFeedRequest, SetSlotRequest},
};

struct FixedStatus(Value);

#[async_trait]
impl FeederApi for FixedStatus {
    async fn fetch_status(&self) -> Result<Value, PollError> {
        Ok(self.0.clone())
    }

    async fn manual_feed(&self, _request: &ManualFeedRequest) -> Result<(), CommandError> {
        Ok(())
    }

    async fn set_slot(&self, _request: &SetSlotRequest) -> Result<(), CommandError> {
        Ok(())
    }

    async fn reset(&self) -> Result<(), CommandError> {
        Ok(())
    }
}

#[test]
fn generations_increase_in_issue_order() {
    let poller = StatusPoller::new(Arc::new(FixedStatus(Value::Null)));
    let first = poller.issue();
    let second = poller.issue();
    assert!(second > first);
    assert_eq!(poller.issued(), 2);
}

#[test]
fn gate_rejects_responses_older_than_applied() {
    let mut gate = LatestGate::default();
    assert!(gate.admit(PollGeneration(2)));
    assert!(!gate.admit(PollGeneration(1)));
    assert!(!gate.admit(PollGeneration(2)));
    assert!(gate.admit(PollGeneration(3)));
    assert_eq!(gate.applied(), Some(PollGeneration(3)));
}

#[tokio::test]
async fn poll_reconciles_payload() {
    let poller = StatusPoller::new(Arc::new(FixedStatus(json!({
        "weight": 5,
        "feedingActive": true,
    }))));

    let outcome = poller.poll().await;
    assert_eq!(outcome.generation, PollGeneration(1));
    let status = outcome.result.expect("status");
    assert_eq!(status.weight, 5.0);
    assert!(status.feeding_active);
}
