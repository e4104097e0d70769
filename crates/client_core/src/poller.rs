use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::domain::DeviceStatus;
use tracing::debug;

use crate::{error::PollError, reconciler, transport::FeederApi};

/// Issue-order number of a status request. Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PollGeneration(pub u64);

#[derive(Debug)]
pub struct PollOutcome {
    pub generation: PollGeneration,
    pub result: Result<DeviceStatus, PollError>,
}

pub struct StatusPoller {
    api: Arc<dyn FeederApi>,
    issued: AtomicU64,
}

impl StatusPoller {
    pub fn new(api: Arc<dyn FeederApi>) -> Self {
        Self {
            api,
            issued: AtomicU64::new(0),
        }
    }

    pub fn issue(&self) -> PollGeneration {
        PollGeneration(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// One status read, reconciled. The generation is taken before the
    /// request goes out.
    pub async fn poll(&self) -> PollOutcome {
        let generation = self.issue();
        debug!(generation = generation.0, "status poll issued");
        let result = self
            .api
            .fetch_status()
            .await
            .map(|payload| reconciler::reconcile(&payload));
        PollOutcome { generation, result }
    }
}

/// Admits only responses newer than the last one applied, so a late reply
/// to an earlier request never overwrites a later one.
#[derive(Debug, Default)]
pub struct LatestGate {
    applied: Option<PollGeneration>,
}

impl LatestGate {
    pub fn admit(&mut self, generation: PollGeneration) -> bool {
        if self.applied.is_some_and(|applied| generation <= applied) {
            return false;
        }
        self.applied = Some(generation);
        true
    }

    pub fn applied(&self) -> Option<PollGeneration> {
        self.applied
    }
}

#[cfg(test)]
#[path = "tests/poller_tests.rs"]
mod tests;
