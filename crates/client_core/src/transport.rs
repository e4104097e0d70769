use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use shared::{
    error::CommandError,
    protocol::{
        ManualFeedRequest, SetSlotRequest, MANUAL_FEED_PATH, RESET_PATH, SET_SLOT_PATH,
        STATUS_PATH,
    },
};
use tracing::{debug, warn};
use url::Url;

use crate::error::PollError;

/// The device's HTTP surface as seen by the controller.
#[async_trait]
pub trait FeederApi: Send + Sync {
    /// Raw `/api/status` body. Shape is not checked here.
    async fn fetch_status(&self) -> Result<Value, PollError>;
    async fn manual_feed(&self, request: &ManualFeedRequest) -> Result<(), CommandError>;
    async fn set_slot(&self, request: &SetSlotRequest) -> Result<(), CommandError>;
    async fn reset(&self) -> Result<(), CommandError>;
}

struct Endpoints {
    status: Url,
    manual_feed: Url,
    set_slot: Url,
    reset: Url,
}

impl Endpoints {
    fn resolve(device_url: &str) -> Result<Self> {
        let mut base = Url::parse(device_url.trim())
            .with_context(|| format!("invalid device url '{device_url}'"))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(anyhow!("device url must start with http:// or https://"));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let join = |path: &str| {
            base.join(path.trim_start_matches('/'))
                .with_context(|| format!("failed to build endpoint {path} from '{device_url}'"))
        };

        Ok(Self {
            status: join(STATUS_PATH)?,
            manual_feed: join(MANUAL_FEED_PATH)?,
            set_slot: join(SET_SLOT_PATH)?,
            reset: join(RESET_PATH)?,
        })
    }
}

pub struct HttpFeederApi {
    http: Client,
    endpoints: Endpoints,
}

impl HttpFeederApi {
    pub fn new(device_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build().context("failed to build http client")?,
            endpoints: Endpoints::resolve(device_url)?,
        })
    }

    pub fn status_url(&self) -> &Url {
        &self.endpoints.status
    }

    async fn send_command(&self, request: RequestBuilder) -> Result<(), CommandError> {
        let res = request.send().await.map_err(|err| {
            warn!("command request failed before a response: {err}");
            CommandError::Network(err.to_string())
        })?;

        let status = res.status();
        if status.is_success() {
            return Ok(());
        }

        let body = match res.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!("failed to read rejection body: {err}");
                String::new()
            }
        };
        Err(CommandError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl FeederApi for HttpFeederApi {
    async fn fetch_status(&self) -> Result<Value, PollError> {
        let res = self.http.get(self.endpoints.status.clone()).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(PollError::Status {
                status: status.as_u16(),
            });
        }
        let contents = res.text().await?;
        debug!(bytes = contents.len(), "status body received");
        Ok(serde_json::from_str(&contents)?)
    }

    async fn manual_feed(&self, request: &ManualFeedRequest) -> Result<(), CommandError> {
        self.send_command(
            self.http
                .post(self.endpoints.manual_feed.clone())
                .query(request),
        )
        .await
    }

    async fn set_slot(&self, request: &SetSlotRequest) -> Result<(), CommandError> {
        self.send_command(self.http.post(self.endpoints.set_slot.clone()).query(request))
            .await
    }

    async fn reset(&self) -> Result<(), CommandError> {
        self.send_command(self.http.post(self.endpoints.reset.clone()))
            .await
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
