use std::{fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub device_url: String,
    pub poll_interval_ms: u64,
    /// 0 disables the request timeout.
    pub request_timeout_ms: u64,
    pub slot_count: usize,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_url: "http://192.168.4.1".into(),
            poll_interval_ms: 1000,
            request_timeout_ms: 5000,
            slot_count: 3,
            log_level: "info".into(),
        }
    }
}

impl Settings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

/// Defaults, then the TOML file at `path` if it exists, then environment
/// overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

pub(crate) fn load_settings_with(
    path: &Path,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<Settings>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    apply_env_overrides(&mut settings, var);
    Ok(settings)
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("FEEDER_DEVICE_URL") {
        settings.device_url = v;
    }
    if let Some(v) = var("APP__DEVICE_URL") {
        settings.device_url = v;
    }

    if let Some(v) = var("APP__POLL_INTERVAL_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.poll_interval_ms = parsed;
        }
    }
    if let Some(v) = var("APP__REQUEST_TIMEOUT_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_ms = parsed;
        }
    }
    if let Some(v) = var("APP__SLOT_COUNT") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.slot_count = parsed;
        }
    }

    if let Some(v) = var("APP__LOG_LEVEL") {
        settings.log_level = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
