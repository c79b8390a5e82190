//! Run configuration and credential loading.
//!
//! Constructed once per test run and passed into the runner explicitly;
//! nothing here is globally cached. Credentials come from the environment
//! (or an optional local `harness` file) and the password never appears in
//! logs thanks to `secrecy`.

use std::time::Duration;

use config::{Config as Cfg, File};
use secrecy::Secret;
use serde::Deserialize;

use crate::error::HarnessError;

#[derive(Debug, Deserialize, Clone)]
pub struct HarnessConfig {
    /// Base URL of the hosted application under test.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Login email for the test account.
    #[serde(default)]
    pub email: String,

    /// Login password for the test account; redacted in Debug output.
    #[serde(default = "default_password")]
    pub password: Secret<String>,

    /// Upper bound for one scenario, driving and assertions included.
    #[serde(default = "default_scenario_timeout_secs")]
    pub scenario_timeout_secs: u64,

    /// Upper bound for one displayed value to reach its expected text.
    #[serde(default = "default_readback_timeout_secs")]
    pub readback_timeout_secs: u64,

    /// Poll interval while waiting for the UI to reach an expected state.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_base_url() -> String {
    "https://invoicedesk.siyothsoft.com".to_string()
}

fn default_password() -> Secret<String> {
    Secret::new(String::new())
}

fn default_scenario_timeout_secs() -> u64 {
    60
}

fn default_readback_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    250
}

impl HarnessConfig {
    /// Load from an optional `harness.(toml|json|yaml)` file plus
    /// `E2E`-prefixed environment variables (`E2E__EMAIL`, `E2E__PASSWORD`,
    /// `E2E__BASE_URL`, ...). Environment wins over the file.
    pub fn load() -> Result<Self, HarnessError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("harness").required(false))
            .add_source(config::Environment::with_prefix("E2E").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn scenario_timeout(&self) -> Duration {
        Duration::from_secs(self.scenario_timeout_secs)
    }

    pub fn readback_timeout(&self) -> Duration {
        Duration::from_secs(self.readback_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            email: String::new(),
            password: default_password(),
            scenario_timeout_secs: default_scenario_timeout_secs(),
            readback_timeout_secs: default_readback_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}
