//! Explicit wait-then-act polling.
//!
//! The harness never uses fixed sleeps to "settle" the UI; it polls for the
//! expected state and acts once the state is observed, or fails with the
//! last observed state when the deadline passes.

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::time::Instant;

use crate::error::HarnessError;

/// Poll until `poll` yields `Ok`, or fail with the last observed state.
///
/// `poll` returns `Err(state)` with a description of what it currently sees;
/// on timeout that description lands in [`HarnessError::DriverTimeout`].
pub async fn wait_until<T, F, Fut>(
    description: &str,
    timeout: Duration,
    interval: Duration,
    mut poll: F,
) -> Result<T, HarnessError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, String>>,
{
    let start = Instant::now();
    let mut last_state = "not yet polled".to_string();

    loop {
        match poll().await {
            Ok(value) => return Ok(value),
            Err(state) => last_state = state,
        }

        if start.elapsed() > timeout {
            return Err(HarnessError::DriverTimeout {
                step: description.to_string(),
                last_state,
            });
        }

        tokio::time::sleep(interval).await;
    }
}

/// Wait for the hosted application to answer on its base URL.
///
/// Polls until the server responds 200 OK; times out after the specified
/// duration. The analogue of a pre-flight health check before driving any
/// scenario.
pub async fn wait_for_app(base_url: &str, timeout: Duration) -> Result<()> {
    let client = reqwest::Client::new();
    let start = std::time::Instant::now();

    tracing::info!(base_url, "Waiting for application to respond...");

    loop {
        let last_state = match client
            .get(base_url)
            .timeout(Duration::from_secs(2))
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(base_url, "Application is up");
                return Ok(());
            }
            Ok(resp) => format!("status: {}", resp.status()),
            Err(e) => format!("error: {e}"),
        };

        if start.elapsed() > timeout {
            return Err(anyhow!(
                "Timeout waiting for {base_url}. Last response: {last_state}"
            ));
        }

        tracing::debug!(base_url, %last_state, "Application not ready yet");
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_until_returns_once_condition_holds() {
        let mut polls = 0u32;
        let result = wait_until(
            "counter reaches three",
            Duration::from_secs(5),
            Duration::from_millis(1),
            || {
                polls += 1;
                let current = polls;
                async move {
                    if current >= 3 {
                        Ok(current)
                    } else {
                        Err(format!("counter at {current}"))
                    }
                }
            },
        )
        .await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_until_reports_last_observed_state_on_timeout() {
        let err = wait_until(
            "totals section visible",
            Duration::from_millis(50),
            Duration::from_millis(10),
            || async { Err::<(), _>("spinner still shown".to_string()) },
        )
        .await
        .unwrap_err();

        match err {
            HarnessError::DriverTimeout { step, last_state } => {
                assert_eq!(step, "totals section visible");
                assert_eq!(last_state, "spinner still shown");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
