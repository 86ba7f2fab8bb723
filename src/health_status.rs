use std::{
    fmt::Display,
    future::Future,
    time::{Duration, Instant},
};

use eyre::Error;
use serde::Serialize;
use tokio::time::timeout;

#[derive(Debug, Serialize)]
pub struct HealthStatusReport {
    #[serde(flatten)]
    pub status: HealthStatus,
    pub duration: Duration,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Offline { error: String },
}

impl Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Degraded => write!(f, "degraded"),
            HealthStatus::Offline { .. } => write!(f, "offline"),
        }
    }
}

impl HealthStatus {
    /// Degraded dependencies still serve traffic; only offline ones don't.
    pub fn is_available(&self) -> bool {
        !matches!(self, HealthStatus::Offline { .. })
    }
}

impl HealthStatusReport {
    /// Runs `check`, reporting it offline when it fails or outlives `timeout_ms`, and degraded
    /// when it succeeds after more than `degrade_ms`.
    pub async fn check_with_timeout_and_degrade<F>(
        check: F,
        timeout_ms: u64,
        degrade_ms: u64,
    ) -> HealthStatusReport
    where
        F: Future<Output = Result<(), Error>>,
    {
        let start = Instant::now();

        let status = match timeout(Duration::from_millis(timeout_ms), check).await {
            Ok(Ok(())) if start.elapsed() > Duration::from_millis(degrade_ms) => {
                HealthStatus::Degraded
            }
            Ok(Ok(())) => HealthStatus::Healthy,
            Ok(Err(e)) => HealthStatus::Offline {
                error: e.to_string(),
            },
            Err(elapsed) => HealthStatus::Offline {
                error: elapsed.to_string(),
            },
        };

        HealthStatusReport {
            status,
            duration: start.elapsed(),
        }
    }
}
