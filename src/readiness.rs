use crate::client::Backend;
use crate::errors::{BootError, ProbeError};
use crate::models::{Activity, Prize};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(600);
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(2500);

/// Polls `GET /version` until the backend answers, masking cold starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessProber {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub attempt_timeout: Duration,
}

impl Default for ReadinessProber {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

impl ReadinessProber {
    /// Returns the attempt number that succeeded.
    pub async fn probe<B: Backend + ?Sized>(&self, backend: &B) -> Result<u32, ProbeError> {
        for attempt in 1..=self.max_attempts {
            match timeout(self.attempt_timeout, backend.version()).await {
                Ok(Ok(version)) => {
                    info!("backend ready (version {version}) after {attempt} attempt(s)");
                    return Ok(attempt);
                }
                Ok(Err(err)) => debug!("readiness attempt {attempt} failed: {err}"),
                Err(_) => debug!("readiness attempt {attempt} timed out"),
            }
            if attempt < self.max_attempts {
                sleep(self.retry_delay).await;
            }
        }

        warn!("backend not responding after {} attempts", self.max_attempts);
        Err(ProbeError::Unreachable {
            attempts: self.max_attempts,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    Connecting,
    Loading,
    Ready,
    Unreachable,
    LoadFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialData {
    pub prizes: Vec<Prize>,
    pub activities: Vec<Activity>,
}

/// Probe, then fetch prizes and activities together, reporting each phase.
pub async fn boot<B: Backend + ?Sized>(
    backend: &B,
    prober: &ReadinessProber,
    mut on_phase: impl FnMut(BootPhase),
) -> Result<InitialData, BootError> {
    on_phase(BootPhase::Connecting);
    if let Err(err) = prober.probe(backend).await {
        on_phase(BootPhase::Unreachable);
        return Err(err.into());
    }

    on_phase(BootPhase::Loading);
    match tokio::try_join!(backend.list_prizes(), backend.list_activities()) {
        Ok((prizes, activities)) => {
            on_phase(BootPhase::Ready);
            Ok(InitialData { prizes, activities })
        }
        Err(err) => {
            warn!("initial load failed: {err}");
            on_phase(BootPhase::LoadFailed);
            Err(err.into())
        }
    }
}
