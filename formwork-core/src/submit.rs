//! Submission of a reviewed workflow.
//!
//! There is no backend. [`SimulatedSubmitter`] waits a moment and then
//! succeeds or fails at random, which is enough to exercise the
//! submitting state and the retry path.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::error::SubmissionError;
use crate::permissions::PermissionKey;
use crate::record::{Record, Role};

/// What the review step sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub profile: Record,
    pub role: Option<Role>,
    pub granted: Vec<PermissionKey>,
}

/// Destination for reviewed workflows.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: SubmissionPayload) -> Result<(), SubmissionError>;
}

pub const DEFAULT_DELAY: Duration = Duration::from_millis(900);
pub const DEFAULT_SUCCESS_RATE: f64 = 0.85;

/// Sleeps for `delay`, then succeeds with probability `success_rate`.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    success_rate: f64,
}

impl SimulatedSubmitter {
    /// `success_rate` is clamped into `0.0..=1.0`; NaN counts as 0.
    pub fn new(delay: Duration, success_rate: f64) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self {
            delay,
            success_rate,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY, DEFAULT_SUCCESS_RATE)
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, payload: SubmissionPayload) -> Result<(), SubmissionError> {
        tracing::debug!(
            name = %payload.profile.name,
            granted = payload.granted.len(),
            "simulating submission"
        );
        tokio::time::sleep(self.delay).await;
        let ok = rand::thread_rng().gen_bool(self.success_rate);
        if ok {
            Ok(())
        } else {
            Err(SubmissionError::Rejected)
        }
    }
}
