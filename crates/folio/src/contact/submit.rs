use super::DEFAULT_SUBMIT_DELAY;
use super::form::FormDraft;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Receipt for a delivered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub id: u64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Message rejected: {0}")]
    Rejected(String),
    #[error("Submission service unavailable: {0}")]
    Unavailable(String),
}

/// Where a finished draft goes.
pub trait Submitter: Send + Sync + 'static {
    fn submit(
        &self,
        draft: FormDraft,
    ) -> impl Future<Output = Result<Ack, SubmissionError>> + Send;
}

/// Waits a fixed delay and reports success without sending anything.
#[derive(Debug)]
pub struct SimulatedSubmitter {
    delay: Duration,
    sent: AtomicU64,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            sent: AtomicU64::new(0),
        }
    }

    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

impl Submitter for SimulatedSubmitter {
    async fn submit(&self, draft: FormDraft) -> Result<Ack, SubmissionError> {
        log::debug!("Simulating delivery of message from {:?}", draft.name);
        tokio::time::sleep(self.delay).await;
        let id = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(Ack { id })
    }
}
