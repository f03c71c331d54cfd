//! Poll loop state machine.
//!
//! The caller owns the clock: [`Poller::tick`] is invoked with the current
//! instant from the UI loop and performs at most one fetch per call.

use std::time::{Duration, Instant};

use super::backoff::Backoff;
use super::transport::SnapshotSource;
use crate::core::config::PollConfig;
use crate::core::system_monitor::{HistoryStore, Snapshot};
use crate::error::HwError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Waiting { next_attempt: Instant },
    Fetching,
}

#[derive(Debug)]
pub enum PollOutcome {
    /// A fresh snapshot is available through [`Poller::latest`].
    Updated,
    /// The fetch failed; the previous snapshot is kept.
    Failed { error: HwError, retry_in: Duration },
}

pub struct Poller<T> {
    source: T,
    state: PollState,
    backoff: Backoff,
    history: HistoryStore,
    latest: Option<Snapshot>,
    last_error: Option<String>,
    last_success: Option<Instant>,
}

impl<T: SnapshotSource> Poller<T> {
    /// The first fetch is due at `now`.
    pub fn new(source: T, config: &PollConfig, now: Instant) -> Self {
        Self {
            source,
            state: PollState::Waiting { next_attempt: now },
            backoff: Backoff::new(config.floor, config.ceiling, config.growth),
            history: HistoryStore::with_capacity(config.history_capacity),
            latest: None,
            last_error: None,
            last_success: None,
        }
    }

    pub fn tick(&mut self, now: Instant) -> Option<PollOutcome> {
        match self.state {
            PollState::Waiting { next_attempt } if now < next_attempt => return None,
            PollState::Waiting { .. } => {}
            // Only reachable if a previous fetch unwound mid-call.
            PollState::Fetching => return None,
        }

        self.state = PollState::Fetching;
        let result = self.source.fetch();

        let outcome = match result {
            Ok(snapshot) => {
                self.history.record_snapshot(&snapshot);
                self.latest = Some(snapshot);
                self.last_error = None;
                self.last_success = Some(now);
                let delay = self.backoff.on_success();
                self.state = PollState::Waiting {
                    next_attempt: now + delay,
                };
                PollOutcome::Updated
            }
            Err(error) => {
                let retry_in = self.backoff.on_failure();
                log::warn!(
                    "Snapshot fetch failed ({} in a row), retrying in {:?}: {}",
                    self.backoff.failures(),
                    retry_in,
                    error
                );
                self.last_error = Some(error.to_string());
                self.state = PollState::Waiting {
                    next_attempt: now + retry_in,
                };
                PollOutcome::Failed { error, retry_in }
            }
        };

        Some(outcome)
    }

    /// Make the next attempt due immediately without touching the backoff.
    pub fn retry_now(&mut self, now: Instant) {
        if let PollState::Waiting { .. } = self.state {
            self.state = PollState::Waiting { next_attempt: now };
        }
    }

    pub fn time_until_next(&self, now: Instant) -> Duration {
        match self.state {
            PollState::Waiting { next_attempt } => next_attempt.saturating_duration_since(now),
            PollState::Fetching => Duration::ZERO,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_success(&self) -> Option<Instant> {
        self.last_success
    }

    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }
}
