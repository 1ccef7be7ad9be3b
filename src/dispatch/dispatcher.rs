use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::capability::{ClearCapability, RemovalOptions};
use super::outcome::Outcome;
use crate::categories::Category;
use crate::origin::Origin;
use crate::session::Scope;

/// Where a dispatcher is in its single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    /// Waiting on the capability for category `index` of `total`
    Dispatching { index: usize, total: usize },
    Done { total: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("a run has already been started on this dispatcher ({state:?})")]
    AlreadyRan { state: DispatchState },

    #[error("site scope needs an origin to clear")]
    MissingOrigin,
}

/// Progress signal emitted before each category is cleared
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Zero-based position of `category` in the run
    pub index: usize,
    pub total: usize,
    pub category: Category,
}

impl Progress {
    pub fn message(&self) -> String {
        format!("Nuking {}…", self.category.name)
    }
}

/// Receives progress signals during a run
pub trait ProgressSink {
    fn on_progress(&self, progress: &Progress);
}

impl<F: Fn(&Progress)> ProgressSink for F {
    fn on_progress(&self, progress: &Progress) {
        self(progress)
    }
}

/// Ignores all progress signals
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _progress: &Progress) {}
}

/// Clears categories one at a time through a [`ClearCapability`].
///
/// A dispatcher runs once: `Idle → Dispatching → Done`. Category `i + 1`
/// is only started after category `i` has an outcome, and a failing
/// category never stops the run.
pub struct Dispatcher<'a> {
    capability: &'a dyn ClearCapability,
    state: DispatchState,
    step_delay: Duration,
}

impl<'a> Dispatcher<'a> {
    pub fn new(capability: &'a dyn ClearCapability) -> Self {
        Self {
            capability,
            state: DispatchState::Idle,
            step_delay: Duration::ZERO,
        }
    }

    /// Pause after each category, for a UI that wants each step visible
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Clear `categories` in order and return one outcome per category.
    ///
    /// An empty list returns immediately without touching the capability
    /// or the dispatcher's state.
    pub async fn run(
        &mut self,
        categories: &[Category],
        scope: Scope,
        origin: Option<&Origin>,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<Outcome>, DispatchError> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }
        if self.state != DispatchState::Idle {
            return Err(DispatchError::AlreadyRan { state: self.state });
        }
        let options =
            RemovalOptions::for_scope(scope, origin).ok_or(DispatchError::MissingOrigin)?;

        let total = categories.len();
        info!(%scope, total, "starting clear run");
        let mut outcomes = Vec::with_capacity(total);

        for (index, category) in categories.iter().enumerate() {
            self.state = DispatchState::Dispatching { index, total };
            progress.on_progress(&Progress {
                index,
                total,
                category: *category,
            });
            debug!(category = %category.id, index, total, "clearing");

            let outcome = match self.capability.remove(&options, category.data_types).await {
                Ok(()) => Outcome::succeeded(*category),
                Err(e) => {
                    warn!(category = %category.id, error = %e, "clear failed");
                    Outcome::failed(*category, e.message())
                }
            };
            outcomes.push(outcome);

            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
        }

        self.state = DispatchState::Done { total };
        info!(
            cleared = outcomes.iter().filter(|o| o.success).count(),
            total,
            "clear run finished"
        );
        Ok(outcomes)
    }
}
