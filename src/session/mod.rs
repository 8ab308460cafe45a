//! The single current-result slot and the one-request-at-a-time gate.
//!
//! `Session` owns the provider and a watch channel holding the current
//! [`SessionState`]. Observers subscribe to the channel; the only writer is
//! [`Session::generate`].

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::errors::PlanError;
use crate::plan::{self, AgentStep, Generation};
use crate::prompt;
use crate::provider::Provider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// A request is outstanding. `steps` is filled in during the reveal
    /// delay, before the plan is published.
    InFlight { steps: Option<Vec<AgentStep>> },
    Success(Generation),
    Failed(PlanError),
}

impl SessionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SessionState::InFlight { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyPreferences,
    Busy,
}

/// What a call to [`Session::generate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Nothing was sent and the state was left untouched.
    Rejected(RejectReason),
    /// The request ran to completion; the same outcome is in the state slot.
    Completed {
        prompt: String,
        raw: Option<String>,
        outcome: Result<Generation, PlanError>,
    },
}

pub struct Session<P> {
    provider: P,
    reveal_delay: Duration,
    state: watch::Sender<SessionState>,
}

impl<P: Provider> Session<P> {
    pub fn new(provider: P, reveal_delay: Duration) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self { provider, reveal_delay, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Run one generation for `preferences`.
    ///
    /// Blank preferences and calls made while another request is
    /// outstanding are no-ops. Errors never escape: they land in the state
    /// slot as `Failed` and are echoed in the returned `Submission`.
    pub async fn generate(&self, preferences: &str) -> Submission {
        if preferences.trim().is_empty() {
            debug!("ignoring request with empty preferences");
            return Submission::Rejected(RejectReason::EmptyPreferences);
        }

        let claimed = self.state.send_if_modified(|s| {
            if s.is_in_flight() {
                false
            } else {
                *s = SessionState::InFlight { steps: None };
                true
            }
        });
        if !claimed {
            debug!("ignoring request while another is in flight");
            return Submission::Rejected(RejectReason::Busy);
        }
        let mut guard = InFlightGuard { state: &self.state, armed: true };

        let prompt = prompt::build(preferences);
        info!(prompt_bytes = prompt.len(), "requesting meal plan");

        let (raw, outcome) = match self.provider.generate(&prompt).await {
            Ok(text) => {
                let outcome = plan::interpret(&text);
                (Some(text), outcome)
            }
            Err(e) => (None, Err(e)),
        };

        match &outcome {
            Ok(generation) => {
                info!(
                    steps = generation.steps.len(),
                    days = generation.plan.len(),
                    "meal plan ready"
                );
                if !self.reveal_delay.is_zero() {
                    self.state.send_replace(SessionState::InFlight {
                        steps: Some(generation.steps.clone()),
                    });
                    tokio::time::sleep(self.reveal_delay).await;
                }
                self.state.send_replace(SessionState::Success(generation.clone()));
            }
            Err(e) => {
                warn!(error = %e, "generation failed");
                self.state.send_replace(SessionState::Failed(e.clone()));
            }
        }
        guard.armed = false;

        Submission::Completed { prompt, raw, outcome }
    }
}

/// Reopens the gate when a `generate` future is dropped mid-request.
struct InFlightGuard<'a> {
    state: &'a watch::Sender<SessionState>,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("request dropped before completion");
            self.state
                .send_replace(SessionState::Failed(PlanError::Transport("request cancelled".into())));
        }
    }
}
