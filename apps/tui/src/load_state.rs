//! Idle → Loading → Success | Error, re-entered by explicit refresh.
//!
//! Only one request may be in flight: `Refresh` while `Loading` is rejected,
//! and completions arriving outside `Loading` are rejected as stale.

use std::fmt;

use thiserror::Error;

use crate::analysis::{AnalysisClient, AnalysisError};
use crate::domain::AnalysisResult;

/// Shown for every failed load, whatever the cause.
pub const LOAD_ERROR_MESSAGE: &str =
    "Failed to fetch analysis data. Please check your API key and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Success,
    Error,
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Success => write!(f, "Success"),
            Self::Error => write!(f, "Error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Success(AnalysisResult),
    Error(String),
}

impl LoadState {
    pub const fn phase(&self) -> LoadPhase {
        match self {
            Self::Idle => LoadPhase::Idle,
            Self::Loading => LoadPhase::Loading,
            Self::Success(_) => LoadPhase::Success,
            Self::Error(_) => LoadPhase::Error,
        }
    }
}

#[derive(Debug)]
pub enum LoadEvent {
    /// First display of the dashboard.
    Mount,
    /// User asked for a fresh analysis.
    Refresh,
    Resolved(AnalysisResult),
    Failed(AnalysisError),
}

impl LoadEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mount => "Mount",
            Self::Refresh => "Refresh",
            Self::Resolved(_) => "Resolved",
            Self::Failed(_) => "Failed",
        }
    }
}

impl fmt::Display for LoadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(result) => write!(f, "Resolved({} records)", result.data.len()),
            Self::Failed(err) => write!(f, "Failed({})", err.kind()),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl From<Result<AnalysisResult, AnalysisError>> for LoadEvent {
    fn from(outcome: Result<AnalysisResult, AnalysisError>) -> Self {
        match outcome {
            Ok(result) => Self::Resolved(result),
            Err(err) => Self::Failed(err),
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid transition from {from} with event {event}")]
pub struct TransitionError {
    pub from: LoadPhase,
    pub event: String,
}

// Helper struct for state transitions
struct NextState(LoadState);

impl TryFrom<(LoadPhase, LoadEvent)> for NextState {
    type Error = TransitionError;

    fn try_from(value: (LoadPhase, LoadEvent)) -> Result<Self, Self::Error> {
        let (current, event) = value;

        match (current, event) {
            (LoadPhase::Idle, LoadEvent::Mount)
            | (LoadPhase::Success | LoadPhase::Error, LoadEvent::Refresh) => {
                Ok(Self(LoadState::Loading))
            }
            (LoadPhase::Loading, LoadEvent::Resolved(result)) => Ok(Self(LoadState::Success(result))),
            (LoadPhase::Loading, LoadEvent::Failed(err)) => {
                tracing::warn!(kind = %err.kind(), error = %err, "analysis load failed");
                Ok(Self(LoadState::Error(LOAD_ERROR_MESSAGE.to_string())))
            }
            (from, event) => Err(TransitionError {
                from,
                event: event.to_string(),
            }),
        }
    }
}

/// Owns the current load state; the state is replaced on every transition.
#[derive(Debug, Default)]
pub struct LoadMachine {
    state: LoadState,
}

impl LoadMachine {
    pub const fn new() -> Self {
        Self {
            state: LoadState::Idle,
        }
    }

    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    pub const fn phase(&self) -> LoadPhase {
        self.state.phase()
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub const fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            LoadState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn process(&mut self, event: LoadEvent) -> Result<(), TransitionError> {
        let from = self.phase();
        let next = NextState::try_from((from, event))?;

        tracing::debug!(%from, to = %next.0.phase(), "load state transition");
        self.state = next.0;

        Ok(())
    }
}

/// Apply `trigger`, run one analysis request and apply its outcome.
pub async fn fetch_into(
    machine: &mut LoadMachine,
    client: &AnalysisClient,
    trigger: LoadEvent,
) -> Result<(), TransitionError> {
    machine.process(trigger)?;
    let outcome = client.fetch_energy_analysis().await;
    machine.process(outcome.into())
}
