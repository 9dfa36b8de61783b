//! Continuation decision for the host simulation loop.
//!
//! The coordinator owns every attacker of a run and delivers each trace
//! event to them in registration order. After every step the host asks
//! [`Coordinator::should_continue`]; once any attacker has reached a source
//! or the safety period has elapsed the run is stopped for good.

use serde::{Deserialize, Serialize};
use slp_attacker::{Attacker, AttackerError, SourceOracle};
use slp_trace::TraceEvent;
use tracing::info;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    SourceFound,
    SafetyPeriodElapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Terminal.
    Stopped(StopReason),
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Run already stopped ({0:?}); no further events may be delivered")]
    AlreadyStopped(StopReason),

    #[error("Attacker error: {0}")]
    Attacker(#[from] AttackerError),
}

/// Owns the attackers of one run and decides when the run ends.
#[derive(Debug)]
pub struct Coordinator {
    /// Registration order is delivery order.
    attackers: Vec<Attacker>,
    /// Deadline in simulated seconds, if any.
    safety_period: Option<f64>,
    state: RunState,
}

impl Coordinator {
    pub fn new(safety_period: Option<f64>) -> Self {
        Self {
            attackers: Vec::new(),
            safety_period,
            state: RunState::Running,
        }
    }

    /// Add an attacker; events reach attackers in the order they were
    /// registered. Returns the attacker's index.
    pub fn register(&mut self, attacker: Attacker) -> usize {
        self.attackers.push(attacker);
        self.attackers.len() - 1
    }

    pub fn attackers(&self) -> &[Attacker] {
        &self.attackers
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn safety_period(&self) -> Option<f64> {
        self.safety_period
    }

    pub fn any_found(&self) -> bool {
        self.attackers.iter().any(Attacker::found_source)
    }

    pub fn deadline_exceeded(&self, now: f64) -> bool {
        self.safety_period.is_some_and(|deadline| now >= deadline)
    }

    /// Whether the host should keep stepping the simulation at time `now`.
    ///
    /// A reached source wins over an elapsed deadline when both hold.
    pub fn should_continue(&mut self, now: f64) -> bool {
        if let RunState::Stopped(_) = self.state {
            return false;
        }

        let reason = if self.any_found() {
            StopReason::SourceFound
        } else if self.deadline_exceeded(now) {
            StopReason::SafetyPeriodElapsed
        } else {
            return true;
        };

        info!(?reason, time = now, "run stopped");
        self.state = RunState::Stopped(reason);
        false
    }

    /// Hand `event` to every attacker. Returns how many of them moved.
    pub fn deliver(
        &mut self,
        event: &TraceEvent,
        oracle: &dyn SourceOracle,
    ) -> Result<usize, RunError> {
        if let RunState::Stopped(reason) = self.state {
            return Err(RunError::AlreadyStopped(reason));
        }

        let mut moved = 0;
        for attacker in &mut self.attackers {
            if attacker.observe(event, oracle)?.is_some() {
                moved += 1;
            }
        }
        Ok(moved)
    }
}
