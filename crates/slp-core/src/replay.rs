//! Deterministic host loop that replays a recorded observation trace.
//!
//! Stands in for the packet-level simulator's step loop: simulated time is
//! advanced to each event's timestamp, scheduled source changes are applied,
//! the continuation predicate is consulted, and only then is the event
//! delivered to the attackers.

use std::collections::VecDeque;

use slp_attacker::{Attacker, AttackerError, SourceSet, Topology};
use slp_trace::{TraceDecoder, TraceError};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, SimulationConfig, SourceChange};
use crate::coordinator::{Coordinator, RunError, RunState};
use crate::summary::{AttackerSummary, RunSummary};

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),

    #[error("Attacker error: {0}")]
    Attacker(#[from] AttackerError),

    #[error("Run error: {0}")]
    Run(#[from] RunError),

    #[error("Event at {time}s arrived after simulated time {now}s")]
    OutOfOrder { now: f64, time: f64 },
}

/// Replays one recorded trace against the configured attackers.
pub struct Simulation {
    decoder: TraceDecoder,
    topology: Topology,
    /// Live source set; the attackers query it on every move.
    sources: SourceSet,
    coordinator: Coordinator,
    /// Source changes not yet due, earliest first.
    pending_changes: VecDeque<SourceChange>,
    /// Current simulated time in seconds. Never passes the safety period.
    clock: f64,
    events_processed: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let decoder = TraceDecoder::new(config.ticks_per_second)?;
        let topology = config.topology();
        let sources = SourceSet::new(config.sources.iter().copied());
        for source in sources.sources().filter(|s| !topology.contains(*s)) {
            warn!(%source, "source is not part of the topology");
        }

        let mut coordinator = Coordinator::new(config.safety_period);
        for attacker in &config.attackers {
            coordinator.register(Attacker::new(
                attacker.model,
                attacker.start,
                &topology,
                &sources,
            )?);
        }

        let mut mobility = config.mobility;
        mobility.sort_by(|a, b| a.at.total_cmp(&b.at));

        Ok(Self {
            decoder,
            topology,
            sources,
            coordinator,
            pending_changes: mobility.into(),
            clock: 0.0,
            events_processed: 0,
        })
    }

    /// Replay `lines` until the trace ends or the run stops.
    pub fn run<I, S>(&mut self, lines: I) -> Result<RunSummary, SimulationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            if !self.step(line.as_ref())? {
                break;
            }
        }
        self.coordinator.should_continue(self.clock);

        let summary = self.summary();
        info!(
            captured = summary.captured,
            stop_reason = ?summary.stop_reason,
            elapsed = summary.elapsed,
            events = summary.events_processed,
            "run finished"
        );
        Ok(summary)
    }

    /// Process one raw observation line. Returns whether the run continues.
    pub fn step(&mut self, line: &str) -> Result<bool, SimulationError> {
        let event = self.decoder.decode(line)?;
        if !self.advance_to(event.time)? {
            return Ok(false);
        }

        self.coordinator.deliver(&event, &self.sources)?;
        self.events_processed += 1;
        Ok(self.coordinator.should_continue(self.clock))
    }

    /// Advance simulated time without delivering an event. Returns whether
    /// the run continues at the new time.
    ///
    /// A jump across the safety period is checked at the deadline itself,
    /// so a stopped run never reports a time past it.
    pub fn advance_to(&mut self, time: f64) -> Result<bool, SimulationError> {
        if time < self.clock {
            return Err(SimulationError::OutOfOrder {
                now: self.clock,
                time,
            });
        }
        if let RunState::Stopped(_) = self.coordinator.state() {
            return Ok(false);
        }

        if let Some(deadline) = self.coordinator.safety_period() {
            if self.clock <= deadline && deadline < time {
                self.set_clock(deadline);
                if !self.coordinator.should_continue(self.clock) {
                    return Ok(false);
                }
            }
        }

        self.set_clock(time);
        Ok(self.coordinator.should_continue(self.clock))
    }

    fn set_clock(&mut self, time: f64) {
        self.clock = time;
        while self
            .pending_changes
            .front()
            .is_some_and(|change| change.at <= self.clock)
        {
            if let Some(change) = self.pending_changes.pop_front() {
                debug!(at = change.at, sources = ?change.sources, "source set changed");
                self.sources.replace(change.sources);
            }
        }
    }

    pub fn summary(&self) -> RunSummary {
        let stop_reason = match self.coordinator.state() {
            RunState::Running => None,
            RunState::Stopped(reason) => Some(reason),
        };
        RunSummary {
            captured: self.coordinator.any_found(),
            stop_reason,
            elapsed: self.clock,
            events_processed: self.events_processed,
            attackers: self
                .coordinator
                .attackers()
                .iter()
                .map(AttackerSummary::from)
                .collect(),
        }
    }

    /// Release the source set; later found checks fail.
    pub fn tear_down(&mut self) {
        self.sources.tear_down();
    }

    pub fn elapsed(&self) -> f64 {
        self.clock
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// Direct access for drivers that move sources themselves.
    pub fn sources_mut(&mut self) -> &mut SourceSet {
        &mut self.sources
    }
}
