pub mod config;
pub mod coordinator;
pub mod replay;
pub mod summary;

pub use config::{AttackerConfig, ConfigError, SimulationConfig, SourceChange};
pub use coordinator::{Coordinator, RunError, RunState, StopReason};
pub use replay::{Simulation, SimulationError};
pub use summary::{AttackerSummary, RunSummary};
