pub mod model;
pub mod oracle;
pub mod policy;
pub mod state;
pub mod topology;

pub use model::AttackerModel;
pub use oracle::{OracleError, SourceOracle, SourceSet};
pub use policy::PursuitPolicy;
pub use state::{Attacker, AttackerError, AttackerState};
pub use topology::Topology;
