pub mod parse;
pub mod types;

pub use parse::{decode_line, TraceDecoder, TraceError};
pub use types::{NodeId, TraceEvent};
