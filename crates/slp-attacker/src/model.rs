//! Named attacker models, as they appear in run configuration and result
//! tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::policy::PursuitPolicy;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown attacker model '{name}' (available: {available})")]
pub struct UnknownModel {
    pub name: String,
    pub available: String,
}

/// Which pursuit rule an attacker follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackerModel {
    /// Always step toward the last sender heard at the current position.
    #[serde(rename = "memoryless", alias = "BasicReactiveAttacker")]
    Memoryless,
    /// Never step straight back to the position just left.
    #[serde(
        rename = "oscillation-guarded",
        alias = "IgnorePreviousLocationReactiveAttacker"
    )]
    OscillationGuarded,
    /// Only react to strictly newer sequence numbers per message type.
    #[default]
    #[serde(rename = "seqno-guarded", alias = "SeqNoReactiveAttacker")]
    SeqNoGuarded,
}

impl AttackerModel {
    /// Every available model, in registry order.
    pub const ALL: [AttackerModel; 3] = [
        AttackerModel::Memoryless,
        AttackerModel::OscillationGuarded,
        AttackerModel::SeqNoGuarded,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AttackerModel::Memoryless => "memoryless",
            AttackerModel::OscillationGuarded => "oscillation-guarded",
            AttackerModel::SeqNoGuarded => "seqno-guarded",
        }
    }

    /// Name used for this model in published result tables.
    pub fn legacy_name(self) -> &'static str {
        match self {
            AttackerModel::Memoryless => "BasicReactiveAttacker",
            AttackerModel::OscillationGuarded => "IgnorePreviousLocationReactiveAttacker",
            AttackerModel::SeqNoGuarded => "SeqNoReactiveAttacker",
        }
    }

    /// Fresh policy with empty memory, one per attacker instance.
    pub fn policy(self) -> PursuitPolicy {
        match self {
            AttackerModel::Memoryless => PursuitPolicy::Memoryless,
            AttackerModel::OscillationGuarded => PursuitPolicy::OscillationGuarded,
            AttackerModel::SeqNoGuarded => PursuitPolicy::seq_no_guarded(),
        }
    }
}

impl fmt::Display for AttackerModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttackerModel {
    type Err = UnknownModel;

    /// Accepts either naming scheme, with or without a trailing `()`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_suffix("()").unwrap_or(trimmed);
        AttackerModel::ALL
            .into_iter()
            .find(|model| model.name() == bare || model.legacy_name() == bare)
            .ok_or_else(|| UnknownModel {
                name: s.to_string(),
                available: AttackerModel::ALL
                    .iter()
                    .map(|m| m.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
