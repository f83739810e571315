//! The normalized entry-point record.
//!
//! Each entry point is either a command (a real implementation slot with a
//! scope and a gate) or an alias that resolves to a previously declared
//! command. Aliases contribute their name to the lookup table but never get
//! a dense index or dispatch slot of their own.

use serde::{Deserialize, Serialize};

use crate::extension::ExtensionRef;
use crate::version::ApiVersion;

/// Which dispatch universe an entry point belongs to.
///
/// Instance-scope entry points operate on the implementation-wide context;
/// device-scope entry points operate on a created device (or one of its
/// child objects) and route through per-device dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Instance,
    Device,
}

/// The condition under which an entry point exists for a caller.
///
/// Exactly one gate per command: either a minimum core version, or a
/// non-empty disjunction of extensions (any one enabled suffices).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    /// Present once the negotiated core version reaches this version.
    Core(ApiVersion),
    /// Present when at least one of these extensions is enabled.
    Extensions(Vec<ExtensionRef>),
}

/// One entry-point declaration from the normalized catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryPoint {
    /// A second name for an already-declared command. Shares the target's
    /// dense index and implementation.
    Alias { name: String, alias_of: String },
    /// A real command with its own dispatch slot.
    Command { name: String, scope: Scope, gate: Gate },
}

impl EntryPoint {
    /// The declared name, for either kind.
    pub fn name(&self) -> &str {
        match self {
            EntryPoint::Alias { name, .. } => name,
            EntryPoint::Command { name, .. } => name,
        }
    }
}
