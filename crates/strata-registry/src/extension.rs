//! Extension references and enabled-extension sets.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::entrypoint::Scope;

/// A reference to an extension from an entry point's gate.
///
/// The scope records which namespace the extension lives in: instance
/// extensions are negotiated once per connection, device extensions per
/// created device. Gating treats the two differently (see the dispatch
/// crate's gate evaluation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRef {
    pub name: String,
    pub scope: Scope,
}

impl ExtensionRef {
    pub fn new(name: impl Into<String>, scope: Scope) -> Self {
        Self { name: name.into(), scope }
    }
}

/// The set of extensions a caller has enabled.
///
/// One of these exists per instance and one per device; gate evaluation
/// only ever queries membership.
#[derive(Debug, Clone, Default)]
pub struct ExtensionSet {
    names: FxHashSet<String>,
}

impl ExtensionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an extension as enabled.
    pub fn enable(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Whether the named extension is enabled.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExtensionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
