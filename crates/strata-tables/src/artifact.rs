//! The persisted table layout and build diagnostics.
//!
//! A [`ScopeArtifact`] is the bit-relevant state of one scope's name map:
//! the sorted blob, the per-name records, and the probe array with its
//! `0xffff` empty sentinel. Consumers that embed the table elsewhere (or
//! diff generator output across registry revisions) read this form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::strmap::{MapEntry, NameMap};

/// The serializable layout of one scope's name map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeArtifact {
    /// All names, sorted, null-separated.
    pub strings: String,
    /// Per-name `{offset, hash, num}` records in sorted (blob) order.
    pub entries: Vec<MapEntry>,
    /// The probe array; `0xffff` marks an empty slot, any other value is a
    /// position in `entries`.
    pub map: Vec<u16>,
    /// Probe array length (a power of two).
    pub size: u32,
    /// `size - 1`; home slot is `hash & mask`.
    pub mask: u32,
    /// Insertion-depth histogram (depth 9 bucket counts deeper chains too).
    pub collisions: [u32; 10],
}

impl ScopeArtifact {
    /// Capture a baked map's layout.
    pub fn from_map(map: &NameMap) -> Self {
        let size = map.table_size() as u32;
        Self {
            strings: map.strings().to_string(),
            entries: map.entries().to_vec(),
            map: map.table().to_vec(),
            size,
            mask: size - 1,
            collisions: *map.collisions(),
        }
    }
}

/// Lazily rendered hash-table statistics for one scope.
///
/// Rendered the way the generator reports them: entry count, table size,
/// and the insertion-depth histogram.
pub struct StatsReport<'a> {
    label: &'a str,
    map: &'a NameMap,
}

/// Statistics for one scope's map, printable with `{}`.
pub fn stats_report<'a>(label: &'a str, map: &'a NameMap) -> StatsReport<'a> {
    StatsReport { label, map }
}

impl fmt::Display for StatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} string map: {} entries, table size {}",
            self.label,
            self.map.len(),
            self.map.table_size()
        )?;
        writeln!(f, "collision depth:")?;
        for (depth, count) in self.map.collisions().iter().enumerate() {
            if depth == 9 {
                writeln!(f, "  9+  {}", count)?;
            } else {
                writeln!(f, "  {}   {}", depth, count)?;
            }
        }
        Ok(())
    }
}
