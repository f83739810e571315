//! Name hash-table builder and runtime resolver for Strata entry points.
//!
//! Entry-point lookup (`resolve_name`) runs on every `GetProcAddr`-style
//! query, so names are resolved through a static open-addressed hash table
//! built once per scope: a sorted, null-separated string blob, one
//! `{offset, hash, num}` record per name, and a power-of-two probe array.
//! The same hash function and probe stride are used at build time and at
//! lookup time; the table is sized so it can never fill, which makes an
//! empty slot a proof of absence.
//!
//! ## Modules
//!
//! - [`strmap`]: the builder ([`StringMapBuilder`]) and the resolver ([`NameMap`])
//! - [`artifact`]: the serializable persisted layout and stats rendering

pub mod artifact;
pub mod strmap;

pub use artifact::{stats_report, ScopeArtifact, StatsReport};
pub use strmap::{hash_name, BuildError, MapEntry, NameMap, StringMapBuilder};
pub use strmap::{EMPTY_SLOT, PRIME_FACTOR, PRIME_STEP};
