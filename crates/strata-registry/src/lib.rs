//! Normalized entry-point catalog for the Strata dispatch tables.
//!
//! This crate holds the immutable description of the API surface that the
//! table builders consume: which entry points exist, which scope they
//! dispatch on, which core version or extensions gate them, and which names
//! are aliases of other entry points.
//!
//! ## Modules
//!
//! - [`version`]: API versions with the packed-u32 ordering used by gating
//! - [`extension`]: extension references and enabled-extension sets
//! - [`entrypoint`]: the normalized entry-point record (scope, gate, alias)
//! - [`catalog`]: validation and dense per-scope index assignment
//! - [`load`]: the serde model for a normalized catalog document
//!
//! Parsing a raw API registry document into these records is a separate
//! concern; this crate starts from the normalized form.

pub mod catalog;
pub mod entrypoint;
pub mod extension;
pub mod load;
pub mod version;

pub use catalog::{AliasInfo, Catalog, CatalogError, CommandInfo};
pub use entrypoint::{EntryPoint, Gate, Scope};
pub use extension::{ExtensionRef, ExtensionSet};
pub use load::CatalogDocument;
pub use version::{ApiVersion, ParseVersionError};
