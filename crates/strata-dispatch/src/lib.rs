//! Layered function-pointer dispatch for Strata entry points.
//!
//! Every entry point resolves to one slot in a fixed-size table. Instance
//! scope has a single table; device scope has one generic table plus one
//! table per hardware variant, with per-variant slots overriding generic
//! ones. Each created device snapshots its resolved table once, at
//! creation, so calls through child objects reach the right variant without
//! the caller knowing which variant the device was created against.
//!
//! All tables are built before first use and never mutated after; lookups
//! and resolution are synchronization-free reads.
//!
//! ## Modules
//!
//! - [`table`]: slot arrays and the uniform entry-point signature
//! - [`layout`]: the per-scope, per-variant table set and override resolution
//! - [`handle`]: instance/device/child objects and the trampoline routing
//! - [`gating`]: version/extension gate evaluation
//! - [`driver`]: the assembled query surface

pub mod driver;
pub mod gating;
pub mod handle;
pub mod layout;
pub mod table;

pub use driver::{Driver, DriverError};
pub use gating::GateTable;
pub use handle::{route_device_call, CommandBuffer, Device, Handle, Instance, Queue};
pub use layout::{DispatchLayout, Variant};
pub use table::{DispatchTable, EntryFn};
