//! The assembled query surface.
//!
//! A [`Driver`] ties one catalog's name maps, gate tables, and dispatch
//! layout together and answers the three runtime questions: what index does
//! this name have, what implementation backs this index for this variant,
//! and does this index exist for this caller's negotiated state.

use std::fmt;

use strata_registry::{ApiVersion, Catalog, ExtensionSet, Scope};
use strata_tables::{BuildError, NameMap, StringMapBuilder};

use crate::gating::GateTable;
use crate::handle::Device;
use crate::layout::{DispatchLayout, Variant};
use crate::table::EntryFn;

/// Reasons a driver cannot be assembled.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverError {
    /// The name table builder rejected the catalog's names.
    Build(BuildError),
    /// The dispatch layout's slot count does not match the catalog.
    TableSize {
        scope: Scope,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build(err) => write!(f, "{}", err),
            Self::TableSize { scope, expected, actual } => write!(
                f,
                "{:?}-scope dispatch table has {} slots, catalog has {} commands",
                scope, actual, expected
            ),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<BuildError> for DriverError {
    fn from(err: BuildError) -> Self {
        Self::Build(err)
    }
}

/// One built API surface: name resolution, dispatch resolution, gating.
///
/// Constructed once during initialization; every query afterwards is a
/// read-only bounded computation.
#[derive(Debug)]
pub struct Driver {
    instance_map: NameMap,
    device_map: NameMap,
    instance_gates: GateTable,
    device_gates: GateTable,
    layout: DispatchLayout,
}

impl Driver {
    /// Assemble a driver from a validated catalog and a populated layout.
    ///
    /// The layout's slot counts must match the catalog's per-scope command
    /// counts; dense indices are shared between the two.
    pub fn new(catalog: &Catalog, layout: DispatchLayout) -> Result<Driver, DriverError> {
        for (scope, actual) in [
            (Scope::Instance, layout.instance_len()),
            (Scope::Device, layout.device_len()),
        ] {
            let expected = catalog.count(scope);
            if actual != expected {
                return Err(DriverError::TableSize { scope, expected, actual });
            }
        }

        Ok(Driver {
            instance_map: build_map(catalog, Scope::Instance)?,
            device_map: build_map(catalog, Scope::Device)?,
            instance_gates: GateTable::from_catalog(catalog, Scope::Instance),
            device_gates: GateTable::from_catalog(catalog, Scope::Device),
            layout,
        })
    }

    /// Resolve a name to its dense index within a scope.
    pub fn resolve_name(&self, scope: Scope, name: &str) -> Option<u32> {
        match scope {
            Scope::Instance => self.instance_map.lookup(name),
            Scope::Device => self.device_map.lookup(name),
        }
    }

    /// The instance-scope implementation at a dense index.
    pub fn resolve_instance(&self, index: u32) -> Option<EntryFn> {
        self.layout.resolve_instance(index)
    }

    /// The device-scope implementation at a dense index for one variant,
    /// with variant overrides falling back to the generic table.
    pub fn resolve_device(&self, index: u32, variant: Variant) -> Option<EntryFn> {
        self.layout.resolve_device(index, variant)
    }

    /// Whether an instance-scope index exists for the caller's negotiated
    /// version and enabled instance extensions.
    pub fn is_instance_enabled(
        &self,
        index: u32,
        core_version: ApiVersion,
        instance_extensions: &ExtensionSet,
    ) -> bool {
        self.instance_gates
            .instance_enabled(index, core_version, instance_extensions)
    }

    /// Whether a device-scope index exists. `None` for the device treats
    /// device extensions as enabled (discovery semantics).
    pub fn is_device_enabled(
        &self,
        index: u32,
        core_version: ApiVersion,
        device_extensions: Option<&ExtensionSet>,
    ) -> bool {
        self.device_gates
            .device_enabled(index, core_version, device_extensions)
    }

    /// Full name-to-implementation resolution: instance scope first, then
    /// device scope against the given variant.
    pub fn lookup_entrypoint(&self, variant: Variant, name: &str) -> Option<EntryFn> {
        if let Some(index) = self.instance_map.lookup(name) {
            return self.layout.resolve_instance(index);
        }
        if let Some(index) = self.device_map.lookup(name) {
            return self.layout.resolve_device(index, variant);
        }
        None
    }

    /// Create a device against a variant, snapshotting its dispatch table.
    pub fn create_device(&self, variant: Variant, extensions: ExtensionSet) -> Device {
        Device::new(&self.layout, variant, extensions)
    }

    pub fn layout(&self) -> &DispatchLayout {
        &self.layout
    }

    /// The built name map for a scope (for artifact emission).
    pub fn name_map(&self, scope: Scope) -> &NameMap {
        match scope {
            Scope::Instance => &self.instance_map,
            Scope::Device => &self.device_map,
        }
    }
}

/// Feed every lookup name of one scope (commands and aliases) into the
/// string-map builder.
fn build_map(catalog: &Catalog, scope: Scope) -> Result<NameMap, BuildError> {
    let mut builder = StringMapBuilder::new();
    for (name, num) in catalog.names_in(scope) {
        builder.add(name, num);
    }
    builder.bake()
}
