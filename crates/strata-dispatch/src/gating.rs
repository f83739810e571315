//! Gate evaluation: does an entry point exist for this caller?
//!
//! Each dense index has exactly one gate: a minimum core version or a
//! disjunction of extensions. Version gates short-circuit; extension gates
//! pass if any listed extension counts as enabled for the query:
//!
//! - Instance-scope query: instance extensions count if the caller enabled
//!   them; device extensions always count, so callers can discover
//!   device-extension entry points before any device exists.
//! - Device-scope query with no concrete device: device extensions are
//!   likewise assumed enabled.
//! - Device-scope query with a concrete device: only extensions actually
//!   enabled on that device count.
//!
//! The assume-enabled policy is deliberate; it models "list as available"
//! discovery semantics and must not be tightened.

use strata_registry::{ApiVersion, Catalog, ExtensionSet, Gate, Scope};

/// Per-index gates for one scope, in dense index order.
#[derive(Debug, Clone)]
pub struct GateTable {
    scope: Scope,
    gates: Vec<Gate>,
}

impl GateTable {
    /// Snapshot one scope's gates from a validated catalog.
    pub fn from_catalog(catalog: &Catalog, scope: Scope) -> Self {
        Self {
            scope,
            gates: catalog.commands(scope).iter().map(|c| c.gate.clone()).collect(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Evaluate an instance-scope gate.
    ///
    /// An index outside the table is simply not an entry point: false.
    pub fn instance_enabled(
        &self,
        index: u32,
        core_version: ApiVersion,
        instance_extensions: &ExtensionSet,
    ) -> bool {
        debug_assert_eq!(self.scope, Scope::Instance);
        match self.gates.get(index as usize) {
            None => false,
            Some(Gate::Core(required)) => *required <= core_version,
            Some(Gate::Extensions(exts)) => exts.iter().any(|ext| match ext.scope {
                Scope::Instance => instance_extensions.contains(&ext.name),
                // Device extensions are assumed enabled at instance scope.
                Scope::Device => true,
            }),
        }
    }

    /// Evaluate a device-scope gate.
    ///
    /// With `device_extensions == None` every device extension is assumed
    /// enabled (discovery before a device exists).
    pub fn device_enabled(
        &self,
        index: u32,
        core_version: ApiVersion,
        device_extensions: Option<&ExtensionSet>,
    ) -> bool {
        debug_assert_eq!(self.scope, Scope::Device);
        match self.gates.get(index as usize) {
            None => false,
            Some(Gate::Core(required)) => *required <= core_version,
            Some(Gate::Extensions(exts)) => exts.iter().any(|ext| match ext.scope {
                Scope::Device => device_extensions.map_or(true, |set| set.contains(&ext.name)),
                // The catalog rejects this combination at build time.
                Scope::Instance => {
                    unreachable!("device entry point gated on instance extension")
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_registry::{EntryPoint, ExtensionRef};

    fn catalog() -> Catalog {
        Catalog::build(vec![
            EntryPoint::Command {
                name: "EnumerateAdapters".to_string(),
                scope: Scope::Instance,
                gate: Gate::Core(ApiVersion::new(2, 0)),
            },
            EntryPoint::Command {
                name: "CreateSurface".to_string(),
                scope: Scope::Instance,
                gate: Gate::Extensions(vec![ExtensionRef::new("surface", Scope::Instance)]),
            },
            EntryPoint::Command {
                name: "GetPresentModes".to_string(),
                scope: Scope::Instance,
                gate: Gate::Extensions(vec![ExtensionRef::new("swapchain", Scope::Device)]),
            },
            EntryPoint::Command {
                name: "Submit".to_string(),
                scope: Scope::Device,
                gate: Gate::Core(ApiVersion::new(1, 0)),
            },
            EntryPoint::Command {
                name: "PresentImage".to_string(),
                scope: Scope::Device,
                gate: Gate::Extensions(vec![ExtensionRef::new("swapchain", Scope::Device)]),
            },
        ])
        .unwrap()
    }

    fn tables() -> (GateTable, GateTable) {
        let catalog = catalog();
        (
            GateTable::from_catalog(&catalog, Scope::Instance),
            GateTable::from_catalog(&catalog, Scope::Device),
        )
    }

    #[test]
    fn core_version_gate() {
        let (instance, _) = tables();
        let none = ExtensionSet::new();
        // EnumerateAdapters requires core 2.0.
        assert!(instance.instance_enabled(0, ApiVersion::new(2, 1), &none));
        assert!(instance.instance_enabled(0, ApiVersion::new(2, 0), &none));
        assert!(!instance.instance_enabled(0, ApiVersion::new(1, 1), &none));
    }

    #[test]
    fn instance_extension_gate() {
        let (instance, _) = tables();
        let with: ExtensionSet = ["surface"].into_iter().collect();
        let without = ExtensionSet::new();
        assert!(instance.instance_enabled(1, ApiVersion::new(1, 0), &with));
        assert!(!instance.instance_enabled(1, ApiVersion::new(9, 9), &without));
    }

    #[test]
    fn device_extension_assumed_enabled_at_instance_scope() {
        let (instance, _) = tables();
        // GetPresentModes is gated on a device extension: enabled for
        // discovery even with nothing enabled on the instance.
        assert!(instance.instance_enabled(2, ApiVersion::new(1, 0), &ExtensionSet::new()));
    }

    #[test]
    fn device_gate_without_concrete_device() {
        let (_, device) = tables();
        assert!(device.device_enabled(1, ApiVersion::new(1, 0), None));
    }

    #[test]
    fn device_gate_with_concrete_device() {
        let (_, device) = tables();
        let with: ExtensionSet = ["swapchain"].into_iter().collect();
        let without = ExtensionSet::new();
        assert!(device.device_enabled(1, ApiVersion::new(1, 0), Some(&with)));
        assert!(!device.device_enabled(1, ApiVersion::new(1, 0), Some(&without)));
    }

    #[test]
    fn out_of_range_index_is_disabled() {
        let (instance, device) = tables();
        assert!(!instance.instance_enabled(99, ApiVersion::new(9, 9), &ExtensionSet::new()));
        assert!(!device.device_enabled(99, ApiVersion::new(9, 9), None));
    }
}
