//! Catalog validation and dense index assignment.
//!
//! The catalog ingests entry-point declarations, rejects inconsistent input
//! (duplicate names, dangling aliases, impossible gates), and assigns each
//! command a dense 0-based index within its scope. Indices are assigned in
//! declaration order and are contiguous, so dispatch tables can be plain
//! arrays. Once built, a catalog never changes.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::entrypoint::{EntryPoint, Gate, Scope};

/// A validated command with its assigned dense index.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInfo {
    pub name: String,
    pub gate: Gate,
    /// Dense 0-based index within the command's scope.
    pub index: u32,
}

/// A validated alias: a second lookup name for a command.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasInfo {
    pub name: String,
    /// Scope of the aliased command.
    pub scope: Scope,
    /// Dense index of the aliased command.
    pub index: u32,
}

/// Reasons a set of declarations cannot form a catalog.
///
/// All of these are programming or data errors in whatever produced the
/// declarations; none of them can be recovered into a usable table.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Two declarations share a name. Names are the key domain and must be
    /// globally unique across both scopes, commands and aliases alike.
    DuplicateName(String),
    /// An alias references a name that has not been declared.
    UnknownAliasTarget { alias: String, target: String },
    /// An alias references another alias. Aliases must resolve directly to
    /// a command.
    AliasOfAlias { alias: String, target: String },
    /// An extension gate with no extensions can never be satisfied.
    EmptyExtensionGate(String),
    /// A device-scope command gated on an instance-scope extension. The
    /// gate evaluation rules have no meaning for this combination.
    InstanceExtensionOnDeviceCommand { command: String, extension: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName(name) => {
                write!(f, "duplicate entry-point name '{}'", name)
            }
            Self::UnknownAliasTarget { alias, target } => {
                write!(f, "alias '{}' targets unknown entry point '{}'", alias, target)
            }
            Self::AliasOfAlias { alias, target } => {
                write!(f, "alias '{}' targets alias '{}'; aliases must target commands", alias, target)
            }
            Self::EmptyExtensionGate(name) => {
                write!(f, "entry point '{}' has an empty extension gate", name)
            }
            Self::InstanceExtensionOnDeviceCommand { command, extension } => {
                write!(
                    f,
                    "device entry point '{}' is gated on instance extension '{}'",
                    command, extension
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// The validated, immutable entry-point catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    instance: Vec<CommandInfo>,
    device: Vec<CommandInfo>,
    aliases: Vec<AliasInfo>,
}

impl Catalog {
    /// Validate a list of declarations and assign dense per-scope indices.
    ///
    /// Commands get the next free index in their scope, in declaration
    /// order. Aliases must target an already-declared command and inherit
    /// its scope and index.
    pub fn build(decls: Vec<EntryPoint>) -> Result<Catalog, CatalogError> {
        let mut instance = Vec::new();
        let mut device = Vec::new();
        let mut aliases = Vec::new();
        // name -> (scope, index, is_alias), covering every declared name
        let mut seen: FxHashMap<String, (Scope, u32, bool)> = FxHashMap::default();

        for decl in decls {
            match decl {
                EntryPoint::Command { name, scope, gate } => {
                    if seen.contains_key(&name) {
                        return Err(CatalogError::DuplicateName(name));
                    }
                    validate_gate(&name, scope, &gate)?;
                    let list = match scope {
                        Scope::Instance => &mut instance,
                        Scope::Device => &mut device,
                    };
                    let index = list.len() as u32;
                    seen.insert(name.clone(), (scope, index, false));
                    list.push(CommandInfo { name, gate, index });
                }
                EntryPoint::Alias { name, alias_of } => {
                    if seen.contains_key(&name) {
                        return Err(CatalogError::DuplicateName(name));
                    }
                    let Some(&(scope, index, is_alias)) = seen.get(&alias_of) else {
                        return Err(CatalogError::UnknownAliasTarget { alias: name, target: alias_of });
                    };
                    if is_alias {
                        return Err(CatalogError::AliasOfAlias { alias: name, target: alias_of });
                    }
                    seen.insert(name.clone(), (scope, index, true));
                    aliases.push(AliasInfo { name, scope, index });
                }
            }
        }

        Ok(Catalog { instance, device, aliases })
    }

    /// Commands in one scope, in dense index order.
    pub fn commands(&self, scope: Scope) -> &[CommandInfo] {
        match scope {
            Scope::Instance => &self.instance,
            Scope::Device => &self.device,
        }
    }

    /// Number of commands (dispatch slots) in one scope.
    pub fn count(&self, scope: Scope) -> usize {
        self.commands(scope).len()
    }

    /// All aliases, in declaration order.
    pub fn aliases(&self) -> &[AliasInfo] {
        &self.aliases
    }

    /// Every lookup name in one scope with the dense index it resolves to.
    ///
    /// Commands map to their own index; aliases map to their target's.
    /// This is exactly the input the name hash-table builder needs.
    pub fn names_in(&self, scope: Scope) -> impl Iterator<Item = (&str, u32)> {
        self.commands(scope)
            .iter()
            .map(|c| (c.name.as_str(), c.index))
            .chain(
                self.aliases
                    .iter()
                    .filter(move |a| a.scope == scope)
                    .map(|a| (a.name.as_str(), a.index)),
            )
    }
}

fn validate_gate(name: &str, scope: Scope, gate: &Gate) -> Result<(), CatalogError> {
    let Gate::Extensions(exts) = gate else {
        return Ok(());
    };
    if exts.is_empty() {
        return Err(CatalogError::EmptyExtensionGate(name.to_string()));
    }
    if scope == Scope::Device {
        if let Some(ext) = exts.iter().find(|e| e.scope == Scope::Instance) {
            return Err(CatalogError::InstanceExtensionOnDeviceCommand {
                command: name.to_string(),
                extension: ext.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::ExtensionRef;
    use crate::version::ApiVersion;

    fn command(name: &str, scope: Scope) -> EntryPoint {
        EntryPoint::Command {
            name: name.to_string(),
            scope,
            gate: Gate::Core(ApiVersion::new(1, 0)),
        }
    }

    fn alias(name: &str, target: &str) -> EntryPoint {
        EntryPoint::Alias {
            name: name.to_string(),
            alias_of: target.to_string(),
        }
    }

    #[test]
    fn dense_indices_per_scope() {
        let catalog = Catalog::build(vec![
            command("EnumerateAdapters", Scope::Instance),
            command("CreateDevice", Scope::Instance),
            command("GetQueue", Scope::Device),
            command("Submit", Scope::Device),
            command("WaitIdle", Scope::Device),
        ])
        .unwrap();

        assert_eq!(catalog.count(Scope::Instance), 2);
        assert_eq!(catalog.count(Scope::Device), 3);
        for (i, cmd) in catalog.commands(Scope::Device).iter().enumerate() {
            assert_eq!(cmd.index, i as u32);
        }
        assert_eq!(catalog.commands(Scope::Device)[1].name, "Submit");
    }

    #[test]
    fn alias_shares_target_index() {
        let catalog = Catalog::build(vec![
            command("GetQueue", Scope::Device),
            command("Submit", Scope::Device),
            alias("SubmitEXT", "Submit"),
        ])
        .unwrap();

        // The alias takes no dense index of its own.
        assert_eq!(catalog.count(Scope::Device), 2);
        let names: Vec<_> = catalog.names_in(Scope::Device).collect();
        assert!(names.contains(&("Submit", 1)));
        assert!(names.contains(&("SubmitEXT", 1)));
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = Catalog::build(vec![
            command("Submit", Scope::Device),
            command("Submit", Scope::Instance),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateName("Submit".to_string()));
    }

    #[test]
    fn alias_name_colliding_with_command_rejected() {
        let err = Catalog::build(vec![
            command("Submit", Scope::Device),
            command("Present", Scope::Device),
            alias("Present", "Submit"),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateName("Present".to_string()));
    }

    #[test]
    fn unknown_alias_target_rejected() {
        let err = Catalog::build(vec![alias("SubmitEXT", "Submit")]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownAliasTarget {
                alias: "SubmitEXT".to_string(),
                target: "Submit".to_string(),
            }
        );
    }

    #[test]
    fn alias_of_alias_rejected() {
        let err = Catalog::build(vec![
            command("Submit", Scope::Device),
            alias("SubmitEXT", "Submit"),
            alias("SubmitKHR", "SubmitEXT"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::AliasOfAlias {
                alias: "SubmitKHR".to_string(),
                target: "SubmitEXT".to_string(),
            }
        );
    }

    #[test]
    fn empty_extension_gate_rejected() {
        let err = Catalog::build(vec![EntryPoint::Command {
            name: "CreateSurface".to_string(),
            scope: Scope::Instance,
            gate: Gate::Extensions(vec![]),
        }])
        .unwrap_err();
        assert_eq!(err, CatalogError::EmptyExtensionGate("CreateSurface".to_string()));
    }

    #[test]
    fn instance_extension_cannot_gate_device_command() {
        let err = Catalog::build(vec![EntryPoint::Command {
            name: "PresentImage".to_string(),
            scope: Scope::Device,
            gate: Gate::Extensions(vec![ExtensionRef::new("surface", Scope::Instance)]),
        }])
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::InstanceExtensionOnDeviceCommand {
                command: "PresentImage".to_string(),
                extension: "surface".to_string(),
            }
        );
    }

    #[test]
    fn device_extension_may_gate_instance_command() {
        // Allowed: discovery-time queries treat device extensions as
        // universally available at instance scope.
        let catalog = Catalog::build(vec![EntryPoint::Command {
            name: "GetDeviceFeatures2".to_string(),
            scope: Scope::Instance,
            gate: Gate::Extensions(vec![ExtensionRef::new("features2", Scope::Device)]),
        }]);
        assert!(catalog.is_ok());
    }
}
