//! The per-scope, per-variant table set.

use crate::table::{DispatchTable, EntryFn};

/// A hardware/implementation variant, dense from 0.
///
/// The variant universe is fixed when the layout is built; a device is
/// created against exactly one variant and keeps it for life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant(pub u8);

/// All dispatch tables for one built API surface.
///
/// Instance scope has a single table. Device scope has a generic table
/// (implementations valid for every variant) and one override table per
/// variant. Populated during a construction phase, read-only afterwards.
#[derive(Debug, Clone)]
pub struct DispatchLayout {
    instance: DispatchTable,
    device_generic: DispatchTable,
    device_variants: Vec<DispatchTable>,
}

impl DispatchLayout {
    /// Create an all-absent layout for the given slot counts and variant
    /// universe.
    pub fn new(instance_len: usize, device_len: usize, variant_count: usize) -> Self {
        Self {
            instance: DispatchTable::new(instance_len),
            device_generic: DispatchTable::new(device_len),
            device_variants: vec![DispatchTable::new(device_len); variant_count],
        }
    }

    pub fn instance_len(&self) -> usize {
        self.instance.len()
    }

    pub fn device_len(&self) -> usize {
        self.device_generic.len()
    }

    pub fn variant_count(&self) -> usize {
        self.device_variants.len()
    }

    /// Install the instance-scope implementation at a dense index.
    pub fn set_instance(&mut self, index: u32, f: EntryFn) {
        self.instance.set(index, f);
    }

    /// Install the variant-independent device implementation at a dense
    /// index. This is the fallback when no variant overrides the slot.
    pub fn set_device_generic(&mut self, index: u32, f: EntryFn) {
        self.device_generic.set(index, f);
    }

    /// Install a variant's override at a dense index.
    pub fn set_device_variant(&mut self, variant: Variant, index: u32, f: EntryFn) {
        self.variant_table_mut(variant).set(index, f);
    }

    /// The instance-scope implementation at a dense index.
    pub fn resolve_instance(&self, index: u32) -> Option<EntryFn> {
        self.instance.get(index)
    }

    /// The device-scope implementation for one variant: the variant's own
    /// slot if it provides one, otherwise the generic slot. An absent slot
    /// in both tables resolves to `None` -- the entry point simply has no
    /// implementation.
    ///
    /// Called once per slot at device creation to populate that device's
    /// private table.
    ///
    /// # Panics
    ///
    /// Panics if `variant` is outside the layout's variant universe; a
    /// device claiming an unknown variant is an unrecoverable invariant
    /// break, not a runtime condition.
    pub fn resolve_device(&self, index: u32, variant: Variant) -> Option<EntryFn> {
        self.variant_table(variant)
            .get(index)
            .or_else(|| self.device_generic.get(index))
    }

    fn variant_table(&self, variant: Variant) -> &DispatchTable {
        match self.device_variants.get(variant.0 as usize) {
            Some(table) => table,
            None => panic!("unsupported variant {}", variant.0),
        }
    }

    fn variant_table_mut(&mut self, variant: Variant) -> &mut DispatchTable {
        match self.device_variants.get_mut(variant.0 as usize) {
            Some(table) => table,
            None => panic!("unsupported variant {}", variant.0),
        }
    }
}
