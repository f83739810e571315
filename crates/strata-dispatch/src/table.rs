//! Dispatch slot arrays.

use crate::handle::Handle;

/// The uniform signature every entry-point implementation shares.
///
/// The first argument is always the dispatchable handle the call was made
/// against; the return value is a status code. Concrete per-entry-point
/// parameter lists live outside the dispatch machinery, which only moves
/// these pointers around.
pub type EntryFn = for<'a> fn(Handle<'a>) -> i32;

/// A fixed-size array of entry-point slots, one per dense index.
///
/// `None` marks a slot with no implementation. This stands in for the
/// weak-symbol trick the table would use in C: an implementation that is
/// simply not provided resolves to an absent slot rather than a link error.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    slots: Box<[Option<EntryFn>]>,
}

impl DispatchTable {
    /// Create a table of `len` absent slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len].into_boxed_slice(),
        }
    }

    /// Install an implementation at a dense index.
    pub fn set(&mut self, index: u32, f: EntryFn) {
        self.slots[index as usize] = Some(f);
    }

    /// The implementation at a dense index, if any.
    pub fn get(&self, index: u32) -> Option<EntryFn> {
        self.slots[index as usize]
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
