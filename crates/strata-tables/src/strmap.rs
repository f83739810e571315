//! The string-to-index hash table.
//!
//! A linear congruential hash over the name's bytes picks a home slot in a
//! power-of-two table; collisions advance by a constant stride. The prime
//! constants were chosen empirically for low collision counts on real
//! entry-point name sets and must match between [`StringMapBuilder::bake`]
//! and [`NameMap::lookup`], or lookups silently miss.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Multiplier of the hash's multiply-add fold.
pub const PRIME_FACTOR: u32 = 5024183;

/// Constant probe stride added to the hash on collision.
pub const PRIME_STEP: u32 = 19;

/// Sentinel for an unoccupied probe slot.
pub const EMPTY_SLOT: u16 = 0xffff;

/// Hash an entry-point name.
///
/// Wrapping multiply-add over the name's bytes, starting at zero. This is
/// the one hash function shared by the builder and the resolver.
pub fn hash_name(name: &str) -> u32 {
    let mut h: u32 = 0;
    for &b in name.as_bytes() {
        h = h.wrapping_mul(PRIME_FACTOR).wrapping_add(b as u32);
    }
    h
}

/// One name record: blob offset, hash, and the dense index it resolves to.
///
/// Records are stored in sorted-name order, matching the blob layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    /// Byte offset of the name in the string blob.
    pub offset: u32,
    /// `hash_name` of the name, compared before the full string.
    pub hash: u32,
    /// The dense index this name resolves to.
    pub num: u32,
}

/// Reasons a name set cannot be baked into a table.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// The same name was added twice. Names are the key domain; a duplicate
    /// means the catalog feeding the builder is corrupt.
    DuplicateName(String),
    /// More names than the u16 probe slots can address.
    TooManyNames(usize),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "duplicate name '{}' in string map", name),
            Self::TooManyNames(n) => {
                write!(f, "{} names exceed string map capacity ({})", n, EMPTY_SLOT)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Accumulates `(name, num)` pairs, then bakes them into a [`NameMap`].
#[derive(Debug, Default)]
pub struct StringMapBuilder {
    entries: Vec<(String, u32)>,
}

impl StringMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name and the dense index it should resolve to.
    ///
    /// Several names may share a `num` (aliases); the names themselves must
    /// be unique, which [`bake`](Self::bake) enforces.
    pub fn add(&mut self, name: impl Into<String>, num: u32) {
        self.entries.push((name.into(), num));
    }

    /// Build the immutable table.
    ///
    /// Names are sorted, laid out into the null-separated blob, hashed, and
    /// inserted into a probe array sized to the smallest power of two at
    /// least 1.25x the population. Since the table is never full, every
    /// insertion and every later probe sequence terminates.
    pub fn bake(mut self) -> Result<NameMap, BuildError> {
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(pair) = self.entries.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(BuildError::DuplicateName(pair[0].0.clone()));
        }
        let count = self.entries.len();
        if count >= EMPTY_SLOT as usize {
            return Err(BuildError::TooManyNames(count));
        }

        let mut strings = String::new();
        let mut entries = Vec::with_capacity(count);
        for (name, num) in &self.entries {
            entries.push(MapEntry {
                offset: strings.len() as u32,
                hash: hash_name(name),
                num: *num,
            });
            strings.push_str(name);
            strings.push('\0');
        }

        // Smallest power of two >= 1.25 * count. Strictly greater than the
        // population for any count, so at least one slot is always empty.
        let size = ((count * 5).div_ceil(4)).max(1).next_power_of_two();
        let mask = (size - 1) as u32;

        let mut table = vec![EMPTY_SLOT; size];
        let mut collisions = [0u32; 10];
        for (pos, entry) in entries.iter().enumerate() {
            let mut h = entry.hash;
            let mut depth = 0;
            while table[(h & mask) as usize] != EMPTY_SLOT {
                h = h.wrapping_add(PRIME_STEP);
                depth += 1;
            }
            collisions[depth.min(9)] += 1;
            table[(h & mask) as usize] = pos as u16;
        }

        Ok(NameMap { strings, entries, table, mask, collisions })
    }
}

/// The immutable name-to-index table.
///
/// Built once per scope; read-only thereafter, so lookups need no
/// synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct NameMap {
    /// All names, sorted, null-separated.
    strings: String,
    /// One record per name, in sorted (blob) order.
    entries: Vec<MapEntry>,
    /// Probe array holding positions into `entries`, or `EMPTY_SLOT`.
    table: Vec<u16>,
    mask: u32,
    /// Insertion-depth histogram; depth 9 bucket also counts deeper chains.
    collisions: [u32; 10],
}

impl NameMap {
    /// Resolve a name to its dense index, or `None` if absent.
    ///
    /// Probes from the hash's home slot with the constant stride. An empty
    /// slot proves the name was never inserted. Occupied slots compare the
    /// stored hash first and only then the full string against the blob, so
    /// hash collisions cannot produce a wrong index.
    pub fn lookup(&self, name: &str) -> Option<u32> {
        let hash = hash_name(name);
        let mut h = hash;
        loop {
            let pos = self.table[(h & self.mask) as usize];
            if pos == EMPTY_SLOT {
                return None;
            }
            let entry = &self.entries[pos as usize];
            if entry.hash == hash && self.str_at(entry.offset) == name {
                return Some(entry.num);
            }
            h = h.wrapping_add(PRIME_STEP);
        }
    }

    /// The name stored at a blob offset.
    pub fn str_at(&self, offset: u32) -> &str {
        let rest = &self.strings[offset as usize..];
        match rest.find('\0') {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    /// Number of names in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the probe array (a power of two).
    pub fn table_size(&self) -> usize {
        self.table.len()
    }

    /// The null-separated, sorted string blob.
    pub fn strings(&self) -> &str {
        &self.strings
    }

    /// Per-name records in sorted (blob) order.
    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    /// The probe array; values index into [`entries`](Self::entries).
    pub fn table(&self) -> &[u16] {
        &self.table
    }

    /// Insertion-depth histogram from build time.
    pub fn collisions(&self) -> &[u32; 10] {
        &self.collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bake(names: &[(&str, u32)]) -> NameMap {
        let mut builder = StringMapBuilder::new();
        for &(name, num) in names {
            builder.add(name, num);
        }
        builder.bake().unwrap()
    }

    #[test]
    fn hash_vectors() {
        // Known values for the fixed prime constants.
        assert_eq!(hash_name("alpha"), 0x78ecc89e);
        assert_eq!(hash_name("beta"), 0xc1bf1d30);
        assert_eq!(hash_name("gamma"), 0xe7797817);
        assert_eq!(hash_name(""), 0);
    }

    #[test]
    fn blob_layout_is_sorted_and_null_separated() {
        let map = bake(&[("gamma", 2), ("alpha", 0), ("beta", 1)]);
        assert_eq!(map.strings(), "alpha\0beta\0gamma\0");
        let offsets: Vec<u32> = map.entries().iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 6, 11]);
        assert_eq!(map.str_at(6), "beta");
    }

    #[test]
    fn probe_table_layout_for_three_names() {
        let map = bake(&[("alpha", 0), ("beta", 1), ("gamma", 2)]);
        assert_eq!(map.table_size(), 4);
        // Home slots: beta -> 0, alpha -> 2, gamma -> 3; no collisions.
        assert_eq!(map.table(), &[1, EMPTY_SLOT, 0, 2]);
        assert_eq!(map.collisions(), &[3, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn lookup_present_and_absent() {
        let map = bake(&[("alpha", 0), ("beta", 1), ("gamma", 2)]);
        assert_eq!(map.lookup("alpha"), Some(0));
        assert_eq!(map.lookup("beta"), Some(1));
        assert_eq!(map.lookup("gamma"), Some(2));
        // "delta" probes occupied slots 0, 3, 2 before proving absence at
        // the one empty slot.
        assert_eq!(map.lookup("delta"), None);
        assert_eq!(map.lookup(""), None);
        assert_eq!(map.lookup("alph"), None);
        assert_eq!(map.lookup("alphaa"), None);
    }

    #[test]
    fn build_is_order_independent() {
        let a = bake(&[("alpha", 0), ("beta", 1), ("gamma", 2)]);
        let b = bake(&[("gamma", 2), ("beta", 1), ("alpha", 0)]);
        assert_eq!(a, b);
    }

    #[test]
    fn aliases_share_a_num() {
        let map = bake(&[("Submit", 0), ("SubmitEXT", 0), ("Present", 1)]);
        assert_eq!(map.lookup("Submit"), Some(0));
        assert_eq!(map.lookup("SubmitEXT"), Some(0));
        assert_eq!(map.lookup("Present"), Some(1));
    }

    #[test]
    fn duplicate_name_rejected_at_bake() {
        let mut builder = StringMapBuilder::new();
        builder.add("Submit", 0);
        builder.add("Submit", 1);
        let err = builder.bake().unwrap_err();
        assert_eq!(err, BuildError::DuplicateName("Submit".to_string()));
    }

    #[test]
    fn empty_map_lookup_misses() {
        let map = StringMapBuilder::new().bake().unwrap();
        assert_eq!(map.table_size(), 1);
        assert_eq!(map.lookup("anything"), None);
    }

    #[test]
    fn table_size_is_power_of_two_above_population() {
        for n in 1..=90u32 {
            let mut builder = StringMapBuilder::new();
            for i in 0..n {
                builder.add(format!("entry_point_{}", i), i);
            }
            let map = builder.bake().unwrap();
            let size = map.table_size();
            assert!(size.is_power_of_two(), "n={} size={}", n, size);
            // size >= 1.25 * n, which also keeps it strictly above n.
            assert!(size * 4 >= n as usize * 5, "n={} size={}", n, size);
            assert!(size > n as usize, "n={} size={}", n, size);
        }
    }
}
