// skink-reader - Hash map for Skink values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Open-addressing hash map used for Skink map literals and environment
//! frames.
//!
//! # Design
//!
//! Keys are compared by their canonical printed form (the raw, unescaped
//! rendering), so two structurally-equal values are the same key regardless
//! of how they were built. The rendering is cached per entry so probes and
//! resizes never re-print a key.
//!
//! Collisions are resolved with linear probing and Robin-Hood displacement:
//! an inserting entry steals the slot of any resident whose probe-sequence
//! length is shorter, and the displaced resident continues probing. This
//! bounds the worst-case probe length close to the average, which matters
//! because every environment frame is one of these maps and is searched on
//! every symbol lookup.
//!
//! Each map draws a fresh random 128-bit SipHash key at construction, so slot
//! positions cannot be precomputed across instances.
//!
//! Iteration order is most-recently-inserted first. Replacing the value of an
//! existing key keeps the key's position.

use std::fmt;
use std::hash::Hasher;

use siphasher::sip::SipHasher13;

use crate::printer::pr_str;
use crate::value::SkinkVal;

/// Slot count for maps created with [`SkinkMap::new`].
const DEFAULT_CAPACITY: usize = 16;

/// Fraction of slots that may be occupied before the table doubles.
const LOAD_FACTOR: f64 = 0.75;

/// A slot occupant: an index into the entry arena plus the occupant's
/// current probe-sequence length (distance from its home slot).
#[derive(Clone, Copy)]
struct Slot {
    entry: usize,
    psl: u32,
}

/// A live key/value pair. Entries are stored in insertion order and never
/// move; slots refer to them by index.
#[derive(Clone)]
struct Entry {
    key: SkinkVal,
    value: SkinkVal,
    rendered: String,
}

/// Hash map keyed by the canonical printed form of a Skink value.
#[derive(Clone)]
pub struct SkinkMap {
    slots: Vec<Option<Slot>>,
    entries: Vec<Entry>,
    seed: [u8; 16],
}

impl SkinkMap {
    /// Create an empty map with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty map with the given slot capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "SkinkMap capacity must be non-zero");
        SkinkMap {
            slots: vec![None; capacity],
            entries: Vec::new(),
            seed: rand::random(),
        }
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current slot capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Insert a key/value pair, taking ownership of both.
    ///
    /// If an entry with an equal key exists its value is replaced in place
    /// and the key keeps its position in iteration order. Otherwise the
    /// table grows first if the insert would push the occupancy past the
    /// load factor, and the new entry is placed by Robin-Hood probing.
    pub fn insert(&mut self, key: SkinkVal, value: SkinkVal) {
        if self.entries.len() + 1 > self.threshold() {
            self.resize(self.slots.len() * 2);
        }

        let rendered = pr_str(&key, false);
        if let Some(entry) = self.probe(&rendered) {
            self.entries[entry].value = value;
            return;
        }

        let entry = self.entries.len();
        self.entries.push(Entry {
            key,
            value,
            rendered,
        });
        self.place(entry);
    }

    /// Look up the value for a key, comparing by canonical printed form.
    /// Never mutates the map.
    #[must_use]
    pub fn get(&self, key: &SkinkVal) -> Option<&SkinkVal> {
        let rendered = pr_str(key, false);
        self.probe(&rendered).map(|entry| &self.entries[entry].value)
    }

    /// Whether the map holds an entry for the key.
    #[must_use]
    pub fn contains_key(&self, key: &SkinkVal) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over entries, most-recently-inserted first. The iterator is
    /// double-ended, so `.rev()` walks in insertion (source) order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&SkinkVal, &SkinkVal)> {
        self.entries.iter().rev().map(|e| (&e.key, &e.value))
    }

    /// Rebuild the slot array at a new capacity, re-placing every entry from
    /// scratch. Probe-sequence lengths are recomputed during placement. The
    /// hash seed is kept, so an instance hashes consistently across resizes.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity cannot hold the current entries under the
    /// load factor.
    pub fn resize(&mut self, new_capacity: usize) {
        assert!(
            new_capacity > 0 && self.entries.len() <= (new_capacity as f64 * LOAD_FACTOR) as usize,
            "SkinkMap resize capacity too small for current entries"
        );
        self.slots = vec![None; new_capacity];
        for entry in 0..self.entries.len() {
            self.place(entry);
        }
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    /// Maximum entry count before the next insert must grow the table.
    fn threshold(&self) -> usize {
        (self.slots.len() as f64 * LOAD_FACTOR) as usize
    }

    /// Home slot for a rendered key under this map's seed.
    fn home_slot(&self, rendered: &str) -> usize {
        let mut hasher = SipHasher13::new_with_key(&self.seed);
        hasher.write(rendered.as_bytes());
        (hasher.finish() % self.slots.len() as u64) as usize
    }

    /// Walk the probe sequence for a rendered key. Returns the entry index
    /// if the key is resident; stops at the first empty slot otherwise.
    fn probe(&self, rendered: &str) -> Option<usize> {
        let mut index = self.home_slot(rendered);
        while let Some(slot) = self.slots[index] {
            if self.entries[slot.entry].rendered == rendered {
                return Some(slot.entry);
            }
            index = (index + 1) % self.slots.len();
        }
        None
    }

    /// Robin-Hood placement of an entry known not to be resident. At each
    /// occupied slot the incoming occupant swaps with a resident whose
    /// probe-sequence length is shorter; the displaced resident carries its
    /// own length forward and keeps probing.
    fn place(&mut self, entry: usize) {
        let mut index = self.home_slot(&self.entries[entry].rendered);
        let mut incoming = Slot { entry, psl: 0 };
        loop {
            match self.slots[index] {
                None => {
                    self.slots[index] = Some(incoming);
                    return;
                }
                Some(resident) => {
                    if resident.psl < incoming.psl {
                        self.slots[index] = Some(incoming);
                        incoming = resident;
                    }
                }
            }
            index = (index + 1) % self.slots.len();
            incoming.psl += 1;
        }
    }
}

impl Default for SkinkMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SkinkMap {
    fn eq(&self, other: &Self) -> bool {
        // Same key set with equal values; iteration order is not part of
        // map equality.
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for SkinkMap {}

impl fmt::Debug for SkinkMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:?} {:?}", k, v)?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// Tests
// ============================================================================
