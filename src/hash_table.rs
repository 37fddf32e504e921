//! HashTable: open-addressed string map with double hashing and
//! load-triggered prime resizing.

use crate::config::Config;
use crate::error::Error;
use crate::prime::next_prime;
use crate::probe::ProbeSeq;
use crate::slot::{Entry, Slot};
use core::fmt;
use log::{debug, trace};

pub struct HashTable {
    slots: Vec<Slot>,
    base_capacity: usize,
    count: usize,
    tombstones: usize,
    config: Config,
}

/// Largest slot array whose size in bytes fits in an `isize`.
const MAX_SLOTS: usize = isize::MAX as usize / core::mem::size_of::<Slot>();

/// Prime slot count for a base capacity, checked against `MAX_SLOTS`.
fn slot_count(base: usize) -> Result<usize, Error> {
    let overflow = Error::CapacityOverflow { requested: base };
    if base > MAX_SLOTS {
        return Err(overflow);
    }
    next_prime(base).filter(|&n| n <= MAX_SLOTS).ok_or(overflow)
}

/// Infallible callers panic on overflow, like `Vec::with_capacity`.
fn slot_count_or_panic(base: usize) -> usize {
    match slot_count(base) {
        Ok(n) => n,
        Err(e) => panic!("{e}"),
    }
}

fn alloc_slots(capacity: usize) -> Vec<Slot> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

fn try_alloc_slots(capacity: usize) -> Result<Vec<Slot>, Error> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    slots.resize_with(capacity, Slot::default);
    Ok(slots)
}

impl HashTable {
    /// Creates a table at the minimum base capacity (47, so 47 slots).
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a table whose base capacity is `hint`, raised to the
    /// minimum if it is smaller.
    ///
    /// # Panics
    ///
    /// Panics if no prime slot count for `hint` fits in memory.
    pub fn with_capacity(hint: usize) -> Self {
        let config = Config::default();
        let base = hint.max(config.min_base_capacity);
        Self::from_parts(config, base, alloc_slots(slot_count_or_panic(base)))
    }

    /// Like [`HashTable::with_capacity`] but reports an oversized hint or
    /// allocation failure instead of panicking or aborting.
    pub fn try_with_capacity(hint: usize) -> Result<Self, Error> {
        let config = Config::default();
        let base = hint.max(config.min_base_capacity);
        Ok(Self::from_parts(config, base, try_alloc_slots(slot_count(base)?)?))
    }

    /// Creates an empty table with a custom resize policy, starting at the
    /// policy's minimum base capacity.
    pub fn with_config(config: Config) -> Result<Self, Error> {
        config.validate()?;
        let base = config.min_base_capacity;
        Ok(Self::from_parts(config, base, try_alloc_slots(slot_count(base)?)?))
    }

    fn from_parts(config: Config, base_capacity: usize, slots: Vec<Slot>) -> Self {
        Self {
            slots,
            base_capacity,
            count: 0,
            tombstones: 0,
            config,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Length of the slot array; always prime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Capacity requested at construction or by the latest resize,
    /// before rounding up to a prime.
    pub fn base_capacity(&self) -> usize {
        self.base_capacity
    }

    /// Slots holding a deletion marker. Only a resize reclaims them; they
    /// count toward neither the grow nor the shrink threshold.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Integer load percentage, `len * 100 / capacity`.
    pub fn load(&self) -> usize {
        self.count * 100 / self.capacity()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn slots_for_test(&self) -> &[Slot] {
        &self.slots
    }

    /// Inserts `key` with `value`, returning the previous value if the key
    /// was already present.
    ///
    /// Grows the table first when the load is above the grow threshold.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        if self.needs_grow() {
            self.grow();
        }
        self.insert_entry(Entry::new(key, value))
    }

    /// Like [`HashTable::insert`], but a failed growth allocation is
    /// returned as an error and the table is left as it was.
    pub fn try_insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, Error> {
        if self.needs_grow() {
            let target = self.grow_target();
            self.try_resize(target)?;
        }
        Ok(self.insert_entry(Entry::new(key, value)))
    }

    pub fn search(&self, key: &str) -> Option<&str> {
        let idx = self.find_index(key)?;
        self.slots[idx].entry().map(Entry::value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_index(key).is_some()
    }

    /// Removes `key`, returning its value. An absent key is a no-op.
    ///
    /// Shrinks the table first when the load is below the shrink threshold.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        if self.needs_shrink() {
            self.shrink();
        }
        self.remove_entry(key)
    }

    /// Like [`HashTable::delete`], but a failed shrink allocation is
    /// returned as an error and the table is left as it was.
    pub fn try_delete(&mut self, key: &str) -> Result<Option<String>, Error> {
        if self.needs_shrink() {
            let target = self.base_capacity / 2;
            self.try_resize(target)?;
        }
        Ok(self.remove_entry(key))
    }

    /// Rebuilds the table at `new_base_capacity`, dropping all tombstones.
    ///
    /// Returns `false` without touching the table when the target is below
    /// the minimum base capacity or too small to hold the live entries.
    ///
    /// # Panics
    ///
    /// Panics if no prime slot count for `new_base_capacity` fits in memory.
    pub fn resize(&mut self, new_base_capacity: usize) -> bool {
        let capacity = match self.resize_capacity(new_base_capacity) {
            Ok(Some(capacity)) => capacity,
            Ok(None) => return false,
            Err(e) => panic!("{e}"),
        };
        self.rehash_into(new_base_capacity, alloc_slots(capacity));
        true
    }

    /// Like [`HashTable::resize`], but reports an oversized target or
    /// allocation failure. On error the table is unchanged.
    pub fn try_resize(&mut self, new_base_capacity: usize) -> Result<bool, Error> {
        let Some(capacity) = self.resize_capacity(new_base_capacity)? else {
            return Ok(false);
        };
        let slots = try_alloc_slots(capacity)?;
        self.rehash_into(new_base_capacity, slots);
        Ok(true)
    }

    /// Drops every entry and returns to the minimum base capacity.
    pub fn clear(&mut self) {
        let base = self.config.min_base_capacity;
        self.slots = alloc_slots(slot_count_or_panic(base));
        self.base_capacity = base;
        self.count = 0;
        self.tombstones = 0;
    }

    // [resize policy]

    fn needs_grow(&self) -> bool {
        self.load() > self.config.grow_threshold
    }

    fn needs_shrink(&self) -> bool {
        self.load() < self.config.shrink_threshold
    }

    fn grow_target(&self) -> usize {
        self.base_capacity.saturating_mul(2)
    }

    fn grow(&mut self) {
        trace!(
            "load {}% above {}%, growing from base {}",
            self.load(),
            self.config.grow_threshold,
            self.base_capacity
        );
        self.resize(self.grow_target());
    }

    fn shrink(&mut self) {
        trace!(
            "load {}% below {}%, shrinking from base {}",
            self.load(),
            self.config.shrink_threshold,
            self.base_capacity
        );
        self.resize(self.base_capacity / 2);
    }

    /// Slot count for a resize to `new_base_capacity`, or `None` if the
    /// request must be ignored.
    fn resize_capacity(&self, new_base_capacity: usize) -> Result<Option<usize>, Error> {
        if new_base_capacity < self.config.min_base_capacity {
            trace!(
                "ignoring resize to base {} below minimum {}",
                new_base_capacity,
                self.config.min_base_capacity
            );
            return Ok(None);
        }
        let capacity = slot_count(new_base_capacity)?;
        if capacity <= self.count {
            trace!(
                "ignoring resize to {} slots holding {} entries",
                capacity,
                self.count
            );
            return Ok(None);
        }
        Ok(Some(capacity))
    }

    /// Moves every live entry into `slots` and makes it the table's storage.
    fn rehash_into(&mut self, new_base_capacity: usize, slots: Vec<Slot>) {
        let old_slots = core::mem::replace(&mut self.slots, slots);
        let old_base = core::mem::replace(&mut self.base_capacity, new_base_capacity);
        let dropped = core::mem::take(&mut self.tombstones);
        let live = core::mem::take(&mut self.count);
        let old_capacity = old_slots.len();

        for slot in old_slots {
            if let Slot::Occupied(entry) = slot {
                self.insert_entry(entry);
            }
        }
        debug_assert_eq!(self.count, live);

        debug!(
            "resized base {} -> {} ({} -> {} slots), {} entries, {} tombstones dropped",
            old_base,
            self.base_capacity,
            old_capacity,
            self.capacity(),
            self.count,
            dropped
        );
    }

    // [probing]

    fn find_index(&self, key: &str) -> Option<usize> {
        for idx in ProbeSeq::new(key, self.capacity()) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                slot if slot.holds(key) => return Some(idx),
                _ => {}
            }
        }
        None
    }

    /// Stores `entry` without checking the load. Overwrites in place when
    /// the key is present; otherwise takes the first free slot on the probe
    /// sequence, preferring an earlier tombstone to the terminating empty.
    fn insert_entry(&mut self, entry: Entry) -> Option<String> {
        let mut vacant = None;
        for idx in ProbeSeq::new(&entry.key, self.capacity()) {
            match &mut self.slots[idx] {
                Slot::Occupied(existing) if existing.key == entry.key => {
                    let old = core::mem::replace(existing, entry);
                    return Some(old.value);
                }
                Slot::Occupied(_) => {}
                Slot::Tombstone => {
                    vacant.get_or_insert(idx);
                }
                Slot::Empty => {
                    vacant.get_or_insert(idx);
                    break;
                }
            }
        }

        // The grow check keeps len below capacity and a prime-sized probe
        // sequence visits every slot, so some slot is free.
        let idx = match vacant {
            Some(idx) => idx,
            None => unreachable!("no free slot among {} slots", self.capacity()),
        };
        if self.slots[idx].is_tombstone() {
            self.tombstones -= 1;
        }
        self.slots[idx] = Slot::Occupied(entry);
        self.count += 1;
        None
    }

    fn remove_entry(&mut self, key: &str) -> Option<String> {
        let idx = self.find_index(key)?;
        let entry = self.slots[idx].bury()?;
        self.count -= 1;
        self.tombstones += 1;
        Some(entry.value)
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.count)
            .field("capacity", &self.capacity())
            .field("base_capacity", &self.base_capacity)
            .field("tombstones", &self.tombstones)
            .finish()
    }
}
