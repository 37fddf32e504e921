//! dh-hashtable: an open-addressed map from `String` keys to `String`
//! values, using double hashing over a prime-sized slot array.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, self-contained key/value primitive whose probing and
//!   resizing behavior is fully deterministic and easy to test.
//! - Layers:
//!   - `prime`: primality test and next-prime search used to size the
//!     slot array.
//!   - `probe`: positional string hash and the double-hashing probe
//!     sequence built from two hashes with different bases.
//!   - `slot`: the three slot states `Empty`, `Tombstone` and
//!     `Occupied(Entry)`.
//!   - `HashTable`: insert/search/delete plus load-triggered resizing.
//!
//! Constraints
//! - Single-owner: all mutation goes through `&mut HashTable`. Sharing
//!   across threads needs an external lock held by the caller.
//! - Capacity is always prime and never below the configured minimum
//!   base capacity (47 by default).
//! - Each key occupies at most one slot.
//! - Every probe loop stops after `capacity` attempts.
//!
//! Probing and tombstones
//! - Attempt `i` for key `k` lands on `(h_a(k) + i * step(k)) mod capacity`
//!   where `step(k)` is derived from `h_b(k)` and lies in `1..capacity`.
//!   Since the capacity is prime, the sequence visits every slot.
//! - Search stops at the first `Empty` slot. A `Tombstone` does not stop
//!   it, because later inserts may have placed the key beyond it.
//! - Insert walks to the key or to an `Empty` slot, then writes into the
//!   first `Tombstone`/`Empty` seen. This reuses tombstones without
//!   duplicating a key that sits further along the sequence.
//!
//! Resizing
//! - Before an insert, a load above the grow threshold (70%) doubles the
//!   base capacity. Before a delete, a load below the shrink threshold
//!   (10%) halves it. The check runs once per call, never after.
//! - A resize allocates a fresh slot array of `next_prime(base)` slots and
//!   moves every live entry across. Tombstones are dropped. Targets below
//!   the minimum are ignored.
//! - The `try_*` variants report allocation failure as [`Error::Alloc`]
//!   and leave the table unchanged; the plain variants abort like `Vec`.
//!
//! Notes and non-goals
//! - No iteration API, no persistence, no generic key/value types.
//! - Resize events are logged through the `log` facade at `debug` level;
//!   ignored resize requests and threshold triggers at `trace`.

pub mod config;
pub mod error;
mod hash_table;
mod hash_table_proptest;
pub mod prime;
pub mod probe;
pub mod slot;

// Public surface
pub use config::Config;
pub use error::Error;
pub use hash_table::HashTable;
pub use prime::{is_prime, next_prime, Primality};
pub use probe::{hash, probe, ProbeSeq};
