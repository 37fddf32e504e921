//! String hashing and the double-hashing probe sequence.
//!
//! A key is read as a numeral in base `prime` whose digits are its bytes,
//! reduced modulo the bucket count after every digit. Two such hashes with
//! different bases give the start index and the step of the probe
//! sequence.

/// Base of the hash that picks the first slot.
pub const PRIME_A: u64 = 811;
/// Base of the hash that picks the step between attempts.
pub const PRIME_B: u64 = 433;

/// Positional hash of `s` in base `prime`, reduced modulo `num_buckets`.
///
/// # Panics
///
/// Panics if `num_buckets` is zero.
pub fn hash(s: &str, prime: u64, num_buckets: usize) -> usize {
    let n = num_buckets as u128;
    let p = prime as u128;
    let mut h: u128 = 0;
    for &b in s.as_bytes() {
        h = (h * p + b as u128) % n;
    }
    h as usize
}

/// Step between successive attempts, always in `1..num_buckets` when
/// `num_buckets > 1`.
///
/// For `hash_b + 1 < num_buckets` this is `hash_b + 1`. The one value of
/// `hash_b` that would make the step a multiple of `num_buckets` wraps to 1.
#[inline]
fn step(hash_b: usize, num_buckets: usize) -> usize {
    if num_buckets > 1 {
        hash_b % (num_buckets - 1) + 1
    } else {
        1
    }
}

#[inline]
fn nth(start: usize, step: usize, attempt: usize, num_buckets: usize) -> usize {
    let n = num_buckets as u128;
    ((start as u128 + (attempt as u128 % n) * step as u128) % n) as usize
}

/// Slot index of `s` on the given attempt of its probe sequence.
///
/// # Panics
///
/// Panics if `num_buckets` is zero.
pub fn probe(s: &str, num_buckets: usize, attempt: usize) -> usize {
    let hash_a = hash(s, PRIME_A, num_buckets);
    let hash_b = hash(s, PRIME_B, num_buckets);
    nth(hash_a, step(hash_b, num_buckets), attempt, num_buckets)
}

/// The first `num_buckets` indices of a key's probe sequence.
///
/// Yields the same indices as calling [`probe`] with attempts
/// `0..num_buckets`, hashing the key once up front.
#[derive(Clone, Debug)]
pub struct ProbeSeq {
    index: usize,
    step: usize,
    num_buckets: usize,
    remaining: usize,
}

impl ProbeSeq {
    /// # Panics
    ///
    /// Panics if `num_buckets` is zero.
    pub fn new(s: &str, num_buckets: usize) -> Self {
        let hash_a = hash(s, PRIME_A, num_buckets);
        let hash_b = hash(s, PRIME_B, num_buckets);
        Self {
            index: hash_a,
            step: step(hash_b, num_buckets),
            num_buckets,
            remaining: num_buckets,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.index;
        self.index = nth(self.index, self.step, 1, self.num_buckets);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prime::next_prime;
    use std::collections::HashSet;

    #[test]
    fn hash_is_positional_numeral() {
        // "ab" in base 811: 97 * 811 + 98
        let expected = (97 * 811 + 98) % 1_000_003;
        assert_eq!(hash("ab", PRIME_A, 1_000_003), expected);
        assert_eq!(hash("", PRIME_A, 47), 0);
        assert_eq!(hash("a", PRIME_B, 47), 97 % 47);
    }

    #[test]
    fn hash_stays_in_range_for_long_keys() {
        let long = "z".repeat(10_000);
        for n in [2usize, 47, 97, 65_537] {
            assert!(hash(&long, PRIME_A, n) < n);
            assert!(hash(&long, PRIME_B, n) < n);
        }
    }

    #[test]
    fn hash_is_deterministic() {
        for k in ["a", "b", "password11", "ключ"] {
            assert_eq!(hash(k, PRIME_A, 47), hash(k, PRIME_A, 47));
            assert_eq!(probe(k, 47, 3), probe(k, 47, 3));
        }
    }

    #[test]
    fn first_attempt_is_hash_a() {
        for k in ["a", "b", "c", "hello world"] {
            assert_eq!(probe(k, 47, 0), hash(k, PRIME_A, 47));
        }
    }

    #[test]
    fn step_is_hash_b_plus_one() {
        for k in ["a", "b", "key-7", "xyz"] {
            let a = hash(k, PRIME_A, 97);
            let b = hash(k, PRIME_B, 97);
            if b + 1 < 97 {
                assert_eq!(probe(k, 97, 1), (a + b + 1) % 97);
                assert_eq!(probe(k, 97, 2), (a + 2 * (b + 1)) % 97);
            }
        }
    }

    #[test]
    fn step_never_zero() {
        assert_eq!(step(46, 47), 1);
        assert_eq!(step(0, 47), 1);
        assert_eq!(step(45, 47), 46);
        assert_eq!(step(0, 1), 1);
    }

    /// Invariant: over a prime bucket count every key visits every slot once.
    #[test]
    fn probe_sequence_covers_prime_table() {
        for base in [47usize, 94, 188] {
            let n = next_prime(base).unwrap();
            for i in 0..200 {
                let key = format!("k{i}");
                let seen: HashSet<usize> = (0..n).map(|a| probe(&key, n, a)).collect();
                assert_eq!(seen.len(), n, "key {key} cycles early in {n} slots");
            }
        }
    }

    #[test]
    fn probe_seq_matches_probe() {
        for k in ["a", "b", "hello", "k42"] {
            let via_iter: Vec<usize> = ProbeSeq::new(k, 53).collect();
            let via_fn: Vec<usize> = (0..53).map(|a| probe(k, 53, a)).collect();
            assert_eq!(via_iter, via_fn);
            assert_eq!(ProbeSeq::new(k, 53).len(), 53);
        }
    }
}
