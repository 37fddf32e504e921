//! Prime sizing for the slot array.

/// Outcome of a primality test.
///
/// Inputs below 2 have no meaningful answer and are reported as
/// `Undefined` rather than folded into `NotPrime`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Primality {
    Undefined,
    NotPrime,
    Prime,
}

impl Primality {
    #[inline]
    pub fn is_prime(self) -> bool {
        matches!(self, Primality::Prime)
    }
}

/// Trial division by odd candidates up to `floor(sqrt(x))`.
pub fn is_prime(x: usize) -> Primality {
    if x < 2 {
        return Primality::Undefined;
    }
    if x < 4 {
        return Primality::Prime;
    }
    if x % 2 == 0 {
        return Primality::NotPrime;
    }
    let mut i = 3;
    while i <= x / i {
        if x % i == 0 {
            return Primality::NotPrime;
        }
        i += 2;
    }
    Primality::Prime
}

/// Smallest prime `>= x`, or `None` if it does not fit in a `usize`.
/// Inputs below 2 are clamped to 2.
pub fn next_prime(x: usize) -> Option<usize> {
    let mut x = x.max(2);
    while !is_prime(x).is_prime() {
        x = x.checked_add(1)?;
    }
    Some(x)
}
