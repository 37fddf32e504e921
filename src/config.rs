//! Sizing policy for a `HashTable`.

use crate::error::Error;

/// Base capacity a table starts from and never shrinks below.
pub const DEFAULT_MIN_BASE_CAPACITY: usize = 47;
/// Load percentage above which an insert grows the table first.
pub const DEFAULT_GROW_THRESHOLD: usize = 70;
/// Load percentage below which a delete shrinks the table first.
pub const DEFAULT_SHRINK_THRESHOLD: usize = 10;

/// Resize policy. Thresholds are integer percentages compared against
/// `len * 100 / capacity`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub min_base_capacity: usize,
    pub grow_threshold: usize,
    pub shrink_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_base_capacity: DEFAULT_MIN_BASE_CAPACITY,
            grow_threshold: DEFAULT_GROW_THRESHOLD,
            shrink_threshold: DEFAULT_SHRINK_THRESHOLD,
        }
    }
}

impl Config {
    pub fn with_min_base_capacity(mut self, n: usize) -> Self {
        self.min_base_capacity = n;
        self
    }

    pub fn with_grow_threshold(mut self, percent: usize) -> Self {
        self.grow_threshold = percent;
        self
    }

    pub fn with_shrink_threshold(mut self, percent: usize) -> Self {
        self.shrink_threshold = percent;
        self
    }

    /// Check the bounds that keep probing and resizing well defined.
    ///
    /// A grow threshold of 100 or more would let the table fill up and
    /// leave inserts without a free slot.
    pub fn validate(&self) -> Result<(), Error> {
        if self.min_base_capacity < 2 {
            return Err(Error::InvalidConfig("min_base_capacity must be at least 2"));
        }
        if self.grow_threshold == 0 || self.grow_threshold >= 100 {
            return Err(Error::InvalidConfig("grow_threshold must be in 1..100"));
        }
        if self.shrink_threshold >= self.grow_threshold {
            return Err(Error::InvalidConfig(
                "shrink_threshold must be below grow_threshold",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let c = Config::default();
        assert_eq!(c.min_base_capacity, 47);
        assert_eq!(c.grow_threshold, 70);
        assert_eq!(c.shrink_threshold, 10);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let bad = [
            Config::default().with_min_base_capacity(1),
            Config::default().with_grow_threshold(0),
            Config::default().with_grow_threshold(100),
            Config::default().with_shrink_threshold(70),
            Config::default()
                .with_grow_threshold(20)
                .with_shrink_threshold(30),
        ];
        for c in bad {
            match c.validate() {
                Err(Error::InvalidConfig(_)) => {}
                other => panic!("expected InvalidConfig for {c:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_shrink_threshold_disables_shrinking() {
        let c = Config::default().with_shrink_threshold(0);
        assert!(c.validate().is_ok());
    }
}
