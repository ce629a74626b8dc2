//! A grow-only bit vector for dense handle sets.
//!
//! Values and blocks are small integer handles into arena storage, so a set of
//! them is most compactly stored as one bit per handle. The analyses in this
//! crate only ever add to their sets (nothing is killed once it reaches a block),
//! which is why the API here offers union and containment but no removal,
//! intersection, or difference.
//!
//! # Example
//!
//! ```rust,ignore
//! use rivscope::utils::BitSet;
//!
//! let mut set = BitSet::new(100);
//! set.insert(0);
//! set.insert(50);
//! set.insert(99);
//!
//! assert!(set.contains(50));
//! assert_eq!(set.count(), 3);
//!
//! for idx in set.iter() {
//!     println!("Set contains: {}", idx);
//! }
//! ```

/// A bit vector for efficient set operations.
///
/// The capacity is fixed at construction and equals the size of the handle
/// universe; every set taking part in a union must share it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    /// The bits, stored as a vector of words.
    words: Vec<u64>,
    /// The number of bits in the set.
    len: usize,
}

impl BitSet {
    /// Creates a new empty bit set with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let num_words = capacity.div_ceil(64);
        Self {
            words: vec![0; num_words],
            len: capacity,
        }
    }

    /// Returns the capacity of this bit set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the bit set has no bits set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Sets the bit at the given index.
    ///
    /// Returns `true` if the bit was not previously set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn insert(&mut self, index: usize) -> bool {
        assert!(index < self.len, "index out of bounds");
        let word = index / 64;
        let mask = 1u64 << (index % 64);
        let fresh = self.words[word] & mask == 0;
        self.words[word] |= mask;
        fresh
    }

    /// Returns `true` if the bit at the given index is set.
    ///
    /// Indices beyond the capacity are never members.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        (self.words[index / 64] & (1u64 << (index % 64))) != 0
    }

    /// Returns the number of bits set.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Computes the union with another bit set (in place).
    ///
    /// Returns `true` if `self` changed.
    ///
    /// # Panics
    ///
    /// Panics if the two sets were created with different capacities.
    pub fn union_with(&mut self, other: &Self) -> bool {
        assert_eq!(self.len, other.len, "bit sets must have same length");
        let mut changed = false;
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            let old = *a;
            *a |= *b;
            changed |= old != *a;
        }
        changed
    }

    /// Returns `true` if every bit set in `other` is also set in `self`.
    ///
    /// # Panics
    ///
    /// Panics if the two sets were created with different capacities.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        assert_eq!(self.len, other.len, "bit sets must have same length");
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| b & !a == 0)
    }

    /// Returns an iterator over the indices of set bits, in ascending order.
    pub fn iter(&self) -> BitSetIter<'_> {
        BitSetIter {
            set: self,
            word_idx: 0,
            bit_idx: 0,
        }
    }
}

impl std::fmt::Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the set bits in a `BitSet`.
pub struct BitSetIter<'a> {
    set: &'a BitSet,
    word_idx: usize,
    bit_idx: usize,
}

impl Iterator for BitSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < self.set.words.len() {
            // Skip the remainder of the word once no higher bits are set
            let remaining = self.set.words[self.word_idx]
                .checked_shr(self.bit_idx as u32)
                .unwrap_or(0);
            if remaining == 0 {
                self.word_idx += 1;
                self.bit_idx = 0;
                continue;
            }

            let offset = remaining.trailing_zeros() as usize;
            let idx = self.word_idx * 64 + self.bit_idx + offset;
            self.bit_idx += offset + 1;
            if self.bit_idx >= 64 {
                self.word_idx += 1;
                self.bit_idx = 0;
            }
            return Some(idx);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitset_basic() {
        let mut bs = BitSet::new(100);
        assert!(bs.is_empty());
        assert_eq!(bs.count(), 0);

        assert!(bs.insert(0));
        assert!(bs.insert(50));
        assert!(bs.insert(99));
        assert!(!bs.insert(50));

        assert!(!bs.is_empty());
        assert_eq!(bs.count(), 3);
        assert!(bs.contains(0));
        assert!(bs.contains(50));
        assert!(bs.contains(99));
        assert!(!bs.contains(1));
    }

    #[test]
    fn test_bitset_contains_out_of_range() {
        let bs = BitSet::new(10);
        assert!(!bs.contains(10));
        assert!(!bs.contains(1000));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_bitset_insert_out_of_range() {
        let mut bs = BitSet::new(10);
        bs.insert(10);
    }

    #[test]
    fn test_bitset_union() {
        let mut a = BitSet::new(100);
        let mut b = BitSet::new(100);

        a.insert(0);
        a.insert(1);
        b.insert(1);
        b.insert(2);

        assert!(a.union_with(&b));
        assert!(a.contains(0));
        assert!(a.contains(1));
        assert!(a.contains(2));
        assert_eq!(a.count(), 3);

        // Second union adds nothing
        assert!(!a.union_with(&b));
    }

    #[test]
    fn test_bitset_superset() {
        let mut a = BitSet::new(130);
        let mut b = BitSet::new(130);

        a.insert(3);
        a.insert(129);
        b.insert(129);

        assert!(a.is_superset(&b));
        assert!(!b.is_superset(&a));
        assert!(a.is_superset(&BitSet::new(130)));
        assert!(a.is_superset(&a.clone()));
    }

    #[test]
    fn test_bitset_iter() {
        let mut bs = BitSet::new(200);
        bs.insert(5);
        bs.insert(42);
        bs.insert(63);
        bs.insert(64);
        bs.insert(199);

        let bits: Vec<_> = bs.iter().collect();
        assert_eq!(bits, vec![5, 42, 63, 64, 199]);
    }

    #[test]
    fn test_bitset_iter_empty() {
        let bs = BitSet::new(0);
        assert_eq!(bs.iter().count(), 0);
        assert!(bs.is_empty());
    }

    #[test]
    fn test_bitset_debug() {
        let mut bs = BitSet::new(8);
        bs.insert(1);
        bs.insert(4);
        assert_eq!(format!("{bs:?}"), "{1, 4}");
    }
}
