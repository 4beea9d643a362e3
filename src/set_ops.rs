//! Whole-vector set algebra for `BitVec`.
//!
//! Every operation treats missing high words as zero. The in-place forms
//! return whether any bit of the receiver changed, which is what fixed-point
//! dataflow loops iterate on.

use core::cmp::Ordering;

use crate::{BitVec, storage::Word};

impl BitVec {
    /// In-place AND. Never grows; words the other operand lacks are zeroed.
    ///
    /// Returns `true` if any bit changed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut a = BitVec::from_range(0, 4);
    /// let b = BitVec::from_range(2, 4);
    /// assert!(a.intersect_with(&b));
    /// assert_eq!(a.iter().collect::<Vec<_>>(), [2, 3]);
    /// assert!(!a.intersect_with(&b));
    /// ```
    pub fn intersect_with(&mut self, other: &Self) -> bool {
        let src = other.as_slice();
        let dst = &mut *self.storage;
        let common = dst.len().min(src.len());
        let (head, tail) = dst.split_at_mut(common);

        let mut changed = false;
        for (d, &s) in head.iter_mut().zip(src) {
            let r = *d & s;
            changed |= r != *d;
            *d = r;
        }
        for d in tail {
            changed |= *d != 0;
            *d = 0;
        }
        changed
    }

    /// In-place OR. Grows to the other operand's word count first.
    ///
    /// Returns `true` if any bit changed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut a = BitVec::from(1u64);
    /// let mut b = BitVec::new();
    /// b.set_bit(200);
    /// assert!(a.union_with(&b));
    /// assert!(a.get(0) && a.get(200));
    /// assert!(!a.union_with(&b));
    /// ```
    pub fn union_with(&mut self, other: &Self) -> bool {
        self.reserve_words(other.word_count());
        let mut changed = false;
        for (d, &s) in self.storage.iter_mut().zip(other.as_slice()) {
            let r = *d | s;
            changed |= r != *d;
            *d = r;
        }
        changed
    }

    /// In-place OR with a single raw word at word 0.
    ///
    /// Returns `true` if any bit changed.
    pub fn union_with_word(&mut self, word: Word) -> bool {
        let d = &mut self.storage[0];
        let r = *d | word;
        let changed = r != *d;
        *d = r;
        changed
    }

    /// In-place XOR. Grows to the other operand's word count first.
    ///
    /// Returns `true` if any bit changed, which is the case exactly when the
    /// other operand has a set bit.
    pub fn symmetric_difference_with(&mut self, other: &Self) -> bool {
        self.reserve_words(other.word_count());
        let mut changed = false;
        for (d, &s) in self.storage.iter_mut().zip(other.as_slice()) {
            changed |= s != 0;
            *d ^= s;
        }
        changed
    }

    /// In-place set difference: clears every bit set in `other`. Never grows.
    ///
    /// Returns `true` if any bit changed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut a = BitVec::from_range(0, 4);
    /// assert!(a.difference_with(&BitVec::from_range(2, 100)));
    /// assert_eq!(a.iter().collect::<Vec<_>>(), [0, 1]);
    /// assert_eq!(a.word_count(), 1);
    /// ```
    pub fn difference_with(&mut self, other: &Self) -> bool {
        let mut changed = false;
        for (d, &s) in self.storage.iter_mut().zip(other.as_slice()) {
            let r = *d & !s;
            changed |= r != *d;
            *d = r;
        }
        changed
    }

    /// Returns `true` if the two vectors share a set bit.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let a = BitVec::from_range(0, 4);
    /// assert!(a.intersects(&BitVec::from_range(3, 10)));
    /// assert!(!a.intersects(&BitVec::from_range(4, 1000)));
    /// ```
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .any(|(&a, &b)| a & b != 0)
    }

    /// Returns `true` if every bit set in `other` is also set in `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let a = BitVec::from_range(0, 100);
    /// assert!(a.contains(&BitVec::from_range(10, 20)));
    /// assert!(!a.contains(&BitVec::from_range(90, 20)));
    /// assert!(a.contains(&BitVec::new()));
    /// ```
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        let mine = self.as_slice();
        let theirs = other.as_slice();
        let common = mine.len().min(theirs.len());

        mine.iter().zip(theirs).all(|(&a, &b)| a & b == b)
            && theirs[common..].iter().all(|&b| b == 0)
    }

    /// Returns `true` if both vectors hold the same bit pattern, whatever
    /// their word counts.
    pub(crate) fn bits_eq(&self, other: &Self) -> bool {
        let n = self.word_count().max(other.word_count());
        (0..n).all(|i| self.word(i) == other.word(i))
    }

    /// Compares the zero-extended patterns as unsigned magnitudes, most
    /// significant word first.
    pub(crate) fn bits_cmp(&self, other: &Self) -> Ordering {
        let n = self.word_count().max(other.word_count());
        (0..n)
            .rev()
            .map(|i| self.word(i).cmp(&other.word(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Grows so that at least `words` words exist.
    pub(crate) fn reserve_words(&mut self, words: usize) {
        if words > self.word_count() {
            self.storage.expand(words);
        }
    }
}
