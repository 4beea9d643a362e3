//! Iterator implementations for `BitVec`.

use core::iter::{FromIterator, FusedIterator};

use crate::{
    BitVec,
    storage::{self, BITS_PER_WORD, Word},
};

/// An iterator over the indices of set bits in a [`BitVec`].
///
/// Created by [`BitVec::iter`]. Yields indices in ascending order.
pub type Iter<'a> = BitIter<&'a [Word]>;

/// An owning iterator over the indices of set bits in a [`BitVec`].
///
/// Created by the [`IntoIterator`] implementation for [`BitVec`].
pub type IntoIter = BitIter<BitVec>;

/// An iterator over the indices of set bits.
///
/// Double-ended and exact-size. Whole zero words are skipped with one
/// trailing- or leading-zero count per word rather than bit by bit.
///
/// `S` is either a borrowed word slice or an owned [`BitVec`].
///
/// # Examples
///
/// ```
/// use compact_bitvec::BitVec;
///
/// let bv: BitVec = [5, 10, 150].into_iter().collect();
/// let mut iter = bv.iter();
/// assert_eq!(iter.len(), 3);
/// assert_eq!(iter.next(), Some(5));
/// assert_eq!(iter.next_back(), Some(150));
/// assert_eq!(iter.next(), Some(10));
/// assert_eq!(iter.next(), None);
/// ```
#[derive(Clone, Debug)]
pub struct BitIter<S: AsRef<[Word]>> {
    pub(crate) words: S,
    pub(crate) pos: usize,  // next candidate (forward)
    pub(crate) rpos: usize, // one past the last candidate (reverse)
}

impl<S: AsRef<[Word]>> Iterator for BitIter<S> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.rpos {
            return None;
        }
        match storage::next_set(self.words.as_ref(), self.pos) {
            Some(idx) if idx < self.rpos => {
                self.pos = idx + 1;
                Some(idx)
            }
            _ => {
                self.pos = self.rpos;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl<S: AsRef<[Word]>> DoubleEndedIterator for BitIter<S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.pos >= self.rpos {
            return None;
        }
        match storage::prev_set(self.words.as_ref(), self.rpos) {
            Some(idx) if idx >= self.pos => {
                self.rpos = idx;
                Some(idx)
            }
            _ => {
                self.rpos = self.pos;
                None
            }
        }
    }
}

impl<S: AsRef<[Word]>> ExactSizeIterator for BitIter<S> {
    fn len(&self) -> usize {
        storage::count_ones_range(self.words.as_ref(), self.pos, self.rpos)
    }
}

impl<S: AsRef<[Word]>> FusedIterator for BitIter<S> {}

impl<'a> IntoIterator for &'a BitVec {
    type IntoIter = Iter<'a>;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for BitVec {
    type IntoIter = IntoIter;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        let rpos = self.as_slice_rtrim().len() * BITS_PER_WORD;
        IntoIter {
            words: self,
            pos: 0,
            rpos,
        }
    }
}

impl FromIterator<usize> for BitVec {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut bv = Self::new();
        bv.extend(iter);
        bv
    }
}

impl Extend<usize> for BitVec {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for bit in iter {
            self.set_bit(bit);
        }
    }
}
