//! Whole-vector shifts and bounded rotation.

use core::ops::{Shl, ShlAssign, Shr, ShrAssign};

use crate::{
    BitVec,
    macros::bitpos,
    storage::{BITS_PER_WORD, Word},
};

impl BitVec {
    /// Shifts every bit `count` places toward bit 0, dropping the bits that
    /// fall below it. Never grows.
    fn shift_down(&mut self, count: usize) {
        let (ws, bs) = bitpos!(count);
        let n = self.word_count();
        if ws >= n {
            self.clear();
            return;
        }

        let words = &mut *self.storage;
        for i in 0..n - ws {
            let mut w = words[i + ws] >> bs;
            if bs != 0 && i + ws + 1 < n {
                w |= words[i + ws + 1] << (BITS_PER_WORD - bs);
            }
            words[i] = w;
        }
        words[n - ws..].fill(0);
    }

    /// Shifts every bit `count` places away from bit 0, growing so that no
    /// set bit is lost.
    fn shift_up(&mut self, count: usize) {
        let Some(last) = self.last() else {
            return;
        };
        if count == 0 {
            return;
        }
        let (last_wi, _) = bitpos!(last.saturating_add(count));
        self.reserve_words(last_wi + 1);

        let (ws, bs) = bitpos!(count);
        let words = &mut *self.storage;
        for i in (ws..words.len()).rev() {
            let src = i - ws;
            let mut w: Word = words[src] << bs;
            if bs != 0 && src > 0 {
                w |= words[src - 1] >> (BITS_PER_WORD - bs);
            }
            words[i] = w;
        }
        words[..ws].fill(0);
    }

    /// Rotates the bits of `[start, end)` toward `start` by
    /// `rotation - start` places, wrapping inside the window. Bits outside
    /// the window are untouched.
    ///
    /// After the call, the bit that was at `rotation` sits at `start`, and
    /// the bit that was at `start` sits at `start + (end - rotation)`.
    ///
    /// Requires `start <= rotation < end`. This is checked in debug builds;
    /// in release builds any other input leaves the vector unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::from(0b0000_1111u64);
    /// bv.rotate_right(0, 3, 8);
    /// assert_eq!(bv.iter().collect::<Vec<_>>(), [0, 5, 6, 7]);
    /// ```
    pub fn rotate_right(&mut self, start: usize, rotation: usize, end: usize) {
        debug_assert!(
            start <= rotation && rotation < end,
            "rotation point {rotation} outside window [{start}, {end})"
        );
        if !(start <= rotation && rotation < end) || rotation == start {
            return;
        }

        let low = self.slice(start, rotation - start);
        let high = self.slice(rotation, end - rotation);
        let moved = (low << (end - rotation + start)) | &(high << start);

        self.clear_range(start, end - start);
        self.union_with(&moved);
    }

    /// Like [`rotate_right`](Self::rotate_right), but returns the rotated
    /// vector and leaves `self` alone.
    #[must_use]
    pub fn rotate_right_copy(&self, start: usize, rotation: usize, end: usize) -> Self {
        let mut out = self.clone();
        out.rotate_right(start, rotation, end);
        out
    }
}

impl ShrAssign<usize> for BitVec {
    /// Divides the bit pattern by `2^count`.
    fn shr_assign(&mut self, count: usize) {
        self.shift_down(count);
    }
}

impl ShlAssign<usize> for BitVec {
    /// Multiplies the bit pattern by `2^count`, growing as needed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::from(0b11u64);
    /// bv <<= 63;
    /// assert_eq!(bv.iter().collect::<Vec<_>>(), [63, 64]);
    /// bv >>= 64;
    /// assert_eq!(bv.iter().collect::<Vec<_>>(), [0]);
    /// ```
    fn shl_assign(&mut self, count: usize) {
        self.shift_up(count);
    }
}

impl Shr<usize> for BitVec {
    type Output = Self;

    fn shr(mut self, count: usize) -> Self {
        self.shift_down(count);
        self
    }
}

impl Shr<usize> for &BitVec {
    type Output = BitVec;

    fn shr(self, count: usize) -> BitVec {
        self.clone() >> count
    }
}

impl Shl<usize> for BitVec {
    type Output = Self;

    fn shl(mut self, count: usize) -> Self {
        self.shift_up(count);
        self
    }
}

impl Shl<usize> for &BitVec {
    type Output = BitVec;

    fn shl(self, count: usize) -> BitVec {
        self.clone() << count
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn bits(bv: &BitVec) -> Vec<usize> {
        bv.iter().collect()
    }

    #[test]
    fn test_shift_right_past_width_empties() {
        let mut bv = BitVec::from_range(100, 20);
        let words = bv.word_count();
        bv >>= 10_000;
        assert!(bv.is_empty());
        assert_eq!(bv.word_count(), words);
    }

    #[test]
    fn test_shift_across_words() {
        let bv: BitVec = [0, 5, 63, 64, 200].into_iter().collect();
        assert_eq!(bits(&(&bv << 70)), [70, 75, 133, 134, 270]);
        assert_eq!(bits(&(&bv >> 5)), [0, 58, 59, 195]);
        assert_eq!(bits(&(&bv >> 64)), [0, 136]);
        assert_eq!(&bv << 0, bv);
        assert_eq!(&(&bv << 129) >> 129, bv);
    }

    #[test]
    fn test_shift_empty_does_not_grow() {
        let mut bv = BitVec::new();
        bv <<= 1000;
        assert!(!bv.is_spilled());
    }

    #[test]
    fn test_rotation_is_confined_to_window() {
        let mut bv: BitVec = [0, 2, 10, 11, 19, 40].into_iter().collect();
        bv.rotate_right(10, 12, 20);
        assert_eq!(bits(&bv), [0, 2, 17, 18, 19, 40]);
    }

    #[test]
    fn test_rotation_across_word_boundary() {
        let bv = BitVec::from_range(60, 4);
        let rotated = bv.rotate_right_copy(60, 62, 70);
        assert_eq!(bits(&rotated), [60, 61, 68, 69]);
        assert_eq!(bits(&bv), [60, 61, 62, 63]);
    }

    #[test]
    fn test_rotation_window_at_top_of_index_space() {
        let bv = BitVec::from(0b1011u64);
        let rotated = bv.rotate_right_copy(usize::MAX - 10, usize::MAX - 5, usize::MAX);
        assert_eq!(rotated, bv);
    }

    #[test]
    fn test_rotation_by_zero_is_identity() {
        let bv = BitVec::from(0b1011u64);
        assert_eq!(bv.rotate_right_copy(0, 0, 8), bv);
    }
}
