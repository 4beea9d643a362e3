//! `BitVec` struct and bit-level access.

use alloc::vec::Vec;

use crate::{
    iter::{BitIter, Iter},
    macros::{bitpos, low_mask128},
    storage::{self, BITS_PER_WORD, Storage, Word, rtrim0},
};

/// Widest field accepted by [`BitVec::get_range`] and [`BitVec::put_range`].
pub const MAX_FIELD_BITS: usize = u128::BITS as usize;

/// An unbounded, zero-extended sequence of bits.
///
/// # Overview
///
/// A `BitVec` behaves like an infinitely wide unsigned integer on which only
/// bitwise logic is defined. Every bit that was never set reads as zero, so
/// reads past the end never fail and writes past the end grow the vector.
///
/// # Storage Strategy
///
/// - **Inline**: a single 64-bit word held directly in the struct, no
///   allocation
/// - **Heap**: an owned word array once any bit at index 64 or above is set
///
/// Storage never shrinks on its own. Equality, ordering and hashing look only
/// at the bit pattern, never at how many words are allocated.
///
/// # Examples
///
/// ```
/// use compact_bitvec::BitVec;
///
/// let mut bv = BitVec::new();
/// bv.set_bit(3);
/// bv.set_bit(40);
/// assert!(!bv.is_spilled());
///
/// bv.set_bit(10_000);
/// assert!(bv.is_spilled());
/// assert!(bv.get(10_000));
/// assert!(!bv.get(9_999));
/// assert_eq!(bv.count_ones(), 3);
/// ```
pub struct BitVec {
    pub(crate) storage: Storage,
}

impl BitVec {
    /// Creates an empty vector using inline storage.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let bv = BitVec::new();
    /// assert!(bv.is_empty());
    /// assert_eq!(bv.word_count(), 1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: Storage::Inline(0),
        }
    }

    /// Creates an empty vector with room for at least `bits` bits.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            storage: Storage::zeroed(bits.div_ceil(BITS_PER_WORD)),
        }
    }

    /// Creates a vector with the run `[start, start + len)` set.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let bv = BitVec::from_range(62, 4);
    /// assert_eq!(bv.iter().collect::<Vec<_>>(), [62, 63, 64, 65]);
    /// ```
    #[must_use]
    pub fn from_range(start: usize, len: usize) -> Self {
        let mut bv = Self::new();
        bv.set_range(start, len);
        bv
    }

    pub(crate) fn from_storage(storage: Storage) -> Self {
        Self { storage }
    }

    /// Returns `true` once the vector has moved to heap storage.
    #[must_use]
    #[inline]
    pub const fn is_spilled(&self) -> bool {
        !self.storage.is_inline()
    }

    /// Number of words currently allocated.
    #[must_use]
    #[inline]
    pub fn word_count(&self) -> usize {
        self.storage.len()
    }

    /// Number of bits that can be written without growing.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.word_count() * BITS_PER_WORD
    }

    /// The stored words, least significant first.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[Word] {
        &self.storage
    }

    /// The stored words without trailing zero words.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::new();
    /// bv.set_bit(300);
    /// bv.clear_bit(300);
    /// bv.set_bit(1);
    /// assert_eq!(bv.as_slice_rtrim(), &[0b10]);
    /// ```
    #[must_use]
    pub fn as_slice_rtrim(&self) -> &[Word] {
        rtrim0(&self.storage)
    }

    /// Word `i`, reading zero past the end.
    #[must_use]
    #[inline]
    pub fn word(&self, i: usize) -> Word {
        self.storage.word(i)
    }

    /// Returns the bit at `i`. Bits past the storage are `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let bv = BitVec::from(0b100u64);
    /// assert!(bv.get(2));
    /// assert!(!bv.get(1));
    /// assert!(!bv.get(1 << 40));
    /// ```
    #[must_use]
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        let (wi, bi) = bitpos!(i);
        (self.word(wi) >> bi) & 1 != 0
    }

    /// Sets bit `i`, growing the storage if needed.
    ///
    /// Returns `true` if the bit changed, i.e. it was clear before.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::new();
    /// assert!(bv.set_bit(70));
    /// assert!(!bv.set_bit(70));
    /// assert!(bv.get(70));
    /// ```
    #[inline]
    pub fn set_bit(&mut self, i: usize) -> bool {
        let (wi, bi) = bitpos!(i);
        self.storage.ensure_word(wi);
        let word = &mut self.storage[wi];
        let prev = *word;
        *word |= 1 << bi;
        *word != prev
    }

    /// Clears bit `i`. Never grows the storage.
    ///
    /// Returns `true` if the bit changed, i.e. it was set before.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::from(0b11u64);
    /// assert!(bv.clear_bit(0));
    /// assert!(!bv.clear_bit(0));
    /// assert!(!bv.clear_bit(5000));
    /// assert_eq!(bv.word_count(), 1);
    /// ```
    #[inline]
    pub fn clear_bit(&mut self, i: usize) -> bool {
        let (wi, bi) = bitpos!(i);
        let Some(word) = self.storage.get_mut(wi) else {
            return false;
        };
        let prev = *word;
        *word &= !(1 << bi);
        *word != prev
    }

    /// Sets bit `i` to `value` and returns its previous value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::new();
    /// assert!(!bv.replace(10, true));
    /// assert!(bv.replace(10, false));
    /// assert!(!bv.get(10));
    /// ```
    pub fn replace(&mut self, i: usize, value: bool) -> bool {
        if value {
            !self.set_bit(i)
        } else {
            self.clear_bit(i)
        }
    }

    /// Sets the `len` bits starting at `start`, growing if needed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::new();
    /// bv.set_range(3, 5);
    /// assert_eq!(bv.count_ones(), 5);
    /// assert!(bv.is_contiguous());
    /// assert!(bv.get(3) && bv.get(7) && !bv.get(8));
    /// ```
    pub fn set_range(&mut self, start: usize, len: usize) {
        if len == 0 {
            return;
        }
        let end = start.saturating_add(len);
        let (last_wi, _) = bitpos!(end - 1);
        self.storage.ensure_word(last_wi);
        storage::fill_range(&mut self.storage, start, end, true);
    }

    /// Clears the `len` bits starting at `start`.
    ///
    /// Bits past the storage are already zero, so the range is clamped to the
    /// storage and nothing grows. `len` may be arbitrarily large.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::from_range(0, 130);
    /// bv.clear_range(10, usize::MAX);
    /// assert_eq!(bv.count_ones(), 10);
    /// ```
    pub fn clear_range(&mut self, start: usize, len: usize) {
        let cap = self.capacity();
        if len == 0 || start >= cap {
            return;
        }
        let end = start.saturating_add(len).min(cap);
        storage::fill_range(&mut self.storage, start, end, false);
    }

    /// Reads the `len`-bit field at `start` as an integer, bit `start`
    /// landing in bit 0 of the result. Bits past the storage read as zero.
    ///
    /// `len` must be in `1..=128`. This is checked in debug builds; in
    /// release builds a zero width reads 0 and wider fields are cut to 128
    /// bits. Either way the result is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::new();
    /// bv.set_bit(2);
    /// bv.set_bit(70);
    /// assert_eq!(bv.get_range(60, 16), 1 << 10);
    /// ```
    #[must_use]
    pub fn get_range(&self, start: usize, len: usize) -> u128 {
        debug_assert!(
            len > 0 && len <= MAX_FIELD_BITS,
            "field width {len} outside 1..={MAX_FIELD_BITS}"
        );
        let len = len.min(MAX_FIELD_BITS);

        let words = self.as_slice();
        let (mut wi, shift) = bitpos!(start);
        let Some(&first) = words.get(wi) else {
            return 0;
        };

        let mut value = u128::from(first >> shift);
        let mut filled = BITS_PER_WORD - shift;
        while filled < len {
            wi += 1;
            let Some(&word) = words.get(wi) else {
                break;
            };
            value |= u128::from(word) << filled;
            filled += BITS_PER_WORD;
        }
        value & low_mask128!(len)
    }

    /// Writes the low `len` bits of `value` into the field at `start`,
    /// growing if needed. Higher bits of `value` are ignored.
    ///
    /// `len` must be in `1..=128`. This is checked in debug builds; in
    /// release builds a zero width writes nothing and wider fields are cut
    /// to 128 bits. Either way the result is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::new();
    /// bv.put_range(60, 8, 0xFFAB);
    /// assert_eq!(bv.get_range(60, 8), 0xAB);
    /// assert!(!bv.get(68));
    /// ```
    pub fn put_range(&mut self, start: usize, len: usize, value: u128) {
        debug_assert!(
            len > 0 && len <= MAX_FIELD_BITS,
            "field width {len} outside 1..={MAX_FIELD_BITS}"
        );
        if len == 0 {
            return;
        }
        let len = len.min(MAX_FIELD_BITS);

        let mask = low_mask128!(len);
        let value = value & mask;
        let (last_wi, _) = bitpos!(start.saturating_add(len - 1));
        self.storage.ensure_word(last_wi);

        let words = &mut *self.storage;
        let (mut wi, shift) = bitpos!(start);
        words[wi] = (words[wi] & !((mask << shift) as Word)) | (value << shift) as Word;

        let mut done = BITS_PER_WORD - shift;
        while done < len {
            wi += 1;
            words[wi] = (words[wi] & !((mask >> done) as Word)) | (value >> done) as Word;
            done += BITS_PER_WORD;
        }
    }

    /// Overwrites the whole vector with `value`, growing if it does not fit
    /// and zeroing every higher word.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::from_range(0, 300);
    /// bv.set_raw(1u128 << 100 | 1);
    /// assert_eq!(bv.iter().collect::<Vec<_>>(), [0, 100]);
    /// ```
    pub fn set_raw(&mut self, value: u128) {
        let words = [value as Word, (value >> BITS_PER_WORD) as Word];
        self.set_raw_words(rtrim0(&words));
    }

    /// Overwrites the vector with `words` (least significant first), growing
    /// if needed and zeroing every higher word.
    pub fn set_raw_words(&mut self, words: &[Word]) {
        if words.len() > self.word_count() {
            self.storage.expand(words.len());
        }
        let (head, tail) = self.storage.split_at_mut(words.len());
        head.copy_from_slice(words);
        tail.fill(0);
    }

    /// Copies the `len` bits at `start` into a new vector, re-based at bit 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let bv: BitVec = [2, 3, 5, 100].into_iter().collect();
    /// let sub = bv.slice(2, 4);
    /// assert_eq!(sub.iter().collect::<Vec<_>>(), [0, 1, 3]);
    /// ```
    #[must_use]
    pub fn slice(&self, start: usize, len: usize) -> Self {
        let cap = self.capacity();
        if len == 0 || start >= cap {
            return Self::new();
        }
        let len = len.min(cap - start);

        let mut words: Vec<Word> = (0..len.div_ceil(BITS_PER_WORD))
            .map(|i| self.get_range(start + i * BITS_PER_WORD, BITS_PER_WORD) as Word)
            .collect();
        let rem = len % BITS_PER_WORD;
        if rem != 0
            && let Some(last) = words.last_mut()
        {
            *last &= (1 << rem) - 1;
        }
        Self::from_storage(Storage::from_words(words))
    }

    /// Index of the lowest set bit at or after `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let bv: BitVec = [5, 64].into_iter().collect();
    /// assert_eq!(bv.find_first_set(0), Some(5));
    /// assert_eq!(bv.find_first_set(6), Some(64));
    /// assert_eq!(bv.find_first_set(65), None);
    /// ```
    #[must_use]
    pub fn find_first_set(&self, start: usize) -> Option<usize> {
        storage::next_set(self.as_slice(), start)
    }

    /// Index of the lowest clear bit at or after `start`. There always is
    /// one, since bits past the storage are zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let bv = BitVec::from(u64::MAX);
    /// assert_eq!(bv.find_first_zero(0), 64);
    /// ```
    #[must_use]
    pub fn find_first_zero(&self, start: usize) -> usize {
        storage::next_zero(self.as_slice(), start)
    }

    /// Lowest set bit, or `None` when empty.
    #[must_use]
    pub fn first(&self) -> Option<usize> {
        self.find_first_set(0)
    }

    /// Highest set bit, or `None` when empty.
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        storage::prev_set(self.as_slice(), self.capacity())
    }

    /// Clears every bit, keeping the allocation.
    pub fn clear(&mut self) {
        self.storage.fill(0);
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().iter().all(|&w| w == 0)
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.as_slice()
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    /// Returns `true` if the set bits form one uninterrupted run.
    ///
    /// An empty vector has no run and is not contiguous.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// assert!(BitVec::from_range(60, 10).is_contiguous());
    /// assert!(!BitVec::from(0b101u64).is_contiguous());
    /// assert!(!BitVec::new().is_contiguous());
    /// ```
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(lo), Some(hi)) => hi - lo + 1 == self.count_ones(),
            _ => false,
        }
    }

    /// Returns an iterator over the indices of set bits, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let bv: BitVec = [10, 200, 3].into_iter().collect();
    /// assert_eq!(bv.iter().collect::<Vec<_>>(), [3, 10, 200]);
    /// assert_eq!(bv.iter().rev().collect::<Vec<_>>(), [200, 10, 3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        let words = self.as_slice_rtrim();
        BitIter {
            words,
            pos: 0,
            rpos: words.len() * BITS_PER_WORD,
        }
    }
}
