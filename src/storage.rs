//! Word storage for [`BitVec`](crate::BitVec) and the word-scanning
//! primitives shared by iteration, position references and the set algebra.

use alloc::{boxed::Box, vec, vec::Vec};
use core::{
    ops::{Deref, DerefMut},
    slice,
};

use crate::macros::bitpos;

/// The storage granule.
pub type Word = u64;

/// Number of bits held by one [`Word`].
pub const BITS_PER_WORD: usize = Word::BITS as usize;

/// Backing store of a bit vector.
///
/// A single word lives inline; anything wider is an exclusively owned heap
/// array of at least two words. The word count only changes through
/// [`expand`](Self::expand) or by replacing the whole value.
#[derive(Debug)]
pub(crate) enum Storage {
    /// Exactly one word, no allocation.
    Inline(Word),
    /// Two or more words on the heap.
    Heap(Box<[Word]>),
}

impl Default for Storage {
    #[inline]
    fn default() -> Self {
        Self::Inline(0)
    }
}

impl Clone for Storage {
    fn clone(&self) -> Self {
        match self {
            Self::Inline(word) => Self::Inline(*word),
            Self::Heap(words) => Self::Heap(words.clone()),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        match (&mut *self, source) {
            (Self::Inline(dst), Self::Inline(src)) => *dst = *src,
            (Self::Heap(dst), Self::Heap(src)) if dst.len() == src.len() => {
                dst.copy_from_slice(src);
            }
            _ => *self = source.clone(),
        }
    }
}

impl Storage {
    /// Builds storage holding exactly `words`, inline when it is one word or
    /// less.
    pub(crate) fn from_words(words: Vec<Word>) -> Self {
        match *words.as_slice() {
            [] => Self::Inline(0),
            [word] => Self::Inline(word),
            _ => Self::Heap(words.into_boxed_slice()),
        }
    }

    /// Zeroed storage of at least `len` words.
    pub(crate) fn zeroed(len: usize) -> Self {
        if len <= 1 {
            Self::Inline(0)
        } else {
            Self::Heap(vec![0; len].into_boxed_slice())
        }
    }

    #[inline(always)]
    pub(crate) const fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }

    /// Word `i`, or zero past the end.
    #[inline(always)]
    pub(crate) fn word(&self, i: usize) -> Word {
        match self {
            Self::Inline(word) if i == 0 => *word,
            Self::Inline(_) => 0,
            Self::Heap(words) => words.get(i).copied().unwrap_or(0),
        }
    }

    /// Grows to hold at least `new_len` words. Existing words keep their
    /// positions and every new word is zero.
    #[cold]
    pub(crate) fn expand(&mut self, new_len: usize) {
        let old_len = self.len();
        debug_assert!(new_len > old_len, "expand must grow the storage");
        let new_len = grown_len(new_len);
        log::trace!("bit vector storage grows from {old_len} to {new_len} words");

        let mut words = vec![0; new_len];
        words[..old_len].copy_from_slice(&self[..old_len]);
        *self = Self::Heap(words.into_boxed_slice());
    }

    /// Grows so that word index `wi` exists.
    #[inline]
    pub(crate) fn ensure_word(&mut self, wi: usize) {
        if wi >= self.len() {
            self.expand(wi + 1);
        }
    }
}

/// Rounds a requested word count up to the growth band it falls in.
///
/// With `m = n / 8` smeared to `2^k - 1`, `n` is rounded up to a multiple of
/// `m + 1`. Large vectors get proportionally sized bands instead of
/// doubling, and the slack stays under a quarter of the request.
pub(crate) const fn grown_len(n: usize) -> usize {
    let mut m = n >> 3;
    if m == 0 {
        return n;
    }
    m |= m >> 1;
    m |= m >> 2;
    m |= m >> 4;
    m |= m >> 8;
    m |= m >> 16;
    (n + m) & !m
}

impl Deref for Storage {
    type Target = [Word];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        match self {
            Self::Inline(word) => slice::from_ref(word),
            Self::Heap(words) => words,
        }
    }
}

impl DerefMut for Storage {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Inline(word) => slice::from_mut(word),
            Self::Heap(words) => words,
        }
    }
}

/// Removes trailing zero words from a slice.
#[inline]
pub(crate) const fn rtrim0(mut words: &[Word]) -> &[Word] {
    while let [rest @ .., 0] = words {
        words = rest;
    }
    words
}

/// Index of the lowest set bit at or after `from`.
pub(crate) fn next_set(words: &[Word], from: usize) -> Option<usize> {
    let (mut wi, bi) = bitpos!(from);
    let mut w = *words.get(wi)? & (Word::MAX << bi);
    loop {
        if w != 0 {
            return Some(wi * BITS_PER_WORD + w.trailing_zeros() as usize);
        }
        wi += 1;
        w = *words.get(wi)?;
    }
}

/// Index of the highest set bit strictly below `end`.
pub(crate) fn prev_set(words: &[Word], end: usize) -> Option<usize> {
    let end = end.min(words.len() * BITS_PER_WORD);
    if end == 0 {
        return None;
    }
    let (mut wi, bi) = bitpos!(end - 1);
    let mut w = words[wi] & (Word::MAX >> (BITS_PER_WORD - 1 - bi));
    loop {
        if w != 0 {
            return Some(wi * BITS_PER_WORD + (BITS_PER_WORD - 1) - w.leading_zeros() as usize);
        }
        if wi == 0 {
            return None;
        }
        wi -= 1;
        w = words[wi];
    }
}

/// Index of the lowest clear bit at or after `from`. Always exists since
/// everything past the stored words reads as zero.
pub(crate) fn next_zero(words: &[Word], from: usize) -> usize {
    let (mut wi, bi) = bitpos!(from);
    let word_at = |i: usize| words.get(i).copied().unwrap_or(0);
    let mut w = !word_at(wi) & (Word::MAX << bi);
    while w == 0 {
        wi += 1;
        w = !word_at(wi);
    }
    wi * BITS_PER_WORD + w.trailing_zeros() as usize
}

/// Number of set bits in `[beg, end)`.
pub(crate) fn count_ones_range(words: &[Word], beg: usize, end: usize) -> usize {
    let end = end.min(words.len() * BITS_PER_WORD);
    if beg >= end {
        return 0;
    }
    let (beg_wi, beg_bi) = bitpos!(beg);
    let (end_wi, end_bi) = bitpos!(end);

    if beg_wi == end_wi {
        let mask: Word = ((1 << (end_bi - beg_bi)) - 1) << beg_bi;
        return (words[beg_wi] & mask).count_ones() as usize;
    }

    let mut count = (words[beg_wi] & (Word::MAX << beg_bi)).count_ones() as usize;
    count += words[beg_wi + 1..end_wi]
        .iter()
        .map(|w| w.count_ones() as usize)
        .sum::<usize>();
    if end_bi > 0 {
        let mask: Word = (1 << end_bi) - 1;
        count += (words[end_wi] & mask).count_ones() as usize;
    }
    count
}

/// Sets or clears `[beg, end)` with partial-low, whole-middle and
/// partial-high word masks. The range must lie inside `words`.
pub(crate) fn fill_range(words: &mut [Word], beg: usize, end: usize, value: bool) {
    if beg >= end {
        return;
    }
    debug_assert!(end <= words.len() * BITS_PER_WORD, "range past storage");

    let apply = |word: &mut Word, mask: Word| {
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    };

    let (beg_wi, beg_bi) = bitpos!(beg);
    let (end_wi, end_bi) = bitpos!(end);

    if beg_wi == end_wi {
        apply(&mut words[beg_wi], ((1 << (end_bi - beg_bi)) - 1) << beg_bi);
        return;
    }

    apply(&mut words[beg_wi], Word::MAX << beg_bi);
    words[beg_wi + 1..end_wi].fill(if value { Word::MAX } else { 0 });
    if end_bi > 0 {
        apply(&mut words[end_wi], (1 << end_bi) - 1);
    }
}
