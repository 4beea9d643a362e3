//! Trait implementations for `BitVec`.

use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    convert::TryFrom,
    fmt,
    hash::{Hash, Hasher},
    mem,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign},
    str::FromStr,
};

use crate::{
    BitVec,
    storage::{BITS_PER_WORD, Storage, Word},
};

/// Errors that can occur when parsing text into a [`BitVec`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBitVecError {
    /// A character that is not a digit of the detected radix.
    #[error("invalid character '{ch}' at position {pos} in bit vector literal")]
    InvalidChar {
        /// The offending character
        ch: char,
        /// Its byte offset in the input, prefix included
        pos: usize,
    },

    /// The input holds no digits.
    #[error("cannot parse bit vector from a string without digits")]
    Empty,
}

/// Error type for converting a [`BitVec`] into a primitive integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TryFromBitVecError {
    /// The highest set bit does not fit in the target type.
    #[error("bit vector needs {actual_bits} bits but the target type holds only {max_bits}")]
    TooManyBits {
        /// Width of the target type
        max_bits: usize,
        /// Index of the highest set bit plus one
        actual_bits: usize,
    },
}

impl Default for BitVec {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BitVec {
    fn clone(&self) -> Self {
        Self::from_storage(self.storage.clone())
    }

    /// Reuses the existing storage when the shapes match.
    fn clone_from(&mut self, source: &Self) {
        self.storage.clone_from(&source.storage);
    }
}

impl AsRef<[Word]> for BitVec {
    fn as_ref(&self) -> &[Word] {
        self.as_slice()
    }
}

impl From<Vec<Word>> for BitVec {
    fn from(words: Vec<Word>) -> Self {
        Self::from_storage(Storage::from_words(words))
    }
}

impl From<&[Word]> for BitVec {
    fn from(words: &[Word]) -> Self {
        Self::from(words.to_vec())
    }
}

impl From<BitVec> for Vec<Word> {
    fn from(bv: BitVec) -> Self {
        match bv.storage {
            Storage::Inline(word) => alloc::vec![word],
            Storage::Heap(words) => words.into_vec(),
        }
    }
}

// ============================================================================
// Integers
// ============================================================================

macro_rules! from_narrow_int {
    ($($t:ty),*) => {$(
        impl From<$t> for BitVec {
            fn from(value: $t) -> Self {
                Self::from_storage(Storage::Inline(value as Word))
            }
        }
    )*};
}

from_narrow_int!(u8, u16, u32, u64, usize);

impl From<u128> for BitVec {
    /// Promotes to two words when the high half is nonzero.
    fn from(value: u128) -> Self {
        let mut bv = Self::new();
        bv.set_raw(value);
        bv
    }
}

macro_rules! try_into_int {
    ($($t:ty),*) => {$(
        impl TryFrom<&BitVec> for $t {
            type Error = TryFromBitVecError;

            fn try_from(bv: &BitVec) -> Result<Self, Self::Error> {
                let max_bits = <$t>::BITS as usize;
                if let Some(last) = bv.last()
                    && last >= max_bits
                {
                    return Err(TryFromBitVecError::TooManyBits {
                        max_bits,
                        actual_bits: last + 1,
                    });
                }
                Ok(bv.get_range(0, max_bits) as $t)
            }
        }
    )*};
}

try_into_int!(u8, u16, u32, u64, u128, usize);

// ============================================================================
// Comparison
// ============================================================================

impl PartialEq for BitVec {
    fn eq(&self, other: &Self) -> bool {
        self.bits_eq(other)
    }
}

impl Eq for BitVec {}

impl PartialOrd for BitVec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BitVec {
    /// Orders by the magnitude of the zero-extended bit pattern read as an
    /// unsigned integer.
    fn cmp(&self, other: &Self) -> Ordering {
        self.bits_cmp(other)
    }
}

impl Hash for BitVec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice_rtrim().hash(state);
    }
}

// ============================================================================
// Bitwise Operators
// ============================================================================

// `$with` is the in-place method the operator forwards to. An owned left
// operand keeps its allocation.
macro_rules! bit_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $with:ident) => {
        impl $OpAssign<&BitVec> for BitVec {
            #[inline]
            fn $op_assign(&mut self, rhs: &BitVec) {
                self.$with(rhs);
            }
        }

        impl $OpAssign for BitVec {
            #[inline]
            fn $op_assign(&mut self, rhs: BitVec) {
                self.$with(&rhs);
            }
        }

        impl $Op<&BitVec> for BitVec {
            type Output = BitVec;

            #[inline]
            fn $op(mut self, rhs: &BitVec) -> BitVec {
                self.$with(rhs);
                self
            }
        }

        impl $Op for BitVec {
            type Output = BitVec;

            #[inline]
            fn $op(mut self, rhs: BitVec) -> BitVec {
                self.$with(&rhs);
                self
            }
        }
    };
}

bit_op!(BitAnd, bitand, BitAndAssign, bitand_assign, intersect_with);
bit_op!(BitOr, bitor, BitOrAssign, bitor_assign, union_with);
bit_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, symmetric_difference_with);
bit_op!(Sub, sub, SubAssign, sub_assign, difference_with);

// Both operands borrowed: the result starts as a copy of the left side.
macro_rules! ref_bit_op {
    ($Op:ident, $op:ident, $with:ident) => {
        impl $Op for &BitVec {
            type Output = BitVec;

            #[inline]
            fn $op(self, rhs: Self) -> BitVec {
                let mut out = self.clone();
                out.$with(rhs);
                out
            }
        }
    };
}

ref_bit_op!(BitOr, bitor, union_with);
ref_bit_op!(BitXor, bitxor, symmetric_difference_with);
ref_bit_op!(Sub, sub, difference_with);

impl BitAnd for &BitVec {
    type Output = BitVec;

    /// Copies the operand with fewer words, so the result is never wider
    /// than the narrower side.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let big = BitVec::from_range(0, 10_000);
    /// let small = BitVec::from(0b1010u64);
    /// let both = &big & &small;
    /// assert_eq!(both, small);
    /// assert!(!both.is_spilled());
    /// ```
    #[inline]
    fn bitand(self, rhs: Self) -> BitVec {
        let (narrow, wide) = if self.word_count() <= rhs.word_count() {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let mut out = narrow.clone();
        out.intersect_with(wide);
        out
    }
}

impl BitOrAssign<Word> for BitVec {
    /// ORs a raw word into word 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::from_range(100, 1);
    /// bv |= 0b11u64;
    /// assert_eq!(bv.iter().collect::<Vec<_>>(), [0, 1, 100]);
    /// ```
    #[inline]
    fn bitor_assign(&mut self, rhs: Word) {
        self.union_with_word(rhs);
    }
}

impl BitOr<Word> for BitVec {
    type Output = Self;

    #[inline]
    fn bitor(mut self, rhs: Word) -> Self {
        self.union_with_word(rhs);
        self
    }
}

impl BitOr<Word> for &BitVec {
    type Output = BitVec;

    #[inline]
    fn bitor(self, rhs: Word) -> BitVec {
        self.clone() | rhs
    }
}

// ============================================================================
// Text
// ============================================================================

fn fmt_hex(words: &[Word], f: &mut fmt::Formatter<'_>, upper: bool) -> fmt::Result {
    if f.alternate() {
        f.write_str("0x")?;
    }
    let [rest @ .., hi] = words else {
        return f.write_str("0");
    };
    if upper {
        write!(f, "{hi:X}")?;
    } else {
        write!(f, "{hi:x}")?;
    }
    for &word in rest.iter().rev() {
        if upper {
            write!(f, "{word:016X}")?;
        } else {
            write!(f, "{word:016x}")?;
        }
    }
    Ok(())
}

impl fmt::Display for BitVec {
    /// Hexadecimal, most significant digit first, same as [`fmt::LowerHex`].
    ///
    /// The output parses back with [`FromStr`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::from(0xABu64);
    /// bv.set_bit(64);
    /// let text = bv.to_string();
    /// assert_eq!(text, "100000000000000ab");
    /// assert_eq!(text.parse::<BitVec>(), Ok(bv));
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::LowerHex for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_hex(self.as_slice_rtrim(), f, false)
    }
}

impl fmt::UpperHex for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_hex(self.as_slice_rtrim(), f, true)
    }
}

impl fmt::Binary for BitVec {
    /// Binary, most significant digit first. `{:#b}` adds the `0b` prefix.
    ///
    /// Only the prefixed form parses back with [`FromStr`]: without the
    /// prefix the digits are read as hex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0b")?;
        }
        let [rest @ .., hi] = self.as_slice_rtrim() else {
            return f.write_str("0");
        };
        write!(f, "{hi:b}")?;
        for &word in rest.iter().rev() {
            write!(f, "{word:064b}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitVec {
    /// Formats as the set of set-bit indices.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Parses hex (optionally `0x`-prefixed) or `0b`-prefixed binary into words,
/// least significant first. `_` separators are skipped.
fn parse_words(s: &str) -> Result<Vec<Word>, ParseBitVecError> {
    let (digits, radix, offset): (&str, u32, usize) = if let Some(rest) = s.strip_prefix("0b") {
        (rest, 2, 2)
    } else if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (rest, 16, 2)
    } else {
        (s, 16, 0)
    };
    let digit_bits = radix.trailing_zeros() as usize;

    let mut words = Vec::with_capacity(digits.len().div_ceil(BITS_PER_WORD / digit_bits));
    let mut acc: Word = 0;
    let mut width = 0;
    let mut any = false;
    for (pos, ch) in digits.char_indices().rev() {
        if ch == '_' {
            continue;
        }
        let Some(digit) = ch.to_digit(radix) else {
            let err = ParseBitVecError::InvalidChar {
                ch,
                pos: pos + offset,
            };
            log::debug!("rejecting bit vector literal {s:?}: {err}");
            return Err(err);
        };
        any = true;
        acc |= Word::from(digit) << width;
        width += digit_bits;
        if width == BITS_PER_WORD {
            words.push(mem::take(&mut acc));
            width = 0;
        }
    }

    if !any {
        log::debug!("rejecting bit vector literal {s:?}: no digits");
        return Err(ParseBitVecError::Empty);
    }
    if width != 0 {
        words.push(acc);
    }
    Ok(words)
}

impl FromStr for BitVec {
    type Err = ParseBitVecError;

    /// Parses the [`Display`](fmt::Display) form back into a vector.
    ///
    /// Hex digits are read by default, with or without a `0x` prefix. A
    /// `0b` prefix switches to binary, so a hex literal whose leading digits
    /// are `0b` needs the `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseBitVecError`] if the string has no digits or holds a
    /// character outside the radix.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_bitvec::{BitVec, ParseBitVecError};
    ///
    /// let bv: BitVec = "0b1_0001".parse()?;
    /// assert_eq!(bv.iter().collect::<Vec<_>>(), [0, 4]);
    ///
    /// let bv: BitVec = "0x1_0000_0000_0000_0000".parse()?;
    /// assert_eq!(bv.first(), Some(64));
    ///
    /// assert_eq!(
    ///     "12g4".parse::<BitVec>(),
    ///     Err(ParseBitVecError::InvalidChar { ch: 'g', pos: 2 })
    /// );
    /// # Ok::<(), ParseBitVecError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_words(s).map(Self::from)
    }
}

impl BitVec {
    /// Parses `s` into this vector, reusing its allocation when possible.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseBitVecError`] on malformed input, in which case the
    /// vector is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::from(7u64);
    /// assert!(bv.assign_from_str("zz").is_err());
    /// assert_eq!(bv, BitVec::from(7u64));
    ///
    /// bv.assign_from_str("0x100").unwrap();
    /// assert_eq!(bv.iter().collect::<Vec<_>>(), [8]);
    /// ```
    pub fn assign_from_str(&mut self, s: &str) -> Result<(), ParseBitVecError> {
        let words = parse_words(s)?;
        self.set_raw_words(&words);
        Ok(())
    }
}
