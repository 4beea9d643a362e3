//! Position references: a handle to one set bit of one vector.
//!
//! A [`BitPos`] pairs a vector with a bit index and steps between set bits
//! in either direction. How the vector is held decides what the handle may
//! do:
//!
//! - [`BitRef`] borrows it shared and only reads.
//! - [`BitRefMut`] borrows it exclusively and may write the bit.
//! - [`CopyBitRef`] owns a copy, so it can outlive a temporary vector.
//!
//! The terminal position, past the last set bit, has no index.

use core::{borrow::Borrow, fmt, ptr};

use crate::{BitVec, storage};

/// A position within a [`BitVec`], parameterized by how the vector is held.
///
/// Stepping always lands on a set bit or on the terminal position.
/// Stepping forward from the terminal position wraps to the lowest set bit
/// and stepping backward from it wraps to the highest.
///
/// # Examples
///
/// ```
/// use compact_bitvec::BitVec;
///
/// let bv: BitVec = [4, 90, 200].into_iter().collect();
/// let mut pos = bv.min_bit();
/// assert_eq!(pos.index(), Some(4));
/// pos.advance();
/// assert_eq!(pos.index(), Some(90));
/// pos.advance();
/// pos.advance();
/// assert!(pos.is_end());
/// assert_eq!(pos, bv.end());
/// ```
pub struct BitPos<S: Borrow<BitVec>> {
    vec: S,
    idx: Option<usize>,
}

/// Read-only position in a borrowed vector.
pub type BitRef<'a> = BitPos<&'a BitVec>;

/// Position in an exclusively borrowed vector; can write its bit.
pub type BitRefMut<'a> = BitPos<&'a mut BitVec>;

/// Read-only position that owns a copy of its vector.
pub type CopyBitRef = BitPos<BitVec>;

impl<S: Borrow<BitVec>> BitPos<S> {
    pub(crate) const fn new(vec: S, idx: Option<usize>) -> Self {
        Self { vec, idx }
    }

    /// The bit index, or `None` at the terminal position.
    #[must_use]
    #[inline]
    pub const fn index(&self) -> Option<usize> {
        self.idx
    }

    /// Returns `true` at the terminal position.
    #[must_use]
    #[inline]
    pub const fn is_end(&self) -> bool {
        self.idx.is_none()
    }

    /// The referenced vector.
    #[must_use]
    #[inline]
    pub fn vec(&self) -> &BitVec {
        self.vec.borrow()
    }

    /// Value of the referenced bit; `false` at the terminal position.
    #[must_use]
    pub fn get(&self) -> bool {
        self.idx.is_some_and(|i| self.vec().get(i))
    }

    /// Moves to the next set bit above the current one.
    pub fn advance(&mut self) -> &mut Self {
        let from = self.idx.map_or(0, |i| i.saturating_add(1));
        self.idx = storage::next_set(self.vec().as_slice(), from);
        self
    }

    /// Moves to the previous set bit below the current one.
    pub fn retreat(&mut self) -> &mut Self {
        let below = self.idx.unwrap_or_else(|| self.vec().capacity());
        self.idx = storage::prev_set(self.vec().as_slice(), below);
        self
    }

    /// Consumes the position, returning how the vector was held.
    pub fn into_inner(self) -> S {
        self.vec
    }
}

impl BitPos<&mut BitVec> {
    /// Writes the referenced bit and returns its previous value.
    ///
    /// The index stays put even when the bit is cleared, so the next step
    /// still continues from here.
    ///
    /// # Panics
    ///
    /// Panics at the terminal position, which has no bit to write.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::from(0b1010u64);
    /// let mut pos = bv.min_bit_mut();
    /// assert!(pos.set(false));
    /// pos.advance();
    /// assert_eq!(pos.index(), Some(3));
    /// assert_eq!(bv.as_slice(), &[0b1000]);
    /// ```
    pub fn set(&mut self, value: bool) -> bool {
        let Some(i) = self.idx else {
            panic!("cannot write through the terminal bit position");
        };
        self.vec.replace(i, value)
    }
}

impl<S: Borrow<BitVec> + Clone> Clone for BitPos<S> {
    fn clone(&self) -> Self {
        Self {
            vec: self.vec.clone(),
            idx: self.idx,
        }
    }
}

impl<S: Borrow<BitVec>> fmt::Debug for BitPos<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitPos")
            .field("index", &self.idx)
            .field("bit", &self.get())
            .finish()
    }
}

// Borrowing positions are equal when they point into the same vector.
impl PartialEq for BitRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.vec, other.vec) && self.idx == other.idx
    }
}

impl Eq for BitRef<'_> {}

impl PartialEq for BitRefMut<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(&*self.vec, &*other.vec) && self.idx == other.idx
    }
}

impl Eq for BitRefMut<'_> {}

// Each copy is its own vector, so identity falls back to the bit pattern.
impl PartialEq for CopyBitRef {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx && self.vec == other.vec
    }
}

impl Eq for CopyBitRef {}

impl BitVec {
    /// Position of the lowest set bit, or the terminal position when empty.
    #[must_use]
    pub fn min_bit(&self) -> BitRef<'_> {
        BitPos::new(self, self.first())
    }

    /// Position of the highest set bit, or the terminal position when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let bv: BitVec = [1, 64, 130].into_iter().collect();
    /// let mut pos = bv.max_bit();
    /// let mut seen = Vec::new();
    /// while let Some(i) = pos.index() {
    ///     seen.push(i);
    ///     pos.retreat();
    /// }
    /// assert_eq!(seen, [130, 64, 1]);
    /// ```
    #[must_use]
    pub fn max_bit(&self) -> BitRef<'_> {
        BitPos::new(self, self.last())
    }

    /// Same as [`min_bit`](Self::min_bit).
    #[must_use]
    pub fn begin(&self) -> BitRef<'_> {
        self.min_bit()
    }

    /// The terminal position.
    #[must_use]
    pub fn end(&self) -> BitRef<'_> {
        BitPos::new(self, None)
    }

    /// Position at bit `i`, whether or not it is set.
    #[must_use]
    pub fn bit(&self, i: usize) -> BitRef<'_> {
        BitPos::new(self, Some(i))
    }

    /// Writable position of the lowest set bit.
    pub fn min_bit_mut(&mut self) -> BitRefMut<'_> {
        let idx = self.first();
        BitPos::new(self, idx)
    }

    /// Writable position of the highest set bit.
    pub fn max_bit_mut(&mut self) -> BitRefMut<'_> {
        let idx = self.last();
        BitPos::new(self, idx)
    }

    /// Same as [`min_bit_mut`](Self::min_bit_mut).
    pub fn begin_mut(&mut self) -> BitRefMut<'_> {
        self.min_bit_mut()
    }

    /// Writable terminal position.
    pub fn end_mut(&mut self) -> BitRefMut<'_> {
        BitPos::new(self, None)
    }

    /// Writable position at bit `i`, whether or not it is set.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let mut bv = BitVec::new();
    /// assert!(!bv.bit_mut(100).set(true));
    /// assert!(bv.get(100));
    /// ```
    pub fn bit_mut(&mut self, i: usize) -> BitRefMut<'_> {
        BitPos::new(self, Some(i))
    }

    /// Owning position of the lowest set bit, for vectors that are
    /// temporaries.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compact_bitvec::BitVec;
    /// let a = BitVec::from_range(0, 8);
    /// let b = BitVec::from_range(5, 8);
    /// let pos = (&a & &b).into_min_bit();
    /// assert_eq!(pos.index(), Some(5));
    /// ```
    #[must_use]
    pub fn into_min_bit(self) -> CopyBitRef {
        let idx = self.first();
        BitPos::new(self, idx)
    }

    /// Owning position of the highest set bit.
    #[must_use]
    pub fn into_max_bit(self) -> CopyBitRef {
        let idx = self.last();
        BitPos::new(self, idx)
    }

    /// Same as [`into_min_bit`](Self::into_min_bit).
    #[must_use]
    pub fn into_begin(self) -> CopyBitRef {
        self.into_min_bit()
    }

    /// Owning terminal position.
    #[must_use]
    pub fn into_end(self) -> CopyBitRef {
        BitPos::new(self, None)
    }
}
