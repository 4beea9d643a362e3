//! An unbounded bit vector with a single-word inline fast path.
//!
//! This crate provides [`BitVec`], the bit set used by compiler analyses such
//! as liveness, resource allocation and header layout. A vector whose bits
//! all fall in the first 64 lives in one inline word and never allocates.
//! Setting a higher bit moves it to a heap word array, transparently.
//!
//! Every bit that was never set reads as zero, so a `BitVec` behaves like an
//! infinitely wide unsigned integer supporting only bitwise logic.
//!
//! # Features
//!
//! - **Zero allocation** for vectors that fit in one word
//! - **Bit, range and field access**: single bits, runs, and up to 128-bit
//!   integer fields at any offset
//! - **Set algebra** with change reporting, for fixed-point dataflow loops
//! - **Position references** that step between set bits in both directions
//! - **Shifts and bounded rotation**
//! - **`no_std` support** with `alloc`
//!
//! # Examples
//!
//! ```
//! use compact_bitvec::BitVec;
//!
//! let mut live = BitVec::new();
//! live.set_range(3, 5);
//! assert_eq!(live.count_ones(), 5);
//! assert!(live.is_contiguous());
//!
//! let mut defs = BitVec::new();
//! defs.set_bit(4);
//! defs.set_bit(200);
//!
//! // In-place algebra reports whether anything changed.
//! assert!(live.union_with(&defs));
//! assert!(!live.union_with(&defs));
//!
//! // Operators build new vectors.
//! let killed = &live - &defs;
//! assert_eq!(killed.iter().collect::<Vec<_>>(), [3, 5, 6, 7]);
//!
//! // Fields can straddle words.
//! live.put_range(60, 8, 0xA5);
//! assert_eq!(live.get_range(60, 8), 0xA5);
//! ```
//!
//! # Storage Strategy
//!
//! - **Inline**: one 64-bit word, held in the struct
//! - **Heap**: an owned word array, grown in proportionally sized bands
//!
//! Storage never shrinks except by assignment, and equality, ordering and
//! hashing ignore how many words are allocated.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod bitvec;
mod iter;
mod macros;
mod position;
mod set_ops;
mod shift;
mod storage;
mod traits;

// `crate::` keeps `bitvec` from clashing with the benchmark dependency of the
// same name.
pub use crate::bitvec::{BitVec, MAX_FIELD_BITS};
pub use crate::iter::{BitIter, IntoIter, Iter};
pub use crate::position::{BitPos, BitRef, BitRefMut, CopyBitRef};
pub use crate::storage::{BITS_PER_WORD, Word};
pub use crate::traits::{ParseBitVecError, TryFromBitVecError};
