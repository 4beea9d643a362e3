/// Splits a bit index into `(word index, bit within word)`.
macro_rules! bitpos {
    ($idx:expr) => {{
        let idx: usize = $idx;
        (
            idx / $crate::storage::BITS_PER_WORD,
            idx % $crate::storage::BITS_PER_WORD,
        )
    }};
}

/// Mask with the low `$len` bits set, for `$len` in `0..=128`.
macro_rules! low_mask128 {
    ($len:expr) => {{
        let len: usize = $len;
        if len >= 128 { !0u128 } else { (1u128 << len) - 1 }
    }};
}

pub(crate) use bitpos;
pub(crate) use low_mask128;
