use std::num::NonZeroU32;
pub use vec1::vec1;

pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

/// The type of a rolled total. Wide enough that `multiplicand * die_type + addend`
/// cannot overflow for any `UInt` inputs.
pub type Total = u64;

pub type NonEmpty<T> = vec1::Vec1<T>;
