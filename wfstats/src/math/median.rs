//! Median of a multiset of in-use values.
//!
//! ## Design notes
//!
//! * The reported median is `sorted[n / 2]`: for an even count this is the
//!   upper of the two middle elements. The two middles are never averaged.
//! * Uses in-place selection (`select_nth_unstable_by`) on a caller-owned
//!   scratch buffer, O(n) on average. The element placed at `n / 2` is the
//!   one a full ascending sort would put there.
//! * NaN compares greater than every number and equal to itself, so the
//!   ordering is total and selection never sees an inconsistent comparator.
//!
//! ## Invariants
//!
//! * For a non-empty input the result is one of the input values.
//! * `min <= median <= max` for NaN-free input.

use core::cmp::Ordering;
use num_traits::Float;

/// Ascending order with NaN placed after every number.
#[inline]
pub fn ascending<T: Float>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Return the upper-middle element of `values`, reordering the buffer.
///
/// An empty buffer yields NaN; the engine never calls this with fewer than
/// one value.
pub fn upper_median<T: Float>(values: &mut [T]) -> T {
    let n = values.len();
    if n == 0 {
        return T::nan();
    }

    let mid = n / 2;
    values.select_nth_unstable_by(mid, ascending);
    values[mid]
}
