//! Selection window resolution.
//!
//! ## Purpose
//!
//! Resolves the effective index range `[offset, offset + size)` from the
//! buffer length and the host-supplied offset and requested size, and pairs
//! it with the in-use predicate that the later stages evaluate lazily.
//!
//! ## Key concepts
//!
//! ```text
//! size = min(len - offset, requested)
//! ```
//!
//! A window is valid when `size >= 1` and `offset >= 0`. A negative
//! requested size, an offset at or past the end of the buffer, and an empty
//! buffer all collapse into `size < 1`. Arithmetic is carried out in `i64`
//! so that no combination of 32-bit inputs can overflow.
//!
//! ## Non-goals
//!
//! * This module does not look at sample values.
//! * This module does not count in-use indices (the accumulator does).

use core::ops::Range;

use crate::primitives::errors::StatsError;
use crate::primitives::mask::InUse;

/// A validated selection window with its in-use predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    offset: usize,
    size: usize,
    in_use: InUse<'a>,
}

impl<'a> Window<'a> {
    /// First selected index.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of selected indices, before masking.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Last selected index; the least-squares abscissa origin.
    pub fn last_point(&self) -> usize {
        self.offset + self.size - 1
    }

    /// Absolute index range of the window.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.size
    }

    /// Whether absolute index `j` passes the mask.
    #[inline]
    pub fn in_use(&self, j: usize) -> bool {
        self.in_use.contains(j)
    }

    /// Whether a mask is attached to this window.
    pub fn is_masked(&self) -> bool {
        self.in_use.is_masked()
    }

    /// In-use indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + 'a {
        let in_use = self.in_use;
        self.range().filter(move |&j| in_use.contains(j))
    }
}

/// Window selection rules.
pub struct Selector;

impl Selector {
    /// Resolve the window over a buffer of `len` samples.
    pub fn select<'a>(
        len: usize,
        offset: i32,
        requested_size: i32,
        mask: Option<&'a [i32]>,
    ) -> Result<Window<'a>, StatsError> {
        let available = i64::try_from(len).unwrap_or(i64::MAX) - i64::from(offset);
        let size = available.min(i64::from(requested_size));

        if size < 1 || offset < 0 {
            return Err(StatsError::InvalidRange {
                len,
                offset: offset.into(),
                requested: requested_size.into(),
            });
        }

        // Both bounded by `len` at this point.
        Ok(Window {
            offset: offset as usize,
            size: size as usize,
            in_use: InUse::new(mask),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_size_is_capped_by_available_samples() {
        let w = Selector::select(4, 1, 10, None).unwrap();
        assert_eq!(w.offset(), 1);
        assert_eq!(w.size(), 3);
        assert_eq!(w.last_point(), 3);
        assert_eq!(w.range(), 1..4);
    }

    #[test]
    fn requested_size_limits_the_window() {
        let w = Selector::select(100, 10, 5, None).unwrap();
        assert_eq!(w.range(), 10..15);
    }

    #[test]
    fn offset_at_end_is_invalid() {
        let err = Selector::select(2, 2, 5, None).unwrap_err();
        assert_eq!(
            err,
            StatsError::InvalidRange {
                len: 2,
                offset: 2,
                requested: 5
            }
        );
    }

    #[test]
    fn non_positive_requested_size_is_invalid() {
        assert!(Selector::select(5, 0, 0, None).is_err());
        assert!(Selector::select(5, 0, -3, None).is_err());
    }

    #[test]
    fn negative_offset_is_invalid() {
        assert!(matches!(
            Selector::select(5, -1, 3, None),
            Err(StatsError::InvalidRange { offset: -1, .. })
        ));
    }

    #[test]
    fn extreme_inputs_do_not_overflow() {
        assert!(Selector::select(3, i32::MIN, i32::MAX, None).is_err());
        let w = Selector::select(3, 0, i32::MAX, None).unwrap();
        assert_eq!(w.size(), 3);
    }

    #[test]
    fn indices_honour_the_mask() {
        let mask = [1, 0, 1, 0, 1];
        let w = Selector::select(5, 0, 5, Some(&mask)).unwrap();
        assert!(w.is_masked());
        assert_eq!(w.indices().collect::<Vec<_>>(), vec![0, 2, 4]);
    }

    #[test]
    fn mask_is_indexed_absolutely() {
        let mask = [0, 0, 1];
        let w = Selector::select(6, 2, 3, Some(&mask)).unwrap();
        // index 2 set, 3 and 4 lie past the mask
        assert_eq!(w.indices().collect::<Vec<_>>(), vec![2, 3, 4]);
    }
}
