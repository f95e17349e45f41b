//! In-use predicate for masked sample windows.
//!
//! ## Key concepts
//!
//! An index `j` is in use when any of the following holds:
//!
//! * no integer mask was supplied,
//! * `j` lies at or beyond the end of the mask,
//! * the least significant bit of `mask[j]` is set.
//!
//! Only bit 0 is significant; all other bits are ignored. The mask is indexed
//! with the same absolute index as the samples, so a window offset applies
//! to both.

/// Lazily evaluated in-use predicate over an optional integer mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InUse<'a> {
    mask: Option<&'a [i32]>,
}

impl<'a> InUse<'a> {
    /// Predicate that accepts every index.
    pub fn all() -> Self {
        Self { mask: None }
    }

    /// Predicate driven by the LSB of each mask element.
    pub fn from_mask(mask: &'a [i32]) -> Self {
        Self { mask: Some(mask) }
    }

    /// Predicate for an optional mask; `None` accepts every index.
    pub fn new(mask: Option<&'a [i32]>) -> Self {
        Self { mask }
    }

    /// Whether a mask is attached.
    pub fn is_masked(&self) -> bool {
        self.mask.is_some()
    }

    /// Evaluate the predicate at absolute index `j`.
    #[inline]
    pub fn contains(&self, j: usize) -> bool {
        match self.mask {
            None => true,
            Some(mask) => mask.get(j).map_or(true, |bits| bits & 1 == 1),
        }
    }
}
