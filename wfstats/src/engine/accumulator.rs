//! Single-pass accumulation over the selection window.
//!
//! ## Purpose
//!
//! Walks the window once, front to back, and folds every in-use sample into
//! a fixed set of running sums. Everything the finalizer reports except the
//! median is derived from these sums.
//!
//! ## Key concepts
//!
//! ### Abscissa origin
//!
//! The least-squares abscissa of index `j` is
//!
//! ```text
//! x = (j - last_point) · interval,   last_point = offset + size - 1
//! ```
//!
//! so the last selected index sits at `x = 0` and every other abscissa is
//! negative. This keeps `|x|` small for windows deep into a long buffer,
//! and makes the fitted intercept the value of the fit at the last sample.
//! `last_point` is the end of the window, not the last in-use index.
//!
//! ### Collected state
//!
//! * `Σa`, `Σa²` for mean, variance and RMS
//! * min, max, max |a|
//! * `Σx`, `Σx²`, `Σxa` for the normal equations
//! * Welford mean / M2 for the alternate variance form
//! * the in-use count
//!
//! ## Invariants
//!
//! * `count` equals the number of in-use indices visited.
//! * With `count >= 1`: `min <= max` and `max_abs >= max(|min|, |max|)`.

use num_traits::Float;

use crate::engine::selector::Window;
use crate::math::variance::Welford;
use crate::primitives::errors::StatsError;

/// Running sums for one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator<T> {
    pub sum_a: T,
    pub sum_aa: T,
    pub min_a: T,
    pub max_a: T,
    pub max_abs: T,
    pub sum_x: T,
    pub sum_xx: T,
    pub sum_xa: T,
    pub count: usize,
    pub welford: Welford<T>,
}

impl<T: Float> Default for Accumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Accumulator<T> {
    pub fn new() -> Self {
        Self {
            sum_a: T::zero(),
            sum_aa: T::zero(),
            min_a: T::infinity(),
            max_a: T::neg_infinity(),
            max_abs: T::zero(),
            sum_x: T::zero(),
            sum_xx: T::zero(),
            sum_xa: T::zero(),
            count: 0,
            welford: Welford::new(),
        }
    }

    /// Fold sample `a` observed at abscissa `x`.
    #[inline]
    pub fn push(&mut self, a: T, x: T) {
        self.sum_a = self.sum_a + a;
        self.sum_aa = self.sum_aa + a * a;

        self.min_a = self.min_a.min(a);
        self.max_a = self.max_a.max(a);
        self.max_abs = self.max_abs.max(a.abs());

        // a plays the role of y
        self.sum_x = self.sum_x + x;
        self.sum_xx = self.sum_xx + x * x;
        self.sum_xa = self.sum_xa + x * a;

        self.welford.push(a);
        self.count += 1;
    }
}

/// Run the accumulation pass over `window`.
///
/// `interval` must already be resolved (non-zero). Fails with
/// [`StatsError::EmptyAfterMask`] when no index of the window is in use.
pub fn accumulate<T: Float>(
    samples: &[T],
    window: &Window<'_>,
    interval: T,
) -> Result<Accumulator<T>, StatsError> {
    let last_point = window.last_point();
    let mut acc = Accumulator::new();

    for (j, &a) in samples
        .iter()
        .enumerate()
        .skip(window.offset())
        .take(window.size())
    {
        if !window.in_use(j) {
            continue;
        }
        let steps = T::from(last_point - j).unwrap_or_else(T::nan);
        acc.push(a, -steps * interval);
    }

    if acc.count == 0 {
        return Err(StatsError::EmptyAfterMask);
    }
    Ok(acc)
}
