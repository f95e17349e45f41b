//! Variance identities.
//!
//! ## Key concepts
//!
//! ### Raw moments
//!
//! `pop_var = E[a²] - E[a]²` needs only the running sums `Σa` and `Σa²`
//! that the accumulator collects anyway. It loses precision for data with a
//! large mean relative to its spread.
//!
//! ### Welford
//!
//! Tracks the running mean and the sum of squared deviations `M2`:
//!
//! ```text
//! δ   = a - mean
//! mean += δ / k
//! M2  += δ · (a - mean)
//! pop_var = M2 / n
//! ```
//!
//! Both forms agree up to rounding. Rounding can push the raw-moment form
//! slightly below zero; that is clamped to zero.

use num_traits::Float;

/// Population variance from the mean and the mean of squares.
#[inline]
pub fn population_from_moments<T: Float>(mean: T, mean_sq: T) -> T {
    clamp_rounding(mean_sq - mean * mean)
}

/// Sample variance (divisor `n - 1`) from a population variance.
///
/// Zero when fewer than two values contributed.
#[inline]
pub fn sample_from_population<T: Float>(pop_var: T, n: usize) -> T {
    if n < 2 {
        return T::zero();
    }
    let n = T::from(n).unwrap_or_else(T::nan);
    (n * pop_var) / (n - T::one())
}

#[inline]
fn clamp_rounding<T: Float>(var: T) -> T {
    if var < T::zero() {
        T::zero()
    } else {
        var
    }
}

/// Running mean and sum of squared deviations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Welford<T> {
    count: usize,
    mean: T,
    m2: T,
}

impl<T: Float> Default for Welford<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Welford<T> {
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: T::zero(),
            m2: T::zero(),
        }
    }

    /// Fold one value into the running moments.
    #[inline]
    pub fn push(&mut self, a: T) {
        self.count += 1;
        let k = T::from(self.count).unwrap_or_else(T::nan);
        let delta = a - self.mean;
        self.mean = self.mean + delta / k;
        self.m2 = self.m2 + delta * (a - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> T {
        self.mean
    }

    /// Population variance (`M2 / n`); zero before any value was pushed.
    pub fn population_variance(&self) -> T {
        if self.count == 0 {
            return T::zero();
        }
        let n = T::from(self.count).unwrap_or_else(T::nan);
        clamp_rounding(self.m2 / n)
    }
}
