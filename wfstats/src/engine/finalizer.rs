//! Statistics bundle and the derivations that produce it.
//!
//! ## Purpose
//!
//! Turns the accumulator's running sums into the reported statistics,
//! computes the median over the in-use values, and solves the least-squares
//! normal equations.
//!
//! ## Key concepts
//!
//! ### Least-squares fit
//!
//! For `y = m·x + c` over the in-use samples:
//!
//! ```text
//! Δ = n·Σx² - (Σx)²
//! m = (n·Σxa - Σx·Σa) / Δ
//! c = (Σa·Σx² - Σx·Σxa) / Δ
//! ```
//!
//! `Δ = 0` happens when `n = 1` (or all abscissae coincide). It is replaced
//! by `1` so both quantities stay finite. With a single in-use sample the
//! slope comes out as `0` and the intercept is taken as the sample value,
//! so the degenerate fit is the horizontal line through that point (see
//! [`least_squares`]).
//!
//! ### Median strategies
//!
//! * [`MedianStrategy::Scratch`] gathers in-use values into a fresh buffer
//!   of length `count` and leaves the samples untouched.
//! * [`MedianStrategy::CompactInPlace`] reuses the sample buffer:
//!   when the mask excluded anything, in-use values are moved to the front
//!   of the sample buffer before the median is taken.
//!
//! Both report the same value.
//!
//! ## Invariants
//!
//! * `min <= mean <= max` and `sum = mean · count` (up to rounding).
//! * `sample_stddev = 0` when `count = 1`, else `sample_stddev >= pop_stddev`.
//! * `rms² >= mean²` (up to rounding).

use core::fmt;
use num_traits::Float;

use crate::engine::accumulator::Accumulator;
use crate::engine::selector::Window;
use crate::math::median::upper_median;
use crate::math::variance::{population_from_moments, sample_from_population};

// ============================================================================
// Configuration
// ============================================================================

/// How the median scratch data is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MedianStrategy {
    /// Copy in-use values into one scratch buffer; never mutate the input.
    #[default]
    Scratch,

    /// Compact in-use values into `samples[0..count)` when the mask excluded
    /// at least one element, then take the median from there.
    CompactInPlace,
}

/// Which identity produces the population variance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VarianceMethod {
    /// `E[a²] - E[a]²` from the raw running sums.
    #[default]
    RawMoments,

    /// Welford's running mean and M2.
    Welford,
}

// ============================================================================
// Statistics
// ============================================================================

/// The output bundle of one invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics<T> {
    /// Arithmetic mean of the in-use values.
    pub mean: T,
    /// Minimum in-use value.
    pub min: T,
    /// Maximum in-use value.
    pub max: T,
    /// Standard deviation with divisor `count - 1`.
    pub sample_stddev: T,
    /// Sum of the in-use values.
    pub sum: T,
    /// Upper-middle median of the in-use values.
    pub median: T,
    /// Least-squares slope `m` in `y = m·x + c`.
    pub slope: T,
    /// Least-squares intercept `c`, the fit at the last window index.
    pub intercept: T,
    /// Largest absolute in-use value.
    pub max_abs: T,
    /// Root mean square.
    pub rms: T,
    /// Standard deviation with divisor `count`.
    pub pop_stddev: T,
    /// Number of in-use values.
    pub count: usize,
}

/// Whether a slot carries a float or the element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticKind {
    Float,
    Count,
}

/// Named output slots, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    Mean,
    Min,
    Max,
    SampleStdDev,
    Sum,
    Median,
    Slope,
    Intercept,
    MaxAbs,
    Rms,
    PopStdDev,
    Count,
}

impl Statistic {
    /// Every slot, in reporting order.
    pub const ALL: [Statistic; 12] = [
        Statistic::Mean,
        Statistic::Min,
        Statistic::Max,
        Statistic::SampleStdDev,
        Statistic::Sum,
        Statistic::Median,
        Statistic::Slope,
        Statistic::Intercept,
        Statistic::MaxAbs,
        Statistic::Rms,
        Statistic::PopStdDev,
        Statistic::Count,
    ];

    pub fn kind(self) -> StatisticKind {
        match self {
            Statistic::Count => StatisticKind::Count,
            _ => StatisticKind::Float,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::SampleStdDev => "sample_stddev",
            Statistic::Sum => "sum",
            Statistic::Median => "median",
            Statistic::Slope => "slope",
            Statistic::Intercept => "intercept",
            Statistic::MaxAbs => "max_abs",
            Statistic::Rms => "rms",
            Statistic::PopStdDev => "pop_stddev",
            Statistic::Count => "count",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<T: Float> Statistics<T> {
    /// Value of one slot; the count is converted to `T`.
    pub fn value(&self, stat: Statistic) -> T {
        match stat {
            Statistic::Mean => self.mean,
            Statistic::Min => self.min,
            Statistic::Max => self.max,
            Statistic::SampleStdDev => self.sample_stddev,
            Statistic::Sum => self.sum,
            Statistic::Median => self.median,
            Statistic::Slope => self.slope,
            Statistic::Intercept => self.intercept,
            Statistic::MaxAbs => self.max_abs,
            Statistic::Rms => self.rms,
            Statistic::PopStdDev => self.pop_stddev,
            Statistic::Count => T::from(self.count).unwrap_or_else(T::nan),
        }
    }

    /// Fitted value at abscissa `x` (relative to the last window index).
    pub fn fit_at(&self, x: T) -> T {
        self.slope * x + self.intercept
    }
}

impl<T: Float + fmt::Display> fmt::Display for Statistics<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Elements used: {}", self.count)?;
        writeln!(f)?;
        for stat in Statistic::ALL {
            if stat == Statistic::Count {
                continue;
            }
            writeln!(f, "  {:<14} {}", stat.name(), self.value(stat))?;
        }
        Ok(())
    }
}

// ============================================================================
// Derivations
// ============================================================================

/// Derive the statistics bundle from the accumulated sums and the median.
pub fn finalize<T: Float>(acc: &Accumulator<T>, median: T, method: VarianceMethod) -> Statistics<T> {
    let n = T::from(acc.count).unwrap_or_else(T::nan);

    let mean = acc.sum_a / n;
    let mean_sq = acc.sum_aa / n;

    let pop_var = match method {
        VarianceMethod::RawMoments => population_from_moments(mean, mean_sq),
        VarianceMethod::Welford => acc.welford.population_variance(),
    };
    let sam_var = sample_from_population(pop_var, acc.count);

    let (slope, intercept) = least_squares(acc);

    Statistics {
        mean,
        min: acc.min_a,
        max: acc.max_a,
        sample_stddev: sam_var.sqrt(),
        sum: acc.sum_a,
        median,
        slope,
        intercept,
        max_abs: acc.max_abs,
        rms: mean_sq.sqrt(),
        pop_stddev: pop_var.sqrt(),
        count: acc.count,
    }
}

/// Solve the normal equations for `(slope, intercept)`.
///
/// A zero determinant is replaced by one. With a single in-use sample the
/// raw intercept expression reduces to zero, so the intercept is taken
/// from `Σa - m·Σx` instead, which is the sample value.
pub fn least_squares<T: Float>(acc: &Accumulator<T>) -> (T, T) {
    let n = T::from(acc.count).unwrap_or_else(T::nan);

    let mut delta = n * acc.sum_xx - acc.sum_x * acc.sum_x;
    if delta == T::zero() {
        delta = T::one();
    }

    let slope = (n * acc.sum_xa - acc.sum_x * acc.sum_a) / delta;
    let intercept = (acc.sum_a * acc.sum_xx - acc.sum_x * acc.sum_xa) / delta;

    if acc.count == 1 {
        return (slope, acc.sum_a - slope * acc.sum_x);
    }
    (slope, intercept)
}

/// Median of the in-use values via a fresh scratch buffer.
///
/// # Panics
///
/// Panics if `window` does not lie within `samples`.
pub fn scratch_median<T: Float>(samples: &[T], window: &Window<'_>, count: usize) -> T {
    let mut scratch: Vec<T> = Vec::with_capacity(count);
    scratch.extend(window.indices().map(|j| samples[j]));
    upper_median(&mut scratch)
}

/// Median of the in-use values after compacting them to the buffer front.
///
/// Compaction only happens when `count < window.size()`; otherwise the
/// window is used where it lies. Either way the selection itself runs on a
/// copy, so after the call `samples[0..count)` (or the unmasked window)
/// keeps its order.
///
/// # Panics
///
/// Panics if `window` does not lie within `samples`.
pub fn compacted_median<T: Float>(samples: &mut [T], window: &Window<'_>, count: usize) -> T {
    let start = if count < window.size() {
        let mut t = 0;
        for j in window.range() {
            if !window.in_use(j) {
                continue;
            }
            samples[t] = samples[j];
            t += 1;
        }
        0
    } else {
        window.offset()
    };

    let mut scratch = samples[start..start + count].to_vec();
    upper_median(&mut scratch)
}
