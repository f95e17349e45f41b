//! High-level API for waveform statistics.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points. A fluent builder
//! configures the kernel once; the resulting [`WaveformStatistics`] handle
//! is immutable and can be shared freely between threads and reused for any
//! number of invocations.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`StatisticsBuilder`] via `WaveformStatistics::builder()`.
//! 2. Chain configuration methods (`.median_strategy()`, `.variance_method()`).
//! 3. Call `.build()` to validate and obtain the kernel.
//!
//! `WaveformStatistics::new()` skips the builder and uses the defaults.
//!
//! ### Requests
//!
//! A [`Request`] carries the per-invocation inputs other than the samples:
//! offset, requested size, optional sample interval and optional mask.
//!
//! ### Entry points
//!
//! * [`WaveformStatistics::compute`] borrows the samples immutably and
//!   always uses a scratch buffer for the median.
//! * [`WaveformStatistics::compute_mut`] honours the configured
//!   [`MedianStrategy`] and may rearrange the front of the buffer.

use core::result;
use num_traits::Float;

use crate::engine::accumulator::accumulate;
use crate::engine::finalizer::{compacted_median, finalize, scratch_median};
use crate::engine::selector::Selector;

pub use crate::engine::finalizer::{
    MedianStrategy, Statistic, StatisticKind, Statistics, VarianceMethod,
};
pub use crate::primitives::errors::StatsError;

/// Result type alias for kernel operations.
pub type Result<T> = result::Result<T, StatsError>;

// ============================================================================
// Request
// ============================================================================

/// Per-invocation inputs besides the sample buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Request<'a, T> {
    /// Index of the first selected sample.
    pub offset: i32,

    /// Upper bound on the window length.
    pub requested_size: i32,

    /// Sample spacing for the fit; `None` or zero means `1`.
    pub interval: Option<T>,

    /// Integer mask indexed like the samples; only bit 0 is used.
    pub mask: Option<&'a [i32]>,
}

impl<'a, T: Float> Request<'a, T> {
    pub fn new(offset: i32, requested_size: i32) -> Self {
        Self {
            offset,
            requested_size,
            interval: None,
            mask: None,
        }
    }

    pub fn interval(mut self, interval: T) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn mask(mut self, mask: &'a [i32]) -> Self {
        self.mask = Some(mask);
        self
    }

    /// The interval actually used by the fit.
    pub fn resolved_interval(&self) -> T {
        match self.interval {
            Some(dt) if dt != T::zero() => dt,
            _ => T::one(),
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for the statistics kernel.
#[derive(Debug, Clone, Default)]
pub struct StatisticsBuilder {
    /// Median scratch strategy (default: Scratch).
    pub median_strategy: Option<MedianStrategy>,

    /// Population variance identity (default: RawMoments).
    pub variance_method: Option<VarianceMethod>,

    /// Tracks if any parameter was set multiple times (for validation).
    pub(crate) duplicate_param: Option<&'static str>,
}

impl StatisticsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how median scratch data is obtained.
    pub fn median_strategy(mut self, strategy: MedianStrategy) -> Self {
        if self.median_strategy.is_some() {
            self.duplicate_param = Some("median_strategy");
        }
        self.median_strategy = Some(strategy);
        self
    }

    /// Set the population variance identity.
    pub fn variance_method(mut self, method: VarianceMethod) -> Self {
        if self.variance_method.is_some() {
            self.duplicate_param = Some("variance_method");
        }
        self.variance_method = Some(method);
        self
    }

    /// Validate the configuration and produce the kernel.
    pub fn build(self) -> Result<WaveformStatistics> {
        if let Some(parameter) = self.duplicate_param {
            return Err(StatsError::DuplicateParameter { parameter });
        }

        Ok(WaveformStatistics {
            median_strategy: self.median_strategy.unwrap_or_default(),
            variance_method: self.variance_method.unwrap_or_default(),
        })
    }
}

// ============================================================================
// Kernel
// ============================================================================

/// Configured statistics kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveformStatistics {
    median_strategy: MedianStrategy,
    variance_method: VarianceMethod,
}

impl WaveformStatistics {
    /// Kernel with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> StatisticsBuilder {
        StatisticsBuilder::new()
    }

    pub fn median_strategy(&self) -> MedianStrategy {
        self.median_strategy
    }

    pub fn variance_method(&self) -> VarianceMethod {
        self.variance_method
    }

    /// Compute the statistics without touching `samples`.
    pub fn compute<T: Float>(&self, samples: &[T], request: &Request<'_, T>) -> Result<Statistics<T>> {
        let window = Selector::select(
            samples.len(),
            request.offset,
            request.requested_size,
            request.mask,
        )?;
        let acc = accumulate(samples, &window, request.resolved_interval())?;
        let median = scratch_median(samples, &window, acc.count);

        Ok(finalize(&acc, median, self.variance_method))
    }

    /// Compute the statistics, allowing the configured median strategy to
    /// rearrange `samples`.
    ///
    /// With [`MedianStrategy::CompactInPlace`] and a mask that excluded at
    /// least one element, the in-use values end up in `samples[0..count)`.
    /// Nothing is modified when the call fails.
    pub fn compute_mut<T: Float>(
        &self,
        samples: &mut [T],
        request: &Request<'_, T>,
    ) -> Result<Statistics<T>> {
        if self.median_strategy == MedianStrategy::Scratch {
            return self.compute(samples, request);
        }

        let window = Selector::select(
            samples.len(),
            request.offset,
            request.requested_size,
            request.mask,
        )?;
        let acc = accumulate(samples, &window, request.resolved_interval())?;
        let median = compacted_median(samples, &window, acc.count);

        Ok(finalize(&acc, median, self.variance_method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let kernel = WaveformStatistics::new();
        assert_eq!(kernel.median_strategy(), MedianStrategy::Scratch);
        assert_eq!(kernel.variance_method(), VarianceMethod::RawMoments);
        assert_eq!(WaveformStatistics::builder().build().unwrap(), kernel);
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        let err = WaveformStatistics::builder()
            .variance_method(VarianceMethod::Welford)
            .variance_method(VarianceMethod::RawMoments)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            StatsError::DuplicateParameter {
                parameter: "variance_method"
            }
        );
    }

    #[test]
    fn zero_or_absent_interval_resolves_to_one() {
        assert_eq!(Request::<f64>::new(0, 1).resolved_interval(), 1.0);
        assert_eq!(Request::new(0, 1).interval(0.0).resolved_interval(), 1.0);
        assert_eq!(Request::new(0, 1).interval(0.25).resolved_interval(), 0.25);
    }

    #[test]
    fn scratch_strategy_never_mutates() {
        let kernel = WaveformStatistics::new();
        let mask = [1, 0, 1, 0, 1];
        let mut samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = kernel
            .compute_mut(&mut samples, &Request::new(0, 5).mask(&mask))
            .unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(samples, [1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn compact_strategy_rearranges_the_buffer_front() {
        let kernel = WaveformStatistics::builder()
            .median_strategy(MedianStrategy::CompactInPlace)
            .build()
            .unwrap();
        let mask = [1, 0, 1, 0, 1];
        let mut samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = kernel
            .compute_mut(&mut samples, &Request::new(0, 5).mask(&mask))
            .unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(samples, [1.0, 3.0, 5.0, 4.0, 5.0]);
    }

    #[test]
    fn failed_compaction_leaves_the_buffer_alone() {
        let kernel = WaveformStatistics::builder()
            .median_strategy(MedianStrategy::CompactInPlace)
            .build()
            .unwrap();
        let mask = [0, 0, 0];
        let mut samples = [1.0, 2.0, 3.0];
        assert_eq!(
            kernel.compute_mut(&mut samples, &Request::new(0, 3).mask(&mask)),
            Err(StatsError::EmptyAfterMask)
        );
        assert_eq!(samples, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn works_for_f32() {
        let samples = [2.0_f32, 4.0, 6.0];
        let stats = WaveformStatistics::new()
            .compute(&samples, &Request::new(0, 3))
            .unwrap();
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.slope, 2.0);
        assert_eq!(stats.intercept, 6.0);
    }
}
