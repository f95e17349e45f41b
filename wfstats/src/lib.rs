//! Waveform statistics kernel.
//!
//! Computes a fixed bundle of descriptive statistics and a linear
//! least-squares fit over a selected, optionally masked, window of a sample
//! buffer in a single pass.
//!
//! # Quick start
//!
//! ```
//! use wfstats::prelude::*;
//!
//! let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let kernel = WaveformStatistics::new();
//! let stats = kernel.compute(&samples, &Request::new(0, 5)).unwrap();
//!
//! assert_eq!(stats.count, 5);
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! assert_eq!(stats.slope, 1.0);
//! assert_eq!(stats.intercept, 5.0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API (builder, request, entry points)
//!   ↓
//! Layer 3: Engine (selector → accumulator → finalizer)
//!   ↓
//! Layer 2: Math (median, variance)
//!   ↓
//! Layer 1: Primitives (errors, in-use mask)
//! ```
//!
//! Each call is stateless: nothing is retained between invocations, so
//! parallel calls over disjoint buffers need no coordination.

pub mod api;
pub mod engine;
pub mod math;
pub mod primitives;

/// Commonly used types.
pub mod prelude {
    pub use crate::api::{
        MedianStrategy, Request, StatisticsBuilder, VarianceMethod, WaveformStatistics,
    };
    pub use crate::engine::finalizer::{Statistic, StatisticKind, Statistics};
    pub use crate::primitives::errors::StatsError;
}

/// Lower-level building blocks, for hosts that drive the stages directly.
pub mod internals {
    pub use crate::engine::accumulator::{accumulate, Accumulator};
    pub use crate::engine::finalizer::{compacted_median, finalize, least_squares, scratch_median};
    pub use crate::engine::selector::{Selector, Window};
    pub use crate::math::median::upper_median;
    pub use crate::math::variance::Welford;
    pub use crate::primitives::mask::InUse;
}
