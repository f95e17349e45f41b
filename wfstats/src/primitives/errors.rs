//! Error types for the statistics kernel.
//!
//! Every failure is fatal to the current invocation. Degenerate but
//! well-defined situations (single element variance, coincident abscissae)
//! are absorbed by the engine and never surface here.

use thiserror::Error;

/// Failures reported by the statistics kernel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// The selection window `min(len - offset, requested)` is empty, or the
    /// offset lies before the start of the buffer.
    #[error(
        "window size, min of (len={len} - offset={offset}, requested={requested}), must be at least 1"
    )]
    InvalidRange {
        /// Number of available samples.
        len: usize,
        /// Requested start index.
        offset: i64,
        /// Requested window length.
        requested: i64,
    },

    /// The mask excluded every index of the selection window.
    #[error("at least one element must be included")]
    EmptyAfterMask,

    /// A builder parameter was configured more than once.
    #[error("parameter `{parameter}` was set more than once")]
    DuplicateParameter {
        /// Name of the repeated builder method.
        parameter: &'static str,
    },
}
