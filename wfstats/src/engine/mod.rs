//! Layer 3: Engine
//!
//! The three stages of one invocation, always run in this order:
//!
//! ```text
//! Selector ──► Accumulator ──► Finalizer
//!  window        one pass        derived statistics,
//!  + in-use      running sums    median, fit
//! ```
//!
//! # Module Organization
//!
//! - **selector**: Resolves the selection window and attaches the in-use predicate
//! - **accumulator**: Single forward pass collecting running sums
//! - **finalizer**: Statistics bundle, median, least-squares fit

/// Selection window resolution.
///
/// Provides:
/// - `[offset, offset + size)` computation and range validation
/// - Iteration over in-use indices
pub mod selector;

/// Single-pass accumulation.
///
/// Provides:
/// - Running sums for moments, extrema and the least-squares fit
/// - Last-point-origin abscissa
pub mod accumulator;

/// Result derivation.
///
/// Provides:
/// - The `Statistics` bundle and its slot enumeration
/// - Scratch and in-place median strategies
/// - Least-squares normal equations
pub mod finalizer;
