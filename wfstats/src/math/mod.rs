//! Layer 2: Math
//!
//! Pure numeric helpers with no knowledge of windows or masks.
//!
//! # Module Organization
//!
//! - **median**: Upper-middle selection over a scratch buffer
//! - **variance**: Raw-moment and Welford variance identities

/// Median selection.
///
/// Provides:
/// - Upper-middle median (no averaging for even counts)
/// - NaN-tolerant total ordering for the selection
pub mod median;

/// Variance identities.
///
/// Provides:
/// - `E[a²] - E[a]²` population variance with rounding clamp
/// - Welford running mean / M2 accumulator
/// - Population to sample variance conversion
pub mod variance;
