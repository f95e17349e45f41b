//! Layer 1: Primitives
//!
//! Core building blocks shared by every other layer. This layer has no
//! dependencies on the rest of the crate.
//!
//! # Module Organization
//!
//! - **errors**: Shared error type (`StatsError`)
//! - **mask**: The per-index in-use predicate

/// Shared error types.
///
/// Provides:
/// - Unified `StatsError` enum
/// - Window, mask and builder failure variants
pub mod errors;

/// In-use predicate over an integer mask.
///
/// Provides:
/// - LSB mask evaluation
/// - "All in use" fallback for absent masks and out-of-range indices
pub mod mask;
