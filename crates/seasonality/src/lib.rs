//! # Almanac Seasonality Engine
//!
//! This crate turns monthly price aggregates into historical seasonality
//! statistics: simulated rolling returns, per-month summaries, benchmark
//! alpha, and robustness signals (outlier flags, trimmed means).
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems and depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every entry point takes immutable price
//!   records and returns freshly derived values. Nothing is cached or
//!   mutated, so identical inputs always produce identical outputs and
//!   concurrent queries share no state.
//!
//! ## Public API
//!
//! - `SeasonalityEngine`: assembles a full heatmap (cells, aggregates with
//!   alpha, per-month robustness stats) for one ticker.
//! - `simulate_returns` / `aggregate_by_month` / `benchmark_baseline` /
//!   `apply_alpha`: the individual calculation stages.
//! - `stats`: the shared outlier-detection and trimmed-mean module.
//! - `SeasonalityError`: the specific error types returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod alpha;
pub mod benchmark;
pub mod engine;
pub mod error;
pub mod returns;
pub mod rounding;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{aggregate_by_month, yearly_returns_by_month};
pub use alpha::{apply_alpha, per_month};
pub use benchmark::benchmark_baseline;
pub use engine::{Heatmap, HeatmapQuery, SeasonalityEngine};
pub use error::SeasonalityError;
pub use returns::simulate_returns;
pub use rounding::round2;
pub use stats::{detect_outlier, monthly_stats, trimmed_mean, MonthStats};
