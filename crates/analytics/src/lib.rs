//! # Crease Analytics Engine
//!
//! This crate turns raw deliveries into player metrics. It is the part of the
//! system that decides what a strike rate, batting average or economy rate
//! actually is, and when one of them cannot be computed.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Total Functions:** Every metric accepts an empty input. A zero denominator yields
//!   `MetricValue::Undefined`, never a panic and never a silent zero.
//!
//! ## Public API
//!
//! - `MetricEngine`: The stateless calculator.
//! - `MetricValue` / `MetricUndefined`: A computed rate, or the reason it has no value.
//! - `PlayerMetrics`: The per-player bundle used by comparisons.
//! - `MetricKind`: Names a metric for selection and display.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::MetricEngine;
pub use error::AnalyticsError;
pub use report::{MetricKind, MetricUndefined, MetricValue, PlayerMetrics};
