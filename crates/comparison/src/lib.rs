//! Two-player comparisons over a loaded dataset.
//!
//! `ComparisonService` validates a selection, computes both players' metrics
//! with `analytics::MetricEngine`, and decides which optional metrics apply.

pub mod error;
pub mod result;
pub mod service;

pub use error::RejectionReason;
pub use result::ComparisonResult;
pub use service::ComparisonService;
