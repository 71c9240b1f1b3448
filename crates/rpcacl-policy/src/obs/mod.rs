//! Lightweight in-process metrics.
//!
//! Decision counters are stored as atomics and rendered in Prometheus text
//! format by whatever endpoint the host service exposes.

pub mod metrics;

pub use metrics::{AclMetrics, CounterVec};
