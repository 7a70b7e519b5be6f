//! Scoring of decoded route assignments.
//!
//! - [`FitnessEvaluator`] — travel cost plus constraint and priority penalties
//! - [`RouteMetrics`] — per-trip utilisation, cost and critical-delivery metrics

mod fitness;
mod metrics;

pub use fitness::{
    FitnessBreakdown, FitnessEvaluator, FitnessWeights, CAPACITY_WEIGHT, CRITICAL_POSITION_WEIGHT,
    CRITICAL_TRIP_QUADRATIC_WEIGHT, CRITICAL_TRIP_WEIGHT, EFFICIENCY_THRESHOLD, EFFICIENCY_WEIGHT,
    HIGH_POSITION_WEIGHT, HIGH_TRIP_WEIGHT, RANGE_WEIGHT,
};
pub use metrics::{MetricSummary, RouteMetrics, TripMetrics};
