//! Multi-term fitness function for decoded route assignments.
//!
//! Fitness = total travel cost + capacity, range, cost-efficiency and
//! priority penalties. Lower is better. Penalties grow continuously with the
//! size of the violation, so near-feasible assignments rank above grossly
//! infeasible ones.

use serde::{Deserialize, Serialize};

use crate::distance::route_distance;
use crate::error::Result;
use crate::models::{FleetRegistry, Location, Priority, RouteAssignment};

/// Penalty per load unit above a vehicle's capacity (soft constraint).
pub const CAPACITY_WEIGHT: f64 = 100.0;
/// Penalty per distance unit above a vehicle's range.
pub const RANGE_WEIGHT: f64 = 200.0;
/// Per-delivery travel cost above which a trip counts as inefficient.
pub const EFFICIENCY_THRESHOLD: f64 = 5.0;
/// Penalty per cost unit above [`EFFICIENCY_THRESHOLD`].
pub const EFFICIENCY_WEIGHT: f64 = 5.0;
/// Critical delivery: penalty per trip rank.
pub const CRITICAL_TRIP_WEIGHT: f64 = 12.0;
/// Critical delivery: penalty per squared trip rank.
pub const CRITICAL_TRIP_QUADRATIC_WEIGHT: f64 = 2.0;
/// Critical delivery: penalty per stop position within the trip.
pub const CRITICAL_POSITION_WEIGHT: f64 = 1.5;
/// High-priority delivery: penalty per trip rank.
pub const HIGH_TRIP_WEIGHT: f64 = 3.0;
/// High-priority delivery: penalty per stop position within the trip.
pub const HIGH_POSITION_WEIGHT: f64 = 0.6;

/// Weights of every fitness term.
///
/// [`Default`] yields the fixed constants of this module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// See [`CAPACITY_WEIGHT`].
    pub capacity: f64,
    /// See [`RANGE_WEIGHT`].
    pub range: f64,
    /// See [`EFFICIENCY_THRESHOLD`].
    pub efficiency_threshold: f64,
    /// See [`EFFICIENCY_WEIGHT`].
    pub efficiency: f64,
    /// See [`CRITICAL_TRIP_WEIGHT`].
    pub critical_trip: f64,
    /// See [`CRITICAL_TRIP_QUADRATIC_WEIGHT`].
    pub critical_trip_quadratic: f64,
    /// See [`CRITICAL_POSITION_WEIGHT`].
    pub critical_position: f64,
    /// See [`HIGH_TRIP_WEIGHT`].
    pub high_trip: f64,
    /// See [`HIGH_POSITION_WEIGHT`].
    pub high_position: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            capacity: CAPACITY_WEIGHT,
            range: RANGE_WEIGHT,
            efficiency_threshold: EFFICIENCY_THRESHOLD,
            efficiency: EFFICIENCY_WEIGHT,
            critical_trip: CRITICAL_TRIP_WEIGHT,
            critical_trip_quadratic: CRITICAL_TRIP_QUADRATIC_WEIGHT,
            critical_position: CRITICAL_POSITION_WEIGHT,
            high_trip: HIGH_TRIP_WEIGHT,
            high_position: HIGH_POSITION_WEIGHT,
        }
    }
}

/// Fitness split into its components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    /// Σ trip distance × vehicle cost rate.
    pub travel_cost: f64,
    /// Load above capacity, weighted.
    pub capacity_penalty: f64,
    /// Distance above range, weighted.
    pub range_penalty: f64,
    /// Per-delivery cost above the threshold, weighted.
    pub efficiency_penalty: f64,
    /// Late dispatch of high and critical deliveries.
    pub priority_penalty: f64,
}

impl FitnessBreakdown {
    /// Sum of every penalty term.
    pub fn penalty(&self) -> f64 {
        self.capacity_penalty + self.range_penalty + self.efficiency_penalty + self.priority_penalty
    }

    /// Fitness value: travel cost plus penalties.
    pub fn total(&self) -> f64 {
        self.travel_cost + self.penalty()
    }
}

/// Scores route assignments against a registry.
///
/// Evaluation is pure: the same assignment always yields the same value,
/// and evaluators can be shared across threads.
///
/// # Examples
///
/// ```
/// use u_dispatch::evaluation::FitnessEvaluator;
/// use u_dispatch::models::{Delivery, FleetRegistry, Location, Priority, RouteAssignment, Trip, Vehicle};
///
/// let registry = FleetRegistry::new(
///     Location::new(0.0, 0.0),
///     vec![Delivery::new(1, Location::new(1.0, 0.0), 5, Priority::Low)],
///     vec![Vehicle::new(1, 10)],
/// )
/// .unwrap();
/// let evaluator = FitnessEvaluator::new(&registry);
/// let routes = RouteAssignment::from(vec![Trip::new(1, vec![1])]);
/// // 0→1→0 = 2.0 at cost 1.0, no penalties
/// assert_eq!(evaluator.evaluate(&routes).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    registry: &'a FleetRegistry,
    weights: FitnessWeights,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator with the default weights.
    pub fn new(registry: &'a FleetRegistry) -> Self {
        Self::with_weights(registry, FitnessWeights::default())
    }

    /// Creates an evaluator with custom weights.
    pub fn with_weights(registry: &'a FleetRegistry, weights: FitnessWeights) -> Self {
        Self { registry, weights }
    }

    /// Weights in use.
    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Fitness of an assignment. Lower is better.
    ///
    /// Fails only if the assignment references an unknown delivery or
    /// vehicle.
    pub fn evaluate(&self, routes: &RouteAssignment) -> Result<f64> {
        Ok(self.breakdown(routes)?.total())
    }

    /// Computes every fitness component of an assignment.
    pub fn breakdown(&self, routes: &RouteAssignment) -> Result<FitnessBreakdown> {
        let w = &self.weights;
        let depot = self.registry.depot();
        let mut out = FitnessBreakdown::default();
        let mut stops: Vec<Location> = Vec::new();

        for (trip_rank, trip) in routes.trips().iter().enumerate() {
            let vehicle = self.registry.vehicle(trip.vehicle_id)?;

            stops.clear();
            let mut load = 0i64;
            for &id in &trip.deliveries {
                let delivery = self.registry.delivery(id)?;
                load += i64::from(delivery.demand());
                stops.push(delivery.location());
            }

            let capacity = i64::from(vehicle.capacity());
            if load > capacity {
                out.capacity_penalty += w.capacity * (load - capacity) as f64;
            }

            let distance = route_distance(&stops, &depot);
            if let Some(limit) = vehicle.max_range() {
                if distance > limit {
                    out.range_penalty += w.range * (distance - limit);
                }
            }

            let travel_cost = distance * vehicle.cost_per_distance();
            if !trip.is_empty() {
                let per_delivery = travel_cost / trip.len() as f64;
                if per_delivery > w.efficiency_threshold {
                    out.efficiency_penalty += (per_delivery - w.efficiency_threshold) * w.efficiency;
                }
            }

            let rank = trip_rank as f64;
            for (pos, &id) in trip.deliveries.iter().enumerate() {
                let pos = pos as f64;
                out.priority_penalty += match self.registry.delivery(id)?.priority() {
                    Priority::Critical => {
                        rank * w.critical_trip
                            + pos * w.critical_position
                            + rank * rank * w.critical_trip_quadratic
                    }
                    Priority::High => rank * w.high_trip + pos * w.high_position,
                    Priority::Low => 0.0,
                };
            }

            out.travel_cost += travel_cost;
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Delivery, Trip, Vehicle};

    fn registry(priorities: [Priority; 3], vehicle: Vehicle) -> FleetRegistry {
        FleetRegistry::new(
            Location::new(0.0, 0.0),
            vec![
                Delivery::new(1, Location::new(1.0, 0.0), 8, priorities[0]),
                Delivery::new(2, Location::new(2.0, 0.0), 12, priorities[1]),
                Delivery::new(3, Location::new(0.0, 3.0), 15, priorities[2]),
            ],
            vec![vehicle],
        )
        .expect("valid")
    }

    fn low() -> [Priority; 3] {
        [Priority::Low; 3]
    }

    #[test]
    fn test_travel_cost_only() {
        let reg = registry(low(), Vehicle::new(1, 100).with_cost_per_distance(2.0));
        let eval = FitnessEvaluator::new(&reg);
        let routes = RouteAssignment::from(vec![Trip::new(1, vec![1, 2])]);
        let b = eval.breakdown(&routes).expect("known ids");
        // 0→1→2→0 = 1 + 1 + 2 = 4, × 2.0
        assert!((b.travel_cost - 8.0).abs() < 1e-12);
        assert_eq!(b.penalty(), 0.0);
        assert!((b.total() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_assignment_scores_zero() {
        let reg = registry(low(), Vehicle::new(1, 100));
        let eval = FitnessEvaluator::new(&reg);
        assert_eq!(eval.evaluate(&RouteAssignment::new()).expect("empty"), 0.0);
        let routes = RouteAssignment::from(vec![Trip::new(1, vec![])]);
        assert_eq!(eval.evaluate(&routes).expect("empty trip"), 0.0);
    }

    #[test]
    fn test_capacity_penalty_at_integer_limit() {
        let at = Location::new(0.0, 0.0);
        let reg = FleetRegistry::new(
            at,
            vec![
                Delivery::new(1, at, i32::MAX, Priority::Low),
                Delivery::new(2, at, i32::MAX, Priority::Low),
            ],
            vec![Vehicle::new(1, i32::MAX)],
        )
        .expect("valid");
        let routes = RouteAssignment::from(vec![Trip::new(1, vec![1, 2])]);
        let b = FitnessEvaluator::new(&reg).breakdown(&routes).expect("known ids");
        assert_eq!(b.capacity_penalty, CAPACITY_WEIGHT * f64::from(i32::MAX));
    }

    #[test]
    fn test_capacity_penalty() {
        let reg = registry(low(), Vehicle::new(1, 20));
        let eval = FitnessEvaluator::new(&reg);
        // load 8 + 12 + 15 = 35 > 20
        let routes = RouteAssignment::from(vec![Trip::new(1, vec![1, 2, 3])]);
        let b = eval.breakdown(&routes).expect("known ids");
        assert!((b.capacity_penalty - 15.0 * CAPACITY_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_range_penalty() {
        let reg = registry(low(), Vehicle::new(1, 100).with_max_range(3.0));
        let eval = FitnessEvaluator::new(&reg);
        // 0→2→0 = 4 > 3
        let routes = RouteAssignment::from(vec![Trip::new(1, vec![2])]);
        let b = eval.breakdown(&routes).expect("known ids");
        assert!((b.range_penalty - RANGE_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_efficiency_penalty() {
        let reg = registry(low(), Vehicle::new(1, 100).with_cost_per_distance(10.0));
        let eval = FitnessEvaluator::new(&reg);
        // 0→3→0 = 6, cost 60 for one delivery: (60 - 5) × 5
        let routes = RouteAssignment::from(vec![Trip::new(1, vec![3])]);
        let b = eval.breakdown(&routes).expect("known ids");
        assert!((b.efficiency_penalty - 55.0 * EFFICIENCY_WEIGHT).abs() < 1e-9);
        assert!((b.travel_cost - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_priority_penalty_grows_with_trip_rank() {
        let prios = [Priority::Critical, Priority::High, Priority::Low];
        let reg = registry(prios, Vehicle::new(1, 100));
        let eval = FitnessEvaluator::new(&reg);

        let early = RouteAssignment::from(vec![Trip::new(1, vec![1, 2]), Trip::new(1, vec![3])]);
        let late = RouteAssignment::from(vec![Trip::new(1, vec![3]), Trip::new(1, vec![1, 2])]);

        let b_early = eval.breakdown(&early).expect("known ids");
        let b_late = eval.breakdown(&late).expect("known ids");

        // early: critical at rank 0 pos 0, high at rank 0 pos 1
        assert!((b_early.priority_penalty - HIGH_POSITION_WEIGHT).abs() < 1e-9);
        // late: critical at rank 1 pos 0, high at rank 1 pos 1
        let expected = CRITICAL_TRIP_WEIGHT
            + CRITICAL_TRIP_QUADRATIC_WEIGHT
            + HIGH_TRIP_WEIGHT
            + HIGH_POSITION_WEIGHT;
        assert!((b_late.priority_penalty - expected).abs() < 1e-9);
    }

    #[test]
    fn test_critical_quadratic_term() {
        let prios = [Priority::Low, Priority::Low, Priority::Critical];
        let reg = registry(prios, Vehicle::new(1, 100));
        let eval = FitnessEvaluator::new(&reg);
        let routes = RouteAssignment::from(vec![
            Trip::new(1, vec![1]),
            Trip::new(1, vec![2]),
            Trip::new(1, vec![3]),
        ]);
        let b = eval.breakdown(&routes).expect("known ids");
        let expected = 2.0 * CRITICAL_TRIP_WEIGHT + 4.0 * CRITICAL_TRIP_QUADRATIC_WEIGHT;
        assert!((b.priority_penalty - expected).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_ids_fail() {
        let reg = registry(low(), Vehicle::new(1, 100));
        let eval = FitnessEvaluator::new(&reg);
        let bad_delivery = RouteAssignment::from(vec![Trip::new(1, vec![9])]);
        assert!(eval.evaluate(&bad_delivery).is_err());
        let bad_vehicle = RouteAssignment::from(vec![Trip::new(7, vec![1])]);
        assert!(eval.evaluate(&bad_vehicle).is_err());
    }

    #[test]
    fn test_deterministic() {
        let prios = [Priority::Critical, Priority::High, Priority::Low];
        let reg = registry(prios, Vehicle::new(1, 20).with_max_range(2.0));
        let eval = FitnessEvaluator::new(&reg);
        let routes = RouteAssignment::from(vec![Trip::new(1, vec![2, 1]), Trip::new(1, vec![3])]);
        let a = eval.evaluate(&routes).expect("known ids");
        let b = eval.evaluate(&routes).expect("known ids");
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_custom_weights() {
        let reg = registry(low(), Vehicle::new(1, 20));
        let weights = FitnessWeights {
            capacity: 1.0,
            ..FitnessWeights::default()
        };
        let eval = FitnessEvaluator::with_weights(&reg, weights);
        let routes = RouteAssignment::from(vec![Trip::new(1, vec![1, 2, 3])]);
        let b = eval.breakdown(&routes).expect("known ids");
        assert!((b.capacity_penalty - 15.0).abs() < 1e-9);
        assert_eq!(eval.weights().capacity, 1.0);
    }
}
