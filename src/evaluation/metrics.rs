//! Per-trip operational metrics for a final route assignment.

use serde::{Deserialize, Serialize};

use crate::distance::route_distance;
use crate::error::Result;
use crate::models::{FleetRegistry, Location, Priority, RouteAssignment};

/// Metrics of a single trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripMetrics {
    /// Dispatch rank, starting at 1.
    pub trip_number: usize,
    /// Vehicle running the trip.
    pub vehicle_id: usize,
    /// Total demand carried.
    pub load: i64,
    /// `load / capacity`.
    pub capacity_utilization: f64,
    /// Closed-trip Manhattan distance.
    pub distance: f64,
    /// `distance × cost_per_distance`.
    pub travel_cost: f64,
    /// Number of critical deliveries on the trip.
    pub critical_count: usize,
}

/// Aggregate metrics of an assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Mean capacity utilisation over trips (higher is better).
    pub mean_capacity_utilization: f64,
    /// Total travel cost (lower is better).
    pub total_travel_cost: f64,
    /// Σ critical_count × (1 − 0.1 × trip_number): rewards critical
    /// deliveries on early trips (higher is better).
    pub critical_delivery_score: f64,
}

/// Computes [`TripMetrics`] and a [`MetricSummary`] for route assignments.
pub struct RouteMetrics<'a> {
    registry: &'a FleetRegistry,
}

impl<'a> RouteMetrics<'a> {
    /// Creates a metrics calculator over the given registry.
    pub fn new(registry: &'a FleetRegistry) -> Self {
        Self { registry }
    }

    /// Metrics of every trip, in dispatch order.
    pub fn trips(&self, routes: &RouteAssignment) -> Result<Vec<TripMetrics>> {
        let depot = self.registry.depot();
        let mut out = Vec::with_capacity(routes.num_trips());

        for (idx, trip) in routes.trips().iter().enumerate() {
            let vehicle = self.registry.vehicle(trip.vehicle_id)?;
            let mut load = 0i64;
            let mut critical_count = 0;
            let mut stops: Vec<Location> = Vec::with_capacity(trip.len());
            for &id in &trip.deliveries {
                let d = self.registry.delivery(id)?;
                load += i64::from(d.demand());
                if d.priority() == Priority::Critical {
                    critical_count += 1;
                }
                stops.push(d.location());
            }
            let distance = route_distance(&stops, &depot);
            out.push(TripMetrics {
                trip_number: idx + 1,
                vehicle_id: trip.vehicle_id,
                load,
                capacity_utilization: load as f64 / f64::from(vehicle.capacity()),
                distance,
                travel_cost: distance * vehicle.cost_per_distance(),
                critical_count,
            });
        }

        Ok(out)
    }

    /// Aggregates trip metrics. An empty assignment yields all zeros.
    pub fn summary(&self, routes: &RouteAssignment) -> Result<MetricSummary> {
        let trips = self.trips(routes)?;
        if trips.is_empty() {
            return Ok(MetricSummary::default());
        }
        let n = trips.len() as f64;
        Ok(MetricSummary {
            mean_capacity_utilization: trips.iter().map(|t| t.capacity_utilization).sum::<f64>() / n,
            total_travel_cost: trips.iter().map(|t| t.travel_cost).sum(),
            critical_delivery_score: trips
                .iter()
                .map(|t| t.critical_count as f64 * (1.0 - 0.1 * t.trip_number as f64))
                .sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Delivery, Trip, Vehicle};

    fn setup() -> FleetRegistry {
        FleetRegistry::new(
            Location::new(0.0, 0.0),
            vec![
                Delivery::new(1, Location::new(1.0, 0.0), 10, Priority::Critical),
                Delivery::new(2, Location::new(0.0, 2.0), 5, Priority::High),
                Delivery::new(3, Location::new(1.0, 1.0), 20, Priority::Critical),
            ],
            vec![
                Vehicle::new(1, 20).with_cost_per_distance(2.0),
                Vehicle::new(2, 40),
            ],
        )
        .expect("valid")
    }

    #[test]
    fn test_trip_metrics() {
        let reg = setup();
        let routes = RouteAssignment::from(vec![Trip::new(1, vec![1, 2]), Trip::new(2, vec![3])]);
        let trips = RouteMetrics::new(&reg).trips(&routes).expect("known ids");
        assert_eq!(trips.len(), 2);

        assert_eq!(trips[0].trip_number, 1);
        assert_eq!(trips[0].load, 15);
        assert!((trips[0].capacity_utilization - 0.75).abs() < 1e-12);
        // 0→(1,0)→(0,2)→0 = 1 + 3 + 2
        assert!((trips[0].distance - 6.0).abs() < 1e-12);
        assert!((trips[0].travel_cost - 12.0).abs() < 1e-12);
        assert_eq!(trips[0].critical_count, 1);

        assert_eq!(trips[1].vehicle_id, 2);
        assert!((trips[1].capacity_utilization - 0.5).abs() < 1e-12);
        assert_eq!(trips[1].critical_count, 1);
    }

    #[test]
    fn test_load_beyond_i32() {
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
        let trips = RouteMetrics::new(&reg).trips(&routes).expect("known ids");
        assert_eq!(trips[0].load, 2 * i64::from(i32::MAX));
        assert!((trips[0].capacity_utilization - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary() {
        let reg = setup();
        let routes = RouteAssignment::from(vec![Trip::new(1, vec![1, 2]), Trip::new(2, vec![3])]);
        let s = RouteMetrics::new(&reg).summary(&routes).expect("known ids");
        assert!((s.mean_capacity_utilization - 0.625).abs() < 1e-12);
        // 12 + 4
        assert!((s.total_travel_cost - 16.0).abs() < 1e-12);
        // 1 × 0.9 + 1 × 0.8
        assert!((s.critical_delivery_score - 1.7).abs() < 1e-12);
    }

    #[test]
    fn test_summary_empty() {
        let reg = setup();
        let s = RouteMetrics::new(&reg)
            .summary(&RouteAssignment::new())
            .expect("empty");
        assert_eq!(s, MetricSummary::default());
    }
}
