//! Vehicle type with capacity, range and cost parameters.

use serde::{Deserialize, Serialize};

/// A vehicle of the delivery fleet.
///
/// Range and cost are expressed in the same Manhattan units as the
/// delivery coordinates.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Vehicle;
///
/// let v = Vehicle::new(1, 25)
///     .with_max_range(0.030)
///     .with_cost_per_distance(120.0);
/// assert_eq!(v.id(), 1);
/// assert_eq!(v.capacity(), 25);
/// assert_eq!(v.max_range(), Some(0.030));
/// assert_eq!(Vehicle::new(2, 10).max_range(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_range: Option<f64>,
    #[serde(default = "unit_cost")]
    cost_per_distance: f64,
}

fn unit_cost() -> f64 {
    1.0
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity.
    ///
    /// Default: no range limit, cost_per_distance = 1.0.
    pub fn new(id: usize, capacity: i32) -> Self {
        Self {
            id,
            capacity,
            max_range: None,
            cost_per_distance: unit_cost(),
        }
    }

    /// Sets the maximum distance of a single trip.
    pub fn with_max_range(mut self, max_range: f64) -> Self {
        self.max_range = Some(max_range);
        self
    }

    /// Sets cost per unit distance.
    pub fn with_cost_per_distance(mut self, cost: f64) -> Self {
        self.cost_per_distance = cost;
        self
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load per trip.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Maximum distance per trip, if limited.
    pub fn max_range(&self) -> Option<f64> {
        self.max_range
    }

    /// Cost per unit distance traveled.
    pub fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(3, 15);
        assert_eq!(v.id(), 3);
        assert_eq!(v.capacity(), 15);
        assert!(v.max_range().is_none());
        assert_eq!(v.cost_per_distance(), 1.0);
    }

    #[test]
    fn test_vehicle_builder() {
        let v = Vehicle::new(5, 10)
            .with_max_range(0.018)
            .with_cost_per_distance(58.0);
        assert_eq!(v.max_range(), Some(0.018));
        assert_eq!(v.cost_per_distance(), 58.0);
    }

    #[test]
    fn test_vehicle_serde_roundtrip() {
        let unlimited = Vehicle::new(1, 10);
        let json = serde_json::to_string(&unlimited).expect("serialize");
        assert!(!json.contains("null"));
        let back: Vehicle = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, unlimited);

        let limited = Vehicle::new(2, 10).with_max_range(0.5);
        let back: Vehicle =
            serde_json::from_str(&serde_json::to_string(&limited).expect("serialize"))
                .expect("parse");
        assert_eq!(back, limited);

        let explicit_null: Vehicle =
            serde_json::from_str(r#"{"id": 3, "capacity": 5, "max_range": null}"#).expect("parse");
        assert_eq!(explicit_null.max_range(), None);
    }
}
