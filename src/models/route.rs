//! Trip and route assignment types.

use serde::{Deserialize, Serialize};

/// One vehicle trip: depot → deliveries in order → depot.
///
/// A vehicle may run several trips within one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Vehicle running this trip.
    pub vehicle_id: usize,
    /// Delivery IDs in visit order (depot not stored).
    pub deliveries: Vec<usize>,
}

impl Trip {
    /// Creates a trip.
    pub fn new(vehicle_id: usize, deliveries: Vec<usize>) -> Self {
        Self {
            vehicle_id,
            deliveries,
        }
    }

    /// Number of stops on this trip.
    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    /// Returns `true` if the trip visits no delivery.
    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }
}

/// Ordered list of trips: the decoded form of a chromosome.
///
/// Trip order matters: the position of a trip is its dispatch rank, used by
/// the priority penalty of the fitness function.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{RouteAssignment, Trip};
///
/// let mut routes = RouteAssignment::new();
/// routes.push(Trip::new(1, vec![3, 1]));
/// routes.push(Trip::new(1, vec![2]));
/// assert_eq!(routes.num_trips(), 2);
/// assert_eq!(routes.num_assigned(), 3);
/// assert_eq!(routes.delivery_ids(), vec![3, 1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAssignment {
    trips: Vec<Trip>,
}

impl RouteAssignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self { trips: Vec::new() }
    }

    /// Appends a trip.
    pub fn push(&mut self, trip: Trip) {
        self.trips.push(trip);
    }

    /// Trips in dispatch order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Number of trips.
    pub fn num_trips(&self) -> usize {
        self.trips.len()
    }

    /// Returns `true` if there is no trip.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Total number of deliveries placed on some trip.
    pub fn num_assigned(&self) -> usize {
        self.trips.iter().map(Trip::len).sum()
    }

    /// Every assigned delivery ID, concatenated in trip order.
    pub fn delivery_ids(&self) -> Vec<usize> {
        self.trips
            .iter()
            .flat_map(|t| t.deliveries.iter().copied())
            .collect()
    }
}

impl From<Vec<Trip>> for RouteAssignment {
    fn from(trips: Vec<Trip>) -> Self {
        Self { trips }
    }
}

impl IntoIterator for RouteAssignment {
    type Item = Trip;
    type IntoIter = std::vec::IntoIter<Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.trips.into_iter()
    }
}

impl<'a> IntoIterator for &'a RouteAssignment {
    type Item = &'a Trip;
    type IntoIter = std::slice::Iter<'a, Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.trips.iter()
    }
}
