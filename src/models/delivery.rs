//! Delivery, location and priority types.

use serde::{Deserialize, Serialize};

/// A geographic point given as latitude/longitude degrees.
///
/// Distances between locations use the Manhattan metric on the raw
/// coordinates (see [`crate::distance`]).
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Location;
///
/// let a = Location::new(1.0, 2.0);
/// let b = Location::new(4.0, 6.0);
/// assert_eq!(a.manhattan_to(&b), 7.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl Location {
    /// Creates a location.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Manhattan distance to another location.
    pub fn manhattan_to(&self, other: &Location) -> f64 {
        (self.lat - other.lat).abs() + (self.lon - other.lon).abs()
    }
}

/// Urgency level of a delivery.
///
/// Serialized as its numeric level (1, 2 or 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    /// Level 1: no dispatch-order penalty.
    Low,
    /// Level 2: mildly penalized when dispatched late.
    High,
    /// Level 3: strongly penalized when dispatched late.
    Critical,
}

impl Priority {
    /// Numeric level (1 = low, 2 = high, 3 = critical).
    pub fn level(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::High => 2,
            Priority::Critical => 3,
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::High),
            3 => Ok(Priority::Critical),
            other => Err(format!("priority must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.level()
    }
}

/// A delivery task: where it goes, how much it weighs, how urgent it is.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Delivery, Location, Priority};
///
/// let d = Delivery::new(1, Location::new(-23.59, -46.71), 8, Priority::Critical);
/// assert_eq!(d.id(), 1);
/// assert_eq!(d.demand(), 8);
/// assert_eq!(d.priority().level(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    id: usize,
    location: Location,
    demand: i32,
    priority: Priority,
}

impl Delivery {
    /// Creates a delivery.
    pub fn new(id: usize, location: Location, demand: i32, priority: Priority) -> Self {
        Self {
            id,
            location,
            demand,
            priority,
        }
    }

    /// Delivery ID (positive, unique within a registry).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Drop-off location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Load units this delivery occupies in a vehicle.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Urgency level.
    pub fn priority(&self) -> Priority {
        self.priority
    }
}
