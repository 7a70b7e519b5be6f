//! Immutable delivery/vehicle registry shared by every component of a run.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};

use super::{Delivery, Location, Vehicle};

/// Raw registry contents, as loaded from a data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetData {
    /// Depot every trip starts from and returns to.
    pub depot: Location,
    /// Delivery records.
    pub deliveries: Vec<Delivery>,
    /// Vehicle records, in sweep order.
    pub vehicles: Vec<Vehicle>,
}

/// Read-only lookup of deliveries, vehicles and the depot.
///
/// Built and validated once per run, then shared by reference into the
/// codec, the fitness evaluator and the engine. Vehicle order is the fixed
/// order in which the decoder sweeps the fleet.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Delivery, FleetRegistry, Location, Priority, Vehicle};
///
/// let registry = FleetRegistry::new(
///     Location::new(0.0, 0.0),
///     vec![
///         Delivery::new(1, Location::new(1.0, 0.0), 8, Priority::Critical),
///         Delivery::new(2, Location::new(0.0, 1.0), 12, Priority::Low),
///     ],
///     vec![Vehicle::new(1, 20)],
/// )
/// .unwrap();
/// assert_eq!(registry.num_deliveries(), 2);
/// assert_eq!(registry.delivery(2).unwrap().demand(), 12);
/// assert!(registry.delivery(9).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct FleetRegistry {
    depot: Location,
    deliveries: Vec<Delivery>,
    vehicles: Vec<Vehicle>,
    delivery_index: HashMap<usize, usize>,
    vehicle_index: HashMap<usize, usize>,
}

impl FleetRegistry {
    /// Validates and indexes the given records.
    ///
    /// Fails with [`DispatchError::Configuration`] on an empty fleet or
    /// delivery list, duplicate or zero IDs, non-positive demand or
    /// capacity, negative or non-finite range, negative cost, or non-finite
    /// coordinates.
    pub fn new(depot: Location, deliveries: Vec<Delivery>, vehicles: Vec<Vehicle>) -> Result<Self> {
        if deliveries.is_empty() {
            return Err(DispatchError::config("registry has no deliveries"));
        }
        if vehicles.is_empty() {
            return Err(DispatchError::config("registry has no vehicles"));
        }
        check_location("depot", &depot)?;

        let mut delivery_index = HashMap::with_capacity(deliveries.len());
        for (idx, d) in deliveries.iter().enumerate() {
            if d.id() == 0 {
                return Err(DispatchError::config("delivery IDs must be positive"));
            }
            if d.demand() <= 0 {
                return Err(DispatchError::config(format!(
                    "delivery {} has non-positive demand {}",
                    d.id(),
                    d.demand()
                )));
            }
            check_location(&format!("delivery {}", d.id()), &d.location())?;
            if delivery_index.insert(d.id(), idx).is_some() {
                return Err(DispatchError::config(format!(
                    "duplicate delivery ID {}",
                    d.id()
                )));
            }
        }

        let mut vehicle_index = HashMap::with_capacity(vehicles.len());
        for (idx, v) in vehicles.iter().enumerate() {
            if v.capacity() <= 0 {
                return Err(DispatchError::config(format!(
                    "vehicle {} has non-positive capacity {}",
                    v.id(),
                    v.capacity()
                )));
            }
            if let Some(range) = v.max_range() {
                if !range.is_finite() || range < 0.0 {
                    return Err(DispatchError::config(format!(
                        "vehicle {} has invalid range {range}",
                        v.id()
                    )));
                }
            }
            if !v.cost_per_distance().is_finite() || v.cost_per_distance() < 0.0 {
                return Err(DispatchError::config(format!(
                    "vehicle {} has invalid cost per distance {}",
                    v.id(),
                    v.cost_per_distance()
                )));
            }
            if vehicle_index.insert(v.id(), idx).is_some() {
                return Err(DispatchError::config(format!("duplicate vehicle ID {}", v.id())));
            }
        }

        Ok(Self {
            depot,
            deliveries,
            vehicles,
            delivery_index,
            vehicle_index,
        })
    }

    /// Builds a registry from raw data.
    pub fn from_data(data: FleetData) -> Result<Self> {
        Self::new(data.depot, data.deliveries, data.vehicles)
    }

    /// Parses a JSON [`FleetData`] document and builds a registry from it.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let data: FleetData = serde_json::from_str(json)
            .map_err(|e| DispatchError::config(format!("malformed fleet data: {e}")))?;
        Self::from_data(data)
    }

    /// Depot location.
    pub fn depot(&self) -> Location {
        self.depot
    }

    /// All deliveries in registration order.
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// All vehicles in sweep order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of deliveries (the chromosome length).
    pub fn num_deliveries(&self) -> usize {
        self.deliveries.len()
    }

    /// Delivery IDs in registration order.
    pub fn delivery_ids(&self) -> Vec<usize> {
        self.deliveries.iter().map(Delivery::id).collect()
    }

    /// Returns `true` if `id` is a registered delivery.
    pub fn contains_delivery(&self, id: usize) -> bool {
        self.delivery_index.contains_key(&id)
    }

    /// Looks up a delivery by ID.
    pub fn delivery(&self, id: usize) -> Result<&Delivery> {
        self.delivery_index
            .get(&id)
            .map(|&idx| &self.deliveries[idx])
            .ok_or_else(|| DispatchError::config(format!("unknown delivery ID {id}")))
    }

    /// Looks up a vehicle by ID.
    pub fn vehicle(&self, id: usize) -> Result<&Vehicle> {
        self.vehicle_index
            .get(&id)
            .map(|&idx| &self.vehicles[idx])
            .ok_or_else(|| DispatchError::config(format!("unknown vehicle ID {id}")))
    }

    /// Deliveries whose demand exceeds the capacity of every vehicle.
    ///
    /// These are exactly the deliveries decoding can never place on a trip,
    /// whatever the chromosome order.
    pub fn undeliverable(&self) -> Vec<usize> {
        let max_capacity = self
            .vehicles
            .iter()
            .map(Vehicle::capacity)
            .max()
            .unwrap_or(0);
        self.deliveries
            .iter()
            .filter(|d| d.demand() > max_capacity)
            .map(Delivery::id)
            .collect()
    }
}

fn check_location(what: &str, loc: &Location) -> Result<()> {
    if loc.lat.is_finite() && loc.lon.is_finite() {
        Ok(())
    } else {
        Err(DispatchError::config(format!("{what} has non-finite coordinates")))
    }
}
