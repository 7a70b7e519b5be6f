//! Built-in demo datasets.
//!
//! Provides one city:
//! - São Paulo (`"SP"`): 25 deliveries across 14 hospital units, 5 vehicles
//!
//! Several deliveries share a unit's coordinates. The depot is the
//! coordinate-wise median of the distinct unit locations. Ranges and costs
//! are expressed in Manhattan degree units.

use crate::error::{DispatchError, Result};
use crate::models::{Delivery, FleetRegistry, Location, Priority, Vehicle};

/// Named unit location.
struct UnitData {
    name: &'static str,
    lat: f64,
    lon: f64,
}

/// Delivery record: unit index, demand, priority level.
struct DeliveryData {
    unit: usize,
    demand: i32,
    priority: u8,
}

/// Vehicle record: capacity, max range, cost per unit distance.
struct VehicleData {
    capacity: i32,
    max_range: f64,
    cost_per_distance: f64,
}

// ============================================================================
// São Paulo Data
// ============================================================================

const SP_UNITS: &[UnitData] = &[
    UnitData { name: "Einstein Morumbi", lat: -23.5997, lon: -46.7151 },
    UnitData { name: "Einstein Alphaville", lat: -23.4988, lon: -46.8486 },
    UnitData { name: "Einstein Alto de Pinheiros", lat: -23.5457, lon: -46.7107 },
    UnitData { name: "Einstein Anália Franco", lat: -23.5604, lon: -46.5626 },
    UnitData { name: "Einstein Chácara Klabin", lat: -23.5856, lon: -46.6298 },
    UnitData { name: "Einstein Ibirapuera", lat: -23.5853, lon: -46.6646 },
    UnitData { name: "Einstein Jardins", lat: -23.5640, lon: -46.6685 },
    UnitData { name: "Einstein Parque da Cidade", lat: -23.6082, lon: -46.6986 },
    UnitData { name: "Einstein Parque Ibirapuera", lat: -23.5874, lon: -46.6576 },
    UnitData { name: "Einstein Perdizes", lat: -23.5360, lon: -46.6776 },
    UnitData { name: "Einstein Vila Mariana", lat: -23.5893, lon: -46.6344 },
    UnitData { name: "Centro de Terapias Avançadas em Oncologia e Hematologia Einstein", lat: -23.6003, lon: -46.7163 },
    UnitData { name: "Espaço Einstein Bem-Estar e Saúde Mental", lat: -23.5655, lon: -46.6935 },
    UnitData { name: "Espaço Einstein Esporte e Reabilitação", lat: -23.5847, lon: -46.6739 },
];

/// Delivery IDs are 1-based positions in this table.
const SP_DELIVERIES: &[DeliveryData] = &[
    DeliveryData { unit: 0, demand: 8, priority: 3 },
    DeliveryData { unit: 1, demand: 12, priority: 2 },
    DeliveryData { unit: 2, demand: 15, priority: 1 },
    DeliveryData { unit: 3, demand: 10, priority: 3 },
    DeliveryData { unit: 4, demand: 6, priority: 2 },
    DeliveryData { unit: 5, demand: 8, priority: 3 },
    DeliveryData { unit: 6, demand: 12, priority: 2 },
    DeliveryData { unit: 7, demand: 15, priority: 1 },
    DeliveryData { unit: 8, demand: 10, priority: 3 },
    DeliveryData { unit: 9, demand: 6, priority: 2 },
    DeliveryData { unit: 10, demand: 6, priority: 2 },
    DeliveryData { unit: 11, demand: 6, priority: 2 },
    DeliveryData { unit: 12, demand: 6, priority: 2 },
    DeliveryData { unit: 13, demand: 6, priority: 2 },
    DeliveryData { unit: 1, demand: 8, priority: 3 },
    DeliveryData { unit: 9, demand: 12, priority: 2 },
    DeliveryData { unit: 4, demand: 15, priority: 1 },
    DeliveryData { unit: 6, demand: 10, priority: 3 },
    DeliveryData { unit: 2, demand: 6, priority: 2 },
    DeliveryData { unit: 0, demand: 8, priority: 3 },
    DeliveryData { unit: 12, demand: 12, priority: 2 },
    DeliveryData { unit: 5, demand: 15, priority: 1 },
    DeliveryData { unit: 1, demand: 10, priority: 3 },
    DeliveryData { unit: 0, demand: 6, priority: 2 },
    DeliveryData { unit: 2, demand: 6, priority: 2 },
];

/// Vehicle IDs are 1-based positions in this table.
const SP_VEHICLES: &[VehicleData] = &[
    VehicleData { capacity: 25, max_range: 0.030, cost_per_distance: 120.0 },
    VehicleData { capacity: 35, max_range: 0.045, cost_per_distance: 100.0 },
    VehicleData { capacity: 15, max_range: 0.025, cost_per_distance: 85.0 },
    VehicleData { capacity: 20, max_range: 0.032, cost_per_distance: 76.0 },
    VehicleData { capacity: 10, max_range: 0.018, cost_per_distance: 58.0 },
];

/// Available dataset names.
pub const CITIES: &[&str] = &["SP"];

/// Builds the registry for a named city.
///
/// Fails with [`DispatchError::Configuration`] for an unknown city.
///
/// # Examples
///
/// ```
/// use u_dispatch::demo_data;
///
/// let registry = demo_data::registry_for_city("SP").unwrap();
/// assert_eq!(registry.num_deliveries(), 25);
/// assert_eq!(registry.vehicles().len(), 5);
/// assert!(demo_data::registry_for_city("RJ").is_err());
/// ```
pub fn registry_for_city(city: &str) -> Result<FleetRegistry> {
    match city {
        "SP" => build(SP_UNITS, SP_DELIVERIES, SP_VEHICLES),
        _ => Err(DispatchError::config(format!(
            "city '{city}' has no delivery dataset"
        ))),
    }
}

/// Names of the units a city's deliveries are drawn from.
pub fn unit_names(city: &str) -> Result<Vec<&'static str>> {
    match city {
        "SP" => Ok(SP_UNITS.iter().map(|u| u.name).collect()),
        _ => Err(DispatchError::config(format!(
            "city '{city}' has no delivery dataset"
        ))),
    }
}

fn build(units: &[UnitData], deliveries: &[DeliveryData], vehicles: &[VehicleData]) -> Result<FleetRegistry> {
    let depot = median_location(units)
        .ok_or_else(|| DispatchError::config("dataset has no unit locations"))?;

    let deliveries = deliveries
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let unit = units.get(d.unit).ok_or_else(|| {
                DispatchError::config(format!("delivery {} references unknown unit {}", i + 1, d.unit))
            })?;
            let priority = Priority::try_from(d.priority).map_err(DispatchError::Configuration)?;
            Ok(Delivery::new(i + 1, Location::new(unit.lat, unit.lon), d.demand, priority))
        })
        .collect::<Result<Vec<_>>>()?;

    let vehicles = vehicles
        .iter()
        .enumerate()
        .map(|(i, v)| {
            Vehicle::new(i + 1, v.capacity)
                .with_max_range(v.max_range)
                .with_cost_per_distance(v.cost_per_distance)
        })
        .collect();

    FleetRegistry::new(depot, deliveries, vehicles)
}

/// Coordinate-wise median; the mean of the two middle values for even counts.
fn median_location(units: &[UnitData]) -> Option<Location> {
    let lat = median(units.iter().map(|u| u.lat).collect())?;
    let lon = median(units.iter().map(|u| u.lon).collect())?;
    Some(Location::new(lat, lon))
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
