//! Domain model types for delivery dispatch.
//!
//! Provides deliveries with demand and priority, vehicles with capacity,
//! range and cost, trips and route assignments, and the immutable registry
//! that ties them to a depot.

mod delivery;
mod registry;
mod route;
mod vehicle;

pub use delivery::{Delivery, Location, Priority};
pub use registry::{FleetData, FleetRegistry};
pub use route::{RouteAssignment, Trip};
pub use vehicle::Vehicle;
