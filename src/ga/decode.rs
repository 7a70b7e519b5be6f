//! Greedy multi-pass decoder from chromosome to vehicle trips.
//!
//! # Algorithm
//!
//! Sweeps the fleet in registry order. Each vehicle opens a fresh trip and
//! scans the still-pending genes in chromosome order, accepting every gene
//! whose demand keeps the trip load within capacity (a rejected gene does
//! not stop the scan). Accepted genes leave the pending list immediately.
//! Sweeps repeat, giving vehicles further trips, until nothing is pending or
//! a whole sweep accepts nothing.
//!
//! A sweep accepts nothing only when every pending delivery is heavier than
//! every vehicle's capacity; those deliveries are reported as unassigned.
//!
//! # Complexity
//!
//! O(n) per vehicle per sweep: the pending list is rebuilt in the same
//! pass that scans it, no element is removed from the middle of a vector.

use std::collections::HashSet;

use crate::error::{ChromosomeFault, DispatchError, Result};
use crate::models::{FleetRegistry, RouteAssignment, Trip};

use super::chromosome::Chromosome;

/// Result of decoding a chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Trips, one per vehicle per sweep that accepted something.
    pub routes: RouteAssignment,
    /// Deliveries no vehicle could carry, in chromosome order.
    pub unassigned: Vec<usize>,
}

impl Decoded {
    /// Returns `true` if every delivery landed on a trip.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }
}

/// Decodes a chromosome into trips under vehicle capacity.
///
/// Fails with a configuration error if a gene is not a registered delivery,
/// and with [`DispatchError::InvalidChromosome`] if a gene repeats. The
/// chromosome may cover only part of the registry.
///
/// # Examples
///
/// ```
/// use u_dispatch::ga::{decode, Chromosome};
/// use u_dispatch::models::{Delivery, FleetRegistry, Location, Priority, Vehicle};
///
/// let at = Location::new(0.0, 0.0);
/// let registry = FleetRegistry::new(
///     at,
///     vec![
///         Delivery::new(1, at, 8, Priority::Low),
///         Delivery::new(2, at, 12, Priority::Low),
///         Delivery::new(3, at, 15, Priority::Low),
///     ],
///     vec![Vehicle::new(1, 20)],
/// )
/// .unwrap();
///
/// let decoded = decode(&Chromosome::new(vec![1, 2, 3]), &registry).unwrap();
/// let trips = decoded.routes.trips();
/// assert_eq!(trips.len(), 2);
/// assert_eq!(trips[0].deliveries, vec![1, 2]); // load 20
/// assert_eq!(trips[1].deliveries, vec![3]); // load 15
/// ```
pub fn decode(chromosome: &Chromosome, registry: &FleetRegistry) -> Result<Decoded> {
    let mut seen = HashSet::with_capacity(chromosome.len());
    let mut pending: Vec<(usize, i32)> = Vec::with_capacity(chromosome.len());
    for &id in chromosome.genes() {
        let demand = registry.delivery(id)?.demand();
        if !seen.insert(id) {
            return Err(DispatchError::InvalidChromosome(ChromosomeFault::DuplicateGene(id)));
        }
        pending.push((id, demand));
    }

    let mut routes = RouteAssignment::new();
    let mut next = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let mut progressed = false;

        for vehicle in registry.vehicles() {
            if pending.is_empty() {
                break;
            }

            let capacity = vehicle.capacity();
            let mut load = 0i32;
            let mut trip = Vec::new();
            next.clear();

            for &(id, demand) in &pending {
                // load <= capacity, so the subtraction cannot overflow
                if demand <= capacity - load {
                    load += demand;
                    trip.push(id);
                } else {
                    next.push((id, demand));
                }
            }

            if !trip.is_empty() {
                std::mem::swap(&mut pending, &mut next);
                routes.push(Trip::new(vehicle.id(), trip));
                progressed = true;
            }
        }

        if !progressed {
            break;
        }
    }

    Ok(Decoded {
        routes,
        unassigned: pending.into_iter().map(|(id, _)| id).collect(),
    })
}
