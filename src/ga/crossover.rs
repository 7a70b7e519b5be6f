//! Crossover operators producing one child permutation from two parents.
//!
//! - **RBX** (route-based): inherits one whole vehicle trip of parent 1 as a
//!   building block, then fills in parent 2's order.
//! - **BCRC** (best-cost route crossover): cuts a segment out of parent 1
//!   and inserts it into parent 2's remainder at the position with the
//!   shortest Manhattan path over the whole sequence.
//!
//! Both constructions keep the permutation invariant without a repair step.

use std::collections::HashSet;

use rand::seq::{index, IndexedRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::path_length;
use crate::error::{DispatchError, Result};
use crate::models::{FleetRegistry, Location, Trip};

use super::chromosome::Chromosome;
use super::decode::decode;

/// Crossover strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverKind {
    /// Route-Based Crossover.
    RouteBased,
    /// Best-Cost Route Crossover.
    BestCostRoute,
}

/// Route-based crossover.
///
/// Decodes `parent1`, picks a vehicle uniformly among those with a trip,
/// copies that vehicle's trip verbatim as the head of the child (when a
/// vehicle runs several trips, its last one), then appends every gene of
/// `parent2` not already present, in `parent2` order.
pub fn rbx<R: Rng + ?Sized>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    registry: &FleetRegistry,
    rng: &mut R,
) -> Result<Chromosome> {
    let decoded = decode(parent1, registry)?;

    let mut per_vehicle: Vec<(usize, &Trip)> = Vec::new();
    for trip in decoded.routes.trips() {
        match per_vehicle.iter_mut().find(|(v, _)| *v == trip.vehicle_id) {
            Some(entry) => entry.1 = trip,
            None => per_vehicle.push((trip.vehicle_id, trip)),
        }
    }

    let Some(&(_, seed)) = per_vehicle.choose(rng) else {
        return Ok(parent2.clone());
    };

    let mut child = seed.deliveries.clone();
    let inherited: HashSet<usize> = child.iter().copied().collect();
    child.extend(parent2.genes().iter().copied().filter(|g| !inherited.contains(g)));
    Ok(Chromosome::new(child))
}

/// Best-cost route crossover with random cut points `i < j`.
///
/// Parents shorter than two genes are returned unchanged (as a copy of
/// `parent1`).
pub fn bcrc<R: Rng + ?Sized>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    registry: &FleetRegistry,
    rng: &mut R,
) -> Result<Chromosome> {
    let n = parent1.len();
    if n < 2 {
        return Ok(parent1.clone());
    }
    let cut = index::sample(rng, n, 2);
    let (a, b) = (cut.index(0), cut.index(1));
    bcrc_with_cut(parent1, parent2, registry, a.min(b), a.max(b))
}

/// Best-cost route crossover with explicit cut points.
///
/// The segment `parent1[i..j]` is removed from `parent2` and reinserted at
/// every position `0..=len(base)`; the first position with the minimum
/// adjacency cost wins. The cost treats the whole candidate as one
/// continuous path, regardless of how decoding later splits it into trips.
///
/// # Complexity
///
/// O(n²): n + 1 positions, O(n) path cost each.
///
/// # Examples
///
/// ```
/// use u_dispatch::ga::{bcrc_with_cut, Chromosome};
/// use u_dispatch::models::{Delivery, FleetRegistry, Location, Priority, Vehicle};
///
/// let registry = FleetRegistry::new(
///     Location::new(0.0, 0.0),
///     (1..=5)
///         .map(|i| Delivery::new(i, Location::new(i as f64, 0.0), 1, Priority::Low))
///         .collect(),
///     vec![Vehicle::new(1, 10)],
/// )
/// .unwrap();
///
/// let p1 = Chromosome::new(vec![1, 2, 3, 4, 5]);
/// let p2 = Chromosome::new(vec![5, 4, 3, 2, 1]);
/// // segment [2, 3], base [5, 4, 1]
/// let child = bcrc_with_cut(&p1, &p2, &registry, 1, 3).unwrap();
/// assert_eq!(child.genes(), &[5, 4, 2, 3, 1]);
/// ```
pub fn bcrc_with_cut(
    parent1: &Chromosome,
    parent2: &Chromosome,
    registry: &FleetRegistry,
    i: usize,
    j: usize,
) -> Result<Chromosome> {
    if i >= j || j > parent1.len() {
        return Err(DispatchError::config(format!(
            "invalid cut ({i}, {j}) for a chromosome of length {}",
            parent1.len()
        )));
    }

    let segment = &parent1.genes()[i..j];
    let in_segment: HashSet<usize> = segment.iter().copied().collect();
    let base: Vec<usize> = parent2
        .genes()
        .iter()
        .copied()
        .filter(|g| !in_segment.contains(g))
        .collect();

    let segment_locs = locations(segment, registry)?;
    let base_locs = locations(&base, registry)?;

    let mut best_pos = 0;
    let mut best_cost = f64::INFINITY;
    for pos in 0..=base.len() {
        let cost = path_length(
            base_locs[..pos]
                .iter()
                .chain(&segment_locs)
                .chain(&base_locs[pos..]),
        );
        if cost < best_cost {
            best_cost = cost;
            best_pos = pos;
        }
    }

    let mut child = Vec::with_capacity(base.len() + segment.len());
    child.extend_from_slice(&base[..best_pos]);
    child.extend_from_slice(segment);
    child.extend_from_slice(&base[best_pos..]);
    Ok(Chromosome::new(child))
}

fn locations(ids: &[usize], registry: &FleetRegistry) -> Result<Vec<Location>> {
    ids.iter()
        .map(|&id| registry.delivery(id).map(|d| d.location()))
        .collect()
}

/// Probabilistic choice between RBX and BCRC.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_dispatch::ga::{Chromosome, Crossover};
/// use u_dispatch::models::{Delivery, FleetRegistry, Location, Priority, Vehicle};
///
/// let registry = FleetRegistry::new(
///     Location::new(0.0, 0.0),
///     (1..=4)
///         .map(|i| Delivery::new(i, Location::new(0.0, i as f64), 5, Priority::Low))
///         .collect(),
///     vec![Vehicle::new(1, 10)],
/// )
/// .unwrap();
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let child = Crossover::new(0.5)
///     .apply(
///         &Chromosome::new(vec![1, 2, 3, 4]),
///         &Chromosome::new(vec![4, 3, 2, 1]),
///         &registry,
///         &mut rng,
///     )
///     .unwrap();
/// assert!(child.validate_for(&registry).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossover {
    rbx_probability: f64,
}

impl Default for Crossover {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Crossover {
    /// Creates the operator. `rbx_probability` is clamped into [0, 1].
    pub fn new(rbx_probability: f64) -> Self {
        let p = if rbx_probability.is_nan() {
            0.5
        } else {
            rbx_probability.clamp(0.0, 1.0)
        };
        Self { rbx_probability: p }
    }

    /// Probability of picking RBX.
    pub fn rbx_probability(&self) -> f64 {
        self.rbx_probability
    }

    /// Draws which strategy to use.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> CrossoverKind {
        if rng.random_bool(self.rbx_probability) {
            CrossoverKind::RouteBased
        } else {
            CrossoverKind::BestCostRoute
        }
    }

    /// Produces one child and validates it against the registry.
    ///
    /// A child that is not a permutation of the registry's deliveries fails
    /// with [`DispatchError::InvalidChromosome`].
    pub fn apply<R: Rng + ?Sized>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        registry: &FleetRegistry,
        rng: &mut R,
    ) -> Result<Chromosome> {
        let child = match self.choose(rng) {
            CrossoverKind::RouteBased => rbx(parent1, parent2, registry, rng)?,
            CrossoverKind::BestCostRoute => bcrc(parent1, parent2, registry, rng)?,
        };
        child.validate_for(registry)?;
        Ok(child)
    }
}
