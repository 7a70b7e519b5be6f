//! Individuals and random initial population.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{FleetRegistry, RouteAssignment, Trip};

use super::chromosome::{encode, Chromosome};

/// A chromosome paired with its fitness, unset until evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    chromosome: Chromosome,
    fitness: Option<f64>,
}

impl Individual {
    /// Creates an unevaluated individual.
    pub fn new(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            fitness: None,
        }
    }

    /// Creates an individual with a known fitness.
    pub fn evaluated(chromosome: Chromosome, fitness: f64) -> Self {
        Self {
            chromosome,
            fitness: Some(fitness),
        }
    }

    /// The genetic representation.
    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    /// Fitness, if evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Fitness for ranking: unevaluated individuals rank last.
    pub fn score(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }

    /// Records the fitness.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

/// Builds a random vehicle → deliveries assignment.
///
/// Deliveries are shuffled and dealt in balanced consecutive chunks to the
/// vehicles taken in shuffled order, ignoring capacity.
pub fn random_assignment<R: Rng + ?Sized>(registry: &FleetRegistry, rng: &mut R) -> RouteAssignment {
    let mut deliveries = registry.delivery_ids();
    deliveries.shuffle(rng);

    let mut vehicles: Vec<usize> = registry.vehicles().iter().map(|v| v.id()).collect();
    vehicles.shuffle(rng);

    let chunk = deliveries.len().div_ceil(vehicles.len()).max(1);
    deliveries
        .chunks(chunk)
        .zip(vehicles)
        .map(|(ids, vehicle_id)| Trip::new(vehicle_id, ids.to_vec()))
        .collect::<Vec<_>>()
        .into()
}

/// Creates `size` unevaluated individuals from random assignments.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_dispatch::demo_data;
/// use u_dispatch::ga::initial_population;
///
/// let registry = demo_data::registry_for_city("SP").unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let population = initial_population(&registry, 10, &mut rng);
/// assert_eq!(population.len(), 10);
/// for ind in &population {
///     assert!(ind.fitness().is_none());
///     assert!(ind.chromosome().validate_for(&registry).is_ok());
/// }
/// ```
pub fn initial_population<R: Rng + ?Sized>(
    registry: &FleetRegistry,
    size: usize,
    rng: &mut R,
) -> Vec<Individual> {
    (0..size)
        .map(|_| Individual::new(encode(&random_assignment(registry, rng))))
        .collect()
}
