//! Generational evolution loop.
//!
//! # States
//!
//! INIT → (EVALUATE → STATS → SELECT → REPRODUCE) × `max_generations` → DONE
//!
//! - **INIT**: random assignments encoded into `population_size` chromosomes.
//! - **EVALUATE**: decode and score every individual independently.
//! - **STATS**: best/mean/worst fitness; the best overall is replaced only on
//!   strict improvement, so the first-found best survives ties.
//! - **SELECT**: elite plus tournament winners form the survivor pool.
//! - **REPRODUCE**: tournament parents → crossover → mutation, until the
//!   offspring fully replace the population.
//! - **DONE**: the best overall chromosome is decoded into its routes.
//!
//! Termination is by generation count only. The best overall is updated
//! only between generations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DispatchError, Result};
use crate::evaluation::{FitnessEvaluator, FitnessWeights};
use crate::models::{FleetRegistry, RouteAssignment};

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::crossover::Crossover;
use super::decode::decode;
use super::population::{initial_population, Individual};
use super::selection::{select_next_generation, tournament_selection};

/// Fitness statistics of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation index, starting at 0.
    pub generation: usize,
    /// Lowest fitness.
    pub best: f64,
    /// Mean fitness.
    pub mean: f64,
    /// Highest fitness.
    pub worst: f64,
}

/// Best individual seen so far and when it was first found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestOverall {
    /// Generation in which this fitness was first reached.
    pub generation: usize,
    /// Its fitness.
    pub fitness: f64,
    /// Its chromosome.
    pub chromosome: Chromosome,
}

/// Trips and deliveries of one vehicle in the final assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSummary {
    /// Vehicle ID.
    pub vehicle_id: usize,
    /// Number of trips run by the vehicle.
    pub trips: usize,
    /// Deliveries served over all its trips.
    pub deliveries: usize,
    /// Load of each trip, in dispatch order.
    pub loads: Vec<i64>,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best individual over all generations.
    pub best: BestOverall,
    /// Decoded trips of the best chromosome.
    pub routes: RouteAssignment,
    /// Deliveries the final decode could not place on any trip.
    pub unassigned: Vec<usize>,
    /// One entry per completed generation.
    pub history: Vec<GenerationStats>,
}

impl EvolutionResult {
    /// Number of deliveries in the problem.
    pub fn total_deliveries(&self) -> usize {
        self.best.chromosome.len()
    }

    /// Number of deliveries placed on a trip.
    pub fn num_assigned(&self) -> usize {
        self.routes.num_assigned()
    }

    /// Per-vehicle trip counts and loads, vehicles in first-dispatch order.
    pub fn vehicle_summary(&self, registry: &FleetRegistry) -> Result<Vec<VehicleSummary>> {
        let mut out: Vec<VehicleSummary> = Vec::new();
        for trip in self.routes.trips() {
            let load = trip
                .deliveries
                .iter()
                .map(|&id| registry.delivery(id).map(|d| i64::from(d.demand())))
                .sum::<Result<i64>>()?;
            let idx = match out.iter().position(|s| s.vehicle_id == trip.vehicle_id) {
                Some(idx) => idx,
                None => {
                    out.push(VehicleSummary {
                        vehicle_id: trip.vehicle_id,
                        trips: 0,
                        deliveries: 0,
                        loads: Vec::new(),
                    });
                    out.len() - 1
                }
            };
            let entry = &mut out[idx];
            entry.trips += 1;
            entry.deliveries += trip.len();
            entry.loads.push(load);
        }
        Ok(out)
    }
}

/// Genetic algorithm over a fleet registry.
///
/// # Examples
///
/// ```
/// use u_dispatch::demo_data;
/// use u_dispatch::ga::{GaConfig, GeneticAlgorithm};
///
/// let registry = demo_data::registry_for_city("SP").unwrap();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_seed(42);
///
/// let result = GeneticAlgorithm::new(&registry, config).unwrap().run().unwrap();
/// assert_eq!(result.history.len(), 10);
/// assert_eq!(result.num_assigned(), 25);
/// assert!(result.best.fitness <= result.history[0].best);
/// ```
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm<'a> {
    registry: &'a FleetRegistry,
    config: GaConfig,
    weights: FitnessWeights,
}

impl<'a> GeneticAlgorithm<'a> {
    /// Creates an engine after validating the configuration.
    pub fn new(registry: &'a FleetRegistry, config: GaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry,
            config,
            weights: FitnessWeights::default(),
        })
    }

    /// Uses custom fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Run parameters.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs with a generator seeded from [`GaConfig::seed`], or from the OS
    /// when no seed is set.
    pub fn run(&self) -> Result<EvolutionResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Runs with a caller-supplied random generator.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<EvolutionResult> {
        let cfg = &self.config;
        let registry = self.registry;
        let evaluator = FitnessEvaluator::with_weights(registry, self.weights);
        let crossover = Crossover::new(cfg.rbx_probability);

        info!(
            deliveries = registry.num_deliveries(),
            vehicles = registry.vehicles().len(),
            population = cfg.population_size,
            generations = cfg.max_generations,
            "starting evolution"
        );
        let undeliverable = registry.undeliverable();
        if !undeliverable.is_empty() {
            warn!(?undeliverable, "deliveries exceed every vehicle capacity and will be dropped");
        }

        let mut population = initial_population(registry, cfg.population_size, rng);
        for ind in &population {
            ind.chromosome().validate_for(registry)?;
        }

        let mut best: Option<BestOverall> = None;
        let mut history = Vec::with_capacity(cfg.max_generations);

        for generation in 0..cfg.max_generations {
            evaluate_population(&mut population, registry, &evaluator)?;

            let (stats, leader) = generation_stats(generation, &population)
                .ok_or_else(|| DispatchError::config("population is empty"))?;
            if best.as_ref().map_or(true, |b| stats.best < b.fitness) {
                best = Some(BestOverall {
                    generation,
                    fitness: stats.best,
                    chromosome: population[leader].chromosome().clone(),
                });
            }
            history.push(stats);

            if generation % 10 == 0 || generation + 1 == cfg.max_generations {
                info!(
                    generation,
                    best = stats.best,
                    mean = stats.mean,
                    worst = stats.worst,
                    "generation complete"
                );
            } else {
                debug!(
                    generation,
                    best = stats.best,
                    mean = stats.mean,
                    worst = stats.worst,
                    "generation complete"
                );
            }

            let survivors = select_next_generation(
                &population,
                cfg.population_size,
                cfg.elite_ratio,
                cfg.tournament_k,
                rng,
            );

            let mut offspring = Vec::with_capacity(cfg.population_size);
            while offspring.len() < cfg.population_size {
                let p1 = tournament_selection(&survivors, cfg.parent_tournament_k, rng)
                    .ok_or_else(|| DispatchError::config("survivor pool is empty"))?;
                let p2 = tournament_selection(&survivors, cfg.parent_tournament_k, rng)
                    .ok_or_else(|| DispatchError::config("survivor pool is empty"))?;
                let child = crossover.apply(p1.chromosome(), p2.chromosome(), registry, rng)?;
                let child = cfg.mutation.apply(&child, cfg.mutation_probability, rng);
                offspring.push(Individual::new(child));
            }
            population = offspring;
        }

        let best = best.ok_or_else(|| DispatchError::config("no generation was evaluated"))?;
        let decoded = decode(&best.chromosome, registry)?;

        info!(
            generation = best.generation,
            fitness = best.fitness,
            assigned = decoded.routes.num_assigned(),
            total = best.chromosome.len(),
            trips = decoded.routes.num_trips(),
            "evolution complete"
        );
        if !decoded.is_complete() {
            warn!(
                unassigned = ?decoded.unassigned,
                "best solution leaves deliveries unassigned: fleet capacity is insufficient"
            );
        }

        Ok(EvolutionResult {
            best,
            routes: decoded.routes,
            unassigned: decoded.unassigned,
            history,
        })
    }
}

fn evaluate_individual(
    individual: &mut Individual,
    registry: &FleetRegistry,
    evaluator: &FitnessEvaluator<'_>,
) -> Result<()> {
    let decoded = decode(individual.chromosome(), registry)?;
    let fitness = evaluator.evaluate(&decoded.routes)?;
    individual.set_fitness(fitness);
    Ok(())
}

#[cfg(feature = "parallel")]
fn evaluate_population(
    population: &mut [Individual],
    registry: &FleetRegistry,
    evaluator: &FitnessEvaluator<'_>,
) -> Result<()> {
    use rayon::prelude::*;

    population
        .par_iter_mut()
        .try_for_each(|ind| evaluate_individual(ind, registry, evaluator))
}

#[cfg(not(feature = "parallel"))]
fn evaluate_population(
    population: &mut [Individual],
    registry: &FleetRegistry,
    evaluator: &FitnessEvaluator<'_>,
) -> Result<()> {
    population
        .iter_mut()
        .try_for_each(|ind| evaluate_individual(ind, registry, evaluator))
}

/// Stats of an evaluated population plus the index of its first best member.
fn generation_stats(generation: usize, population: &[Individual]) -> Option<(GenerationStats, usize)> {
    let first = population.first()?;
    let mut leader = 0;
    let mut best = first.score();
    let mut worst = first.score();
    let mut sum = 0.0;
    for (idx, ind) in population.iter().enumerate() {
        let f = ind.score();
        if f < best {
            best = f;
            leader = idx;
        }
        if f > worst {
            worst = f;
        }
        sum += f;
    }
    let stats = GenerationStats {
        generation,
        best,
        mean: sum / population.len() as f64,
        worst,
    };
    Some((stats, leader))
}
