//! Genetic algorithm for multi-trip delivery dispatch.
//!
//! A chromosome is a permutation of delivery IDs. Decoding packs it greedily
//! into capacity-feasible trips; vehicles may run several trips.
//!
//! - [`Chromosome`], [`encode`], [`decode`] — permutation codec
//! - [`Crossover`] — route-based ([`rbx`]) or best-cost route ([`bcrc`]) crossover
//! - [`MutationKind`] — swap, relocate, or a 50/50 mix of both
//! - [`tournament_selection`], [`get_elite`] — survivor selection
//! - [`GeneticAlgorithm`] — the generational loop

mod chromosome;
mod config;
mod crossover;
mod decode;
mod engine;
mod mutation;
mod population;
mod selection;

pub use chromosome::{encode, Chromosome};
pub use config::GaConfig;
pub use crossover::{bcrc, bcrc_with_cut, rbx, Crossover, CrossoverKind};
pub use decode::{decode, Decoded};
pub use engine::{BestOverall, EvolutionResult, GenerationStats, GeneticAlgorithm, VehicleSummary};
pub use mutation::{light_mutation, relocate_mutation, swap_mutation, MutationKind};
pub use population::{initial_population, random_assignment, Individual};
pub use selection::{elite_count, get_elite, select_next_generation, tournament_selection};
