//! # u-dispatch
//!
//! Priority-aware delivery dispatch for a heterogeneous fleet. Vehicles have
//! capacity, range and per-distance cost, may run several trips from one
//! depot, and critical deliveries should be served early. Solutions are
//! evolved with a permutation-encoded genetic algorithm.
//!
//! ## Modules
//!
//! - [`models`] — Deliveries, vehicles, trips and the fleet registry
//! - [`distance`] — Manhattan distance and trip length
//! - [`evaluation`] — Fitness with constraint and priority penalties, route metrics
//! - [`ga`] — Chromosome codec, crossover, mutation, selection and the evolution loop
//! - [`demo_data`] — Built-in city datasets
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use u_dispatch::demo_data;
//! use u_dispatch::ga::{GaConfig, GeneticAlgorithm};
//!
//! let registry = demo_data::registry_for_city("SP").unwrap();
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(5)
//!     .with_seed(7);
//! let result = GeneticAlgorithm::new(&registry, config).unwrap().run().unwrap();
//!
//! for summary in result.vehicle_summary(&registry).unwrap() {
//!     assert!(summary.trips >= 1);
//! }
//! ```

pub mod demo_data;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod models;

pub use error::{ChromosomeFault, DispatchError, Result};
