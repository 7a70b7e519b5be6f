//! Run parameters of the genetic algorithm.

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};

use super::mutation::MutationKind;

/// Genetic algorithm parameters.
///
/// # Examples
///
/// ```
/// use u_dispatch::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_max_generations(20)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert!(GaConfig::default().with_tournament_k(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of generations to run (> 0).
    pub max_generations: usize,
    /// Individuals per generation (> 0).
    pub population_size: usize,
    /// Share of the population kept as elite, in (0, 1).
    pub elite_ratio: f64,
    /// Trigger probability of the mutation operator, in [0, 1].
    pub mutation_probability: f64,
    /// Mutation strategy applied to every child.
    pub mutation: MutationKind,
    /// Tournament size when filling the survivor pool, in
    /// `1..=population_size`.
    pub tournament_k: usize,
    /// Tournament size when drawing parents from the survivor pool, in
    /// `1..=population_size`.
    pub parent_tournament_k: usize,
    /// Probability of route-based crossover versus best-cost route
    /// crossover, in [0, 1].
    pub rbx_probability: f64,
    /// Seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            max_generations: 100,
            population_size: 50,
            elite_ratio: 0.1,
            mutation_probability: 0.5,
            mutation: MutationKind::Light,
            tournament_k: 3,
            parent_tournament_k: 2,
            rbx_probability: 0.5,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the generation count.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio;
        self
    }

    /// Sets the mutation trigger probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation(mut self, kind: MutationKind) -> Self {
        self.mutation = kind;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_k(mut self, k: usize) -> Self {
        self.tournament_k = k;
        self
    }

    /// Sets the tournament size used to draw parents.
    pub fn with_parent_tournament_k(mut self, k: usize) -> Self {
        self.parent_tournament_k = k;
        self
    }

    /// Sets the probability of choosing RBX over BCRC.
    pub fn with_rbx_probability(mut self, p: f64) -> Self {
        self.rbx_probability = p;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses a JSON document; missing fields take their defaults.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DispatchError::config(format!("malformed GA config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every parameter is within range.
    pub fn validate(&self) -> Result<()> {
        if self.max_generations == 0 {
            return Err(DispatchError::config("max_generations must be positive"));
        }
        if self.population_size == 0 {
            return Err(DispatchError::config("population_size must be positive"));
        }
        if !(self.elite_ratio > 0.0 && self.elite_ratio < 1.0) {
            return Err(DispatchError::config(format!(
                "elite_ratio must be in (0, 1), got {}",
                self.elite_ratio
            )));
        }
        check_probability("mutation_probability", self.mutation_probability)?;
        check_probability("rbx_probability", self.rbx_probability)?;
        check_tournament("tournament_k", self.tournament_k, self.population_size)?;
        check_tournament("parent_tournament_k", self.parent_tournament_k, self.population_size)
    }
}

fn check_tournament(name: &str, k: usize, population_size: usize) -> Result<()> {
    if k == 0 || k > population_size {
        return Err(DispatchError::config(format!(
            "{name} must be in 1..={population_size}, got {k}"
        )));
    }
    Ok(())
}

fn check_probability(name: &str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(DispatchError::config(format!("{name} must be in [0, 1], got {p}")))
    }
}
