//! Permutation chromosome for delivery dispatch.
//!
//! A chromosome lists every delivery ID exactly once. The
//! [`decode`](super::decode) step turns the order into per-vehicle trips
//! under capacity; [`encode`] flattens trips back into a chromosome.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ChromosomeFault, DispatchError, Result};
use crate::models::{FleetRegistry, RouteAssignment};

/// An ordered permutation of delivery IDs.
///
/// Genetic operators never modify a chromosome in place; they return a new
/// one.
///
/// # Examples
///
/// ```
/// use u_dispatch::ga::Chromosome;
///
/// let c = Chromosome::new(vec![3, 1, 2]);
/// assert_eq!(c.genes(), &[3, 1, 2]);
/// assert!(c.validate(3).is_ok());
/// assert!(Chromosome::new(vec![1, 1, 2]).validate(3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chromosome {
    genes: Vec<usize>,
}

impl Chromosome {
    /// Wraps a gene sequence. Use [`validate`](Self::validate) to check it.
    pub fn new(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    /// Delivery IDs in chromosome order.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Consumes the chromosome, returning its genes.
    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if there are no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Checks the length is `n` and no gene repeats.
    pub fn validate(&self, n: usize) -> Result<()> {
        if self.genes.len() != n {
            return Err(DispatchError::InvalidChromosome(ChromosomeFault::WrongLength {
                expected: n,
                actual: self.genes.len(),
            }));
        }
        let mut seen = HashSet::with_capacity(n);
        for &g in &self.genes {
            if !seen.insert(g) {
                return Err(DispatchError::InvalidChromosome(ChromosomeFault::DuplicateGene(g)));
            }
        }
        Ok(())
    }

    /// Checks this chromosome is a permutation of the registry's delivery IDs.
    pub fn validate_for(&self, registry: &FleetRegistry) -> Result<()> {
        self.validate(registry.num_deliveries())?;
        match self.genes.iter().find(|&&g| !registry.contains_delivery(g)) {
            Some(&g) => Err(DispatchError::InvalidChromosome(ChromosomeFault::UnknownGene(g))),
            None => Ok(()),
        }
    }
}

impl From<Vec<usize>> for Chromosome {
    fn from(genes: Vec<usize>) -> Self {
        Self::new(genes)
    }
}

/// Flattens a route assignment into a chromosome, trip by trip.
///
/// # Examples
///
/// ```
/// use u_dispatch::ga::encode;
/// use u_dispatch::models::{RouteAssignment, Trip};
///
/// let routes = RouteAssignment::from(vec![Trip::new(1, vec![4, 2]), Trip::new(2, vec![1, 3])]);
/// assert_eq!(encode(&routes).genes(), &[4, 2, 1, 3]);
/// ```
pub fn encode(routes: &RouteAssignment) -> Chromosome {
    Chromosome::new(routes.delivery_ids())
}
