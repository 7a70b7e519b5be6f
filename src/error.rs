//! Error types shared by every module of the crate.

use thiserror::Error;

/// Why a chromosome failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromosomeFault {
    /// The chromosome does not hold one gene per delivery.
    WrongLength {
        /// Number of deliveries in the registry.
        expected: usize,
        /// Number of genes found.
        actual: usize,
    },
    /// A delivery id appears more than once.
    DuplicateGene(usize),
    /// A gene is not a known delivery id.
    UnknownGene(usize),
}

impl std::fmt::Display for ChromosomeFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength { expected, actual } => {
                write!(f, "expected {expected} genes, found {actual}")
            }
            Self::DuplicateGene(id) => write!(f, "delivery {id} appears more than once"),
            Self::UnknownGene(id) => write!(f, "delivery {id} is not registered"),
        }
    }
}

/// Errors raised while configuring or running the dispatcher.
///
/// Every variant is fatal to the current run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// A chromosome broke the permutation invariant.
    #[error("invalid chromosome: {0}")]
    InvalidChromosome(ChromosomeFault),
    /// Missing or inconsistent registry data, unknown city, or bad parameters.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DispatchError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DispatchError>;
