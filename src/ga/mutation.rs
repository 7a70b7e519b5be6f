//! Mutation operators on permutation chromosomes.
//!
//! Each operator fires with a trigger probability. When it does not fire the
//! input is returned as a copy; the argument is never modified.

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;

/// Mutation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationKind {
    /// Exchange two genes.
    Swap,
    /// Move one gene to another position.
    Relocate,
    /// Swap or relocate with equal chance.
    #[default]
    Light,
}

impl MutationKind {
    /// Applies this strategy with the given trigger probability.
    pub fn apply<R: Rng + ?Sized>(
        self,
        chromosome: &Chromosome,
        probability: f64,
        rng: &mut R,
    ) -> Chromosome {
        match self {
            MutationKind::Swap => swap_mutation(chromosome, probability, rng),
            MutationKind::Relocate => relocate_mutation(chromosome, probability, rng),
            MutationKind::Light => light_mutation(chromosome, probability, rng),
        }
    }
}

/// Swaps the genes at two distinct random positions.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_dispatch::ga::{swap_mutation, Chromosome};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let original = Chromosome::new(vec![1, 2, 3, 4]);
/// let mutant = swap_mutation(&original, 1.0, &mut rng);
/// assert_ne!(mutant, original);
/// assert_eq!(original.genes(), &[1, 2, 3, 4]);
/// ```
pub fn swap_mutation<R: Rng + ?Sized>(
    chromosome: &Chromosome,
    probability: f64,
    rng: &mut R,
) -> Chromosome {
    let Some((i, j)) = trigger(chromosome, probability, rng) else {
        return chromosome.clone();
    };
    let mut genes = chromosome.genes().to_vec();
    genes.swap(i, j);
    Chromosome::new(genes)
}

/// Removes the gene at one random position and reinserts it at another.
pub fn relocate_mutation<R: Rng + ?Sized>(
    chromosome: &Chromosome,
    probability: f64,
    rng: &mut R,
) -> Chromosome {
    let Some((i, j)) = trigger(chromosome, probability, rng) else {
        return chromosome.clone();
    };
    let mut genes = chromosome.genes().to_vec();
    let gene = genes.remove(i);
    genes.insert(j, gene);
    Chromosome::new(genes)
}

/// Fires with `probability`, then applies swap or relocate (50/50) with
/// certainty.
pub fn light_mutation<R: Rng + ?Sized>(
    chromosome: &Chromosome,
    probability: f64,
    rng: &mut R,
) -> Chromosome {
    if !fires(probability, rng) {
        return chromosome.clone();
    }
    if rng.random_bool(0.5) {
        swap_mutation(chromosome, 1.0, rng)
    } else {
        relocate_mutation(chromosome, 1.0, rng)
    }
}

fn fires<R: Rng + ?Sized>(probability: f64, rng: &mut R) -> bool {
    if probability.is_nan() {
        return false;
    }
    rng.random_bool(probability.clamp(0.0, 1.0))
}

/// Draws the trigger, then two distinct positions. `None` means no mutation.
fn trigger<R: Rng + ?Sized>(
    chromosome: &Chromosome,
    probability: f64,
    rng: &mut R,
) -> Option<(usize, usize)> {
    if !fires(probability, rng) || chromosome.len() < 2 {
        return None;
    }
    let picks = index::sample(rng, chromosome.len(), 2);
    Some((picks.index(0), picks.index(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted(c: &Chromosome) -> Vec<usize> {
        let mut g = c.genes().to_vec();
        g.sort_unstable();
        g
    }

    fn sample() -> Chromosome {
        Chromosome::new(vec![10, 20, 30, 40, 50, 60])
    }

    #[test]
    fn test_zero_probability_is_identity() {
        let mut rng = StdRng::seed_from_u64(5);
        let c = sample();
        for _ in 0..50 {
            assert_eq!(swap_mutation(&c, 0.0, &mut rng), c);
            assert_eq!(relocate_mutation(&c, 0.0, &mut rng), c);
            assert_eq!(light_mutation(&c, 0.0, &mut rng), c);
        }
    }

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = StdRng::seed_from_u64(6);
        let c = sample();
        for _ in 0..50 {
            let m = swap_mutation(&c, 1.0, &mut rng);
            let diff = c.genes().iter().zip(m.genes()).filter(|(a, b)| a != b).count();
            assert_eq!(diff, 2);
            assert_eq!(sorted(&m), sorted(&c));
        }
    }

    #[test]
    fn test_relocate_preserves_genes() {
        let mut rng = StdRng::seed_from_u64(7);
        let c = sample();
        for _ in 0..50 {
            let m = relocate_mutation(&c, 1.0, &mut rng);
            assert_ne!(m, c);
            assert_eq!(sorted(&m), sorted(&c));
        }
    }

    #[test]
    fn test_light_always_mutates_at_one() {
        let mut rng = StdRng::seed_from_u64(8);
        let c = sample();
        for _ in 0..50 {
            let m = light_mutation(&c, 1.0, &mut rng);
            assert_ne!(m, c);
            assert!(m.validate(6).is_ok());
        }
    }

    #[test]
    fn test_short_chromosomes_pass_through() {
        let mut rng = StdRng::seed_from_u64(9);
        let one = Chromosome::new(vec![1]);
        assert_eq!(swap_mutation(&one, 1.0, &mut rng), one);
        assert_eq!(relocate_mutation(&one, 1.0, &mut rng), one);
        assert_eq!(light_mutation(&one, 1.0, &mut rng), one);
        let empty = Chromosome::new(vec![]);
        assert_eq!(light_mutation(&empty, 1.0, &mut rng), empty);
    }

    #[test]
    fn test_kind_dispatch() {
        let mut rng = StdRng::seed_from_u64(10);
        let c = sample();
        for kind in [MutationKind::Swap, MutationKind::Relocate, MutationKind::Light] {
            let m = kind.apply(&c, 1.0, &mut rng);
            assert_eq!(sorted(&m), sorted(&c));
        }
        assert_eq!(MutationKind::default(), MutationKind::Light);
    }
}
