//! Elitist and tournament selection.
//!
//! Lower fitness is better. Unevaluated individuals rank last.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::population::Individual;

/// Best of `k` individuals sampled without replacement.
///
/// `k` is clamped into `1..=population.len()`, so `k = 1` is a uniform
/// draw. Returns `None` only for an empty population. Ties go to the
/// earliest sampled contender.
pub fn tournament_selection<'a, R: Rng + ?Sized>(
    population: &'a [Individual],
    k: usize,
    rng: &mut R,
) -> Option<&'a Individual> {
    let k = k.clamp(1, population.len().max(1));
    population
        .choose_multiple(rng, k)
        .fold(None, |best: Option<&Individual>, ind| match best {
            Some(b) if b.score() <= ind.score() => Some(b),
            _ => Some(ind),
        })
}

/// Number of elites kept for a population of `pop_size`:
/// `max(1, ceil(pop_size × ratio))`, capped at `pop_size`.
pub fn elite_count(pop_size: usize, ratio: f64) -> usize {
    let wanted = (pop_size as f64 * ratio.max(0.0)).ceil();
    let wanted = if wanted.is_finite() { wanted as usize } else { pop_size };
    wanted.max(1).min(pop_size)
}

/// The best individuals, ascending by fitness (stable for ties).
///
/// # Examples
///
/// ```
/// use u_dispatch::ga::{get_elite, Chromosome, Individual};
///
/// let population: Vec<Individual> = [5.0, 1.0, 3.0, 2.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &f)| Individual::evaluated(Chromosome::new(vec![i]), f))
///     .collect();
/// let elite = get_elite(&population, 0.0);
/// assert_eq!(elite.len(), 1);
/// assert_eq!(elite[0].fitness(), Some(1.0));
/// ```
pub fn get_elite(population: &[Individual], ratio: f64) -> Vec<Individual> {
    let mut sorted: Vec<&Individual> = population.iter().collect();
    sorted.sort_by(|a, b| a.score().total_cmp(&b.score()));
    sorted
        .into_iter()
        .take(elite_count(population.len(), ratio))
        .cloned()
        .collect()
}

/// Survivor pool of `pop_size` individuals: the elite first, then tournament
/// winners drawn independently from the whole `population`.
///
/// The pool may contain the same individual several times.
pub fn select_next_generation<R: Rng + ?Sized>(
    population: &[Individual],
    pop_size: usize,
    elite_ratio: f64,
    tournament_k: usize,
    rng: &mut R,
) -> Vec<Individual> {
    let mut selected = get_elite(population, elite_ratio);
    selected.truncate(pop_size);
    selected.reserve(pop_size.saturating_sub(selected.len()));
    while selected.len() < pop_size {
        match tournament_selection(population, tournament_k, rng) {
            Some(winner) => selected.push(winner.clone()),
            None => break,
        }
    }
    selected
}
