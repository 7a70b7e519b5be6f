use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use u_dispatch::evaluation::FitnessEvaluator;
use u_dispatch::ga::{
    decode, encode, get_elite, tournament_selection, Chromosome, Crossover, Individual,
    MutationKind,
};
use u_dispatch::models::{
    Delivery, FleetRegistry, Location, Priority, RouteAssignment, Trip, Vehicle,
};

fn registry(demands: &[i32], capacities: &[i32]) -> FleetRegistry {
    let deliveries = demands
        .iter()
        .enumerate()
        .map(|(i, &demand)| {
            let priority = match i % 3 {
                0 => Priority::Critical,
                1 => Priority::High,
                _ => Priority::Low,
            };
            let at = Location::new(i as f64 * 0.5, ((i * 7) % 5) as f64);
            Delivery::new(i + 1, at, demand, priority)
        })
        .collect();
    let vehicles = capacities
        .iter()
        .enumerate()
        .map(|(i, &cap)| Vehicle::new(i + 1, cap).with_max_range(8.0 + i as f64))
        .collect();
    FleetRegistry::new(Location::new(1.0, 1.0), deliveries, vehicles).expect("valid")
}

fn shuffled(reg: &FleetRegistry, rng: &mut StdRng) -> Chromosome {
    let mut ids = reg.delivery_ids();
    ids.shuffle(rng);
    Chromosome::new(ids)
}

/// Random trips under capacity: each delivery goes to a random vehicle's
/// open trip, or starts a new trip for it when the open one is full.
fn capacity_respecting(reg: &FleetRegistry, rng: &mut StdRng) -> RouteAssignment {
    let mut ids = reg.delivery_ids();
    ids.shuffle(rng);
    let vehicles = reg.vehicles();
    let mut trips: Vec<(Trip, i32)> = Vec::new();
    let mut open: Vec<Option<usize>> = vec![None; vehicles.len()];

    for id in ids {
        let demand = reg.delivery(id).expect("known").demand();
        let v = rng.random_range(0..vehicles.len());
        let capacity = vehicles[v].capacity();
        match open[v] {
            Some(t) if demand <= capacity - trips[t].1 => {
                trips[t].0.deliveries.push(id);
                trips[t].1 += demand;
            }
            _ => {
                open[v] = Some(trips.len());
                trips.push((Trip::new(vehicles[v].id(), vec![id]), demand));
            }
        }
    }
    trips.shuffle(rng);
    trips.into_iter().map(|(trip, _)| trip).collect::<Vec<_>>().into()
}

fn instance() -> impl Strategy<Value = (Vec<i32>, Vec<i32>, u64)> {
    (
        prop::collection::vec(1i32..=10, 1..15),
        prop::collection::vec(10i32..=30, 1..5),
        any::<u64>(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn decode_respects_capacity_and_keeps_every_delivery((demands, caps, seed) in instance()) {
        let reg = registry(&demands, &caps);
        let mut rng = StdRng::seed_from_u64(seed);
        let c = shuffled(&reg, &mut rng);

        let decoded = decode(&c, &reg).expect("known genes");
        prop_assert!(decoded.is_complete());
        for trip in decoded.routes.trips() {
            prop_assert!(!trip.is_empty());
            let load: i32 = trip
                .deliveries
                .iter()
                .map(|&id| reg.delivery(id).expect("known").demand())
                .sum();
            prop_assert!(load <= reg.vehicle(trip.vehicle_id).expect("known").capacity());
        }

        let back = encode(&decoded.routes);
        prop_assert!(back.validate_for(&reg).is_ok());
        // decoding is idempotent on its own output
        let again = decode(&back, &reg).expect("known genes");
        prop_assert_eq!(encode(&again.routes), back);
    }

    #[test]
    fn encode_then_decode_keeps_the_delivery_multiset((demands, caps, seed) in instance()) {
        let reg = registry(&demands, &caps);
        let mut rng = StdRng::seed_from_u64(seed);
        let routes = capacity_respecting(&reg, &mut rng);
        for trip in routes.trips() {
            let load: i32 = trip
                .deliveries
                .iter()
                .map(|&id| reg.delivery(id).expect("known").demand())
                .sum();
            prop_assert!(load <= reg.vehicle(trip.vehicle_id).expect("known").capacity());
        }

        let decoded = decode(&encode(&routes), &reg).expect("valid chromosome");
        prop_assert!(decoded.is_complete());
        let mut before = routes.delivery_ids();
        let mut after = decoded.routes.delivery_ids();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(&after, &before);
        prop_assert_eq!(after, reg.delivery_ids());
    }

    #[test]
    fn crossover_yields_permutations((demands, caps, seed) in instance(), rbx_p in 0.0f64..=1.0) {
        let reg = registry(&demands, &caps);
        let mut rng = StdRng::seed_from_u64(seed);
        let p1 = shuffled(&reg, &mut rng);
        let p2 = shuffled(&reg, &mut rng);
        let crossover = Crossover::new(rbx_p);
        for _ in 0..4 {
            let child = crossover.apply(&p1, &p2, &reg, &mut rng).expect("valid parents");
            prop_assert!(child.validate_for(&reg).is_ok());
        }
    }

    #[test]
    fn mutation_yields_permutations((demands, caps, seed) in instance(), p in 0.0f64..=1.0) {
        let reg = registry(&demands, &caps);
        let mut rng = StdRng::seed_from_u64(seed);
        let c = shuffled(&reg, &mut rng);
        for kind in [MutationKind::Swap, MutationKind::Relocate, MutationKind::Light] {
            let m = kind.apply(&c, p, &mut rng);
            prop_assert!(m.validate_for(&reg).is_ok());
        }
        prop_assert_eq!(MutationKind::Light.apply(&c, 0.0, &mut rng), c);
    }

    #[test]
    fn fitness_is_deterministic_and_non_negative((demands, caps, seed) in instance()) {
        let reg = registry(&demands, &caps);
        let mut rng = StdRng::seed_from_u64(seed);
        let routes = decode(&shuffled(&reg, &mut rng), &reg).expect("known genes").routes;
        let evaluator = FitnessEvaluator::new(&reg);
        let a = evaluator.evaluate(&routes).expect("known ids");
        let b = evaluator.evaluate(&routes).expect("known ids");
        prop_assert_eq!(a.to_bits(), b.to_bits());
        prop_assert!(a >= 0.0);
        let parts = evaluator.breakdown(&routes).expect("known ids");
        prop_assert!((parts.total() - a).abs() < 1e-9);
    }

    #[test]
    fn full_tournament_and_elite_pick_the_minimum(
        fitness in prop::collection::vec(0.0f64..1000.0, 1..30),
        seed in any::<u64>(),
    ) {
        let pop: Vec<Individual> = fitness
            .iter()
            .enumerate()
            .map(|(i, &f)| Individual::evaluated(Chromosome::new(vec![i]), f))
            .collect();
        let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let mut rng = StdRng::seed_from_u64(seed);

        let winner = tournament_selection(&pop, pop.len(), &mut rng).expect("non-empty");
        prop_assert_eq!(winner.fitness(), Some(min));

        let elite = get_elite(&pop, 0.0);
        prop_assert_eq!(elite.len(), 1);
        prop_assert_eq!(elite[0].fitness(), Some(min));
    }
}
