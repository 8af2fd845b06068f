//! Property tests over random workloads.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use u_cpusched::ga::{order_crossover, shuffle_mutation, GaConfig, SequenceChromosome};
use u_cpusched::models::Discipline;
use u_cpusched::scheduler::RunOptions;
use u_cpusched::Simulator;

fn workload() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((1i64..10, 0i64..20), 1..8)
}

fn simulator(jobs: &[(i64, i64)]) -> Simulator {
    let mut sim = Simulator::new();
    for (i, &(duration, arrival)) in jobs.iter().enumerate() {
        sim.add(format!("P{i}"), duration, arrival).unwrap();
    }
    sim
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_classical_runs_complete_every_process(jobs in workload(), quantum in 1u32..5) {
        let sim = simulator(&jobs);
        let total: i64 = jobs.iter().map(|&(d, _)| d).sum();
        let options = RunOptions::default().with_quantum(quantum);

        for discipline in Discipline::ALL {
            let result = sim.run(discipline, &options).unwrap();
            prop_assert_eq!(result.timeline.busy_time(), total);

            for p in &result.processes {
                prop_assert_eq!(p.remaining_time, 0);
                let end = p.end_time.unwrap();
                prop_assert!(end >= p.arrival_time + p.duration);
            }
            for entry in &result.timeline {
                prop_assert!(entry.start >= entry.arrival_time);
                prop_assert!(entry.end > entry.start);
            }
            for pair in result.timeline.entries().windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }
    }

    #[test]
    fn prop_non_preemptive_runs_one_slice_per_process(jobs in workload()) {
        let sim = simulator(&jobs);
        for discipline in [Discipline::Fcfs, Discipline::Sjf, Discipline::Hrrn] {
            let result = sim.run(discipline, &RunOptions::default()).unwrap();
            prop_assert_eq!(result.timeline.len(), jobs.len());
        }
    }

    #[test]
    fn prop_ga_replay_is_feasible(jobs in workload(), seed in any::<u64>()) {
        let sim = simulator(&jobs);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(5)
            .with_seed(seed)
            .with_parallel(false);

        let result = sim.run_ga(&config).unwrap();
        let total: i64 = jobs.iter().map(|&(d, _)| d).sum();
        prop_assert_eq!(result.timeline.len(), jobs.len());
        prop_assert_eq!(result.timeline.busy_time(), total);
        prop_assert!(result.stats.waiting_mean >= 0.0);
        for p in &result.processes {
            prop_assert!(p.end_time.unwrap() >= p.arrival_time + p.duration);
        }
    }

    #[test]
    fn prop_operators_keep_permutations(n in 1usize..30, seed in any::<u64>(), rate in 0.0f64..=1.0) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let p1 = SequenceChromosome::random(n, &mut rng);
        let p2 = SequenceChromosome::random(n, &mut rng);

        let (mut c1, mut c2) = order_crossover(&p1, &p2, &mut rng);
        shuffle_mutation(&mut c1, rate, &mut rng);
        shuffle_mutation(&mut c2, rate, &mut rng);
        prop_assert!(c1.is_valid(n));
        prop_assert!(c2.is_valid(n));
    }
}
