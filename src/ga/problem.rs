//! Process sequencing as a GA problem.
//!
//! Searches for the process order with the lowest mean waiting time under
//! strictly sequential execution.
//!
//! # Fitness
//!
//! Processes run back to back in chromosome order with no idle time. For
//! each process, `waiting = end - arrival - duration`; a negative value
//! (the process would have run before it arrived) is replaced by
//! `|waiting - arrival|`. Fitness is the mean over all processes. This is
//! the sequencer's own search objective; reported statistics come from
//! [`decode`](SequencingProblem::decode), which respects arrivals.

use rand::Rng;

use super::chromosome::SequenceChromosome;
use super::operators::GeneticOperators;
use super::GaProblem;
use crate::models::{Process, Timeline, TimelineEntry};

/// GA problem over orderings of a process snapshot.
#[derive(Debug, Clone)]
pub struct SequencingProblem {
    processes: Vec<Process>,
    operators: GeneticOperators,
}

impl SequencingProblem {
    /// Creates a problem with the `1 / N` mutation rate.
    pub fn new(processes: Vec<Process>) -> Self {
        let operators = GeneticOperators::for_process_count(processes.len());
        Self {
            processes,
            operators,
        }
    }

    /// Overrides the per-position mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.operators.mutation_rate = rate;
        self
    }

    /// The snapshot being ordered.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Number of processes (chromosome length).
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether there is nothing to order.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Search objective for an order (see module docs).
    pub fn fitness_of(&self, order: &[usize]) -> f64 {
        if order.is_empty() {
            return 0.0;
        }
        let mut end_time = 0_i64;
        let mut total = 0_i64;
        for &idx in order {
            let p = &self.processes[idx];
            end_time += p.duration;
            let mut waiting = end_time - p.arrival_time - p.duration;
            if waiting < 0 {
                waiting = (waiting - p.arrival_time).abs();
            }
            total += waiting;
        }
        total as f64 / order.len() as f64
    }

    /// Executes the processes in chromosome order, idling until each one
    /// arrives.
    ///
    /// Returns the finished snapshot (in snapshot order) and the timeline
    /// (in execution order).
    pub fn decode(&self, chromosome: &SequenceChromosome) -> (Vec<Process>, Timeline) {
        let mut processes = self.processes.clone();
        let mut timeline = Timeline::new();
        let mut clock = 0_i64;

        for &idx in &chromosome.order {
            let p = &mut processes[idx];
            if p.is_finished() {
                p.remaining_time = 0;
                p.end_time.get_or_insert(p.arrival_time);
                continue;
            }
            let start = clock.max(p.arrival_time);
            let work = p.remaining_time;
            timeline.push(TimelineEntry::new(&p.name, start, start + work, p.arrival_time));
            p.mark_started(start);
            clock = start + work;
            p.execute(work, clock);
        }

        (processes, timeline)
    }
}

impl GaProblem for SequencingProblem {
    type Individual = SequenceChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> SequenceChromosome {
        SequenceChromosome::random(self.processes.len(), rng)
    }

    fn evaluate(&self, individual: &SequenceChromosome) -> f64 {
        self.fitness_of(&individual.order)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &SequenceChromosome,
        parent2: &SequenceChromosome,
        rng: &mut R,
    ) -> Vec<SequenceChromosome> {
        let (c1, c2) = self.operators.crossover(parent1, parent2, rng);
        vec![c1, c2]
    }

    fn mutate<R: Rng>(&self, individual: &mut SequenceChromosome, rng: &mut R) {
        self.operators.mutate(individual, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{GaConfig, GaRunner};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn make_problem() -> SequencingProblem {
        SequencingProblem::new(vec![
            Process::new("A", 8, 0),
            Process::new("B", 2, 0),
            Process::new("C", 4, 1),
            Process::new("D", 1, 3),
        ])
    }

    #[test]
    fn test_fitness_all_arrived() {
        let problem = SequencingProblem::new(vec![Process::new("A", 5, 0), Process::new("B", 3, 0)]);
        // A then B: waits 0, 5 → 2.5 ; B then A: waits 0, 3 → 1.5
        assert!((problem.fitness_of(&[0, 1]) - 2.5).abs() < 1e-10);
        assert!((problem.fitness_of(&[1, 0]) - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_fitness_negative_wait_correction() {
        // B arrives at 10 but would end at 2: wait = 2 - 10 - 2 = -10 → |-10 - 10| = 20
        let problem = SequencingProblem::new(vec![Process::new("B", 2, 10)]);
        assert!((problem.fitness_of(&[0]) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_decode_respects_arrivals() {
        let problem = SequencingProblem::new(vec![Process::new("A", 2, 0), Process::new("B", 3, 5)]);
        let (procs, timeline) = problem.decode(&SequenceChromosome::from_order(vec![1, 0]));

        let spans: Vec<_> = timeline.iter().map(|e| (e.process_name.as_str(), e.start, e.end)).collect();
        assert_eq!(spans, vec![("B", 5, 8), ("A", 8, 10)]);
        // snapshot order is preserved
        assert_eq!(procs[0].name, "A");
        assert_eq!(procs[0].end_time, Some(10));
        assert_eq!(procs[1].starting_time, Some(5));
        assert!(procs.iter().all(|p| p.remaining_time == 0));
    }

    #[test]
    fn test_crossover_and_mutation() {
        let problem = make_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = problem.create_individual(&mut rng);
        let p2 = problem.create_individual(&mut rng);

        let children = problem.crossover(&p1, &p2, &mut rng);
        assert_eq!(children.len(), 2);

        let mut child = children[0].clone();
        problem.mutate(&mut child, &mut rng);
        assert!(child.is_valid(problem.len()));
    }

    #[test]
    fn test_ga_runner_integration() {
        let problem = make_problem();
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(10)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config).unwrap();
        assert!(result.best_fitness.is_finite());
        assert!(result.best.is_valid(4));
        assert_eq!(result.generations, 10);
    }

    #[test]
    fn test_ga_finds_shortest_first_for_simultaneous_arrivals() {
        let problem = SequencingProblem::new(vec![
            Process::new("A", 9, 0),
            Process::new("B", 1, 0),
            Process::new("C", 5, 0),
        ]);
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(30)
            .with_seed(7)
            .with_parallel(false);

        let result = GaRunner::run(&problem, &config).unwrap();
        // SJF order B, C, A: waits 0, 1, 6
        assert_eq!(result.best.order, vec![1, 2, 0]);
        assert!((result.best_fitness - 7.0 / 3.0).abs() < 1e-10);
    }
}
