//! Evolution driver.
//!
//! [`EvolutionRunner`] seeds a population from one layout and advances it
//! until the generation budget is spent, the run is cancelled, the best
//! score reaches zero, or the best score plateaus for
//! [`EvolutionConfig::stagnation_limit`] generations.

use super::config::EvolutionConfig;
use super::population::{GenerationStats, Population};
use crate::error::AutographError;
use crate::layout::BipartiteLayout;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Receives the population at every reporting point, together with the
/// best layout found so far in the run.
///
/// Under [`SurvivorPolicy::RandomRetain`](super::SurvivorPolicy::RandomRetain)
/// the run's best can be better than `population.best()`, so exporters
/// should write `best`.
///
/// Implemented for closures, so a quick observer can be passed inline:
///
/// ```ignore
/// let mut print = |p: &Population, best: &BipartiteLayout| -> std::io::Result<()> {
///     println!("gen {} best {}", p.generation(), best.score());
///     Ok(())
/// };
/// EvolutionRunner::run(layout, &config, &mut print)?;
/// ```
pub trait Reporter {
    /// Called for generation 0, every `report_interval` generations and
    /// for the final generation.
    fn report(&mut self, population: &Population, best: &BipartiteLayout) -> std::io::Result<()>;
}

impl<F> Reporter for F
where
    F: FnMut(&Population, &BipartiteLayout) -> std::io::Result<()>,
{
    fn report(&mut self, population: &Population, best: &BipartiteLayout) -> std::io::Result<()> {
        self(population, best)
    }
}

/// Result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// The best layout seen during the entire run.
    pub best: BipartiteLayout,

    /// Crossing count of `best`.
    pub best_score: u64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run stopped on a score plateau.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best score of the population at generation 0 and after each
    /// generation.
    pub score_history: Vec<u64>,

    /// Statistics of the last generation.
    pub final_stats: GenerationStats,
}

enum Stop {
    Cancelled,
    Stagnated,
    Solved,
    Failed(std::io::Error),
}

/// Executes the evolutionary loop.
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Runs the evolution starting from `initial`.
    pub fn run<Rep: Reporter>(
        initial: BipartiteLayout,
        config: &EvolutionConfig,
        reporter: &mut Rep,
    ) -> Result<EvolutionResult, AutographError> {
        Self::run_with_cancel(initial, config, reporter, None)
    }

    /// Runs the evolution with an optional cancellation token.
    ///
    /// If `cancel` is set to `true`, the run stops at the end of the
    /// current generation, reports it and returns the best layout so far.
    pub fn run_with_cancel<Rep: Reporter>(
        initial: BipartiteLayout,
        config: &EvolutionConfig,
        reporter: &mut Rep,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolutionResult, AutographError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let is_cancelled = || {
            cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
        };

        let mut population = Population::seed(initial);
        info!(
            seed,
            population_size = config.population_size,
            max_generations = config.max_generations,
            initial_score = population.best().score(),
            "starting evolution"
        );
        let mut best = population.best().clone();
        reporter.report(&population, &best)?;
        let mut last_reported = 0;

        let mut score_history = Vec::with_capacity(config.max_generations + 1);
        score_history.push(best.score());
        let mut stagnation_counter = 0usize;

        let flow = if is_cancelled() {
            ControlFlow::Break(Stop::Cancelled)
        } else if best.score() == 0 {
            ControlFlow::Break(Stop::Solved)
        } else {
            population.advance_n_gens(config.max_generations, config, &mut rng, |pop| {
                let stats = pop.stats();
                debug!(
                    generation = stats.generation,
                    best = stats.best,
                    median = stats.median,
                    worst = stats.worst,
                    "generation ranked"
                );
                score_history.push(stats.best);

                if stats.best < best.score() {
                    best = pop.best().clone();
                    stagnation_counter = 0;
                } else {
                    stagnation_counter += 1;
                }

                if config.report_interval > 0 && stats.generation % config.report_interval == 0 {
                    info!(generation = stats.generation, best = stats.best, "report");
                    if let Err(err) = reporter.report(pop, &best) {
                        return ControlFlow::Break(Stop::Failed(err));
                    }
                    last_reported = stats.generation;
                }

                if is_cancelled() {
                    ControlFlow::Break(Stop::Cancelled)
                } else if best.score() == 0 {
                    ControlFlow::Break(Stop::Solved)
                } else if config.stagnation_limit > 0
                    && stagnation_counter >= config.stagnation_limit
                {
                    ControlFlow::Break(Stop::Stagnated)
                } else {
                    ControlFlow::Continue(())
                }
            })
        };

        let (stagnated, cancelled) = match flow {
            ControlFlow::Break(Stop::Failed(err)) => return Err(err.into()),
            ControlFlow::Break(Stop::Cancelled) => (false, true),
            ControlFlow::Break(Stop::Stagnated) => (true, false),
            ControlFlow::Break(Stop::Solved) | ControlFlow::Continue(()) => (false, false),
        };

        if last_reported != population.generation() {
            reporter.report(&population, &best)?;
        }

        info!(
            generations = population.generation(),
            best = best.score(),
            stagnated,
            cancelled,
            "evolution finished"
        );

        Ok(EvolutionResult {
            best_score: best.score(),
            best,
            generations: population.generation(),
            stagnated,
            cancelled,
            score_history,
            final_stats: *population.stats(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::SurvivorPolicy;
    use crate::layout::{BipartiteGraph, Edge, LayoutDraft};

    fn reversed_matching(n: usize) -> BipartiteLayout {
        let edges = (0..n).map(|i| Edge { from: i, to: i, weight: 1 });
        let g = Arc::new(BipartiteGraph::from_edges(n, n, edges));
        LayoutDraft::from_orders(g, (0..n).collect(), (0..n).rev().collect())
            .expect("valid orders")
            .commit()
    }

    /// Dense enough that 0 crossings is out of reach.
    fn dense(n: usize) -> BipartiteLayout {
        let edges = (0..n).flat_map(|i| (0..n).map(move |j| Edge { from: i, to: j, weight: 1 }));
        BipartiteLayout::initial(Arc::new(BipartiteGraph::from_edges(n, n, edges)))
    }

    fn base_config() -> EvolutionConfig {
        EvolutionConfig::default()
            .with_population_size(20)
            .with_max_generations(50)
            .with_report_interval(10)
            .with_parallel(false)
            .with_seed(42)
    }

    fn silent(_: &Population, _: &BipartiteLayout) -> std::io::Result<()> {
        Ok(())
    }

    #[test]
    fn test_solves_small_matching() {
        let config = base_config().with_max_generations(500);
        let result = EvolutionRunner::run(reversed_matching(6), &config, &mut silent)
            .expect("run succeeds");
        assert_eq!(result.best_score, 0);
        assert!(result.generations < 500, "should stop once solved");
        assert!(!result.stagnated && !result.cancelled);
    }

    #[test]
    fn test_history_is_monotonic_with_elitism() {
        let result = EvolutionRunner::run(reversed_matching(10), &base_config(), &mut silent)
            .expect("run succeeds");
        assert_eq!(result.score_history.len(), result.generations + 1);
        assert_eq!(result.score_history[0], 45);
        for w in result.score_history.windows(2) {
            assert!(w[1] <= w[0], "best score increased: {} -> {}", w[0], w[1]);
        }
        assert_eq!(result.best_score, *result.score_history.last().expect("non-empty"));
    }

    #[test]
    fn test_report_schedule() {
        let mut reported = Vec::new();
        let config = base_config().with_max_generations(25);
        let mut record = |p: &Population, _: &BipartiteLayout| -> std::io::Result<()> {
            reported.push(p.generation());
            Ok(())
        };
        let result = EvolutionRunner::run(dense(3), &config, &mut record).expect("run succeeds");
        assert_eq!(result.generations, 25);
        assert_eq!(reported, vec![0, 10, 20, 25]);
    }

    #[test]
    fn test_report_interval_zero_reports_ends_only() {
        let mut reported = Vec::new();
        let config = base_config().with_max_generations(7).with_report_interval(0);
        let mut record = |p: &Population, _: &BipartiteLayout| -> std::io::Result<()> {
            reported.push(p.generation());
            Ok(())
        };
        EvolutionRunner::run(dense(3), &config, &mut record).expect("run succeeds");
        assert_eq!(reported, vec![0, 7]);
    }

    #[test]
    fn test_final_report_carries_run_best() {
        for seed in 0..10 {
            let config = base_config()
                .with_population_size(10)
                .with_max_generations(40)
                .with_mutation_resistance(0)
                .with_survivors(SurvivorPolicy::RandomRetain)
                .with_seed(seed);
            let mut reported = Vec::new();
            let mut record = |p: &Population, best: &BipartiteLayout| -> std::io::Result<()> {
                assert!(best.score() <= p.best().score());
                reported.push((p.generation(), best.clone()));
                Ok(())
            };
            let result = EvolutionRunner::run(reversed_matching(12), &config, &mut record)
                .expect("run succeeds");
            let (generation, exported) = reported.last().expect("final report");
            assert_eq!(*generation, result.generations);
            assert_eq!(exported.score(), result.best_score);
            assert_eq!(*exported, result.best);
        }
    }

    #[test]
    fn test_stagnation_termination() {
        // Every ordering of K(3,3) scores 9, so nothing ever improves.
        let config = base_config()
            .with_max_generations(1000)
            .with_stagnation_limit(5);
        let result = EvolutionRunner::run(dense(3), &config, &mut silent).expect("run succeeds");
        assert!(result.stagnated);
        assert_eq!(result.generations, 5);
        assert_eq!(result.best_score, 9);
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            EvolutionRunner::run_with_cancel(dense(3), &base_config(), &mut silent, Some(cancel))
                .expect("run succeeds");
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
    }

    #[test]
    fn test_cancel_from_reporter() {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        let config = base_config().with_max_generations(1000).with_report_interval(3);
        let mut cancel_at_six = |p: &Population, _: &BipartiteLayout| -> std::io::Result<()> {
            if p.generation() == 6 {
                flag.store(true, Ordering::Relaxed);
            }
            Ok(())
        };
        let result =
            EvolutionRunner::run_with_cancel(dense(3), &config, &mut cancel_at_six, Some(cancel))
                .expect("run succeeds");
        assert!(result.cancelled);
        assert_eq!(result.generations, 6);
    }

    #[test]
    fn test_reporter_error_propagates() {
        let mut failing = |p: &Population, _: &BipartiteLayout| -> std::io::Result<()> {
            if p.generation() == 10 {
                Err(std::io::Error::other("disk full"))
            } else {
                Ok(())
            }
        };
        let result = EvolutionRunner::run(dense(3), &base_config(), &mut failing);
        assert!(matches!(result, Err(AutographError::Io(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = base_config().with_population_size(0);
        let result = EvolutionRunner::run(dense(2), &config, &mut silent);
        assert!(matches!(result, Err(AutographError::Config(_))));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = base_config().with_survivors(SurvivorPolicy::RandomRetain);
        let a = EvolutionRunner::run(reversed_matching(8), &config, &mut silent)
            .expect("run succeeds");
        let b = EvolutionRunner::run(reversed_matching(8), &config, &mut silent)
            .expect("run succeeds");
        assert_eq!(a.score_history, b.score_history);
        assert_eq!(a.best, b.best);
    }
}
