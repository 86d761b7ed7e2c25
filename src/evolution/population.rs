//! Generations of candidate layouts.

use super::config::EvolutionConfig;
use crate::layout::BipartiteLayout;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::ControlFlow;

/// Score summary of one ranked generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation number (0 = seed population).
    pub generation: usize,
    /// Lowest crossing count.
    pub best: u64,
    /// Crossing count at index `len / 2` of the ranking.
    pub median: u64,
    /// Highest crossing count.
    pub worst: u64,
    /// Mean crossing count.
    pub mean: f64,
}

impl GenerationStats {
    fn of(generation: usize, ranked: &[BipartiteLayout]) -> Self {
        let total: u64 = ranked.iter().map(BipartiteLayout::score).sum();
        Self {
            generation,
            best: ranked[0].score(),
            median: ranked[ranked.len() / 2].score(),
            worst: ranked[ranked.len() - 1].score(),
            mean: total as f64 / ranked.len() as f64,
        }
    }
}

/// One generation of layouts, ranked by ascending crossing count.
///
/// A population starts from a single imported layout and grows to
/// [`EvolutionConfig::population_size`] on the first [`evolve`](Self::evolve).
#[derive(Debug, Clone)]
pub struct Population {
    generation: usize,
    members: Vec<BipartiteLayout>,
    stats: GenerationStats,
}

impl Population {
    /// Creates generation 0 holding only `layout`.
    pub fn seed(layout: BipartiteLayout) -> Self {
        let members = vec![layout];
        let stats = GenerationStats::of(0, &members);
        Self {
            generation: 0,
            members,
            stats,
        }
    }

    /// Number of completed [`evolve`](Self::evolve) steps.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Members, best first.
    pub fn members(&self) -> &[BipartiteLayout] {
        &self.members
    }

    /// The lowest-crossing member.
    pub fn best(&self) -> &BipartiteLayout {
        &self.members[0]
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Advances one generation.
    ///
    /// 1. Selects survivors with [`EvolutionConfig::survivors`].
    /// 2. Refills to `population_size` by mutating survivors round-robin,
    ///    each child with its own generator seeded from `rng`. At least one
    ///    child is bred even when the survivors already fill the population.
    /// 3. Ranks by score and truncates to `population_size`. The sort is
    ///    stable with children ahead of survivors, so a child replaces an
    ///    equally scored survivor.
    pub fn evolve<R: Rng>(&mut self, config: &EvolutionConfig, rng: &mut R) {
        let kept = config.survivors.select(self.members.len(), rng);
        let mut keep = vec![false; self.members.len()];
        for i in kept {
            keep[i] = true;
        }

        let survivors: Vec<BipartiteLayout> = std::mem::take(&mut self.members)
            .into_iter()
            .zip(keep)
            .filter_map(|(layout, keep)| keep.then_some(layout))
            .collect();

        let missing = config.population_size.saturating_sub(survivors.len()).max(1);
        let seeds: Vec<u64> = (0..missing).map(|_| rng.random()).collect();
        let mut next = breed(&survivors, &seeds, config.mutation_resistance, config.parallel);
        next.extend(survivors);

        next.sort_by_key(BipartiteLayout::score);
        next.truncate(config.population_size);

        self.generation += 1;
        self.stats = GenerationStats::of(self.generation, &next);
        self.members = next;
    }

    /// Runs up to `n` [`evolve`](Self::evolve) steps, calling `observe`
    /// after each one. Stops early when `observe` breaks.
    pub fn advance_n_gens<R, B, F>(
        &mut self,
        n: usize,
        config: &EvolutionConfig,
        rng: &mut R,
        mut observe: F,
    ) -> ControlFlow<B>
    where
        R: Rng,
        F: FnMut(&Population) -> ControlFlow<B>,
    {
        for _ in 0..n {
            self.evolve(config, rng);
            observe(self)?;
        }
        ControlFlow::Continue(())
    }
}

/// Produces one mutated child per seed; child `i` descends from
/// `parents[i % parents.len()]`.
fn breed(
    parents: &[BipartiteLayout],
    seeds: &[u64],
    resistance: u8,
    parallel: bool,
) -> Vec<BipartiteLayout> {
    let child = |(i, &seed): (usize, &u64)| {
        let mut rng = StdRng::seed_from_u64(seed);
        parents[i % parents.len()].mutate(resistance, &mut rng)
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if parallel {
            return seeds.par_iter().enumerate().map(child).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    seeds.iter().enumerate().map(child).collect()
}
