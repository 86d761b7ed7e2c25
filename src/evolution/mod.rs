//! Generational evolution of layouts.
//!
//! Starting from one imported layout, each generation keeps a set of
//! survivors and refills the population by mutating them with adjacent
//! slot swaps. Members are ranked by crossing count (lower is better).
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: population size, generation budget, mutation
//!   resistance, reporting interval, survivor policy
//! - [`Population`]: one ranked generation with its [`GenerationStats`]
//! - [`EvolutionRunner`]: drives the loop and calls a [`Reporter`]
//! - [`EvolutionResult`]: best layout and score history of a run
//!
//! # Reproducibility
//!
//! A run draws from a single seeded generator. Each child gets its own
//! generator seeded from it, so a fixed seed yields the same result with
//! or without parallel child production.
//!
//! # References
//!
//! - Eades & Wormald (1994), "Edge crossings in drawings of bipartite graphs"
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod population;
mod runner;
mod selection;

pub use config::EvolutionConfig;
pub use population::{GenerationStats, Population};
pub use runner::{EvolutionResult, EvolutionRunner, Reporter};
pub use selection::SurvivorPolicy;
