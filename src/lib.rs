//! Evolutionary crossing minimization for bipartite graph layouts.
//!
//! Lays out a weighted bipartite graph in two columns (left set at `x = 0`,
//! right set at `x = 1`) and searches for a vertical ordering of each
//! column that minimizes the number of edge crossings:
//!
//! - **Geometry**: grid positions and the two-column crossing test.
//! - **Layout**: the immutable graph model, editable drafts, scored layouts,
//!   the crossing scorer and the adjacent-swap mutation operator.
//! - **Evolution**: survivor selection, population refill by mutation, and
//!   the generational driver with periodic reporting.
//! - **IO**: adjacency matrix import and GraphViz export.
//!
//! # Example
//!
//! ```
//! use autograph::evolution::{EvolutionConfig, EvolutionRunner, Population};
//! use autograph::io::parse_matrix;
//! use autograph::layout::BipartiteLayout;
//! use std::sync::Arc;
//!
//! let matrix = parse_matrix("0,1\n1,0").unwrap();
//! let layout = BipartiteLayout::initial(Arc::new(matrix.to_graph()));
//! assert_eq!(layout.score(), 1);
//!
//! let config = EvolutionConfig::default()
//!     .with_population_size(10)
//!     .with_max_generations(50)
//!     .with_seed(1);
//! let mut quiet = |_: &Population, _: &BipartiteLayout| -> std::io::Result<()> { Ok(()) };
//! let result = EvolutionRunner::run(layout, &config, &mut quiet).unwrap();
//! assert_eq!(result.best_score, 0);
//! ```

pub mod error;
pub mod evolution;
pub mod geometry;
pub mod io;
pub mod layout;

pub use error::{AutographError, ConfigError, ParseError};
