use autograph::evolution::{EvolutionConfig, EvolutionRunner, SurvivorPolicy};
use autograph::io::{parse_matrix, DotExporter};
use autograph::layout::{BipartiteLayout, Side};
use autograph::{AutographError, ConfigError};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Exit status when the input matrix is missing or unreadable.
const EXIT_NO_INPUT: u8 = 16;

/// Lay out a bipartite graph in two columns with as few edge crossings as
/// evolution can find.
#[derive(Parser, Debug)]
#[command(name = "autograph", version, about, long_about = None)]
struct Args {
    /// File path: CSV adjacency matrix (rows = left nodes, columns = right nodes)
    #[arg(value_parser, value_name = "CSV")]
    csv: Option<PathBuf>,

    /// Number of specimens per generation
    #[arg(short = 'n', long = "n-specimen", default_value_t = 1000)]
    n_specimen: usize,

    /// Number of generations to run
    #[arg(short = 'g', long = "n-generations", default_value_t = 1000)]
    n_generations: usize,

    /// Mutation resistance, 0-100 (higher = fewer swaps)
    #[arg(short = 'p', long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    probability: u8,

    /// Export the best layout every this many generations (0 = first and last only)
    #[arg(short = 'o', long, default_value_t = 100)]
    output: usize,

    /// Directory receiving the exported .dot files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of each generation kept unchanged
    #[arg(long, default_value_t = 0.1)]
    elite_ratio: f64,

    /// Keep a random subset each generation instead of the best layouts
    #[arg(long)]
    random_retain: bool,

    /// Stop after this many generations without improvement (0 = never)
    #[arg(long, default_value_t = 0)]
    stagnation_limit: usize,

    /// Produce and score children on a single thread
    #[arg(long)]
    sequential: bool,
}

impl Args {
    fn config(&self) -> EvolutionConfig {
        let survivors = if self.random_retain {
            SurvivorPolicy::RandomRetain
        } else {
            SurvivorPolicy::Elitist {
                ratio: self.elite_ratio,
            }
        };
        let config = EvolutionConfig::default()
            .with_population_size(self.n_specimen)
            .with_max_generations(self.n_generations)
            .with_mutation_resistance(self.probability)
            .with_report_interval(self.output)
            .with_survivors(survivors)
            .with_stagnation_limit(self.stagnation_limit)
            .with_parallel(!self.sequential);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help / --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            eprintln!("ERROR: {err}");
            eprintln!("{}", Args::command().render_usage());
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let text = match read_input(args.csv.as_ref()) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{}", Args::command().render_usage());
            eprintln!("ERROR: {err}");
            return ExitCode::from(EXIT_NO_INPUT);
        }
    };

    match run(&args, &text) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String, ConfigError> {
    let path = path.ok_or(ConfigError::MissingInput)?;
    info!(path = %path.display(), "importing data");
    std::fs::read_to_string(path).map_err(|source| ConfigError::UnreadableInput {
        path: path.clone(),
        source,
    })
}

fn run(args: &Args, text: &str) -> Result<(), AutographError> {
    let config = args.config();
    config.validate()?;

    let graph = Arc::new(parse_matrix(text)?.to_graph());
    info!(
        left = graph.node_count(Side::Left),
        right = graph.node_count(Side::Right),
        edges = graph.edge_count(),
        max_degree = graph.max_degree(),
        "graph imported"
    );

    let mut exporter = DotExporter::new(&args.out_dir);
    let result = EvolutionRunner::run(BipartiteLayout::initial(graph), &config, &mut exporter)?;

    println!(
        "best score {} after {} generations (written to {})",
        result.best_score,
        result.generations,
        exporter.path_for(result.generations).display()
    );
    Ok(())
}
