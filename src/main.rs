use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cellga::evolution::fitness::{DEFAULT_TARGET, FeatureCountEvaluator};
use cellga::evolution::individual::Individual;
use cellga::evolution::params::Params;
use cellga::evolution::simulation::Simulation;

#[derive(Parser, Debug)]
#[command(
    name = "cellga",
    version,
    about = "Evolve binary feature-selection masks on a toroidal grid"
)]
struct Cli {
    /// Grid rows.
    #[arg(long)]
    rows: Option<usize>,
    /// Grid columns.
    #[arg(long)]
    cols: Option<usize>,
    /// Genes per feature mask.
    #[arg(long)]
    features: Option<usize>,
    /// Number of generations to run.
    #[arg(long)]
    generations: Option<u32>,
    /// Per-gene mutation probability.
    #[arg(long)]
    mutation_rate: Option<f64>,
    /// Master random seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Selected-feature count rewarded by the placeholder evaluator.
    #[arg(long, default_value_t = DEFAULT_TARGET)]
    target: usize,
    /// JSON file with run parameters; explicit flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let params = build_params(&cli)?;
    debug!(?params, evaluator_target = cli.target, "resolved run parameters");

    let evaluator = FeatureCountEvaluator::new(cli.target);
    let mut simulation = Simulation::new(params, evaluator)?;
    info!(
        seed = simulation.seed(),
        population = simulation.params().population_size(),
        generations = simulation.params().generations,
        "starting cellular evolution"
    );

    simulation.run();
    report(simulation.best());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // logs go to stderr so the stdout report stays machine readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Resolves run parameters: explicit flags override the config file, which
/// overrides the built-in defaults.
fn build_params(cli: &Cli) -> Result<Params> {
    let mut params = match &cli.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => Params::default(),
    };
    if let Some(rows) = cli.rows {
        params.rows = rows;
    }
    if let Some(cols) = cli.cols {
        params.cols = cols;
    }
    if let Some(features) = cli.features {
        params.num_features = features;
    }
    if let Some(generations) = cli.generations {
        params.generations = generations;
    }
    if let Some(mutation_rate) = cli.mutation_rate {
        params.mutation_rate = mutation_rate;
    }
    if let Some(seed) = cli.seed {
        params.rng_seed = Some(seed);
    }
    Ok(params)
}

/// Prints the result report for the fittest individual.
fn report(best: &Individual) {
    println!("Best fitness: {:.4}", best.fitness());
    let features: Vec<String> = best
        .selected_features()
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Selected features: {}", features.join(" "));
}
