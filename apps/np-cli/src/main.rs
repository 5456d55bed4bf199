use clap::{Parser, Subcommand};
use np_config::{PlanConfig, validate_config};
use np_core::PlanResult;
use np_generate::StrategyRegistry;
use np_plan::PlanRunner;
use np_store::DatasetStore;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "np-cli")]
#[command(about = "NetPlan CLI - Minimum-cost network planning over demand points", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a plan configuration file
    Validate {
        /// Path to the plan configuration (JSON or YAML)
        config_path: PathBuf,
    },
    /// Run a plan and persist the resulting dataset
    Plan {
        /// Path to the plan configuration (JSON or YAML)
        config_path: PathBuf,
        /// Output directory for the dataset and summary files
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List the available generation algorithms
    Algorithms,
    /// Show a summary of a persisted dataset
    ShowDataset {
        /// Path to a dataset directory written by `plan`
        dataset_path: PathBuf,
    },
}

fn main() -> PlanResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Plan {
            config_path,
            output,
        } => cmd_plan(&config_path, &output),
        Commands::Algorithms => cmd_algorithms(),
        Commands::ShowDataset { dataset_path } => cmd_show_dataset(&dataset_path),
    }
}

fn cmd_validate(config_path: &Path) -> PlanResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = PlanConfig::from_path(config_path)?;
    validate_config(&config)?;
    println!("✓ Configuration is valid");
    println!("  Algorithm: {}", config.network_algorithm);
    println!(
        "  Minimum node count: {}",
        config.network_parameters.minimum_node_count
    );
    if let Some(existing) = &config.existing_networks {
        println!("  Existing network: {}", existing.filename.display());
    }
    Ok(())
}

fn cmd_plan(config_path: &Path, output: &Path) -> PlanResult<()> {
    println!("Planning from configuration: {}", config_path.display());

    let config = PlanConfig::from_path(config_path)?;
    let runner = PlanRunner::new(config, output);
    let report = runner.run()?;

    println!("✓ Plan completed: {}", output.display());
    println!("  Algorithm: {}", report.algorithm);
    println!("  Projection: {}", report.projection);
    println!(
        "  Nodes: {} demand, {} existing",
        report.demand_node_count, report.existing_node_count
    );
    println!("  Subnets: {}", report.subnets);
    println!(
        "  Segments: {} proposed, {} existing",
        report.proposed_segments, report.existing_segments
    );
    if report.synthetic_nodes > 0 {
        println!("  Junction nodes created: {}", report.synthetic_nodes);
    }
    println!(
        "  Total proposed length: {:.3}",
        report.total_proposed_weight
    );
    Ok(())
}

fn cmd_algorithms() -> PlanResult<()> {
    println!("Available generation algorithms:");
    for name in StrategyRegistry::builtin().names() {
        println!("  {}", name);
    }
    Ok(())
}

fn cmd_show_dataset(dataset_path: &Path) -> PlanResult<()> {
    let store = DatasetStore::open(dataset_path)?;

    let nodes = store.iter_nodes(true).count();
    let fake = store.iter_nodes(true).filter(|n| n.is_fake).count();
    let proposed = store.iter_segments(Some(false)).count();
    let existing = store.iter_segments(Some(true)).count();

    println!("Dataset: {}", dataset_path.display());
    println!("  Nodes: {} ({} junctions)", nodes, fake);
    println!("  Subnets: {}", store.subnets().len());
    println!("  Segments: {} proposed, {} existing", proposed, existing);
    Ok(())
}
