#![warn(clippy::all, clippy::pedantic)]
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use csv::Writer;
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use trustflow::config::DEFAULT_MAX_STEPS;
use trustflow::{
    find_transfer_path, transfers_to_dot, Amount, Config, SimpleEdge, TransferPlan,
};

/// Find a transitive transfer path through a snapshot of the trust network
#[derive(Debug, Parser)]
#[command(name = "trustflow-cli", version, about)]
struct Args {
    /// CSV snapshot with `from,to,token_owner,capacity` columns
    #[arg(long)]
    edges: PathBuf,

    /// Sending account
    #[arg(long)]
    from: String,

    /// Receiving account
    #[arg(long)]
    to: String,

    /// Value to transfer, in base units
    #[arg(long, value_parser = parse_amount)]
    value: Amount,

    /// Maximum number of transfer steps
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Amount treated as unbounded when looking for path bottlenecks
    #[arg(long, value_parser = parse_amount)]
    bottleneck_seed: Option<Amount>,

    /// Give up after this many augmenting paths
    #[arg(long)]
    max_augmentations: Option<usize>,

    /// Route exactly the requested value instead of the full max flow
    #[arg(long)]
    trim: bool,

    /// Write the transfer steps to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the transfer steps as a Graphviz graph
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default()
            .with_max_steps(self.max_steps)
            .with_trim_to_requested(self.trim);
        if let Some(seed) = &self.bottleneck_seed {
            config = config.with_bottleneck_seed(seed.clone());
        }
        if let Some(limit) = self.max_augmentations {
            config = config.with_max_augmentations(limit);
        }
        config
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_amount(s: &str) -> Result<Amount, String> {
    Amount::parse_bytes(s.trim().as_bytes(), 10)
        .ok_or_else(|| format!("`{s}` is not a non-negative integer"))
}

// Function to read the snapshot edges from a CSV file
fn read_edges_csv(path: &Path) -> Result<Vec<SimpleEdge<String, String>>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let edges = rdr.deserialize().collect::<Result<Vec<_>, _>>()?;
    Ok(edges)
}

// Function to write the transfer steps
fn write_csv<W: Write>(plan: &TransferPlan<String, String>, out: W) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(out);
    for step in &plan.transfer_steps {
        wtr.serialize(step)?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    TermLogger::init(
        args.log_level(),
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let edges = read_edges_csv(&args.edges)?;
    log::info!("read {} edges from {}", edges.len(), args.edges.display());

    let plan = find_transfer_path(edges, &args.from, &args.to, &args.value, args.config())
        .map_err(|e| e.to_string())?;
    log::info!(
        "routing {} of at most {} in {} steps",
        args.value,
        plan.max_flow_value,
        plan.transfer_steps.len()
    );

    match &args.output {
        Some(path) => write_csv(&plan, File::create(path)?)?,
        None => write_csv(&plan, io::stdout().lock())?,
    }

    if let Some(path) = &args.dot {
        std::fs::write(path, transfers_to_dot(&plan.transfer_steps))?;
    }

    Ok(())
}
