//! Command-line front end: read a config, run one simulation, print the result as JSON on stdout.
//!
//! ```text
//! shopsim --config shop.toml --servers 3 --pretty
//! RUST_LOG=shopsim=debug shopsim --customers 5
//! ```

use clap::Parser;
use shopsim::{run_simulation, SimulationConfig, SimulationResult};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopsim", version, about = "Simulate a multi-server shop queue")]
struct Cli {
    /// TOML or JSON config file; flags below override its values
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Seed for every random draw
    #[arg(long)]
    seed: Option<u64>,
    /// Number of customers to spawn
    #[arg(long)]
    customers: Option<usize>,
    /// Mean minutes between arrivals
    #[arg(long)]
    mean_inter_arrival: Option<f64>,
    /// Mean minutes of service
    #[arg(long)]
    mean_service_time: Option<f64>,
    /// Number of identical servers
    #[arg(long)]
    servers: Option<usize>,
    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    /// The file config (or the defaults), with every flag that was given laid over it.
    fn config(&self) -> Result<SimulationConfig, shopsim::ConfigError> {
        let base = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };
        Ok(self.override_fields(base))
    }

    fn override_fields(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(customers) = self.customers {
            config.customer_count = customers;
        }
        if let Some(mean) = self.mean_inter_arrival {
            config.mean_inter_arrival = mean;
        }
        if let Some(mean) = self.mean_service_time {
            config.mean_service_time = mean;
        }
        if let Some(servers) = self.servers {
            config.server_count = servers;
        }
        config
    }
}

fn render(result: &SimulationResult, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        },
    };

    let result = match run_simulation(&config) {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(?config, "{e}");
            return ExitCode::FAILURE;
        },
    };

    match render(&result, cli.pretty) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!("failed to serialize result: {e}");
            ExitCode::FAILURE
        },
    }
}
