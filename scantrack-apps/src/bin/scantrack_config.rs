use anyhow::Result;
use clap::{Parser, ValueEnum};
use schemars::schema_for;
use tracing::debug;

#[derive(Debug, Parser)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct Args {
    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[derive(Debug, clap::Subcommand)]
enum Subcommand {
    /// Generate JSON schema for the specified config file.
    Schema {
        /// Kind of config file.
        #[clap(value_enum, ignore_case = true)]
        kind: ConfigKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConfigKind {
    LocatorConfig,
    SensorEvent,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    debug!(?args);

    match args.subcommand {
        Subcommand::Schema { kind } => {
            let schema = match kind {
                ConfigKind::LocatorConfig => schema_for!(scantrack_apps::LocatorConfig),
                ConfigKind::SensorEvent => schema_for!(scantrack_apps::SensorEvent),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}
