use std::{
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;
use fs_err as fs;
use scantrack_apps::{
    publish_cycle, read_events, utils::init_tracing, JsonLinesPublisher, LocatorConfig,
    TargetLocator,
};
use scantrack_interface::ScanPublisher;
use scantrack_tracing::Tracing;
use tracing::info;

/// Replays recorded scans and bearing hints through the target locator.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct LocatorArgs {
    /// Path to the setting file.
    #[clap(short, long, value_parser)]
    config_path: Option<PathBuf>,
    /// Path to the JSON lines file with the sensor events. Reads stdin if omitted.
    #[clap(short, long, value_parser)]
    events: Option<PathBuf>,
    /// Path to write the JSON lines output to. Writes stdout if omitted.
    #[clap(short, long, value_parser)]
    output: Option<PathBuf>,
    /// Prints the default setting as TOML.
    #[clap(long)]
    show_default_config: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = LocatorArgs::parse();
    info!("ParsedArgs {:?}", args);

    if args.show_default_config {
        print!("{}", toml::to_string(&LocatorConfig::default())?);
        return Ok(());
    }

    let config = match scantrack_apps::utils::get_locator_config(args.config_path) {
        Some(config_path) => LocatorConfig::try_new(config_path)?,
        None => LocatorConfig::default(),
    };

    let events = match &args.events {
        Some(path) => read_events(BufReader::new(fs::File::open(path)?))?,
        None => read_events(io::stdin().lock())?,
    };
    info!("{} events", events.len());

    let writer: Box<dyn Write + Send> = match &args.output {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    let publisher = Tracing::new(JsonLinesPublisher::new(writer));
    let scan_publisher: Option<&dyn ScanPublisher> = if config.publish_filtered_scan {
        Some(&publisher)
    } else {
        None
    };

    let mut locator = TargetLocator::new(config)?;
    let mut cycles = 0;
    for event in &events {
        if let Some(cycle) = locator.handle(event)? {
            publish_cycle(&cycle, scan_publisher, &publisher)?;
            cycles += 1;
        }
    }
    publisher.get_ref().flush()?;

    match locator.tracker() {
        Some(tracker) => info!(
            cycles,
            range = tracker.range(),
            bearing = tracker.bearing(),
            "done"
        ),
        None => info!(cycles, "done without a track"),
    }
    Ok(())
}
