use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use parcelmatch_core::{Error, DEFAULT_TOP_N};
use parcelmatch_ingest::{export, FileProvider, Pipeline};

/// Find comparable parcels with a weighted similarity model
#[derive(Parser, Debug)]
#[command(name = "parcelmatch")]
#[command(about = "Comparable property finder", long_about = None)]
struct Args {
    /// Path to a JSON file of raw parcel records
    #[arg(short, long)]
    data: PathBuf,

    /// Target PIN to find comparables for; omit to list available pins
    #[arg(short, long)]
    pin: Option<String>,

    /// Number of comparables to return
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Write the validated dataset to this file as JSON
    #[arg(long)]
    export: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting parcelmatch v{}", env!("CARGO_PKG_VERSION"));

    let pipeline = Pipeline::new(Box::new(FileProvider::new(&args.data)))?;
    match pipeline.ingest() {
        Ok(report) => info!(
            "Loaded {} properties ({} dropped, {} outliers flagged)",
            report.retained,
            report.dropped,
            report.flagged_pins().len()
        ),
        Err(e) => warn!("Ingestion degraded to an empty dataset: {}", e),
    }

    if let Some(path) = &args.export {
        if let Some(dataset) = pipeline.dataset() {
            export::export_json(&dataset, path)?;
        }
    }

    match &args.pin {
        Some(pin) => match pipeline.find_comparables(pin, args.top_n) {
            Ok(results) => println!("{}", serde_json::to_string_pretty(&results)?),
            Err(Error::UnknownTarget(pin)) => {
                eprintln!("PIN {pin} not found in the dataset");
            }
            Err(Error::EmptyDataset) => {
                eprintln!("No property data loaded");
            }
            Err(e) => return Err(e.into()),
        },
        None => {
            for pin in pipeline.list_pins() {
                println!("{pin}");
            }
        }
    }

    Ok(())
}
