mod display;

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fingerlings_core::{LocationFilter, Species};
use fingerlings_forecast::{ForecastRequest, forecast};
use fingerlings_store::{MemoryStore, RecordQuery, RecordStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fingerlings", version, about = "Fingerling distribution harvest forecasts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project monthly harvest weight for a species over a date range.
    Forecast(ForecastArgs),
    /// List supported species and their growth coefficients.
    Species,
    /// Convert a JSON record dump to Parquet.
    Import {
        #[arg(long, value_name = "PATH")]
        json: PathBuf,
        #[arg(long, value_name = "PATH")]
        out: PathBuf,
    },
}

#[derive(Args)]
struct ForecastArgs {
    #[arg(long)]
    species: String,
    /// First day of the range (YYYY-MM-DD), inclusive.
    #[arg(long, value_name = "DATE")]
    from: NaiveDate,
    /// Last day of the range (YYYY-MM-DD), inclusive.
    #[arg(long, value_name = "DATE")]
    to: NaiveDate,
    #[arg(long)]
    province: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    barangay: Option<String>,
    /// Distribution records (.parquet, or .json).
    #[arg(
        long,
        env = "FINGERLINGS_DATA",
        default_value = "data/distributions.parquet"
    )]
    data: PathBuf,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Forecast(args) => print!("{}", run_forecast(&args)?),
        Command::Species => print!("{}", display::render_species()),
        Command::Import { json, out } => run_import(&json, &out)?,
    }
    Ok(())
}

fn run_forecast(args: &ForecastArgs) -> anyhow::Result<String> {
    // Reject the species before loading anything.
    let species = Species::resolve(&args.species)
        .map_err(|_| anyhow::anyhow!("invalid species: {:?}", args.species))?;

    let location = LocationFilter::from_raw(
        args.province.as_deref(),
        args.city.as_deref(),
        args.barangay.as_deref(),
    );
    let store = MemoryStore::open(&args.data)
        .with_context(|| format!("loading records from {}", args.data.display()))?;
    let records = store.distributions(&RecordQuery {
        species,
        date_from: args.from,
        date_to: args.to,
        location: location.clone(),
    })?;

    let request = ForecastRequest::new(&args.species, args.from, args.to).with_location(location);
    let result = forecast(&request, &records)?;
    info!(
        months = result.predictions.len(),
        total_predicted_kg = result.totals.total_predicted_harvest,
        "forecast complete"
    );

    match args.format {
        Format::Table => Ok(display::render_forecast(&result)),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&result)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn run_import(json: &std::path::Path, out: &std::path::Path) -> anyhow::Result<()> {
    let records = fingerlings_store::read_distributions_json(json)
        .with_context(|| format!("reading {}", json.display()))?;
    fingerlings_store::write_distributions(out, &records)
        .with_context(|| format!("writing {}", out.display()))?;
    eprintln!("  Imported {} records into {}", records.len(), out.display());
    Ok(())
}
