use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::time::SystemTime;
use tracing::info;

use nearpoint::report::{format_match, max_distance_km, write_matches_csv};
use nearpoint::{find_nearest, read_csv_file, ColumnSelector, CoordinateSet, CsvColumns};

#[derive(Parser, Debug)]
#[command(name = "nearpoint-csv")]
#[command(about = "Match every point of a source CSV to its nearest point in a target CSV (great-circle distance).", long_about = None)]
struct Cli {
    /// Path to the source .csv file
    #[arg(short, long)]
    source: String,

    /// Path to the target .csv file
    #[arg(short, long)]
    target: String,

    /// Latitude column, as a header name or zero-based index
    #[arg(long, default_value = "latitude")]
    lat_col: ColumnSelector,

    /// Longitude column, as a header name or zero-based index
    #[arg(long, default_value = "longitude")]
    lon_col: ColumnSelector,

    /// Treat the first row as data rather than a header
    #[arg(long, default_value_t = false)]
    no_headers: bool,

    /// Output CSV of matches. If omitted, prints matches and a summary to stdout.
    #[arg(short, long)]
    out: Option<String>,
}

fn load(path: &str, columns: &CsvColumns) -> Result<CoordinateSet> {
    let (set, report) =
        read_csv_file(path, columns).with_context(|| format!("reading {}", path))?;
    info!(
        path,
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "loaded coordinates"
    );
    Ok(set)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    nearpoint::init_logging();

    let columns = CsvColumns {
        lat: cli.lat_col.clone(),
        lon: cli.lon_col.clone(),
        has_headers: !cli.no_headers,
    };

    let source = load(&cli.source, &columns)?;
    let target = load(&cli.target, &columns)?;

    let now = SystemTime::now();
    let matches = find_nearest(&source, &target)
        .with_context(|| format!("matching {} against {}", &cli.source, &cli.target))?;
    if let Ok(elapsed) = now.elapsed() {
        info!(
            pairs = source.len() * target.len(),
            millis = elapsed.as_secs_f64() * 1000.0,
            "matching done"
        );
    }

    if let Some(out_path) = cli.out {
        let file =
            File::create(&out_path).with_context(|| format!("creating CSV {}", &out_path))?;
        write_matches_csv(file, &matches).with_context(|| format!("writing CSV {}", &out_path))?;
        println!("Wrote {} matches to {}", matches.len(), out_path);
    } else {
        for m in &matches {
            println!("{}", format_match(m));
        }
        println!("Matched: {}", matches.len());
        if let Some(maxd) = max_distance_km(&matches) {
            println!("Max match distance (km): {:.2}", maxd);
        }
    }

    Ok(())
}
