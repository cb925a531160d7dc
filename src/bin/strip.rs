use clap::Parser;
use std::path::PathBuf;
use white_bg_strip_wasm::assets::{BatchConfig, BatchReport, process_assets};
use white_bg_strip_wasm::WHITEISH_THRESHOLD;
use anyhow::Result;
use serde_json::json;

/// Strip white backgrounds from generated PNG artifacts and copy them into an asset folder.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Logical asset names to look for (defaults to the decoration set)
    names: Vec<String>,

    /// Directory holding the generated artifacts
    #[arg(short, long)]
    source_dir: PathBuf,

    /// Destination asset folder (created if absent)
    #[arg(short, long)]
    dest_dir: PathBuf,

    /// Channel value above which red, green and blue count as background
    #[arg(short, long, default_value_t = WHITEISH_THRESHOLD)]
    threshold: u8,

    /// Print a JSON summary of the run on stdout
    #[arg(long)]
    json: bool,
}

fn report_json(report: &BatchReport) -> serde_json::Value {
    let processed: Vec<_> = report
        .processed
        .iter()
        .map(|o| {
            json!({
                "name": o.name,
                "source": o.source.display().to_string(),
                "destination": o.destination.display().to_string(),
                "cleared": o.cleared,
            })
        })
        .collect();
    json!({ "processed": processed, "missing": report.missing })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = BatchConfig::new(args.source_dir, args.dest_dir);
    config.threshold = args.threshold;
    if !args.names.is_empty() {
        config.names = args.names;
    }

    let report = process_assets(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    }
    log::info!(
        "done: {} processed, {} missing",
        report.processed.len(),
        report.missing.len()
    );

    Ok(())
}
