//! Batch pricing over a JSON file of quote requests
//!
//! Tables are loaded once and shared; each request then prices
//! independently, so the batch fans out across a rayon pool.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use rumbo_pricing::{QuoteEngine, QuoteRequest, QuoteResult, StoredParameters, Tables};

#[derive(Parser, Debug)]
#[command(name = "quote_batch", about = "Price a batch of quote requests")]
struct Args {
    /// JSON file containing an array of quote requests
    input: PathBuf,

    /// Pricing tables JSON; embedded defaults when omitted
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Emit full quote results instead of the one-line summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct BatchEntry {
    index: usize,
    result: Option<QuoteResult>,
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file = File::open(&args.input)?;
    let requests: Vec<QuoteRequest> = serde_json::from_reader(BufReader::new(file))?;
    info!("loaded {} requests from {}", requests.len(), args.input.display());

    let tables = match &args.tables {
        Some(path) => Tables::from_json_path(path)?,
        None => Tables::default_pricing(),
    };
    let engine = QuoteEngine::new(tables, StoredParameters::default_rumbo());
    let start = Instant::now();

    let entries: Vec<BatchEntry> = requests
        .par_iter()
        .enumerate()
        .map(|(index, request)| {
            match engine.price(request) {
                Ok(result) => BatchEntry {
                    index,
                    result: Some(result),
                    error: None,
                },
                Err(err) => BatchEntry {
                    index,
                    result: None,
                    error: Some(err.to_string()),
                },
            }
        })
        .collect();

    let elapsed = start.elapsed();
    let failures = entries.iter().filter(|e| e.error.is_some()).count();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!(
            "Priced {} requests in {:.2?} ({} failed)",
            entries.len(),
            elapsed,
            failures
        );
        for entry in &entries {
            if let Some(error) = &entry.error {
                println!("  request {}: ERROR {}", entry.index, error);
            }
        }
    }

    Ok(())
}
